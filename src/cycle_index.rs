//! Wrapping index arithmetic shared by the panic cycle and button focus.

/// Step `current` by `delta` positions around a ring of `len` slots.
///
/// An empty ring always yields 0.
#[must_use]
pub fn step_wrapping(current: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let offset = delta.unsigned_abs() % len;
    let current = current % len;
    if delta >= 0 {
        (current + offset) % len
    } else {
        (current + len - offset) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_wraps_forward_and_backward() {
        assert_eq!(step_wrapping(0, 3, 1), 1);
        assert_eq!(step_wrapping(2, 3, 1), 0);
        assert_eq!(step_wrapping(0, 3, -1), 2);
        assert_eq!(step_wrapping(1, 3, -7), 0);
    }

    #[test]
    fn empty_ring_yields_zero() {
        assert_eq!(step_wrapping(4, 0, 1), 0);
    }

    #[test]
    fn single_slot_ring_stays_put() {
        assert_eq!(step_wrapping(0, 1, 1), 0);
        assert_eq!(step_wrapping(0, 1, -1), 0);
    }
}

//! Session statistics so the exit summary reflects what was actually asked.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub(crate) struct SessionStats {
    /// Accepted selections per category key.
    pub(crate) picks: BTreeMap<&'static str, u32>,
    pub(crate) panics: u32,
    /// Unknown category keys (script mode only; the UI cannot produce them).
    pub(crate) rejected: u32,
    /// Presses swallowed while the sponsor was still thinking.
    pub(crate) ignored: u32,
    start_time: Option<Instant>,
}

impl SessionStats {
    pub(crate) fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    pub(crate) fn record_pick(&mut self, category: &'static str) {
        *self.picks.entry(category).or_insert(0) += 1;
    }

    pub(crate) fn record_panic(&mut self) {
        self.panics += 1;
    }

    pub(crate) fn record_rejected(&mut self) {
        self.rejected += 1;
    }

    pub(crate) fn record_ignored(&mut self) {
        self.ignored += 1;
    }

    pub(crate) fn total_picks(&self) -> u32 {
        self.picks.values().sum()
    }

    pub(crate) fn session_duration(&self) -> Duration {
        self.start_time
            .map(|start| start.elapsed())
            .unwrap_or_default()
    }

    pub(crate) fn has_activity(&self) -> bool {
        self.total_picks() > 0 || self.panics > 0 || self.rejected > 0 || self.ignored > 0
    }
}

/// Format the exit summary; empty when nothing happened.
pub(crate) fn format_session_stats(stats: &SessionStats) -> String {
    if !stats.has_activity() {
        return String::new();
    }

    let mut lines = vec![
        String::new(),
        "Session Summary".to_string(),
        "───────────────".to_string(),
        format_stat_line("Questions", &stats.total_picks().to_string()),
    ];
    for (category, count) in &stats.picks {
        lines.push(format_stat_line(&format!("  {category}"), &count.to_string()));
    }
    lines.push(format_stat_line("Panics", &stats.panics.to_string()));
    if stats.ignored > 0 {
        lines.push(format_stat_line("Impatient", &stats.ignored.to_string()));
    }
    if stats.rejected > 0 {
        lines.push(format_stat_line("Rejected", &stats.rejected.to_string()));
    }
    lines.push(format_stat_line(
        "Session",
        &format_duration(stats.session_duration().as_secs_f32()),
    ));
    lines.push(String::new());

    lines.join("\n")
}

fn format_stat_line(label: &str, value: &str) -> String {
    format!("{label:<12} {value}")
}

fn format_duration(secs: f32) -> String {
    if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = (secs / 60.0).floor();
        format!("{}m {:.0}s", mins as u32, secs % 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_has_no_summary() {
        let stats = SessionStats::new();
        assert!(!stats.has_activity());
        assert_eq!(format_session_stats(&stats), "");
    }

    #[test]
    fn picks_are_counted_per_category() {
        let mut stats = SessionStats::new();
        stats.record_pick("angry");
        stats.record_pick("angry");
        stats.record_pick("god");
        stats.record_panic();
        assert_eq!(stats.total_picks(), 3);
        let summary = format_session_stats(&stats);
        assert!(summary.contains("Questions    3"));
        assert!(summary.contains("  angry"));
        assert!(summary.contains("Panics       1"));
        assert!(!summary.contains("Rejected"));
    }

    #[test]
    fn rejected_and_ignored_show_only_when_present() {
        let mut stats = SessionStats::new();
        stats.record_rejected();
        stats.record_ignored();
        let summary = format_session_stats(&stats);
        assert!(summary.contains("Rejected     1"));
        assert!(summary.contains("Impatient    1"));
    }

    #[test]
    fn format_duration_switches_to_minutes() {
        assert_eq!(format_duration(30.5), "30.5s");
        assert_eq!(format_duration(125.0), "2m 5s");
    }
}

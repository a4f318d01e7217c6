//! Button row model: one button per category plus the panic button, with wrapping focus.

use sponsorterm::cycle_index::step_wrapping;
use sponsorterm::pools::CategoryPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ButtonAction {
    Category(&'static str),
    Panic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Button {
    pub(crate) label: &'static str,
    pub(crate) shortcut: char,
    pub(crate) action: ButtonAction,
}

pub(crate) const PANIC_LABEL: &str = "PANIC";

#[derive(Debug, Clone)]
pub(crate) struct ButtonRow {
    buttons: Vec<Button>,
    focused: usize,
}

impl ButtonRow {
    pub(crate) fn new<'a>(pools: impl IntoIterator<Item = &'a CategoryPool>) -> Self {
        let mut buttons: Vec<Button> = pools
            .into_iter()
            .zip('1'..='9')
            .map(|(pool, shortcut)| Button {
                label: pool.label,
                shortcut,
                action: ButtonAction::Category(pool.key),
            })
            .collect();
        buttons.push(Button {
            label: PANIC_LABEL,
            shortcut: 'p',
            action: ButtonAction::Panic,
        });
        Self {
            buttons,
            focused: 0,
        }
    }

    pub(crate) fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub(crate) fn focused(&self) -> usize {
        self.focused
    }

    pub(crate) fn move_focus(&mut self, delta: isize) {
        self.focused = step_wrapping(self.focused, self.buttons.len(), delta);
    }

    pub(crate) fn focused_action(&self) -> Option<ButtonAction> {
        self.buttons.get(self.focused).map(|button| button.action)
    }

    /// Category key for a numeric shortcut position, if one exists.
    pub(crate) fn category_at(&self, position: usize) -> Option<&'static str> {
        match self.buttons.get(position)?.action {
            ButtonAction::Category(key) => Some(key),
            ButtonAction::Panic => None,
        }
    }
}

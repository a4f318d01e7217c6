//! Presentation seam: the controller talks to any frontend through [`Presenter`].

use serde::Serialize;

/// Avatar pose shown by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvatarState {
    #[default]
    Idle,
    Processing,
    Responding,
}

impl AvatarState {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Responding => "responding",
        }
    }
}

/// Outbound calls from the controller to whatever draws the widget.
pub trait Presenter {
    fn render_thought(&mut self, text: &str);
    fn hide_thought(&mut self);
    fn render_response(&mut self, text: &str);
    fn hide_response(&mut self);
    fn render_diagnostic(&mut self, text: &str);
    fn hide_diagnostic(&mut self);
    fn set_inputs_enabled(&mut self, enabled: bool);
    fn set_avatar_state(&mut self, state: AvatarState);
}

/// Retained view model of the widget's display regions.
///
/// Frontends render from this snapshot; `revision` bumps on every presenter call
/// so a render loop can skip redundant redraws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetState {
    pub thought: Option<String>,
    pub response: Option<String>,
    pub diagnostic: Option<String>,
    pub inputs_enabled: bool,
    pub avatar: AvatarState,
    #[serde(skip)]
    pub revision: u64,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            thought: None,
            response: None,
            diagnostic: None,
            inputs_enabled: true,
            avatar: AvatarState::Idle,
            revision: 0,
        }
    }
}

impl WidgetState {
    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Presenter for WidgetState {
    fn render_thought(&mut self, text: &str) {
        self.thought = Some(text.to_string());
        self.touch();
    }

    fn hide_thought(&mut self) {
        self.thought = None;
        self.touch();
    }

    fn render_response(&mut self, text: &str) {
        self.response = Some(text.to_string());
        self.touch();
    }

    fn hide_response(&mut self) {
        self.response = None;
        self.touch();
    }

    fn render_diagnostic(&mut self, text: &str) {
        self.diagnostic = Some(text.to_string());
        self.touch();
    }

    fn hide_diagnostic(&mut self) {
        self.diagnostic = None;
        self.touch();
    }

    fn set_inputs_enabled(&mut self, enabled: bool) {
        self.inputs_enabled = enabled;
        self.touch();
    }

    fn set_avatar_state(&mut self, state: AvatarState) {
        self.avatar = state;
        self.touch();
    }
}

//! SponsorTerm library: response selection and the interaction state machine that
//! frontends drive.

pub mod config;
pub mod controller;
pub mod cycle_index;
pub mod error;
pub mod pools;
pub mod presenter;
pub mod selector;
mod telemetry;
pub mod terminal_restore;
pub mod timers;

pub use controller::{Dispatch, InteractionController, InteractionState};
pub use error::SelectError;
pub use presenter::{AvatarState, Presenter, WidgetState};
pub use selector::{ResponseSelector, UsageSnapshot};
pub use telemetry::{init_tracing, tracing_log_path};
pub use timers::{Timing, TimerEvent, TimerQueue};

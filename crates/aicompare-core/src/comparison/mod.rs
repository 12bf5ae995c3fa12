//! Q&A comparison view-model.
//!
//! Pure transitions over [`ComparisonState`] plus the async
//! [`ComparisonController`] that runs their effects.

mod controller;
mod effect;
mod event;
mod state;
mod transition;

pub use controller::ComparisonController;
pub use effect::Effect;
pub use event::Event;
pub use state::{ComparisonState, FetchPhase, HumanizeInFlight};
pub use transition::transition;

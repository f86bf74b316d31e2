//! Pulsar Core - Shared data model
//!
//! Types shared between the interpreter resolver (`pulsar-runtime`) and the
//! application crate (`pulsar`): user settings, saved projects and the names
//! of the event channels pushed to the presentation layer.

mod events;
mod project;
mod settings;

pub use events::*;
pub use project::*;
pub use settings::*;

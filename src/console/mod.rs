//! Client-side state for an admin console front-end.
//!
//! The store is a plain value driven by [`store::reduce`]; network results are
//! fed back in as actions tagged with a [`sequencer::Ticket`] so that a slow,
//! superseded response can never overwrite a newer one.

pub mod debounce;
pub mod notify;
pub mod sequencer;
pub mod store;

pub use debounce::Debouncer;
pub use notify::{error_message, Notification, NotificationLevel};
pub use sequencer::{RequestSequencer, ResourceKey, Ticket};
pub use store::{reduce, Action, ConsoleState, Resource, RoleDraft};

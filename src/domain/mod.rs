//! Domain layer: slice state, actions, reducers, and the store.

pub mod browse;
pub mod dashboard;
pub mod store;

pub use store::{Action, State, Store};

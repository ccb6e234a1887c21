//! Dashboard slice: state, actions, reducer, selectors.

mod actions;
mod reducer;
pub mod selectors;
mod state;

pub use actions::DashboardAction;
pub use reducer::reduce;
pub use state::{
    overlay, Card, CardDataset, CardDisplay, CardId, CardLoadProgress, DashCard, DashCardId,
    Dashboard, DashboardId, DashboardState, Parameter, ParameterId, Sidebar,
};

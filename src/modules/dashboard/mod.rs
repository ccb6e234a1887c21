//! Dashboard Module
//!
//! Filter values, edit mode, and the add-filter popover for the open
//! dashboard. The command bar routes `:filter`, `:edit`, `:save` and
//! friends into the free functions here.

pub mod editing;
pub mod filters;

mod popover;

pub use popover::AddParameterPopover;

//! UI Modules
//!
//! Command backends behind the `:` bar plus the add-parameter popover.
//! Each module groups the operations of one tab:
//! - browse: open collection items, maintain bookmarks
//! - dashboard: filters, edit mode, the add-parameter popover
//! - admin: public links, embedding, approved domains
//! - export: CSV and JSON dumps of the current view

pub mod admin;
pub mod browse;
pub mod dashboard;
pub mod export;

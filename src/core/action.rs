//! Actions that modules can return to communicate with the app
#![allow(dead_code)]

use crate::domain::browse::CollectionId;
use crate::domain::dashboard::DashboardId;

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone)]
pub enum Action {
    /// No action needed
    None,

    /// Navigate to a specific view
    Navigate(NavigateTarget),

    /// Copy text to clipboard context
    Copy(String),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Open command palette with optional prefix
    OpenCommand(Option<String>),

    /// Close current overlay/popup
    CloseOverlay,

    /// Request quit
    Quit,
}

/// Navigation targets
#[derive(Debug, Clone)]
pub enum NavigateTarget {
    /// Go back to previous view
    Back,
    /// Go to the collection browser
    Collections,
    /// Go to the recently viewed list
    Recents,
    /// Open a collection's item list
    Collection(CollectionId),
    /// Open a dashboard
    Dashboard(DashboardId),
    /// Go to the permissions matrix
    Permissions,
    /// Go to the sharing panel
    Sharing,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}

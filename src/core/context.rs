//! Shared context passed to modules
#![allow(dead_code)]

use crate::domain::browse::CollectionId;
use crate::domain::dashboard::{DashCardId, DashboardId, ParameterId};

/// Currently selected item in the UI
#[derive(Debug, Clone)]
pub enum Selected {
    None,
    Collection(CollectionId),
    Dashboard(DashboardId),
    DashCard(DashCardId),
    Parameter(ParameterId),
}

/// Shared context available to all modules
#[derive(Debug)]
pub struct Context {
    /// Currently selected item
    pub selected: Selected,

    /// Clipboard content for copy/paste between screens
    pub clipboard: Option<String>,

    /// Connected server display string
    pub endpoint: String,

    /// Who the API key authenticates as
    pub user: Option<String>,

    /// Whether the dashboard screen is in edit mode
    pub editing: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            selected: Selected::None,
            clipboard: None,
            endpoint: String::new(),
            user: None,
            editing: false,
        }
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set clipboard content
    pub fn set_clipboard(&mut self, content: String) {
        self.clipboard = Some(content);
    }

    /// Get clipboard content
    pub fn get_clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }
}

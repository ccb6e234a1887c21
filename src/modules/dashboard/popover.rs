//! Add-filter popover
//!
//! A small picker over the parameter kinds a dashboard filter can
//! have. The main loop routes keys here while the popover is open and
//! collects the committed choice with `take_choice`.

use crossterm::event::{KeyCode, KeyEvent};

use crate::core::{Action, Context, Module};

/// Parameter kinds offered by the picker, as (kind, label).
pub const PARAMETER_KINDS: &[(&str, &str)] = &[
    ("category", "Category"),
    ("date/all-options", "Date"),
    ("number/=", "Number"),
    ("string/=", "Text"),
    ("location", "Location"),
];

pub struct AddParameterPopover {
    pub selected: usize,
    chosen: Option<(&'static str, &'static str)>,
}

impl AddParameterPopover {
    pub fn new() -> Self {
        Self {
            selected: 0,
            chosen: None,
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.chosen = None;
    }

    /// The choice committed by Enter, consumed by the caller.
    pub fn take_choice(&mut self) -> Option<(&'static str, &'static str)> {
        self.chosen.take()
    }

    pub fn kinds(&self) -> &'static [(&'static str, &'static str)] {
        PARAMETER_KINDS
    }
}

impl Default for AddParameterPopover {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for AddParameterPopover {
    fn id(&self) -> &'static str {
        "add-parameter"
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> Action {
        let count = PARAMETER_KINDS.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = (self.selected + 1) % count;
                Action::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = (self.selected + count - 1) % count;
                Action::None
            }
            KeyCode::Enter => {
                self.chosen = Some(PARAMETER_KINDS[self.selected]);
                Action::None
            }
            KeyCode::Esc => Action::CloseOverlay,
            _ => Action::None,
        }
    }
}

//! The closed vocabulary of dashboard state transitions.
//!
//! Every mutation of [`DashboardState`](super::DashboardState) is one
//! of these, dispatched through the store. Async collaborators (the
//! runtime worker, timers in the shell tick) report back by dispatching
//! more actions; nothing else touches the state.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::state::{CardDataset, CardId, DashCard, DashCardId, Dashboard, DashboardId, ParameterId};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    /// Screen mount: close the sidebar and leave edit mode. Loaded
    /// records and caches are kept.
    Initialize,
    /// Screen unmount: drop everything back to the initial state.
    Reset,

    // Loading
    /// A dashboard and its placements arrived from the server.
    DashboardLoaded {
        dashboard: Dashboard,
        dashcards: Vec<DashCard>,
    },
    /// A round of card-data fetches started. The timestamp comes from
    /// the dispatcher; the reducer never reads a clock.
    CardDataRequested {
        dashcard_ids: Vec<DashCardId>,
        started_at: DateTime<Utc>,
    },
    CardDataLoaded {
        dashcard_id: DashCardId,
        card_id: CardId,
        dataset: CardDataset,
    },
    CardDataFailed {
        dashcard_id: DashCardId,
        card_id: CardId,
        error: String,
    },
    /// Compensating action for an abandoned fetch; any late response
    /// is dropped by the dispatcher, not the reducer.
    CardFetchCancelled { dashcard_id: DashCardId },
    MarkCardSlow { card_id: CardId, result: bool },
    SetShowLoadCompleteIndicator { visible: bool },

    // Editing
    /// `Some` enters edit mode with the snapshot taken at that moment;
    /// `None` leaves it (and closes any open sidebar).
    SetEditingDashboard { dashboard: Option<Box<Dashboard>> },
    SetDashboardAttributes {
        id: DashboardId,
        attributes: Map<String, Value>,
        /// Defaults to `true`: attribute edits are assumed dirtying
        /// unless the caller states otherwise.
        is_dirty: Option<bool>,
    },
    SetDashcardAttributes {
        id: DashCardId,
        attributes: Map<String, Value>,
    },

    // Sidebar / popover
    SetSidebar {
        name: String,
        props: Option<Map<String, Value>>,
    },
    CloseSidebar,
    ShowAddParameterPopover,
    HideAddParameterPopover,

    // Parameters
    /// Remove a parameter's value and close the sidebar. The parameter
    /// definition itself is removed through `SetDashboardAttributes`.
    RemoveParameter { id: ParameterId },
    SetParameterValue { id: ParameterId, value: Value },
    ParameterSearchCached {
        cache_key: String,
        values: Vec<Value>,
    },
}

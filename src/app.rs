use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::core::{Action, Context, NavigateTarget, NotifyLevel, Selected};
use crate::domain::browse::{BrowseAction, Collection, CollectionId, CollectionItem, ItemModel};
use crate::domain::dashboard::{
    selectors, Card, CardDataset, CardDisplay, CardId, DashCard, DashCardId, Dashboard,
    DashboardAction, DashboardId, Parameter, ParameterId,
};
use crate::domain::Store;
use crate::modules;
use crate::modules::dashboard::AddParameterPopover;
use crate::store::{BookmarkItem, RecentItem, RecentsStore};

/// Collection id used for the server's root collection in browse state.
pub const ROOT_COLLECTION: CollectionId = 0;

/// Sidebar panel names as stored in dashboard state.
pub const SIDEBAR_INFO: &str = "info";
pub const SIDEBAR_EDIT_PARAMETER: &str = "edit-parameter";
pub const SIDEBAR_SHARING: &str = "sharing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Browse,
    Dashboard,
    Admin,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Browse, Tab::Dashboard, Tab::Admin];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Browse => "Browse",
            Tab::Dashboard => "Dashboard",
            Tab::Admin => "Admin",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Tab::Browse => '1',
            Tab::Dashboard => '2',
            Tab::Admin => '3',
        }
    }
}

/// Which pane owns key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    List,
    Details,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
    Prompt(PromptKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Rename,
    Describe,
    FilterValue,
    Domains,
}

impl PromptKind {
    pub fn label(&self) -> &'static str {
        match self {
            PromptKind::Rename => "rename",
            PromptKind::Describe => "describe",
            PromptKind::FilterValue => "filter value",
            PromptKind::Domains => "approved domains",
        }
    }
}

/// Where data comes from: a seeded in-memory fixture or a live server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    Mock,
    Api,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseSection {
    Collections,
    Recents,
    Bookmarks,
}

impl BrowseSection {
    pub const ALL: [BrowseSection; 3] = [
        BrowseSection::Collections,
        BrowseSection::Recents,
        BrowseSection::Bookmarks,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            BrowseSection::Collections => "Collections",
            BrowseSection::Recents => "Recents",
            BrowseSection::Bookmarks => "Bookmarks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSection {
    Permissions,
    Sharing,
}

impl AdminSection {
    pub const ALL: [AdminSection; 2] = [AdminSection::Permissions, AdminSection::Sharing];

    pub fn title(&self) -> &'static str {
        match self {
            AdminSection::Permissions => "Permissions",
            AdminSection::Sharing => "Sharing",
        }
    }
}

/// Panes inside the dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPane {
    Grid,
    Filters,
    Inspector,
}

impl DashboardPane {
    pub fn title(&self) -> &'static str {
        match self {
            DashboardPane::Grid => "Cards",
            DashboardPane::Filters => "Filters",
            DashboardPane::Inspector => "Inspector",
        }
    }

    pub fn next(&self) -> DashboardPane {
        match self {
            DashboardPane::Grid => DashboardPane::Filters,
            DashboardPane::Filters => DashboardPane::Inspector,
            DashboardPane::Inspector => DashboardPane::Grid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PendingChord {
    pub key: char,
    pub since: Instant,
}

/// Permissions matrix shaped for rendering, decoupled from the API types.
#[derive(Debug, Clone, Default)]
pub struct PermissionsView {
    pub revision: i64,
    pub databases: Vec<String>,
    pub rows: Vec<PermissionsRowView>,
}

#[derive(Debug, Clone)]
pub struct PermissionsRowView {
    pub group: String,
    pub levels: Vec<String>,
}

/// One staged result for the mock data engine.
#[derive(Debug, Clone)]
struct MockLoad {
    dashcard_id: DashCardId,
    card_id: CardId,
    ticks: u32,
    fail: bool,
}

pub struct App {
    pub ctx: Context,
    pub current_tab: Tab,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub data_mode: DataMode,

    /// All dashboard and browse state lives behind the store.
    pub store: Store,

    // Browse tab selection state.
    pub browse_section: BrowseSection,
    pub current_collection: CollectionId,
    pub selected_collection: usize,
    pub selected_item: usize,
    pub selected_recent: usize,
    pub selected_bookmark: usize,

    // Dashboard tab selection state.
    pub dashboard_pane: DashboardPane,
    pub selected_card: usize,
    pub selected_parameter: usize,
    pub add_parameter_popover: AddParameterPopover,
    /// Card layout as it looked when edit mode was entered, so a
    /// cancel can put moved cards back.
    pub editing_layout_backup: Option<Vec<DashCard>>,

    // Admin tab state.
    pub admin_section: AdminSection,
    pub selected_perm_row: usize,
    pub permissions: Option<PermissionsView>,
    pub approved_domains: Option<String>,

    // Local persistence for recents and bookmarks.
    pub recents_store: Option<RecentsStore>,
    pub recent_items: Vec<RecentItem>,
    pub bookmarks: Vec<BookmarkItem>,
    pub recents_limit: usize,

    // Server connection info shown in the header.
    pub endpoint: String,
    pub server_status: String,
    pub server_user: Option<String>,

    pub command: CommandBar,
    pub prompt_context: Option<String>,
    pub status: Option<StatusMessage>,
    pub pending_chord: Option<PendingChord>,
    pub help_open: bool,
    pub should_quit: bool,

    // Requests drained by the main loop and forwarded to the runtime bridge.
    pub pending_collections_request: bool,
    pub pending_items_request: Option<CollectionId>,
    pub pending_dashboard_request: Option<DashboardId>,
    pub pending_card_round: Option<DashboardId>,
    pub pending_search_request: Option<(DashboardId, ParameterId, String)>,
    pub pending_save_request: Option<(DashboardId, Map<String, Value>)>,
    pub pending_share_request: Option<(DashboardId, bool)>,
    pub pending_embed_request: Option<(DashboardId, bool)>,
    pub pending_permissions_request: bool,
    pub pending_domains_read: bool,
    pub pending_domains_write: Option<String>,
    pub pending_connect: Option<String>,

    // Card load round tracking for the slow badge and the completion cue.
    pub slow_card_ms: u64,
    slow_flagged: BTreeSet<CardId>,
    indicator_since: Option<Instant>,

    // Mock data engine.
    mock_queue: Vec<MockLoad>,
}

impl App {
    pub fn new() -> Self {
        let mut app = Self {
            ctx: Context::default(),
            current_tab: Tab::Browse,
            focus: Focus::List,
            input_mode: InputMode::Normal,
            data_mode: DataMode::Mock,
            store: Store::new(),
            browse_section: BrowseSection::Collections,
            current_collection: ROOT_COLLECTION,
            selected_collection: 0,
            selected_item: 0,
            selected_recent: 0,
            selected_bookmark: 0,
            dashboard_pane: DashboardPane::Grid,
            selected_card: 0,
            selected_parameter: 0,
            add_parameter_popover: AddParameterPopover::new(),
            editing_layout_backup: None,
            admin_section: AdminSection::Permissions,
            selected_perm_row: 0,
            permissions: None,
            approved_domains: None,
            recents_store: None,
            recent_items: Vec::new(),
            bookmarks: Vec::new(),
            recents_limit: 20,
            endpoint: "mock".to_string(),
            server_status: "seeded".to_string(),
            server_user: None,
            command: CommandBar::default(),
            prompt_context: None,
            status: None,
            pending_chord: None,
            help_open: false,
            should_quit: false,
            pending_collections_request: false,
            pending_items_request: None,
            pending_dashboard_request: None,
            pending_card_round: None,
            pending_search_request: None,
            pending_save_request: None,
            pending_share_request: None,
            pending_embed_request: None,
            pending_permissions_request: false,
            pending_domains_read: false,
            pending_domains_write: None,
            pending_connect: None,
            slow_card_ms: 5000,
            slow_flagged: BTreeSet::new(),
            indicator_since: None,
            mock_queue: Vec::new(),
        };
        app.seed_mock();
        app.sync_context();
        app
    }

    /// Keep the shared context in sync with the focused pane and selection.
    pub fn sync_context(&mut self) {
        self.ctx.endpoint = self.endpoint.clone();
        self.ctx.user = self.server_user.clone();
        self.ctx.editing = self.store.dashboard().is_editing.is_some();
        self.ctx.selected = match self.current_tab {
            Tab::Browse => match self.browse_section {
                BrowseSection::Collections => {
                    if self.focus == Focus::Sidebar {
                        self.selected_collection_id()
                            .map(Selected::Collection)
                            .unwrap_or(Selected::None)
                    } else {
                        match self.selected_browse_item() {
                            Some(item) if item.model == ItemModel::Dashboard => {
                                Selected::Dashboard(item.id)
                            }
                            Some(_) | None => Selected::None,
                        }
                    }
                }
                BrowseSection::Recents | BrowseSection::Bookmarks => Selected::None,
            },
            Tab::Dashboard => match self.dashboard_pane {
                DashboardPane::Filters => self
                    .selected_parameter_id()
                    .map(Selected::Parameter)
                    .unwrap_or(Selected::None),
                _ => self
                    .selected_dashcard()
                    .map(|dc| Selected::DashCard(dc.id))
                    .unwrap_or(Selected::None),
            },
            Tab::Admin => Selected::None,
        };
    }

    pub fn focus_label(&self) -> &'static str {
        match self.focus {
            Focus::Sidebar => "sidebar",
            Focus::List => "list",
            Focus::Details => "details",
            Focus::Command => "command",
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status.as_ref().map(|s| (s.text.as_str(), s.level))
    }

    // ---- store shorthands ----

    pub fn dispatch(&mut self, action: DashboardAction) {
        self.store
            .dispatch(crate::domain::store::Action::Dashboard(action));
    }

    pub fn dispatch_browse(&mut self, action: BrowseAction) {
        self.store
            .dispatch(crate::domain::store::Action::Browse(action));
    }

    pub fn current_dashboard_id(&self) -> Option<DashboardId> {
        self.store.dashboard().dashboard_id
    }

    pub fn current_dashboard(&self) -> Option<&Dashboard> {
        selectors::current_dashboard(self.store.dashboard())
    }

    pub fn ordered_dashcards(&self) -> Vec<&DashCard> {
        selectors::ordered_dashcards(self.store.dashboard())
    }

    pub fn selected_dashcard(&self) -> Option<&DashCard> {
        self.ordered_dashcards().get(self.selected_card).copied()
    }

    pub fn visible_parameters(&self) -> Vec<&Parameter> {
        self.current_dashboard()
            .map(|d| d.parameters.iter().collect())
            .unwrap_or_default()
    }

    pub fn selected_parameter_ref(&self) -> Option<&Parameter> {
        self.visible_parameters()
            .get(self.selected_parameter)
            .copied()
    }

    pub fn selected_parameter_id(&self) -> Option<ParameterId> {
        self.selected_parameter_ref().map(|p| p.id.clone())
    }

    pub fn selected_collection_id(&self) -> Option<CollectionId> {
        self.store
            .browse()
            .collections
            .get(self.selected_collection)
            .map(|c| c.id)
    }

    pub fn visible_browse_items(&self) -> &[CollectionItem] {
        self.store
            .browse()
            .items
            .get(&self.current_collection)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn selected_browse_item(&self) -> Option<&CollectionItem> {
        self.visible_browse_items().get(self.selected_item)
    }

    // ---- tick ----

    /// Periodic housekeeping driven by the main loop tick.
    pub fn on_tick(&mut self) {
        if let Some(chord) = &self.pending_chord {
            if chord.since.elapsed() > Duration::from_secs(1) {
                self.pending_chord = None;
            }
        }
        if let Some(status) = &self.status {
            if status.since.elapsed() > Duration::from_secs(3) {
                self.status = None;
            }
        }

        if self.data_mode == DataMode::Mock {
            self.pump_mock_loads();
        }

        self.check_slow_cards();

        if let Some(since) = self.indicator_since {
            if since.elapsed() > Duration::from_secs(3) {
                self.indicator_since = None;
                self.dispatch(DashboardAction::SetShowLoadCompleteIndicator { visible: false });
            }
        }

        self.clamp_all_selections();
        self.sync_context();
    }

    /// Flag cards that have been loading longer than the configured threshold.
    fn check_slow_cards(&mut self) {
        let state = self.store.dashboard();
        let Some(started) = state.load_progress.started_at else {
            return;
        };
        let elapsed_ms = (Utc::now() - started).num_milliseconds();
        if elapsed_ms < self.slow_card_ms as i64 {
            return;
        }
        let mut newly_slow = Vec::new();
        for dashcard_id in &state.load_progress.loading_ids {
            if let Some(dc) = state.dashcards.get(dashcard_id) {
                if !self.slow_flagged.contains(&dc.card.id) {
                    newly_slow.push(dc.card.id);
                }
            }
        }
        for card_id in newly_slow {
            self.slow_flagged.insert(card_id);
            self.dispatch(DashboardAction::MarkCardSlow {
                card_id,
                result: true,
            });
        }
    }

    /// Record a finished card fetch and raise the completion cue when the
    /// round has no cards left in flight.
    pub fn apply_card_loaded(
        &mut self,
        dashcard_id: DashCardId,
        card_id: CardId,
        dataset: CardDataset,
    ) {
        let was_complete = self.store.dashboard().load_progress.is_complete;
        self.dispatch(DashboardAction::CardDataLoaded {
            dashcard_id,
            card_id,
            dataset,
        });
        self.after_card_settled(was_complete);
    }

    pub fn apply_card_failed(&mut self, dashcard_id: DashCardId, card_id: CardId, error: String) {
        let was_complete = self.store.dashboard().load_progress.is_complete;
        self.dispatch(DashboardAction::CardDataFailed {
            dashcard_id,
            card_id,
            error,
        });
        self.after_card_settled(was_complete);
    }

    fn after_card_settled(&mut self, was_complete: bool) {
        let is_complete = self.store.dashboard().load_progress.is_complete;
        if is_complete && !was_complete {
            self.dispatch(DashboardAction::SetShowLoadCompleteIndicator { visible: true });
            self.indicator_since = Some(Instant::now());
            self.set_status("All cards loaded", StatusLevel::Info);
        }
    }

    // ---- refresh and navigation ----

    pub fn refresh(&mut self) {
        match self.data_mode {
            DataMode::Mock => {
                if self.current_tab == Tab::Dashboard {
                    if let Some(id) = self.current_dashboard_id() {
                        self.start_mock_card_round(id);
                        self.set_status("Re-running dashboard cards", StatusLevel::Info);
                        return;
                    }
                }
                self.set_status("Mock data refreshed", StatusLevel::Info);
            }
            DataMode::Api => match self.current_tab {
                Tab::Browse => {
                    self.pending_collections_request = true;
                    self.pending_items_request = Some(self.current_collection);
                    self.set_status("Refreshing collections", StatusLevel::Info);
                }
                Tab::Dashboard => {
                    if let Some(id) = self.current_dashboard_id() {
                        self.request_card_round(id);
                        self.set_status("Re-running dashboard cards", StatusLevel::Info);
                    } else {
                        self.set_status("No dashboard open", StatusLevel::Warn);
                    }
                }
                Tab::Admin => {
                    self.pending_permissions_request = true;
                    self.pending_domains_read = true;
                    self.set_status("Refreshing admin data", StatusLevel::Info);
                }
            },
        }
    }

    /// Open a dashboard: clear transient screen state, then fetch the
    /// record and its card data.
    pub fn open_dashboard(&mut self, id: DashboardId) {
        self.dispatch(DashboardAction::Initialize);
        self.current_tab = Tab::Dashboard;
        self.dashboard_pane = DashboardPane::Grid;
        self.selected_card = 0;
        self.selected_parameter = 0;
        self.slow_flagged.clear();
        match self.data_mode {
            DataMode::Mock => self.open_mock_dashboard(id),
            DataMode::Api => {
                self.pending_dashboard_request = Some(id);
                self.set_status(format!("Opening dashboard {id}"), StatusLevel::Info);
            }
        }
        self.sync_context();
    }

    /// Re-run every card on the open dashboard with the current
    /// parameter values.
    pub fn rerun_cards(&mut self) {
        let Some(id) = self.current_dashboard_id() else {
            return;
        };
        match self.data_mode {
            DataMode::Mock => self.start_mock_card_round(id),
            DataMode::Api => self.request_card_round(id),
        }
    }

    /// Queue a query round for every card on the dashboard.
    pub fn request_card_round(&mut self, dashboard_id: DashboardId) {
        let dashcard_ids: Vec<DashCardId> =
            self.ordered_dashcards().iter().map(|dc| dc.id).collect();
        if dashcard_ids.is_empty() {
            return;
        }
        self.slow_flagged.clear();
        self.dispatch(DashboardAction::CardDataRequested {
            dashcard_ids,
            started_at: Utc::now(),
        });
        self.pending_card_round = Some(dashboard_id);
    }

    pub fn record_recent_view(&mut self, model: ItemModel, id: u64, name: &str) {
        let model = match model {
            ItemModel::Dashboard => "dashboard",
            ItemModel::Card => "card",
            ItemModel::Other => return,
        };
        if let Some(store) = &self.recents_store {
            if let Err(err) = store.record_view(model, id, name, Utc::now().timestamp()) {
                self.set_status(format!("Recents not saved: {err:#}"), StatusLevel::Warn);
                return;
            }
            match store.load_recent(self.recents_limit) {
                Ok(items) => self.recent_items = items,
                Err(err) => {
                    self.set_status(format!("Recents not loaded: {err:#}"), StatusLevel::Warn)
                }
            }
        }
    }

    pub fn reload_bookmarks(&mut self) {
        if let Some(store) = &self.recents_store {
            match store.load_bookmarks() {
                Ok(items) => self.bookmarks = items,
                Err(err) => {
                    self.set_status(format!("Bookmarks not loaded: {err:#}"), StatusLevel::Warn)
                }
            }
        }
    }

    // ---- tab, section and selection movement ----

    pub fn set_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        self.focus = Focus::List;
        if tab == Tab::Admin && self.data_mode == DataMode::Api {
            if self.permissions.is_none() {
                self.pending_permissions_request = true;
            }
            if self.approved_domains.is_none() {
                self.pending_domains_read = true;
            }
        }
        self.sync_context();
    }

    pub fn cycle_tab(&mut self) {
        let idx = Tab::ALL
            .iter()
            .position(|t| *t == self.current_tab)
            .unwrap_or(0);
        self.set_tab(Tab::ALL[(idx + 1) % Tab::ALL.len()]);
    }

    pub fn cycle_section(&mut self) {
        match self.current_tab {
            Tab::Browse => {
                let idx = BrowseSection::ALL
                    .iter()
                    .position(|s| *s == self.browse_section)
                    .unwrap_or(0);
                self.browse_section = BrowseSection::ALL[(idx + 1) % BrowseSection::ALL.len()];
            }
            Tab::Dashboard => {
                self.dashboard_pane = self.dashboard_pane.next();
            }
            Tab::Admin => {
                let idx = AdminSection::ALL
                    .iter()
                    .position(|s| *s == self.admin_section)
                    .unwrap_or(0);
                self.admin_section = AdminSection::ALL[(idx + 1) % AdminSection::ALL.len()];
            }
        }
        self.sync_context();
    }

    pub fn move_selection(&mut self, delta: i64) {
        let (index, len) = self.selection_slot();
        let len = len as i64;
        if len == 0 {
            return;
        }
        let next = (index as i64 + delta).clamp(0, len - 1) as usize;
        self.set_selection(next);
        self.sync_context();
    }

    pub fn select_first(&mut self) {
        self.set_selection(0);
        self.sync_context();
    }

    pub fn select_last(&mut self) {
        let (_, len) = self.selection_slot();
        if len > 0 {
            self.set_selection(len - 1);
        }
        self.sync_context();
    }

    /// Absolute selection for mouse clicks. Out-of-range values are
    /// ignored rather than clamped.
    pub fn set_list_selection(&mut self, index: usize) {
        let (_, len) = self.selection_slot();
        if index < len {
            self.set_selection(index);
            self.sync_context();
        }
    }

    fn selection_slot(&self) -> (usize, usize) {
        match self.current_tab {
            Tab::Browse => match self.browse_section {
                BrowseSection::Collections => {
                    if self.focus == Focus::Sidebar {
                        (
                            self.selected_collection,
                            self.store.browse().collections.len(),
                        )
                    } else {
                        (self.selected_item, self.visible_browse_items().len())
                    }
                }
                BrowseSection::Recents => (self.selected_recent, self.recent_items.len()),
                BrowseSection::Bookmarks => (self.selected_bookmark, self.bookmarks.len()),
            },
            Tab::Dashboard => match self.dashboard_pane {
                DashboardPane::Filters => {
                    (self.selected_parameter, self.visible_parameters().len())
                }
                _ => (self.selected_card, self.ordered_dashcards().len()),
            },
            Tab::Admin => match self.admin_section {
                AdminSection::Permissions => (
                    self.selected_perm_row,
                    self.permissions.as_ref().map(|p| p.rows.len()).unwrap_or(0),
                ),
                AdminSection::Sharing => (0, 0),
            },
        }
    }

    fn set_selection(&mut self, value: usize) {
        match self.current_tab {
            Tab::Browse => match self.browse_section {
                BrowseSection::Collections => {
                    if self.focus == Focus::Sidebar {
                        self.selected_collection = value;
                    } else {
                        self.selected_item = value;
                    }
                }
                BrowseSection::Recents => self.selected_recent = value,
                BrowseSection::Bookmarks => self.selected_bookmark = value,
            },
            Tab::Dashboard => match self.dashboard_pane {
                DashboardPane::Filters => self.selected_parameter = value,
                _ => self.selected_card = value,
            },
            Tab::Admin => self.selected_perm_row = value,
        }
    }

    pub fn clamp_all_selections(&mut self) {
        fn clamp(index: &mut usize, len: usize) {
            if len == 0 {
                *index = 0;
            } else if *index >= len {
                *index = len - 1;
            }
        }
        let collections = self.store.browse().collections.len();
        let items = self.visible_browse_items().len();
        let cards = self.ordered_dashcards().len();
        let parameters = self.visible_parameters().len();
        let perm_rows = self.permissions.as_ref().map(|p| p.rows.len()).unwrap_or(0);
        clamp(&mut self.selected_collection, collections);
        clamp(&mut self.selected_item, items);
        clamp(&mut self.selected_recent, self.recent_items.len());
        clamp(&mut self.selected_bookmark, self.bookmarks.len());
        clamp(&mut self.selected_card, cards);
        clamp(&mut self.selected_parameter, parameters);
        clamp(&mut self.selected_perm_row, perm_rows);
    }

    // ---- chords ----

    pub fn set_chord(&mut self, key: char) {
        self.pending_chord = Some(PendingChord {
            key,
            since: Instant::now(),
        });
    }

    pub fn take_chord(&mut self) -> Option<char> {
        self.pending_chord.take().map(|c| c.key)
    }

    // ---- command bar and prompts ----

    pub fn enter_command(&mut self, seed: Option<String>) {
        self.input_mode = InputMode::Command;
        self.focus = Focus::Command;
        self.command.input = seed.unwrap_or_default();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.focus = Focus::List;
        self.command.input.clear();
    }

    pub fn enter_prompt(&mut self, kind: PromptKind, context: Option<String>, seed: &str) {
        self.input_mode = InputMode::Prompt(kind);
        self.focus = Focus::Command;
        self.prompt_context = context;
        self.command.input = seed.to_string();
    }

    pub fn exit_prompt(&mut self) {
        self.input_mode = InputMode::Normal;
        self.focus = Focus::List;
        self.prompt_context = None;
        self.command.input.clear();
    }

    /// Run whatever is in the command bar. Unknown input that looks like a
    /// `param=value` pair is treated as a filter expression.
    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        self.exit_command();
        if input.is_empty() {
            return;
        }
        self.command.last = Some(input.clone());
        match crate::core::parse_command(&input) {
            crate::core::Command::Unknown(raw) => {
                if raw.contains('=') {
                    modules::dashboard::filters::apply_expression(self, &raw);
                } else {
                    self.set_status(format!("Unknown command: {raw}"), StatusLevel::Warn);
                }
            }
            command => {
                let action = self.execute_command(&command);
                self.apply_action(action);
            }
        }
    }

    /// Commit the current prompt input.
    pub fn apply_prompt(&mut self, kind: PromptKind) {
        let input = self.command.input.trim().to_string();
        let context = self.prompt_context.clone();
        self.exit_prompt();
        match kind {
            PromptKind::Rename => {
                let action = modules::dashboard::editing::rename(self, &input);
                self.apply_action(action);
            }
            PromptKind::Describe => {
                let action = modules::dashboard::editing::describe(self, &input);
                self.apply_action(action);
            }
            PromptKind::FilterValue => {
                if let Some(parameter_id) = context {
                    let expression = format!("{parameter_id}={input}");
                    modules::dashboard::filters::apply_expression(self, &expression);
                }
            }
            PromptKind::Domains => {
                let action = modules::admin::sharing::save_domains(self, &input);
                self.apply_action(action);
            }
        }
    }

    /// Fire value typeahead while a filter prompt is being edited.
    pub fn on_prompt_input(&mut self, kind: PromptKind) {
        if kind != PromptKind::FilterValue {
            return;
        }
        let Some(parameter_id) = self.prompt_context.clone() else {
            return;
        };
        let query = self.command.input.trim().to_string();
        if query.len() < 2 {
            return;
        }
        if selectors::cached_parameter_search(self.store.dashboard(), &parameter_id, &query)
            .is_some()
        {
            return;
        }
        self.request_parameter_search(parameter_id, query);
    }

    pub fn request_parameter_search(&mut self, parameter_id: ParameterId, query: String) {
        let Some(dashboard_id) = self.current_dashboard_id() else {
            return;
        };
        match self.data_mode {
            DataMode::Mock => {
                let values = mock_parameter_values(&query);
                self.apply_parameter_values(parameter_id, query, values);
            }
            DataMode::Api => {
                self.pending_search_request = Some((dashboard_id, parameter_id, query));
            }
        }
    }

    // ---- command execution ----

    /// Map a parsed command onto app state changes and module calls.
    pub fn execute_command(&mut self, command: &crate::core::Command) -> crate::core::Action {
        match command {
            crate::core::Command::Collections => {
                crate::core::Action::Navigate(crate::core::NavigateTarget::Collections)
            }
            crate::core::Command::Recents => {
                crate::core::Action::Navigate(crate::core::NavigateTarget::Recents)
            }
            crate::core::Command::Open(id) => {
                crate::core::Action::Navigate(crate::core::NavigateTarget::Dashboard(*id))
            }
            crate::core::Command::Connect(url) => {
                self.pending_connect = Some(url.clone());
                crate::core::Action::Notify(
                    format!("Connecting to {url}"),
                    crate::core::NotifyLevel::Info,
                )
            }
            crate::core::Command::Refresh => {
                self.refresh();
                crate::core::Action::None
            }
            crate::core::Command::Filter(arg) => {
                modules::dashboard::filters::filter_command(self, arg.as_deref())
            }
            crate::core::Command::Unfilter(arg) => {
                modules::dashboard::filters::unfilter_command(self, arg.as_deref())
            }
            crate::core::Command::AddFilter => modules::dashboard::editing::open_add_filter(self),
            crate::core::Command::Edit => modules::dashboard::editing::enter(self),
            crate::core::Command::Save => modules::dashboard::editing::save(self),
            crate::core::Command::Cancel => modules::dashboard::editing::cancel(self),
            crate::core::Command::Rename(name) => modules::dashboard::editing::rename(self, name),
            crate::core::Command::Describe(text) => {
                modules::dashboard::editing::describe(self, text)
            }
            crate::core::Command::Share => modules::admin::sharing::share(self),
            crate::core::Command::Unshare => modules::admin::sharing::unshare(self),
            crate::core::Command::Embed(enable) => {
                modules::admin::sharing::set_embedding(self, *enable)
            }
            crate::core::Command::Domains(arg) => match arg {
                Some(domains) => modules::admin::sharing::save_domains(self, domains),
                None => modules::admin::sharing::edit_domains(self),
            },
            crate::core::Command::Permissions => {
                crate::core::Action::Navigate(crate::core::NavigateTarget::Permissions)
            }
            crate::core::Command::Export(format) => {
                modules::export::export_current_view(self, format.as_deref())
            }
            crate::core::Command::Bookmark => modules::browse::toggle_bookmark(self),
            crate::core::Command::Mock => {
                self.enter_mock_mode();
                crate::core::Action::Notify(
                    "Switched to sample data".to_string(),
                    crate::core::NotifyLevel::Info,
                )
            }
            crate::core::Command::Quit => crate::core::Action::Quit,
            crate::core::Command::Unknown(raw) => crate::core::Action::Notify(
                format!("Unknown command: {raw}"),
                crate::core::NotifyLevel::Warn,
            ),
        }
    }

    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(target) => self.navigate(target),
            Action::Copy(text) => {
                self.ctx.set_clipboard(text);
                self.set_status("Copied to clipboard", StatusLevel::Info);
            }
            Action::Notify(text, level) => {
                let level = match level {
                    NotifyLevel::Info => StatusLevel::Info,
                    NotifyLevel::Warn => StatusLevel::Warn,
                    NotifyLevel::Error => StatusLevel::Error,
                };
                self.set_status(text, level);
            }
            Action::OpenCommand(seed) => self.enter_command(seed),
            Action::CloseOverlay => self.close_overlay(),
            Action::Quit => self.should_quit = true,
        }
        self.sync_context();
    }

    fn navigate(&mut self, target: NavigateTarget) {
        match target {
            NavigateTarget::Back => {
                self.set_tab(Tab::Browse);
            }
            NavigateTarget::Collections => {
                self.set_tab(Tab::Browse);
                self.browse_section = BrowseSection::Collections;
            }
            NavigateTarget::Recents => {
                self.set_tab(Tab::Browse);
                self.browse_section = BrowseSection::Recents;
            }
            NavigateTarget::Collection(id) => {
                self.set_tab(Tab::Browse);
                self.browse_section = BrowseSection::Collections;
                self.enter_collection(id);
            }
            NavigateTarget::Dashboard(id) => self.open_dashboard(id),
            NavigateTarget::Permissions => {
                self.set_tab(Tab::Admin);
                self.admin_section = AdminSection::Permissions;
            }
            NavigateTarget::Sharing => {
                self.set_tab(Tab::Admin);
                self.admin_section = AdminSection::Sharing;
            }
        }
    }

    /// Switch the browse list to a collection's contents.
    pub fn enter_collection(&mut self, id: CollectionId) {
        self.current_collection = id;
        self.selected_item = 0;
        self.focus = Focus::List;
        if self.data_mode == DataMode::Api && !self.store.browse().items.contains_key(&id) {
            self.pending_items_request = Some(id);
        }
        self.sync_context();
    }

    /// Esc handling: close the topmost overlay first.
    pub fn close_overlay(&mut self) {
        if self.help_open {
            self.help_open = false;
            return;
        }
        let dashboard = self.store.dashboard();
        if dashboard.is_add_parameter_popover_open {
            self.dispatch(DashboardAction::HideAddParameterPopover);
            self.add_parameter_popover.reset();
            return;
        }
        if dashboard.sidebar.is_open() {
            self.dispatch(DashboardAction::CloseSidebar);
            return;
        }
        if self.current_tab == Tab::Dashboard {
            self.set_tab(Tab::Browse);
        }
    }

    /// Toggle the info sidebar for the open dashboard.
    pub fn toggle_info_sidebar(&mut self) {
        let open = self.store.dashboard().sidebar.name.as_deref() == Some(SIDEBAR_INFO);
        if open {
            self.dispatch(DashboardAction::CloseSidebar);
        } else {
            self.dispatch(DashboardAction::SetSidebar {
                name: SIDEBAR_INFO.to_string(),
                props: None,
            });
        }
    }

    /// Open the edit sidebar for the currently selected parameter.
    pub fn open_parameter_sidebar(&mut self) {
        let Some(parameter_id) = self.selected_parameter_id() else {
            self.set_status("No filter selected", StatusLevel::Warn);
            return;
        };
        let mut props = Map::new();
        props.insert("parameterId".to_string(), Value::String(parameter_id));
        self.dispatch(DashboardAction::SetSidebar {
            name: SIDEBAR_EDIT_PARAMETER.to_string(),
            props: Some(props),
        });
    }

    // ---- runtime event handlers ----

    pub fn apply_connected(&mut self, endpoint: String, status: String, user: Option<String>) {
        self.endpoint = endpoint;
        self.server_status = status;
        self.server_user = user;
        self.set_status(format!("Connected to {}", self.endpoint), StatusLevel::Info);
        self.pending_collections_request = true;
        self.pending_items_request = Some(ROOT_COLLECTION);
        self.sync_context();
    }

    pub fn apply_dashboard_ready(&mut self, dashboard: Dashboard, dashcards: Vec<DashCard>) {
        let id = dashboard.id;
        let name = dashboard.name.clone();
        self.dispatch(DashboardAction::DashboardLoaded {
            dashboard,
            dashcards,
        });
        self.record_recent_view(ItemModel::Dashboard, id, &name);
        self.request_card_round(id);
        self.sync_context();
    }

    pub fn apply_parameter_values(
        &mut self,
        parameter_id: ParameterId,
        query: String,
        values: Vec<Value>,
    ) {
        let cache_key = selectors::search_cache_key(&parameter_id, &query);
        self.dispatch(DashboardAction::ParameterSearchCached { cache_key, values });
    }

    pub fn apply_dashboard_saved(&mut self, dashboard: Dashboard, dashcards: Vec<DashCard>) {
        self.dispatch(DashboardAction::DashboardLoaded {
            dashboard,
            dashcards,
        });
        self.dispatch(DashboardAction::SetEditingDashboard { dashboard: None });
        self.editing_layout_backup = None;
        self.set_status("Dashboard saved", StatusLevel::Info);
        self.sync_context();
    }

    pub fn apply_public_link(&mut self, dashboard_id: DashboardId, uuid: String) {
        let mut attributes = Map::new();
        attributes.insert("public_uuid".to_string(), Value::String(uuid.clone()));
        self.dispatch(DashboardAction::SetDashboardAttributes {
            id: dashboard_id,
            attributes,
            is_dirty: Some(false),
        });
        self.ctx.set_clipboard(uuid.clone());
        self.set_status(format!("Public link ready: {uuid}"), StatusLevel::Info);
    }

    pub fn apply_public_link_revoked(&mut self, dashboard_id: DashboardId) {
        let mut attributes = Map::new();
        attributes.insert("public_uuid".to_string(), Value::Null);
        self.dispatch(DashboardAction::SetDashboardAttributes {
            id: dashboard_id,
            attributes,
            is_dirty: Some(false),
        });
        self.set_status("Public link revoked", StatusLevel::Info);
    }

    pub fn apply_embedding_updated(&mut self, dashboard_id: DashboardId, enabled: bool) {
        let mut attributes = Map::new();
        attributes.insert("enable_embedding".to_string(), Value::Bool(enabled));
        self.dispatch(DashboardAction::SetDashboardAttributes {
            id: dashboard_id,
            attributes,
            is_dirty: Some(false),
        });
        let text = if enabled {
            "Embedding enabled"
        } else {
            "Embedding disabled"
        };
        self.set_status(text, StatusLevel::Info);
    }

    pub fn apply_permissions(&mut self, view: PermissionsView) {
        self.permissions = Some(view);
        self.selected_perm_row = 0;
    }

    pub fn apply_domains_ready(&mut self, domains: Option<String>) {
        self.approved_domains = domains;
    }

    pub fn apply_domains_saved(&mut self) {
        self.set_status("Approved domains saved", StatusLevel::Info);
        self.pending_domains_read = true;
    }

    pub fn apply_server_error(&mut self, message: String) {
        self.set_status(message, StatusLevel::Error);
    }

    // ---- request drains, consumed by the main loop ----

    pub fn take_collections_request(&mut self) -> bool {
        std::mem::take(&mut self.pending_collections_request)
    }

    pub fn take_items_request(&mut self) -> Option<CollectionId> {
        self.pending_items_request.take()
    }

    pub fn take_dashboard_request(&mut self) -> Option<DashboardId> {
        self.pending_dashboard_request.take()
    }

    /// Drain a queued card round into per-card fetch requests.
    pub fn take_card_round(&mut self) -> Option<(DashboardId, Vec<(DashCardId, CardId)>)> {
        let dashboard_id = self.pending_card_round.take()?;
        let cards: Vec<(DashCardId, CardId)> = self
            .ordered_dashcards()
            .iter()
            .map(|dc| (dc.id, dc.card.id))
            .collect();
        if cards.is_empty() {
            return None;
        }
        Some((dashboard_id, cards))
    }

    pub fn take_search_request(&mut self) -> Option<(DashboardId, ParameterId, String)> {
        self.pending_search_request.take()
    }

    pub fn take_save_request(&mut self) -> Option<(DashboardId, Map<String, Value>)> {
        self.pending_save_request.take()
    }

    pub fn take_share_request(&mut self) -> Option<(DashboardId, bool)> {
        self.pending_share_request.take()
    }

    pub fn take_embed_request(&mut self) -> Option<(DashboardId, bool)> {
        self.pending_embed_request.take()
    }

    pub fn take_permissions_request(&mut self) -> bool {
        std::mem::take(&mut self.pending_permissions_request)
    }

    pub fn take_domains_read(&mut self) -> bool {
        std::mem::take(&mut self.pending_domains_read)
    }

    pub fn take_domains_write(&mut self) -> Option<String> {
        self.pending_domains_write.take()
    }

    pub fn take_connect_request(&mut self) -> Option<String> {
        self.pending_connect.take()
    }

    // ---- mock data engine ----

    /// `:mock` drops the server connection state and reseeds the store
    /// with the offline fixture.
    pub fn enter_mock_mode(&mut self) {
        self.data_mode = DataMode::Mock;
        self.store = Store::new();
        self.mock_queue.clear();
        self.slow_flagged.clear();
        self.pending_collections_request = false;
        self.pending_items_request = None;
        self.pending_dashboard_request = None;
        self.pending_card_round = None;
        self.pending_search_request = None;
        self.pending_save_request = None;
        self.pending_share_request = None;
        self.pending_embed_request = None;
        self.pending_permissions_request = false;
        self.pending_domains_read = false;
        self.pending_domains_write = None;
        self.endpoint = "mock".to_string();
        self.server_status = "seeded".to_string();
        self.server_user = None;
        self.current_collection = ROOT_COLLECTION;
        self.editing_layout_backup = None;
        self.seed_mock();
        self.clamp_all_selections();
        self.sync_context();
    }

    /// Seed the store with a small fixture so the UI is usable offline.
    pub fn seed_mock(&mut self) {
        self.dispatch_browse(BrowseAction::CollectionsLoaded {
            collections: vec![
                mock_collection(1, "Analytics", "Company-wide KPIs"),
                mock_collection(2, "Marketing", "Campaign reporting"),
                mock_collection(3, "Finance", "Revenue and billing"),
            ],
        });
        self.dispatch_browse(BrowseAction::CollectionItemsLoaded {
            collection_id: ROOT_COLLECTION,
            items: vec![
                mock_item(101, ItemModel::Dashboard, "Revenue Overview"),
                mock_item(102, ItemModel::Dashboard, "Web Traffic"),
                mock_item(201, ItemModel::Card, "Conversion funnel"),
            ],
        });
        self.dispatch_browse(BrowseAction::CollectionItemsLoaded {
            collection_id: 1,
            items: vec![
                mock_item(101, ItemModel::Dashboard, "Revenue Overview"),
                mock_item(202, ItemModel::Card, "Weekly active users"),
            ],
        });
        self.dispatch_browse(BrowseAction::CollectionItemsLoaded {
            collection_id: 2,
            items: vec![mock_item(102, ItemModel::Dashboard, "Web Traffic")],
        });
        self.dispatch_browse(BrowseAction::CollectionItemsLoaded {
            collection_id: 3,
            items: vec![mock_item(203, ItemModel::Card, "Invoices by status")],
        });

        self.permissions = Some(PermissionsView {
            revision: 7,
            databases: vec!["Sample Database".to_string(), "Warehouse".to_string()],
            rows: vec![
                PermissionsRowView {
                    group: "All Users".to_string(),
                    levels: vec!["granular".to_string(), "none".to_string()],
                },
                PermissionsRowView {
                    group: "Administrators".to_string(),
                    levels: vec!["native".to_string(), "native".to_string()],
                },
                PermissionsRowView {
                    group: "Analysts".to_string(),
                    levels: vec!["unrestricted".to_string(), "granular".to_string()],
                },
            ],
        });
        self.approved_domains = Some("https://reports.example.com".to_string());
    }

    fn open_mock_dashboard(&mut self, id: DashboardId) {
        let Some((dashboard, dashcards)) = mock_dashboard(id) else {
            self.set_status(format!("No mock dashboard {id}"), StatusLevel::Warn);
            return;
        };
        let name = dashboard.name.clone();
        self.dispatch(DashboardAction::DashboardLoaded {
            dashboard,
            dashcards,
        });
        self.record_recent_view(ItemModel::Dashboard, id, &name);
        self.start_mock_card_round(id);
    }

    /// Stage mock card results on the tick queue. One card is delayed past
    /// the slow threshold and one fails, so every load state is reachable.
    fn start_mock_card_round(&mut self, _dashboard_id: DashboardId) {
        let cards: Vec<(DashCardId, CardId)> = self
            .ordered_dashcards()
            .iter()
            .map(|dc| (dc.id, dc.card.id))
            .collect();
        if cards.is_empty() {
            return;
        }
        self.slow_flagged.clear();
        self.dispatch(DashboardAction::CardDataRequested {
            dashcard_ids: cards.iter().map(|(dc, _)| *dc).collect(),
            started_at: Utc::now(),
        });
        let slow_ticks = (self.slow_card_ms / 200 + 5) as u32;
        self.mock_queue = cards
            .iter()
            .enumerate()
            .map(|(i, (dashcard_id, card_id))| MockLoad {
                dashcard_id: *dashcard_id,
                card_id: *card_id,
                ticks: if i + 1 == cards.len() && cards.len() > 2 {
                    slow_ticks
                } else {
                    (i as u32 + 1) * 2
                },
                fail: i == 2,
            })
            .collect();
    }

    fn pump_mock_loads(&mut self) {
        if self.mock_queue.is_empty() {
            return;
        }
        for load in &mut self.mock_queue {
            load.ticks = load.ticks.saturating_sub(1);
        }
        let (ready, rest): (Vec<MockLoad>, Vec<MockLoad>) = self
            .mock_queue
            .drain(..)
            .partition(|load| load.ticks == 0);
        self.mock_queue = rest;
        for load in ready {
            if load.fail {
                self.apply_card_failed(
                    load.dashcard_id,
                    load.card_id,
                    "Query timed out after 30s".to_string(),
                );
            } else {
                let dataset = mock_dataset_for(load.card_id);
                self.apply_card_loaded(load.dashcard_id, load.card_id, dataset);
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ---- mock fixtures ----

fn mock_collection(id: CollectionId, name: &str, description: &str) -> Collection {
    Collection {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        archived: false,
    }
}

fn mock_item(id: u64, model: ItemModel, name: &str) -> CollectionItem {
    CollectionItem {
        id,
        model,
        name: name.to_string(),
        description: None,
    }
}

fn mock_parameter(id: &str, slug: &str, name: &str, kind: &str) -> Parameter {
    Parameter {
        id: id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        kind: kind.to_string(),
        default: None,
    }
}

fn mock_card(id: CardId, name: &str, display: CardDisplay) -> Card {
    Card {
        id,
        name: name.to_string(),
        display,
        description: None,
    }
}

fn mock_dashcard(
    id: DashCardId,
    dashboard_id: DashboardId,
    card: Card,
    row: u32,
    col: u32,
    size_x: u32,
    size_y: u32,
) -> DashCard {
    DashCard {
        id,
        dashboard_id,
        card,
        row,
        col,
        size_x,
        size_y,
        is_dirty: false,
        extra: Map::new(),
    }
}

/// Fixture dashboards keyed by the ids seeded into the browse list.
fn mock_dashboard(id: DashboardId) -> Option<(Dashboard, Vec<DashCard>)> {
    match id {
        101 => {
            let dashcards = vec![
                mock_dashcard(1101, id, mock_card(1001, "MRR", CardDisplay::Scalar), 0, 0, 6, 4),
                mock_dashcard(
                    1102,
                    id,
                    mock_card(1002, "Revenue by month", CardDisplay::Line),
                    0,
                    6,
                    12,
                    4,
                ),
                mock_dashcard(
                    1103,
                    id,
                    mock_card(1003, "Top customers", CardDisplay::Table),
                    4,
                    0,
                    9,
                    6,
                ),
                mock_dashcard(
                    1104,
                    id,
                    mock_card(1004, "Signups by plan", CardDisplay::Bar),
                    4,
                    9,
                    9,
                    6,
                ),
            ];
            let dashboard = Dashboard {
                id,
                name: "Revenue Overview".to_string(),
                description: Some("Monthly revenue health for the exec review".to_string()),
                archived: false,
                can_write: true,
                enable_embedding: false,
                public_uuid: None,
                collection_id: Some(1),
                creator_id: Some(1),
                parameters: vec![
                    mock_parameter("p_date", "date", "Date range", "date/all-options"),
                    mock_parameter("p_state", "state", "State", "string/="),
                ],
                dashcard_ids: dashcards.iter().map(|dc| dc.id).collect(),
                created_at: Some("2025-11-04T09:12:00Z".to_string()),
                updated_at: Some("2026-07-30T16:41:00Z".to_string()),
                is_dirty: false,
                extra: Map::new(),
            };
            Some((dashboard, dashcards))
        }
        102 => {
            let dashcards = vec![
                mock_dashcard(
                    1201,
                    id,
                    mock_card(1011, "Sessions", CardDisplay::Scalar),
                    0,
                    0,
                    6,
                    4,
                ),
                mock_dashcard(
                    1202,
                    id,
                    mock_card(1012, "Pageviews by day", CardDisplay::Line),
                    0,
                    6,
                    12,
                    4,
                ),
            ];
            let dashboard = Dashboard {
                id,
                name: "Web Traffic".to_string(),
                description: None,
                archived: false,
                can_write: true,
                enable_embedding: true,
                public_uuid: Some("3fa85f64-5717-4562-b3fc-2c963f66afa6".to_string()),
                collection_id: Some(2),
                creator_id: Some(1),
                parameters: vec![mock_parameter("p_source", "source", "Source", "string/=")],
                dashcard_ids: dashcards.iter().map(|dc| dc.id).collect(),
                created_at: Some("2026-01-12T11:03:00Z".to_string()),
                updated_at: Some("2026-08-02T08:19:00Z".to_string()),
                is_dirty: false,
                extra: Map::new(),
            };
            Some((dashboard, dashcards))
        }
        _ => None,
    }
}

fn mock_dataset_for(card_id: CardId) -> CardDataset {
    match card_id {
        1001 => mock_scalar_dataset("MRR", json!(48250.0)),
        1002 => mock_series_dataset(
            "Month",
            "Revenue",
            &[
                ("2026-02", 39100.0),
                ("2026-03", 40800.0),
                ("2026-04", 42950.0),
                ("2026-05", 44300.0),
                ("2026-06", 46120.0),
                ("2026-07", 48250.0),
            ],
        ),
        1003 => mock_table_dataset(),
        1004 => mock_series_dataset(
            "Plan",
            "Signups",
            &[
                ("Free", 412.0),
                ("Starter", 168.0),
                ("Team", 57.0),
                ("Enterprise", 9.0),
            ],
        ),
        1011 => mock_scalar_dataset("Sessions", json!(182_340)),
        1012 => mock_series_dataset(
            "Day",
            "Pageviews",
            &[
                ("Mon", 24100.0),
                ("Tue", 26800.0),
                ("Wed", 25900.0),
                ("Thu", 27400.0),
                ("Fri", 22300.0),
                ("Sat", 14800.0),
                ("Sun", 13900.0),
            ],
        ),
        _ => mock_scalar_dataset("Value", json!(0)),
    }
}

fn mock_scalar_dataset(label: &str, value: Value) -> CardDataset {
    CardDataset {
        columns: vec![label.to_string()],
        rows: vec![vec![value]],
        error: None,
    }
}

fn mock_series_dataset(x: &str, y: &str, points: &[(&str, f64)]) -> CardDataset {
    CardDataset {
        columns: vec![x.to_string(), y.to_string()],
        rows: points
            .iter()
            .map(|(label, value)| vec![json!(label), json!(value)])
            .collect(),
        error: None,
    }
}

fn mock_table_dataset() -> CardDataset {
    CardDataset {
        columns: vec![
            "Customer".to_string(),
            "Plan".to_string(),
            "MRR".to_string(),
        ],
        rows: vec![
            vec![json!("Acme Corp"), json!("Enterprise"), json!(4200.0)],
            vec![json!("Globex"), json!("Team"), json!(1850.0)],
            vec![json!("Initech"), json!("Team"), json!(1540.0)],
            vec![json!("Umbrella"), json!("Starter"), json!(740.0)],
            vec![json!("Stark Industries"), json!("Enterprise"), json!(5100.0)],
        ],
        error: None,
    }
}

fn mock_parameter_values(query: &str) -> Vec<Value> {
    let states = [
        "California",
        "Colorado",
        "New York",
        "Texas",
        "Washington",
    ];
    states
        .iter()
        .filter(|state| state.to_lowercase().contains(&query.to_lowercase()))
        .map(|state| json!(state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard_app() -> App {
        let mut app = App::new();
        app.open_dashboard(101);
        app
    }

    #[test]
    fn test_open_dashboard_loads_mock_fixture() {
        let app = dashboard_app();
        assert_eq!(app.current_tab, Tab::Dashboard);
        assert_eq!(app.current_dashboard_id(), Some(101));
        assert_eq!(app.ordered_dashcards().len(), 4);
        assert!(!app.store.dashboard().load_progress.loading_ids.is_empty());
    }

    #[test]
    fn test_mock_round_completes_and_raises_indicator() {
        let mut app = dashboard_app();
        for _ in 0..200 {
            app.on_tick();
        }
        let state = app.store.dashboard();
        assert!(state.load_progress.is_complete);
        assert!(state.has_seen_loaded_dashboard);
        assert!(state.show_load_complete_indicator);
        let datasets: Vec<&CardDataset> = state
            .dashcard_data
            .values()
            .flat_map(|per_card| per_card.values())
            .collect();
        assert_eq!(datasets.len(), 4);
        assert_eq!(datasets.iter().filter(|d| d.error.is_some()).count(), 1);
    }

    #[test]
    fn test_slow_card_is_flagged_before_it_loads() {
        let mut app = dashboard_app();
        for _ in 0..3 {
            app.on_tick();
        }
        app.slow_card_ms = 0;
        app.on_tick();
        assert!(!app.store.dashboard().slow_cards.is_empty());
    }

    #[test]
    fn test_selection_moves_and_clamps() {
        let mut app = dashboard_app();
        app.move_selection(1);
        assert_eq!(app.selected_card, 1);
        app.move_selection(100);
        assert_eq!(app.selected_card, 3);
        app.move_selection(-100);
        assert_eq!(app.selected_card, 0);
    }

    #[test]
    fn test_command_bar_filter_expression_sets_value() {
        let mut app = dashboard_app();
        app.enter_command(None);
        app.command.input = "state=California".to_string();
        app.apply_command();
        let values = &app.store.dashboard().parameter_values;
        assert_eq!(values.get("p_state"), Some(&json!("California")));
    }

    #[test]
    fn test_unknown_command_reports_status() {
        let mut app = App::new();
        app.enter_command(None);
        app.command.input = "frobnicate".to_string();
        app.apply_command();
        let (text, level) = app.status_text().unwrap();
        assert!(text.contains("frobnicate"));
        assert_eq!(level, StatusLevel::Warn);
    }

    #[test]
    fn test_escape_closes_sidebar_before_leaving_tab() {
        let mut app = dashboard_app();
        app.toggle_info_sidebar();
        assert_eq!(
            app.store.dashboard().sidebar.name.as_deref(),
            Some(SIDEBAR_INFO)
        );
        app.close_overlay();
        assert!(!app.store.dashboard().sidebar.is_open());
        assert_eq!(app.current_tab, Tab::Dashboard);
        app.close_overlay();
        assert_eq!(app.current_tab, Tab::Browse);
    }

    #[test]
    fn test_mock_command_drops_server_state_and_reseeds() {
        let mut app = dashboard_app();
        app.data_mode = DataMode::Api;
        app.endpoint = "http://bi.example.com".to_string();
        app.pending_card_round = Some(101);

        app.enter_mock_mode();
        assert_eq!(app.data_mode, DataMode::Mock);
        assert_eq!(app.endpoint, "mock");
        assert!(app.pending_card_round.is_none());
        assert!(app.store.browse().collections_loaded);
        assert!(app.permissions.is_some());
    }

    #[test]
    fn test_tick_expires_status_and_chord() {
        let mut app = App::new();
        app.set_status("hello", StatusLevel::Info);
        app.status.as_mut().unwrap().since = Instant::now() - Duration::from_secs(4);
        app.set_chord('g');
        app.pending_chord.as_mut().unwrap().since = Instant::now() - Duration::from_secs(2);
        app.on_tick();
        assert!(app.status.is_none());
        assert!(app.pending_chord.is_none());
    }
}

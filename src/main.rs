mod app;
mod config;
mod core;
mod domain;
mod infrastructure;
mod modules;
mod store;
mod ui;

use std::fs;
use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use serde_json::Value;

use crate::app::{
    App, BrowseSection, DashboardPane, DataMode, Focus, InputMode, PermissionsRowView,
    PermissionsView, PromptKind, StatusLevel, Tab, ROOT_COLLECTION,
};
use crate::core::Module;
use crate::domain::browse::BrowseAction;
use crate::domain::dashboard::selectors;
use crate::domain::store::Store;
use crate::infrastructure::api;
use crate::infrastructure::runtime::{CardRequest, RuntimeBridge, RuntimeCommand, RuntimeEvent};
use crate::store::RecentsStore;

#[derive(Debug, Parser)]
#[command(
    name = "glint",
    version,
    about = "Glint: a terminal client for dashboard analytics servers"
)]
struct Args {
    /// Server base URL (e.g. http://localhost:3000)
    #[arg(long)]
    url: Option<String>,

    /// API key sent as the X-API-KEY header
    #[arg(long)]
    api_key: Option<String>,

    /// Dashboard to open on startup
    #[arg(long)]
    dashboard: Option<u64>,

    /// Run against the built-in sample data, no server needed
    #[arg(long)]
    mock: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load();

    let url = args.url.or_else(|| config.server.url.clone());
    let api_key = args.api_key.or_else(|| config.server.api_key.clone());
    let mock_mode = args.mock || url.is_none();
    let url = url.unwrap_or_else(|| "http://localhost:3000".to_string());

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    app.slow_card_ms = config.slow_card_ms;
    app.recents_limit = config.recents_limit;

    // Recents and bookmarks live in a local SQLite file. The app still
    // works when the file cannot be opened.
    if let Some(db_path) = config::recents_db_path() {
        if let Some(parent) = db_path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match RecentsStore::open(&db_path) {
            Ok(store) => {
                match store.load_recent(config.recents_limit) {
                    Ok(items) => app.recent_items = items,
                    Err(err) => {
                        app.set_status(format!("Recents not loaded: {err:#}"), StatusLevel::Warn)
                    }
                }
                match store.load_bookmarks() {
                    Ok(items) => app.bookmarks = items,
                    Err(err) => {
                        app.set_status(format!("Bookmarks not loaded: {err:#}"), StatusLevel::Warn)
                    }
                }
                app.recents_store = Some(store);
            }
            Err(err) => {
                app.set_status(format!("Recents DB disabled: {err:#}"), StatusLevel::Warn);
            }
        }
    }

    let runtime = if mock_mode {
        app.data_mode = DataMode::Mock;
        None
    } else {
        // Drop the seeded sample data; everything comes from the server.
        app.data_mode = DataMode::Api;
        app.store = Store::new();
        app.endpoint = url.clone();
        app.server_status = "connecting".to_string();
        app.set_status("Connecting…", StatusLevel::Info);
        Some(RuntimeBridge::new(url, api_key.clone())?)
    };

    if let Some(id) = args.dashboard {
        app.open_dashboard(id);
    }

    let res = run_app(&mut terminal, app, runtime, api_key);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut runtime: Option<RuntimeBridge>,
    api_key: Option<String>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &mut runtime, &api_key);
        app.sync_context();
        terminal.draw(|f| ui::draw(f, &mut app))?;
        if app.should_quit {
            if let Some(runtime) = &runtime {
                let _ = runtime.send(RuntimeCommand::Shutdown);
            }
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut app, key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        pump_background(&mut app, &mut runtime, &api_key);
    }
}

/// Apply worker events to the app and flush queued requests back to the
/// worker. Runs before and after input handling on every frame.
fn pump_background(app: &mut App, runtime: &mut Option<RuntimeBridge>, api_key: &Option<String>) {
    // :connect swaps the bridge for one pointed at the new server
    if let Some(url) = app.take_connect_request() {
        match RuntimeBridge::new(url.clone(), api_key.clone()) {
            Ok(bridge) => {
                if let Some(old) = runtime.take() {
                    let _ = old.send(RuntimeCommand::Shutdown);
                }
                *runtime = Some(bridge);
                app.data_mode = DataMode::Api;
                app.store = Store::new();
                app.permissions = None;
                app.approved_domains = None;
                app.endpoint = url;
                app.server_status = "connecting".to_string();
            }
            Err(err) => {
                app.set_status(format!("Connect failed: {err:#}"), StatusLevel::Error);
            }
        }
    }

    let Some(runtime) = runtime.as_ref() else {
        return;
    };
    // Late events from a previous server are dropped once the app has
    // moved back to mock data
    if app.data_mode != DataMode::Api {
        return;
    }

    for event in runtime.poll_events() {
        match event {
            RuntimeEvent::Connected {
                endpoint,
                status,
                user,
            } => app.apply_connected(endpoint, status, user),
            RuntimeEvent::CollectionsReady { collections } => {
                app.dispatch_browse(BrowseAction::CollectionsLoaded { collections });
            }
            RuntimeEvent::CollectionItemsReady {
                collection_id,
                items,
            } => {
                app.dispatch_browse(BrowseAction::CollectionItemsLoaded {
                    collection_id: collection_id.unwrap_or(ROOT_COLLECTION),
                    items,
                });
            }
            RuntimeEvent::DashboardReady {
                dashboard,
                dashcards,
            } => app.apply_dashboard_ready(dashboard, dashcards),
            RuntimeEvent::CardDataReady {
                dashcard_id,
                card_id,
                dataset,
            } => app.apply_card_loaded(dashcard_id, card_id, dataset),
            RuntimeEvent::CardDataFailed {
                dashcard_id,
                card_id,
                error,
            } => app.apply_card_failed(dashcard_id, card_id, error),
            RuntimeEvent::ParameterValuesReady {
                parameter_id,
                query,
                values,
            } => app.apply_parameter_values(parameter_id, query, values),
            RuntimeEvent::DashboardSaved {
                dashboard,
                dashcards,
            } => app.apply_dashboard_saved(dashboard, dashcards),
            RuntimeEvent::PublicLinkReady { dashboard_id, uuid } => {
                app.apply_public_link(dashboard_id, uuid)
            }
            RuntimeEvent::PublicLinkRevoked { dashboard_id } => {
                app.apply_public_link_revoked(dashboard_id)
            }
            RuntimeEvent::EmbeddingUpdated { enabled } => {
                if let Some(id) = app.current_dashboard_id() {
                    app.apply_embedding_updated(id, enabled);
                }
            }
            RuntimeEvent::PermissionsReady { matrix } => {
                let view = PermissionsView {
                    revision: matrix.revision,
                    databases: matrix.databases,
                    rows: matrix
                        .rows
                        .into_iter()
                        .map(|row| PermissionsRowView {
                            group: row.group,
                            levels: row.levels,
                        })
                        .collect(),
                };
                app.apply_permissions(view);
            }
            RuntimeEvent::ApprovedDomainsReady { domains } => app.apply_domains_ready(domains),
            RuntimeEvent::ApprovedDomainsSaved => app.apply_domains_saved(),
            RuntimeEvent::Error { message } => app.apply_server_error(message),
        }
    }

    if app.take_collections_request() {
        let _ = runtime.send(RuntimeCommand::FetchCollections);
    }
    if let Some(collection_id) = app.take_items_request() {
        // Root is a client-side alias; the server wants no id for it
        let _ = runtime.send(RuntimeCommand::FetchCollectionItems {
            collection_id: Some(collection_id).filter(|id| *id != ROOT_COLLECTION),
        });
    }
    if let Some(dashboard_id) = app.take_dashboard_request() {
        let _ = runtime.send(RuntimeCommand::FetchDashboard { dashboard_id });
    }
    if let Some((dashboard_id, cards)) = app.take_card_round() {
        let parameters = parameter_payload(app);
        let cards = cards
            .into_iter()
            .map(|(dashcard_id, card_id)| CardRequest {
                dashcard_id,
                card_id,
            })
            .collect();
        let _ = runtime.send(RuntimeCommand::FetchCardData {
            dashboard_id,
            cards,
            parameters,
        });
    }
    if let Some((dashboard_id, parameter_id, query)) = app.take_search_request() {
        let _ = runtime.send(RuntimeCommand::SearchParameterValues {
            dashboard_id,
            parameter_id,
            query,
        });
    }
    if let Some((dashboard_id, attributes)) = app.take_save_request() {
        let _ = runtime.send(RuntimeCommand::SaveDashboard {
            dashboard_id,
            attributes,
        });
    }
    if let Some((dashboard_id, create)) = app.take_share_request() {
        let command = if create {
            RuntimeCommand::CreatePublicLink { dashboard_id }
        } else {
            RuntimeCommand::DeletePublicLink { dashboard_id }
        };
        let _ = runtime.send(command);
    }
    if let Some((dashboard_id, enabled)) = app.take_embed_request() {
        let _ = runtime.send(RuntimeCommand::SetEmbedding {
            dashboard_id,
            enabled,
        });
    }
    if app.take_permissions_request() {
        let _ = runtime.send(RuntimeCommand::FetchPermissions);
    }
    if app.take_domains_read() {
        let _ = runtime.send(RuntimeCommand::ReadApprovedDomains);
    }
    if let Some(domains) = app.take_domains_write() {
        let _ = runtime.send(RuntimeCommand::WriteApprovedDomains { domains });
    }
}

/// Applied filter values in the wire shape card queries expect.
fn parameter_payload(app: &App) -> Vec<Value> {
    let state = app.store.dashboard();
    let parameters = selectors::current_dashboard(state)
        .map(|dashboard| dashboard.parameters.as_slice())
        .unwrap_or_default();
    api::parameter_payload(parameters, &state.parameter_values)
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.help_open {
        if matches!(
            key.code,
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')
        ) {
            app.help_open = false;
        }
        return;
    }

    // The add-filter popover swallows keys while it is open
    if app.store.dashboard().is_add_parameter_popover_open && app.input_mode == InputMode::Normal {
        let action = app.add_parameter_popover.handle_key(key, &mut app.ctx);
        app.apply_action(action);
        if let Some((kind, label)) = app.add_parameter_popover.take_choice() {
            let action = modules::dashboard::editing::add_parameter(app, kind, label);
            app.apply_action(action);
            app.add_parameter_popover.reset();
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
        InputMode::Prompt(kind) => handle_prompt_mode(app, key, kind),
    }
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Char(c) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                app.command.input.push(c);
            }
        }
        _ => {}
    }
}

fn handle_prompt_mode(app: &mut App, key: KeyEvent, kind: PromptKind) {
    match key.code {
        KeyCode::Esc => app.exit_prompt(),
        KeyCode::Enter => app.apply_prompt(kind),
        KeyCode::Backspace => {
            app.command.input.pop();
            app.on_prompt_input(kind);
        }
        KeyCode::Char(c) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                app.command.input.push(c);
                app.on_prompt_input(kind);
            }
        }
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('d') => app.move_selection(page_amount()),
            KeyCode::Char('u') => app.move_selection(-page_amount()),
            KeyCode::Char('c') => app.should_quit = true,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.help_open = true,
        KeyCode::Char(':') => app.enter_command(None),
        KeyCode::Char('1') => app.set_tab(Tab::Browse),
        KeyCode::Char('2') => app.set_tab(Tab::Dashboard),
        KeyCode::Char('3') => app.set_tab(Tab::Admin),
        KeyCode::Tab => app.cycle_section(),
        KeyCode::BackTab => app.cycle_tab(),
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Char('h') | KeyCode::Left => focus_left(app),
        KeyCode::Char('l') | KeyCode::Right => focus_right(app),
        KeyCode::Char('g') => {
            if app.take_chord() == Some('g') {
                app.select_first();
            } else {
                app.set_chord('g');
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::PageDown => app.move_selection(page_amount()),
        KeyCode::PageUp => app.move_selection(-page_amount()),
        KeyCode::Enter => handle_enter(app),
        KeyCode::Esc => {
            if app.current_tab == Tab::Browse && app.current_collection != ROOT_COLLECTION {
                app.enter_collection(ROOT_COLLECTION);
            } else {
                app.close_overlay();
            }
        }
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('b') => {
            let action = modules::browse::toggle_bookmark(app);
            app.apply_action(action);
        }
        KeyCode::Char('x') => {
            let action = modules::export::export_current_view(app, None);
            app.apply_action(action);
        }
        KeyCode::Char('y') => handle_copy_to_clipboard(app),
        KeyCode::Char('f') if app.current_tab == Tab::Dashboard => {
            if app.dashboard_pane == DashboardPane::Filters {
                match app.selected_parameter_ref() {
                    Some(parameter) => {
                        let parameter_id = parameter.id.clone();
                        app.enter_prompt(PromptKind::FilterValue, Some(parameter_id), "");
                    }
                    None => app.set_status("No filters on this dashboard", StatusLevel::Warn),
                }
            } else {
                let action = modules::dashboard::filters::filter_command(app, None);
                app.apply_action(action);
            }
        }
        KeyCode::Char('u') if app.current_tab == Tab::Dashboard => {
            let action = modules::dashboard::filters::unfilter_command(app, None);
            app.apply_action(action);
        }
        KeyCode::Char('a') if app.current_tab == Tab::Dashboard => {
            let action = modules::dashboard::editing::open_add_filter(app);
            app.apply_action(action);
        }
        KeyCode::Char('e') if app.current_tab == Tab::Dashboard => {
            let action = modules::dashboard::editing::enter(app);
            app.apply_action(action);
        }
        KeyCode::Char('i') if app.current_tab == Tab::Dashboard => app.toggle_info_sidebar(),
        KeyCode::Char('s') if app.current_tab == Tab::Dashboard => {
            let action = modules::admin::sharing::open_sidebar(app);
            app.apply_action(action);
        }
        KeyCode::Char('H') if app.current_tab == Tab::Dashboard => nudge(app, -1, 0),
        KeyCode::Char('L') if app.current_tab == Tab::Dashboard => nudge(app, 1, 0),
        KeyCode::Char('K') if app.current_tab == Tab::Dashboard => nudge(app, 0, -1),
        KeyCode::Char('J') if app.current_tab == Tab::Dashboard => nudge(app, 0, 1),
        KeyCode::Char('R') if app.current_tab == Tab::Dashboard => {
            if app.store.dashboard().is_editing.is_some() {
                let seed = app
                    .current_dashboard()
                    .map(|d| d.name.clone())
                    .unwrap_or_default();
                app.enter_prompt(PromptKind::Rename, None, &seed);
            } else {
                app.set_status("Enter edit mode first (:edit)", StatusLevel::Warn);
            }
        }
        KeyCode::Char('D') if app.current_tab == Tab::Dashboard => {
            if app.store.dashboard().is_editing.is_some() {
                let seed = app
                    .current_dashboard()
                    .and_then(|d| d.description.clone())
                    .unwrap_or_default();
                app.enter_prompt(PromptKind::Describe, None, &seed);
            } else {
                app.set_status("Enter edit mode first (:edit)", StatusLevel::Warn);
            }
        }
        _ => {}
    }
}

fn nudge(app: &mut App, dx: i64, dy: i64) {
    let action = modules::dashboard::editing::nudge_card(app, dx, dy);
    app.apply_action(action);
}

fn focus_left(app: &mut App) {
    match app.current_tab {
        Tab::Browse => {
            app.focus = match app.focus {
                Focus::Details => Focus::List,
                Focus::List | Focus::Sidebar => Focus::Sidebar,
                Focus::Command => Focus::Command,
            };
            app.sync_context();
        }
        Tab::Dashboard => {
            if app.dashboard_pane == DashboardPane::Filters {
                app.move_selection(-1);
            }
        }
        Tab::Admin => {}
    }
}

fn focus_right(app: &mut App) {
    match app.current_tab {
        Tab::Browse => {
            app.focus = match app.focus {
                Focus::Sidebar => Focus::List,
                Focus::List | Focus::Details => Focus::Details,
                Focus::Command => Focus::Command,
            };
            app.sync_context();
        }
        Tab::Dashboard => {
            if app.dashboard_pane == DashboardPane::Filters {
                app.move_selection(1);
            }
        }
        Tab::Admin => {}
    }
}

fn handle_enter(app: &mut App) {
    match app.current_tab {
        Tab::Browse => {
            let action = modules::browse::open_selected(app);
            app.apply_action(action);
        }
        Tab::Dashboard => match app.dashboard_pane {
            DashboardPane::Filters => match app.selected_parameter_ref() {
                Some(parameter) => {
                    let parameter_id = parameter.id.clone();
                    app.enter_prompt(PromptKind::FilterValue, Some(parameter_id), "");
                }
                None => app.set_status("No filters on this dashboard", StatusLevel::Warn),
            },
            DashboardPane::Grid => {
                app.dashboard_pane = DashboardPane::Inspector;
                app.sync_context();
            }
            DashboardPane::Inspector => {}
        },
        Tab::Admin => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => handle_scroll(app, mouse.column, mouse.row, -1),
        MouseEventKind::ScrollDown => handle_scroll(app, mouse.column, mouse.row, 1),
        MouseEventKind::Down(MouseButton::Left) => handle_click(app, mouse.column, mouse.row),
        _ => {}
    }
}

fn handle_scroll(app: &mut App, column: u16, row: u16, delta: i64) {
    if app.input_mode != InputMode::Normal {
        return;
    }
    let areas = ui::layout::areas(terminal_rect());
    if app.current_tab != Tab::Browse {
        app.move_selection(delta);
        return;
    }

    if rect_contains(areas.sidebar_sections, column, row) {
        app.cycle_section();
        return;
    }
    if rect_contains(areas.sidebar_collections, column, row)
        && app.browse_section == BrowseSection::Collections
    {
        app.focus = Focus::Sidebar;
        app.move_selection(delta);
        return;
    }
    if rect_contains(areas.list, column, row) {
        app.focus = Focus::List;
        app.move_selection(delta);
    }
}

fn handle_click(app: &mut App, column: u16, row: u16) {
    if app.input_mode != InputMode::Normal || app.current_tab != Tab::Browse {
        return;
    }
    let areas = ui::layout::areas(terminal_rect());

    if rect_contains(areas.sidebar_sections, column, row) {
        let inner = rect_inner(areas.sidebar_sections);
        if rect_contains(inner, column, row) {
            let idx = (row - inner.y) as usize;
            if idx < BrowseSection::ALL.len() {
                app.browse_section = BrowseSection::ALL[idx];
                app.sync_context();
            }
        }
        return;
    }

    if rect_contains(areas.sidebar_collections, column, row) {
        let inner = rect_inner(areas.sidebar_collections);
        if !rect_contains(inner, column, row) {
            return;
        }
        let idx = (row - inner.y) as usize;
        if idx < app.store.browse().collections.len() {
            app.browse_section = BrowseSection::Collections;
            app.focus = Focus::Sidebar;
            app.selected_collection = idx;
            if let Some(id) = app.selected_collection_id() {
                app.enter_collection(id);
            }
        }
        return;
    }

    if rect_contains(areas.list, column, row) {
        let inner = rect_inner(areas.list);
        if !rect_contains(inner, column, row) {
            return;
        }
        let row_idx = (row - inner.y) as usize;
        app.focus = Focus::List;
        let (selected, list_len) = match app.browse_section {
            BrowseSection::Collections => (app.selected_item, app.visible_browse_items().len()),
            BrowseSection::Recents => (app.selected_recent, app.recent_items.len()),
            BrowseSection::Bookmarks => (app.selected_bookmark, app.bookmarks.len()),
        };
        if list_len == 0 || row_idx >= inner.height as usize {
            return;
        }
        // The list widget scrolls only far enough to keep the selection
        // visible, so the first rendered row is derivable
        let visible_height = inner.height.max(1) as usize;
        let offset = if selected >= visible_height {
            selected.saturating_sub(visible_height.saturating_sub(1))
        } else {
            0
        };
        let clicked = offset + row_idx;
        if clicked < list_len {
            app.set_list_selection(clicked);
        }
        return;
    }

    if rect_contains(areas.details, column, row) {
        app.focus = Focus::Details;
        app.sync_context();
    }
}

fn handle_copy_to_clipboard(app: &mut App) {
    use arboard::Clipboard;

    let text_to_copy = match app.current_tab {
        Tab::Browse => match app.browse_section {
            BrowseSection::Collections => {
                if app.focus == Focus::Sidebar {
                    app.selected_collection_id().and_then(|id| {
                        app.store
                            .browse()
                            .collections
                            .iter()
                            .find(|c| c.id == id)
                            .map(|c| c.name.clone())
                    })
                } else {
                    app.selected_browse_item().map(|item| item.name.clone())
                }
            }
            BrowseSection::Recents => app
                .recent_items
                .get(app.selected_recent)
                .map(|item| item.name.clone()),
            BrowseSection::Bookmarks => app
                .bookmarks
                .get(app.selected_bookmark)
                .map(|item| item.name.clone()),
        },
        Tab::Dashboard => match app.dashboard_pane {
            DashboardPane::Filters => app.selected_parameter_ref().map(|p| p.slug.clone()),
            _ => app
                .current_dashboard()
                .map(|d| d.public_uuid.clone().unwrap_or_else(|| d.name.clone())),
        },
        Tab::Admin => app
            .permissions
            .as_ref()
            .and_then(|view| view.rows.get(app.selected_perm_row))
            .map(|row| row.group.clone()),
    };

    if let Some(text) = text_to_copy {
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if clipboard.set_text(&text).is_ok() {
                    app.ctx.set_clipboard(text.clone());
                    app.set_status(
                        format!(
                            "Copied: {}",
                            if text.len() > 20 {
                                format!("{}...", &text[..20])
                            } else {
                                text
                            }
                        ),
                        StatusLevel::Info,
                    );
                } else {
                    app.set_status("Failed to copy to clipboard", StatusLevel::Error);
                }
            }
            Err(_) => {
                app.set_status("Clipboard not available", StatusLevel::Error);
            }
        }
    } else {
        app.set_status("Nothing to copy", StatusLevel::Warn);
    }
}

fn terminal_rect() -> Rect {
    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    Rect::new(0, 0, width, height)
}

fn page_amount() -> i64 {
    (terminal_rect().height / 2).max(1) as i64
}

fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

fn rect_inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

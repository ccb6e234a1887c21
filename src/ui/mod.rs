use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use serde_json::Value;

pub mod layout;
pub mod tabs;
pub mod widgets;

use crate::app::{
    App, BrowseSection, DataMode, Focus, InputMode, PromptKind, StatusLevel, Tab, ROOT_COLLECTION,
};
use crate::domain::browse::ItemModel;
use crate::domain::dashboard::selectors;
use crate::store::{BookmarkItem, RecentItem};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.size();
    let areas = layout::areas(size);

    tabs::draw_tab_bar(f, areas.tab_bar, app);
    draw_header(f, areas.header, app);

    match app.current_tab {
        Tab::Browse => {
            draw_sidebar(f, areas.sidebar_collections, areas.sidebar_sections, app);
            draw_list_panel(f, areas.list, app);
            draw_detail_panel(f, areas.details, app);
        }
        Tab::Dashboard => tabs::draw_dashboard_tab(f, areas.main, app),
        Tab::Admin => tabs::draw_admin_tab(f, areas.main, app),
    }

    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if app.store.dashboard().is_add_parameter_popover_open {
        draw_add_parameter_popup(f, areas.size, app);
    }
    if app.help_open {
        draw_help_popup(f, areas.size, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let user = app.server_user.as_deref().unwrap_or("anonymous");
    let title = Line::from(vec![
        Span::styled(
            "Glint",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Server", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {} ", app.endpoint)),
        Span::styled("User", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {} ", user)),
        Span::styled("Focus", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {}", app.focus_label())),
    ]);

    let left = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    let state = app.store.dashboard();
    let mode = match app.data_mode {
        DataMode::Mock => "mock",
        DataMode::Api => "api",
    };
    let mut right_spans = Vec::new();
    if state.show_load_complete_indicator {
        right_spans.push(Span::styled("● ", Style::default().fg(Color::LightGreen)));
        right_spans.push(Span::raw("cards loaded  "));
    } else if !state.load_progress.is_complete && !state.load_progress.dashcard_ids.is_empty() {
        let fraction = selectors::loading_fraction(state);
        right_spans.push(Span::styled("Cards ", Style::default().fg(Color::DarkGray)));
        right_spans.push(Span::styled(
            format!("{:.0}%  ", fraction * 100.0),
            Style::default().fg(Color::LightYellow),
        ));
    } else {
        right_spans.push(Span::styled("Status ", Style::default().fg(Color::DarkGray)));
        right_spans.push(Span::raw(format!("{}  ", app.server_status)));
    }
    right_spans.push(Span::styled("Mode ", Style::default().fg(Color::DarkGray)));
    right_spans.push(Span::raw(mode));

    let right = Paragraph::new(Line::from(right_spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    f.render_widget(left, chunks[0]);
    f.render_widget(right, chunks[1]);
}

fn draw_sidebar(f: &mut Frame, collections_area: Rect, sections_area: Rect, app: &App) {
    let border_style = if app.focus == Focus::Sidebar {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let collections = &app.store.browse().collections;
    let items: Vec<ListItem> = if collections.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No collections",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        collections
            .iter()
            .map(|collection| {
                let is_open = collection.id == app.current_collection;
                let mut spans = vec![Span::raw(collection.name.clone())];
                if is_open {
                    spans.push(Span::raw(" *"));
                }
                let style = if is_open {
                    Style::default()
                        .fg(Color::LightCyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(spans)).style(style)
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Collections")
                .border_style(border_style),
        )
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("-> ");

    let mut state = ListState::default();
    if !collections.is_empty() {
        state.select(Some(app.selected_collection));
    }
    f.render_stateful_widget(list, collections_area, &mut state);

    let section_lines: Vec<Line> = BrowseSection::ALL
        .iter()
        .map(|section| {
            let count = match section {
                BrowseSection::Collections => app.visible_browse_items().len(),
                BrowseSection::Recents => app.recent_items.len(),
                BrowseSection::Bookmarks => app.bookmarks.len(),
            };
            let is_active = *section == app.browse_section;
            let marker = if is_active { "▸ " } else { "  " };
            let style = if is_active {
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(
                format!("{}{} ({})", marker, section.title(), count),
                style,
            ))
        })
        .collect();

    let sections_block = Paragraph::new(Text::from(section_lines))
        .block(Block::default().borders(Borders::ALL).title("Sections"))
        .wrap(Wrap { trim: true });

    f.render_widget(sections_block, sections_area);
}

fn draw_list_panel(f: &mut Frame, area: Rect, app: &App) {
    let title = list_title(app);
    let border_style = if app.focus == Focus::List {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let (items, selected, len) = match app.browse_section {
        BrowseSection::Collections => (
            item_list(app),
            app.selected_item,
            app.visible_browse_items().len(),
        ),
        BrowseSection::Recents => (
            recents_list(&app.recent_items),
            app.selected_recent,
            app.recent_items.len(),
        ),
        BrowseSection::Bookmarks => (
            bookmarks_list(&app.bookmarks),
            app.selected_bookmark,
            app.bookmarks.len(),
        ),
    };

    let highlight_style = if app.focus == Focus::List {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .highlight_style(highlight_style)
        .highlight_symbol(">> ");

    let mut state = ListState::default();
    if len > 0 {
        state.select(Some(selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn model_tag(model: ItemModel) -> Span<'static> {
    match model {
        ItemModel::Dashboard => Span::styled(
            format!("{:<9}", "dashboard"),
            Style::default().fg(Color::LightCyan),
        ),
        ItemModel::Card => Span::styled(
            format!("{:<9}", "question"),
            Style::default().fg(Color::LightGreen),
        ),
        ItemModel::Other => Span::styled(
            format!("{:<9}", "item"),
            Style::default().fg(Color::DarkGray),
        ),
    }
}

fn stored_model_tag(model: &str) -> Span<'static> {
    let color = match model {
        "dashboard" => Color::LightCyan,
        "card" => Color::LightGreen,
        _ => Color::DarkGray,
    };
    let label = if model == "card" { "question" } else { model };
    Span::styled(format!("{:<9}", label), Style::default().fg(color))
}

fn item_list(app: &App) -> Vec<ListItem> {
    app.visible_browse_items()
        .iter()
        .map(|item| {
            let bookmarked = app.bookmarks.iter().any(|mark| {
                mark.model_id == item.id
                    && ((mark.model == "dashboard" && item.model == ItemModel::Dashboard)
                        || (mark.model == "card" && item.model == ItemModel::Card))
            });
            let marker = if bookmarked {
                Span::styled("* ", Style::default().fg(Color::LightYellow))
            } else {
                Span::raw("  ")
            };
            let line = Line::from(vec![
                marker,
                model_tag(item.model),
                Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
                Span::raw(item.name.clone()),
            ]);
            ListItem::new(line)
        })
        .collect()
}

fn recents_list(items: &[RecentItem]) -> Vec<ListItem> {
    items
        .iter()
        .map(|item| {
            let viewed = viewed_at_text(item.viewed_at);
            let line = Line::from(vec![
                Span::raw("  "),
                stored_model_tag(&item.model),
                Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
                Span::raw(item.name.clone()),
                Span::styled(
                    format!("  {}", viewed),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect()
}

fn bookmarks_list(items: &[BookmarkItem]) -> Vec<ListItem> {
    items
        .iter()
        .map(|item| {
            let line = Line::from(vec![
                Span::styled("* ", Style::default().fg(Color::LightYellow)),
                stored_model_tag(&item.model),
                Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
                Span::raw(item.name.clone()),
            ]);
            ListItem::new(line)
        })
        .collect()
}

fn viewed_at_text(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%b %d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "--".to_string())
}

fn draw_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == Focus::Details {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut lines = if app.focus == Focus::Sidebar {
        collection_detail_lines(app)
    } else {
        match app.browse_section {
            BrowseSection::Collections => item_detail_lines(app),
            BrowseSection::Recents => recent_detail_lines(app),
            BrowseSection::Bookmarks => bookmark_detail_lines(app),
        }
    };

    if lines.is_empty() {
        lines.push(Line::from("No data"));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Inspector")
                .border_style(border_style),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn detail_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

fn collection_detail_lines(app: &App) -> Vec<Line<'static>> {
    let Some(collection) = app
        .store
        .browse()
        .collections
        .get(app.selected_collection)
    else {
        return Vec::new();
    };
    let mut lines = vec![
        detail_line("Collection", collection.name.clone()),
        detail_line("Id", collection.id.to_string()),
    ];
    if let Some(description) = &collection.description {
        lines.push(detail_line("About", description.clone()));
    }
    if collection.archived {
        lines.push(Line::from(Span::styled(
            "archived",
            Style::default().fg(Color::LightRed),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter opens the collection",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn item_detail_lines(app: &App) -> Vec<Line<'static>> {
    let Some(item) = app.selected_browse_item() else {
        return Vec::new();
    };
    let mut lines = vec![
        detail_line("Name", item.name.clone()),
        detail_line("Type", item.model.title().to_string()),
        detail_line("Id", item.id.to_string()),
    ];
    if let Some(description) = &item.description {
        lines.push(detail_line("About", description.clone()));
    }
    lines.push(Line::from(""));
    match item.model {
        ItemModel::Dashboard => lines.push(Line::from(Span::styled(
            "Enter opens the dashboard",
            Style::default().fg(Color::DarkGray),
        ))),
        ItemModel::Card => lines.push(Line::from(Span::styled(
            "Questions open inside a dashboard",
            Style::default().fg(Color::DarkGray),
        ))),
        ItemModel::Other => {}
    }
    lines
}

fn recent_detail_lines(app: &App) -> Vec<Line<'static>> {
    let Some(item) = app.recent_items.get(app.selected_recent) else {
        return Vec::new();
    };
    vec![
        detail_line("Name", item.name.clone()),
        detail_line("Type", item.model.clone()),
        detail_line("Id", item.model_id.to_string()),
        detail_line("Viewed", viewed_at_text(item.viewed_at)),
    ]
}

fn bookmark_detail_lines(app: &App) -> Vec<Line<'static>> {
    let Some(item) = app.bookmarks.get(app.selected_bookmark) else {
        return Vec::new();
    };
    vec![
        detail_line("Name", item.name.clone()),
        detail_line("Type", item.model.clone()),
        detail_line("Id", item.model_id.to_string()),
    ]
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let state = app.store.dashboard();
    let dashboard_name = selectors::current_dashboard(state)
        .map(|d| truncate_str(&d.name, 28))
        .unwrap_or_else(|| "--".to_string());
    let pane = match app.current_tab {
        Tab::Browse => app.browse_section.title(),
        Tab::Dashboard => app.dashboard_pane.title(),
        Tab::Admin => app.admin_section.title(),
    };

    let mut spans = vec![
        Span::styled("Tab ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.current_tab.title())),
        Span::styled("Pane ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", pane)),
        Span::styled("Dashboard ", Style::default().fg(Color::DarkGray)),
        Span::raw(dashboard_name),
    ];
    if selectors::is_editing(state) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "editing",
            Style::default().fg(Color::LightYellow),
        ));
    }
    if selectors::has_unsaved_changes(state) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "unsaved *",
            Style::default().fg(Color::LightRed),
        ));
    }
    if let Some(chord) = app.pending_chord.as_ref() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{}-", chord.key),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("open", "Open a dashboard by id"),
        ("collections", "Browse collections"),
        ("recents", "Recently viewed items"),
        ("connect", "Connect to a server URL"),
        ("refresh", "Refresh the current view"),
        ("filter", "Set a filter (name=value)"),
        ("unfilter", "Clear a filter value"),
        ("addfilter", "Add a filter (edit mode)"),
        ("edit", "Edit the open dashboard"),
        ("save", "Save dashboard edits"),
        ("cancel", "Discard dashboard edits"),
        ("rename", "Rename the dashboard"),
        ("describe", "Set the description"),
        ("share", "Create a public link"),
        ("unshare", "Revoke the public link"),
        ("embed", "Toggle embedding (on/off)"),
        ("domains", "Approved embedding origins"),
        ("permissions", "Permissions matrix"),
        ("export", "Export the view (csv/json)"),
        ("bookmark", "Toggle a bookmark"),
        ("mock", "Switch to built-in sample data"),
        ("quit", "Quit"),
    ];

    for (cmd, desc) in commands {
        if cmd.starts_with(&input) {
            return Some(desc);
        }
    }
    None
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command.input);
            let hint_text = hint.unwrap_or("filter shorthand: name=value");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(&app.command.input),
                Span::styled(
                    format!("  {}", hint_text),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        InputMode::Prompt(PromptKind::FilterValue) => {
            let parameter = app
                .prompt_context
                .as_deref()
                .and_then(|id| {
                    app.current_dashboard()
                        .and_then(|d| d.parameters.iter().find(|p| p.id == id))
                })
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "filter".to_string());
            let hint = filter_suggestions(app)
                .unwrap_or_else(|| "empty=clear, Enter=ok Esc=cancel".to_string());
            Line::from(vec![
                Span::styled(
                    format!("> {} ", parameter),
                    Style::default().fg(Color::LightCyan),
                ),
                Span::raw(&app.command.input),
                Span::styled(format!("  ({})", hint), Style::default().fg(Color::DarkGray)),
            ])
        }
        InputMode::Prompt(kind) => {
            let hint = match kind {
                PromptKind::Describe => "empty=clear, Enter=ok Esc=cancel",
                PromptKind::Domains => "comma-separated origins, empty=clear",
                _ => "Enter=ok Esc=cancel",
            };
            Line::from(vec![
                Span::styled(
                    format!("> {} ", kind.label()),
                    Style::default().fg(Color::LightCyan),
                ),
                Span::raw(&app.command.input),
                Span::styled(format!("  ({})", hint), Style::default().fg(Color::DarkGray)),
            ])
        }
        InputMode::Normal => {
            if let Some((text, level)) = app.status_text() {
                let color = match level {
                    StatusLevel::Info => Color::LightGreen,
                    StatusLevel::Warn => Color::LightYellow,
                    StatusLevel::Error => Color::LightRed,
                };
                Line::from(vec![
                    Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(text, Style::default().fg(color)),
                ])
            } else {
                action_hints(app)
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

/// Cached typeahead values for the filter prompt, if a lookup landed.
fn filter_suggestions(app: &App) -> Option<String> {
    let parameter_id = app.prompt_context.as_deref()?;
    let query = app.command.input.trim();
    if query.len() < 2 {
        return None;
    }
    let values =
        selectors::cached_parameter_search(app.store.dashboard(), parameter_id, query)?;
    if values.is_empty() {
        return Some("no matching values".to_string());
    }
    let mut joined = values
        .iter()
        .take(4)
        .map(value_text)
        .collect::<Vec<_>>()
        .join(" · ");
    if values.len() > 4 {
        joined.push_str(&format!(" (+{})", values.len() - 4));
    }
    Some(joined)
}

fn draw_help_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = centered_rect(72, 64, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  1-3        Jump to tab"),
        Line::from("  Tab        Next section / pane"),
        Line::from("  h / l      Focus left / right"),
        Line::from("  j / k      Move selection (vim)"),
        Line::from("  gg / G     Top / bottom (vim)"),
        Line::from("  Enter      Open / apply"),
        Line::from("  Esc        Close sidebar / back"),
        Line::from("  Mouse      Scroll + click select"),
        Line::from(""),
        Line::from("Dashboard"),
        Line::from("  f          Set the selected filter"),
        Line::from("  u          Clear the selected filter"),
        Line::from("  a          Add a filter (edit mode)"),
        Line::from("  e          Enter edit mode"),
        Line::from("  H/J/K/L    Move card (edit mode)"),
        Line::from("  R / D      Rename / describe (edit mode)"),
        Line::from("  i          Info sidebar"),
        Line::from("  s          Sharing sidebar"),
        Line::from("  r          Re-run cards / refresh"),
        Line::from(""),
        Line::from("Everywhere"),
        Line::from("  b          Toggle bookmark"),
        Line::from("  x          Export view (csv)"),
        Line::from("  y          Copy selection"),
        Line::from("  :          Command bar"),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from("Command examples:"),
        Line::from("  :open 101"),
        Line::from("  :filter state=California"),
        Line::from("  :export json"),
        Line::from("  :embed on"),
        Line::from(""),
        Line::from(format!("Active tab: {}", app.current_tab.title())),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

fn draw_add_parameter_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = centered_rect(36, 36, area);
    f.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = app
        .add_parameter_popover
        .kinds()
        .iter()
        .map(|(kind, label)| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<10}", label)),
                Span::styled((*kind).to_string(), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Add Filter (Enter=add, Esc=close)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut state = ListState::default();
    state.select(Some(app.add_parameter_popover.selected));
    f.render_stateful_widget(list, popup_area, &mut state);
}

fn list_title(app: &App) -> String {
    match app.browse_section {
        BrowseSection::Collections => {
            let name = if app.current_collection == ROOT_COLLECTION {
                "Root".to_string()
            } else {
                app.store
                    .browse()
                    .collections
                    .iter()
                    .find(|c| c.id == app.current_collection)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| format!("Collection {}", app.current_collection))
            };
            format!("{} · Items ({})", name, app.visible_browse_items().len())
        }
        BrowseSection::Recents => format!("Recents ({})", app.recent_items.len()),
        BrowseSection::Bookmarks => format!("Bookmarks ({})", app.bookmarks.len()),
    }
}

fn action_hints(app: &App) -> Line<'static> {
    let mut spans = vec![
        Span::styled("Tab", Style::default().fg(Color::LightCyan)),
        Span::raw(" Section  "),
        Span::styled("Enter", Style::default().fg(Color::LightCyan)),
        Span::raw(" Open  "),
        Span::styled(":", Style::default().fg(Color::LightCyan)),
        Span::raw(" Command  "),
    ];

    match app.current_tab {
        Tab::Browse => {
            spans.extend([
                Span::styled("b", Style::default().fg(Color::LightCyan)),
                Span::raw(" Bookmark  "),
                Span::styled("x", Style::default().fg(Color::LightCyan)),
                Span::raw(" Export  "),
            ]);
        }
        Tab::Dashboard => {
            spans.extend([
                Span::styled("f", Style::default().fg(Color::LightCyan)),
                Span::raw(" Filter  "),
                Span::styled("e", Style::default().fg(Color::LightCyan)),
                Span::raw(" Edit  "),
                Span::styled("i", Style::default().fg(Color::LightCyan)),
                Span::raw(" Info  "),
                Span::styled("r", Style::default().fg(Color::LightCyan)),
                Span::raw(" Re-run  "),
            ]);
        }
        Tab::Admin => {
            spans.extend([
                Span::styled("x", Style::default().fg(Color::LightCyan)),
                Span::raw(" Export  "),
                Span::styled("r", Style::default().fg(Color::LightCyan)),
                Span::raw(" Refresh  "),
            ]);
        }
    }

    spans.extend([
        Span::styled("?", Style::default().fg(Color::LightCyan)),
        Span::raw(" Help  "),
        Span::styled("q", Style::default().fg(Color::LightCyan)),
        Span::raw(" Quit"),
    ]);

    Line::from(spans)
}

/// Flatten a JSON value for display in chips, cells and detail lines.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

pub(crate) fn truncate_str(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    value.chars().take(max).collect::<String>() + "…"
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

//! Tab-based UI rendering

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs as RataTabs, Wrap};
use ratatui::Frame;

use super::widgets::sparkline::MiniSparkline;
use super::{truncate_str, value_text};
use crate::app::{
    AdminSection, App, DashboardPane, Tab, SIDEBAR_EDIT_PARAMETER, SIDEBAR_INFO, SIDEBAR_SHARING,
};
use crate::domain::dashboard::{selectors, CardDataset, CardDisplay, DashCard, Dashboard};

/// Draw the tab bar at the top
pub fn draw_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            let shortcut = tab.shortcut();
            let title = tab.title();
            Line::from(vec![
                Span::styled(
                    format!("{}:", shortcut),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(title),
            ])
        })
        .collect();

    let selected = Tab::ALL
        .iter()
        .position(|t| *t == app.current_tab)
        .unwrap_or(0);

    let tabs = RataTabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" │ ");

    f.render_widget(tabs, area);
}

/// Draw the Dashboard tab content
pub fn draw_dashboard_tab(f: &mut Frame, area: Rect, app: &App) {
    let state = app.store.dashboard();
    let Some(dashboard) = selectors::current_dashboard(state) else {
        draw_empty_dashboard(f, area);
        return;
    };

    let show_panel =
        state.sidebar.is_open() || app.dashboard_pane == DashboardPane::Inspector;
    let (content_area, panel_area) = if show_panel && area.width > 50 {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(34)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(content_area);

    draw_filter_bar(f, chunks[0], app);
    draw_card_grid(f, chunks[1], app, dashboard);

    if let Some(panel_area) = panel_area {
        draw_side_panel(f, panel_area, app);
    }
}

fn draw_empty_dashboard(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " No dashboard open",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Pick one in the Browse tab and press Enter,",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            " or run :open <id>",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Dashboard"));
    f.render_widget(paragraph, area);
}

fn draw_filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let state = app.store.dashboard();
    let border_style = if app.dashboard_pane == DashboardPane::Filters {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let applied = selectors::applied_parameters(state);
    let mut spans = Vec::new();
    if applied.is_empty() {
        spans.push(Span::styled(
            "No filters · :addfilter adds one in edit mode",
            Style::default().fg(Color::DarkGray),
        ));
    }
    for (idx, (parameter, value)) in applied.iter().copied().enumerate() {
        let value_label = match value {
            Some(v) if !v.is_null() => truncate_str(&value_text(v), 18),
            _ => "all".to_string(),
        };
        let selected =
            app.dashboard_pane == DashboardPane::Filters && idx == app.selected_parameter;
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if matches!(value, Some(v) if !v.is_null()) {
            Style::default().fg(Color::LightCyan)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(
            format!(" {}: {} ", parameter.name, value_label),
            style,
        ));
        spans.push(Span::raw(" "));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Filters ({})", applied.len()))
            .border_style(border_style),
    );
    f.render_widget(paragraph, area);
}

fn draw_card_grid(f: &mut Frame, area: Rect, app: &App, dashboard: &Dashboard) {
    let state = app.store.dashboard();
    let border_style = if app.dashboard_pane == DashboardPane::Grid {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let cards = selectors::ordered_dashcards(state);

    let mut title = format!(
        "{} · Cards ({})",
        truncate_str(&dashboard.name, 24),
        cards.len()
    );
    if selectors::is_editing(state) {
        title.push_str(" · EDITING");
    }
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    if cards.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No cards on this dashboard",
            Style::default().fg(Color::DarkGray),
        ));
        f.render_widget(empty, inner);
        return;
    }
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let grid_cols = cards
        .iter()
        .map(|card| card.col + card.size_x)
        .max()
        .unwrap_or(1)
        .max(1);
    let grid_rows = cards
        .iter()
        .map(|card| card.row + card.size_y)
        .max()
        .unwrap_or(1)
        .max(1);

    let editing = selectors::is_editing(state);
    for (idx, dashcard) in cards.iter().copied().enumerate() {
        let rect = scaled_rect(inner, dashcard, grid_cols, grid_rows);
        if rect.width < 4 || rect.height < 3 {
            continue;
        }
        let selected = idx == app.selected_card
            && matches!(
                app.dashboard_pane,
                DashboardPane::Grid | DashboardPane::Inspector
            );
        draw_card_cell(f, rect, app, dashcard, selected, editing);
    }
}

/// Map a grid placement onto terminal cells, proportional to the
/// dashboard's occupied extent.
fn scaled_rect(area: Rect, dashcard: &DashCard, grid_cols: u32, grid_rows: u32) -> Rect {
    let x0 = area.x as u32 + dashcard.col * area.width as u32 / grid_cols;
    let x1 = area.x as u32 + (dashcard.col + dashcard.size_x) * area.width as u32 / grid_cols;
    let y0 = area.y as u32 + dashcard.row * area.height as u32 / grid_rows;
    let y1 = area.y as u32 + (dashcard.row + dashcard.size_y) * area.height as u32 / grid_rows;
    Rect {
        x: x0 as u16,
        y: y0 as u16,
        width: (x1.saturating_sub(x0)).max(1) as u16,
        height: (y1.saturating_sub(y0)).max(1) as u16,
    }
}

fn draw_card_cell(
    f: &mut Frame,
    area: Rect,
    app: &App,
    dashcard: &DashCard,
    selected: bool,
    editing: bool,
) {
    let state = app.store.dashboard();
    let loading = selectors::is_card_loading(state, dashcard.id);
    let slow = selectors::is_card_slow(state, dashcard.id);
    let dataset = selectors::card_dataset(state, dashcard.id);

    let border_style = if selected && editing {
        Style::default().fg(Color::LightYellow)
    } else if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let name_width = area.width.saturating_sub(6).max(4) as usize;
    let mut title = truncate_str(&dashcard.card.name, name_width);
    if dashcard.is_dirty {
        title.push_str(" *");
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    match dataset {
        Some(dataset) if dataset.error.is_some() => {
            let message = dataset.error.as_deref().unwrap_or("query failed");
            let lines = vec![
                Line::from(Span::styled(
                    "Query failed",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    message.to_string(),
                    Style::default().fg(Color::LightRed),
                )),
            ];
            let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
            f.render_widget(paragraph, inner);
        }
        Some(dataset) => draw_card_data(f, inner, dashcard, dataset, loading, slow),
        None => {
            let (text, color) = if slow {
                ("Still loading…", Color::LightYellow)
            } else if loading {
                ("Loading…", Color::DarkGray)
            } else {
                ("No data yet", Color::DarkGray)
            };
            let paragraph = Paragraph::new(Span::styled(text, Style::default().fg(color)));
            f.render_widget(paragraph, inner);
        }
    }
}

fn draw_card_data(
    f: &mut Frame,
    area: Rect,
    dashcard: &DashCard,
    dataset: &CardDataset,
    loading: bool,
    slow: bool,
) {
    let mut lines: Vec<Line> = Vec::new();
    if loading {
        let (text, color) = if slow {
            ("Still loading…", Color::LightYellow)
        } else {
            ("Loading…", Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(text, Style::default().fg(color))));
    }

    match dashcard.card.display {
        CardDisplay::Scalar => {
            let value = dataset
                .rows
                .first()
                .and_then(|row| row.first())
                .map(value_text)
                .unwrap_or_else(|| "--".to_string());
            lines.push(Line::from(Span::styled(
                value,
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            )));
            if let Some(label) = dataset.columns.first() {
                lines.push(Line::from(Span::styled(
                    label.clone(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            let paragraph =
                Paragraph::new(Text::from(lines)).alignment(Alignment::Center);
            f.render_widget(paragraph, area);
        }
        CardDisplay::Line | CardDisplay::Bar => {
            let series = numeric_series(dataset);
            if let Some(last) = dataset.rows.last() {
                let label = last.first().map(value_text).unwrap_or_default();
                let value = last.last().map(value_text).unwrap_or_default();
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{} ", label),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        value,
                        Style::default()
                            .fg(Color::LightCyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
            if area.height >= 2 && !series.is_empty() {
                let text_area = Rect {
                    height: area.height - 1,
                    ..area
                };
                let spark_area = Rect {
                    y: area.y + area.height - 1,
                    height: 1,
                    ..area
                };
                let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
                f.render_widget(paragraph, text_area);
                f.render_widget(MiniSparkline::new(&series), spark_area);
            } else if !series.is_empty() {
                f.render_widget(MiniSparkline::new(&series), area);
            } else {
                let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
                f.render_widget(paragraph, area);
            }
        }
        CardDisplay::Table => {
            let header = dataset
                .columns
                .iter()
                .map(|column| truncate_str(column, 14))
                .collect::<Vec<_>>()
                .join(" │ ");
            lines.push(Line::from(Span::styled(
                header,
                Style::default().fg(Color::DarkGray),
            )));
            let room = (area.height as usize).saturating_sub(lines.len());
            for row in dataset.rows.iter().take(room) {
                let cells = row
                    .iter()
                    .map(|cell| truncate_str(&value_text(cell), 14))
                    .collect::<Vec<_>>()
                    .join(" │ ");
                lines.push(Line::from(cells));
            }
            let paragraph = Paragraph::new(Text::from(lines));
            f.render_widget(paragraph, area);
        }
        CardDisplay::Other => {
            lines.push(Line::from(Span::styled(
                format!(
                    "{} rows × {} columns",
                    dataset.rows.len(),
                    dataset.columns.len()
                ),
                Style::default().fg(Color::DarkGray),
            )));
            let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        }
    }
}

/// Last-column numeric values of a dataset, for sparkline previews.
fn numeric_series(dataset: &CardDataset) -> Vec<f64> {
    dataset
        .rows
        .iter()
        .filter_map(|row| row.last().and_then(|value| value.as_f64()))
        .collect()
}

fn draw_side_panel(f: &mut Frame, area: Rect, app: &App) {
    let state = app.store.dashboard();
    let (title, lines) = match state.sidebar.name.as_deref() {
        Some(SIDEBAR_INFO) => ("Info", info_lines(app)),
        Some(SIDEBAR_EDIT_PARAMETER) => ("Filter", parameter_lines(app)),
        Some(SIDEBAR_SHARING) => ("Sharing", sharing_lines(app)),
        Some(other) => (
            "Panel",
            vec![Line::from(format!("Unknown panel: {other}"))],
        ),
        None => ("Card Inspector", inspector_lines(app)),
    };

    let border_style = if app.dashboard_pane == DashboardPane::Inspector {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut lines = lines;
    if lines.is_empty() {
        lines.push(Line::from("No data"));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn panel_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<11}", label),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(value),
    ])
}

fn datetime_text(value: Option<&str>) -> String {
    value
        .map(|raw| truncate_str(&raw.replace('T', " "), 16))
        .unwrap_or_else(|| "--".to_string())
}

fn info_lines(app: &App) -> Vec<Line<'static>> {
    let state = app.store.dashboard();
    let Some(dashboard) = selectors::current_dashboard(state) else {
        return Vec::new();
    };
    let mut lines = vec![
        panel_line("Name", dashboard.name.clone()),
        panel_line("Id", dashboard.id.to_string()),
    ];
    if let Some(description) = &dashboard.description {
        lines.push(panel_line("About", description.clone()));
    }
    let collection = dashboard
        .collection_id
        .and_then(|id| {
            app.store
                .browse()
                .collections
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
        })
        .unwrap_or_else(|| "--".to_string());
    lines.push(panel_line("Collection", collection));
    lines.push(panel_line(
        "Cards",
        selectors::ordered_dashcards(state).len().to_string(),
    ));
    lines.push(panel_line(
        "Filters",
        dashboard.parameters.len().to_string(),
    ));
    lines.push(panel_line(
        "Created",
        datetime_text(dashboard.created_at.as_deref()),
    ));
    lines.push(panel_line(
        "Updated",
        datetime_text(dashboard.updated_at.as_deref()),
    ));
    lines.push(panel_line(
        "Access",
        if dashboard.can_write {
            "can edit".to_string()
        } else {
            "read only".to_string()
        },
    ));
    lines.push(panel_line(
        "Public",
        dashboard
            .public_uuid
            .clone()
            .unwrap_or_else(|| "off".to_string()),
    ));
    lines.push(panel_line(
        "Embedding",
        if dashboard.enable_embedding {
            "on".to_string()
        } else {
            "off".to_string()
        },
    ));
    lines
}

fn parameter_lines(app: &App) -> Vec<Line<'static>> {
    let state = app.store.dashboard();
    let Some(parameter_id) = state
        .sidebar
        .props
        .get("parameterId")
        .and_then(|value| value.as_str())
    else {
        return vec![Line::from("No filter selected")];
    };
    let Some(parameter) = selectors::current_dashboard(state)
        .and_then(|d| d.parameters.iter().find(|p| p.id == parameter_id))
    else {
        return vec![Line::from(format!("Unknown filter: {parameter_id}"))];
    };

    let value = state
        .parameter_values
        .get(&parameter.id)
        .filter(|v| !v.is_null())
        .map(value_text);
    let mut lines = vec![
        panel_line("Name", parameter.name.clone()),
        panel_line("Slug", parameter.slug.clone()),
        panel_line("Type", parameter.kind.clone()),
        panel_line(
            "Default",
            parameter
                .default
                .as_ref()
                .map(value_text)
                .unwrap_or_else(|| "--".to_string()),
        ),
        panel_line("Value", value.unwrap_or_else(|| "all".to_string())),
        Line::from(""),
        Line::from(Span::styled(
            "f sets a value, u clears it",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if selectors::is_editing(state) {
        lines.push(Line::from(Span::styled(
            "u removes the filter while editing",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn sharing_lines(app: &App) -> Vec<Line<'static>> {
    let state = app.store.dashboard();
    let Some(dashboard) = selectors::current_dashboard(state) else {
        return vec![Line::from("Open a dashboard to manage sharing")];
    };
    let mut lines = vec![panel_line("Dashboard", dashboard.name.clone())];
    match &dashboard.public_uuid {
        Some(uuid) => {
            lines.push(panel_line("Public", "on".to_string()));
            lines.push(panel_line("Link", uuid.clone()));
        }
        None => lines.push(panel_line("Public", "off".to_string())),
    }
    lines.push(panel_line(
        "Embedding",
        if dashboard.enable_embedding {
            "on".to_string()
        } else {
            "off".to_string()
        },
    ));
    lines.push(panel_line(
        "Origins",
        app.approved_domains
            .clone()
            .unwrap_or_else(|| "(none)".to_string()),
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        ":share / :unshare manage the public link",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        ":embed on|off, :domains set origins",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn inspector_lines(app: &App) -> Vec<Line<'static>> {
    let state = app.store.dashboard();
    let Some(dashcard) = app.selected_dashcard() else {
        return vec![Line::from("No card selected")];
    };
    let display = match dashcard.card.display {
        CardDisplay::Scalar => "scalar",
        CardDisplay::Table => "table",
        CardDisplay::Line => "line",
        CardDisplay::Bar => "bar",
        CardDisplay::Other => "other",
    };
    let mut lines = vec![
        panel_line("Card", dashcard.card.name.clone()),
        panel_line("Display", display.to_string()),
        panel_line(
            "Position",
            format!("row {}, col {}", dashcard.row, dashcard.col),
        ),
        panel_line(
            "Size",
            format!("{}×{}", dashcard.size_x, dashcard.size_y),
        ),
    ];
    if let Some(description) = &dashcard.card.description {
        lines.push(panel_line("About", description.clone()));
    }
    match selectors::card_dataset(state, dashcard.id) {
        Some(dataset) if dataset.error.is_some() => {
            lines.push(Line::from(Span::styled(
                dataset.error.clone().unwrap_or_default(),
                Style::default().fg(Color::LightRed),
            )));
        }
        Some(dataset) => {
            lines.push(panel_line("Rows", dataset.rows.len().to_string()));
            lines.push(panel_line("Columns", dataset.columns.join(", ")));
        }
        None => {
            lines.push(panel_line("Rows", "not loaded".to_string()));
        }
    }
    if dashcard.is_dirty {
        lines.push(Line::from(Span::styled(
            "unsaved layout changes",
            Style::default().fg(Color::LightYellow),
        )));
    }
    lines
}

/// Draw the Admin tab content
pub fn draw_admin_tab(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(0)])
        .split(area);

    let items: Vec<Line> = AdminSection::ALL
        .iter()
        .map(|section| {
            let is_active = *section == app.admin_section;
            let marker = if is_active { "▸ " } else { "  " };
            let style = if is_active {
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(
                format!("{}{}", marker, section.title()),
                style,
            ))
        })
        .collect();
    let sidebar = Paragraph::new(Text::from(items))
        .block(Block::default().borders(Borders::ALL).title("ADMIN"));
    f.render_widget(sidebar, chunks[0]);

    match app.admin_section {
        AdminSection::Permissions => draw_permissions_panel(f, chunks[1], app),
        AdminSection::Sharing => draw_sharing_panel(f, chunks[1], app),
    }
}

fn level_span(level: &str) -> Span<'static> {
    let color = match level {
        "unrestricted" => Color::LightGreen,
        "native" => Color::LightCyan,
        "granular" => Color::LightYellow,
        "none" | "blocked" => Color::DarkGray,
        _ => Color::White,
    };
    Span::styled(format!("{:<16}", level), Style::default().fg(color))
}

fn draw_permissions_panel(f: &mut Frame, area: Rect, app: &App) {
    let Some(view) = app.permissions.as_ref() else {
        let paragraph = Paragraph::new(Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(
                " Permissions not loaded",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                " Press r to fetch them from the server",
                Style::default().fg(Color::DarkGray),
            )),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Permissions"));
        f.render_widget(paragraph, area);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            "Permissions · revision {} · {} groups",
            view.revision,
            view.rows.len()
        ))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let mut header_spans = vec![Span::styled(
        format!("   {:<18}", "Group"),
        Style::default().fg(Color::DarkGray),
    )];
    for database in &view.databases {
        header_spans.push(Span::styled(
            format!("{:<16}", truncate_str(database, 15)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(header_spans)), chunks[0]);

    let rows: Vec<ListItem> = view
        .rows
        .iter()
        .map(|row| {
            let mut spans = vec![Span::styled(
                format!("{:<18}", truncate_str(&row.group, 17)),
                Style::default().fg(Color::White),
            )];
            for level in &row.levels {
                spans.push(level_span(level));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(rows)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    let mut state = ListState::default();
    if !view.rows.is_empty() {
        state.select(Some(app.selected_perm_row));
    }
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn draw_sharing_panel(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = sharing_lines(app);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Changes apply to the dashboard open in tab 2",
        Style::default().fg(Color::DarkGray),
    )));
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Sharing"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

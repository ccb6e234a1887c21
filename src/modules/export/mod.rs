//! Export Module
//!
//! Writes what the screen is showing to a file.
//!
//! - Dashboard tab → selected card's result as CSV, or the whole
//!   dashboard as JSON with `:export json`
//! - Browse tab → the visible item list as CSV
//! - Admin tab → the permissions matrix as CSV
//! - Files saved under the platform data dir, e.g. ~/.local/share/glint/exports/

mod csv_export;
mod json_export;

use crate::app::{App, StatusLevel, Tab};
use crate::core::{Action, NotifyLevel};
use crate::domain::dashboard::selectors;
use chrono::Local;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/// Get the export directory path, creating it if needed
fn get_export_dir() -> std::io::Result<PathBuf> {
    let export_dir = ProjectDirs::from("io", "glint", "glint")
        .map(|dirs| dirs.data_dir().join("exports"))
        .unwrap_or_else(|| PathBuf::from(".glint").join("exports"));
    fs::create_dir_all(&export_dir)?;
    Ok(export_dir)
}

/// Generate a timestamped filename
fn generate_filename(prefix: &str, extension: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S");
    format!("{}-{}.{}", prefix, timestamp, extension)
}

/// Turn a display name into a filename-safe prefix.
fn slugify(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        "export".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Export what the current tab is showing.
///
/// Routes by tab:
/// - Tab::Dashboard → selected card CSV, or dashboard JSON
/// - Tab::Browse → item list CSV
/// - Tab::Admin → permissions CSV
pub fn export_current_view(app: &mut App, format: Option<&str>) -> Action {
    match format {
        None | Some("csv") | Some("json") => {}
        Some(other) => {
            return Action::Notify(
                format!("Unknown export format: {other}"),
                NotifyLevel::Warn,
            );
        }
    }

    match app.current_tab {
        Tab::Dashboard => {
            if format == Some("json") {
                export_dashboard_json(app)
            } else {
                export_card_csv(app)
            }
        }
        Tab::Browse => export_items(app),
        Tab::Admin => export_permissions(app),
    }
}

fn export_card_csv(app: &mut App) -> Action {
    let Some(dashcard) = app.selected_dashcard() else {
        return Action::Notify("No card selected".to_string(), NotifyLevel::Warn);
    };
    let card_name = dashcard.card.name.clone();
    let Some(dataset) = selectors::card_dataset(app.store.dashboard(), dashcard.id) else {
        return Action::Notify("Card has no data yet".to_string(), NotifyLevel::Warn);
    };
    if let Some(error) = &dataset.error {
        return Action::Notify(
            format!("Card failed, nothing to export: {error}"),
            NotifyLevel::Warn,
        );
    }
    let dataset = dataset.clone();

    let export_dir = match get_export_dir() {
        Ok(dir) => dir,
        Err(e) => {
            return Action::Notify(
                format!("Failed to create export directory: {}", e),
                NotifyLevel::Error,
            )
        }
    };

    let filename = generate_filename(&slugify(&card_name), "csv");
    let path = export_dir.join(&filename);

    match csv_export::write_dataset(&path, &dataset) {
        Ok(count) => Action::Notify(
            format!("Exported {} rows to {}", count, path.display()),
            NotifyLevel::Info,
        ),
        Err(e) => Action::Notify(format!("Export failed: {}", e), NotifyLevel::Error),
    }
}

fn export_dashboard_json(app: &mut App) -> Action {
    let Some(dashboard) = app.current_dashboard() else {
        return Action::Notify("No dashboard open".to_string(), NotifyLevel::Warn);
    };
    let name = dashboard.name.clone();

    let export_dir = match get_export_dir() {
        Ok(dir) => dir,
        Err(e) => {
            return Action::Notify(
                format!("Failed to create export directory: {}", e),
                NotifyLevel::Error,
            )
        }
    };

    let filename = generate_filename(&slugify(&name), "json");
    let path = export_dir.join(&filename);

    match json_export::write_dashboard(&path, app.store.dashboard()) {
        Ok(count) => Action::Notify(
            format!("Exported {} cards to {}", count, path.display()),
            NotifyLevel::Info,
        ),
        Err(e) => Action::Notify(format!("Export failed: {}", e), NotifyLevel::Error),
    }
}

fn export_items(app: &mut App) -> Action {
    let items = app.visible_browse_items().to_vec();
    if items.is_empty() {
        return Action::Notify("No items to export".to_string(), NotifyLevel::Warn);
    }

    let export_dir = match get_export_dir() {
        Ok(dir) => dir,
        Err(e) => {
            return Action::Notify(
                format!("Failed to create export directory: {}", e),
                NotifyLevel::Error,
            )
        }
    };

    let filename = generate_filename("items", "csv");
    let path = export_dir.join(&filename);

    match csv_export::write_items(&path, &items) {
        Ok(count) => Action::Notify(
            format!("Exported {} items to {}", count, path.display()),
            NotifyLevel::Info,
        ),
        Err(e) => Action::Notify(format!("Export failed: {}", e), NotifyLevel::Error),
    }
}

fn export_permissions(app: &mut App) -> Action {
    let Some(view) = app.permissions.clone() else {
        app.set_status("Permissions not loaded yet", StatusLevel::Warn);
        return Action::None;
    };
    if view.rows.is_empty() {
        return Action::Notify(
            "No permission rows to export".to_string(),
            NotifyLevel::Warn,
        );
    }

    let export_dir = match get_export_dir() {
        Ok(dir) => dir,
        Err(e) => {
            return Action::Notify(
                format!("Failed to create export directory: {}", e),
                NotifyLevel::Error,
            )
        }
    };

    let filename = generate_filename("permissions", "csv");
    let path = export_dir.join(&filename);

    match csv_export::write_permissions(&path, &view) {
        Ok(count) => Action::Notify(
            format!("Exported {} groups to {}", count, path.display()),
            NotifyLevel::Info,
        ),
        Err(e) => Action::Notify(format!("Export failed: {}", e), NotifyLevel::Error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_keeps_alphanumerics() {
        assert_eq!(slugify("Revenue Overview"), "revenue-overview");
        assert_eq!(slugify("  %% "), "export");
        assert_eq!(slugify("MRR"), "mrr");
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let mut app = App::new();
        let action = export_current_view(&mut app, Some("xlsx"));
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Warn)));
    }

    #[test]
    fn test_card_without_data_warns() {
        let mut app = App::new();
        app.open_dashboard(101);
        let action = export_card_csv(&mut app);
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Warn)));
    }
}

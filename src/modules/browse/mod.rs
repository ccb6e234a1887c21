//! Browse Module
//!
//! Opens collection items and maintains the bookmark list. Bookmarks
//! live in the local store, not on the server.

use crate::app::{App, BrowseSection, Focus, StatusLevel, Tab};
use crate::core::{Action, NavigateTarget, NotifyLevel};
use crate::domain::browse::ItemModel;

/// Open whatever the browse tab has selected: a collection from the
/// sidebar, or an item from the active list.
pub fn open_selected(app: &mut App) -> Action {
    match app.browse_section {
        BrowseSection::Collections => {
            if app.focus == Focus::Sidebar {
                match app.selected_collection_id() {
                    Some(id) => Action::Navigate(NavigateTarget::Collection(id)),
                    None => Action::None,
                }
            } else {
                match app.selected_browse_item().cloned() {
                    Some(item) => open_model(app, item.model, item.id, &item.name),
                    None => Action::None,
                }
            }
        }
        BrowseSection::Recents => {
            let recent = app.recent_items.get(app.selected_recent).cloned();
            match recent {
                Some(item) => open_stored(app, &item.model, item.model_id, &item.name),
                None => Action::None,
            }
        }
        BrowseSection::Bookmarks => {
            let bookmark = app.bookmarks.get(app.selected_bookmark).cloned();
            match bookmark {
                Some(item) => open_stored(app, &item.model, item.model_id, &item.name),
                None => Action::None,
            }
        }
    }
}

fn open_model(app: &mut App, model: ItemModel, id: u64, name: &str) -> Action {
    match model {
        ItemModel::Dashboard => Action::Navigate(NavigateTarget::Dashboard(id)),
        ItemModel::Card => {
            app.record_recent_view(ItemModel::Card, id, name);
            Action::Notify(
                format!("{name} is a saved question; only dashboards open here"),
                NotifyLevel::Info,
            )
        }
        ItemModel::Other => Action::None,
    }
}

fn open_stored(app: &mut App, model: &str, id: u64, name: &str) -> Action {
    match model {
        "dashboard" => open_model(app, ItemModel::Dashboard, id, name),
        "card" => open_model(app, ItemModel::Card, id, name),
        _ => Action::None,
    }
}

/// Bookmark the selected item, or drop it if it is already bookmarked.
pub fn toggle_bookmark(app: &mut App) -> Action {
    let Some((model, id, name)) = bookmark_target(app) else {
        return Action::Notify("Nothing to bookmark here".to_string(), NotifyLevel::Warn);
    };
    let Some(store) = &app.recents_store else {
        return Action::Notify(
            "Bookmarks unavailable without a local store".to_string(),
            NotifyLevel::Warn,
        );
    };

    let result = match store.is_bookmarked(&model, id) {
        Ok(true) => store.remove_bookmark(&model, id).map(|_| false),
        Ok(false) => store.add_bookmark(&model, id, &name).map(|_| true),
        Err(err) => Err(err),
    };
    match result {
        Ok(added) => {
            app.reload_bookmarks();
            let text = if added {
                format!("Bookmarked {name}")
            } else {
                format!("Removed bookmark {name}")
            };
            Action::Notify(text, NotifyLevel::Info)
        }
        Err(err) => {
            app.set_status(format!("Bookmark not saved: {err:#}"), StatusLevel::Warn);
            Action::None
        }
    }
}

/// What the bookmark toggle applies to, as a stored (model, id, name).
fn bookmark_target(app: &App) -> Option<(String, u64, String)> {
    match app.current_tab {
        Tab::Dashboard => {
            let dashboard = app.current_dashboard()?;
            Some((
                "dashboard".to_string(),
                dashboard.id,
                dashboard.name.clone(),
            ))
        }
        Tab::Browse => match app.browse_section {
            BrowseSection::Collections => {
                let item = app.selected_browse_item()?;
                let model = match item.model {
                    ItemModel::Dashboard => "dashboard",
                    ItemModel::Card => "card",
                    ItemModel::Other => return None,
                };
                Some((model.to_string(), item.id, item.name.clone()))
            }
            BrowseSection::Recents => {
                let item = app.recent_items.get(app.selected_recent)?;
                Some((item.model.clone(), item.model_id, item.name.clone()))
            }
            BrowseSection::Bookmarks => {
                let item = app.bookmarks.get(app.selected_bookmark)?;
                Some((item.model.clone(), item.model_id, item.name.clone()))
            }
        },
        Tab::Admin => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_selected_dashboard_navigates() {
        let mut app = App::new();
        // First root item is the Revenue Overview dashboard.
        let action = open_selected(&mut app);
        assert!(matches!(
            action,
            Action::Navigate(NavigateTarget::Dashboard(101))
        ));
    }

    #[test]
    fn test_open_selected_card_notifies() {
        let mut app = App::new();
        app.selected_item = 2; // "Conversion funnel" question
        let action = open_selected(&mut app);
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Info)));
    }

    #[test]
    fn test_bookmark_without_store_warns() {
        let mut app = App::new();
        assert!(app.recents_store.is_none());
        let action = toggle_bookmark(&mut app);
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Warn)));
    }

    #[test]
    fn test_bookmark_target_skips_admin_tab() {
        let mut app = App::new();
        app.set_tab(crate::app::Tab::Admin);
        assert!(bookmark_target(&app).is_none());
    }
}

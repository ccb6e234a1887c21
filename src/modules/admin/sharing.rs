//! Public links, embedding, and the approved-domains allowlist
//!
//! Public links and the embedding flag live on the dashboard record.
//! Approved domains are a server-wide setting, fetched and saved as a
//! newline list.

use crate::app::{App, DataMode, PromptKind, SIDEBAR_SHARING};
use crate::core::{Action, NotifyLevel};
use crate::domain::dashboard::DashboardAction;

/// `:share` creates a public link for the open dashboard. When one
/// already exists it is copied instead.
pub fn share(app: &mut App) -> Action {
    let Some(dashboard) = app.current_dashboard() else {
        return Action::Notify("No dashboard open".to_string(), NotifyLevel::Warn);
    };
    let dashboard_id = dashboard.id;
    if let Some(uuid) = dashboard.public_uuid.clone() {
        return Action::Copy(uuid);
    }

    match app.data_mode {
        DataMode::Mock => {
            app.apply_public_link(dashboard_id, format!("mock-{dashboard_id}-uuid"));
            Action::None
        }
        DataMode::Api => {
            app.pending_share_request = Some((dashboard_id, true));
            Action::Notify("Creating public link".to_string(), NotifyLevel::Info)
        }
    }
}

/// `:unshare` revokes the dashboard's public link.
pub fn unshare(app: &mut App) -> Action {
    let Some(dashboard) = app.current_dashboard() else {
        return Action::Notify("No dashboard open".to_string(), NotifyLevel::Warn);
    };
    let dashboard_id = dashboard.id;
    if dashboard.public_uuid.is_none() {
        return Action::Notify("Dashboard has no public link".to_string(), NotifyLevel::Info);
    }

    match app.data_mode {
        DataMode::Mock => {
            app.apply_public_link_revoked(dashboard_id);
            Action::None
        }
        DataMode::Api => {
            app.pending_share_request = Some((dashboard_id, false));
            Action::Notify("Revoking public link".to_string(), NotifyLevel::Info)
        }
    }
}

/// `:embed [on|off]` toggles signed embedding for the open dashboard.
/// Without an argument the current flag is flipped.
pub fn set_embedding(app: &mut App, enable: Option<bool>) -> Action {
    let Some(dashboard) = app.current_dashboard() else {
        return Action::Notify("No dashboard open".to_string(), NotifyLevel::Warn);
    };
    let dashboard_id = dashboard.id;
    let target = enable.unwrap_or(!dashboard.enable_embedding);
    if target == dashboard.enable_embedding {
        let text = if target {
            "Embedding already enabled"
        } else {
            "Embedding already disabled"
        };
        return Action::Notify(text.to_string(), NotifyLevel::Info);
    }

    match app.data_mode {
        DataMode::Mock => {
            app.apply_embedding_updated(dashboard_id, target);
            Action::None
        }
        DataMode::Api => {
            app.pending_embed_request = Some((dashboard_id, target));
            let text = if target {
                "Enabling embedding"
            } else {
                "Disabling embedding"
            };
            Action::Notify(text.to_string(), NotifyLevel::Info)
        }
    }
}

/// `:domains` with no argument edits the allowlist in a prompt,
/// seeded with the current value.
pub fn edit_domains(app: &mut App) -> Action {
    if app.data_mode == DataMode::Api && app.approved_domains.is_none() {
        app.pending_domains_read = true;
    }
    let seed = app.approved_domains.clone().unwrap_or_default();
    app.enter_prompt(PromptKind::Domains, None, &seed);
    Action::None
}

/// `:domains <list>` saves the embedding origin allowlist. An empty
/// list clears it.
pub fn save_domains(app: &mut App, domains: &str) -> Action {
    let domains = domains.trim();
    let value = if domains.is_empty() {
        None
    } else {
        Some(domains.to_string())
    };

    match app.data_mode {
        DataMode::Mock => {
            app.approved_domains = value;
            Action::Notify("Approved domains saved".to_string(), NotifyLevel::Info)
        }
        DataMode::Api => {
            app.pending_domains_write = Some(value.unwrap_or_default());
            Action::Notify("Saving approved domains".to_string(), NotifyLevel::Info)
        }
    }
}

/// Open the sharing sidebar for the open dashboard.
pub fn open_sidebar(app: &mut App) -> Action {
    if app.current_dashboard().is_none() {
        return Action::Notify("No dashboard open".to_string(), NotifyLevel::Warn);
    }
    app.dispatch(DashboardAction::SetSidebar {
        name: SIDEBAR_SHARING.to_string(),
        props: None,
    });
    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard_app(id: u64) -> App {
        let mut app = App::new();
        app.open_dashboard(id);
        app
    }

    #[test]
    fn test_share_creates_mock_link_and_copies_on_repeat() {
        let mut app = dashboard_app(101);
        let action = share(&mut app);
        assert!(matches!(action, Action::None));
        assert_eq!(
            app.current_dashboard().unwrap().public_uuid.as_deref(),
            Some("mock-101-uuid")
        );

        let again = share(&mut app);
        assert!(matches!(again, Action::Copy(ref uuid) if uuid == "mock-101-uuid"));
    }

    #[test]
    fn test_unshare_revokes_link() {
        let mut app = dashboard_app(102);
        assert!(app.current_dashboard().unwrap().public_uuid.is_some());

        unshare(&mut app);
        assert!(app.current_dashboard().unwrap().public_uuid.is_none());

        let again = unshare(&mut app);
        assert!(matches!(again, Action::Notify(_, NotifyLevel::Info)));
    }

    #[test]
    fn test_embed_toggle_flips_flag_without_dirtying() {
        let mut app = dashboard_app(101);
        assert!(!app.current_dashboard().unwrap().enable_embedding);

        set_embedding(&mut app, None);
        let dashboard = app.current_dashboard().unwrap();
        assert!(dashboard.enable_embedding);
        assert!(!dashboard.is_dirty);

        let noop = set_embedding(&mut app, Some(true));
        assert!(matches!(noop, Action::Notify(_, NotifyLevel::Info)));
    }

    #[test]
    fn test_save_domains_mock_updates_setting() {
        let mut app = dashboard_app(101);
        save_domains(&mut app, "https://a.example.com\nhttps://b.example.com");
        assert_eq!(
            app.approved_domains.as_deref(),
            Some("https://a.example.com\nhttps://b.example.com")
        );

        save_domains(&mut app, "");
        assert_eq!(app.approved_domains, None);
    }

    #[test]
    fn test_sharing_sidebar_opens_by_name() {
        let mut app = dashboard_app(101);
        open_sidebar(&mut app);
        assert_eq!(
            app.store.dashboard().sidebar.name.as_deref(),
            Some(SIDEBAR_SHARING)
        );
    }
}

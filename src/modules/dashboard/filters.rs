//! Filter values for the open dashboard
//!
//! Values are applied through `param=value` expressions, either typed
//! straight into the command bar or collected by the value prompt.
//! Setting a value re-runs the dashboard's cards.

use serde_json::Value;

use crate::app::{App, DashboardPane, PromptKind, StatusLevel, Tab};
use crate::core::{Action, NotifyLevel};
use crate::domain::dashboard::{DashboardAction, Parameter};

/// `:filter` applies a `param=value` argument. A bare parameter name
/// opens the value prompt instead, and no argument at all just focuses
/// the filter bar.
pub fn filter_command(app: &mut App, arg: Option<&str>) -> Action {
    let Some(arg) = arg.map(str::trim).filter(|s| !s.is_empty()) else {
        if app.current_dashboard().is_none() {
            return Action::Notify("No dashboard open".to_string(), NotifyLevel::Warn);
        }
        app.current_tab = Tab::Dashboard;
        app.dashboard_pane = DashboardPane::Filters;
        return Action::None;
    };

    if arg.contains('=') {
        apply_expression(app, arg);
        return Action::None;
    }

    let Some(parameter) = resolve_parameter(app, arg) else {
        return Action::Notify(format!("No filter named '{arg}'"), NotifyLevel::Warn);
    };
    app.enter_prompt(PromptKind::FilterValue, Some(parameter.id.clone()), "");
    Action::None
}

/// `:unfilter` clears a value, or in edit mode removes the parameter
/// from the dashboard definition entirely. Falls back to the filter
/// bar selection when no argument is given.
pub fn unfilter_command(app: &mut App, arg: Option<&str>) -> Action {
    let parameter = match arg.map(str::trim).filter(|s| !s.is_empty()) {
        Some(token) => resolve_parameter(app, token),
        None => app.selected_parameter_ref().cloned(),
    };
    let Some(parameter) = parameter else {
        return Action::Notify("No filter selected".to_string(), NotifyLevel::Warn);
    };

    if app.store.dashboard().is_editing.is_some() {
        return remove_parameter_definition(app, &parameter);
    }

    app.dispatch(DashboardAction::SetParameterValue {
        id: parameter.id,
        value: Value::Null,
    });
    app.rerun_cards();
    Action::Notify(format!("Cleared {}", parameter.name), NotifyLevel::Info)
}

/// Apply a `param=value` expression. An empty value clears the filter.
pub fn apply_expression(app: &mut App, expression: &str) {
    let Some((token, raw)) = expression.split_once('=') else {
        app.set_status(
            format!("Expected param=value, got '{expression}'"),
            StatusLevel::Warn,
        );
        return;
    };
    let token = token.trim();
    let raw = raw.trim();

    let Some(parameter) = resolve_parameter(app, token) else {
        app.set_status(format!("No filter named '{token}'"), StatusLevel::Warn);
        return;
    };

    if raw.is_empty() {
        app.dispatch(DashboardAction::SetParameterValue {
            id: parameter.id,
            value: Value::Null,
        });
        app.rerun_cards();
        app.set_status(format!("Cleared {}", parameter.name), StatusLevel::Info);
        return;
    }

    let value = parse_value(raw);
    app.dispatch(DashboardAction::SetParameterValue {
        id: parameter.id,
        value,
    });
    app.rerun_cards();
    app.set_status(format!("{} = {raw}", parameter.name), StatusLevel::Info);
}

/// Drop a parameter from the dashboard being edited. Its value and the
/// default go with it.
fn remove_parameter_definition(app: &mut App, parameter: &Parameter) -> Action {
    let Some(dashboard) = app.current_dashboard() else {
        return Action::Notify("No dashboard open".to_string(), NotifyLevel::Warn);
    };
    let dashboard_id = dashboard.id;
    let remaining: Vec<Parameter> = dashboard
        .parameters
        .iter()
        .filter(|p| p.id != parameter.id)
        .cloned()
        .collect();

    let mut attributes = serde_json::Map::new();
    match serde_json::to_value(&remaining) {
        Ok(parameters) => {
            attributes.insert("parameters".to_string(), parameters);
        }
        Err(err) => {
            return Action::Notify(format!("Remove filter failed: {err}"), NotifyLevel::Error);
        }
    }

    app.dispatch(DashboardAction::SetDashboardAttributes {
        id: dashboard_id,
        attributes,
        is_dirty: Some(true),
    });
    app.dispatch(DashboardAction::RemoveParameter {
        id: parameter.id.clone(),
    });
    app.selected_parameter = 0;
    Action::Notify(
        format!("Removed filter {}", parameter.name),
        NotifyLevel::Info,
    )
}

/// Match a token against the open dashboard's parameters by id, then
/// slug, then name. Slug and name matches ignore case.
fn resolve_parameter(app: &App, token: &str) -> Option<Parameter> {
    let dashboard = app.current_dashboard()?;
    let lowered = token.to_lowercase();
    dashboard
        .parameters
        .iter()
        .find(|p| p.id == token)
        .or_else(|| {
            dashboard
                .parameters
                .iter()
                .find(|p| p.slug.to_lowercase() == lowered)
        })
        .or_else(|| {
            dashboard
                .parameters
                .iter()
                .find(|p| p.name.to_lowercase() == lowered)
        })
        .cloned()
}

/// Read a raw value the way a user would type it: numbers and booleans
/// as themselves, comma lists as arrays, everything else as a string.
fn parse_value(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::from(f);
    }
    if let Ok(b) = raw.parse::<bool>() {
        return Value::Bool(b);
    }
    if raw.contains(',') {
        let parts: Vec<Value> = raw
            .split(',')
            .map(|part| Value::String(part.trim().to_string()))
            .collect();
        return Value::Array(parts);
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dashboard_app() -> App {
        let mut app = App::new();
        app.open_dashboard(101);
        app
    }

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("2.5"), json!(2.5));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(
            parse_value("CA, NY"),
            json!(["CA", "NY"]),
            "comma list becomes an array"
        );
        assert_eq!(parse_value("California"), json!("California"));
    }

    #[test]
    fn test_resolve_parameter_by_slug_ignores_case() {
        let app = dashboard_app();
        let found = resolve_parameter(&app, "STATE");
        assert_eq!(found.map(|p| p.id), Some("p_state".to_string()));
    }

    #[test]
    fn test_apply_expression_sets_and_clears_value() {
        let mut app = dashboard_app();
        apply_expression(&mut app, "state=California");
        assert_eq!(
            app.store.dashboard().parameter_values.get("p_state"),
            Some(&json!("California"))
        );

        apply_expression(&mut app, "state=");
        assert_eq!(
            app.store.dashboard().parameter_values.get("p_state"),
            Some(&Value::Null)
        );
    }

    #[test]
    fn test_unfilter_outside_edit_mode_keeps_definition() {
        let mut app = dashboard_app();
        apply_expression(&mut app, "state=California");

        let action = unfilter_command(&mut app, Some("state"));
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Info)));
        let dashboard = app.current_dashboard().unwrap();
        assert_eq!(dashboard.parameters.len(), 2, "definition survives");
        assert_eq!(
            app.store.dashboard().parameter_values.get("p_state"),
            Some(&Value::Null)
        );
    }

    #[test]
    fn test_unfilter_in_edit_mode_removes_definition() {
        let mut app = dashboard_app();
        apply_expression(&mut app, "state=California");
        crate::modules::dashboard::editing::enter(&mut app);

        unfilter_command(&mut app, Some("state"));
        let dashboard = app.current_dashboard().unwrap();
        assert_eq!(dashboard.parameters.len(), 1);
        assert!(dashboard.parameters.iter().all(|p| p.id != "p_state"));
        assert!(
            !app.store
                .dashboard()
                .parameter_values
                .contains_key("p_state"),
            "value goes with the definition"
        );
    }

    #[test]
    fn test_filter_with_unknown_name_warns() {
        let mut app = dashboard_app();
        let action = filter_command(&mut app, Some("nope"));
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Warn)));
    }

    #[test]
    fn test_bare_filter_token_opens_value_prompt() {
        let mut app = dashboard_app();
        let action = filter_command(&mut app, Some("state"));
        assert!(matches!(action, Action::None));
        assert!(matches!(
            app.input_mode,
            crate::app::InputMode::Prompt(PromptKind::FilterValue)
        ));
        assert_eq!(app.prompt_context.as_deref(), Some("p_state"));
    }
}

//! CSV Export
//!
//! Writes card results, item lists, and the permissions matrix to CSV
//! files.

use crate::app::PermissionsView;
use crate::domain::browse::CollectionItem;
use crate::domain::dashboard::CardDataset;
use serde_json::Value;
use std::path::Path;

/// Render a result cell the way it should read in a spreadsheet.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Write a card's result rows to CSV file
pub fn write_dataset(path: &Path, dataset: &CardDataset) -> Result<usize, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    // Write header
    wtr.write_record(&dataset.columns)?;

    // Write data rows
    for row in &dataset.rows {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        wtr.write_record(&cells)?;
    }

    wtr.flush()?;
    Ok(dataset.rows.len())
}

/// Write collection items to CSV file
pub fn write_items(path: &Path, items: &[CollectionItem]) -> Result<usize, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    // Write header
    wtr.write_record(["id", "model", "name", "description"])?;

    // Write data rows
    for item in items {
        wtr.write_record([
            item.id.to_string(),
            item.model.title().to_string(),
            item.name.clone(),
            item.description.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(items.len())
}

/// Write the permissions matrix to CSV file
pub fn write_permissions(path: &Path, view: &PermissionsView) -> Result<usize, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    // Write header
    let mut header = vec!["group".to_string()];
    header.extend(view.databases.iter().cloned());
    wtr.write_record(&header)?;

    // Write data rows
    for row in &view.rows {
        let mut record = vec![row.group.clone()];
        record.extend(row.levels.iter().cloned());
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(view.rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_text_flattens_json_values() {
        assert_eq!(cell_text(&Value::Null), "");
        assert_eq!(cell_text(&json!("plain")), "plain");
        assert_eq!(cell_text(&json!(42)), "42");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&json!(["a", "b"])), "[\"a\",\"b\"]");
    }
}

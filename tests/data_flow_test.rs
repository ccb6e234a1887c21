//! Comprehensive test for card query and dataset data flow

use serde_json::{json, Value};

#[test]
fn test_card_query_payload() {
    // 1. Applied filters as the dashboard holds them
    let applied: Vec<(&str, &str, Option<Value>)> = vec![
        ("abc123", "category", Some(json!("Widget"))),
        ("def456", "date/all-options", None),
        ("ghi789", "number/=", Some(json!(42))),
        ("jkl012", "string/=", Some(Value::Null)),
    ];

    // 2. Build the payload the same way the card round does: one object
    // per applied value, unset and null filters skipped
    let payload: Vec<Value> = applied
        .iter()
        .filter_map(|(id, kind, value)| {
            let value = value.as_ref()?;
            if value.is_null() {
                return None;
            }
            Some(json!({
                "id": id,
                "type": kind,
                "value": value,
            }))
        })
        .collect();

    println!("✓ Payload entries: {}", payload.len());
    assert_eq!(payload.len(), 2);

    // 3. Check entry fields
    let first = &payload[0];
    println!("  First entry:");
    println!("    id: {:?}", first.get("id"));
    println!("    type: {:?}", first.get("type"));
    println!("    value: {:?}", first.get("value"));

    assert_eq!(first.get("id").and_then(Value::as_str), Some("abc123"));
    assert_eq!(first.get("type").and_then(Value::as_str), Some("category"));
    assert_eq!(first.get("value").and_then(Value::as_str), Some("Widget"));

    let second = &payload[1];
    assert_eq!(second.get("id").and_then(Value::as_str), Some("ghi789"));
    assert_eq!(second.get("value").and_then(Value::as_u64), Some(42));

    // 4. The request body wraps them under "parameters"
    let body = json!({ "parameters": payload });
    let wrapped = body.get("parameters").and_then(Value::as_array);
    assert!(wrapped.is_some(), "Body should carry a parameters array");
    assert_eq!(wrapped.map(|p| p.len()), Some(2));

    println!("\n✓ All card query payload checks passed!");
}

#[test]
fn test_dataset_extraction() {
    // A query result in the shape the server returns
    let result = json!({
        "data": {
            "cols": [
                {"name": "month", "display_name": "Month"},
                {"name": "total", "display_name": "Total"}
            ],
            "rows": [
                ["2024-01", 120.0],
                ["2024-02", 180.5],
                ["2024-03", 90.0]
            ]
        }
    });

    // 1. Column labels
    let cols = result["data"]["cols"].as_array().expect("cols array");
    let columns: Vec<String> = cols
        .iter()
        .map(|c| {
            c.get("display_name")
                .or_else(|| c.get("name"))
                .and_then(Value::as_str)
                .unwrap_or("?")
                .to_string()
        })
        .collect();
    println!("✓ Columns: {:?}", columns);
    assert_eq!(columns, vec!["Month", "Total"]);

    // 2. Rows
    let rows = result["data"]["rows"].as_array().expect("rows array");
    println!("✓ Row count: {}", rows.len());
    assert_eq!(rows.len(), 3);

    // 3. Scalar cards read the first cell of the first row
    let scalar = rows
        .first()
        .and_then(|r| r.as_array())
        .and_then(|r| r.first());
    println!("  scalar cell: {:?}", scalar);
    assert!(scalar.is_some());

    // 4. Trend cards read the last column as a numeric series
    let series: Vec<f64> = rows
        .iter()
        .filter_map(|r| r.as_array())
        .filter_map(|r| r.last())
        .filter_map(Value::as_f64)
        .collect();
    println!("  series: {:?}", series);
    assert_eq!(series, vec![120.0, 180.5, 90.0]);

    println!("\n✓ All dataset extraction checks passed!");
}

#[test]
fn test_card_grid_scaling() {
    // Mirror the proportional mapping from grid units to terminal cells
    fn scaled(
        area_x: u16,
        area_w: u16,
        col: u32,
        size_x: u32,
        grid_cols: u32,
    ) -> (u16, u16) {
        let x0 = area_x as u32 + col * area_w as u32 / grid_cols;
        let x1 = area_x as u32 + (col + size_x) * area_w as u32 / grid_cols;
        (x0 as u16, (x1.saturating_sub(x0)).max(1) as u16)
    }

    // Three cards on an 18-unit row rendered into 90 terminal columns
    let grid_cols = 18;
    let (x_a, w_a) = scaled(0, 90, 0, 6, grid_cols);
    let (x_b, w_b) = scaled(0, 90, 6, 6, grid_cols);
    let (x_c, w_c) = scaled(0, 90, 12, 6, grid_cols);

    println!("  a: x={} w={}", x_a, w_a);
    println!("  b: x={} w={}", x_b, w_b);
    println!("  c: x={} w={}", x_c, w_c);

    // Cards tile the row without gaps or overlap
    assert_eq!(x_a, 0);
    assert_eq!(x_a + w_a, x_b);
    assert_eq!(x_b + w_b, x_c);
    assert_eq!(x_c + w_c, 90);

    // A sliver of a card never collapses to zero width
    let (_, w_tiny) = scaled(0, 10, 0, 1, 100);
    assert_eq!(w_tiny, 1);

    println!("✓ Grid scaling stays inside the area with no zero cells!");
}

#[test]
fn test_dashcard_ordering() {
    // Cards render top-to-bottom then left-to-right, ties broken by id
    let placements: Vec<(u64, u32, u32)> = vec![
        // (id, row, col)
        (31, 4, 0),
        (12, 0, 6),
        (11, 0, 0),
        (40, 4, 0),
    ];

    let mut ordered = placements.clone();
    ordered.sort_by_key(|&(id, row, col)| (row, col, id));

    let ids: Vec<u64> = ordered.iter().map(|&(id, _, _)| id).collect();
    println!("  ordered: {:?}", ids);
    assert_eq!(ids, vec![11, 12, 31, 40]);

    println!("✓ Dashcard ordering is row-major with stable ties!");
}

use serde_json::Value;

use crate::types::BillRecord;

/// Default selector for LegiScan-style JSON structures.
/// Extracts a bill record from a JSON value, tolerating both flat objects
/// and objects that nest the record under a "bill" key, plus the alternate
/// field spellings seen across feed endpoints.
pub fn bill_record_select_default(value: &Value) -> Option<BillRecord> {
    let map = match value {
        Value::Object(map) => map,
        _ => return None,
    };

    // Unwrap a nested bill object (detail endpoints wrap the record)
    if let Some(bill) = map.get("bill") {
        if bill.is_object() {
            return bill_record_select_default(bill);
        }
    }

    let title = select_str(map, &["title", "bill_title"])?;
    if title.trim().is_empty() {
        return None;
    }

    let description = select_str(map, &["description", "synopsis", "summary"]);
    let last_action = select_str(map, &["last_action", "latest_action"]);
    let last_action_date = select_str(map, &["last_action_date", "status_date"]);
    let number = select_str(map, &["number", "bill_number"]);
    let url = select_str(map, &["url", "state_link"]);
    let bill_id = map.get("bill_id").and_then(Value::as_u64);

    Some(BillRecord {
        bill_id,
        number,
        title,
        description,
        last_action,
        last_action_date,
        url,
    })
}

fn select_str(map: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(|s| s.to_string())
}

/// Operation modules: one HTTP request per input item
///
/// Each module turns resolved item parameters into a single CRM call and maps the
/// response into output records. Shared response-unwrapping rules live here.

pub mod create;
pub mod delete;
pub mod get;
pub mod get_all;
pub mod options;
pub mod update;

use crate::crm::OperationFailure;
use serde_json::{json, Map, Value};

/// Output records of one operation call, before pairing with the item index
pub type OperationOutput = Vec<Value>;

/// Return `response.<envelope>` when present, otherwise the whole response
pub(crate) fn unwrap_envelope(response: Value, envelope: &str) -> Value {
    match response {
        Value::Object(mut map) => match map.remove(envelope) {
            Some(entity) if !entity.is_null() => entity,
            Some(_) | None => Value::Object(map),
        },
        other => other,
    }
}

/// Attach `_meta.customColumns` from the response to a record when the server sent them
pub(crate) fn attach_meta(mut record: Value, custom_columns: Option<&Value>) -> Value {
    if let (Some(columns), Value::Object(map)) = (custom_columns, &mut record) {
        map.insert("_meta".to_string(), json!({ "customColumns": columns }));
    }
    record
}

/// `customColumns` of a response, ignoring nulls
pub(crate) fn custom_columns(response: &Value) -> Option<Value> {
    response.get("customColumns").filter(|c| !c.is_null()).cloned()
}

/// Record IDs are interpolated into the path; reject values that would change it
pub(crate) fn path_id(name: &str, id: String) -> Result<String, OperationFailure> {
    let id = id.trim();
    if id.is_empty() {
        return Err(OperationFailure::MissingParameter(name.to_string()));
    }
    if id.contains(['/', '?', '#', '\\']) || id == "." || id == ".." {
        return Err(OperationFailure::InvalidParameter {
            name: name.to_string(),
            reason: format!("\"{}\" is not a valid record ID", id),
        });
    }
    Ok(id.to_string())
}

/// Empty JSON object
pub(crate) fn object() -> Map<String, Value> {
    Map::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_is_unwrapped_when_present() {
        let response = json!({ "contact": { "id": "c1" }, "customColumns": [] });
        assert_eq!(unwrap_envelope(response, "contact"), json!({ "id": "c1" }));
    }

    #[test]
    fn response_passes_through_without_envelope() {
        let response = json!({ "id": "c1", "firstName": "Ada" });
        assert_eq!(unwrap_envelope(response.clone(), "contact"), response);
    }

    #[test]
    fn meta_is_attached_only_with_custom_columns() {
        let columns = json!([{ "id": "col1", "label": "Tier" }]);
        let record = attach_meta(json!({ "id": "d1" }), Some(&columns));
        assert_eq!(record["_meta"]["customColumns"], columns);

        let record = attach_meta(json!({ "id": "d1" }), None);
        assert!(record.get("_meta").is_none());
    }

    #[test]
    fn ids_with_path_characters_are_rejected() {
        assert!(path_id("contactId", "../users".to_string()).is_err());
        assert_eq!(path_id("contactId", " c1 ".to_string()).unwrap(), "c1");
    }

    #[test]
    fn blank_and_dot_segment_ids_are_rejected() {
        assert!(matches!(
            path_id("contactId", "   ".to_string()),
            Err(OperationFailure::MissingParameter(name)) if name == "contactId"
        ));
        for id in [".", "..", " .. ", "a\\b"] {
            assert!(matches!(
                path_id("contactId", id.to_string()),
                Err(OperationFailure::InvalidParameter { .. })
            ));
        }
        assert_eq!(path_id("contactId", "c1.v2".to_string()).unwrap(), "c1.v2");
    }
}

/// List records: POST /{collection}/search
///
/// Fetches a single page. `returnAll` only widens that page to the maximum size; records
/// beyond it are not fetched.

use super::{attach_meta, custom_columns, OperationOutput};
use crate::crm::{CrmClient, CrmError, OperationFailure};
use crate::resources::ResourceDescriptor;
use crate::workflow::params::{invalid, value_to_number, value_to_string, NodeParameters};
use serde_json::{json, Value};

/// Largest page the API accepts; also the page size used for `returnAll`
pub const MAX_PAGE_SIZE: u64 = 1000;

/// Page size when neither `returnAll` nor `limit` is given
pub const DEFAULT_LIMIT: u64 = 25;

const SORT_DIRECTIONS: [&str; 2] = ["asc", "desc"];

/// Build the search request body
pub fn build_body(
    descriptor: &ResourceDescriptor,
    params: &NodeParameters,
) -> Result<Value, OperationFailure> {
    let page_size = if params.bool_or("returnAll", false)? {
        MAX_PAGE_SIZE
    } else {
        limit(params)?
    };

    let mut body = json!({
        "pagination": { "page": 1, "pageSize": page_size }
    });

    let additional = params.collection("additionalFields")?;

    if let Some(term) = additional.get("searchTerm").filter(|v| !v.is_null()) {
        let term = value_to_string("searchTerm", term)?;
        if !term.is_empty() {
            body["searchTerm"] = Value::String(term);
        }
    }

    if let Some(sort_by) = additional.get("sortBy").filter(|v| !v.is_null()) {
        let field = value_to_string("sortBy", sort_by)?;
        if !field.is_empty() {
            if !descriptor.sort_fields.contains(&field.as_str()) {
                return Err(invalid(
                    "sortBy",
                    format!("cannot sort {} by \"{}\"", descriptor.collection, field),
                ));
            }

            let direction = match additional.get("sortDirection").filter(|v| !v.is_null()) {
                Some(dir) => value_to_string("sortDirection", dir)?,
                None => "asc".to_string(),
            };
            let direction = if direction.is_empty() { "asc".to_string() } else { direction };
            if !SORT_DIRECTIONS.contains(&direction.as_str()) {
                return Err(invalid("sortDirection", format!("\"{}\" is not asc or desc", direction)));
            }

            body["sortDescriptor"] = json!({ "field": field, "direction": direction });
        }
    }

    Ok(body)
}

fn limit(params: &NodeParameters) -> Result<u64, OperationFailure> {
    let Some(raw) = params.get("limit") else {
        return Ok(DEFAULT_LIMIT);
    };
    let limit = value_to_number("limit", raw)?;
    if limit.fract() != 0.0 || limit < 1.0 || limit > MAX_PAGE_SIZE as f64 {
        return Err(invalid(
            "limit",
            format!("must be a whole number between 1 and {}, got {}", MAX_PAGE_SIZE, limit),
        ));
    }
    Ok(limit as u64)
}

pub async fn execute(
    client: &CrmClient,
    descriptor: &ResourceDescriptor,
    params: &NodeParameters,
) -> Result<OperationOutput, OperationFailure> {
    let body = build_body(descriptor, params)?;
    tracing::debug!("📋 Searching {} (pageSize {})", descriptor.collection, body["pagination"]["pageSize"]);

    let response = client.post(&descriptor.search_path(), &body).await?;
    let columns = custom_columns(&response);

    let items = match response.get("items") {
        Some(Value::Array(items)) => items.clone(),
        _ => {
            return Err(CrmError::Decode(format!(
                "search response for {} has no items array",
                descriptor.collection
            ))
            .into())
        }
    };

    tracing::debug!("📦 {} {} record(s) returned", items.len(), descriptor.collection);

    Ok(items
        .into_iter()
        .map(|record| attach_meta(record, columns.as_ref()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{descriptor, Resource};

    fn params(value: Value) -> NodeParameters {
        NodeParameters::resolve(&value, &json!({}), 0)
    }

    #[test]
    fn return_all_widens_single_page() {
        let body = build_body(
            descriptor(Resource::Contact),
            &params(json!({ "returnAll": true, "limit": 5 })),
        )
        .unwrap();
        assert_eq!(body, json!({ "pagination": { "page": 1, "pageSize": 1000 } }));
    }

    #[test]
    fn limit_defaults_to_twenty_five() {
        let body = build_body(descriptor(Resource::Deal), &params(json!({}))).unwrap();
        assert_eq!(body["pagination"]["pageSize"], json!(25));
    }

    #[test]
    fn limit_outside_range_is_rejected() {
        for bad in [json!(0), json!(1001), json!(2.5)] {
            let result = build_body(descriptor(Resource::Deal), &params(json!({ "limit": bad })));
            assert!(result.is_err());
        }
    }

    #[test]
    fn sort_direction_defaults_to_ascending() {
        let body = build_body(
            descriptor(Resource::Task),
            &params(json!({
                "limit": 10,
                "additionalFields": { "searchTerm": "call", "sortBy": "type" }
            })),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({
                "pagination": { "page": 1, "pageSize": 10 },
                "searchTerm": "call",
                "sortDescriptor": { "field": "type", "direction": "asc" }
            })
        );
    }

    #[test]
    fn empty_search_term_is_omitted() {
        let body = build_body(
            descriptor(Resource::Contact),
            &params(json!({ "additionalFields": { "searchTerm": "" } })),
        )
        .unwrap();
        assert!(body.get("searchTerm").is_none());
    }

    #[test]
    fn task_only_sort_field_is_rejected_elsewhere() {
        let result = build_body(
            descriptor(Resource::Contact),
            &params(json!({ "additionalFields": { "sortBy": "type" } })),
        );
        assert!(result.is_err());
    }
}

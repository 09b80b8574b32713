/// Option loaders backing the node's dropdowns
///
/// Each loader issues one request and maps the result to `{ name, value }` pairs. Failures
/// are logged and produce an empty list so an unreachable CRM never breaks the editor.

use crate::crm::{CrmClient, CrmError, OperationFailure};
use crate::resources::catalog::OptionLabel;
use crate::resources::{descriptor, Resource};
use serde::Serialize;
use serde_json::{json, Value};
use std::str::FromStr;

use super::get_all::MAX_PAGE_SIZE;

/// One dropdown entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    pub name: String,
    pub value: String,
}

/// What a loader lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSource {
    /// Workspace users
    Users,
    /// Records of a resource
    Records(Resource),
    /// Custom columns configured for a resource
    CustomColumns(Resource),
}

impl OptionSource {
    /// Loader method name as referenced by the node definition
    pub fn method_name(&self) -> String {
        match self {
            OptionSource::Users => "loadUserOptions".to_string(),
            OptionSource::Records(r) => format!("load{}Options", descriptor(*r).display_name),
            OptionSource::CustomColumns(r) => {
                format!("load{}CustomColumnOptions", descriptor(*r).display_name)
            }
        }
    }

    /// Every available loader
    pub fn all() -> Vec<OptionSource> {
        let mut sources = vec![OptionSource::Users];
        sources.extend(Resource::ALL.into_iter().map(OptionSource::Records));
        sources.extend(Resource::ALL.into_iter().map(OptionSource::CustomColumns));
        sources
    }
}

impl FromStr for OptionSource {
    type Err = OperationFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionSource::all()
            .into_iter()
            .find(|source| source.method_name() == s)
            .ok_or_else(|| OperationFailure::InvalidParameter {
                name: "method".to_string(),
                reason: format!("unknown option loader \"{}\"", s),
            })
    }
}

/// Run a loader; errors yield an empty list
pub async fn load_options(client: &CrmClient, source: OptionSource) -> Vec<OptionEntry> {
    match fetch_options(client, source).await {
        Ok(options) => {
            tracing::debug!("📋 {} returned {} option(s)", source.method_name(), options.len());
            options
        }
        Err(e) => {
            tracing::warn!("⚠️ {} failed, returning no options: {}", source.method_name(), e);
            Vec::new()
        }
    }
}

async fn fetch_options(client: &CrmClient, source: OptionSource) -> Result<Vec<OptionEntry>, CrmError> {
    let search_body = json!({ "pagination": { "page": 1, "pageSize": MAX_PAGE_SIZE } });

    let entries = match source {
        OptionSource::Users => {
            let response = client.post("/users/search", &search_body).await?;
            list(&response, "items")
                .iter()
                .filter_map(|user| {
                    let full_name = format!("{} {}", text(user, "firstName"), text(user, "lastName"));
                    let full_name = full_name.trim();
                    let name = if full_name.is_empty() { text(user, "email") } else { full_name };
                    entry(name, user.get("id"))
                })
                .collect()
        }
        OptionSource::Records(resource) => {
            let row = descriptor(resource);
            let response = client.post(&row.search_path(), &search_body).await?;
            list(&response, "items")
                .iter()
                .filter_map(|record| {
                    let label = match row.option_label {
                        OptionLabel::Name => text(record, "name").to_string(),
                        OptionLabel::PersonName => {
                            format!("{} {}", text(record, "firstName"), text(record, "lastName"))
                                .trim()
                                .to_string()
                        }
                    };
                    entry(&label, record.get("id"))
                })
                .collect()
        }
        OptionSource::CustomColumns(resource) => {
            let response = client.get(&descriptor(resource).configuration_path()).await?;
            list(&response, "customColumns")
                .iter()
                .filter_map(|column| entry(text(column, "label"), column.get("id")))
                .collect()
        }
    };

    Ok(entries)
}

fn list<'a>(response: &'a Value, key: &str) -> &'a [Value] {
    response
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn text<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Entry labelled `name`, falling back to the ID when the label is blank
fn entry(name: &str, id: Option<&Value>) -> Option<OptionEntry> {
    let id = match id? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let name = if name.trim().is_empty() { id.clone() } else { name.to_string() };
    Some(OptionEntry { name, value: id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrmConfig;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CrmClient {
        CrmClient::new(&CrmConfig::new(server.uri(), "test-key")).unwrap()
    }

    #[test]
    fn method_names_round_trip() {
        for source in OptionSource::all() {
            assert_eq!(source.method_name().parse::<OptionSource>().unwrap(), source);
        }
        assert_eq!(
            "loadContactCustomColumnOptions".parse::<OptionSource>().unwrap(),
            OptionSource::CustomColumns(Resource::Contact)
        );
    }

    #[tokio::test]
    async fn user_labels_fall_back_to_email() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/users/search"))
            .and(body_json(json!({ "pagination": { "page": 1, "pageSize": 1000 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "id": "u1", "firstName": "Grace", "lastName": "Hopper", "email": "grace@example.com" },
                    { "id": "u2", "firstName": "", "lastName": "", "email": "ops@example.com" }
                ]
            })))
            .mount(&mock_server)
            .await;

        let options = load_options(&client_for(&mock_server), OptionSource::Users).await;
        assert_eq!(
            options,
            vec![
                OptionEntry { name: "Grace Hopper".to_string(), value: "u1".to_string() },
                OptionEntry { name: "ops@example.com".to_string(), value: "u2".to_string() },
            ]
        );
    }

    #[tokio::test]
    async fn custom_column_labels_fall_back_to_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/organizations/configuration"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "customColumns": [{ "id": "col-1", "label": "Industry" }, { "id": "col-2" }]
            })))
            .mount(&mock_server)
            .await;

        let options = load_options(
            &client_for(&mock_server),
            OptionSource::CustomColumns(Resource::Organization),
        )
        .await;
        assert_eq!(options[0].name, "Industry");
        assert_eq!(options[1].name, "col-2");
    }

    #[tokio::test]
    async fn failures_yield_empty_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/deals/search"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "invalid key" })))
            .mount(&mock_server)
            .await;

        let options = load_options(&client_for(&mock_server), OptionSource::Records(Resource::Deal)).await;
        assert!(options.is_empty());
    }
}

/// Webhook event vocabulary
///
/// Events are named `<resource>.<action>`, e.g. `deal.updated`.

use crate::resources::Resource;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Lifecycle action reported by the CRM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventAction {
    Created,
    Updated,
    Deleted,
}

impl EventAction {
    pub const ALL: [EventAction; 3] = [EventAction::Created, EventAction::Updated, EventAction::Deleted];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::Created => "created",
            EventAction::Updated => "updated",
            EventAction::Deleted => "deleted",
        }
    }
}

/// A CRM webhook event such as `contact.created`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WebhookEvent {
    pub resource: Resource,
    pub action: EventAction,
}

impl WebhookEvent {
    pub fn new(resource: Resource, action: EventAction) -> Self {
        Self { resource, action }
    }

    /// All fifteen events the CRM can send
    pub fn all() -> Vec<WebhookEvent> {
        Resource::ALL
            .into_iter()
            .flat_map(|resource| EventAction::ALL.into_iter().map(move |action| WebhookEvent::new(resource, action)))
            .collect()
    }
}

impl fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource, self.action.as_str())
    }
}

/// Error for event names outside the vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown webhook event: {0}")]
pub struct UnknownEvent(pub String);

impl FromStr for WebhookEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (resource, action) = s.split_once('.').ok_or_else(|| UnknownEvent(s.to_string()))?;
        let resource = resource.parse::<Resource>().map_err(|_| UnknownEvent(s.to_string()))?;
        let action = EventAction::ALL
            .into_iter()
            .find(|a| a.as_str() == action)
            .ok_or_else(|| UnknownEvent(s.to_string()))?;
        Ok(WebhookEvent::new(resource, action))
    }
}

impl Serialize for WebhookEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WebhookEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vocabulary_has_fifteen_events() {
        let all = WebhookEvent::all();
        assert_eq!(all.len(), 15);
        assert!(all.contains(&"service.deleted".parse().unwrap()));
    }

    #[test]
    fn events_serialize_as_dotted_names() {
        let event = WebhookEvent::new(Resource::Organization, EventAction::Updated);
        assert_eq!(serde_json::to_value(event).unwrap(), json!("organization.updated"));
        let parsed: WebhookEvent = serde_json::from_value(json!("task.created")).unwrap();
        assert_eq!(parsed, WebhookEvent::new(Resource::Task, EventAction::Created));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!("invoice.created".parse::<WebhookEvent>().is_err());
        assert!("contact.merged".parse::<WebhookEvent>().is_err());
        assert!("contact".parse::<WebhookEvent>().is_err());
    }
}

//! Persona event types, envelope schema, and in-process event bus.
//!
//! Every successful persona mutation is published as an [`EventEnvelope`]
//! wrapping a [`PersonaEvent`]. Downstream consumers (audit, analytics,
//! cache invalidation) subscribe independently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

// ============================================================================
// Event Envelope
// ============================================================================

/// Who or what caused an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventActor {
    /// `"system"` or `"user"`.
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl EventActor {
    /// Internal processes (seeding, migrations).
    pub fn system() -> Self {
        Self {
            kind: "system".to_string(),
            id: None,
        }
    }

    pub fn user(id: impl Into<String>) -> Self {
        Self {
            kind: "user".to_string(),
            id: Some(id.into()),
        }
    }
}

/// Optional emission context attached via [`EventBus::emit_with_context`].
#[derive(Debug, Clone, Default)]
pub struct EventContext {
    /// Organization the event belongs to.
    pub tenant_id: Option<String>,
    /// Defaults to the system actor.
    pub actor: Option<EventActor>,
    pub correlation_id: Option<Uuid>,
}

impl EventContext {
    /// Context for an operation performed by `user_id` inside an organization.
    pub fn for_user(user_id: impl Into<String>, organization_id: impl Into<String>) -> Self {
        Self {
            tenant_id: Some(organization_id.into()),
            actor: Some(EventActor::user(user_id)),
            correlation_id: None,
        }
    }

    pub fn with_correlation(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }
}

/// Versioned event envelope.
///
/// `event_type` is dot-namespaced (`"persona.switched"`). `payload_version`
/// starts at `1` and increments only on breaking payload changes; consumers
/// ignore unknown fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// UUIDv7, so ids sort by emission time.
    pub event_id: Uuid,
    pub event_type: String,
    pub occurred_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub actor: EventActor,
    /// Persona the event relates to.
    pub entity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<Uuid>,
    pub payload_version: u32,
    pub payload: PersonaEvent,
}

impl EventEnvelope {
    /// Envelope with the system actor and no tenant.
    pub fn new(event: PersonaEvent) -> Self {
        Self::with_context(event, EventContext::default())
    }

    pub fn with_context(event: PersonaEvent, ctx: EventContext) -> Self {
        Self {
            event_id: crate::uuid_utils::new_v7(),
            event_type: event.namespaced_event_type().to_string(),
            occurred_at: Utc::now(),
            tenant_id: ctx.tenant_id,
            actor: ctx.actor.unwrap_or_else(EventActor::system),
            entity_id: event.entity_id().to_string(),
            correlation_id: ctx.correlation_id,
            payload_version: 1,
            payload: event,
        }
    }
}

// ============================================================================
// Persona Event (domain payloads)
// ============================================================================

/// Persona domain events, serialized with a `type` tag:
/// `{"type":"PersonaSwitched","user_id":"...","persona_id":"..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PersonaEvent {
    PersonaCreated {
        persona_id: String,
        name: String,
        created_by: String,
        is_public: bool,
    },
    PersonaUpdated {
        persona_id: String,
        /// Wire names of the fields the update touched.
        changed_fields: Vec<String>,
    },
    PersonaDeleted {
        persona_id: String,
    },
    PersonaSwitched {
        user_id: String,
        persona_id: String,
        previous_persona_id: String,
    },
    PersonaShared {
        persona_id: String,
        shared_with: Vec<String>,
    },
    PersonaFavorited {
        user_id: String,
        persona_id: String,
        /// False when the favorite was removed.
        favorite: bool,
    },
}

impl PersonaEvent {
    /// Variant name, matching the `type` tag.
    pub fn event_type(&self) -> &'static str {
        match self {
            PersonaEvent::PersonaCreated { .. } => "PersonaCreated",
            PersonaEvent::PersonaUpdated { .. } => "PersonaUpdated",
            PersonaEvent::PersonaDeleted { .. } => "PersonaDeleted",
            PersonaEvent::PersonaSwitched { .. } => "PersonaSwitched",
            PersonaEvent::PersonaShared { .. } => "PersonaShared",
            PersonaEvent::PersonaFavorited { .. } => "PersonaFavorited",
        }
    }

    /// Namespaced event type for the envelope (e.g. `"persona.created"`).
    pub fn namespaced_event_type(&self) -> &'static str {
        match self {
            PersonaEvent::PersonaCreated { .. } => "persona.created",
            PersonaEvent::PersonaUpdated { .. } => "persona.updated",
            PersonaEvent::PersonaDeleted { .. } => "persona.deleted",
            PersonaEvent::PersonaSwitched { .. } => "persona.switched",
            PersonaEvent::PersonaShared { .. } => "persona.shared",
            PersonaEvent::PersonaFavorited { .. } => "persona.favorited",
        }
    }

    pub fn entity_id(&self) -> &str {
        match self {
            PersonaEvent::PersonaCreated { persona_id, .. }
            | PersonaEvent::PersonaUpdated { persona_id, .. }
            | PersonaEvent::PersonaDeleted { persona_id }
            | PersonaEvent::PersonaSwitched { persona_id, .. }
            | PersonaEvent::PersonaShared { persona_id, .. }
            | PersonaEvent::PersonaFavorited { persona_id, .. } => persona_id.as_str(),
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Broadcast fan-out of enveloped persona events.
///
/// Receivers that fall behind the buffer get `Lagged` and miss events.
pub struct EventBus {
    tx: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit with the system actor. Dropped silently without subscribers.
    pub fn emit(&self, event: PersonaEvent) {
        self.send(EventEnvelope::new(event));
    }

    pub fn emit_with_context(&self, event: PersonaEvent, ctx: EventContext) {
        self.send(EventEnvelope::with_context(event, ctx));
    }

    fn send(&self, envelope: EventEnvelope) {
        let subscriber_count = self.tx.receiver_count();
        tracing::debug!(
            event_type = %envelope.event_type,
            event_id = %envelope.event_id,
            entity_id = %envelope.entity_id,
            subscriber_count,
            "EventBus emit"
        );
        let _ = self.tx.send(envelope);
    }

    /// Each subscriber gets its own independent stream.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(crate::defaults::EVENT_BUS_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switched() -> PersonaEvent {
        PersonaEvent::PersonaSwitched {
            user_id: "u1".to_string(),
            persona_id: "team-leader".to_string(),
            previous_persona_id: "individual-contributor".to_string(),
        }
    }

    #[tokio::test]
    async fn test_event_bus_emit_subscribe() {
        let bus = EventBus::new(32);
        let mut rx = bus.subscribe();

        bus.emit(switched());

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.event_type, "persona.switched");
        assert_eq!(envelope.entity_id, "team-leader");
        assert_eq!(envelope.payload_version, 1);
        assert_eq!(envelope.actor.kind, "system");
        assert!(envelope.tenant_id.is_none());
        assert!(crate::uuid_utils::is_v7(&envelope.event_id));
    }

    #[tokio::test]
    async fn test_event_bus_multiple_subscribers() {
        let bus = EventBus::new(32);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.emit(PersonaEvent::PersonaDeleted {
            persona_id: "p1".to_string(),
        });

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1.event_id, e2.event_id);
        assert_eq!(e1.event_type, "persona.deleted");
    }

    #[test]
    fn test_event_bus_no_subscribers_ok() {
        let bus = EventBus::new(4);
        bus.emit(switched());
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_emit_with_context() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        let correlation = crate::uuid_utils::new_v7();

        bus.emit_with_context(
            switched(),
            EventContext::for_user("u1", "org-1").with_correlation(correlation),
        );

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.actor, EventActor::user("u1"));
        assert_eq!(envelope.tenant_id.as_deref(), Some("org-1"));
        assert_eq!(envelope.correlation_id, Some(correlation));
    }

    #[test]
    fn test_payload_wire_format() {
        let json = serde_json::to_value(EventEnvelope::new(switched())).unwrap();
        assert_eq!(json["event_type"], "persona.switched");
        assert_eq!(json["payload"]["type"], "PersonaSwitched");
        assert_eq!(json["payload"]["previous_persona_id"], "individual-contributor");
        assert!(json.get("correlation_id").is_none());
    }

    #[test]
    fn test_event_type_names_agree() {
        let events = [
            PersonaEvent::PersonaCreated {
                persona_id: "p".into(),
                name: "n".into(),
                created_by: "u".into(),
                is_public: false,
            },
            PersonaEvent::PersonaUpdated {
                persona_id: "p".into(),
                changed_fields: vec![],
            },
            PersonaEvent::PersonaShared {
                persona_id: "p".into(),
                shared_with: vec!["u2".into()],
            },
            PersonaEvent::PersonaFavorited {
                user_id: "u".into(),
                persona_id: "p".into(),
                favorite: true,
            },
        ];
        for event in &events {
            assert!(event.namespaced_event_type().starts_with("persona."));
            assert_eq!(event.entity_id(), "p");
            let json = serde_json::to_value(event).unwrap();
            assert_eq!(json["type"], event.event_type());
        }
    }
}

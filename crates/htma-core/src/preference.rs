//! Per-user persona selection state and its transitions.
//!
//! A [`UserPersonaPreference`] always has exactly one current persona. The
//! transitions here are pure: they mutate the record in memory and leave
//! persistence to a [`PreferenceStore`](crate::traits::PreferenceStore).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the session history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionEntry {
    /// Persona that was active until `used_at`.
    pub persona_id: String,
    pub used_at: DateTime<Utc>,
    /// Minutes the persona stayed active, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

/// Persona selection state of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPersonaPreference {
    pub user_id: String,
    pub current_persona_id: String,
    /// Most recent first, deduplicated, bounded.
    pub recent_personas: Vec<String>,
    /// Custom personas owned by the user.
    pub custom_personas: Vec<String>,
    pub favorite_personas: Vec<String>,
    /// Append log, newest first. Not deduplicated.
    pub session_persona_history: Vec<SessionEntry>,
    pub updated_at: DateTime<Utc>,
}

impl UserPersonaPreference {
    /// First-access record pointing at the default persona.
    pub fn new(
        user_id: impl Into<String>,
        default_persona_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let current = default_persona_id.into();
        Self {
            user_id: user_id.into(),
            recent_personas: vec![current.clone()],
            current_persona_id: current,
            custom_personas: Vec::new(),
            favorite_personas: Vec::new(),
            session_persona_history: Vec::new(),
            updated_at: now,
        }
    }

    /// Make `persona_id` the current persona.
    ///
    /// The outgoing persona is pushed to the head of the history log even
    /// when it equals `persona_id`. `persona_id` moves to the front of the
    /// recent list, which is then truncated to `max_recent`. Returns the
    /// previous persona id.
    pub fn switch_persona(
        &mut self,
        persona_id: &str,
        max_recent: usize,
        now: DateTime<Utc>,
    ) -> String {
        let previous = std::mem::replace(&mut self.current_persona_id, persona_id.to_string());

        // The head entry's timestamp is when `previous` became active.
        let duration = self
            .session_persona_history
            .first()
            .map(|head| (now - head.used_at).num_minutes().max(0));

        self.session_persona_history.insert(
            0,
            SessionEntry {
                persona_id: previous.clone(),
                used_at: now,
                duration,
            },
        );

        self.recent_personas.retain(|id| id != persona_id);
        self.recent_personas.insert(0, persona_id.to_string());
        self.recent_personas.truncate(max_recent);

        self.updated_at = now;
        previous
    }

    /// Add or remove a favorite. Returns true when the persona is now a
    /// favorite.
    pub fn toggle_favorite(&mut self, persona_id: &str, now: DateTime<Utc>) -> bool {
        let was_favorite = self.is_favorite(persona_id);
        if was_favorite {
            self.favorite_personas.retain(|id| id != persona_id);
        } else {
            self.favorite_personas.push(persona_id.to_string());
        }
        self.updated_at = now;
        !was_favorite
    }

    /// Register a custom persona owned by this user.
    pub fn add_custom(&mut self, persona_id: &str, now: DateTime<Utc>) {
        if !self.custom_personas.iter().any(|id| id == persona_id) {
            self.custom_personas.push(persona_id.to_string());
        }
        self.updated_at = now;
    }

    /// Drop every reference to a deleted persona except history entries.
    ///
    /// The current persona is never touched; callers must switch away first.
    pub fn forget_persona(&mut self, persona_id: &str, now: DateTime<Utc>) {
        self.recent_personas.retain(|id| id != persona_id);
        self.custom_personas.retain(|id| id != persona_id);
        self.favorite_personas.retain(|id| id != persona_id);
        self.updated_at = now;
    }

    pub fn is_current(&self, persona_id: &str) -> bool {
        self.current_persona_id == persona_id
    }

    pub fn is_favorite(&self, persona_id: &str) -> bool {
        self.favorite_personas.iter().any(|id| id == persona_id)
    }

    pub fn is_recent(&self, persona_id: &str) -> bool {
        self.recent_personas.iter().any(|id| id == persona_id)
    }
}

//! Storage seams for persona state.
//!
//! Concrete backends implement these traits; the persona service is written
//! against them only.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::persona::PersonaProfile;
use crate::preference::UserPersonaPreference;

// =============================================================================
// PERSONA REPOSITORY
// =============================================================================

/// Storage of custom (organizational and personal) persona profiles.
///
/// Predefined personas never pass through a repository.
#[async_trait]
pub trait PersonaRepository: Send + Sync {
    /// Insert a new profile. Fails with `InvalidInput` if the id is taken.
    async fn insert(&self, profile: PersonaProfile) -> Result<()>;

    /// Fetch a profile by id.
    async fn get(&self, id: &str) -> Result<Option<PersonaProfile>>;

    /// Replace a stored profile. Fails with `PersonaNotFound` if absent.
    async fn update(&self, profile: PersonaProfile) -> Result<()>;

    /// Count one activation of a profile without touching its other fields.
    /// Fails with `PersonaNotFound` if absent.
    async fn record_use(&self, id: &str, now: DateTime<Utc>) -> Result<()>;

    /// Remove a profile and its share grants. Returns false if absent.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// All profiles belonging to an organization.
    async fn list_for_organization(&self, organization_id: &str) -> Result<Vec<PersonaProfile>>;

    /// Number of profiles created by a user.
    async fn count_owned_by(&self, user_id: &str) -> Result<usize>;

    /// Grant users access to a profile. Existing grants are kept.
    async fn grant_share(&self, id: &str, user_ids: &[String]) -> Result<()>;

    /// Ids of the profiles shared with a user.
    async fn shared_with(&self, user_id: &str) -> Result<Vec<String>>;

    /// Users a profile has been shared with.
    async fn share_recipients(&self, id: &str) -> Result<Vec<String>>;
}

// =============================================================================
// PREFERENCE STORE
// =============================================================================

/// Storage of per-user persona preferences.
///
/// Writes are whole-record replacements; concurrent writers resolve as
/// last-writer-wins.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn load(&self, user_id: &str) -> Result<Option<UserPersonaPreference>>;

    async fn save(&self, preference: UserPersonaPreference) -> Result<()>;

    /// Users whose current persona is `persona_id`.
    async fn users_with_current(&self, persona_id: &str) -> Result<Vec<String>>;
}

//! In-memory implementations of the persona storage traits.
//!
//! State lives behind `tokio::sync::RwLock`s and is lost on drop. Handles are
//! cheap to clone and share the same state.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use htma_core::{
    Error, PersonaProfile, PersonaRepository, PreferenceStore, Result, UserPersonaPreference,
};

/// Custom persona storage keyed by persona id.
#[derive(Clone, Default)]
pub struct InMemoryPersonaRepository {
    profiles: Arc<RwLock<HashMap<String, PersonaProfile>>>,
    /// persona id -> user ids with access
    shares: Arc<RwLock<HashMap<String, HashSet<String>>>>,
}

impl InMemoryPersonaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }
}

#[async_trait]
impl PersonaRepository for InMemoryPersonaRepository {
    async fn insert(&self, profile: PersonaProfile) -> Result<()> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.id) {
            return Err(Error::InvalidInput(format!(
                "persona id already exists: {}",
                profile.id
            )));
        }
        debug!(persona_id = %profile.id, "Storing persona");
        profiles.insert(profile.id.clone(), profile);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<PersonaProfile>> {
        Ok(self.profiles.read().await.get(id).cloned())
    }

    async fn update(&self, profile: PersonaProfile) -> Result<()> {
        let mut profiles = self.profiles.write().await;
        match profiles.get_mut(&profile.id) {
            Some(slot) => {
                *slot = profile;
                Ok(())
            }
            None => Err(Error::PersonaNotFound(profile.id)),
        }
    }

    async fn record_use(&self, id: &str, now: DateTime<Utc>) -> Result<()> {
        match self.profiles.write().await.get_mut(id) {
            Some(profile) => {
                profile.record_use(now);
                Ok(())
            }
            None => Err(Error::PersonaNotFound(id.to_string())),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.profiles.write().await.remove(id).is_some();
        self.shares.write().await.remove(id);
        Ok(removed)
    }

    async fn list_for_organization(&self, organization_id: &str) -> Result<Vec<PersonaProfile>> {
        let mut found: Vec<PersonaProfile> = self
            .profiles
            .read()
            .await
            .values()
            .filter(|p| p.organization_id == organization_id)
            .cloned()
            .collect();
        // HashMap order is unstable; callers page over this list.
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn count_owned_by(&self, user_id: &str) -> Result<usize> {
        Ok(self
            .profiles
            .read()
            .await
            .values()
            .filter(|p| p.is_owned_by(user_id))
            .count())
    }

    async fn grant_share(&self, id: &str, user_ids: &[String]) -> Result<()> {
        if !self.profiles.read().await.contains_key(id) {
            return Err(Error::PersonaNotFound(id.to_string()));
        }
        self.shares
            .write()
            .await
            .entry(id.to_string())
            .or_default()
            .extend(user_ids.iter().cloned());
        Ok(())
    }

    async fn shared_with(&self, user_id: &str) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self
            .shares
            .read()
            .await
            .iter()
            .filter(|(_, users)| users.contains(user_id))
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn share_recipients(&self, id: &str) -> Result<Vec<String>> {
        let mut users: Vec<String> = self
            .shares
            .read()
            .await
            .get(id)
            .map(|users| users.iter().cloned().collect())
            .unwrap_or_default();
        users.sort();
        Ok(users)
    }
}

/// Preference storage keyed by user id.
#[derive(Clone, Default)]
pub struct InMemoryPreferenceStore {
    preferences: Arc<RwLock<HashMap<String, UserPersonaPreference>>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn load(&self, user_id: &str) -> Result<Option<UserPersonaPreference>> {
        Ok(self.preferences.read().await.get(user_id).cloned())
    }

    async fn save(&self, preference: UserPersonaPreference) -> Result<()> {
        self.preferences
            .write()
            .await
            .insert(preference.user_id.clone(), preference);
        Ok(())
    }

    async fn users_with_current(&self, persona_id: &str) -> Result<Vec<String>> {
        let mut users: Vec<String> = self
            .preferences
            .read()
            .await
            .values()
            .filter(|p| p.is_current(persona_id))
            .map(|p| p.user_id.clone())
            .collect();
        users.sort();
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use htma_core::PersonaCatalog;

    fn profile(id: &str, org: &str, owner: &str) -> PersonaProfile {
        let mut p = PersonaCatalog::builtin()
            .get("team-leader")
            .unwrap()
            .to_profile(org, Utc::now());
        p.id = id.to_string();
        p.created_by = owner.to_string();
        p.category = htma_core::ProfileCategory::Personal;
        p
    }

    #[tokio::test]
    async fn test_insert_get_delete() {
        let repo = InMemoryPersonaRepository::new();
        repo.insert(profile("p1", "org", "u1")).await.unwrap();
        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.get("p1").await.unwrap().unwrap().created_by, "u1");

        assert!(repo.delete("p1").await.unwrap());
        assert!(!repo.delete("p1").await.unwrap());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let repo = InMemoryPersonaRepository::new();
        repo.insert(profile("p1", "org", "u1")).await.unwrap();
        let err = repo.insert(profile("p1", "org", "u2")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_record_use_only_touches_usage() {
        let repo = InMemoryPersonaRepository::new();
        repo.insert(profile("p1", "org", "u1")).await.unwrap();

        let mut renamed = repo.get("p1").await.unwrap().unwrap();
        renamed.name = "Renamed".to_string();
        repo.update(renamed).await.unwrap();

        let now = Utc::now();
        repo.record_use("p1", now).await.unwrap();
        repo.record_use("p1", now).await.unwrap();

        let stored = repo.get("p1").await.unwrap().unwrap();
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.usage_count, Some(2));
        assert_eq!(stored.last_used_at, Some(now));
        assert!(matches!(
            repo.record_use("ghost", now).await,
            Err(Error::PersonaNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryPersonaRepository::new();
        let err = repo.update(profile("ghost", "org", "u1")).await.unwrap_err();
        assert!(matches!(err, Error::PersonaNotFound(_)));
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let repo = InMemoryPersonaRepository::new();
        repo.insert(profile("p1", "org-a", "u1")).await.unwrap();
        repo.insert(profile("p2", "org-a", "u2")).await.unwrap();
        repo.insert(profile("p3", "org-b", "u1")).await.unwrap();

        assert_eq!(repo.list_for_organization("org-a").await.unwrap().len(), 2);
        assert_eq!(repo.count_owned_by("u1").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_shares_removed_with_persona() {
        let repo = InMemoryPersonaRepository::new();
        repo.insert(profile("p1", "org", "u1")).await.unwrap();
        repo.grant_share("p1", &["u2".to_string()]).await.unwrap();
        repo.grant_share("p1", &["u3".to_string()]).await.unwrap();
        assert_eq!(repo.shared_with("u2").await.unwrap(), vec!["p1"]);
        assert_eq!(repo.share_recipients("p1").await.unwrap(), vec!["u2", "u3"]);

        repo.delete("p1").await.unwrap();
        assert!(repo.shared_with("u2").await.unwrap().is_empty());
        assert!(repo.share_recipients("p1").await.unwrap().is_empty());
        assert!(repo.grant_share("p1", &["u2".to_string()]).await.is_err());
    }

    #[tokio::test]
    async fn test_preference_store() {
        let store = InMemoryPreferenceStore::new();
        assert!(store.load("u1").await.unwrap().is_none());

        let now = Utc::now();
        store
            .save(UserPersonaPreference::new("u1", "team-leader", now))
            .await
            .unwrap();
        store
            .save(UserPersonaPreference::new("u2", "data-analyst", now))
            .await
            .unwrap();

        assert_eq!(store.users_with_current("team-leader").await.unwrap(), vec!["u1"]);
        assert!(store.users_with_current("risk-assessor").await.unwrap().is_empty());
    }
}

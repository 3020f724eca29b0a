//! Persona service: selection, custom persona lifecycle, sharing, and search.
//!
//! All state goes through a [`PersonaRepository`] and a [`PreferenceStore`].
//! Predefined personas come from the built-in catalog and are never stored.
//! Every preference change is one load-modify-save against the store, so
//! concurrent writers for the same user resolve as last-writer-wins.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, info, warn};

use htma_core::{
    new_persona_id, CreatePersonaRequest, Error, EventBus, EventContext, EventEnvelope,
    PersonaCatalog, PersonaEvent, PersonaOption, PersonaProfile, PersonaRepository,
    PersonaSearchRequest, PersonaSearchResponse, PreferenceStore, ProfileCategory,
    ResolvedPersona, Result, UpdatePersonaRequest, UserPersonaPreference, UserScope,
};
use tokio::sync::broadcast;

use crate::config::PersonaConfig;

/// Persona operations over pluggable storage.
pub struct PersonaService<R, P> {
    catalog: &'static PersonaCatalog,
    config: PersonaConfig,
    personas: R,
    preferences: P,
    events: EventBus,
}

impl<R, P> PersonaService<R, P>
where
    R: PersonaRepository,
    P: PreferenceStore,
{
    /// Create a service. Fails if the configuration is invalid.
    pub fn new(personas: R, preferences: P, config: PersonaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog: PersonaCatalog::builtin(),
            events: EventBus::new(config.event_bus_capacity),
            config,
            personas,
            preferences,
        })
    }

    pub fn config(&self) -> &PersonaConfig {
        &self.config
    }

    pub fn catalog(&self) -> &'static PersonaCatalog {
        self.catalog
    }

    /// Subscribe to persona events emitted by this service.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.events.subscribe()
    }

    fn emit(&self, scope: &UserScope, event: PersonaEvent) {
        self.events.emit_with_context(
            event,
            EventContext::for_user(&scope.user_id, &scope.organization_id),
        );
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Persona ids shared with the caller.
    async fn shared_ids(&self, scope: &UserScope) -> Result<HashSet<String>> {
        Ok(self
            .personas
            .shared_with(&scope.user_id)
            .await?
            .into_iter()
            .collect())
    }

    fn is_visible(profile: &PersonaProfile, scope: &UserScope, shared: &HashSet<String>) -> bool {
        profile.organization_id == scope.organization_id
            && (profile.is_owned_by(&scope.user_id)
                || profile.is_public
                || shared.contains(&profile.id))
    }

    /// Fetch a persona the caller may use.
    ///
    /// Stored personas outside the caller's view are reported as not found.
    pub async fn get_persona(&self, scope: &UserScope, id: &str) -> Result<PersonaProfile> {
        if let Some(predefined) = self.catalog.get(id) {
            return Ok(predefined.to_profile(&scope.organization_id, Utc::now()));
        }
        let shared = self.shared_ids(scope).await?;
        match self.personas.get(id).await? {
            Some(profile) if Self::is_visible(&profile, scope, &shared) => Ok(profile),
            _ => Err(Error::PersonaNotFound(id.to_string())),
        }
    }

    /// Stored persona for a mutation by its owner.
    async fn owned_custom(&self, scope: &UserScope, id: &str, op: &str) -> Result<PersonaProfile> {
        if self.catalog.contains(id) {
            warn!(
                subsystem = "personas",
                op,
                user_id = %scope.user_id,
                persona_id = id,
                "Rejected mutation of predefined persona"
            );
            return Err(Error::Forbidden(format!(
                "predefined persona cannot be modified: {}",
                id
            )));
        }
        let profile = self.get_persona(scope, id).await?;
        if !profile.is_owned_by(&scope.user_id) {
            warn!(
                subsystem = "personas",
                op,
                user_id = %scope.user_id,
                persona_id = id,
                owner = %profile.created_by,
                "Rejected mutation by non-owner"
            );
            return Err(Error::Forbidden(format!(
                "only the owner may modify persona {}",
                id
            )));
        }
        Ok(profile)
    }

    /// Every persona the caller can see: built-ins first, then stored
    /// personas that are owned, public in the organization, or shared.
    pub async fn visible_personas(&self, scope: &UserScope) -> Result<Vec<PersonaProfile>> {
        let now = Utc::now();
        let mut visible: Vec<PersonaProfile> = self
            .catalog
            .iter()
            .map(|p| p.to_profile(&scope.organization_id, now))
            .collect();

        let shared = self.shared_ids(scope).await?;
        visible.extend(
            self.personas
                .list_for_organization(&scope.organization_id)
                .await?
                .into_iter()
                .filter(|p| Self::is_visible(p, scope, &shared)),
        );
        Ok(visible)
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// The caller's preference, created on the default persona on first
    /// access.
    pub async fn current_preference(&self, scope: &UserScope) -> Result<UserPersonaPreference> {
        if let Some(preference) = self.preferences.load(&scope.user_id).await? {
            return Ok(preference);
        }
        let preference = UserPersonaPreference::new(
            scope.user_id.clone(),
            self.config.default_persona_id.clone(),
            Utc::now(),
        );
        self.preferences.save(preference.clone()).await?;
        info!(
            subsystem = "personas",
            op = "current_preference",
            user_id = %scope.user_id,
            persona_id = %preference.current_persona_id,
            "Initialized persona preference"
        );
        Ok(preference)
    }

    /// Effective configuration for the caller's current persona.
    ///
    /// Falls back to the default persona when the current one is no longer
    /// visible (for example after its share was withdrawn).
    pub async fn resolve(&self, scope: &UserScope) -> Result<ResolvedPersona> {
        let preference = self.current_preference(scope).await?;
        match self.get_persona(scope, &preference.current_persona_id).await {
            Ok(profile) => Ok(profile.resolve()),
            Err(Error::PersonaNotFound(id)) => {
                warn!(
                    subsystem = "personas",
                    op = "resolve",
                    user_id = %scope.user_id,
                    persona_id = %id,
                    "Current persona unavailable, resolving default"
                );
                Ok(self
                    .get_persona(scope, &self.config.default_persona_id)
                    .await?
                    .resolve())
            }
            Err(e) => Err(e),
        }
    }

    /// Make `persona_id` the caller's current persona.
    pub async fn switch_persona(
        &self,
        scope: &UserScope,
        persona_id: &str,
    ) -> Result<ResolvedPersona> {
        let profile = match self.get_persona(scope, persona_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(
                    subsystem = "personas",
                    op = "switch_persona",
                    user_id = %scope.user_id,
                    persona_id,
                    error = %e,
                    "Switch rejected"
                );
                return Err(e);
            }
        };

        let now = Utc::now();
        let mut preference = self.current_preference(scope).await?;
        let previous =
            preference.switch_persona(persona_id, self.config.max_recent_personas, now);
        self.preferences.save(preference).await?;

        // Usage stats are best-effort; the saved preference is the switch.
        if !profile.is_predefined() {
            if let Err(e) = self.personas.record_use(persona_id, now).await {
                warn!(
                    subsystem = "personas",
                    op = "switch_persona",
                    user_id = %scope.user_id,
                    persona_id,
                    error = %e,
                    "Failed to record persona usage"
                );
            }
        }

        info!(
            subsystem = "personas",
            op = "switch_persona",
            user_id = %scope.user_id,
            persona_id,
            previous_persona_id = %previous,
            "Persona switched"
        );
        self.emit(
            scope,
            PersonaEvent::PersonaSwitched {
                user_id: scope.user_id.clone(),
                persona_id: persona_id.to_string(),
                previous_persona_id: previous,
            },
        );
        Ok(profile.resolve())
    }

    /// Add or remove a favorite. Returns true when it is now a favorite.
    pub async fn toggle_favorite(&self, scope: &UserScope, persona_id: &str) -> Result<bool> {
        self.get_persona(scope, persona_id).await?;
        let mut preference = self.current_preference(scope).await?;
        let favorite = preference.toggle_favorite(persona_id, Utc::now());
        self.preferences.save(preference).await?;

        debug!(
            subsystem = "personas",
            op = "toggle_favorite",
            user_id = %scope.user_id,
            persona_id,
            favorite,
            "Favorite toggled"
        );
        self.emit(
            scope,
            PersonaEvent::PersonaFavorited {
                user_id: scope.user_id.clone(),
                persona_id: persona_id.to_string(),
                favorite,
            },
        );
        Ok(favorite)
    }

    // =========================================================================
    // CUSTOM PERSONA LIFECYCLE
    // =========================================================================

    /// Create a custom persona owned by the caller.
    pub async fn save_persona(
        &self,
        scope: &UserScope,
        req: CreatePersonaRequest,
    ) -> Result<PersonaProfile> {
        req.validate()?;

        let owned = self.personas.count_owned_by(&scope.user_id).await?;
        if owned >= self.config.max_custom_personas {
            warn!(
                subsystem = "personas",
                op = "save_persona",
                user_id = %scope.user_id,
                owned,
                "Custom persona limit reached"
            );
            return Err(Error::Forbidden(format!(
                "custom persona limit of {} reached",
                self.config.max_custom_personas
            )));
        }

        let now = Utc::now();
        let profile = PersonaProfile {
            id: new_persona_id(),
            name: req.name,
            description: req.description,
            icon: req.icon,
            color: req.color,
            created_by: scope.user_id.clone(),
            organization_id: scope.organization_id.clone(),
            is_public: req.is_public,
            is_default: None,
            filters: req.filters,
            layout: req.layout,
            insights: req.insights,
            category: category_for(req.is_public),
            tags: req.tags,
            usage_count: Some(0),
            created_at: now,
            updated_at: now,
            last_used_at: None,
        };
        self.personas.insert(profile.clone()).await?;

        let mut preference = self.current_preference(scope).await?;
        preference.add_custom(&profile.id, now);
        self.preferences.save(preference).await?;

        info!(
            subsystem = "personas",
            op = "save_persona",
            user_id = %scope.user_id,
            persona_id = %profile.id,
            is_public = profile.is_public,
            "Custom persona created"
        );
        self.emit(
            scope,
            PersonaEvent::PersonaCreated {
                persona_id: profile.id.clone(),
                name: profile.name.clone(),
                created_by: profile.created_by.clone(),
                is_public: profile.is_public,
            },
        );
        Ok(profile)
    }

    /// Apply a partial update to a custom persona owned by the caller.
    pub async fn update_persona(
        &self,
        scope: &UserScope,
        req: UpdatePersonaRequest,
    ) -> Result<PersonaProfile> {
        req.validate()?;
        let mut profile = self.owned_custom(scope, &req.id, "update_persona").await?;

        if req.is_empty() {
            debug!(
                subsystem = "personas",
                op = "update_persona",
                persona_id = %req.id,
                "Empty update, nothing to do"
            );
            return Ok(profile);
        }

        req.apply_to(&mut profile);
        profile.category = category_for(profile.is_public);
        profile.updated_at = Utc::now();
        self.personas.update(profile.clone()).await?;

        let changed_fields: Vec<String> =
            req.touched_fields().into_iter().map(String::from).collect();
        info!(
            subsystem = "personas",
            op = "update_persona",
            user_id = %scope.user_id,
            persona_id = %profile.id,
            ?changed_fields,
            "Custom persona updated"
        );
        self.emit(
            scope,
            PersonaEvent::PersonaUpdated {
                persona_id: profile.id.clone(),
                changed_fields,
            },
        );
        Ok(profile)
    }

    /// Delete a custom persona owned by the caller.
    ///
    /// Predefined personas are never deletable. A persona that is any user's
    /// current selection must be switched away from first. The persona is
    /// dropped from the recent and favorite lists of the owner and of every
    /// user it was shared with.
    pub async fn delete_persona(&self, scope: &UserScope, persona_id: &str) -> Result<()> {
        self.owned_custom(scope, persona_id, "delete_persona").await?;

        let active_for = self.preferences.users_with_current(persona_id).await?;
        if !active_for.is_empty() {
            warn!(
                subsystem = "personas",
                op = "delete_persona",
                user_id = %scope.user_id,
                persona_id,
                active_users = active_for.len(),
                "Rejected delete of active persona"
            );
            return Err(Error::Forbidden(format!(
                "persona {} is the current persona of {} user(s)",
                persona_id,
                active_for.len()
            )));
        }

        let recipients = self.personas.share_recipients(persona_id).await?;
        if !self.personas.delete(persona_id).await? {
            return Err(Error::PersonaNotFound(persona_id.to_string()));
        }

        let now = Utc::now();
        let mut preference = self.current_preference(scope).await?;
        preference.forget_persona(persona_id, now);
        self.preferences.save(preference).await?;

        for user_id in &recipients {
            if let Some(mut preference) = self.preferences.load(user_id).await? {
                preference.forget_persona(persona_id, now);
                self.preferences.save(preference).await?;
            }
        }

        info!(
            subsystem = "personas",
            op = "delete_persona",
            user_id = %scope.user_id,
            persona_id,
            "Custom persona deleted"
        );
        self.emit(
            scope,
            PersonaEvent::PersonaDeleted {
                persona_id: persona_id.to_string(),
            },
        );
        Ok(())
    }

    /// Grant other users of the organization access to a custom persona.
    pub async fn share_persona(
        &self,
        scope: &UserScope,
        persona_id: &str,
        user_ids: &[String],
    ) -> Result<()> {
        if user_ids.is_empty() {
            return Err(Error::InvalidInput(
                "userIds: at least one user is required".to_string(),
            ));
        }
        self.owned_custom(scope, persona_id, "share_persona").await?;

        let recipients: Vec<String> = user_ids
            .iter()
            .filter(|u| **u != scope.user_id)
            .cloned()
            .collect();
        self.personas.grant_share(persona_id, &recipients).await?;

        info!(
            subsystem = "personas",
            op = "share_persona",
            user_id = %scope.user_id,
            persona_id,
            result_count = recipients.len(),
            "Custom persona shared"
        );
        self.emit(
            scope,
            PersonaEvent::PersonaShared {
                persona_id: persona_id.to_string(),
                shared_with: recipients,
            },
        );
        Ok(())
    }

    /// Copy any visible persona into a new personal persona of the caller.
    ///
    /// Without `new_name` the copy is named `"<name> (Copy)"`.
    pub async fn duplicate_persona(
        &self,
        scope: &UserScope,
        persona_id: &str,
        new_name: Option<&str>,
    ) -> Result<PersonaProfile> {
        let source = self.get_persona(scope, persona_id).await?;
        // Built-in tags carry the catalog group, not user labels.
        let tags = if source.is_predefined() {
            None
        } else {
            source.tags
        };
        let name = match new_name {
            Some(name) => name.to_string(),
            None => format!("{} (Copy)", source.name),
        };
        debug!(
            subsystem = "personas",
            op = "duplicate_persona",
            user_id = %scope.user_id,
            persona_id,
            "Duplicating persona"
        );
        self.save_persona(
            scope,
            CreatePersonaRequest {
                name,
                description: source.description,
                icon: source.icon,
                color: source.color,
                is_public: false,
                filters: source.filters,
                layout: source.layout,
                insights: source.insights,
                tags,
            },
        )
        .await
    }

    // =========================================================================
    // DISCOVERY
    // =========================================================================

    /// Filter and page the personas visible to the caller.
    pub async fn search(
        &self,
        scope: &UserScope,
        req: &PersonaSearchRequest,
    ) -> Result<PersonaSearchResponse> {
        let matching: Vec<PersonaProfile> = self
            .visible_personas(scope)
            .await?
            .into_iter()
            .filter(|p| req.matches(p))
            .collect();

        let total = matching.len();
        let offset = req.effective_offset();
        let personas: Vec<PersonaProfile> = matching
            .into_iter()
            .skip(offset)
            .take(req.effective_limit())
            .collect();
        let has_more = offset + personas.len() < total;

        debug!(
            subsystem = "personas",
            op = "search",
            user_id = %scope.user_id,
            result_count = personas.len(),
            total,
            "Persona search"
        );
        Ok(PersonaSearchResponse {
            personas,
            total,
            has_more,
        })
    }

    /// Picker entries for every visible persona, flagged with the caller's
    /// recents and favorites.
    pub async fn persona_options(&self, scope: &UserScope) -> Result<Vec<PersonaOption>> {
        let preference = self.current_preference(scope).await?;
        Ok(self
            .visible_personas(scope)
            .await?
            .iter()
            .map(|p| PersonaOption::from_profile(p, &preference))
            .collect())
    }

    /// Predefined personas suggested for a job role.
    pub fn recommended_for_role(&self, scope: &UserScope, role: &str) -> Vec<PersonaProfile> {
        let now = Utc::now();
        self.catalog
            .by_role(role)
            .into_iter()
            .map(|p| p.to_profile(&scope.organization_id, now))
            .collect()
    }
}

fn category_for(is_public: bool) -> ProfileCategory {
    if is_public {
        ProfileCategory::Organizational
    } else {
        ProfileCategory::Personal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_for() {
        assert_eq!(category_for(true), ProfileCategory::Organizational);
        assert_eq!(category_for(false), ProfileCategory::Personal);
    }
}

//! Persona identities: built-in templates, user-owned profiles, and the
//! derived shapes handed to UI and analytics consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PersonaFilter, PersonaInsights, PersonaLayout};
use crate::defaults::SYSTEM_OWNER;
use crate::preference::UserPersonaPreference;

// =============================================================================
// PREDEFINED PERSONA
// =============================================================================

/// A built-in, non-deletable persona shipped with the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredefinedPersona {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    /// Grouping label (Executive, Management, ...).
    pub category: String,
    /// Free-text role labels matched against a caller's role.
    pub target_roles: Vec<String>,
    pub filters: PersonaFilter,
    pub layout: PersonaLayout,
    pub insights: PersonaInsights,
}

impl PredefinedPersona {
    /// Bidirectional case-insensitive substring match against one role.
    ///
    /// Matches when any target role contains `role`, or `role` contains any
    /// target role.
    pub fn matches_role(&self, role: &str) -> bool {
        let role = role.to_lowercase();
        self.target_roles.iter().any(|target| {
            let target = target.to_lowercase();
            target.contains(&role) || role.contains(&target)
        })
    }

    /// Project into the profile shape used for stored personas.
    ///
    /// Predefined personas are public, owned by the system, and carry the
    /// catalog category as a tag. `created_at` is the supplied timestamp
    /// since built-ins have no stored history.
    pub fn to_profile(&self, organization_id: &str, now: DateTime<Utc>) -> PersonaProfile {
        PersonaProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            icon: Some(self.icon.clone()),
            color: Some(self.color.clone()),
            created_by: SYSTEM_OWNER.to_string(),
            organization_id: organization_id.to_string(),
            is_public: true,
            is_default: None,
            filters: self.filters.clone(),
            layout: self.layout.clone(),
            insights: self.insights.clone(),
            category: ProfileCategory::Predefined,
            tags: Some(vec![self.category.clone()]),
            usage_count: None,
            created_at: now,
            updated_at: now,
            last_used_at: None,
        }
    }
}

// =============================================================================
// PERSONA PROFILE
// =============================================================================

/// Where a profile comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProfileCategory {
    Predefined,
    Organizational,
    Personal,
}

/// A persona as stored and shared inside an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonaProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    pub created_by: String,
    pub organization_id: String,
    /// Usable by everyone in the organization.
    pub is_public: bool,
    /// Default for new users in the organization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,

    pub filters: PersonaFilter,
    pub layout: PersonaLayout,
    pub insights: PersonaInsights,

    pub category: ProfileCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "usage_count", skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<u64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
}

impl PersonaProfile {
    pub fn is_predefined(&self) -> bool {
        self.category == ProfileCategory::Predefined
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.created_by == user_id
    }

    /// Record one activation.
    pub fn record_use(&mut self, now: DateTime<Utc>) {
        self.usage_count = Some(self.usage_count.unwrap_or(0) + 1);
        self.last_used_at = Some(now);
    }

    /// Tag list, empty when unset.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// The three configuration facets as one resolved triple.
    pub fn resolve(&self) -> ResolvedPersona {
        ResolvedPersona {
            persona_id: self.id.clone(),
            category: self.category,
            filters: self.filters.clone(),
            layout: self.layout.clone(),
            insights: self.insights.clone(),
        }
    }
}

/// Effective configuration to apply to a user's data view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPersona {
    pub persona_id: String,
    pub category: ProfileCategory,
    pub filters: PersonaFilter,
    pub layout: PersonaLayout,
    pub insights: PersonaInsights,
}

/// Identity an operation runs as.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserScope {
    pub user_id: String,
    pub organization_id: String,
}

impl UserScope {
    pub fn new(user_id: impl Into<String>, organization_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            organization_id: organization_id.into(),
        }
    }
}

// =============================================================================
// UI AND ANALYTICS SHAPES
// =============================================================================

/// One entry of a persona picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonaOption {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_recent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl PersonaOption {
    /// Build a picker entry, flagging recency and favorites from the user's
    /// preference.
    pub fn from_profile(profile: &PersonaProfile, preference: &UserPersonaPreference) -> Self {
        let category = match profile.category {
            // Built-ins carry their catalog group as the first tag.
            ProfileCategory::Predefined => profile.tags().first().cloned(),
            ProfileCategory::Organizational => Some("Organizational".to_string()),
            ProfileCategory::Personal => Some("Personal".to_string()),
        };
        Self {
            value: profile.id.clone(),
            label: profile.name.clone(),
            description: Some(profile.description.clone()),
            icon: profile.icon.clone(),
            color: profile.color.clone(),
            category,
            is_recent: Some(preference.recent_personas.contains(&profile.id)),
            is_favorite: Some(preference.favorite_personas.contains(&profile.id)),
        }
    }
}

/// Usage and outcome metrics for one persona within an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonaAnalytics {
    pub persona_id: String,
    pub organization_id: String,

    pub total_users: u64,
    /// Users active in the last 30 days.
    pub active_users: u64,
    /// Minutes.
    pub average_session_duration: f64,

    pub task_completion_rate: f64,
    /// Average time to action.
    pub decision_speed: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_satisfaction_score: Option<f64>,

    pub peak_usage_hours: Vec<u8>,
    pub common_workflows: Vec<String>,
    pub frequent_filters: Vec<String>,

    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_predefined() -> PredefinedPersona {
        PredefinedPersona {
            id: "sample".to_string(),
            name: "Sample".to_string(),
            description: "Sample persona".to_string(),
            icon: "*".to_string(),
            color: "#000000".to_string(),
            category: "Executive".to_string(),
            target_roles: vec!["VP".to_string(), "Team Lead".to_string()],
            filters: PersonaFilter::default(),
            layout: PersonaLayout::default(),
            insights: PersonaInsights::default(),
        }
    }

    #[test]
    fn test_matches_role_both_directions() {
        let persona = sample_predefined();
        // input inside target
        assert!(persona.matches_role("lead"));
        // target inside input
        assert!(persona.matches_role("EVP"));
        assert!(persona.matches_role("Senior Team Lead"));
        assert!(!persona.matches_role("Manager"));
    }

    #[test]
    fn test_to_profile() {
        let now = Utc::now();
        let profile = sample_predefined().to_profile("org-1", now);
        assert!(profile.is_predefined());
        assert!(profile.is_public);
        assert_eq!(profile.created_by, "system");
        assert_eq!(profile.organization_id, "org-1");
        assert_eq!(profile.tags(), ["Executive".to_string()]);
        assert_eq!(profile.created_at, now);
    }

    #[test]
    fn test_record_use() {
        let now = Utc::now();
        let mut profile = sample_predefined().to_profile("org-1", now);
        profile.record_use(now);
        profile.record_use(now);
        assert_eq!(profile.usage_count, Some(2));
        assert_eq!(profile.last_used_at, Some(now));
    }

    #[test]
    fn test_usage_count_keeps_snake_case() {
        let mut profile = sample_predefined().to_profile("org-1", Utc::now());
        profile.usage_count = Some(3);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["usage_count"], 3);
        assert_eq!(json["createdBy"], "system");
        assert_eq!(json["category"], "predefined");
    }

    #[test]
    fn test_option_flags() {
        let profile = sample_predefined().to_profile("org-1", Utc::now());
        let mut preference = UserPersonaPreference::new("u1", "other", Utc::now());
        preference.favorite_personas.push("sample".to_string());

        let option = PersonaOption::from_profile(&profile, &preference);
        assert_eq!(option.value, "sample");
        assert_eq!(option.category.as_deref(), Some("Executive"));
        assert_eq!(option.is_favorite, Some(true));
        assert_eq!(option.is_recent, Some(false));
    }
}

//! Persona request DTOs and their validation.
//!
//! Validation collects every problem as `path: message` and reports them in
//! one [`Error::InvalidInput`], so callers can surface all issues at once.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::defaults::{
    DESCRIPTION_MAX_LEN, MAX_TAGS, NAME_MAX_LEN, PAGE_LIMIT, PAGE_LIMIT_MAX, PROGRESS_MAX,
    TAG_MAX_LEN,
};
use crate::error::{Error, Result};
use crate::persona::{
    PersonaFilter, PersonaInsights, PersonaLayout, PersonaProfile, ProfileCategory,
};

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap());

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request to create a custom persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonaRequest {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub is_public: bool,
    pub filters: PersonaFilter,
    pub layout: PersonaLayout,
    pub insights: PersonaInsights,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Partial update of a custom persona. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonaRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<PersonaFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<PersonaLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<PersonaInsights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Query over the personas visible to a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonaSearchRequest {
    /// Case-insensitive text matched against name, description, and tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProfileCategory>,
    /// Every listed tag must be present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonaSearchResponse {
    pub personas: Vec<PersonaProfile>,
    pub total: usize,
    pub has_more: bool,
}

// =============================================================================
// VALIDATION
// =============================================================================

#[derive(Default)]
struct Problems(Vec<String>);

impl Problems {
    fn push(&mut self, path: &str, message: impl AsRef<str>) {
        self.0.push(format!("{}: {}", path, message.as_ref()));
    }

    fn into_result(self) -> Result<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidInput(self.0.join("; ")))
        }
    }
}

fn check_name(problems: &mut Problems, name: &str) {
    if name.trim().is_empty() {
        problems.push("name", "must not be empty");
    } else if name.chars().count() > NAME_MAX_LEN {
        problems.push("name", format!("must be at most {} characters", NAME_MAX_LEN));
    }
}

fn check_description(problems: &mut Problems, description: &str) {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        problems.push(
            "description",
            format!("must be at most {} characters", DESCRIPTION_MAX_LEN),
        );
    }
}

fn check_color(problems: &mut Problems, path: &str, color: &str) {
    if !HEX_COLOR.is_match(color) {
        problems.push(path, "must be a #RRGGBB hex color");
    }
}

fn check_tags(problems: &mut Problems, tags: &[String]) {
    if tags.len() > MAX_TAGS {
        problems.push("tags", format!("at most {} tags allowed", MAX_TAGS));
    }
    for (i, tag) in tags.iter().enumerate() {
        let len = tag.trim().chars().count();
        if len == 0 || len > TAG_MAX_LEN {
            problems.push(
                &format!("tags.{}", i),
                format!("must be 1 to {} characters", TAG_MAX_LEN),
            );
        }
    }
}

fn check_filter(problems: &mut Problems, filter: &PersonaFilter) {
    if let Some(p) = &filter.progress_thresholds {
        for (path, value) in [
            ("filters.progressThresholds.min", p.min),
            ("filters.progressThresholds.max", p.max),
        ] {
            if let Some(v) = value {
                if !(0.0..=PROGRESS_MAX).contains(&v) {
                    problems.push(path, format!("must be within 0 and {}", PROGRESS_MAX));
                }
            }
        }
        if let (Some(min), Some(max)) = (p.min, p.max) {
            if min > max {
                problems.push("filters.progressThresholds", "min must not exceed max");
            }
        }
    }
    if filter.max_depth == Some(0) {
        problems.push("filters.maxDepth", "must be at least 1");
    }
}

fn check_layout(problems: &mut Problems, layout: &PersonaLayout) {
    if let Some(color) = &layout.accent_color {
        check_color(problems, "layout.accentColor", color);
    }
}

fn check_insights(problems: &mut Problems, insights: &PersonaInsights) {
    if let Some(risk) = insights.escalation_thresholds.as_ref().and_then(|t| t.risk) {
        if !(0.0..=1.0).contains(&risk) {
            problems.push("insights.escalationThresholds.risk", "must be within 0 and 1");
        }
    }
}

impl CreatePersonaRequest {
    /// Check shape and range constraints.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Problems::default();
        check_name(&mut problems, &self.name);
        check_description(&mut problems, &self.description);
        if let Some(color) = &self.color {
            check_color(&mut problems, "color", color);
        }
        if let Some(tags) = &self.tags {
            check_tags(&mut problems, tags);
        }
        check_filter(&mut problems, &self.filters);
        check_layout(&mut problems, &self.layout);
        check_insights(&mut problems, &self.insights);
        problems.into_result()
    }
}

impl UpdatePersonaRequest {
    /// Check the fields that are present.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Problems::default();
        if self.id.trim().is_empty() {
            problems.push("id", "must not be empty");
        }
        if let Some(name) = &self.name {
            check_name(&mut problems, name);
        }
        if let Some(description) = &self.description {
            check_description(&mut problems, description);
        }
        if let Some(color) = &self.color {
            check_color(&mut problems, "color", color);
        }
        if let Some(tags) = &self.tags {
            check_tags(&mut problems, tags);
        }
        if let Some(filters) = &self.filters {
            check_filter(&mut problems, filters);
        }
        if let Some(layout) = &self.layout {
            check_layout(&mut problems, layout);
        }
        if let Some(insights) = &self.insights {
            check_insights(&mut problems, insights);
        }
        problems.into_result()
    }

    /// True when the request changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.icon.is_none()
            && self.color.is_none()
            && self.is_public.is_none()
            && self.filters.is_none()
            && self.layout.is_none()
            && self.insights.is_none()
            && self.tags.is_none()
    }

    /// Wire names of the fields the request sets.
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.icon.is_some() {
            fields.push("icon");
        }
        if self.color.is_some() {
            fields.push("color");
        }
        if self.is_public.is_some() {
            fields.push("isPublic");
        }
        if self.filters.is_some() {
            fields.push("filters");
        }
        if self.layout.is_some() {
            fields.push("layout");
        }
        if self.insights.is_some() {
            fields.push("insights");
        }
        if self.tags.is_some() {
            fields.push("tags");
        }
        fields
    }

    /// Apply the present fields to a profile.
    pub fn apply_to(&self, profile: &mut PersonaProfile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(description) = &self.description {
            profile.description = description.clone();
        }
        if let Some(icon) = &self.icon {
            profile.icon = Some(icon.clone());
        }
        if let Some(color) = &self.color {
            profile.color = Some(color.clone());
        }
        if let Some(is_public) = self.is_public {
            profile.is_public = is_public;
        }
        if let Some(filters) = &self.filters {
            profile.filters = filters.clone();
        }
        if let Some(layout) = &self.layout {
            profile.layout = layout.clone();
        }
        if let Some(insights) = &self.insights {
            profile.insights = insights.clone();
        }
        if let Some(tags) = &self.tags {
            profile.tags = Some(tags.clone());
        }
    }
}

impl PersonaSearchRequest {
    /// Page size, clamped to `1..=PAGE_LIMIT_MAX`.
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(PAGE_LIMIT).clamp(1, PAGE_LIMIT_MAX)
    }

    pub fn effective_offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    /// Whether a profile satisfies every set criterion.
    pub fn matches(&self, profile: &PersonaProfile) -> bool {
        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            let hit = profile.name.to_lowercase().contains(&query)
                || profile.description.to_lowercase().contains(&query)
                || profile
                    .tags()
                    .iter()
                    .any(|t| t.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }
        if let Some(category) = self.category {
            if profile.category != category {
                return false;
            }
        }
        if let Some(tags) = &self.tags {
            if !tags.iter().all(|t| profile.tags().contains(t)) {
                return false;
            }
        }
        if let Some(created_by) = &self.created_by {
            if &profile.created_by != created_by {
                return false;
            }
        }
        if let Some(is_public) = self.is_public {
            if profile.is_public != is_public {
                return false;
            }
        }
        true
    }
}

//! Persona layout facet: declarative presentation directives.
//!
//! Nothing in this crate interprets a layout; it is handed as-is to the
//! rendering layer.

use serde::{Deserialize, Serialize};

/// Initial view shown when the persona is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DefaultView {
    Portfolio,
    Executive,
    Kanban,
    Timeline,
    Calendar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDensity {
    Compact,
    Comfortable,
    Spacious,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Priority,
    DueDate,
    Status,
    Progress,
    RiskScore,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    None,
    Status,
    Priority,
    Assignee,
    Type,
    Department,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmphasisStyle {
    Subtle,
    Moderate,
    Bold,
}

/// Default sort specification. Both parts are required when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Visibility switch per named dashboard component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentVisibility {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_map: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_overview: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_activity: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_assistant: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_graph: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_alerts: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_charts: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_status: Option<bool>,
}

impl ComponentVisibility {
    /// Wire names of the components explicitly switched on.
    pub fn visible(&self) -> Vec<&'static str> {
        [
            ("portfolioMap", self.portfolio_map),
            ("metricsOverview", self.metrics_overview),
            ("recentActivity", self.recent_activity),
            ("aiAssistant", self.ai_assistant),
            ("dependencyGraph", self.dependency_graph),
            ("riskAlerts", self.risk_alerts),
            ("performanceCharts", self.performance_charts),
            ("teamStatus", self.team_status),
        ]
        .into_iter()
        .filter_map(|(name, shown)| (shown == Some(true)).then_some(name))
        .collect()
    }
}

/// Layout facet of a persona.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonaLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_view: Option<DefaultView>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<ComponentVisibility>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_density: Option<LayoutDensity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_collapsed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_minimap: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<SortSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<GroupBy>,

    /// CSS hex color (`#RRGGBB`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub emphasis_style: Option<EmphasisStyle>,
}

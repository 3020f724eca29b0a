//! Properties of the built-in persona catalog.
use htma_core::{PersonaCatalog, PredefinedPersona};

fn ids(personas: &[&PredefinedPersona]) -> Vec<String> {
    personas.iter().map(|p| p.id.clone()).collect()
}

#[test]
fn test_builtin_has_ten_unique_personas() {
    let catalog = PersonaCatalog::builtin();
    assert_eq!(catalog.len(), 10);

    // Rebuilding from the same list passes duplicate detection.
    let rebuilt = PersonaCatalog::new(htma_core::predefined_personas());
    assert!(rebuilt.is_ok(), "built-in ids must be unique");
}

#[test]
fn test_declaration_order() {
    let order: Vec<&str> = PersonaCatalog::builtin().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "executive-strategic-visionary",
            "executive-crisis-manager",
            "team-leader",
            "project-manager",
            "individual-contributor",
            "data-analyst",
            "risk-assessor",
            "daily-standup",
            "weekly-review",
            "quarterly-business-review",
        ]
    );
}

#[test]
fn test_executive_category() {
    let catalog = PersonaCatalog::builtin();
    assert_eq!(
        ids(&catalog.by_category("Executive")),
        vec!["executive-strategic-visionary", "executive-crisis-manager"]
    );
}

#[test]
fn test_categories_partition_catalog() {
    let catalog = PersonaCatalog::builtin();
    let categories = catalog.categories();
    assert_eq!(
        categories,
        vec!["Executive", "Management", "Individual", "Analytics", "Contextual"]
    );

    // Every persona appears in exactly one category bucket.
    let total: usize = categories.iter().map(|c| catalog.by_category(c).len()).sum();
    assert_eq!(total, catalog.len());
    for persona in catalog.iter() {
        assert!(catalog
            .by_category(&persona.category)
            .iter()
            .any(|p| p.id == persona.id));
    }
}

#[test]
fn test_unknown_category_is_empty() {
    assert!(PersonaCatalog::builtin().by_category("Finance").is_empty());
    assert!(PersonaCatalog::builtin().by_category("executive").is_empty());
}

#[test]
fn test_every_target_role_finds_its_persona() {
    let catalog = PersonaCatalog::builtin();
    for persona in catalog.iter() {
        for role in &persona.target_roles {
            assert!(
                catalog.by_role(role).iter().any(|p| p.id == persona.id),
                "role {role} should match {}",
                persona.id
            );
        }
    }
}

#[test]
fn test_manager_role() {
    let catalog = PersonaCatalog::builtin();
    let found = ids(&catalog.by_role("Manager"));
    assert_eq!(
        found,
        vec![
            "team-leader",
            "project-manager",
            "data-analyst",
            "risk-assessor",
            "daily-standup",
            "weekly-review",
        ]
    );
    assert!(!found.contains(&"executive-strategic-visionary".to_string()));
    assert!(!found.contains(&"individual-contributor".to_string()));
}

#[test]
fn test_role_match_is_case_insensitive_and_bidirectional() {
    let catalog = PersonaCatalog::builtin();
    let expected = vec!["individual-contributor", "daily-standup"];
    assert_eq!(ids(&catalog.by_role("developer")), expected);
    assert_eq!(ids(&catalog.by_role("Senior Developer")), expected);
}

#[test]
fn test_empty_role_matches_everything() {
    assert_eq!(PersonaCatalog::builtin().by_role("").len(), 10);
}

#[test]
fn test_unknown_role_is_empty() {
    assert!(PersonaCatalog::builtin().by_role("Astronaut").is_empty());
}

#[test]
fn test_lookups_are_idempotent() {
    let catalog = PersonaCatalog::builtin();
    assert_eq!(catalog.by_role("VP"), catalog.by_role("VP"));
    assert_eq!(catalog.by_category("Contextual"), catalog.by_category("Contextual"));
    assert_eq!(catalog.get("team-leader"), catalog.get("team-leader"));
}

#[test]
fn test_get() {
    let catalog = PersonaCatalog::builtin();
    let persona = catalog.get("risk-assessor").unwrap();
    assert_eq!(persona.name, "Risk Assessor");
    assert!(catalog.contains("daily-standup"));
    assert!(catalog.get("nonexistent").is_none());
}

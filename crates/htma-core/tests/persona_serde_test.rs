//! Wire format of persona records.
use htma_core::{
    PersonaCatalog, PersonaFilter, PersonaProfile, PredefinedPersona, UserPersonaPreference,
};
use serde_json::json;

#[test]
fn test_every_predefined_persona_round_trips() {
    for persona in PersonaCatalog::builtin().iter() {
        let json = serde_json::to_string(persona).expect("serialize");
        let back: PredefinedPersona = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(&back, persona, "round trip changed {}", persona.id);
    }
}

#[test]
fn test_profile_round_trips() {
    let now = chrono::Utc::now();
    let mut profile = PersonaCatalog::builtin()
        .get("weekly-review")
        .unwrap()
        .to_profile("org-1", now);
    profile.record_use(now);

    let json = serde_json::to_string(&profile).unwrap();
    let back: PersonaProfile = serde_json::from_str(&json).unwrap();
    assert_eq!(back, profile);
}

#[test]
fn test_crisis_manager_wire_values() {
    let persona = PersonaCatalog::builtin().get("executive-crisis-manager").unwrap();
    let value = serde_json::to_value(persona).unwrap();

    assert_eq!(value["targetRoles"][0], "CEO");
    assert_eq!(value["filters"]["statuses"], json!(["blocked", "on_hold"]));
    assert_eq!(value["filters"]["priorities"], json!(["critical", "high"]));
    assert_eq!(value["filters"]["dueDateRange"]["overdue"], true);
    assert_eq!(value["insights"]["escalationThresholds"]["risk"], 0.5);
}

#[test]
fn test_unset_facets_are_omitted() {
    let value = serde_json::to_value(PersonaFilter::new().show_completed(false)).unwrap();
    assert_eq!(value, json!({"showCompleted": false}));
}

#[test]
fn test_filter_accepts_external_json() {
    let filter: PersonaFilter = serde_json::from_value(json!({
        "workItemTypes": ["objective", "strategy"],
        "timeframe": "this_quarter",
        "progressThresholds": {"min": 10.0, "behindSchedule": true},
        "maxDepth": 2
    }))
    .unwrap();

    assert_eq!(
        filter.applied_filters(),
        vec!["workItemTypes", "timeframe", "progressThresholds", "maxDepth"]
    );
}

#[test]
fn test_unknown_enum_value_rejected() {
    let result: Result<PersonaFilter, _> =
        serde_json::from_value(json!({"timeframe": "next_decade"}));
    assert!(result.is_err());
}

#[test]
fn test_preference_round_trips_after_switches() {
    let start = chrono::Utc::now();
    let mut pref = UserPersonaPreference::new("u1", "individual-contributor", start);
    pref.switch_persona("team-leader", 5, start);
    pref.switch_persona("data-analyst", 5, start + chrono::Duration::minutes(7));

    let json = serde_json::to_string(&pref).unwrap();
    let back: UserPersonaPreference = serde_json::from_str(&json).unwrap();
    assert_eq!(back, pref);
    assert_eq!(back.session_persona_history[0].duration, Some(7));
}

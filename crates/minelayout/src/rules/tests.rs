use super::*;

#[test]
fn defaults_validate() {
    let rules = MiningRuleSet::default();
    assert!(rules.validate().is_ok());
    assert!((rules.score_weights.sum() - 1.0).abs() < 1e-12);
}

#[test]
fn dip_classes_use_inclusive_upper_bounds() {
    let r = MiningRuleSet::default();
    assert_eq!(r.classify_dip_angle(0.0), DipClass::Gentle);
    assert_eq!(r.classify_dip_angle(8.0), DipClass::Gentle);
    assert_eq!(r.classify_dip_angle(8.01), DipClass::Inclined);
    assert_eq!(r.classify_dip_angle(25.0), DipClass::Inclined);
    assert_eq!(r.classify_dip_angle(-30.0), DipClass::Steep);
    assert_eq!(r.classify_dip_angle(45.0), DipClass::Steep);
    assert_eq!(r.classify_dip_angle(60.0), DipClass::VerySteep);
}

#[test]
fn thickness_classes() {
    let r = MiningRuleSet::default();
    assert_eq!(r.classify_coal_thickness(0.5), ThicknessClass::Unminable);
    assert_eq!(r.classify_coal_thickness(0.8), ThicknessClass::Thin);
    assert_eq!(r.classify_coal_thickness(1.3), ThicknessClass::Thin);
    assert_eq!(r.classify_coal_thickness(3.5), ThicknessClass::Medium);
    assert_eq!(r.classify_coal_thickness(6.0), ThicknessClass::Thick);
}

#[test]
fn length_verdicts_name_the_violated_bound() {
    let r = MiningRuleSet::default();
    let ok = r.validate_face_length(200.0);
    assert!(ok.ok);
    assert_eq!(ok.message, "compliant");

    let short = r.validate_face_length(120.0);
    assert!(!short.ok);
    assert!(short.message.contains("minimum"), "{}", short.message);

    let long = r.validate_advance_length(3000.0);
    assert!(!long.ok);
    assert!(long.message.contains("maximum"), "{}", long.message);

    assert!(r.validate_face_length(150.0).ok);
    assert!(r.validate_face_length(300.0).ok);
}

#[test]
fn pseudo_incline_threshold_is_strict() {
    let r = MiningRuleSet::default();
    assert!(!r.needs_pseudo_incline(15.0));
    assert!(r.needs_pseudo_incline(15.5));
    assert!(r.needs_pseudo_incline(-20.0));
}

#[test]
fn score_grades() {
    let r = MiningRuleSet::default();
    assert_eq!(r.classify_score(90.0), ScoreGrade::Excellent);
    assert_eq!(r.classify_score(85.0), ScoreGrade::Excellent);
    assert_eq!(r.classify_score(70.0), ScoreGrade::Good);
    assert_eq!(r.classify_score(65.0), ScoreGrade::Acceptable);
    assert_eq!(r.classify_score(10.0), ScoreGrade::Unsuitable);
}

#[test]
fn suggest_face_count_for_rectangular_district() {
    let r = MiningRuleSet::default();
    // effective: 2940 x 1140, pitch 220
    let s = r.suggest_face_count(3000.0, 1200.0);
    assert_eq!(s.strike.face_count, 5);
    assert!((s.strike.advance_length - 2940.0).abs() < 1e-9);
    assert_eq!(s.dip.face_count, 13);
    assert!((s.dip.advance_length - 1140.0).abs() < 1e-9);
    assert_eq!(s.recommended, LayoutDirection::Strike);

    let tiny = r.suggest_face_count(50.0, 50.0);
    assert_eq!(tiny.strike.face_count, 1);
    assert_eq!(tiny.dip.face_count, 1);
}

#[test]
fn rejects_bad_weights() {
    let mut r = MiningRuleSet::default();
    r.score_weights.coal_thickness = 0.5;
    match r.validate() {
        Err(RuleError::WeightSum { sum }) => assert!((sum - 1.15).abs() < 1e-9),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn rejects_inverted_and_out_of_range_bounds() {
    let mut r = MiningRuleSet::default();
    r.face_length = Bound::new(300.0, 150.0, 200.0);
    assert!(matches!(
        r.validate(),
        Err(RuleError::InvertedBound { name: "faceLength", .. })
    ));

    let mut r = MiningRuleSet::default();
    r.section_pillar.preferred = 40.0;
    assert!(matches!(
        r.validate(),
        Err(RuleError::PreferredOutOfRange { name: "sectionPillar", .. })
    ));

    let mut r = MiningRuleSet::default();
    r.dip_angle.inclined_max = 5.0;
    assert!(matches!(
        r.validate(),
        Err(RuleError::Breakpoints { name: "dipAngle" })
    ));
}

#[test]
fn overrides_merge_into_defaults() {
    let json = r#"{
        "sectionPillar": {"preferred": 25},
        "dipAngle": {"pseudoInclineThreshold": 12},
        "layoutDirection": "dip"
    }"#;
    let o: RuleOverrides = serde_json::from_str(json).unwrap();
    let r = MiningRuleSet::with_overrides(&o).unwrap();
    assert_eq!(r.pillar_width(PillarKind::Section), 25.0);
    assert_eq!(r.pillar_width(PillarKind::Boundary), 30.0);
    assert_eq!(r.dip_angle.pseudo_incline_threshold, 12.0);
    assert_eq!(r.dip_angle.gentle_max, 8.0);
    assert_eq!(r.layout_direction, LayoutDirection::Dip);
    assert_eq!(o.section_pillar_preferred(), Some(25.0));
    assert_eq!(o.boundary_pillar_preferred(), None);
}

#[test]
fn overrides_are_validated() {
    let o = RuleOverrides {
        face_length: Some(BoundOverride {
            preferred: Some(500.0),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert!(MiningRuleSet::with_overrides(&o).is_err());
}

#[test]
fn rule_set_serializes_in_camel_case() {
    let v = serde_json::to_value(MiningRuleSet::default()).unwrap();
    assert_eq!(v["faceLength"]["preferred"], 200.0);
    assert_eq!(v["dipAngle"]["pseudoInclineThreshold"], 15.0);
    assert_eq!(v["layoutDirection"], "strike");
    assert_eq!(v["miningMethod"], "retreat");
}

#[test]
fn class_labels_serialize_in_camel_case() {
    assert_eq!(serde_json::to_value(DipClass::VerySteep).unwrap(), "verySteep");
    assert_eq!(serde_json::to_value(ThicknessClass::Unminable).unwrap(), "unminable");
    assert_eq!(serde_json::to_value(ScoreGrade::Acceptable).unwrap(), "acceptable");
}

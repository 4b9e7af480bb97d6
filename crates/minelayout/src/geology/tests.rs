use super::*;

fn seam(name: &str, thickness: f64, depth: f64, roof: &str, floor: &str) -> CoalSeamInfo {
    CoalSeamInfo {
        name: name.to_string(),
        thickness,
        depth,
        roof_rock: roof.to_string(),
        floor_rock: floor.to_string(),
        roof_thickness: 5.0,
        floor_thickness: 3.0,
    }
}

fn hole(id: &str, x: f64, y: f64, seams: Vec<CoalSeamInfo>) -> BoreholeSample {
    let mut b = BoreholeSample::new(id, x, y);
    b.seams = seams;
    b
}

/// Boreholes on the plane `depth = 200 - 0.1 x + 0.05 y`.
fn planar_field() -> GeologyAnalyzer {
    let collars = [
        (0.0, 0.0),
        (500.0, 0.0),
        (0.0, 500.0),
        (500.0, 500.0),
        (250.0, 120.0),
    ];
    let mut g = GeologyAnalyzer::new();
    for (i, (x, y)) in collars.into_iter().enumerate() {
        let depth = 200.0 - 0.1 * x + 0.05 * y;
        g.add_borehole(hole(
            &format!("ZK{i}"),
            x,
            y,
            vec![seam("15-4煤", 3.0, depth, "砂岩", "泥岩")],
        ));
    }
    g
}

#[test]
fn seam_names_normalize_across_spellings() {
    assert_eq!(normalize_seam_name("15-4煤"), "15-4煤");
    assert_eq!(normalize_seam_name("15_4 煤"), "15-4煤");
    assert_eq!(normalize_seam_name(" 15 - 4"), "15-4煤");
    assert_eq!(normalize_seam_name("3 上"), "3上煤");
    assert_eq!(normalize_seam_name("主采煤层"), "主采煤层");
    assert_eq!(normalize_seam_name(" 泥岩 "), "泥岩");
}

#[test]
fn coal_layer_detection_excludes_carbonaceous_rock() {
    assert!(is_coal_layer("15-4煤"));
    assert!(is_coal_layer("Coal seam"));
    assert!(!is_coal_layer("炭质泥岩"));
    assert!(!is_coal_layer("碳质泥岩"));
    assert!(!is_coal_layer("细砂岩"));
}

#[test]
fn layers_yield_seams_with_roof_and_floor() {
    let b = BoreholeSample::from_layers(
        "ZK1",
        10.0,
        20.0,
        vec![
            StratumLayer::new("黄土", 20.0),
            StratumLayer::new("细砂岩", 30.0),
            StratumLayer::new("15-4煤", 3.2),
            StratumLayer::new("泥岩", 5.0),
            StratumLayer::new("16-3煤", 1.1),
        ],
    );
    assert_eq!(b.seams.len(), 2);
    let s = &b.seams[0];
    assert_eq!(s.depth, 50.0);
    assert_eq!(s.roof_rock, "细砂岩");
    assert_eq!(s.roof_thickness, 30.0);
    assert_eq!(s.floor_rock, "泥岩");
    assert_eq!(b.coal_thickness, 3.2);
    let last = &b.seams[1];
    assert!((last.depth - 58.2).abs() < 1e-9);
    assert_eq!(last.floor_rock, "");
    assert_eq!(last.floor_thickness, 0.0);
}

#[test]
fn samples_without_log_get_a_main_seam() {
    let json = r#"[{"id": "B1", "x": 1.0, "y": 2.0, "coalThickness": 4.2}]"#;
    let samples: Vec<BoreholeSample> = serde_json::from_str(json).unwrap();
    assert_eq!(samples[0].gas_content, 2.0);
    assert_eq!(samples[0].rock_hardness, 5.0);
    let g = GeologyAnalyzer::from_samples(samples);
    let s = &g.boreholes()[0].seams[0];
    assert_eq!(s.name, MAIN_SEAM_NAME);
    assert_eq!(s.thickness, 4.2);
    assert_eq!(s.depth, SYNTHETIC_SEAM_DEPTH);
    assert_eq!(g.seam_names(), vec![MAIN_SEAM_NAME.to_string()]);
}

#[test]
fn two_boreholes_give_flat_low_confidence() {
    let mut g = GeologyAnalyzer::new();
    g.add_borehole(hole("A", 0.0, 0.0, vec![seam("3煤", 2.0, 100.0, "", "")]));
    g.add_borehole(hole("B", 100.0, 0.0, vec![seam("3煤", 2.0, 120.0, "", "")]));
    let est = g.calculate_dip_angle(None);
    assert_eq!(est.confidence, Confidence::Low);
    assert_eq!(est.dip_angle, 0.0);
    assert_eq!(est.dip_direction, 0.0);
    assert_eq!(est.points_used, 2);
    assert!(est.message.is_some());
    assert!(!est.is_reliable());
}

#[test]
fn no_seams_at_all_is_low_confidence() {
    let mut g = GeologyAnalyzer::new();
    for i in 0..4 {
        g.add_borehole(BoreholeSample::new(format!("E{i}"), i as f64 * 10.0, 0.0));
    }
    let est = g.calculate_dip_angle(None);
    assert_eq!(est.confidence, Confidence::Low);
    assert_eq!(est.points_used, 0);
}

#[test]
fn exact_plane_is_recovered() {
    let g = planar_field();
    let est = g.calculate_dip_angle(None);
    assert_eq!(est.seam_name.as_deref(), Some("15-4煤"));
    assert_eq!(est.points_used, 5);
    assert_eq!(est.confidence, Confidence::High);
    // gradient (0.1, -0.05): dip = atan(0.1118) ≈ 6.38°, azimuth atan2(0.1, -0.05) ≈ 116.6°
    assert!((est.dip_angle - 6.38).abs() < 0.011, "{est:?}");
    assert!((est.dip_direction - 116.6).abs() < 0.051, "{est:?}");
    assert!((est.strike_direction - 206.6).abs() < 0.051, "{est:?}");
    let grad = est.gradient.unwrap();
    assert!((grad.a - 0.1).abs() < 1e-6 && (grad.b + 0.05).abs() < 1e-6);
    assert!(est.rms.unwrap() < 1e-6);
}

#[test]
fn target_seam_is_normalized_before_matching() {
    let g = planar_field();
    let est = g.calculate_dip_angle(Some("15_4"));
    assert_eq!(est.seam_name.as_deref(), Some("15-4煤"));
    assert_eq!(est.points_used, 5);
    let missing = g.calculate_dip_angle(Some("9煤"));
    assert_eq!(missing.points_used, 0);
    assert_eq!(missing.confidence, Confidence::Low);
}

#[test]
fn collinear_collars_are_low_confidence() {
    let mut g = GeologyAnalyzer::new();
    for i in 0..5 {
        let x = i as f64 * 100.0;
        g.add_borehole(hole(
            &format!("L{i}"),
            x,
            2.0 * x,
            vec![seam("3煤", 2.0, 100.0 + x * 0.1, "", "")],
        ));
    }
    let est = g.calculate_dip_angle(None);
    assert_eq!(est.confidence, Confidence::Low);
    assert_eq!(est.dip_angle, 0.0);
    assert!(est.message.unwrap().contains("collinear"));
}

#[test]
fn most_frequent_seam_ties_break_by_name() {
    let mut g = GeologyAnalyzer::new();
    g.add_borehole(hole("A", 0.0, 0.0, vec![seam("5煤", 1.0, 10.0, "", "")]));
    g.add_borehole(hole("B", 1.0, 0.0, vec![seam("3煤", 1.0, 10.0, "", "")]));
    let est = g.calculate_dip_angle(None);
    assert_eq!(est.seam_name.as_deref(), Some("3煤"));
}

#[test]
fn idw_with_optimal_conditions_scores_ninety() {
    let mut g = GeologyAnalyzer::new();
    for (i, (x, y)) in [(0.0, 0.0), (300.0, 0.0), (0.0, 300.0)].into_iter().enumerate() {
        g.add_borehole(hole(
            &format!("G{i}"),
            x,
            y,
            vec![seam("2煤", 3.0, 150.0, "砾岩", "砾岩")],
        ));
    }
    let s = g.calculate_score_at_point(100.0, 100.0, None);
    assert!(s.has_data);
    assert_eq!(s.data_points, 3);
    assert_eq!(s.thickness_score, 90.0);
    assert!((s.total_score - 90.0).abs() < 1e-9);
    assert!((s.interpolated_thickness - 3.0).abs() < 1e-9);
}

#[test]
fn idw_on_a_collar_is_finite_and_dominated_by_it() {
    let mut g = GeologyAnalyzer::new();
    g.add_borehole(hole("C", 0.0, 0.0, vec![seam("2煤", 2.0, 150.0, "砾岩", "砾岩")]));
    g.add_borehole(hole("F", 1000.0, 0.0, vec![seam("2煤", 5.0, 150.0, "泥岩", "泥岩")]));

    let on = g.calculate_score_at_point(0.0, 0.0, None);
    assert!(on.total_score.is_finite());
    assert_eq!(on.interpolated_thickness, 2.0);
    assert_eq!(on.thickness_score, 90.0);
    assert!((on.total_score - 90.0).abs() < 0.1, "{}", on.total_score);

    // anything within a metre of the collar gets the same clamped weight
    let near = g.calculate_score_at_point(0.5, 0.0, None);
    assert_eq!(near, on);
}

#[test]
fn three_and_a_half_metres_is_thick() {
    // medium band is [1.3, 3.5); 3.5 m already scores as thick
    assert_eq!(thickness_score(3.49), 90.0);
    assert_eq!(thickness_score(3.5), 80.0);
}

#[test]
fn idw_weights_favor_the_nearest_collar() {
    let mut g = GeologyAnalyzer::new();
    g.add_borehole(hole("N", 0.0, 0.0, vec![seam("2煤", 1.0, 100.0, "", "")]));
    g.add_borehole(hole("F", 1000.0, 0.0, vec![seam("2煤", 5.0, 100.0, "", "")]));
    let near = g.calculate_score_at_point(0.0, 0.0, None);
    assert!(near.interpolated_thickness < 1.01);
    let mid = g.calculate_score_at_point(500.0, 0.0, None);
    assert!((mid.interpolated_thickness - 3.0).abs() < 1e-9);
}

#[test]
fn no_matching_data_scores_neutral() {
    let g = GeologyAnalyzer::new();
    let s = g.calculate_score_at_point(0.0, 0.0, None);
    assert_eq!(s.total_score, NO_DATA_SCORE);
    assert!(!s.has_data);

    let g = planar_field();
    let s = g.calculate_score_at_point(0.0, 0.0, Some("99煤"));
    assert_eq!(s.total_score, NO_DATA_SCORE);
    assert_eq!(s.data_points, 0);
}

#[test]
fn rock_scores_prefer_longest_name() {
    assert_eq!(rock_score("粉砂岩", RockRole::Roof), 60.0);
    assert_eq!(rock_score("灰色细砂岩", RockRole::Roof), 80.0);
    assert_eq!(rock_score("炭质泥岩", RockRole::Floor), 20.0);
    assert_eq!(rock_score("泥岩", RockRole::Floor), 30.0);
    assert_eq!(rock_score("Siltstone", RockRole::Floor), 60.0);
    assert_eq!(rock_score("", RockRole::Roof), UNKNOWN_ROCK_SCORE);
    assert_eq!(rock_score("玄武岩", RockRole::Roof), UNKNOWN_ROCK_SCORE);
}

#[test]
fn thickness_steps() {
    assert_eq!(thickness_score(0.5), 20.0);
    assert_eq!(thickness_score(1.0), 60.0);
    assert_eq!(thickness_score(3.4), 90.0);
    assert_eq!(thickness_score(3.5), 80.0);
    assert_eq!(thickness_score(7.0), 70.0);
}

#[test]
fn score_grid_covers_bbox_inclusively() {
    let g = planar_field();
    let boundary = vec![
        Point2D::new(0.0, 0.0),
        Point2D::new(400.0, 0.0),
        Point2D::new(400.0, 200.0),
        Point2D::new(0.0, 200.0),
    ];
    let grid = g.generate_score_grid(&boundary, None, 5);
    assert_eq!(grid.cells.len(), 25);
    assert_eq!(grid.cells[0].x, 0.0);
    assert_eq!(grid.cells[0].y, 0.0);
    assert_eq!(grid.cells[1].y, 50.0);
    let last = grid.cells.last().unwrap();
    assert_eq!((last.x, last.y), (400.0, 200.0));
    let stats = grid.stats.unwrap();
    assert!(stats.min_score <= stats.avg_score && stats.avg_score <= stats.max_score);

    let empty = GeologyAnalyzer::new().generate_score_grid(&boundary, None, 5);
    assert!(empty.cells.is_empty());
    assert!(empty.stats.is_none());
}

#[test]
fn summary_groups_by_normalized_name() {
    let mut g = GeologyAnalyzer::new();
    g.add_borehole(hole("A", 0.0, 0.0, vec![seam("15-4煤", 2.0, 100.0, "", "")]));
    g.add_borehole(hole("B", 1.0, 0.0, vec![seam("15_4", 4.0, 120.0, "", "")]));
    g.add_borehole(hole("C", 2.0, 0.0, vec![seam("16-3煤", 1.0, 130.0, "", "")]));
    let sum = g.summary();
    assert_eq!(sum.borehole_count, 3);
    assert_eq!(sum.seam_names(), vec!["15-4煤", "16-3煤"]);
    let s = &sum.coal_seams["15-4煤"];
    assert_eq!(s.borehole_count, 2);
    assert_eq!(s.avg_thickness, 3.0);
    assert_eq!(s.thickness_std, 1.0);
    assert_eq!(s.min_depth, 100.0);
    assert_eq!(s.max_depth, 120.0);
    assert_eq!(s.avg_depth, 110.0);
}

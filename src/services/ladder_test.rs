use std::collections::HashSet;

use serde_json::json;

use super::*;

fn config() -> LadderConfig {
    LadderConfig::default()
}

fn generate_req(value: serde_json::Value) -> GenerateRequest {
    serde_json::from_value(value).unwrap()
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

// =============================================================================
// LABELS
// =============================================================================

#[test]
fn empty_bottom_labels_get_one_hit() {
    assert_eq!(fill_bottom_labels(&[], 4), labels(&["hit", "miss", "miss", "miss"]));
}

#[test]
fn short_bottom_labels_are_padded_with_miss() {
    assert_eq!(fill_bottom_labels(&labels(&["gold"]), 3), labels(&["gold", "miss", "miss"]));
}

#[test]
fn long_bottom_labels_are_truncated() {
    assert_eq!(fill_bottom_labels(&labels(&["a", "b", "c", "d"]), 2), labels(&["a", "b"]));
}

// =============================================================================
// GENERATE
// =============================================================================

#[test]
fn plan_fills_defaults() {
    let plan = plan_generate(&generate_req(json!({ "n": 5 })), &config()).unwrap();
    assert_eq!(plan.params.lines, 5);
    assert_eq!(plan.params.levels, 15);
    assert!((plan.params.density - 4.0 / 14.0).abs() < 1e-12);
    assert_eq!(plan.bottom, labels(&["hit", "miss", "miss", "miss", "miss"]));
}

#[test]
fn plan_treats_non_positive_levels_and_density_as_absent() {
    let plan = plan_generate(&generate_req(json!({ "n": 4, "levels": -2, "rungDensity": 0 })), &config()).unwrap();
    assert_eq!(plan.params.levels, 12);
    let d = plan.params.density;
    assert!((0.05..=0.60).contains(&d), "auto density {d}");
}

#[test]
fn plan_clamps_high_density_and_keeps_seed() {
    let plan = plan_generate(
        &generate_req(json!({ "n": 3, "levels": 20, "rungDensity": 0.99, "seed": -17 })),
        &config(),
    )
    .unwrap();
    assert!((plan.params.density - 0.95).abs() < 1e-12);
    assert_eq!(plan.seed, -17);
}

#[test]
fn plan_rejects_out_of_range_inputs() {
    for body in [
        json!({ "n": 1 }),
        json!({ "n": 51 }),
        json!({ "n": -3 }),
        json!({ "n": 4, "levels": 5000 }),
    ] {
        let err = plan_generate(&generate_req(body.clone()), &config()).unwrap_err();
        assert!(matches!(err, LadderError::InvalidParameter(_)), "{body}");
    }
}

#[test]
fn default_level_count_respects_the_level_cap() {
    let huge = LadderConfig { levels_per_line: usize::MAX, ..config() };
    let err = plan_generate(&generate_req(json!({ "n": 3 })), &huge).unwrap_err();
    assert!(matches!(err, LadderError::InvalidParameter(_)));

    let tight = LadderConfig { levels_per_line: 10, max_levels: 40, ..config() };
    assert_eq!(plan_generate(&generate_req(json!({ "n": 4 })), &tight).unwrap().params.levels, 40);
    assert!(plan_generate(&generate_req(json!({ "n": 5 })), &tight).is_err());
}

#[test]
fn bare_n_request_generates_for_every_seed() {
    for n in [3, 4] {
        for seed in 0..300 {
            let ladder = generate(&generate_req(json!({ "n": n, "seed": seed })), &config())
                .unwrap_or_else(|e| panic!("n {n} seed {seed}: {e}"));
            assert!(ladder::validate_layout(ladder.n, ladder.levels, &ladder.rungs).is_ok());
        }
    }
}

#[test]
fn ladder_accepts_label_key_aliases() {
    let ladder: Ladder = serde_json::from_value(json!({
        "n": 2,
        "levels": 2,
        "rungs": [],
        "topLabels": ["", ""],
        "bottomLabels": ["hit", "miss"],
        "seed": 4,
    }))
    .unwrap();
    assert_eq!(ladder.bottom, labels(&["hit", "miss"]));
    assert_eq!(ladder.top, labels(&["", ""]));
}

#[test]
fn generate_is_reproducible_from_echoed_seed() {
    let first = generate(&generate_req(json!({ "n": 6, "levels": 40, "rungDensity": 0.3 })), &config()).unwrap();
    let again = generate(
        &generate_req(json!({ "n": 6, "levels": 40, "rungDensity": 0.3, "seed": first.seed })),
        &config(),
    )
    .unwrap();
    assert_eq!(first, again);
    assert_eq!(first.top, vec![String::new(); 6]);
    assert_eq!(first.bottom.len(), 6);
    assert!(ladder::validate_layout(6, 40, &first.rungs).is_ok());
    assert!(first.rungs.iter().all(|r| r.level >= 1));
}

#[test]
fn generate_rejects_levels_inside_start_gap() {
    let err = generate(&generate_req(json!({ "n": 2, "levels": 1, "seed": 1 })), &config()).unwrap_err();
    assert!(matches!(err, LadderError::InvalidParameter(_)));
}

#[test]
fn generate_request_accepts_bottom_labels_alias() {
    let req = generate_req(json!({ "n": 2, "bottomLabels": ["x"] }));
    assert_eq!(req.bottom, labels(&["x"]));
}

// =============================================================================
// TRACE
// =============================================================================

fn trace_req(value: serde_json::Value) -> TraceRequest {
    serde_json::from_value(value).unwrap()
}

#[test]
fn trace_scenario_reaches_column_two() {
    let req = trace_req(json!({
        "n": 3,
        "levels": 2,
        "rungs": [{ "left": 0, "level": 0 }, { "left": 1, "level": 1 }],
        "start": 0,
    }));
    let res = trace(&req, &config()).unwrap();
    assert_eq!(res.end_index, 2);
    assert_eq!(res.path.len(), 5);

    let wire = serde_json::to_value(&res).unwrap();
    assert_eq!(wire["endIndex"], 2);
    assert_eq!(wire["path"][4], json!({ "x": 2.0, "y": 2.0 }));
}

#[test]
fn trace_rejects_bad_start_levels_and_rungs() {
    for body in [
        json!({ "n": 3, "levels": 2, "start": 3 }),
        json!({ "n": 3, "levels": 2, "start": -1 }),
        json!({ "n": 3, "levels": 0, "start": 0 }),
        json!({ "n": 1, "levels": 2, "start": 0 }),
        json!({ "n": 3, "levels": 2, "start": 0, "rungs": [{ "left": 2, "level": 0 }] }),
        json!({ "n": 3, "levels": 2, "start": 0, "rungs": [{ "left": 0, "level": 2 }] }),
    ] {
        let err = trace(&trace_req(body.clone()), &config()).unwrap_err();
        assert!(matches!(err, LadderError::InvalidParameter(_)), "{body}");
    }
}

#[test]
fn permutation_of_generated_ladder_is_bijective() {
    let ladder = generate(&generate_req(json!({ "n": 7, "levels": 42, "rungDensity": 0.25, "seed": 5 })), &config())
        .unwrap();
    let req: DiagramRequest = serde_json::from_value(json!({
        "n": ladder.n,
        "levels": ladder.levels,
        "rungs": ladder.rungs,
    }))
    .unwrap();
    let res = permutation(&req, &config()).unwrap();
    let distinct: HashSet<usize> = res.end_indices.iter().copied().collect();
    assert_eq!(distinct.len(), 7);
}

// tests/classification.rs
//
// Label Parser contract: priority-ordered keyword matching over noisy
// chairman output, with the neutral Center fallback.

use political_bias_analyzer::{parse_classification, ClassificationLabel};

#[test]
fn far_left_wins_regardless_of_case_and_surroundings() {
    for s in [
        "far left",
        "FAR LEFT",
        "Far Left",
        "# Classification: FAR LEFT — populist economics",
        "the council judged this content far-left overall",
    ] {
        let c = parse_classification(s);
        assert_eq!(c.score, -80, "input {s:?}");
        assert_eq!(c.label, ClassificationLabel::FarLeft, "input {s:?}");
    }
}

#[test]
fn lean_right_and_standalone_right_both_score_forty() {
    for s in [
        "lean right",
        "# Classification: LEAN RIGHT due to rhetoric...",
        "reads RIGHT of center-norm",
    ] {
        let c = parse_classification(s);
        assert_eq!(c.score, 40, "input {s:?}");
    }
}

#[test]
fn lean_right_is_never_center_right() {
    let c = parse_classification("# Classification: LEAN RIGHT due to rhetoric...");
    assert_eq!(c.label, ClassificationLabel::LeanRight);
    assert_eq!(c.label.display_name(), "Lean Right");
    assert_ne!(c.label.display_name(), "Center Right");
    assert_eq!(c.score, 40);
}

#[test]
fn unrecognized_input_falls_back_to_center() {
    for s in ["", "unknown", "neutral text", "qwerty 123", "\n\t"] {
        let c = parse_classification(s);
        assert_eq!(c.score, 0, "input {s:?}");
        assert_eq!(c.label, ClassificationLabel::Center, "input {s:?}");
    }
}

#[test]
fn every_table_row_round_trips_through_its_canonical_key() {
    let rows = [
        (ClassificationLabel::FarLeft, -80),
        (ClassificationLabel::Left, -40),
        (ClassificationLabel::LeanLeft, -40),
        (ClassificationLabel::CenterLeft, -20),
        (ClassificationLabel::Center, 0),
        (ClassificationLabel::CenterRight, 20),
        (ClassificationLabel::LeanRight, 40),
        (ClassificationLabel::Right, 40),
        (ClassificationLabel::FarRight, 80),
    ];
    for (label, score) in rows {
        assert_eq!(label.score(), score);
        let parsed = parse_classification(label.canonical());
        assert_eq!(parsed.score, score, "key {}", label.canonical());
    }
}

#[test]
fn marker_prefix_is_stripped_before_matching() {
    let c = parse_classification("# Classification: CENTER-LEFT");
    assert_eq!(c.label, ClassificationLabel::CenterLeft);
    assert_eq!(c.score, -20);

    let c = parse_classification("Classification - center right");
    assert_eq!(c.label, ClassificationLabel::CenterRight);
    assert_eq!(c.score, 20);
}

#[test]
fn parser_is_deterministic() {
    for s in ["lean left vs right debate", "center right", "far right!"] {
        let first = parse_classification(s);
        for _ in 0..5 {
            assert_eq!(parse_classification(s), first, "input {s:?}");
        }
    }
}

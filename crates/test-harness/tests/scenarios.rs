//! End-to-end workflow scenarios through the real engine recompute path.

use test_harness::assertions::{
    assert_close, assert_segments_contiguous, assert_stack_height, assert_synthesized_solid,
};
use test_harness::helpers::{compression_with_end, degenerate_compression};
use test_harness::SpringBuilder;

use spring_types::EndType;

// ── Scenario 1: Every end condition builds a solid ──────────────────────

#[test]
fn every_end_type_recomputes_to_a_solid() {
    let mut b = SpringBuilder::new();
    for end_type in EndType::all() {
        b.add_spring(end_type.label(), compression_with_end(end_type))
            .unwrap();
    }
    b.recompute();
    b.assert_no_errors().unwrap();

    for end_type in EndType::all() {
        let name = end_type.label();
        b.assert_solid(name).unwrap();
        assert_synthesized_solid(&b.result(name).unwrap().solid, name).unwrap();

        let segments = b.segments(name).unwrap();
        assert_segments_contiguous(segments, name).unwrap();
        assert_stack_height(segments, 80.0, 1e-6, name).unwrap();
    }
}

// ── Scenario 2: Derived properties match hand calculations ──────────────

#[test]
fn derived_properties_match_hand_calculations() {
    let mut b = SpringBuilder::new();
    b.add_compression("stock").unwrap();
    b.recompute();
    b.assert_no_errors().unwrap();

    // OD 28, wire 2.8: mean 25.2, index 9, open pitch (80 - 2.8) / 10.
    let props = b.properties("stock").unwrap();
    assert_close(props.mean_diameter, 25.2, 1e-12, "mean diameter").unwrap();
    assert_close(props.spring_index, 9.0, 1e-12, "spring index").unwrap();
    assert_close(props.pitch, 7.72, 1e-12, "open pitch").unwrap();
    assert!(props.rate > 0.0, "rate should be positive: {}", props.rate);

    // Ground open ends divide the free length over all coils.
    b.edit("stock", |spec| spec.end_type = EndType::OpenGround)
        .unwrap();
    b.recompute();
    b.assert_no_errors().unwrap();
    let props = b.properties("stock").unwrap();
    assert_close(props.pitch, 8.0, 1e-12, "ground open pitch").unwrap();
}

// ── Scenario 3: Failed recompute keeps the previous result ──────────────

#[test]
fn failed_recompute_keeps_previous_result_and_records_error() {
    let mut b = SpringBuilder::new();
    b.add_compression("spring").unwrap();
    b.recompute();
    b.assert_no_errors().unwrap();
    let rate_before = b.properties("spring").unwrap().rate;

    b.edit("spring", |spec| spec.wire_diameter = 0.0).unwrap();
    b.recompute();

    b.assert_error_count(1).unwrap();
    let message = b.error_for("spring").expect("error should be recorded");
    assert!(
        message.contains("not a solid"),
        "unexpected error message: {}",
        message,
    );

    // The last good result is still available.
    let props = b.properties("spring").unwrap();
    assert_close(props.rate, rate_before, 1e-12, "retained rate").unwrap();
    b.assert_solid("spring").unwrap();
}

#[test]
fn degenerate_spec_never_panics() {
    let mut b = SpringBuilder::new();
    b.add_spring("broken", degenerate_compression()).unwrap();
    b.recompute();
    b.assert_error_count(1).unwrap();
    assert!(b.result("broken").is_err());
}

// ── Scenario 4: Enumeration cascade ─────────────────────────────────────

#[test]
fn closed_end_cascade_fills_inactive_coils() {
    let mut b = SpringBuilder::new();
    b.add_spring("closed", compression_with_end(EndType::Closed))
        .unwrap();
    b.recompute();
    b.assert_no_errors().unwrap();

    let spec = b.spec("closed").unwrap();
    assert_close(spec.coils_inactive, 2.0, 1e-12, "inactive coils").unwrap();
    assert_close(spec.add_coils_at_solid, 1.0, 1e-12, "solid-length coils").unwrap();
    assert_eq!(b.segments("closed").unwrap().len(), 5);
}

#[test]
fn user_specified_ends_keep_user_values() {
    let mut b = SpringBuilder::new();
    b.add_spring("custom", compression_with_end(EndType::UserSpecified))
        .unwrap();
    b.edit("custom", |spec| spec.coils_inactive = 3.0).unwrap();
    b.recompute();
    b.assert_no_errors().unwrap();
    assert_close(b.spec("custom").unwrap().coils_inactive, 3.0, 1e-12, "inactive coils").unwrap();
}

// ── Scenario 5: Extension and torsion features ──────────────────────────

#[test]
fn extension_and_torsion_produce_rate_and_coil_solid() {
    let mut b = SpringBuilder::new();
    b.add_extension("ext").unwrap();
    b.add_torsion("tor").unwrap();
    b.recompute();
    b.assert_no_errors().unwrap();

    for name in ["ext", "tor"] {
        b.assert_solid(name).unwrap();
        let props = b.properties(name).unwrap();
        assert!(props.rate > 0.0, "{}: rate {}", name, props.rate);
        assert!(b.segments(name).unwrap().is_empty(), "{}: no plan", name);
    }
}

// ── Scenario 6: Feature lifecycle ───────────────────────────────────────

#[test]
fn suppressed_feature_is_skipped_then_recomputed() {
    let mut b = SpringBuilder::new();
    b.add_compression("spring").unwrap();
    b.suppress("spring", true).unwrap();
    b.recompute();
    assert!(b.result("spring").is_err());
    b.assert_no_errors().unwrap();

    b.suppress("spring", false).unwrap();
    b.recompute();
    b.assert_solid("spring").unwrap();
}

#[test]
fn removing_a_feature_frees_its_name() {
    let mut b = SpringBuilder::new();
    b.add_compression("spring").unwrap();
    assert!(b.add_compression("spring").is_err());
    b.recompute();

    b.remove("spring").unwrap();
    assert!(b.result("spring").is_err());
    b.add_compression("spring").unwrap();
    b.recompute();
    b.assert_solid("spring").unwrap();
}

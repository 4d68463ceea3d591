//! Mutation point integration tests
//!
//! Point counts per shading language version, and application through the
//! random source.

#[path = "../common/mod.rs"]
mod common;
use common::*;

use pretty_assertions::assert_eq;
use shaderfuzz_ir::config::MutationConfig;
use shaderfuzz_ir::shared::models::ShadingLanguageVersion;
use shaderfuzz_ir::shared::utils::count_exprs;
use shaderfuzz_ir::{CannedRandom, MutationPoint, MutationPointFinder};

fn texts(points: &[MutationPoint]) -> Vec<String> {
    points.iter().map(MutationPoint::text).collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Counts per version
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn loop_guard_operands_are_points_under_glsl() {
    let program = compound_increment_loop(ShadingLanguageVersion::Glsl440);
    let points = MutationPointFinder::default().find(&program);

    // Both operands of `x < 100` and the right side of `j += x`
    assert_eq!(texts(&points), vec!["x", "100", "x"]);
}

#[test]
fn loop_guard_is_untouchable_under_webgl() {
    let program = compound_increment_loop(ShadingLanguageVersion::WebGl1);
    let points = MutationPointFinder::default().find(&program);
    assert_eq!(texts(&points), vec!["x"]);
}

#[test]
fn loop_body_points_survive_webgl() {
    // `j + 1`, `j` and `1`
    let program = plain_increment_loop(ShadingLanguageVersion::WebGl1);
    let points = MutationPointFinder::default().find(&program);
    assert_eq!(texts(&points), vec!["j + 1", "j", "1"]);
}

#[test]
fn restrictive_versions_never_add_points() {
    let finder = MutationPointFinder::default();
    for fixture in [compound_increment_loop, plain_increment_loop] {
        let permissive = finder.find(&fixture(ShadingLanguageVersion::Glsl440)).len();
        for version in [
            ShadingLanguageVersion::Essl100,
            ShadingLanguageVersion::WebGl1,
            ShadingLanguageVersion::WebGl2,
        ] {
            assert!(finder.find(&fixture(version)).len() <= permissive);
        }
    }
}

#[test]
fn scan_is_deterministic() {
    let program = plain_increment_loop(ShadingLanguageVersion::Glsl440);
    let finder = MutationPointFinder::default();
    assert_eq!(finder.find(&program), finder.find(&program));
}

// ═══════════════════════════════════════════════════════════════════════════
// Application
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn applying_a_point_wraps_exactly_one_expression() {
    let mut program = compound_increment_loop(ShadingLanguageVersion::WebGl1);
    let finder = MutationPointFinder::new(MutationConfig::default().parenthesize(false));
    let points = finder.find(&program);
    let before = count_exprs(&program);

    // int: AddZero, MulOne -> MulOne
    points[0].apply(&mut program, &mut CannedRandom::new([1]));

    // `(x) * 1` adds the paren, the product and the literal
    assert_eq!(count_exprs(&program), before + 3);
    let after = finder.find(&program);
    assert!(after.iter().any(|p| p.text() == "(x) * 1"));
}

#[test]
fn stale_point_is_fatal() {
    let mut program = plain_increment_loop(ShadingLanguageVersion::Glsl440);
    let points = MutationPointFinder::default().find(&program);
    points[0].apply(&mut program, &mut CannedRandom::new([0]));

    let result = std::panic::catch_unwind(move || {
        let mut program = program;
        points[0].apply(&mut program, &mut CannedRandom::new([0]));
    });
    assert!(result.is_err());
}

//! Property-based tests for opportunities
//!
//! Merged names decode to what was encoded and never panic on junk,
//! applied opportunities never come back, and sessions replay from a seed.

#[path = "../common/mod.rs"]
mod common;
use common::*;

use proptest::prelude::*;
use shaderfuzz_ir::features::vectorization::Constituent;
use shaderfuzz_ir::shared::constants::merging::MERGED_PREFIX;
use shaderfuzz_ir::shared::models::builder::*;
use shaderfuzz_ir::shared::models::{Program, ShadingLanguageVersion, Type};
use shaderfuzz_ir::{
    MergeProvenance, OpportunitySession, SessionConfig, VectorizationFinder,
};

// Strategy for constituent names; lengths are encoded, so any identifier works
fn constituent_name() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,8}"
}

// Strategy for packed layouts: consecutive constituents of width 1 or 2 within a vec4
fn provenance() -> impl Strategy<Value = MergeProvenance> {
    prop::collection::vec((1u8..=2, constituent_name()), 1..=4)
        .prop_filter("fits in a vec4", |parts| {
            parts.iter().map(|(width, _)| u32::from(*width)).sum::<u32>() <= 4
        })
        .prop_map(|parts| {
            let mut offset = 0;
            let constituents = parts
                .into_iter()
                .map(|(width, name)| {
                    let constituent = Constituent {
                        name,
                        offset,
                        width,
                    };
                    offset += width;
                    constituent
                })
                .collect();
            MergeProvenance { constituents }
        })
}

const SWIZZLES: &[&str] = &[
    "x", "y", "z", "w", "xy", "yz", "zw", "xyz", "yzw", "xyzw",
];

/// `void main() { vec4 <merged>; <merged>.<swizzle>; ... }` with distinct constituent names
fn merged_program(widths: &[u8], accesses: &[prop::sample::Index]) -> Program {
    let mut offset = 0;
    let constituents = widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let constituent = Constituent {
                name: format!("v{i}"),
                offset,
                width,
            };
            offset += width;
            constituent
        })
        .collect();
    let name = MergeProvenance { constituents }.encode(MERGED_PREFIX);

    let mut stmts = vec![decl_stmt(Type::vec4(), &name)];
    stmts.extend(
        accesses
            .iter()
            .map(|index| expr_stmt(swizzle(ident(&name), index.get::<&str>(SWIZZLES)))),
    );
    glsl_main(stmts)
}

fn layout_widths() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=2, 1..=4).prop_filter("fits in a vec4", |widths| {
        widths.iter().map(|w| u32::from(*w)).sum::<u32>() <= 4
    })
}

proptest! {
    /// Property: Decoding an encoded layout gives the layout back
    #[test]
    fn prop_provenance_roundtrip(provenance in provenance()) {
        let name = provenance.encode(MERGED_PREFIX);
        let decoded = MergeProvenance::decode(&name, MERGED_PREFIX);
        prop_assert_eq!(decoded, Ok(provenance));
    }

    /// Property: Decoding arbitrary names never panics, and success means a legal layout
    #[test]
    fn prop_decode_fails_closed(suffix in "[0-9_a-z]{0,40}") {
        let name = format!("{MERGED_PREFIX}{suffix}");
        if let Ok(provenance) = MergeProvenance::decode(&name, MERGED_PREFIX) {
            prop_assert!(!provenance.constituents.is_empty());
            prop_assert!(provenance.span() <= 4);
            prop_assert_eq!(provenance.encode(MERGED_PREFIX), name);
        }
    }

    /// Property: An applied extraction is never offered again, and nothing else changes
    #[test]
    fn prop_applied_extraction_disappears(
        widths in layout_widths(),
        accesses in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let finder = VectorizationFinder::default();
        let program = merged_program(&widths, &accesses);
        let found = finder.find(&program);
        prop_assert!(found.len() <= widths.len());

        for opportunity in &found {
            let mut reduced = program.clone();
            opportunity.apply(&mut reduced, finder.config());
            let after = finder.find(&reduced);

            prop_assert_eq!(after.len(), found.len() - 1);
            prop_assert!(!after.iter().any(|o| o.targets(opportunity)));
        }
    }

    /// Property: The same seed replays the same fuzzing steps
    #[test]
    fn prop_session_replays_from_seed(seed in any::<u64>()) {
        let run = || {
            let mut program = compound_increment_loop(ShadingLanguageVersion::Glsl440);
            let config = SessionConfig::default().seed(seed).max_steps(6);
            let mut session = OpportunitySession::fuzzing(config).unwrap();
            let summary = session.exhaust(&mut program);
            (summary.applied, program)
        };
        let (first_steps, first_program) = run();
        let (second_steps, second_program) = run();

        prop_assert_eq!(first_steps.len(), 6);
        prop_assert_eq!(first_steps, second_steps);
        prop_assert_eq!(first_program, second_program);
    }
}

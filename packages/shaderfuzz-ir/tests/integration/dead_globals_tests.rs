//! Dead global elimination integration tests

#[path = "../common/mod.rs"]
mod common;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use shaderfuzz_ir::shared::models::builder::*;
use shaderfuzz_ir::shared::models::{
    Declaration, Program, ShadingLanguageVersion, Stmt, Type,
};
use shaderfuzz_ir::{strip_unused_globals, DeadGlobalEliminator};

fn shader(mut declarations: Vec<Declaration>, body: Vec<Stmt>) -> Program {
    declarations.push(function(Type::Void, "main", vec![], body));
    program(ShadingLanguageVersion::Glsl440, declarations)
}

#[test]
fn parameter_shadowing_does_not_keep_global() {
    // float g; float h; float f(float g) { return g; } void main() { h; }
    let mut program = program(
        ShadingLanguageVersion::Glsl440,
        vec![
            global(Type::float(), vec![var("g")]),
            global(Type::float(), vec![var("h")]),
            function(
                Type::float(),
                "f",
                vec![param(Type::float(), "g")],
                vec![ret(Some(ident("g")))],
            ),
            function(Type::Void, "main", vec![], vec![expr_stmt(ident("h"))]),
        ],
    );
    let report = DeadGlobalEliminator::default().strip(&mut program);

    assert_eq!(report.removed, vec!["g"]);
    assert_eq!(program.global_variable_names(), vec!["h"]);
}

#[test]
fn switch_survives_without_references() {
    let mut program = shader(
        vec![
            uniform(Type::vec2(), "injectionSwitch"),
            uniform(Type::vec2(), "resolution"),
        ],
        vec![],
    );
    let report = DeadGlobalEliminator::default().strip(&mut program);

    assert_eq!(report.removed, vec!["resolution"]);
    assert_eq!(program.global_variable_names(), vec!["injectionSwitch"]);
}

#[test]
fn dead_chain_is_removed_whole() {
    // float a = 1.0; float b = a; float c = b; void main() {}
    let mut program = shader(
        vec![
            global(Type::float(), vec![var_init("a", float(1.0))]),
            global(Type::float(), vec![var_init("b", ident("a"))]),
            global(Type::float(), vec![var_init("c", ident("b"))]),
        ],
        vec![],
    );
    let report = strip_unused_globals(&mut program, "injectionSwitch");

    assert_eq!(report.removed, vec!["a", "b", "c"]);
    assert_eq!(report.removed_groups, 3);
    assert!(program.global_variable_names().is_empty());
    assert_eq!(program.functions().count(), 1);
}

#[test]
fn grouped_members_keep_their_order() {
    // float a, b = a, c, d; void main() { d; b; }
    let mut program = shader(
        vec![global(
            Type::float(),
            vec![var("a"), var_init("b", ident("a")), var("c"), var("d")],
        )],
        vec![expr_stmt(ident("d")), expr_stmt(ident("b"))],
    );
    let report = DeadGlobalEliminator::default().strip(&mut program);

    assert_eq!(report.removed, vec!["c"]);
    assert_eq!(report.removed_groups, 0);
    assert_eq!(program.global_variable_names(), vec!["a", "b", "d"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════════════

/// One generated global: read from `main`, and which earlier global its initializer reads
#[derive(Debug, Clone)]
struct GlobalShape {
    read_from_main: bool,
    reads: Option<prop::sample::Index>,
}

fn global_shapes() -> impl Strategy<Value = Vec<GlobalShape>> {
    prop::collection::vec(
        (any::<bool>(), any::<Option<prop::sample::Index>>())
            .prop_map(|(read_from_main, reads)| GlobalShape { read_from_main, reads }),
        1..10,
    )
}

fn earlier(shapes: &[GlobalShape], i: usize) -> Option<usize> {
    if i == 0 {
        return None;
    }
    shapes[i].reads.as_ref().map(|index| index.index(i))
}

fn build(shapes: &[GlobalShape]) -> Program {
    let name = |i: usize| format!("g{i}");
    let mut globals = vec![uniform(Type::vec2(), "injectionSwitch")];
    let mut body = Vec::new();
    for (i, shape) in shapes.iter().enumerate() {
        let member = match earlier(shapes, i) {
            Some(j) => var_init(&name(i), ident(&name(j))),
            None => var(&name(i)),
        };
        globals.push(global(Type::float(), vec![member]));
        if shape.read_from_main {
            body.push(expr_stmt(ident(&name(i))));
        }
    }
    shader(globals, body)
}

/// Names that must survive: the switch, main's reads, and whatever their initializers read
fn expected_survivors(shapes: &[GlobalShape]) -> Vec<String> {
    let mut live = vec![false; shapes.len()];
    let mut pending: Vec<usize> = (0..shapes.len()).filter(|&i| shapes[i].read_from_main).collect();
    while let Some(i) = pending.pop() {
        if !live[i] {
            live[i] = true;
            pending.extend(earlier(shapes, i));
        }
    }
    std::iter::once("injectionSwitch".to_string())
        .chain((0..shapes.len()).filter(|&i| live[i]).map(|i| format!("g{i}")))
        .collect()
}

proptest! {
    /// Property: Exactly the transitively read globals survive
    #[test]
    fn prop_survivors_are_reachable(shapes in global_shapes()) {
        let mut program = build(&shapes);
        DeadGlobalEliminator::default().strip(&mut program);
        prop_assert_eq!(program.global_variable_names(), expected_survivors(&shapes));
    }

    /// Property: A second strip finds nothing to remove
    #[test]
    fn prop_strip_is_idempotent(shapes in global_shapes()) {
        let eliminator = DeadGlobalEliminator::default();
        let mut program = build(&shapes);
        eliminator.strip(&mut program);
        let once = program.clone();

        let report = eliminator.strip(&mut program);
        prop_assert!(report.is_empty());
        prop_assert_eq!(program, once);
    }
}

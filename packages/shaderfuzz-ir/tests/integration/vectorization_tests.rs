//! Vectorization reduction integration tests
//!
//! Whole-shader scenarios: nested merges, shadowing across blocks, type
//! conflicts, and decomposition until nothing is left.

#[path = "../common/mod.rs"]
mod common;
use common::*;

use pretty_assertions::assert_eq;
use shaderfuzz_ir::shared::models::builder::*;
use shaderfuzz_ir::shared::models::{
    BinaryOp, Program, ShadingLanguageVersion, Stmt, Type, UnaryOp,
};
use shaderfuzz_ir::{VectorizationFinder, VectorizationReductionOpportunity};

const BC: &str = "GLF_merged2_0_1_1_1_1_1bc";
const ABC: &str = "GLF_merged3_0_1_1_1_1_1_2_1_1abc";
/// vec4 holding `ABC` in xyz and `a` in w
const NESTED: &str = "GLF_merged2_0_3_32_3_1_1GLF_merged3_0_1_1_1_1_1_2_1_1abca";
/// vec4 holding `P`, `Q` and the vec2 `PQ` merge
const PQ_OUTER: &str = "GLF_merged3_0_1_1_1_1_1_2_2_25PQGLF_merged2_0_1_1_1_1_1PQ";
const PQ: &str = "GLF_merged2_0_1_1_1_1_1PQ";

fn scan(program: &Program) -> Vec<VectorizationReductionOpportunity> {
    VectorizationFinder::default().find(program)
}

fn reduce(program: &mut Program, vector: &str, component: &str) {
    let finder = VectorizationFinder::default();
    let opportunity = finder
        .find(program)
        .into_iter()
        .find(|o| o.vector_name == vector && o.component_name == component)
        .unwrap_or_else(|| panic!("no opportunity for {component} in {vector}"));
    opportunity.apply(program, finder.config());
}

fn names(opportunities: &[VectorizationReductionOpportunity]) -> Vec<String> {
    opportunities
        .iter()
        .map(|o| format!("{}/{}", o.vector_name, o.component_name))
        .collect()
}

fn float_fn(stmts: Vec<Stmt>) -> Program {
    program(
        ShadingLanguageVersion::Glsl440,
        vec![function(Type::float(), "f", vec![], stmts)],
    )
}

fn m(vector: &str, member: &str) -> shaderfuzz_ir::shared::models::Expr {
    swizzle(ident(vector), member)
}

// ═══════════════════════════════════════════════════════════════════════════
// Nested merges
// ═══════════════════════════════════════════════════════════════════════════

fn nested_vectors() -> Program {
    let nested_xyz = || m(NESTED, "xyz");
    float_fn(vec![
        decl_stmt(Type::vec2(), BC),
        decl_stmt(Type::vec4(), NESTED),
        decl_stmt(Type::vec3(), ABC),
        expr_stmt(assign(nested_xyz(), ident(ABC))),
        decl_init_stmt(Type::float(), "a", float(1.0)),
        expr_stmt(assign(m(NESTED, "w"), ident("a"))),
        expr_stmt(assign(swizzle(nested_xyz(), "x"), m(NESTED, "w"))),
        decl_init_stmt(Type::float(), "b", float(2.0)),
        expr_stmt(assign(m(BC, "x"), ident("b"))),
        expr_stmt(assign(swizzle(nested_xyz(), "y"), m(BC, "x"))),
        decl_init_stmt(Type::float(), "c", float(3.0)),
        expr_stmt(assign(m(BC, "y"), ident("c"))),
        expr_stmt(assign(swizzle(nested_xyz(), "z"), m(BC, "y"))),
        expr_stmt(m(ABC, "x")),
        expr_stmt(m(ABC, "y")),
        expr_stmt(m(ABC, "z")),
        ret(Some(swizzle(nested_xyz(), "x"))),
    ])
}

#[test]
fn nested_vectors_reduce_completely() {
    let mut program = nested_vectors();
    assert_eq!(scan(&program).len(), 7);

    reduce(&mut program, BC, "b");
    reduce(&mut program, ABC, "b");
    reduce(&mut program, NESTED, ABC);
    reduce(&mut program, NESTED, "a");

    // Folding NESTED into ABC exposes fresh ABC accesses
    let mut remaining = names(&scan(&program));
    remaining.sort();
    let mut expected = vec![
        format!("{BC}/c"),
        format!("{ABC}/a"),
        format!("{ABC}/b"),
        format!("{ABC}/c"),
    ];
    expected.sort();
    assert_eq!(remaining, expected);

    reduce(&mut program, BC, "c");
    reduce(&mut program, ABC, "a");
    reduce(&mut program, ABC, "b");
    reduce(&mut program, ABC, "c");
    assert!(scan(&program).is_empty());

    let copy = |name: &str| expr_stmt(assign(ident(name), ident(name)));
    let expected = float_fn(vec![
        decl_stmt(Type::vec2(), BC),
        decl_stmt(Type::vec4(), NESTED),
        decl_stmt(Type::vec3(), ABC),
        copy(ABC),
        decl_init_stmt(Type::float(), "a", float(1.0)),
        copy("a"),
        copy("a"),
        decl_init_stmt(Type::float(), "b", float(2.0)),
        copy("b"),
        copy("b"),
        decl_init_stmt(Type::float(), "c", float(3.0)),
        copy("c"),
        copy("c"),
        expr_stmt(ident("a")),
        expr_stmt(ident("b")),
        expr_stmt(ident("c")),
        ret(Some(ident("a"))),
    ]);
    assert_eq!(program, expected);
}

#[test]
fn inner_merge_becomes_an_identifier() {
    let mut program = glsl_main(vec![
        decl_stmt(Type::vec4(), PQ_OUTER),
        expr_stmt(m(PQ_OUTER, "x")),
        expr_stmt(m(PQ_OUTER, "y")),
        expr_stmt(m(PQ_OUTER, "zw")),
    ]);
    let found = scan(&program);
    assert_eq!(found.len(), 3);
    assert_eq!(
        found.iter().find(|o| o.component_name == PQ).map(|o| o.component_type.clone()),
        Some(Type::vec2())
    );

    reduce(&mut program, PQ_OUTER, "P");
    reduce(&mut program, PQ_OUTER, "Q");
    reduce(&mut program, PQ_OUTER, PQ);

    assert_eq!(
        program,
        glsl_main(vec![
            decl_stmt(Type::float(), "P"),
            decl_stmt(Type::float(), "Q"),
            decl_stmt(Type::vec2(), PQ),
            decl_stmt(Type::vec4(), PQ_OUTER),
            expr_stmt(ident("P")),
            expr_stmt(ident("Q")),
            expr_stmt(ident(PQ)),
        ])
    );
    // The extracted vec2 is itself a merge, but nothing swizzles it
    assert!(scan(&program).is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Placement
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn extraction_inside_dead_block() {
    let dead = "GLF_merged1_3_1_10GLF_dead3r";
    let counter = || ident("GLF_dead3r");
    let loop_stmt = for_loop(
        decl_init_stmt(Type::int(), "GLF_dead3r", int(0)),
        Some(binary(BinaryOp::Lt, counter(), int(15))),
        Some(unary(UnaryOp::PostInc, counter())),
        block(vec![]),
    );
    let guarded = |stmts: Vec<Stmt>| {
        glsl_main(vec![if_then(
            call("_GLF_DEAD", vec![boolean(false)]),
            block(stmts),
        )])
    };

    let mut program = guarded(vec![
        decl_stmt(Type::vec4(), dead),
        expr_stmt(m(dead, "w")),
        loop_stmt.clone(),
    ]);
    assert_eq!(names(&scan(&program)), vec![format!("{dead}/GLF_dead3r")]);

    reduce(&mut program, dead, "GLF_dead3r");
    assert_eq!(
        program,
        guarded(vec![
            decl_stmt(Type::float(), "GLF_dead3r"),
            decl_stmt(Type::vec4(), dead),
            expr_stmt(counter()),
            loop_stmt,
        ])
    );
}

#[test]
fn declarations_stack_up_before_the_vector() {
    let layout = "GLF_merged3_0_1_1_1_1_1_3_1_1abc";
    let write = |target, value| expr_stmt(assign(target, float(value)));
    let mut program = glsl_main(vec![
        decl_stmt(Type::vec4(), layout),
        write(m(layout, "x"), 2.0),
        write(m(layout, "y"), 3.0),
        write(m(layout, "w"), 1.0),
    ]);

    for component in ["a", "c", "b"] {
        reduce(&mut program, layout, component);
    }

    assert_eq!(
        program,
        glsl_main(vec![
            decl_stmt(Type::float(), "a"),
            decl_stmt(Type::float(), "c"),
            decl_stmt(Type::float(), "b"),
            decl_stmt(Type::vec4(), layout),
            write(ident("a"), 2.0),
            write(ident("b"), 3.0),
            write(ident("c"), 1.0),
        ])
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Shadowing and conflicts
// ═══════════════════════════════════════════════════════════════════════════

/// `{ float b; bool c; { vec2 bc; bc.x; bc.y; <inner> } }`
fn outer_declarations(inner: Vec<Stmt>) -> Program {
    let mut nested = vec![
        decl_stmt(Type::vec2(), BC),
        expr_stmt(m(BC, "x")),
        expr_stmt(m(BC, "y")),
    ];
    nested.extend(inner);
    glsl_main(vec![
        decl_stmt(Type::float(), "b"),
        decl_stmt(Type::bool(), "c"),
        block(nested),
    ])
}

#[test]
fn outer_variable_read_in_scope_blocks_extraction() {
    let program = outer_declarations(vec![
        expr_stmt(assign(ident("b"), float(2.0))),
        expr_stmt(assign(ident("c"), boolean(false))),
    ]);
    assert!(scan(&program).is_empty());
}

#[test]
fn only_the_captured_constituent_is_blocked() {
    let mut program = outer_declarations(vec![expr_stmt(assign(ident("c"), boolean(false)))]);
    assert_eq!(names(&scan(&program)), vec![format!("{BC}/b")]);

    reduce(&mut program, BC, "b");
    assert_eq!(
        program,
        glsl_main(vec![
            decl_stmt(Type::float(), "b"),
            decl_stmt(Type::bool(), "c"),
            block(vec![
                decl_stmt(Type::float(), "b"),
                decl_stmt(Type::vec2(), BC),
                expr_stmt(ident("b")),
                expr_stmt(m(BC, "y")),
                expr_stmt(assign(ident("c"), boolean(false))),
            ]),
        ])
    );
}

#[test]
fn earlier_group_member_reading_outer_name_blocks_extraction() {
    // float b = 5.0; { vec2 w = vec2(b, b), bc; bc.x; bc.y; }
    let group = || {
        Stmt::Decl(decl(
            Type::vec2(),
            vec![
                var_init("w", call("vec2", vec![ident("b"), ident("b")])),
                var(BC),
            ],
        ))
    };
    let mut program = glsl_main(vec![
        decl_init_stmt(Type::float(), "b", float(5.0)),
        block(vec![group(), expr_stmt(m(BC, "x")), expr_stmt(m(BC, "y"))]),
    ]);
    assert_eq!(names(&scan(&program)), vec![format!("{BC}/c")]);

    reduce(&mut program, BC, "c");
    assert_eq!(
        program,
        glsl_main(vec![
            decl_init_stmt(Type::float(), "b", float(5.0)),
            block(vec![
                decl_stmt(Type::float(), "c"),
                group(),
                expr_stmt(m(BC, "x")),
                expr_stmt(ident("c")),
            ]),
        ])
    );
}

#[test]
fn incompatible_same_scope_declarations() {
    let program = glsl_main(vec![
        decl_stmt(Type::vec2(), BC),
        decl_stmt(Type::int(), "b"),
        decl_stmt(Type::bool(), "c"),
        expr_stmt(m(BC, "x")),
        expr_stmt(m(BC, "y")),
    ]);
    assert!(scan(&program).is_empty());
}

#[test]
fn non_vector_merges_in_outer_scope_are_ignored() {
    let c_merge = "GLF_merged1_1_1_1c";
    let inner = |x, y| {
        block(vec![
            decl_stmt(Type::vec2(), BC),
            expr_stmt(x),
            expr_stmt(y),
            expr_stmt(assign(ident(c_merge), int(2))),
        ])
    };
    let outer = |body: Stmt| {
        glsl_main(vec![
            decl_stmt(Type::int(), c_merge),
            decl_stmt(Type::int(), "GLF_merged1_0_1_1b"),
            body,
        ])
    };

    let mut program = outer(inner(m(BC, "x"), m(BC, "y")));
    let found = scan(&program);
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|o| o.component_type == Type::float()));

    reduce(&mut program, BC, "b");
    reduce(&mut program, BC, "c");

    let expected = glsl_main(vec![
        decl_stmt(Type::int(), c_merge),
        decl_stmt(Type::int(), "GLF_merged1_0_1_1b"),
        block(vec![
            decl_stmt(Type::float(), "b"),
            decl_stmt(Type::float(), "c"),
            decl_stmt(Type::vec2(), BC),
            expr_stmt(ident("b")),
            expr_stmt(ident("c")),
            expr_stmt(assign(ident(c_merge), int(2))),
        ]),
    ]);
    assert_eq!(program, expected);
}

// ═══════════════════════════════════════════════════════════════════════════
// Lifecycle
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn each_application_removes_exactly_one_opportunity() {
    let mut program = glsl_main(vec![
        decl_stmt(Type::vec3(), ABC),
        expr_stmt(m(ABC, "x")),
        expr_stmt(m(ABC, "y")),
        expr_stmt(m(ABC, "z")),
    ]);
    let finder = VectorizationFinder::default();

    let mut steps = 0;
    while let Some(next) = finder.find(&program).into_iter().next() {
        let before = finder.find(&program).len();
        next.apply(&mut program, finder.config());
        let after = finder.find(&program);
        assert_eq!(after.len(), before - 1);
        assert!(!after.iter().any(|o| o.targets(&next)));
        steps += 1;
    }
    assert_eq!(steps, 3);
}

#[test]
fn applying_twice_is_fatal() {
    let mut program = glsl_main(vec![decl_stmt(Type::vec2(), BC), expr_stmt(m(BC, "x"))]);
    let finder = VectorizationFinder::default();
    let opportunity = finder.find(&program).remove(0);
    opportunity.apply(&mut program, finder.config());

    let result = std::panic::catch_unwind(move || {
        let mut program = program;
        opportunity.apply(&mut program, &Default::default());
    });
    assert!(result.is_err());
}

// ═══════════════════════════════════════════════════════════════════════════
// Repeated scalar components
// ═══════════════════════════════════════════════════════════════════════════

/// `void main() { vec2 bc; bc.x; bc.xx; }`
fn repeated_component(version: ShadingLanguageVersion) -> Program {
    main_with(
        version,
        vec![
            decl_stmt(Type::vec2(), BC),
            expr_stmt(m(BC, "x")),
            expr_stmt(m(BC, "xx")),
        ],
    )
}

#[test]
fn repeated_scalar_component_becomes_constructor_under_webgl() {
    let mut program = repeated_component(ShadingLanguageVersion::WebGl1);
    assert_eq!(names(&scan(&program)), vec![format!("{BC}/b")]);

    reduce(&mut program, BC, "b");
    assert_eq!(
        program,
        main_with(
            ShadingLanguageVersion::WebGl1,
            vec![
                decl_stmt(Type::float(), "b"),
                decl_stmt(Type::vec2(), BC),
                expr_stmt(ident("b")),
                expr_stmt(call("vec2", vec![ident("b")])),
            ],
        )
    );
}

#[test]
fn repeated_scalar_component_keeps_swizzle_under_glsl_440() {
    let mut program = repeated_component(ShadingLanguageVersion::Glsl440);
    reduce(&mut program, BC, "b");
    assert_eq!(
        program,
        glsl_main(vec![
            decl_stmt(Type::float(), "b"),
            decl_stmt(Type::vec2(), BC),
            expr_stmt(ident("b")),
            expr_stmt(m("b", "xx")),
        ])
    );
}

//! Shader fixtures

use shaderfuzz_ir::shared::models::builder::*;
use shaderfuzz_ir::shared::models::{BinaryOp, Program, ShadingLanguageVersion, Stmt, Type, UnaryOp};

/// `void main() { <stmts> }`
pub fn main_with(version: ShadingLanguageVersion, stmts: Vec<Stmt>) -> Program {
    program(version, vec![function(Type::Void, "main", vec![], stmts)])
}

/// `void main() { <stmts> }` under GLSL 4.40
pub fn glsl_main(stmts: Vec<Stmt>) -> Program {
    main_with(ShadingLanguageVersion::Glsl440, stmts)
}

/// ```glsl
/// void main() {
///   int x = 0;
///   int j = 0;
///   for (int x = 0; x < 100; x++) { j += x; }
/// }
/// ```
pub fn compound_increment_loop(version: ShadingLanguageVersion) -> Program {
    main_with(
        version,
        vec![
            decl_init_stmt(Type::int(), "x", int(0)),
            decl_init_stmt(Type::int(), "j", int(0)),
            for_loop(
                decl_init_stmt(Type::int(), "x", int(0)),
                Some(binary(BinaryOp::Lt, ident("x"), int(100))),
                Some(unary(UnaryOp::PostInc, ident("x"))),
                block(vec![expr_stmt(binary(
                    BinaryOp::AddAssign,
                    ident("j"),
                    ident("x"),
                ))]),
            ),
        ],
    )
}

/// ```glsl
/// void main() {
///   int j = 0;
///   for (int x = 0; x < 100; x++) { j = j + 1; }
/// }
/// ```
pub fn plain_increment_loop(version: ShadingLanguageVersion) -> Program {
    main_with(
        version,
        vec![
            decl_init_stmt(Type::int(), "j", int(0)),
            for_loop(
                decl_init_stmt(Type::int(), "x", int(0)),
                Some(binary(BinaryOp::Lt, ident("x"), int(100))),
                Some(unary(UnaryOp::PostInc, ident("x"))),
                block(vec![expr_stmt(assign(
                    ident("j"),
                    binary(BinaryOp::Add, ident("j"), int(1)),
                ))]),
            ),
        ],
    )
}

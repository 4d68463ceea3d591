//! Mutation point application

use tracing::{debug, error};

use crate::features::mutation_points::domain::{IdentityKind, MutationPoint};
use crate::shared::models::{Expr, Literal, Program, Type};
use crate::shared::ports::{choose, RandomSource};
use crate::shared::utils::expr_at_mut;

impl MutationPoint {
    /// Wrap the expression in one identity picked through `random`.
    ///
    /// # Panics
    /// When the expression at this point's ordinal no longer matches the
    /// scanned snapshot (the point is stale).
    pub fn apply(&self, program: &mut Program, random: &mut dyn RandomSource) {
        let Some(target) = expr_at_mut(program, self.ordinal).filter(|expr| **expr == self.snapshot)
        else {
            error!(ordinal = self.ordinal, expr = %self.text(), "Stale mutation point");
            panic!(
                "stale mutation point #{} `{}`: expression no longer present",
                self.ordinal,
                self.text()
            );
        };

        let identity = choose(random, &self.identities)
            .copied()
            .unwrap_or(IdentityKind::Parenthesize);
        let elem = self.ty.as_ref().and_then(Type::element);
        let original = std::mem::replace(target, Expr::Literal(Literal::Bool(false)));
        *target = identity.wrap(original, elem);
        debug!(ordinal = self.ordinal, ?identity, result = %target, "Applied mutation identity");
    }
}

#[cfg(test)]
mod tests {
    use crate::features::mutation_points::MutationPointFinder;
    use crate::infrastructure::{CannedRandom, ZeroRandom};
    use crate::shared::models::builder::*;
    use crate::shared::models::{BinaryOp, Program, ShadingLanguageVersion, Type};
    use crate::shared::utils::expr_at;

    fn sample() -> Program {
        // void main() { float x; x = x * 2.0; }
        program(
            ShadingLanguageVersion::Glsl440,
            vec![function(
                Type::Void,
                "main",
                vec![],
                vec![
                    decl_stmt(Type::float(), "x"),
                    expr_stmt(assign(ident("x"), binary(BinaryOp::Mul, ident("x"), float(2.0)))),
                ],
            )],
        )
    }

    #[test]
    fn test_apply_picks_identity_from_random_source() {
        let mut program = sample();
        let points = MutationPointFinder::default().find(&program);
        assert_eq!(points[0].text(), "x * 2.0");

        // Identities for float: Parenthesize, AddZero, MulOne
        points[0].apply(&mut program, &mut CannedRandom::new([1]));
        assert_eq!(
            expr_at(&program, 0).unwrap().to_string(),
            "x = ((x * 2.0) + 0.0)"
        );
    }

    #[test]
    fn test_applied_point_is_not_reported_again() {
        let mut program = sample();
        let finder = MutationPointFinder::default();
        let before = finder.find(&program);
        before[1].apply(&mut program, &mut ZeroRandom);

        let after = finder.find(&program);
        assert!(after
            .iter()
            .all(|p| (p.ordinal, p.text()) != (before[1].ordinal, before[1].text())));
        assert_eq!(after.len(), before.len() + 1);
    }

    #[test]
    #[should_panic(expected = "stale mutation point")]
    fn test_stale_point_panics() {
        let mut program = sample();
        let points = MutationPointFinder::default().find(&program);
        points[0].apply(&mut program, &mut ZeroRandom);
        points[0].apply(&mut program, &mut ZeroRandom);
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Compiled expression trees.
//!
//! An [`Expr`] is produced once by [`ParsingContext`] from raw JSON and is
//! immutable afterwards. Every node variant implements [`Expression`]; wrapper
//! variants additionally expose [`TypeWrapper`].

pub mod definitions;
mod error;
mod evaluation_context;
mod parsing_context;


pub use error::{EvaluationError, ParsingError, ParsingErrors};
pub use evaluation_context::{EvaluationContext, Feature, FeatureProperties, Globals};
pub use parsing_context::ParsingContext;

use crate::types::Type;
use crate::value::Value;
use definitions::{ArrayAssertion, Assertion, Coalesce, Coercion, Get, Has, Literal, Zoom};

/// Behavior shared by every expression node.
pub trait Expression {
    /// Type resolved for this node at parse time.
    fn ty(&self) -> &Type;

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, EvaluationError>;

    /// Call `f` once for each direct child, in declared order.
    fn each_child(&self, f: &mut dyn FnMut(&Expr));

    /// Statically known outputs of this node.
    ///
    /// Outputs that cannot be enumerated are reported as
    /// [`PossibleOutput::Unknown`] rather than being left out.
    fn possible_outputs(&self) -> Vec<PossibleOutput>;
}

/// Single-child node that enforces or converts the type of its input.
pub trait TypeWrapper {
    fn input(&self) -> &Expr;

    /// True when the parser inserted this node to satisfy an expected type
    /// the author did not write.
    fn inferred(&self) -> bool;
}

/// One statically determined output of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PossibleOutput {
    Known(Value),
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Get(Get),
    Has(Has),
    Zoom(Zoom),
    Assertion(Assertion),
    Coercion(Coercion),
    ArrayAssertion(ArrayAssertion),
    Coalesce(Coalesce),
}

impl Expr {
    fn node(&self) -> &dyn Expression {
        match self {
            Expr::Literal(e) => e,
            Expr::Get(e) => e,
            Expr::Has(e) => e,
            Expr::Zoom(e) => e,
            Expr::Assertion(e) => e,
            Expr::Coercion(e) => e,
            Expr::ArrayAssertion(e) => e,
            Expr::Coalesce(e) => e,
        }
    }

    pub fn as_type_wrapper(&self) -> Option<&dyn TypeWrapper> {
        match self {
            Expr::Assertion(e) => Some(e),
            Expr::Coercion(e) => Some(e),
            Expr::ArrayAssertion(e) => Some(e),
            _ => None,
        }
    }

    /// Replace a parser inserted wrapper by its input.
    ///
    /// Nodes that are not inferred wrappers are handed back in `Err`.
    pub fn strip_inferred_wrapper(self) -> Result<Expr, Expr> {
        if !self.as_type_wrapper().is_some_and(|w| w.inferred()) {
            return Err(self);
        }
        match self {
            Expr::Assertion(e) => Ok(*e.input),
            Expr::Coercion(e) => Ok(*e.input),
            Expr::ArrayAssertion(e) => Ok(*e.input),
            other => Err(other),
        }
    }

    /// Visit this node and all of its descendants, parents first.
    pub fn walk(&self, f: &mut dyn FnMut(&Expr)) {
        f(self);
        self.each_child(&mut |child| child.walk(f));
    }
}

impl Expression for Expr {
    fn ty(&self) -> &Type {
        self.node().ty()
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, EvaluationError> {
        self.node().evaluate(ctx)
    }

    fn each_child(&self, f: &mut dyn FnMut(&Expr)) {
        self.node().each_child(f)
    }

    fn possible_outputs(&self) -> Vec<PossibleOutput> {
        self.node().possible_outputs()
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Typed interpreter for declarative style expressions.
//!
//! Expressions are written as nested JSON arrays such as
//! `["coalesce", ["get", "name"], "unknown"]`. They are compiled once into a
//! typed [`Expr`] tree and then evaluated repeatedly against a fresh
//! [`EvaluationContext`].

mod color;
mod expression;
mod style_expression;
mod types;
mod value;

#[cfg(feature = "arc")]
pub use std::sync::Arc as Rc;

#[cfg(not(feature = "arc"))]
pub use std::rc::Rc;

pub use color::Color;
pub use expression::{
    EvaluationContext, EvaluationError, Expr, Expression, Feature, FeatureProperties, Globals,
    ParsingContext, ParsingError, ParsingErrors, PossibleOutput, TypeWrapper,
};
pub use style_expression::{compile, compile_expression, PropertySpec, StyleExpression};
pub use types::{check_subtype, type_of, Type};
pub use value::Value;

/// Items in `unstable` are likely to change.
pub mod unstable {
    pub use crate::expression::definitions::*;
}

#[cfg(test)]
mod tests;

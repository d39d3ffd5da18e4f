// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Expression variants and the operator table used to parse them.

mod array_assertion;
mod assertion;
mod coalesce;
mod coercion;
mod get;
mod literal;
mod zoom;

pub use array_assertion::ArrayAssertion;
pub use assertion::Assertion;
pub use coalesce::Coalesce;
pub use coercion::Coercion;
pub use get::{Get, Has};
pub use literal::Literal;
pub use zoom::Zoom;

use crate::expression::{Expr, ParsingContext};
use crate::value::Value;

use std::collections::BTreeMap;

use lazy_static::lazy_static;

/// Parses the arguments of an operator, `args[0]` being the operator name.
pub type ParseFn = fn(&[Value], &mut ParsingContext<'_>) -> Option<Expr>;

#[rustfmt::skip]
lazy_static! {
    pub static ref DEFINITIONS: BTreeMap<&'static str, ParseFn> = {
	let mut m : BTreeMap<&'static str, ParseFn> = BTreeMap::new();

	array_assertion::register(&mut m);
	assertion::register(&mut m);
	coalesce::register(&mut m);
	coercion::register(&mut m);
	get::register(&mut m);
	literal::register(&mut m);
	zoom::register(&mut m);

	m
    };
}

// Number of operands following the operator name.
fn operand_count(args: &[Value]) -> usize {
    args.len().saturating_sub(1)
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use crate::color::Color;
use crate::expression::{
    EvaluationContext, EvaluationError, Expr, Expression, ParsingContext, PossibleOutput,
    TypeWrapper,
};
use crate::types::Type;
use crate::value::Value;

use super::{operand_count, ParseFn};

pub(super) fn register(m: &mut BTreeMap<&'static str, ParseFn>) {
    m.insert("to-boolean", Coercion::parse);
    m.insert("to-color", Coercion::parse);
    m.insert("to-number", Coercion::parse);
    m.insert("to-string", Coercion::parse);
}

/// Converts its input to the target type, failing only when no conversion
/// exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Coercion {
    ty: Type,
    pub(crate) input: Box<Expr>,
    inferred: bool,
}

impl Coercion {
    pub fn new(ty: Type, input: Expr, inferred: bool) -> Self {
        Self {
            ty,
            input: Box::new(input),
            inferred,
        }
    }

    pub fn parse(args: &[Value], ctx: &mut ParsingContext<'_>) -> Option<Expr> {
        let ty = match args.first() {
            Some(Value::String(name)) => match name.as_ref() {
                "to-boolean" => Type::Boolean,
                "to-color" => Type::Color,
                "to-number" => Type::Number,
                "to-string" => Type::String,
                _ => return ctx.error(format!("Unknown coercion \"{name}\".")),
            },
            _ => return ctx.error("Expected a coercion name."),
        };

        let [_, input] = args else {
            return ctx.error(format!(
                "Expected 1 argument, but found {} instead.",
                operand_count(args)
            ));
        };
        let input = ctx.parse(input, 1, Some(&Type::Value))?;
        Some(Expr::Coercion(Self::new(ty, input, false)))
    }

    fn convert(&self, value: Value) -> Result<Value, EvaluationError> {
        match self.ty {
            Type::Boolean => Ok(Value::Bool(to_boolean(&value))),
            Type::String => Ok(Value::from(to_string(&value))),
            Type::Number => to_number(value),
            Type::Color => to_color(value),
            _ => Ok(value),
        }
    }
}

fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Color(_) | Value::Array(_) | Value::Object(_) => true,
    }
}

fn to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.to_string(),
        Value::Color(c) => c.to_string(),
        _ => value.to_string(),
    }
}

fn to_number(value: Value) -> Result<Value, EvaluationError> {
    let n = match &value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => *n,
        Value::String(s) if s.trim().is_empty() => 0.0,
        // Spellings such as "inf" or "NaN" are not numbers.
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(f64::NAN),
        _ => f64::NAN,
    };
    if n.is_nan() {
        return Err(EvaluationError::NumberConversion { value });
    }
    Ok(Value::Number(n))
}

fn to_color(value: Value) -> Result<Value, EvaluationError> {
    let color = match &value {
        Value::Color(c) => Some(*c),
        Value::String(s) => Color::parse(s),
        Value::Array(channels) => match channels.as_slice() {
            [Value::Number(r), Value::Number(g), Value::Number(b)] => {
                Color::from_rgba8(*r, *g, *b, 1.0)
            }
            [Value::Number(r), Value::Number(g), Value::Number(b), Value::Number(a)] => {
                Color::from_rgba8(*r, *g, *b, *a)
            }
            _ => None,
        },
        _ => None,
    };
    color.map(Value::Color).ok_or_else(|| {
        let value = match &value {
            Value::String(s) => s.to_string(),
            other => other.to_string(),
        };
        EvaluationError::ColorConversion { value }
    })
}

impl TypeWrapper for Coercion {
    fn input(&self) -> &Expr {
        &self.input
    }

    fn inferred(&self) -> bool {
        self.inferred
    }
}

impl Expression for Coercion {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Value, EvaluationError> {
        let value = self.input.evaluate(ctx)?;
        self.convert(value)
    }

    fn each_child(&self, f: &mut dyn FnMut(&Expr)) {
        f(self.input.as_ref())
    }

    // Known inputs are converted ahead of time; inputs that would fail to
    // convert cannot be predicted and become unknown.
    fn possible_outputs(&self) -> Vec<PossibleOutput> {
        self.input
            .possible_outputs()
            .into_iter()
            .map(|output| match output {
                PossibleOutput::Known(v) => self
                    .convert(v)
                    .map_or(PossibleOutput::Unknown, PossibleOutput::Known),
                PossibleOutput::Unknown => PossibleOutput::Unknown,
            })
            .collect()
    }
}

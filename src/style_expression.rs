// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::color::Color;
use crate::expression::{
    EvaluationContext, EvaluationError, Expr, Expression, ParsingContext, ParsingError,
    ParsingErrors,
};
use crate::types::Type;
use crate::value::Value;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use spin::Mutex;
use tracing::{debug, warn};

/// Description of the style property an expression computes.
///
/// ```json
/// { "type": "array", "value": "number", "length": 2, "default": [0, 0] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PropertySpec {
    #[serde(rename = "type")]
    pub kind: String,

    /// Item type of array properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Length of fixed size array properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl PropertySpec {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            value: None,
            length: None,
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Type expressions for this property must produce.
    pub fn expected_type(&self) -> Option<Type> {
        match self.kind.as_str() {
            // Enumerations are validated by the style document, not here.
            "enum" => Some(Type::String),
            "array" => {
                let item_type = match &self.value {
                    Some(item) => Type::from_kind(item)?,
                    None => Type::Value,
                };
                Some(Type::array(item_type, self.length))
            }
            kind => Type::from_kind(kind),
        }
    }

    /// Default value in its runtime representation.
    pub fn default_value(&self) -> Value {
        match (&self.default, self.kind.as_str()) {
            (Some(Value::String(s)), "color") => {
                Color::parse(s).map_or(Value::Null, Value::Color)
            }
            (Some(v), _) => v.clone(),
            (None, _) => Value::Null,
        }
    }
}

/// Compile `raw` into an expression tree.
///
/// When `expected` is given, the tree is guaranteed to produce values of that
/// type or fail at evaluation time.
pub fn compile_expression(raw: &Value, expected: Option<&Type>) -> Result<Expr, ParsingErrors> {
    let mut errors = Vec::new();
    let parsed = ParsingContext::new(&mut errors, expected.cloned()).parse_expression(raw);
    match parsed {
        Some(expr) if errors.is_empty() => Ok(expr),
        _ => {
            debug!(errors = errors.len(), "expression failed to compile");
            Err(ParsingErrors(errors))
        }
    }
}

/// Compile the expression of a style property.
pub fn compile(raw: &Value, spec: Option<&PropertySpec>) -> Result<StyleExpression, ParsingErrors> {
    let expected = match spec {
        Some(spec) => match spec.expected_type() {
            Some(t) => Some(t),
            None => {
                return Err(ParsingErrors(vec![ParsingError {
                    key: String::new(),
                    message: format!("Unknown property type \"{}\".", spec.kind),
                }]))
            }
        },
        None => None,
    };

    let expression = compile_expression(raw, expected.as_ref())?;
    let default_value = spec.map_or(Value::Null, PropertySpec::default_value);
    Ok(StyleExpression::new(expression, default_value))
}

/// A compiled property expression with its fallback value.
///
/// Evaluation errors do not escape [`StyleExpression::evaluate`]; the default
/// value is returned instead and each distinct error is reported once.
#[derive(Debug)]
pub struct StyleExpression {
    expression: Expr,
    default_value: Value,
    warnings: Mutex<BTreeSet<String>>,
}

impl StyleExpression {
    pub fn new(expression: Expr, default_value: Value) -> Self {
        Self {
            expression,
            default_value,
            warnings: Mutex::new(BTreeSet::new()),
        }
    }

    pub fn expression(&self) -> &Expr {
        &self.expression
    }

    pub fn default_value(&self) -> &Value {
        &self.default_value
    }

    pub fn evaluate_without_error_handling(
        &self,
        ctx: &EvaluationContext<'_>,
    ) -> Result<Value, EvaluationError> {
        self.expression.evaluate(ctx)
    }

    pub fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Value {
        match self.expression.evaluate(ctx) {
            Ok(Value::Null) => self.default_value.clone(),
            Ok(value) => value,
            Err(e) => {
                let message = e.to_string();
                if self.warnings.lock().insert(message.clone()) {
                    warn!(error = %message, "style expression evaluation failed");
                }
                self.default_value.clone()
            }
        }
    }
}

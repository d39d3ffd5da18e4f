// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(test)]

use anyhow::{anyhow, Result};
use styleexpr::*;

fn compile_json(expression: &str, spec: &str) -> Result<StyleExpression> {
    let spec = PropertySpec::from_json_str(spec)?;
    compile(&Value::from_json_str(expression)?, Some(&spec)).map_err(|e| anyhow!("{e}"))
}

#[test]
fn property_spec_types() -> Result<()> {
    let spec = PropertySpec::from_json_str(r#"{ "type": "number", "default": 1 }"#)?;
    assert_eq!(spec.expected_type(), Some(Type::Number));
    assert_eq!(spec.default_value(), Value::from(1.0));

    let spec = PropertySpec::from_json_str(
        r#"{ "type": "array", "value": "number", "length": 2, "default": [0, 0] }"#,
    )?;
    assert_eq!(spec.expected_type(), Some(Type::array(Type::Number, Some(2))));

    let spec = PropertySpec::from_json_str(r##"{ "type": "color", "default": "#000" }"##)?;
    assert_eq!(spec.default_value(), Value::from(Color::BLACK));

    assert_eq!(PropertySpec::new("enum").expected_type(), Some(Type::String));
    assert_eq!(PropertySpec::new("formatted").expected_type(), None);
    Ok(())
}

#[test]
fn default_replaces_null() -> Result<()> {
    let style = compile_json(
        r#"["coalesce", ["get", "width"], ["get", "size"]]"#,
        r#"{ "type": "value", "default": 2 }"#,
    )?;
    let ctx = EvaluationContext::default();
    assert_eq!(style.evaluate_without_error_handling(&ctx)?, Value::Null);
    assert_eq!(style.evaluate(&ctx), Value::from(2.0));
    Ok(())
}

#[test]
fn default_replaces_errors() -> Result<()> {
    let style = compile_json(r#"["get", "width"]"#, r#"{ "type": "number", "default": 1 }"#)?;

    let feature = FeatureProperties::new(Value::from_json_str(r#"{ "width": "wide" }"#)?);
    let ctx = EvaluationContext::default().with_feature(&feature);
    assert!(style.evaluate_without_error_handling(&ctx).is_err());

    // Repeated failures are reported once but always fall back.
    for _ in 0..3 {
        assert_eq!(style.evaluate(&ctx), Value::from(1.0));
    }

    let feature = FeatureProperties::new(Value::from_json_str(r#"{ "width": 4 }"#)?);
    let ctx = EvaluationContext::default().with_feature(&feature);
    assert_eq!(style.evaluate(&ctx), Value::from(4.0));
    Ok(())
}

#[test]
fn compiled_expressions_are_reusable() -> Result<()> {
    let style = compile_json(
        r#"["coalesce", ["get", "label"], ["to-string", ["zoom"]]]"#,
        r#"{ "type": "string", "default": "" }"#,
    )?;

    let labelled = FeatureProperties::new(Value::from_json_str(r#"{ "label": "Main St" }"#)?);
    let unlabelled = FeatureProperties::new(Value::new_object());

    for zoom in [1.0, 2.0, 3.0] {
        let ctx = EvaluationContext::with_zoom(zoom).with_feature(&labelled);
        assert_eq!(style.evaluate(&ctx), Value::from("Main St"));

        let ctx = EvaluationContext::with_zoom(zoom).with_feature(&unlabelled);
        assert_eq!(style.evaluate(&ctx), Value::from(zoom.to_string().as_str()));
    }
    Ok(())
}

#[test]
fn compile_errors_are_collected() -> Result<()> {
    let raw = Value::from_json_str(r#"["coalesce", ["get", 1], "x"]"#)?;
    let spec = PropertySpec::new("string");
    let Err(errors) = compile(&raw, Some(&spec)) else {
        panic!("compilation should fail");
    };
    assert!(!errors.is_empty());
    let first = errors.iter().next().ok_or_else(|| anyhow!("no errors"))?;
    assert_eq!(first.key, "[1][1]");
    assert_eq!(
        errors.to_string(),
        "[1][1]: Expected string but found number instead."
    );
    Ok(())
}

#[test]
fn unknown_property_type() -> Result<()> {
    let raw = Value::from(1.0);
    let spec = PropertySpec::new("gradient");
    let errors = compile(&raw, Some(&spec)).err().ok_or_else(|| anyhow!("compiled"))?;
    assert_eq!(errors.len(), 1);
    Ok(())
}

#[test]
fn compile_without_property() -> Result<()> {
    let style = compile(&Value::from_json_str(r#"["has", "name"]"#)?, None)
        .map_err(|e| anyhow!("{e}"))?;
    assert_eq!(*style.expression().ty(), Type::Boolean);
    assert_eq!(*style.default_value(), Value::Null);
    assert_eq!(style.evaluate(&EvaluationContext::default()), Value::from(false));
    Ok(())
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(clippy::panic, clippy::unwrap_used)] // yaml tests panic to surface errors

use crate::*;
use anyhow::{bail, Result};
use serde::{Deserialize, Deserializer};
use test_generator::test_resources;

#[derive(Deserialize, Debug)]
struct TestCase {
    note: String,
    expression: Value,
    property: Option<PropertySpec>,
    properties: Option<Value>,
    zoom: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    want_result: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    want_style_result: Option<Value>,
    want_type: Option<String>,
    error: Option<String>,
    skip: Option<bool>,
}

#[derive(Deserialize, Debug)]
struct YamlTest {
    cases: Vec<TestCase>,
}

// An explicit `null` is an expected result, not a missing one.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn check_value(kind: &str, actual: &Value, expected: &Value) -> Result<()> {
    // Compare serialized forms so that colors can be written in css notation.
    if serde_json::to_value(actual)? != serde_json::to_value(expected)? {
        bail!("{kind} mismatch: expected {expected}, got {actual}");
    }
    Ok(())
}

fn run_case(case: &TestCase) -> Result<()> {
    let style = match compile(&case.expression, case.property.as_ref()) {
        Ok(style) => style,
        Err(errors) => match &case.error {
            Some(expected) if errors.to_string().contains(expected.as_str()) => return Ok(()),
            _ => bail!("compile failed:\n{errors}"),
        },
    };

    if let Some(want_type) = &case.want_type {
        let ty = style.expression().ty().to_string();
        if ty != *want_type {
            bail!("type mismatch: expected {want_type}, got {ty}");
        }
    }

    let feature = case.properties.clone().map(FeatureProperties::new);
    let mut ctx = EvaluationContext::new(Globals { zoom: case.zoom });
    if let Some(feature) = &feature {
        ctx = ctx.with_feature(feature);
    }

    match (style.evaluate_without_error_handling(&ctx), &case.error) {
        (Ok(actual), None) => {
            if let Some(expected) = &case.want_result {
                check_value("result", &actual, expected)?;
            }
        }
        (Err(actual), Some(expected)) => {
            let actual = actual.to_string();
            if !actual.contains(expected.as_str()) {
                bail!("Error message\n`{actual}`\ndoes not contain `{expected}`");
            }
        }
        (Ok(actual), Some(_)) => bail!("evaluation succeeded with {actual}"),
        (Err(e), None) => bail!("evaluation failed: {e}"),
    }

    if let Some(expected) = &case.want_style_result {
        check_value("style result", &style.evaluate(&ctx), expected)?;
    }

    Ok(())
}

fn yaml_test_impl(file: &str) -> Result<()> {
    let yaml_str = std::fs::read_to_string(file)?;
    let test: YamlTest = serde_yaml::from_str(&yaml_str)?;

    std::println!("running {file}");

    for case in &test.cases {
        std::print!("case {} ", case.note);
        if case.skip == Some(true) {
            std::println!("skipped");
            continue;
        }

        if case.want_result.is_none()
            && case.want_style_result.is_none()
            && case.want_type.is_none()
            && case.error.is_none()
        {
            panic!("either want_result, want_style_result, want_type or error must be specified in test case.");
        }

        if let Err(e) = run_case(case) {
            bail!("case {} failed: {e}", case.note);
        }

        std::println!("passed");
    }

    Ok(())
}

fn yaml_test(file: &str) -> Result<()> {
    match yaml_test_impl(file) {
        Ok(_) => Ok(()),
        Err(e) => {
            // If Err is returned, it doesn't always get printed by cargo test.
            // Therefore, panic with the error.
            panic!("{e}");
        }
    }
}

#[test_resources("tests/expression/**/*.yaml")]
fn run(path: &str) {
    yaml_test(path).unwrap()
}

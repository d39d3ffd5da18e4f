// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::value::Value;

/// Values that are the same for every feature evaluated in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Globals {
    pub zoom: Option<f64>,
}

/// Source of per-item data looked up by `get` and `has`.
pub trait Feature {
    /// Property named `key`, if the feature has one.
    fn property(&self, key: &str) -> Option<Value>;
}

/// [`Feature`] backed by a JSON object of properties.
#[derive(Debug, Clone)]
pub struct FeatureProperties {
    properties: Value,
}

impl FeatureProperties {
    pub fn new(properties: Value) -> Self {
        Self { properties }
    }
}

impl Feature for FeatureProperties {
    fn property(&self, key: &str) -> Option<Value> {
        self.properties
            .as_object()
            .ok()
            .and_then(|props| props.get(key))
            .cloned()
    }
}

/// Runtime data for a single evaluation call.
///
/// Contexts are cheap to build and are expected to be replaced between calls;
/// compiled expressions never hold on to them.
#[derive(Clone, Default)]
pub struct EvaluationContext<'a> {
    pub globals: Globals,
    feature: Option<&'a dyn Feature>,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(globals: Globals) -> Self {
        Self {
            globals,
            feature: None,
        }
    }

    pub fn with_zoom(zoom: f64) -> Self {
        Self::new(Globals { zoom: Some(zoom) })
    }

    pub fn with_feature(mut self, feature: &'a dyn Feature) -> Self {
        self.feature = Some(feature);
        self
    }

    pub fn zoom(&self) -> Option<f64> {
        self.globals.zoom
    }

    /// Property of the current feature, or null if absent.
    pub fn property(&self, key: &str) -> Value {
        self.feature
            .and_then(|f| f.property(key))
            .unwrap_or(Value::Null)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.feature.is_some_and(|f| f.property(key).is_some())
    }
}

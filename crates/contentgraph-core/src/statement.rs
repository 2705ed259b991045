//! # Graph Mutation Statement
//!
//! A `Statement` is one parameterised Cypher operation, always phrased
//! as an upsert (`MERGE` create-if-absent-else-update) so that applying
//! it twice with the same parameters leaves the graph in the same
//! state. The pipeline offers at-least-once delivery, so idempotence
//! is required, not a nicety.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// PARAMETER VALUES
// =============================================================================

/// A Cypher parameter value.
///
/// The mapper only ever produces strings and integers (the derived
/// publication epoch). Keeping the set closed keeps the statement model
/// trivially convertible to any Bolt client's parameter types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// UTF-8 string value.
    Str(String),
    /// 64-bit signed integer value.
    Int(i64),
}

impl ParamValue {
    /// The string content, if this is a string parameter.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// The integer content, if this is an integer parameter.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Str(_) => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

// =============================================================================
// STATEMENT
// =============================================================================

/// One parameterised graph mutation.
///
/// Parameters live in a `BTreeMap` so that two statements built from
/// the same document compare equal and serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    cypher: String,
    params: BTreeMap<String, ParamValue>,
}

impl Statement {
    /// Create a statement with no parameters yet.
    #[must_use]
    pub fn new(cypher: impl Into<String>) -> Self {
        Self {
            cypher: cypher.into(),
            params: BTreeMap::new(),
        }
    }

    /// Bind a parameter, builder-style.
    #[must_use]
    pub fn param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// The Cypher text.
    #[must_use]
    pub fn cypher(&self) -> &str {
        &self.cypher
    }

    /// All bound parameters, in key order.
    #[must_use]
    pub fn params(&self) -> &BTreeMap<String, ParamValue> {
        &self.params
    }

    /// Look up a single parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }
}

// =============================================================================
// TESTS
// =============================================================================

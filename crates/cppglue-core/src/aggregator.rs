//! Aggregation of per-unit results into one model.
//!
//! The aggregator is the only shared-mutable boundary of the pipeline. Unit
//! results arrive through [`ModelAggregator::append`], which serializes writers
//! behind a lock; [`ModelAggregator::finish`] closes the model for emission.

use crate::model::{BindingModel, Function, TypeEntity, UnitResult};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How repeated observations of the same declaration are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep every observation, in arrival order.
    #[default]
    KeepAll,
    /// Keep the first observation, drop later ones.
    KeepFirst,
    /// Later observations replace earlier ones at the earlier position.
    KeepLast,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::KeepAll => "keep-all",
            DuplicatePolicy::KeepFirst => "keep-first",
            DuplicatePolicy::KeepLast => "keep-last",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep-all" => Ok(DuplicatePolicy::KeepAll),
            "keep-first" => Ok(DuplicatePolicy::KeepFirst),
            "keep-last" => Ok(DuplicatePolicy::KeepLast),
            other => Err(format!(
                "unknown duplicate policy '{other}' (expected keep-all, keep-first or keep-last)"
            )),
        }
    }
}

/// Identity of a function: name, owner, and parameter types, so overloads stay distinct.
type FunctionKey = (String, Option<String>, Vec<String>);

fn function_key(function: &Function) -> FunctionKey {
    (
        function.name.qualified.clone(),
        function.owner.as_ref().map(|owner| owner.qualified.clone()),
        function
            .parameters
            .iter()
            .map(|param| param.ty.qualified.clone())
            .collect(),
    )
}

#[derive(Debug, Default)]
struct Accumulators {
    model: BindingModel,
    type_index: HashMap<String, usize>,
    function_index: HashMap<FunctionKey, usize>,
}

impl Accumulators {
    fn push_type(&mut self, policy: DuplicatePolicy, entity: TypeEntity) {
        if policy == DuplicatePolicy::KeepAll {
            self.model.types.push(entity);
            return;
        }

        match self.type_index.get(&entity.name.qualified) {
            Some(&index) => {
                tracing::debug!(name = %entity.name.qualified, %policy, "duplicate type");
                if policy == DuplicatePolicy::KeepLast {
                    self.model.types[index] = entity;
                }
            }
            None => {
                self.type_index
                    .insert(entity.name.qualified.clone(), self.model.types.len());
                self.model.types.push(entity);
            }
        }
    }

    fn push_function(&mut self, policy: DuplicatePolicy, function: Function) {
        if policy == DuplicatePolicy::KeepAll {
            self.model.functions.push(function);
            return;
        }

        let key = function_key(&function);
        match self.function_index.get(&key) {
            Some(&index) => {
                tracing::debug!(name = %function.name.qualified, %policy, "duplicate function");
                if policy == DuplicatePolicy::KeepLast {
                    self.model.functions[index] = function;
                }
            }
            None => {
                self.function_index.insert(key, self.model.functions.len());
                self.model.functions.push(function);
            }
        }
    }
}

/// Owns the model accumulators for a run.
#[derive(Debug, Default)]
pub struct ModelAggregator {
    policy: DuplicatePolicy,
    inner: Mutex<Accumulators>,
}

impl ModelAggregator {
    /// Create an aggregator that keeps every observation.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            inner: Mutex::new(Accumulators::default()),
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Move one unit's result into the model.
    ///
    /// Safe to call from several threads; appends are serialized.
    pub fn append(&self, unit: UnitResult) {
        let mut inner = self.inner.lock();

        tracing::debug!(
            types = unit.types.len(),
            functions = unit.functions.len(),
            headers = unit.headers.len(),
            "appending unit result"
        );

        for entity in unit.types {
            inner.push_type(self.policy, entity);
        }
        for function in unit.functions {
            inner.push_function(self.policy, function);
        }
        inner.model.headers.extend(unit.headers);
    }

    /// Close the aggregator and return the finished model.
    pub fn finish(self) -> BindingModel {
        self.inner.into_inner().model
    }
}

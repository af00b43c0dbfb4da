//! By-name lookup of user supplied objects.
//!
//! Definitions only store reference names (processors, beans, policies,
//! aggregation strategies). Resolving a name to an object is the job of the
//! surrounding container, reached through the [`Registry`] contract. A name
//! that is absent, or registered with another type, is reported as
//! [`WorkflowError::UnresolvedReference`] and never masked.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, IntoStaticStr};

use crate::error::{WorkflowError, WorkflowResult};

/// What a by-name reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Processor,
    Bean,
    Comparator,
    Policy,
    AggregationStrategy,
    LoadBalancer,
    DataFormat,
    RedeliveryPolicy,
    ErrorHandler,
    WorkflowBuilder,
    Template,
}

/// Lookup-by-name contract of the object registry.
pub trait Registry {
    /// Returns the object registered under `name`.
    fn lookup(&self, name: &str) -> Option<&(dyn Any + Send + Sync)>;

    /// Returns whether an object is registered under `name`.
    fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

/// Resolves `name` to an object of type `T`.
pub fn resolve<'r, T, R>(registry: &'r R, kind: ReferenceKind, name: &str) -> WorkflowResult<&'r T>
where
    T: Any,
    R: Registry + ?Sized,
{
    registry
        .lookup(name)
        .and_then(|object| object.downcast_ref::<T>())
        .ok_or_else(|| WorkflowError::unresolved(kind, name))
}

/// In-memory registry.
#[derive(Default)]
pub struct MapRegistry {
    objects: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl MapRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `object` under `name`, replacing any previous entry.
    pub fn insert<T>(&mut self, name: impl Into<String>, object: T)
    where
        T: Any + Send + Sync,
    {
        self.objects.insert(name.into(), Box::new(object));
    }

    /// Registers `object` under `name`.
    pub fn with<T>(mut self, name: impl Into<String>, object: T) -> Self
    where
        T: Any + Send + Sync,
    {
        self.insert(name, object);
        self
    }

    /// Removes the entry registered under `name`.
    pub fn remove(&mut self, name: &str) -> bool {
        self.objects.remove(name).is_some()
    }

    /// Returns the number of registered objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Registry for MapRegistry {
    fn lookup(&self, name: &str) -> Option<&(dyn Any + Send + Sync)> {
        self.objects.get(name).map(|object| &**object)
    }
}

impl fmt::Debug for MapRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.objects.keys().collect();
        names.sort();
        f.debug_struct("MapRegistry").field("names", &names).finish()
    }
}

/// A reference to a workflow builder registered by name.
///
/// Front-ends use it to pull in workflows assembled by code registered in
/// the container instead of declaring them inline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuilderReference {
    /// Registry name of the builder.
    pub reference: String,
}

impl BuilderReference {
    /// Creates a new builder reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    /// Resolves the builder through the registry.
    pub fn resolve<'r, T, R>(&self, registry: &'r R) -> WorkflowResult<&'r T>
    where
        T: Any,
        R: Registry + ?Sized,
    {
        resolve(registry, ReferenceKind::WorkflowBuilder, &self.reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct OrderBuilder {
        queue: &'static str,
    }

    #[test]
    fn test_reference_kind_names() {
        assert_eq!(ReferenceKind::AggregationStrategy.as_ref(), "aggregation_strategy");
        assert_eq!(ReferenceKind::WorkflowBuilder.to_string(), "workflow_builder");
        let name: &'static str = ReferenceKind::Processor.into();
        assert_eq!(name, "processor");
    }

    #[test]
    fn test_resolve_typed() {
        let registry = MapRegistry::new().with("retries", 3_u32);
        assert_eq!(resolve::<u32, _>(&registry, ReferenceKind::Bean, "retries"), Ok(&3));
    }

    #[test]
    fn test_resolve_missing_and_mistyped() {
        let registry = MapRegistry::new().with("retries", 3_u32);

        let missing = resolve::<u32, _>(&registry, ReferenceKind::Comparator, "byDate");
        assert_eq!(
            missing,
            Err(WorkflowError::unresolved(ReferenceKind::Comparator, "byDate"))
        );

        let mistyped = resolve::<String, _>(&registry, ReferenceKind::Bean, "retries");
        assert!(matches!(
            mistyped,
            Err(WorkflowError::UnresolvedReference { kind: ReferenceKind::Bean, .. })
        ));
    }

    #[test]
    fn test_builder_reference() {
        let registry = MapRegistry::new().with("orders", OrderBuilder { queue: "orders" });
        let reference = BuilderReference::new("orders");

        let builder: &OrderBuilder = reference.resolve(&registry).unwrap();
        assert_eq!(builder.queue, "orders");

        let err = BuilderReference::new("refunds")
            .resolve::<OrderBuilder, _>(&registry)
            .unwrap_err();
        assert_eq!(err.to_string(), "unresolved workflow_builder reference 'refunds'");
    }

    #[test]
    fn test_debug_lists_sorted_names() {
        let registry = MapRegistry::new().with("b", 1_u8).with("a", 2_u8);
        assert_eq!(format!("{registry:?}"), "MapRegistry { names: [\"a\", \"b\"] }");
    }
}

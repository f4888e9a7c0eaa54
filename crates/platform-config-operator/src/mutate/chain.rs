//! An ordered set of mutations applied to templated objects before they are persisted.

use kube::core::DynamicObject;
use tracing::trace;

use super::{MutatedObject, Reconciler, Request, Result, mutate};
use crate::{
    coerce::ObjectType,
    crd::{
        ManagedResource,
        v1alpha1::{CertManager, PlatformConfig, TrustManager},
    },
};

/// A type-erased mutation, see [`mutate`].
pub type MutateFn = fn(
    DynamicObject,
    &PlatformConfig,
    Option<&dyn Reconciler>,
    Option<&Request>,
) -> Result<Vec<DynamicObject>>;

/// Runs the registered mutations over templated objects.
///
/// Mutations are selected by the `apiVersion` and `kind` of each object and run in registration
/// order, the objects returned by one mutation are the input of the next one. Objects without
/// a matching mutation, including objects without type information, are passed through
/// unchanged.
#[derive(Clone, Debug, Default)]
pub struct MutationChain {
    mutations: Vec<(ObjectType, MutateFn)>,
}

impl MutationChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// The chain used for the children of a [`PlatformConfig`].
    pub fn platform() -> Self {
        Self::new()
            .with_mutation::<CertManager>()
            .with_mutation::<TrustManager>()
    }

    /// Registers the resource profile mutation of `K`.
    pub fn with_mutation<K>(self) -> Self
    where
        K: ManagedResource,
    {
        self.with_mutation_fn(ObjectType::of::<K>(), mutate_dynamic::<K>)
    }

    pub fn with_mutation_fn(mut self, object_type: ObjectType, mutation: MutateFn) -> Self {
        self.mutations.push((object_type, mutation));
        self
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn run(
        &self,
        original: DynamicObject,
        parent: &PlatformConfig,
        reconciler: Option<&dyn Reconciler>,
        request: Option<&Request>,
    ) -> Result<Vec<DynamicObject>> {
        let mut objects = vec![original];

        for (object_type, mutation) in &self.mutations {
            let mut mutated = Vec::with_capacity(objects.len());

            for object in objects {
                if has_type(&object, object_type) {
                    trace!(%object_type, "running mutation");
                    mutated.extend(mutation(object, parent, reconciler, request)?);
                } else {
                    mutated.push(object);
                }
            }

            objects = mutated;
        }

        Ok(objects)
    }
}

fn has_type(object: &DynamicObject, object_type: &ObjectType) -> bool {
    object.types.as_ref().is_some_and(|types| {
        types.api_version == object_type.api_version && types.kind == object_type.kind
    })
}

fn mutate_dynamic<K>(
    original: DynamicObject,
    parent: &PlatformConfig,
    reconciler: Option<&dyn Reconciler>,
    request: Option<&Request>,
) -> Result<Vec<DynamicObject>>
where
    K: ManagedResource,
{
    mutate::<K>(original, parent, reconciler, request)?
        .into_iter()
        .map(MutatedObject::into_dynamic)
        .collect()
}

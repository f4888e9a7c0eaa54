//! Mutation entry points of the platform mutation chain.
//!
//! Every managed resource kind has an entry point (see [`mutate_cert_manager_config`] and
//! [`mutate_trust_manager_config`]). They all share [`mutate`]: the object is coerced into the
//! typed resource, the deployment size of the matching capability domain is read from the
//! [`PlatformConfig`] and the resource profile is applied.

use kube::{ResourceExt, core::DynamicObject};
use snafu::{ResultExt, Snafu};
use tracing::{Span, debug, field::Empty, instrument};

use crate::{
    apply::{self, apply_profile},
    coerce::{self, coerce},
    crd::{ManagedResource, v1alpha1::PlatformConfig},
    profile::ResourceKind,
};

mod cert_manager;
pub mod chain;
mod trust_manager;

pub use cert_manager::*;
pub use chain::MutationChain;
pub use trust_manager::*;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to convert object to {kind} type"))]
    TypeMismatch {
        source: coerce::Error,
        kind: ResourceKind,
    },

    #[snafu(display("failed to apply {kind} resource profile"))]
    ApplyProfile {
        source: apply::Error,
        kind: ResourceKind,
    },

    #[snafu(display("failed to serialize {kind} into a dynamic object"))]
    SerializeObject {
        source: serde_json::Error,
        kind: ResourceKind,
    },
}

/// The reconciler driving the mutation chain.
///
/// Mutations only run when a reconciler and a [`Request`] are available, validation-only passes
/// call the entry points without them.
pub trait Reconciler {
    /// Name of the controller, attached to the mutation span.
    fn controller_name(&self) -> &str;
}

/// Identifies the parent object a reconcile was triggered for.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Request {
    pub name: String,
    pub namespace: Option<String>,
}

impl Request {
    pub fn for_parent(parent: &PlatformConfig) -> Self {
        Self {
            name: parent.name_any(),
            namespace: parent.namespace(),
        }
    }
}

/// An object handed back to the reconciliation loop.
#[derive(Clone, Debug, PartialEq)]
pub enum MutatedObject<K> {
    /// The original object, passed through because mutation was suppressed.
    Unmodified(DynamicObject),

    /// The typed resource with its resource profile applied.
    Mutated(K),
}

impl<K> MutatedObject<K>
where
    K: ManagedResource,
{
    pub fn as_mutated(&self) -> Option<&K> {
        match self {
            Self::Unmodified(_) => None,
            Self::Mutated(resource) => Some(resource),
        }
    }

    /// Converts the object back into a [`DynamicObject`], e.g. to persist it.
    pub fn into_dynamic(self) -> Result<DynamicObject> {
        match self {
            Self::Unmodified(object) => Ok(object),
            Self::Mutated(resource) => serde_json::to_value(resource)
                .and_then(serde_json::from_value)
                .context(SerializeObjectSnafu {
                    kind: K::RESOURCE_KIND,
                }),
        }
    }
}

/// Mutates `original` into the managed resource `K`, sized by the deployment size `K` reads from
/// `parent`.
///
/// If either `reconciler` or `request` is missing, `original` is returned as-is regardless of the
/// deployment size. On error no object is returned.
#[instrument(
    skip_all,
    fields(kind = %K::RESOURCE_KIND, controller = Empty, parent = Empty, parent.namespace = Empty)
)]
pub fn mutate<K>(
    original: DynamicObject,
    parent: &PlatformConfig,
    reconciler: Option<&dyn Reconciler>,
    request: Option<&Request>,
) -> Result<Vec<MutatedObject<K>>>
where
    K: ManagedResource,
{
    let (Some(reconciler), Some(request)) = (reconciler, request) else {
        debug!("reconciler or request missing, passing object through unmodified");
        return Ok(vec![MutatedObject::Unmodified(original)]);
    };

    let span = Span::current();
    span.record("controller", reconciler.controller_name());
    span.record("parent", request.name.as_str());
    if let Some(namespace) = &request.namespace {
        span.record("parent.namespace", namespace.as_str());
    }

    let kind = K::RESOURCE_KIND;
    let deployment_size = K::deployment_size(parent);

    let mut resource: K = coerce(original, parent).context(TypeMismatchSnafu { kind })?;
    apply_profile(&mut resource, deployment_size).context(ApplyProfileSnafu { kind })?;

    debug!(deployment_size, "mutated resource");
    Ok(vec![MutatedObject::Mutated(resource)])
}

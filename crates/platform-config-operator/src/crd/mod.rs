//! Custom resources read and written by the mutation chain.
//!
//! [`v1alpha1::PlatformConfig`] is the parent object which declares the deployment size of each
//! capability domain. [`v1alpha1::CertManager`] and [`v1alpha1::TrustManager`] are the managed
//! child resources whose subcomponents get resized.

use std::fmt::Debug;

use kube::Resource;
use serde::{Serialize, de::DeserializeOwned};

use crate::profile::{ResourceKind, SubcomponentName};

mod certificates;
mod platform_config;

pub mod v1alpha1 {
    pub use super::{
        certificates::{
            CertManager, CertManagerSpec, ResourceLimits, ResourceRequests, Subcomponent,
            SubcomponentResources, TrustManager, TrustManagerSpec,
        },
        platform_config::{CapabilitySpec, PlatformConfig, PlatformConfigSpec, PlatformSpec},
    };
}

/// A child resource whose subcomponents are sized by a [`ResourceProfileTable`].
///
/// [`ResourceProfileTable`]: crate::profile::ResourceProfileTable
pub trait ManagedResource:
    Resource<DynamicType = ()> + Clone + Debug + DeserializeOwned + Serialize
{
    /// The profile table kind used to look up subcomponent profiles.
    const RESOURCE_KIND: ResourceKind;

    /// The name given to the object if templating left it empty.
    const DEFAULT_NAME: &'static str = "config";

    /// Returns every subcomponent of the resource together with its name.
    ///
    /// The returned names must be exactly [`ResourceKind::subcomponents`] of
    /// [`Self::RESOURCE_KIND`].
    fn subcomponents_mut(&mut self) -> Vec<(SubcomponentName, &mut v1alpha1::Subcomponent)>;

    /// Reads the raw deployment size of the capability domain this resource belongs to.
    fn deployment_size(parent: &v1alpha1::PlatformConfig) -> &str;
}

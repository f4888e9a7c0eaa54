//! Tiered resource-profile mutation for platform capability resources.
//!
//! The [`PlatformConfig`][crd::v1alpha1::PlatformConfig] custom resource declares a deployment
//! size per capability domain. Child resources produced by templating (for example
//! [`CertManager`][crd::v1alpha1::CertManager]) are passed through the [`mutate`] entry points,
//! which overwrite the replica counts and resource requests/limits of every subcomponent with the
//! values from the static [`ResourceProfileTable`][profile::ResourceProfileTable].
//!
//! ```no_run
//! use platform_config_operator::{crd::v1alpha1::PlatformConfig, mutate};
//! # fn docs(
//! #     original: platform_config_operator::kube::core::DynamicObject,
//! #     parent: &PlatformConfig,
//! #     reconciler: &dyn mutate::Reconciler,
//! #     request: &mutate::Request,
//! # ) -> Result<(), mutate::Error> {
//! let objects =
//!     mutate::mutate_cert_manager_config(original, parent, Some(reconciler), Some(request))?;
//! # Ok(())
//! # }
//! ```

pub mod apply;
pub mod coerce;
pub mod crd;
pub mod logging;
pub mod mutate;
pub mod profile;

// External re-exports
pub use k8s_openapi;
pub use kube;

//! Deployment tiers and the resource profiles they select.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

mod table;

pub use table::*;

/// The size a capability domain is deployed with.
///
/// Parsing is case-sensitive and only accepts the lowercase names.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum DeploymentTier {
    Small,
    Medium,
    Large,
}

/// Kinds of managed resources which carry a resource profile.
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, strum::Display, strum::EnumIter,
)]
pub enum ResourceKind {
    CertManager,
    TrustManager,
}

impl ResourceKind {
    /// The fixed set of subcomponents every resource of this kind has.
    pub const fn subcomponents(self) -> &'static [SubcomponentName] {
        match self {
            Self::CertManager => &[
                SubcomponentName::Injector,
                SubcomponentName::Controller,
                SubcomponentName::Webhook,
            ],
            Self::TrustManager => &[SubcomponentName::Controller],
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, strum::Display)]
pub enum SubcomponentName {
    Injector,
    Controller,
    Webhook,
}

/// CPU and memory sizing of a single subcomponent.
///
/// Values are Kubernetes quantity strings, e.g. `50m` or `64Mi`. Only memory gets a limit, CPU is
/// left unbounded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResourceSpec {
    pub cpu_request: &'static str,
    pub memory_request: &'static str,
    pub memory_limit: &'static str,
}

impl ResourceSpec {
    pub fn cpu_request_quantity(&self) -> Quantity {
        Quantity(self.cpu_request.to_owned())
    }

    pub fn memory_request_quantity(&self) -> Quantity {
        Quantity(self.memory_request.to_owned())
    }

    pub fn memory_limit_quantity(&self) -> Quantity {
        Quantity(self.memory_limit.to_owned())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SubcomponentProfile {
    /// Always at least 1.
    pub replicas: i32,
    pub resources: ResourceSpec,
}

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ManagedResource, v1alpha1::PlatformConfig};
use crate::profile::{ResourceKind, SubcomponentName};

/// Deploys cert-manager, which issues certificates for workloads on the platform.
#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(
    group = "certificates.platform.tbd.io",
    version = "v1alpha1",
    kind = "CertManager",
    plural = "certmanagers",
    namespaced,
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
#[schemars(extend("x-kubernetes-preserve-unknown-fields" = true))]
pub struct CertManagerSpec {
    /// The CA injector, which patches CA bundles into webhook configurations.
    #[serde(default)]
    pub injector: Subcomponent,

    /// The controller, which reconciles certificate requests.
    #[serde(default)]
    pub controller: Subcomponent,

    /// The cert-manager admission webhook.
    #[serde(default)]
    pub webhook: Subcomponent,

    /// Fields which are not sized by a resource profile, kept as templated.
    #[serde(flatten)]
    #[schemars(skip)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Deploys trust-manager, which distributes trust bundles across namespaces.
#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(
    group = "certificates.platform.tbd.io",
    version = "v1alpha1",
    kind = "TrustManager",
    plural = "trustmanagers",
    namespaced,
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
#[schemars(extend("x-kubernetes-preserve-unknown-fields" = true))]
pub struct TrustManagerSpec {
    #[serde(default)]
    pub controller: Subcomponent,

    /// Fields which are not sized by a resource profile, kept as templated.
    #[serde(flatten)]
    #[schemars(skip)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A separately deployed part of a managed resource.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[schemars(extend("x-kubernetes-preserve-unknown-fields" = true))]
pub struct Subcomponent {
    #[serde(default)]
    pub replicas: i32,

    #[serde(default)]
    pub resources: SubcomponentResources,

    /// Fields which are not sized by a resource profile, kept as templated.
    #[serde(flatten)]
    #[schemars(skip)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[schemars(extend("x-kubernetes-preserve-unknown-fields" = true))]
pub struct SubcomponentResources {
    #[serde(default)]
    pub requests: ResourceRequests,

    #[serde(default)]
    pub limits: ResourceLimits,

    /// Fields which are not sized by a resource profile, kept as templated.
    #[serde(flatten)]
    #[schemars(skip)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[schemars(extend("x-kubernetes-preserve-unknown-fields" = true))]
pub struct ResourceRequests {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<Quantity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<Quantity>,

    /// Fields which are not sized by a resource profile, kept as templated.
    #[serde(flatten)]
    #[schemars(skip)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[schemars(extend("x-kubernetes-preserve-unknown-fields" = true))]
pub struct ResourceLimits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<Quantity>,

    /// Fields which are not sized by a resource profile, kept as templated.
    #[serde(flatten)]
    #[schemars(skip)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ManagedResource for CertManager {
    const RESOURCE_KIND: ResourceKind = ResourceKind::CertManager;

    fn subcomponents_mut(&mut self) -> Vec<(SubcomponentName, &mut Subcomponent)> {
        let spec = &mut self.spec;
        vec![
            (SubcomponentName::Injector, &mut spec.injector),
            (SubcomponentName::Controller, &mut spec.controller),
            (SubcomponentName::Webhook, &mut spec.webhook),
        ]
    }

    fn deployment_size(parent: &PlatformConfig) -> &str {
        &parent.spec.platform.certificates.deployment_size
    }
}

impl ManagedResource for TrustManager {
    const RESOURCE_KIND: ResourceKind = ResourceKind::TrustManager;

    fn subcomponents_mut(&mut self) -> Vec<(SubcomponentName, &mut Subcomponent)> {
        vec![(SubcomponentName::Controller, &mut self.spec.controller)]
    }

    fn deployment_size(parent: &PlatformConfig) -> &str {
        &parent.spec.platform.identity.deployment_size
    }
}

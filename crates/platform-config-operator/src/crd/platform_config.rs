use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::profile::DeploymentTier;

/// Platform-wide configuration, one per namespace the platform is deployed into.
///
/// Deployment sizes are kept as raw strings: an unknown size is rejected when the child resources
/// are mutated, not when the object is read.
#[derive(Clone, CustomResource, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[kube(
    group = "deploy.platform.tbd.io",
    version = "v1alpha1",
    kind = "PlatformConfig",
    plural = "platformconfigs",
    namespaced,
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfigSpec {
    #[serde(default)]
    pub platform: PlatformSpec,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSpec {
    /// Sizing of the certificate issuance capability (cert-manager).
    #[serde(default)]
    pub certificates: CapabilitySpec,

    /// Sizing of the identity capability (trust-manager).
    #[serde(default)]
    pub identity: CapabilitySpec,
}

#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySpec {
    /// One of `small`, `medium` or `large`; defaults to `small`.
    #[serde(default = "CapabilitySpec::default_deployment_size")]
    pub deployment_size: String,
}

impl CapabilitySpec {
    fn default_deployment_size() -> String {
        DeploymentTier::Small.to_string()
    }
}

impl Default for CapabilitySpec {
    fn default() -> Self {
        Self {
            deployment_size: Self::default_deployment_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use kube::CustomResourceExt;

    use super::*;

    #[test]
    fn deployment_sizes_default_to_small() {
        let platform_config: PlatformConfig = serde_yaml::from_str(indoc! {"
            apiVersion: deploy.platform.tbd.io/v1alpha1
            kind: PlatformConfig
            metadata:
              name: config
              namespace: tbd-system
            spec:
              platform:
                identity:
                  deploymentSize: large
        "})
        .expect("platform config must deserialize");

        assert_eq!(
            platform_config.spec.platform.certificates.deployment_size,
            "small"
        );
        assert_eq!(platform_config.spec.platform.identity.deployment_size, "large");
    }

    #[test]
    fn unknown_deployment_size_is_kept_verbatim() {
        let spec: PlatformConfigSpec = serde_yaml::from_str(indoc! {"
            platform:
              certificates:
                deploymentSize: huge
        "})
        .expect("spec must deserialize");

        assert_eq!(spec.platform.certificates.deployment_size, "huge");
    }

    #[test]
    fn crd_is_namespaced() {
        let crd = PlatformConfig::crd();
        assert_eq!(crd.spec.group, "deploy.platform.tbd.io");
        assert_eq!(crd.spec.scope, "Namespaced");
        assert_eq!(crd.spec.names.kind, "PlatformConfig");
    }
}

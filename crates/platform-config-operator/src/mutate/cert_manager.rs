use kube::core::DynamicObject;

use super::{MutatedObject, Reconciler, Request, Result, mutate};
use crate::crd::v1alpha1::{CertManager, PlatformConfig};

/// Mutates the [`CertManager`] resource according to the certificates deployment size of the
/// platform.
pub fn mutate_cert_manager_config(
    original: DynamicObject,
    parent: &PlatformConfig,
    reconciler: Option<&dyn Reconciler>,
    request: Option<&Request>,
) -> Result<Vec<MutatedObject<CertManager>>> {
    mutate(original, parent, reconciler, request)
}

#[cfg(test)]
mod tests {
    use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
    use kube::ResourceExt;

    use super::*;
    use crate::{
        crd::v1alpha1::Subcomponent,
        mutate::tests::{TestReconciler, parent, templated},
    };

    fn assert_sized(
        subcomponent: &Subcomponent,
        replicas: i32,
        cpu: &str,
        memory_request: &str,
        memory_limit: &str,
    ) {
        let resources = &subcomponent.resources;

        assert_eq!(subcomponent.replicas, replicas);
        assert_eq!(resources.requests.cpu, Some(Quantity(cpu.to_owned())));
        assert_eq!(
            resources.requests.memory,
            Some(Quantity(memory_request.to_owned()))
        );
        assert_eq!(
            resources.limits.memory,
            Some(Quantity(memory_limit.to_owned()))
        );
    }

    fn mutate_with(certificates: &str, identity: &str) -> CertManager {
        let parent = parent(certificates, identity);
        let request = Request::for_parent(&parent);

        let mut objects = mutate_cert_manager_config(
            templated("CertManager"),
            &parent,
            Some(&TestReconciler),
            Some(&request),
        )
        .expect("mutation must succeed");

        assert_eq!(objects.len(), 1);
        match objects.remove(0) {
            MutatedObject::Mutated(cert_manager) => cert_manager,
            MutatedObject::Unmodified(object) => {
                unreachable!("object must be mutated, got {object:?}")
            }
        }
    }

    #[test]
    fn medium_deployment() {
        let cert_manager = mutate_with("medium", "small");

        assert_eq!(cert_manager.name_any(), "config");
        assert_sized(&cert_manager.spec.injector, 1, "100m", "128Mi", "256Mi");
        assert_sized(&cert_manager.spec.controller, 1, "50m", "64Mi", "96Mi");
        assert_sized(&cert_manager.spec.webhook, 1, "50m", "64Mi", "96Mi");
    }

    #[test]
    fn large_deployment() {
        let cert_manager = mutate_with("large", "small");

        assert_sized(&cert_manager.spec.injector, 2, "150m", "192Mi", "384Mi");
        assert_sized(&cert_manager.spec.controller, 2, "50m", "64Mi", "96Mi");
        assert_sized(&cert_manager.spec.webhook, 2, "50m", "64Mi", "96Mi");
    }

    #[test]
    fn reads_certificates_domain() {
        // The identity size must not leak into cert-manager
        let cert_manager = mutate_with("small", "large");

        assert_sized(&cert_manager.spec.injector, 1, "50m", "64Mi", "128Mi");
        assert_sized(&cert_manager.spec.controller, 1, "25m", "32Mi", "64Mi");
        assert_sized(&cert_manager.spec.webhook, 1, "25m", "32Mi", "64Mi");
    }
}

use kube::core::DynamicObject;

use super::{MutatedObject, Reconciler, Request, Result, mutate};
use crate::crd::v1alpha1::{PlatformConfig, TrustManager};

/// Mutates the [`TrustManager`] resource according to the identity deployment size of the
/// platform.
pub fn mutate_trust_manager_config(
    original: DynamicObject,
    parent: &PlatformConfig,
    reconciler: Option<&dyn Reconciler>,
    request: Option<&Request>,
) -> Result<Vec<MutatedObject<TrustManager>>> {
    mutate(original, parent, reconciler, request)
}

#[cfg(test)]
mod tests {
    use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
    use rstest::rstest;

    use super::*;
    use crate::mutate::{
        Error,
        tests::{TestReconciler, parent, templated},
    };

    #[rstest]
    #[case("small", 1, "25m", "32Mi", "64Mi")]
    #[case("medium", 1, "50m", "64Mi", "96Mi")]
    #[case("large", 2, "50m", "64Mi", "96Mi")]
    fn reads_identity_domain(
        #[case] identity: &str,
        #[case] replicas: i32,
        #[case] cpu: &str,
        #[case] memory_request: &str,
        #[case] memory_limit: &str,
    ) {
        // Certificates is deliberately invalid, it must not be read
        let parent = parent("invalid", identity);
        let request = Request::for_parent(&parent);

        let objects = mutate_trust_manager_config(
            templated("TrustManager"),
            &parent,
            Some(&TestReconciler),
            Some(&request),
        )
        .expect("mutation must succeed");

        assert_eq!(objects.len(), 1);
        let controller = &objects[0]
            .as_mutated()
            .expect("object must be mutated")
            .spec
            .controller;

        assert_eq!(controller.replicas, replicas);
        assert_eq!(
            controller.resources.requests.cpu,
            Some(Quantity(cpu.to_owned()))
        );
        assert_eq!(
            controller.resources.requests.memory,
            Some(Quantity(memory_request.to_owned()))
        );
        assert_eq!(
            controller.resources.limits.memory,
            Some(Quantity(memory_limit.to_owned()))
        );
    }

    #[test]
    fn cert_manager_is_rejected() {
        let parent = parent("small", "small");
        let request = Request::for_parent(&parent);

        let err = mutate_trust_manager_config(
            templated("CertManager"),
            &parent,
            Some(&TestReconciler),
            Some(&request),
        )
        .expect_err("kind must mismatch");

        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert_eq!(err.to_string(), "failed to convert object to TrustManager type");
    }
}

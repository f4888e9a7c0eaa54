use std::{collections::BTreeMap, sync::LazyLock};

use strum::IntoEnumIterator;

use super::{DeploymentTier, ResourceKind, ResourceSpec, SubcomponentName, SubcomponentProfile};

pub type ProfileKey = (ResourceKind, SubcomponentName, DeploymentTier);

static BUILTIN_PROFILES: LazyLock<ResourceProfileTable> =
    LazyLock::new(ResourceProfileTable::from_builtin_rows);

const fn profile(
    replicas: i32,
    cpu_request: &'static str,
    memory_request: &'static str,
    memory_limit: &'static str,
) -> SubcomponentProfile {
    SubcomponentProfile {
        replicas,
        resources: ResourceSpec {
            cpu_request,
            memory_request,
            memory_limit,
        },
    }
}

#[rustfmt::skip]
const BUILTIN_ROWS: &[(ResourceKind, SubcomponentName, DeploymentTier, SubcomponentProfile)] = &[
    // cert-manager
    (ResourceKind::CertManager, SubcomponentName::Injector, DeploymentTier::Small, profile(1, "50m", "64Mi", "128Mi")),
    (ResourceKind::CertManager, SubcomponentName::Injector, DeploymentTier::Medium, profile(1, "100m", "128Mi", "256Mi")),
    (ResourceKind::CertManager, SubcomponentName::Injector, DeploymentTier::Large, profile(2, "150m", "192Mi", "384Mi")),
    (ResourceKind::CertManager, SubcomponentName::Controller, DeploymentTier::Small, profile(1, "25m", "32Mi", "64Mi")),
    (ResourceKind::CertManager, SubcomponentName::Controller, DeploymentTier::Medium, profile(1, "50m", "64Mi", "96Mi")),
    (ResourceKind::CertManager, SubcomponentName::Controller, DeploymentTier::Large, profile(2, "50m", "64Mi", "96Mi")),
    (ResourceKind::CertManager, SubcomponentName::Webhook, DeploymentTier::Small, profile(1, "25m", "32Mi", "64Mi")),
    (ResourceKind::CertManager, SubcomponentName::Webhook, DeploymentTier::Medium, profile(1, "50m", "64Mi", "96Mi")),
    (ResourceKind::CertManager, SubcomponentName::Webhook, DeploymentTier::Large, profile(2, "50m", "64Mi", "96Mi")),
    // trust-manager
    (ResourceKind::TrustManager, SubcomponentName::Controller, DeploymentTier::Small, profile(1, "25m", "32Mi", "64Mi")),
    (ResourceKind::TrustManager, SubcomponentName::Controller, DeploymentTier::Medium, profile(1, "50m", "64Mi", "96Mi")),
    (ResourceKind::TrustManager, SubcomponentName::Controller, DeploymentTier::Large, profile(2, "50m", "64Mi", "96Mi")),
];

/// Maps (resource kind, subcomponent, tier) to the profile the subcomponent is sized with.
///
/// The table is built once per process and never changes afterwards, see
/// [`ResourceProfileTable::builtin`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourceProfileTable {
    profiles: BTreeMap<ProfileKey, SubcomponentProfile>,
}

impl ResourceProfileTable {
    /// Returns the process-wide table compiled into the operator.
    pub fn builtin() -> &'static Self {
        &BUILTIN_PROFILES
    }

    fn from_builtin_rows() -> Self {
        BUILTIN_ROWS
            .iter()
            .map(|&(kind, subcomponent, tier, profile)| ((kind, subcomponent, tier), profile))
            .collect()
    }

    pub fn get(
        &self,
        kind: ResourceKind,
        subcomponent: SubcomponentName,
        tier: DeploymentTier,
    ) -> Option<&SubcomponentProfile> {
        self.profiles.get(&(kind, subcomponent, tier))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProfileKey, &SubcomponentProfile)> {
        self.profiles.iter()
    }

    /// Lists every (kind, subcomponent, tier) combination which has no profile.
    ///
    /// Empty for a total table.
    pub fn missing_entries(&self) -> Vec<ProfileKey> {
        ResourceKind::iter()
            .flat_map(|kind| {
                kind.subcomponents().iter().flat_map(move |&subcomponent| {
                    DeploymentTier::iter().map(move |tier| (kind, subcomponent, tier))
                })
            })
            .filter(|key| !self.profiles.contains_key(key))
            .collect()
    }
}

impl FromIterator<(ProfileKey, SubcomponentProfile)> for ResourceProfileTable {
    fn from_iter<T: IntoIterator<Item = (ProfileKey, SubcomponentProfile)>>(iter: T) -> Self {
        Self {
            profiles: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn is_quantity_with_unit(input: &str, unit: &str) -> bool {
        input
            .strip_suffix(unit)
            .is_some_and(|value| !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()))
    }

    #[test]
    fn builtin_table_is_total() {
        assert_eq!(
            ResourceProfileTable::builtin().missing_entries(),
            Vec::<ProfileKey>::new()
        );
    }

    #[test]
    fn builtin_table_has_no_extra_entries() {
        for ((kind, subcomponent, _), _) in ResourceProfileTable::builtin().iter() {
            assert!(
                kind.subcomponents().contains(subcomponent),
                "{kind} has no subcomponent {subcomponent}"
            );
        }
    }

    #[test]
    fn builtin_profiles_are_well_formed() {
        for (key, profile) in ResourceProfileTable::builtin().iter() {
            assert!(profile.replicas >= 1, "{key:?} has no replicas");
            assert!(
                is_quantity_with_unit(profile.resources.cpu_request, "m"),
                "{key:?} has an invalid cpu request"
            );
            assert!(
                is_quantity_with_unit(profile.resources.memory_request, "Mi"),
                "{key:?} has an invalid memory request"
            );
            assert!(
                is_quantity_with_unit(profile.resources.memory_limit, "Mi"),
                "{key:?} has an invalid memory limit"
            );
        }
    }

    #[rstest]
    #[case(
        ResourceKind::CertManager,
        SubcomponentName::Injector,
        DeploymentTier::Large,
        profile(2, "150m", "192Mi", "384Mi")
    )]
    #[case(
        ResourceKind::CertManager,
        SubcomponentName::Controller,
        DeploymentTier::Medium,
        profile(1, "50m", "64Mi", "96Mi")
    )]
    #[case(
        ResourceKind::CertManager,
        SubcomponentName::Webhook,
        DeploymentTier::Small,
        profile(1, "25m", "32Mi", "64Mi")
    )]
    #[case(
        ResourceKind::TrustManager,
        SubcomponentName::Controller,
        DeploymentTier::Large,
        profile(2, "50m", "64Mi", "96Mi")
    )]
    fn lookup(
        #[case] kind: ResourceKind,
        #[case] subcomponent: SubcomponentName,
        #[case] tier: DeploymentTier,
        #[case] expected: SubcomponentProfile,
    ) {
        assert_eq!(
            ResourceProfileTable::builtin().get(kind, subcomponent, tier),
            Some(&expected)
        );
    }

    #[test]
    fn trust_manager_has_no_injector() {
        assert_eq!(
            ResourceProfileTable::builtin().get(
                ResourceKind::TrustManager,
                SubcomponentName::Injector,
                DeploymentTier::Small
            ),
            None
        );
    }
}

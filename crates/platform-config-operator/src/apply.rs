//! Writes resource profiles into managed resources.

use std::str::FromStr;

use snafu::{OptionExt, ResultExt, Snafu};
use tracing::debug;

use crate::{
    crd::{ManagedResource, v1alpha1::Subcomponent},
    profile::{
        DeploymentTier, ResourceKind, ResourceProfileTable, SubcomponentName, SubcomponentProfile,
    },
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, PartialEq, Snafu)]
pub enum Error {
    #[snafu(display("invalid deployment size {deployment_size:?}"))]
    InvalidDeploymentSize {
        source: strum::ParseError,
        deployment_size: String,
    },

    #[snafu(display(
        "no resource profile for subcomponent {subcomponent} of {kind} with deployment size {tier}"
    ))]
    MissingProfile {
        kind: ResourceKind,
        subcomponent: SubcomponentName,
        tier: DeploymentTier,
    },
}

/// Overwrites replicas and resources of every subcomponent of `resource` with the builtin profile
/// for `deployment_size`.
///
/// On error the resource is left exactly as it was.
pub fn apply_profile<R>(resource: &mut R, deployment_size: &str) -> Result<()>
where
    R: ManagedResource,
{
    apply_profile_from(ResourceProfileTable::builtin(), resource, deployment_size)
}

/// Like [`apply_profile`], but reads the profiles from `table`.
pub fn apply_profile_from<R>(
    table: &ResourceProfileTable,
    resource: &mut R,
    deployment_size: &str,
) -> Result<()>
where
    R: ManagedResource,
{
    let tier = DeploymentTier::from_str(deployment_size)
        .context(InvalidDeploymentSizeSnafu { deployment_size })?;
    let kind = R::RESOURCE_KIND;

    // Resolve every profile up front, nothing may be written if a single lookup fails
    let resolved = resource
        .subcomponents_mut()
        .into_iter()
        .map(|(name, subcomponent)| {
            table
                .get(kind, name, tier)
                .map(|profile| (name, subcomponent, profile))
                .context(MissingProfileSnafu {
                    kind,
                    subcomponent: name,
                    tier,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    for (name, subcomponent, profile) in resolved {
        overwrite_subcomponent(subcomponent, profile);
        debug!(
            %kind,
            %tier,
            subcomponent = %name,
            replicas = profile.replicas,
            "applied resource profile"
        );
    }

    Ok(())
}

fn overwrite_subcomponent(subcomponent: &mut Subcomponent, profile: &SubcomponentProfile) {
    let resources = &mut subcomponent.resources;

    subcomponent.replicas = profile.replicas;
    resources.requests.cpu = Some(profile.resources.cpu_request_quantity());
    resources.requests.memory = Some(profile.resources.memory_request_quantity());
    resources.limits.memory = Some(profile.resources.memory_limit_quantity());
}

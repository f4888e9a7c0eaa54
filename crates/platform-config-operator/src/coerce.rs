//! Converts generic objects produced by templating into typed managed resources.
//!
//! Every kind goes through the same explicit structural conversion: the [`DynamicObject`] is
//! checked against the expected `apiVersion` and `kind`, identity fields are filled in where they
//! are empty and the payload is then deserialized into the typed resource.

use std::fmt::Display;

use kube::{
    Resource,
    core::{DynamicObject, TypeMeta, dynamic::ParseDynamicObjectError},
};
use snafu::{ResultExt, Snafu, ensure};

use crate::crd::{ManagedResource, v1alpha1::PlatformConfig};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("object is not of type {expected}, found {found}"))]
    TypeMismatch {
        expected: ObjectType,
        found: ObjectType,
    },

    #[snafu(display("failed to convert object of type {found} to {expected}"))]
    Conversion {
        source: ParseDynamicObjectError,
        expected: ObjectType,
        found: ObjectType,
    },
}

impl Error {
    pub fn expected(&self) -> &ObjectType {
        match self {
            Self::TypeMismatch { expected, .. } | Self::Conversion { expected, .. } => expected,
        }
    }

    pub fn found(&self) -> &ObjectType {
        match self {
            Self::TypeMismatch { found, .. } | Self::Conversion { found, .. } => found,
        }
    }
}

/// The `apiVersion` and `kind` pair identifying the type of an object.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ObjectType {
    pub api_version: String,
    pub kind: String,
}

impl ObjectType {
    pub fn of<K>() -> Self
    where
        K: Resource<DynamicType = ()>,
    {
        Self {
            api_version: K::api_version(&()).into_owned(),
            kind: K::kind(&()).into_owned(),
        }
    }

    fn from_type_meta(types: Option<&TypeMeta>) -> Self {
        types
            .map(|types| Self {
                api_version: types.api_version.clone(),
                kind: types.kind.clone(),
            })
            .unwrap_or_default()
    }
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let api_version = if self.api_version.is_empty() {
            "<unset>"
        } else {
            &self.api_version
        };
        let kind = if self.kind.is_empty() {
            "<unset>"
        } else {
            &self.kind
        };

        write!(f, "{api_version}/{kind}")
    }
}

/// Converts `original` into the managed resource `K`.
///
/// Identity fields are only defaulted if they are empty on `original`:
///
/// - `apiVersion` and `kind` are set to the ones of `K`,
/// - the namespace is set to the namespace of `parent`,
/// - the name is set to [`ManagedResource::DEFAULT_NAME`].
///
/// Already populated fields are never overwritten. An `apiVersion` or `kind` different from the
/// one of `K` is rejected before any conversion is attempted.
pub fn coerce<K>(original: DynamicObject, parent: &PlatformConfig) -> Result<K>
where
    K: ManagedResource,
{
    let expected = ObjectType::of::<K>();
    let found = ObjectType::from_type_meta(original.types.as_ref());

    let mut object = original;

    let types = object.types.get_or_insert_with(TypeMeta::default);
    if types.api_version.is_empty() {
        types.api_version.clone_from(&expected.api_version);
    }
    if types.kind.is_empty() {
        types.kind.clone_from(&expected.kind);
    }
    ensure!(
        types.api_version == expected.api_version && types.kind == expected.kind,
        TypeMismatchSnafu { expected, found }
    );

    let metadata = &mut object.metadata;
    if metadata.namespace.as_deref().is_none_or(str::is_empty) {
        metadata.namespace.clone_from(&parent.metadata.namespace);
    }
    if metadata.name.as_deref().is_none_or(str::is_empty) {
        metadata.name = Some(K::DEFAULT_NAME.to_owned());
    }

    object
        .try_parse()
        .context(ConversionSnafu { expected, found })
}

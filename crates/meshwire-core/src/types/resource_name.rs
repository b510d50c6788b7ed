use crate::error::WireError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use url::Url;

///
/// ResourceName
///
/// Normalized hierarchical URI name for cluster resources, e.g.
/// `fabric:/app1/svc`. Both construction paths (raw string, parsed URI)
/// normalize through the same canonical serialization, so equality and
/// hashing are structural over the normalized form.
///
/// Invariants, enforced once at construction:
/// - well-formed URI with a scheme
/// - hierarchical body (no opaque `scheme:name` forms)
/// - non-empty rooted path
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct ResourceName(Url);

impl ResourceName {
    /// Construct from a raw string, normalizing through URI parsing.
    pub fn new(raw: &str) -> Result<Self, WireError> {
        let uri = Url::parse(raw).map_err(|err| {
            WireError::invalid_format("ResourceName", format!("'{raw}' is not a URI: {err}"))
        })?;

        Self::from_uri(uri)
    }

    /// Construct from an already-parsed URI.
    pub fn from_uri(uri: Url) -> Result<Self, WireError> {
        if uri.cannot_be_a_base() {
            return Err(WireError::invalid_format(
                "ResourceName",
                format!("'{uri}' has an opaque body; expected a rooted path"),
            ));
        }
        if uri.path().is_empty() || uri.path() == "/" {
            return Err(WireError::invalid_format(
                "ResourceName",
                format!("'{uri}' has an empty path"),
            ));
        }

        Ok(Self(uri))
    }

    /// The canonical textual form written to the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub const fn as_uri(&self) -> &Url {
        &self.0
    }

    #[must_use]
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// Path segments below the scheme root, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.path().trim_start_matches('/').split('/')
    }

    #[must_use]
    pub fn into_uri(self) -> Url {
        self.0
    }
}

impl FromStr for ResourceName {
    type Err = WireError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::new(raw)
    }
}

impl TryFrom<&str> for ResourceName {
    type Error = WireError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ResourceName> for String {
    fn from(name: ResourceName) -> Self {
        name.0.into()
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResourceName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResourceName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}

///
/// TESTS
///

use crate::{
    kind::wire_kind,
    registry::{TaggedFamily, VariantRegistry},
};
use meshwire_core::{
    error::WireError,
    guard,
    wire::{WireBuilder, WireObject},
};
use std::sync::LazyLock;

wire_kind! {
    /// Discriminator for backup storage destinations.
    pub enum BackupStorageKind {
        AzureBlobStore => "AzureBlobStore",
        FileShare => "FileShare",
        DsmsAzureBlobStore => "DsmsAzureBlobStore",
    }
}

///
/// BackupStorage
///
/// Where cluster backups are written. One variant per storage backend;
/// `friendly_name` is the base field every variant shares.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BackupStorage {
    AzureBlobStore(AzureBlobStore),
    FileShare(FileShare),
    DsmsAzureBlobStore(DsmsAzureBlobStore),
}

impl BackupStorage {
    /// Human-readable label common to all storage backends.
    #[must_use]
    pub fn friendly_name(&self) -> Option<&str> {
        match self {
            Self::AzureBlobStore(v) => v.friendly_name(),
            Self::FileShare(v) => v.friendly_name(),
            Self::DsmsAzureBlobStore(v) => v.friendly_name(),
        }
    }

    fn encode_fields(&self, builder: WireBuilder) -> WireBuilder {
        let builder = builder.push_opt("FriendlyName", self.friendly_name());
        match self {
            Self::AzureBlobStore(v) => builder
                .push("ConnectionString", v.connection_string())
                .push("ContainerName", v.container_name()),
            Self::FileShare(v) => builder
                .push("Path", v.path())
                .push_opt("PrimaryUserName", v.primary_user_name())
                .push_opt("PrimaryPassword", v.primary_password()),
            Self::DsmsAzureBlobStore(v) => builder
                .push("StorageCredentialsSourceLocation", v.source_location())
                .push("ContainerName", v.container_name()),
        }
    }
}

static REGISTRY: LazyLock<VariantRegistry<BackupStorage>> = LazyLock::new(|| {
    VariantRegistry::builder()
        .register(
            BackupStorageKind::AzureBlobStore,
            AzureBlobStore::decode_variant,
            |family, builder| family.encode_fields(builder),
        )
        .register(
            BackupStorageKind::FileShare,
            FileShare::decode_variant,
            |family, builder| family.encode_fields(builder),
        )
        .register(
            BackupStorageKind::DsmsAzureBlobStore,
            DsmsAzureBlobStore::decode_variant,
            |family, builder| family.encode_fields(builder),
        )
        .build()
});

impl TaggedFamily for BackupStorage {
    type Kind = BackupStorageKind;
    const KIND_FIELD: &'static str = "Kind";

    fn kind(&self) -> BackupStorageKind {
        match self {
            Self::AzureBlobStore(_) => BackupStorageKind::AzureBlobStore,
            Self::FileShare(_) => BackupStorageKind::FileShare,
            Self::DsmsAzureBlobStore(_) => BackupStorageKind::DsmsAzureBlobStore,
        }
    }

    fn registry() -> &'static VariantRegistry<Self> {
        &REGISTRY
    }
}

///
/// AzureBlobStore
///
/// Azure blob container addressed by connection string.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AzureBlobStore {
    friendly_name: Option<String>,
    connection_string: String,
    container_name: String,
}

impl AzureBlobStore {
    pub fn new(
        friendly_name: Option<String>,
        connection_string: String,
        container_name: String,
    ) -> Result<Self, WireError> {
        Ok(Self {
            friendly_name,
            connection_string: guard::require_nonempty(connection_string, "ConnectionString")?,
            container_name: guard::require_nonempty(container_name, "ContainerName")?,
        })
    }

    #[must_use]
    pub fn friendly_name(&self) -> Option<&str> {
        self.friendly_name.as_deref()
    }

    #[must_use]
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    #[must_use]
    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    fn decode_variant(obj: &WireObject<'_>) -> Result<BackupStorage, WireError> {
        Ok(BackupStorage::AzureBlobStore(Self::new(
            obj.string_field("FriendlyName")?,
            obj.require_string("ConnectionString")?,
            obj.require_string("ContainerName")?,
        )?))
    }
}

///
/// FileShare
///
/// SMB file share destination; credentials are optional when the cluster
/// identity already has access.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileShare {
    friendly_name: Option<String>,
    path: String,
    primary_user_name: Option<String>,
    primary_password: Option<String>,
}

impl FileShare {
    pub fn new(
        friendly_name: Option<String>,
        path: String,
        primary_user_name: Option<String>,
        primary_password: Option<String>,
    ) -> Result<Self, WireError> {
        Ok(Self {
            friendly_name,
            path: guard::require_nonempty(path, "Path")?,
            primary_user_name,
            primary_password,
        })
    }

    #[must_use]
    pub fn friendly_name(&self) -> Option<&str> {
        self.friendly_name.as_deref()
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn primary_user_name(&self) -> Option<&str> {
        self.primary_user_name.as_deref()
    }

    #[must_use]
    pub fn primary_password(&self) -> Option<&str> {
        self.primary_password.as_deref()
    }

    fn decode_variant(obj: &WireObject<'_>) -> Result<BackupStorage, WireError> {
        Ok(BackupStorage::FileShare(Self::new(
            obj.string_field("FriendlyName")?,
            obj.require_string("Path")?,
            obj.string_field("PrimaryUserName")?,
            obj.string_field("PrimaryPassword")?,
        )?))
    }
}

///
/// DsmsAzureBlobStore
///
/// Azure blob container whose credentials are resolved from a managed
/// secret-store source location.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DsmsAzureBlobStore {
    friendly_name: Option<String>,
    source_location: String,
    container_name: String,
}

impl DsmsAzureBlobStore {
    pub fn new(
        friendly_name: Option<String>,
        source_location: String,
        container_name: String,
    ) -> Result<Self, WireError> {
        Ok(Self {
            friendly_name,
            source_location: guard::require_nonempty(
                source_location,
                "StorageCredentialsSourceLocation",
            )?,
            container_name: guard::require_nonempty(container_name, "ContainerName")?,
        })
    }

    #[must_use]
    pub fn friendly_name(&self) -> Option<&str> {
        self.friendly_name.as_deref()
    }

    #[must_use]
    pub fn source_location(&self) -> &str {
        &self.source_location
    }

    #[must_use]
    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    fn decode_variant(obj: &WireObject<'_>) -> Result<BackupStorage, WireError> {
        Ok(BackupStorage::DsmsAzureBlobStore(Self::new(
            obj.string_field("FriendlyName")?,
            obj.require_string("StorageCredentialsSourceLocation")?,
            obj.require_string("ContainerName")?,
        )?))
    }
}

///
/// TESTS
///

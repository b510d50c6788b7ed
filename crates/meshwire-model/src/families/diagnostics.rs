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
    /// Discriminator for diagnostics sink descriptions.
    pub enum DiagnosticsSinkKind {
        AzureInternalMonitoringPipeline => "AzureInternalMonitoringPipeline",
    }
}

///
/// DiagnosticsSink
///
/// Where application diagnostics are shipped. Every sink carries a unique
/// `name` and an optional human-readable `description`; the rest of the
/// shape is per-kind.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DiagnosticsSink {
    AzureInternalMonitoringPipeline(AzureInternalMonitoringPipeline),
}

impl DiagnosticsSink {
    /// Sink name, unique within the enclosing diagnostics description.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::AzureInternalMonitoringPipeline(v) => v.name(),
        }
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::AzureInternalMonitoringPipeline(v) => v.description(),
        }
    }

    fn encode_fields(&self, builder: WireBuilder) -> WireBuilder {
        match self {
            Self::AzureInternalMonitoringPipeline(v) => builder
                .push("Name", v.name())
                .push_opt("Description", v.description())
                .push("AccountName", v.account_name())
                .push("Namespace", v.namespace())
                .push_opt("MaConfigUrl", v.ma_config_url())
                .push_opt("FluentdConfigUrl", v.fluentd_config_url())
                .push_opt("AutoKeyConfigUrl", v.auto_key_config_url()),
        }
    }
}

static REGISTRY: LazyLock<VariantRegistry<DiagnosticsSink>> = LazyLock::new(|| {
    VariantRegistry::builder()
        .register(
            DiagnosticsSinkKind::AzureInternalMonitoringPipeline,
            AzureInternalMonitoringPipeline::decode_variant,
            |family, builder| family.encode_fields(builder),
        )
        .build()
});

impl TaggedFamily for DiagnosticsSink {
    type Kind = DiagnosticsSinkKind;
    const KIND_FIELD: &'static str = "Kind";

    fn kind(&self) -> DiagnosticsSinkKind {
        match self {
            Self::AzureInternalMonitoringPipeline(_) => {
                DiagnosticsSinkKind::AzureInternalMonitoringPipeline
            }
        }
    }

    fn registry() -> &'static VariantRegistry<Self> {
        &REGISTRY
    }
}

///
/// AzureInternalMonitoringPipeline
///
/// Geneva (MDM/MDS) pipeline sink. Account and namespace identify the
/// destination; the config URLs point at agent configuration blobs.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AzureInternalMonitoringPipeline {
    name: String,
    description: Option<String>,
    account_name: String,
    namespace: String,
    ma_config_url: Option<String>,
    fluentd_config_url: Option<String>,
    auto_key_config_url: Option<String>,
}

impl AzureInternalMonitoringPipeline {
    pub fn new(
        name: String,
        description: Option<String>,
        account_name: String,
        namespace: String,
        ma_config_url: Option<String>,
        fluentd_config_url: Option<String>,
        auto_key_config_url: Option<String>,
    ) -> Result<Self, WireError> {
        Ok(Self {
            name: guard::require_nonempty(name, "Name")?,
            description,
            account_name: guard::require_nonempty(account_name, "AccountName")?,
            namespace: guard::require_nonempty(namespace, "Namespace")?,
            ma_config_url,
            fluentd_config_url,
            auto_key_config_url,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn ma_config_url(&self) -> Option<&str> {
        self.ma_config_url.as_deref()
    }

    #[must_use]
    pub fn fluentd_config_url(&self) -> Option<&str> {
        self.fluentd_config_url.as_deref()
    }

    #[must_use]
    pub fn auto_key_config_url(&self) -> Option<&str> {
        self.auto_key_config_url.as_deref()
    }

    fn decode_variant(obj: &WireObject<'_>) -> Result<DiagnosticsSink, WireError> {
        Ok(DiagnosticsSink::AzureInternalMonitoringPipeline(Self::new(
            obj.require_string("Name")?,
            obj.string_field("Description")?,
            obj.require_string("AccountName")?,
            obj.require_string("Namespace")?,
            obj.string_field("MaConfigUrl")?,
            obj.string_field("FluentdConfigUrl")?,
            obj.string_field("AutoKeyConfigUrl")?,
        )?))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_tagged, encode_tagged};
    use serde_json::json;

    fn pipeline() -> DiagnosticsSink {
        DiagnosticsSink::AzureInternalMonitoringPipeline(
            AzureInternalMonitoringPipeline::new(
                "geneva".to_string(),
                Some("primary pipeline".to_string()),
                "prod-account".to_string(),
                "svc-namespace".to_string(),
                None,
                None,
                None,
            )
            .unwrap(),
        )
    }

    #[test]
    fn pipeline_round_trips() {
        let sink = pipeline();
        let encoded = encode_tagged(&sink).unwrap();
        assert_eq!(encoded["Kind"], json!("AzureInternalMonitoringPipeline"));
        assert_eq!(decode_tagged::<DiagnosticsSink>(&encoded).unwrap(), sink);
    }

    #[test]
    fn absent_optional_urls_are_omitted_from_the_wire() {
        let encoded = encode_tagged(&pipeline()).unwrap();
        let obj = encoded.as_object().unwrap();
        assert!(!obj.contains_key("MaConfigUrl"));
        assert!(!obj.contains_key("FluentdConfigUrl"));
    }

    #[test]
    fn base_accessors_reach_through_the_variant() {
        let sink = pipeline();
        assert_eq!(sink.name(), "geneva");
        assert_eq!(sink.description(), Some("primary pipeline"));
    }

    #[test]
    fn empty_account_name_is_rejected() {
        let err = AzureInternalMonitoringPipeline::new(
            "geneva".to_string(),
            None,
            String::new(),
            "ns".to_string(),
            None,
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(err, WireError::MissingRequiredField { field: "AccountName" });
    }
}

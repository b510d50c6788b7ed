use crate::{
    entities::health::HealthState,
    kind::{parse_wire_enum_tolerant, wire_kind},
};
use meshwire_core::{
    error::WireError,
    guard,
    wire::{WireBuilder, WireObject},
};
use serde_json::Value;

wire_kind! {
    /// Lifecycle status of a cluster node. Decoded tolerantly: the server
    /// reports `"Invalid"` for nodes it has not yet observed.
    pub enum NodeStatus {
        Up => "Up",
        Down => "Down",
        Enabling => "Enabling",
        Disabling => "Disabling",
        Disabled => "Disabled",
        Unknown => "Unknown",
        Removed => "Removed",
    }
}

///
/// NodeInfo
///
/// One cluster node as reported by the node list endpoint. Up time is a
/// string-encoded int64 of seconds on the wire.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeInfo {
    name: String,
    ip_address_or_fqdn: Option<String>,
    node_status: NodeStatus,
    up_time_in_seconds: Option<i64>,
    health_state: HealthState,
    is_seed_node: bool,
}

impl NodeInfo {
    pub fn new(
        name: String,
        ip_address_or_fqdn: Option<String>,
        node_status: NodeStatus,
        up_time_in_seconds: Option<i64>,
        health_state: HealthState,
        is_seed_node: bool,
    ) -> Result<Self, WireError> {
        Ok(Self {
            name: guard::require_nonempty(name, "Name")?,
            ip_address_or_fqdn,
            node_status,
            up_time_in_seconds,
            health_state,
            is_seed_node,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn ip_address_or_fqdn(&self) -> Option<&str> {
        self.ip_address_or_fqdn.as_deref()
    }

    #[must_use]
    pub const fn node_status(&self) -> NodeStatus {
        self.node_status
    }

    #[must_use]
    pub const fn up_time_in_seconds(&self) -> Option<i64> {
        self.up_time_in_seconds
    }

    #[must_use]
    pub const fn health_state(&self) -> HealthState {
        self.health_state
    }

    #[must_use]
    pub const fn is_seed_node(&self) -> bool {
        self.is_seed_node
    }

    pub fn decode(obj: &WireObject<'_>) -> Result<Self, WireError> {
        Self::new(
            obj.require_string("Name")?,
            obj.string_field("IpAddressOrFQDN")?,
            parse_wire_enum_tolerant(obj.require_str("NodeStatus")?, "NodeStatus")?,
            obj.i64_text_field("NodeUpTimeInSeconds")?,
            HealthState::decode_field(obj, "HealthState")?,
            obj.bool_field("IsSeedNode")?.unwrap_or(false),
        )
    }

    #[must_use]
    pub fn to_wire(&self) -> Value {
        WireBuilder::new()
            .push("Name", self.name())
            .push_opt("IpAddressOrFQDN", self.ip_address_or_fqdn())
            .push("NodeStatus", self.node_status.to_string())
            .push_opt(
                "NodeUpTimeInSeconds",
                self.up_time_in_seconds.map(|s| s.to_string()),
            )
            .push("HealthState", self.health_state.to_string())
            .push("IsSeedNode", self.is_seed_node)
            .into_value()
    }
}

///
/// TESTS
///

use crate::{
    entities::health::HealthState,
    kind::{parse_wire_enum_tolerant, wire_kind},
};
use meshwire_core::{
    error::WireError,
    guard,
    types::ResourceName,
    wire::{WireBuilder, WireObject},
};
use serde_json::Value;
use std::collections::BTreeMap;

wire_kind! {
    /// Lifecycle status of an application instance.
    pub enum ApplicationStatus {
        Ready => "Ready",
        Upgrading => "Upgrading",
        Creating => "Creating",
        Deleting => "Deleting",
        Failed => "Failed",
    }
}

///
/// ApplicationInfo
///
/// One deployed application instance. `name` is the hierarchical resource
/// name (`fabric:/...`); `id` is its flattened relative form. Parameters
/// travel as an array of `{Key, Value}` pairs on the wire.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApplicationInfo {
    id: String,
    name: ResourceName,
    type_name: String,
    type_version: String,
    status: ApplicationStatus,
    health_state: HealthState,
    parameters: BTreeMap<String, String>,
}

impl ApplicationInfo {
    pub fn new(
        id: String,
        name: ResourceName,
        type_name: String,
        type_version: String,
        status: ApplicationStatus,
        health_state: HealthState,
        parameters: BTreeMap<String, String>,
    ) -> Result<Self, WireError> {
        Ok(Self {
            id: guard::require_nonempty(id, "Id")?,
            name,
            type_name: guard::require_nonempty(type_name, "TypeName")?,
            type_version: guard::require_nonempty(type_version, "TypeVersion")?,
            status,
            health_state,
            parameters,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn name(&self) -> &ResourceName {
        &self.name
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn type_version(&self) -> &str {
        &self.type_version
    }

    #[must_use]
    pub const fn status(&self) -> ApplicationStatus {
        self.status
    }

    #[must_use]
    pub const fn health_state(&self) -> HealthState {
        self.health_state
    }

    #[must_use]
    pub const fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    pub fn decode(obj: &WireObject<'_>) -> Result<Self, WireError> {
        let name = ResourceName::new(obj.require_str("Name")?)
            .map_err(|err| err.with_field("Name"))?;

        Self::new(
            obj.require_string("Id")?,
            name,
            obj.require_string("TypeName")?,
            obj.require_string("TypeVersion")?,
            parse_wire_enum_tolerant(obj.require_str("Status")?, "Status")?,
            HealthState::decode_field(obj, "HealthState")?,
            decode_parameters(obj)?,
        )
    }

    #[must_use]
    pub fn to_wire(&self) -> Value {
        let parameters: Vec<Value> = self
            .parameters
            .iter()
            .map(|(key, value)| {
                WireBuilder::new()
                    .push("Key", key.as_str())
                    .push("Value", value.as_str())
                    .into_value()
            })
            .collect();

        WireBuilder::new()
            .push("Id", self.id())
            .push("Name", self.name.as_str())
            .push("TypeName", self.type_name())
            .push("TypeVersion", self.type_version())
            .push("Status", self.status.to_string())
            .push("HealthState", self.health_state.to_string())
            .push("Parameters", parameters)
            .into_value()
    }
}

fn decode_parameters(obj: &WireObject<'_>) -> Result<BTreeMap<String, String>, WireError> {
    let Some(items) = obj.array_field("Parameters")? else {
        return Ok(BTreeMap::new());
    };

    let mut out = BTreeMap::new();
    for item in items {
        let pair = WireObject::from_value(item).map_err(|err| err.with_field("Parameters"))?;
        out.insert(pair.require_string("Key")?, pair.require_string("Value")?);
    }

    Ok(out)
}

///
/// TESTS
///

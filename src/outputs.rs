//! Stack outputs under their fixed keys.
use serde_json::{Map, Value};

use crate::provider::ManagedZone;

pub const GCP_PROJECT_ID: &str = "gcp-project-id";
pub const MANAGED_ZONE_NAME: &str = "managed-zone-name";
pub const NAMESERVERS: &str = "nameservers";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackOutputs {
    pub managed_zone_name: String,
    pub nameservers: Vec<String>,
    pub gcp_project_id: String,
}

impl StackOutputs {
    pub fn to_output_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(GCP_PROJECT_ID.into(), Value::from(self.gcp_project_id.clone()));
        map.insert(MANAGED_ZONE_NAME.into(), Value::from(self.managed_zone_name.clone()));
        map.insert(NAMESERVERS.into(), Value::from(self.nameservers.clone()));
        map
    }

    /// Read outputs back from an exported map; missing or mistyped keys come back empty.
    pub fn from_output_map(map: &Map<String, Value>) -> Self {
        let string = |key: &str| {
            map.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let nameservers = map
            .get(NAMESERVERS)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            managed_zone_name: string(MANAGED_ZONE_NAME),
            nameservers,
            gcp_project_id: string(GCP_PROJECT_ID),
        }
    }
}

/// Outputs for a zone the provider has confirmed.
pub fn export_outputs(zone: &ManagedZone) -> StackOutputs {
    StackOutputs {
        managed_zone_name: zone.name.clone(),
        nameservers: zone.name_servers.clone(),
        gcp_project_id: zone.project.clone(),
    }
}

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::GcpDnsZoneStackInput;

pub const DEFAULT_DNS_ENDPOINT: &str = "https://dns.googleapis.com/dns/v1";
pub const DEFAULT_RESOURCE_MANAGER_ENDPOINT: &str = "https://cloudresourcemanager.googleapis.com/v1";

/// Base URLs of the Google APIs the provider talks to.
#[derive(Clone, Debug)]
pub struct GcpEndpoints {
    pub dns: String,              // e.g. "https://dns.googleapis.com/dns/v1"
    pub resource_manager: String, // e.g. "https://cloudresourcemanager.googleapis.com/v1"
}

impl Default for GcpEndpoints {
    fn default() -> Self {
        Self {
            dns: DEFAULT_DNS_ENDPOINT.into(),
            resource_manager: DEFAULT_RESOURCE_MANAGER_ENDPOINT.into(),
        }
    }
}

impl GcpEndpoints {
    pub fn new(dns: impl Into<String>, resource_manager: impl Into<String>) -> Self {
        Self {
            dns: dns.into(),
            resource_manager: resource_manager.into(),
        }
    }

    /// Cloud DNS URL for a project-relative path.
    pub fn dns_url(&self, project: &str, path: &str) -> String {
        format!(
            "{}/projects/{}/{}",
            self.dns.trim_end_matches('/'),
            project,
            path.trim_start_matches('/')
        )
    }

    /// Resource Manager URL for a project method such as `getIamPolicy`.
    pub fn project_method_url(&self, project: &str, method: &str) -> String {
        format!(
            "{}/projects/{}:{}",
            self.resource_manager.trim_end_matches('/'),
            project,
            method
        )
    }
}

/// Parse a stack input document; `.json` files are read as JSON, anything else as YAML.
pub fn parse_stack_input(raw: &str, json: bool) -> Result<GcpDnsZoneStackInput> {
    if json {
        serde_json::from_str(raw).context("stack input is not valid JSON")
    } else {
        serde_yaml::from_str(raw).context("stack input is not valid YAML")
    }
}

pub async fn load_stack_input(path: &Path) -> Result<GcpDnsZoneStackInput> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read stack input {}", path.display()))?;
    let json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    parse_stack_input(&raw, json).with_context(|| format!("failed to load {}", path.display()))
}

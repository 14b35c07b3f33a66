//! Provider abstraction the builders call into, plus bootstrap from credentials.
//!
//! The builders only ever see a `&dyn DnsZoneProvider` (or a generic `P`), so the
//! translation logic runs against the Google client in production and against a
//! recording fake in tests.

use std::collections::BTreeSet;

use async_trait::async_trait;
use tracing::info;

use crate::config::GcpEndpoints;
use crate::error::{ApiError, StackError};
use crate::gcp::auth::{ServiceAccountKey, TokenSource};
use crate::gcp::client::CloudDnsClient;
use crate::model::{DnsRecordType, GcpCredential};

pub const DNS_ADMIN_ROLE: &str = "roles/dns.admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneVisibility {
    Public,
    Private,
}

impl ZoneVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneVisibility::Public => "public",
            ZoneVisibility::Private => "private",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedZoneArgs {
    pub name: String,     // "example-com"
    pub dns_name: String, // "example.com."
    pub project: String,
    pub description: String,
    pub visibility: ZoneVisibility,
}

/// A managed zone as confirmed by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedZone {
    pub id: Option<String>,
    pub name: String,
    pub dns_name: String,
    pub project: String,
    pub description: String,
    pub visibility: ZoneVisibility,
    pub name_servers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IamBindingArgs {
    pub project: String,
    pub role: String,
    pub members: BTreeSet<String>, // "serviceAccount:<email>"
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IamBinding {
    pub project: String,
    pub role: String,
    pub members: BTreeSet<String>,
    pub etag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSetArgs {
    /// Stable identifier of this record within the stack, e.g. `dns-record-0`.
    pub resource_name: String,
    pub managed_zone: String,
    pub project: String,
    pub name: String,
    pub record_type: DnsRecordType,
    pub ttl: u32,
    pub rrdatas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecordSet {
    pub resource_name: String,
    pub managed_zone: String,
    pub project: String,
    pub name: String,
    pub record_type: DnsRecordType,
    pub ttl: u32,
    pub rrdatas: Vec<String>,
}

/// The three create operations a stack run issues.
#[async_trait]
pub trait DnsZoneProvider: Send + Sync {
    async fn create_managed_zone(&self, args: &ManagedZoneArgs) -> Result<ManagedZone, ApiError>;

    /// Project-scoped binding; authoritative for `args.role`.
    async fn create_project_iam_binding(
        &self,
        args: &IamBindingArgs,
    ) -> Result<IamBinding, ApiError>;

    async fn create_record_set(&self, args: &RecordSetArgs) -> Result<DnsRecordSet, ApiError>;
}

/// Build an authenticated Google provider from the credential payload.
///
/// Only parses and checks the credential; the first token is fetched lazily on
/// the first API call.
pub fn bootstrap(
    credential: &GcpCredential,
    endpoints: GcpEndpoints,
) -> Result<CloudDnsClient, StackError> {
    let tokens = match (
        credential.service_account_key_base64.as_deref(),
        credential.access_token.as_deref(),
    ) {
        (Some(encoded), None) => {
            let key = ServiceAccountKey::from_base64(encoded)?;
            info!(client_email = %key.client_email, "using service-account credential");
            TokenSource::service_account(key)?
        }
        (None, Some(token)) if !token.trim().is_empty() => {
            info!("using pre-minted access token");
            TokenSource::fixed(token.trim())
        }
        (None, Some(_)) => return Err(StackError::provider_setup("access token is empty")),
        (Some(_), Some(_)) => {
            return Err(StackError::provider_setup(
                "credential must set only one of serviceAccountKeyBase64 and accessToken",
            ));
        }
        (None, None) => {
            return Err(StackError::provider_setup(
                "credential is missing both serviceAccountKeyBase64 and accessToken",
            ));
        }
    };

    CloudDnsClient::new(endpoints, tokens)
}

//! Stack-input data model: the credential plus the `GcpDnsZone` target resource.
use serde::{Deserialize, Serialize};

/// Everything a single stack run consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcpDnsZoneStackInput {
    pub gcp_credential: GcpCredential,
    pub target: GcpDnsZone,
}

/// Credential material used to bootstrap the provider.
///
/// Exactly one of the two fields is expected to be set.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcpCredential {
    /// Base64-encoded service-account JSON key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_key_base64: Option<String>,
    /// Pre-minted OAuth2 bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

// keep key material out of logs
impl std::fmt::Debug for GcpCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcpCredential")
            .field(
                "service_account_key_base64",
                &self.service_account_key_base64.as_ref().map(|_| "<redacted>"),
            )
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcpDnsZone {
    pub metadata: ApiResourceMetadata,
    pub spec: GcpDnsZoneSpec,
}

impl GcpDnsZone {
    /// The human-readable domain, e.g. `example.com`.
    pub fn domain_name(&self) -> &str {
        &self.metadata.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceMetadata {
    /// Domain name of the zone.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcpDnsZoneSpec {
    pub project_id: String,
    /// Service-account emails granted `roles/dns.admin` on the project.
    #[serde(default, alias = "authorizedServiceAccounts")]
    pub iam_service_accounts: Vec<String>,
    #[serde(default)]
    pub records: Vec<DnsRecord>,
}

/// One declared DNS record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    pub record_type: DnsRecordType,
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub ttl_seconds: u32,
}

/// Record types accepted by Cloud DNS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    A,
    AAAA,
    CAA,
    CNAME,
    DNSKEY,
    DS,
    HTTPS,
    IPSECKEY,
    MX,
    NAPTR,
    NS,
    PTR,
    SOA,
    SPF,
    SRV,
    SSHFP,
    SVCB,
    TLSA,
    TXT,
}

impl DnsRecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DnsRecordType::A => "A",
            DnsRecordType::AAAA => "AAAA",
            DnsRecordType::CAA => "CAA",
            DnsRecordType::CNAME => "CNAME",
            DnsRecordType::DNSKEY => "DNSKEY",
            DnsRecordType::DS => "DS",
            DnsRecordType::HTTPS => "HTTPS",
            DnsRecordType::IPSECKEY => "IPSECKEY",
            DnsRecordType::MX => "MX",
            DnsRecordType::NAPTR => "NAPTR",
            DnsRecordType::NS => "NS",
            DnsRecordType::PTR => "PTR",
            DnsRecordType::SOA => "SOA",
            DnsRecordType::SPF => "SPF",
            DnsRecordType::SRV => "SRV",
            DnsRecordType::SSHFP => "SSHFP",
            DnsRecordType::SVCB => "SVCB",
            DnsRecordType::TLSA => "TLSA",
            DnsRecordType::TXT => "TXT",
        }
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Recording fake provider shared by the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use gcp_dns_zone::ApiError;
use gcp_dns_zone::model::{
    ApiResourceMetadata, DnsRecord, DnsRecordType, GcpDnsZone, GcpDnsZoneSpec,
};
use gcp_dns_zone::provider::{
    DnsRecordSet, DnsZoneProvider, IamBinding, IamBindingArgs, ManagedZone, ManagedZoneArgs,
    RecordSetArgs,
};

pub const NAMESERVERS: [&str; 4] = [
    "ns-cloud-a1.googledomains.com.",
    "ns-cloud-a2.googledomains.com.",
    "ns-cloud-a3.googledomains.com.",
    "ns-cloud-a4.googledomains.com.",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Zone(ManagedZoneArgs),
    Binding(IamBindingArgs),
    Record(RecordSetArgs),
}

/// Records every call in order; failures are injected per stage.
#[derive(Default)]
pub struct RecordingProvider {
    pub calls: Mutex<Vec<Call>>,
    pub fail_zone: bool,
    pub fail_binding: bool,
    /// Input positions of records the provider rejects.
    pub fail_records: Vec<usize>,
}

impl RecordingProvider {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn zone_calls(&self) -> Vec<ManagedZoneArgs> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Zone(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    pub fn binding_calls(&self) -> Vec<IamBindingArgs> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Binding(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    pub fn record_calls(&self) -> Vec<RecordSetArgs> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Record(a) => Some(a),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl DnsZoneProvider for RecordingProvider {
    async fn create_managed_zone(&self, args: &ManagedZoneArgs) -> Result<ManagedZone, ApiError> {
        self.calls.lock().unwrap().push(Call::Zone(args.clone()));
        if self.fail_zone {
            return Err(ApiError::status(409, Some("ALREADY_EXISTS"), "zone already exists"));
        }
        Ok(ManagedZone {
            id: Some("4242".into()),
            name: args.name.clone(),
            dns_name: args.dns_name.clone(),
            project: args.project.clone(),
            description: args.description.clone(),
            visibility: args.visibility,
            name_servers: NAMESERVERS.iter().map(|s| s.to_string()).collect(),
        })
    }

    async fn create_project_iam_binding(
        &self,
        args: &IamBindingArgs,
    ) -> Result<IamBinding, ApiError> {
        self.calls.lock().unwrap().push(Call::Binding(args.clone()));
        if self.fail_binding {
            return Err(ApiError::status(403, Some("PERMISSION_DENIED"), "caller lacks setIamPolicy"));
        }
        Ok(IamBinding {
            project: args.project.clone(),
            role: args.role.clone(),
            members: args.members.clone(),
            etag: Some("BwX1".into()),
        })
    }

    async fn create_record_set(&self, args: &RecordSetArgs) -> Result<DnsRecordSet, ApiError> {
        let position = self.record_calls().len();
        self.calls.lock().unwrap().push(Call::Record(args.clone()));
        if self.fail_records.contains(&position) {
            return Err(ApiError::status(400, Some("INVALID_ARGUMENT"), "invalid rrdata"));
        }
        Ok(DnsRecordSet {
            resource_name: args.resource_name.clone(),
            managed_zone: args.managed_zone.clone(),
            project: args.project.clone(),
            name: args.name.clone(),
            record_type: args.record_type,
            ttl: args.ttl,
            rrdatas: args.rrdatas.clone(),
        })
    }
}

pub fn record(record_type: DnsRecordType, name: &str, ttl: u32, values: &[&str]) -> DnsRecord {
    DnsRecord {
        record_type,
        name: name.to_string(),
        values: values.iter().map(|v| v.to_string()).collect(),
        ttl_seconds: ttl,
    }
}

pub fn zone_target(domain: &str, project: &str, accounts: &[&str], records: Vec<DnsRecord>) -> GcpDnsZone {
    GcpDnsZone {
        metadata: ApiResourceMetadata {
            name: domain.to_string(),
            id: None,
        },
        spec: GcpDnsZoneSpec {
            project_id: project.to_string(),
            iam_service_accounts: accounts.iter().map(|a| a.to_string()).collect(),
            records,
        },
    }
}

/// `n` distinct A records: `host0.example.com.` ...
pub fn a_records(n: usize) -> Vec<DnsRecord> {
    (0..n)
        .map(|i| {
            let ip = format!("192.0.2.{}", i + 1);
            record(DnsRecordType::A, &format!("host{i}.example.com."), 300, &[ip.as_str()])
        })
        .collect()
}

use tracing::{info, warn};

use crate::error::StackError;
use crate::model::DnsRecord;
use crate::provider::{DnsRecordSet, DnsZoneProvider, ManagedZone, RecordSetArgs};

/// Positional identifier of a record within the stack.
///
/// Reordering the declared records shifts these identifiers, so a reconciler
/// keyed on them would see replacements rather than updates.
pub fn record_resource_name(index: usize) -> String {
    format!("dns-record-{index}")
}

pub fn record_set_args(index: usize, record: &DnsRecord, zone: &ManagedZone) -> RecordSetArgs {
    RecordSetArgs {
        resource_name: record_resource_name(index),
        managed_zone: zone.name.clone(),
        project: zone.project.clone(),
        name: record.name.clone(),
        record_type: record.record_type,
        ttl: record.ttl_seconds,
        rrdatas: record.values.clone(),
    }
}

/// Create one record set per declared record, in order, stopping at the first
/// rejection. Record sets created before the failure are left in place.
pub async fn build_records<P>(
    records: &[DnsRecord],
    zone: &ManagedZone,
    provider: &P,
) -> Result<Vec<DnsRecordSet>, StackError>
where
    P: DnsZoneProvider + ?Sized,
{
    let mut created = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let args = record_set_args(index, record, zone);
        match provider.create_record_set(&args).await {
            Ok(rrset) => {
                info!(
                    resource = %rrset.resource_name,
                    name = %rrset.name,
                    record_type = %rrset.record_type,
                    ttl = rrset.ttl,
                    "record set created"
                );
                created.push(rrset);
            }
            Err(source) => {
                warn!(
                    resource = %args.resource_name,
                    name = %record.name,
                    created = created.len(),
                    remaining = records.len() - index - 1,
                    "record set rejected, stopping"
                );
                return Err(StackError::RecordCreation {
                    index,
                    name: record.name.clone(),
                    record_type: record.record_type.to_string(),
                    source,
                });
            }
        }
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DnsRecordType;
    use crate::provider::ZoneVisibility;

    #[test]
    fn args_copy_record_verbatim() {
        let zone = ManagedZone {
            id: Some("123".into()),
            name: "example-com".into(),
            dns_name: "example.com.".into(),
            project: "proj-1".into(),
            description: "managed-zone for example.com".into(),
            visibility: ZoneVisibility::Public,
            name_servers: vec!["ns-cloud-a1.googledomains.com.".into()],
        };
        let record = DnsRecord {
            record_type: DnsRecordType::TXT,
            name: "example.com.".into(),
            values: vec!["\"v=spf1 -all\"".into(), "\"hello\"".into()],
            ttl_seconds: 0,
        };

        let args = record_set_args(3, &record, &zone);
        assert_eq!(args.resource_name, "dns-record-3");
        assert_eq!(args.managed_zone, "example-com");
        assert_eq!(args.project, "proj-1");
        assert_eq!(args.name, "example.com.");
        assert_eq!(args.record_type, DnsRecordType::TXT);
        assert_eq!(args.ttl, 0);
        assert_eq!(args.rrdatas, record.values);
    }

    #[test]
    fn resource_names_are_distinct_per_position() {
        assert_ne!(record_resource_name(0), record_resource_name(1));
    }
}

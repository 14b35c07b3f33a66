//! Managed zone creation and the project-level `roles/dns.admin` binding.
use std::collections::BTreeSet;

use tracing::info;

use crate::error::StackError;
use crate::model::GcpDnsZone;
use crate::provider::{
    DNS_ADMIN_ROLE, DnsZoneProvider, IamBinding, IamBindingArgs, ManagedZone, ManagedZoneArgs,
    ZoneVisibility,
};
use crate::validation::{validate_domain_name, validate_project_id, validate_service_account};

const SERVICE_ACCOUNT_PREFIX: &str = "serviceAccount:";

/// Domain without trailing dots.
fn domain_root(domain: &str) -> &str {
    domain.trim_end_matches('.')
}

/// Managed-zone resource name: dots are not allowed there, so `example.com` → `example-com`.
pub fn managed_zone_name(domain: &str) -> String {
    domain_root(domain).replace('.', "-")
}

/// Fully-qualified DNS name with exactly one trailing dot.
pub fn dns_name(domain: &str) -> String {
    format!("{}.", domain_root(domain))
}

pub fn zone_description(domain: &str) -> String {
    format!("managed-zone for {}", domain_root(domain))
}

/// IAM member strings for bare service-account emails.
pub fn service_account_members<S: AsRef<str>>(emails: &[S]) -> BTreeSet<String> {
    emails
        .iter()
        .map(|e| e.as_ref().trim())
        .filter(|e| !e.is_empty())
        .map(|e| {
            if e.starts_with(SERVICE_ACCOUNT_PREFIX) {
                e.to_string()
            } else {
                format!("{SERVICE_ACCOUNT_PREFIX}{e}")
            }
        })
        .collect()
}

/// Local checks on everything the run will send; nothing here touches the provider.
pub fn validate_target(target: &GcpDnsZone) -> Result<(), StackError> {
    let domain = target.domain_name();
    validate_domain_name(domain)
        .map_err(|e| StackError::invalid_input(format!("domain '{domain}': {e}")))?;
    validate_project_id(&target.spec.project_id).map_err(|e| StackError::invalid_input(e.to_string()))?;
    for account in target.spec.iam_service_accounts.iter().filter(|a| !a.trim().is_empty()) {
        validate_service_account(account).map_err(|e| StackError::invalid_input(e.to_string()))?;
    }
    Ok(())
}

pub fn managed_zone_args(target: &GcpDnsZone) -> Result<ManagedZoneArgs, StackError> {
    validate_target(target)?;

    let domain = target.domain_name();
    Ok(ManagedZoneArgs {
        name: managed_zone_name(domain),
        dns_name: dns_name(domain),
        project: target.spec.project_id.trim().to_string(),
        description: zone_description(domain),
        visibility: ZoneVisibility::Public,
    })
}

/// Create the public managed zone for `target`.
pub async fn build_zone<P>(target: &GcpDnsZone, provider: &P) -> Result<ManagedZone, StackError>
where
    P: DnsZoneProvider + ?Sized,
{
    let args = managed_zone_args(target)?;
    let zone = provider
        .create_managed_zone(&args)
        .await
        .map_err(|source| StackError::ZoneCreation {
            domain: target.domain_name().to_string(),
            source,
        })?;

    info!(
        zone = %zone.name,
        dns_name = %zone.dns_name,
        project = %zone.project,
        nameservers = ?zone.name_servers,
        "managed zone created"
    );
    Ok(zone)
}

/// Grant `roles/dns.admin` to the authorized service accounts.
///
/// The binding is on the project, so it covers every zone in it; Cloud DNS
/// per-zone IAM is not exposed as a binding resource. Returns `None` without
/// calling the provider when no accounts are listed.
pub async fn build_access_binding<P>(
    target: &GcpDnsZone,
    zone: &ManagedZone,
    provider: &P,
) -> Result<Option<IamBinding>, StackError>
where
    P: DnsZoneProvider + ?Sized,
{
    let accounts = &target.spec.iam_service_accounts;
    if accounts.iter().all(|a| a.trim().is_empty()) {
        info!(zone = %zone.name, "no authorized service accounts, skipping iam binding");
        return Ok(None);
    }
    for account in accounts.iter().filter(|a| !a.trim().is_empty()) {
        validate_service_account(account).map_err(|e| StackError::invalid_input(e.to_string()))?;
    }

    let args = IamBindingArgs {
        project: zone.project.clone(),
        role: DNS_ADMIN_ROLE.to_string(),
        members: service_account_members(accounts),
    };
    let binding = provider
        .create_project_iam_binding(&args)
        .await
        .map_err(|source| StackError::AccessBinding {
            project: zone.project.clone(),
            source,
        })?;

    info!(
        project = %binding.project,
        role = %binding.role,
        members = binding.members.len(),
        "dns-admin iam binding created"
    );
    Ok(Some(binding))
}

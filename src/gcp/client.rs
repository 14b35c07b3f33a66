use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::GcpEndpoints;
use crate::error::{ApiError, StackError};
use crate::gcp::auth::TokenSource;
use crate::gcp::types::*;
use crate::provider::{
    DnsRecordSet, DnsZoneProvider, IamBinding, IamBindingArgs, ManagedZone, ManagedZoneArgs,
    RecordSetArgs, ZoneVisibility,
};

const IAM_POLICY_VERSION: i32 = 3;

/// Cloud DNS + Resource Manager REST client.
#[derive(Debug)]
pub struct CloudDnsClient {
    http: Client,
    endpoints: GcpEndpoints,
    tokens: TokenSource,
}

impl CloudDnsClient {
    pub fn new(endpoints: GcpEndpoints, tokens: TokenSource) -> Result<Self, StackError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| StackError::provider_setup(format!("failed to build http client: {e}")))?;
        Ok(Self {
            http,
            endpoints,
            tokens,
        })
    }

    async fn auth_header(&self, req: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.tokens.token(&self.http).await?;
        Ok(req.bearer_auth(token))
    }

    pub async fn insert_managed_zone(
        &self,
        project: &str,
        zone: &GcpManagedZone,
    ) -> Result<GcpManagedZone, ApiError> {
        let url = self.endpoints.dns_url(project, "managedZones");
        let res = self
            .auth_header(self.http.post(url))
            .await?
            .json(zone)
            .send()
            .await?;
        decode(res).await
    }

    pub async fn insert_rrset(
        &self,
        project: &str,
        zone_name: &str,
        rrset: &GcpResourceRecordSet,
    ) -> Result<GcpResourceRecordSet, ApiError> {
        let url = self
            .endpoints
            .dns_url(project, &format!("managedZones/{}/rrsets", zone_name));
        let res = self
            .auth_header(self.http.post(url))
            .await?
            .json(rrset)
            .send()
            .await?;
        decode(res).await
    }

    pub async fn get_iam_policy(&self, project: &str) -> Result<GcpPolicy, ApiError> {
        let url = self.endpoints.project_method_url(project, "getIamPolicy");
        let body = GetIamPolicyRequest {
            options: GetPolicyOptions {
                requested_policy_version: IAM_POLICY_VERSION,
            },
        };
        let res = self
            .auth_header(self.http.post(url))
            .await?
            .json(&body)
            .send()
            .await?;
        decode(res).await
    }

    pub async fn set_iam_policy(
        &self,
        project: &str,
        policy: &GcpPolicy,
    ) -> Result<GcpPolicy, ApiError> {
        let url = self.endpoints.project_method_url(project, "setIamPolicy");
        let res = self
            .auth_header(self.http.post(url))
            .await?
            .json(&SetIamPolicyRequest { policy })
            .send()
            .await?;
        decode(res).await
    }
}

/// Decode a success body, or turn a Google error envelope into `ApiError::Status`.
async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        return Err(match serde_json::from_str::<GoogleErrorEnvelope>(&body) {
            Ok(env) => ApiError::status(status.as_u16(), env.error.status.as_deref(), env.error.message),
            Err(_) => ApiError::status(status.as_u16(), None, body),
        });
    }
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn parse_visibility(raw: Option<&str>, fallback: ZoneVisibility) -> ZoneVisibility {
    match raw {
        Some("private") => ZoneVisibility::Private,
        Some("public") => ZoneVisibility::Public,
        _ => fallback,
    }
}

#[async_trait]
impl DnsZoneProvider for CloudDnsClient {
    async fn create_managed_zone(&self, args: &ManagedZoneArgs) -> Result<ManagedZone, ApiError> {
        let body = GcpManagedZone {
            id: None,
            name: args.name.clone(),
            dns_name: args.dns_name.clone(),
            description: args.description.clone(),
            visibility: Some(args.visibility.as_str().to_string()),
            name_servers: Vec::new(),
            creation_time: None,
        };
        let created = self.insert_managed_zone(&args.project, &body).await?;
        debug!(zone = %created.name, id = ?created.id, created_at = ?created.creation_time, "managed zone accepted");

        Ok(ManagedZone {
            id: created.id,
            name: created.name,
            dns_name: created.dns_name,
            project: args.project.clone(),
            description: created.description,
            visibility: parse_visibility(created.visibility.as_deref(), args.visibility),
            name_servers: created.name_servers,
        })
    }

    async fn create_project_iam_binding(
        &self,
        args: &IamBindingArgs,
    ) -> Result<IamBinding, ApiError> {
        let mut policy = self.get_iam_policy(&args.project).await?;
        policy.set_role_members(&args.role, args.members.iter().cloned().collect());
        let updated = self.set_iam_policy(&args.project, &policy).await?;

        let members = updated
            .bindings
            .iter()
            .find(|b| b.role == args.role && b.condition.is_none())
            .map(|b| b.members.iter().cloned().collect::<BTreeSet<_>>())
            .unwrap_or_else(|| args.members.clone());

        Ok(IamBinding {
            project: args.project.clone(),
            role: args.role.clone(),
            members,
            etag: updated.etag,
        })
    }

    async fn create_record_set(&self, args: &RecordSetArgs) -> Result<DnsRecordSet, ApiError> {
        let body = GcpResourceRecordSet {
            name: args.name.clone(),
            rrtype: args.record_type.as_str().to_string(),
            ttl: args.ttl,
            rrdatas: args.rrdatas.clone(),
        };
        let created = self
            .insert_rrset(&args.project, &args.managed_zone, &body)
            .await?;

        Ok(DnsRecordSet {
            resource_name: args.resource_name.clone(),
            managed_zone: args.managed_zone.clone(),
            project: args.project.clone(),
            name: created.name,
            record_type: args.record_type,
            ttl: created.ttl,
            rrdatas: created.rrdatas,
        })
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcpManagedZone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>, // uint64 rendered as a string
    pub name: String,     // "example-com"
    pub dns_name: String, // "example.com."
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>, // "public" / "private"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name_servers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GcpResourceRecordSet {
    pub name: String, // "www.example.com."
    #[serde(rename = "type")]
    pub rrtype: String, // "A", "MX", ...
    pub ttl: u32,
    #[serde(default)]
    pub rrdatas: Vec<String>,
}

/// Project IAM policy. Fields this crate does not touch (audit configs and the
/// like) are carried through `extra` so a read-modify-write keeps them.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcpPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default)]
    pub bindings: Vec<GcpBinding>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcpBinding {
    pub role: String, // "roles/dns.admin"
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<serde_json::Value>,
}

impl GcpPolicy {
    /// Make the unconditional binding for `role` list exactly `members`.
    pub fn set_role_members(&mut self, role: &str, members: Vec<String>) {
        match self
            .bindings
            .iter_mut()
            .find(|b| b.role == role && b.condition.is_none())
        {
            Some(binding) => binding.members = members,
            None => self.bindings.push(GcpBinding {
                role: role.to_string(),
                members,
                condition: None,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetIamPolicyRequest {
    pub options: GetPolicyOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPolicyOptions {
    pub requested_policy_version: i32,
}

#[derive(Debug, Serialize)]
pub struct SetIamPolicyRequest<'a> {
    pub policy: &'a GcpPolicy,
}

/// `{"error": {...}}` body returned by Google APIs on failure.
#[derive(Debug, Deserialize)]
pub struct GoogleErrorEnvelope {
    pub error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct GoogleErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>, // "ALREADY_EXISTS", ...
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// OAuth error body from the token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_role_members_replaces_unconditional_binding_only() {
        let mut policy: GcpPolicy = serde_json::from_value(serde_json::json!({
            "version": 3,
            "etag": "BwX1",
            "bindings": [
                { "role": "roles/dns.admin", "members": ["user:old@example.com"] },
                {
                    "role": "roles/dns.admin",
                    "members": ["user:temp@example.com"],
                    "condition": { "title": "expires", "expression": "request.time < timestamp('2030-01-01T00:00:00Z')" }
                },
                { "role": "roles/viewer", "members": ["user:v@example.com"] }
            ],
            "auditConfigs": [{ "service": "allServices" }]
        }))
        .unwrap();

        policy.set_role_members("roles/dns.admin", vec!["serviceAccount:ci@p.iam.gserviceaccount.com".into()]);

        assert_eq!(policy.bindings.len(), 3);
        assert_eq!(policy.bindings[0].members, vec!["serviceAccount:ci@p.iam.gserviceaccount.com"]);
        assert_eq!(policy.bindings[1].members, vec!["user:temp@example.com"]);

        let rendered = serde_json::to_value(&policy).unwrap();
        assert_eq!(rendered["etag"], "BwX1");
        assert_eq!(rendered["auditConfigs"][0]["service"], "allServices");
    }

    #[test]
    fn set_role_members_appends_missing_binding() {
        let mut policy = GcpPolicy::default();
        policy.set_role_members("roles/dns.admin", vec!["serviceAccount:a@p.iam.gserviceaccount.com".into()]);
        assert_eq!(policy.bindings.len(), 1);
        assert_eq!(policy.bindings[0].role, "roles/dns.admin");
    }

    #[test]
    fn managed_zone_create_body_omits_server_fields() {
        let zone = GcpManagedZone {
            id: None,
            name: "example-com".into(),
            dns_name: "example.com.".into(),
            description: "managed-zone for example.com".into(),
            visibility: Some("public".into()),
            name_servers: Vec::new(),
            creation_time: None,
        };
        let body = serde_json::to_value(&zone).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "name": "example-com",
                "dnsName": "example.com.",
                "description": "managed-zone for example.com",
                "visibility": "public"
            })
        );
    }
}

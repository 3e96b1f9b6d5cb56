use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const SCOPE_CLAIM: &str = "scope";

/// One `{group}-{client_id}` scope per group, space separated.
pub fn client_scopes<G: AsRef<str>>(groups: &[G], client_id: &str) -> String {
    groups
        .iter()
        .map(|group| format!("{}-{client_id}", group.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimsOverrideDetails {
    pub claims_to_add_or_override: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenGenerationResponse {
    pub claims_override_details: ClaimsOverrideDetails,
}

impl TokenGenerationResponse {
    pub fn with_scopes(scope: String) -> Self {
        Self {
            claims_override_details: ClaimsOverrideDetails {
                claims_to_add_or_override: BTreeMap::from([(SCOPE_CLAIM.to_string(), scope)]),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn suffixes_each_group_with_client_id() {
        assert_eq!(
            client_scopes(&["admins", "readers"], "client-1"),
            "admins-client-1 readers-client-1"
        );
        assert_eq!(client_scopes(&["solo"], "c"), "solo-c");
    }

    #[test]
    fn no_groups_yield_empty_scope() {
        let groups: [&str; 0] = [];
        assert_eq!(client_scopes(&groups, "client-1"), "");
    }

    #[test]
    fn response_nests_scope_under_claims_override() {
        let response = TokenGenerationResponse::with_scopes("admins-c".to_string());
        assert_eq!(
            serde_json::to_value(&response).expect("response should serialize"),
            json!({
                "claimsOverrideDetails": {
                    "claimsToAddOrOverride": {"scope": "admins-c"},
                },
            })
        );
    }
}

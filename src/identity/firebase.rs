// Firebase Auth client over the Identity Toolkit REST API.

use serde::Deserialize;
use serde_json::json;

use super::{IdentityError, IdentityService, NewIdentity, TokenClaims};
use crate::config::IdentityConfig;

const PRODUCTION_HOST: &str = "https://identitytoolkit.googleapis.com";

// Upstream error codes that mean "the token itself is bad", as opposed to a
// service-side failure.
const INVALID_TOKEN_CODES: &[&str] = &[
    "INVALID_ID_TOKEN",
    "TOKEN_EXPIRED",
    "USER_NOT_FOUND",
    "USER_DISABLED",
];

pub struct FirebaseAuth {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FirebaseAuth {
    pub fn new(config: &IdentityConfig) -> Self {
        let base_url = match &config.emulator_host {
            Some(host) => format!("http://{}/identitytoolkit.googleapis.com", host),
            None => PRODUCTION_HOST.to_string(),
        };

        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: config.web_api_key.clone(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/v1/accounts:{}?key={}", self.base_url, action, self.api_key)
    }

    /// Pull the upstream error code out of an Identity Toolkit error payload.
    fn upstream_error(body: &serde_json::Value) -> String {
        body.pointer("/error/message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown identity service error")
            .to_string()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    local_id: String,
    email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    users: Option<Vec<LookupUser>>,
}

#[async_trait::async_trait]
impl IdentityService for FirebaseAuth {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<NewIdentity, IdentityError> {
        let res = self
            .client
            .post(self.endpoint("signUp"))
            .json(&json!({
                "email": email,
                "password": password,
                "displayName": display_name,
                "returnSecureToken": true,
            }))
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        if res.status().is_success() {
            let body: SignUpResponse = res
                .json()
                .await
                .map_err(|e| IdentityError::Unavailable(e.to_string()))?;
            return Ok(NewIdentity {
                uid: body.local_id,
                email: body.email,
            });
        }

        // signUp failures are policy decisions (EMAIL_EXISTS, WEAK_PASSWORD)
        // and surface to the client as-is.
        let body: serde_json::Value = res
            .json()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;
        Err(IdentityError::Rejected(Self::upstream_error(&body)))
    }

    async fn verify_token(&self, token: &str) -> Result<TokenClaims, IdentityError> {
        let res = self
            .client
            .post(self.endpoint("lookup"))
            .json(&json!({ "idToken": token }))
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        if res.status().is_success() {
            let body: LookupResponse = res
                .json()
                .await
                .map_err(|e| IdentityError::Unavailable(e.to_string()))?;
            let user = body
                .users
                .and_then(|mut users| if users.is_empty() { None } else { Some(users.remove(0)) })
                .ok_or_else(|| IdentityError::InvalidToken("no matching account".to_string()))?;
            return Ok(TokenClaims {
                uid: user.local_id,
                email: user.email,
            });
        }

        let body: serde_json::Value = res
            .json()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;
        let code = Self::upstream_error(&body);

        if INVALID_TOKEN_CODES.iter().any(|c| code.starts_with(c)) {
            Err(IdentityError::InvalidToken(code))
        } else {
            Err(IdentityError::Unavailable(code))
        }
    }
}

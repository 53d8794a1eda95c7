// External identity service seam.
//
// Identity truth lives entirely in the external service: account creation and
// bearer-token verification are both delegated, and the handlers only ever see
// the enumerated outcomes below.

pub mod firebase;

use async_trait::async_trait;

/// A freshly created identity, as reported by the external service.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub uid: String,
    pub email: String,
}

/// Claims extracted from a verified bearer token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub uid: String,
    pub email: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The service refused the operation on policy grounds (duplicate email,
    /// weak password). Maps to 400 at the register boundary.
    #[error("{0}")]
    Rejected(String),

    /// The presented token is invalid or expired. Maps to 403.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Transport failure or an unrecognized service response. Maps to 500.
    #[error("{0}")]
    Unavailable(String),
}

#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Create a new account, returning the service-assigned uid.
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<NewIdentity, IdentityError>;

    /// Verify a bearer token and return its claims.
    async fn verify_token(&self, token: &str) -> Result<TokenClaims, IdentityError>;
}

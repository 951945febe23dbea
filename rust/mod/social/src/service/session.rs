use jsonwebtoken::{decode, encode, Header};

use crate::model::Claims;
use crate::service::{SocialError, SocialService};

impl SocialService {
    /// Issue a signed bearer token asserting `username`.
    ///
    /// Nothing is stored server-side: the token is valid for as long as the
    /// signing secret is unchanged (and, with a TTL configured, until `exp`).
    pub fn issue_token(&self, username: &str) -> Result<String, SocialError> {
        let (iat, exp) = match self.config.token_ttl_secs {
            Some(ttl) => {
                let now = chrono::Utc::now().timestamp();
                (Some(now), Some(now + ttl))
            }
            None => (None, None),
        };

        let claims = Claims {
            username: username.to_string(),
            iat,
            exp,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| SocialError::Internal(format!("JWT encode failed: {}", e)))
    }

    /// Verify and decode a bearer token.
    pub fn verify_token(&self, token: &str) -> Result<Claims, SocialError> {
        if token.is_empty() {
            return Err(SocialError::InvalidCredential("empty token".into()));
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| SocialError::InvalidCredential(e.to_string()))?;

        Ok(token_data.claims)
    }
}

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{Error, Result};

#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
    jwt_expiration: i64,
    api_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: usize,
    exp: usize,
}

impl AuthService {
    pub fn new(jwt_secret: String, jwt_expiration: i64, api_key: Option<String>) -> Self {
        Self {
            jwt_secret,
            jwt_expiration,
            api_key,
        }
    }

    /// Session lifetime in hours.
    pub fn session_hours(&self) -> i64 {
        self.jwt_expiration
    }

    /// Only the identity provider holding the shared key may open sessions.
    pub fn check_api_key(&self, presented: Option<&str>) -> Result<()> {
        match (self.api_key.as_deref(), presented) {
            (Some(expected), Some(presented)) if expected == presented => Ok(()),
            _ => Err(Error::Unauthorized),
        }
    }

    /// Signs a session token for `user_id`, valid for the configured number of hours.
    pub fn issue_token(&self, user_id: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(self.jwt_expiration)).timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|err| {
            error!("Failed to sign session token: {:?}", err);
            Error::InternalServerError
        })
    }

    /// Returns the user id carried by a valid session token.
    pub fn decode_token<T: Into<String>>(&self, token: T) -> Result<String> {
        let decoded = decode::<Claims>(
            &token.into(),
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| Error::Unauthorized)?;

        Ok(decoded.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_decode_to_their_subject() {
        let auth = AuthService::new("secret".to_string(), 1, None);
        let token = auth.issue_token("user-42").unwrap();

        assert_eq!(auth.decode_token(token).unwrap(), "user-42");
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let token = AuthService::new("other".to_string(), 1, None)
            .issue_token("user-42")
            .unwrap();

        let auth = AuthService::new("secret".to_string(), 1, None);
        assert!(matches!(auth.decode_token(token), Err(Error::Unauthorized)));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let auth = AuthService::new("secret".to_string(), -2, None);
        let token = auth.issue_token("user-42").unwrap();

        assert!(matches!(auth.decode_token(token), Err(Error::Unauthorized)));
    }

    #[test]
    fn api_key_must_match_the_configured_one() {
        let auth = AuthService::new("secret".to_string(), 1, Some("provider-key".to_string()));

        assert!(auth.check_api_key(Some("provider-key")).is_ok());
        assert!(matches!(
            auth.check_api_key(Some("guess")),
            Err(Error::Unauthorized)
        ));
        assert!(matches!(auth.check_api_key(None), Err(Error::Unauthorized)));
    }

    #[test]
    fn login_is_disabled_without_an_api_key() {
        let auth = AuthService::new("secret".to_string(), 1, None);

        assert!(matches!(auth.check_api_key(Some("")), Err(Error::Unauthorized)));
    }
}

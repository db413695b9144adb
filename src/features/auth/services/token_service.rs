use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::TokenClaims;
use crate::features::users::models::User;

/// A freshly signed access token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs HS256 access tokens for authenticated users
pub struct TokenService {
    encoding_key: EncodingKey,
    issuer: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let ttl = Duration::from_std(config.token_ttl)
            .map_err(|e| AppError::Internal(format!("Invalid token TTL: {}", e)))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            ttl,
        })
    }

    pub fn issue(&self, user: &User) -> Result<IssuedToken> {
        self.issue_at(user, Utc::now())
    }

    fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<IssuedToken> {
        let expires_at = now + self.ttl;
        let claims = TokenClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.full_name.clone(),
            role: user.role,
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

        tracing::debug!("Issued access token for user {}", user.id);
        Ok(IssuedToken { token, expires_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::JwtValidator;
    use crate::features::users::models::Role;
    use crate::shared::test_helpers::{sample_user, test_auth_config};

    #[test]
    fn test_issued_token_validates() {
        let config = test_auth_config();
        let service = TokenService::new(&config).unwrap();
        let validator = JwtValidator::new(&config);
        let user = sample_user(Role::Admin);

        let issued = service.issue(&user).unwrap();
        let authenticated = validator.validate_token(&issued.token).unwrap();

        assert_eq!(authenticated.user_id, user.id);
        assert_eq!(authenticated.email, user.email);
        assert_eq!(authenticated.full_name, user.full_name);
        assert_eq!(authenticated.role, Role::Admin);
    }

    #[test]
    fn test_role_claim_is_fixed_at_issue() {
        let config = test_auth_config();
        let service = TokenService::new(&config).unwrap();
        let validator = JwtValidator::new(&config);
        let mut user = sample_user(Role::User);

        let before = service.issue(&user).unwrap();
        user.role = Role::Admin;
        let after = service.issue(&user).unwrap();

        assert_eq!(
            validator.validate_token(&before.token).unwrap().role,
            Role::User
        );
        assert_eq!(
            validator.validate_token(&after.token).unwrap().role,
            Role::Admin
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = test_auth_config();
        let service = TokenService::new(&config).unwrap();
        let validator = JwtValidator::new(&config);

        let issued = service
            .issue_at(&sample_user(Role::User), Utc::now() - Duration::days(2))
            .unwrap();

        assert!(validator.validate_token(&issued.token).is_err());
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let config = test_auth_config();
        let mut other = test_auth_config();
        other.jwt_secret = "another-secret-another-secret-another".to_string();

        let issued = TokenService::new(&other)
            .unwrap()
            .issue(&sample_user(Role::User))
            .unwrap();

        assert!(JwtValidator::new(&config)
            .validate_token(&issued.token)
            .is_err());
    }
}

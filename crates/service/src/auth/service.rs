use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use super::domain::{IdentityClaim, TokenClaims};
use super::errors::AuthError;

/// Token service configuration
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl: Duration,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, ttl_secs: u64) -> Self {
        // capped at ten years to stay inside chrono's range
        let secs = ttl_secs.min(10 * 365 * 24 * 3600) as i64;
        Self { secret: secret.into(), ttl: Duration::seconds(secs) }
    }
}

/// A freshly signed credential and the instant it stops verifying.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies HS256 session tokens. Stateless: nothing is recorded
/// on issue, so a token stays valid until `exp` regardless of logout.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(cfg: TokenConfig) -> Result<Self, AuthError> {
        if cfg.secret.is_empty() {
            return Err(AuthError::Validation("token secret must not be empty".into()));
        }
        if cfg.ttl <= Duration::zero() {
            return Err(AuthError::Validation("token ttl must be positive".into()));
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        Ok(Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            validation,
            ttl: cfg.ttl,
        })
    }

    /// Sign `claim` valid for one TTL from now.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{IdentityClaim, TokenConfig, TokenService};
    /// let svc = TokenService::new(TokenConfig::new("secret", 3600)).unwrap();
    /// let claim = IdentityClaim::new("a@x.com");
    /// let issued = svc.issue(&claim).unwrap();
    /// assert_eq!(svc.verify(&issued.token).unwrap(), claim);
    /// ```
    pub fn issue(&self, claim: &IdentityClaim) -> Result<IssuedToken, AuthError> {
        self.issue_at(claim, Utc::now())
    }

    /// Sign `claim` as if issued at `issued_at`.
    #[instrument(skip(self, claim), fields(email = %claim.email))]
    pub fn issue_at(&self, claim: &IdentityClaim, issued_at: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        claim.validate()?;
        let expires_at = issued_at + self.ttl;
        let payload = TokenClaims {
            email: claim.email.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &payload, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        debug!(exp = payload.exp, "token_issued");
        Ok(IssuedToken { token, expires_at })
    }

    /// Check signature and expiry; return the embedded claim unchanged.
    pub fn verify(&self, token: &str) -> Result<IdentityClaim, AuthError> {
        match decode::<TokenClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => Ok(data.claims.into_identity()),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(AuthError::Expired),
                _ => Err(AuthError::InvalidCredential(e.to_string())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svc() -> TokenService {
        TokenService::new(TokenConfig::new("test-secret", 3600)).unwrap()
    }

    #[test]
    fn verify_returns_issued_claim() {
        let s = svc();
        for email in ["a@x.com", "Mixed.Case@Example.org", "x+tag@sub.domain.io"] {
            let claim = IdentityClaim::new(email);
            let issued = s.issue(&claim).unwrap();
            assert_eq!(s.verify(&issued.token).unwrap(), claim);
        }
    }

    #[test]
    fn token_expires_one_ttl_after_issue() {
        let s = svc();
        let at = Utc::now();
        let issued = s.issue_at(&IdentityClaim::new("a@x.com"), at).unwrap();
        assert_eq!(issued.expires_at, at + Duration::hours(1));
    }

    #[test]
    fn token_past_window_is_expired() {
        let s = svc();
        let issued = s
            .issue_at(&IdentityClaim::new("a@x.com"), Utc::now() - Duration::seconds(3600 + 5))
            .unwrap();
        let err = s.verify(&issued.token).unwrap_err();
        assert_eq!(err, AuthError::Expired);
        assert!(err.is_unauthenticated());
    }

    #[test]
    fn token_near_end_of_window_still_valid() {
        let s = svc();
        let issued = s
            .issue_at(&IdentityClaim::new("a@x.com"), Utc::now() - Duration::minutes(59))
            .unwrap();
        assert!(s.verify(&issued.token).is_ok());
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let issued = svc().issue(&IdentityClaim::new("a@x.com")).unwrap();
        let other = TokenService::new(TokenConfig::new("other-secret", 3600)).unwrap();
        let err = other.verify(&issued.token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential(_)));
    }

    #[test]
    fn tampered_and_garbage_tokens_are_invalid() {
        let s = svc();
        let issued = s.issue(&IdentityClaim::new("a@x.com")).unwrap();
        let mut tampered = issued.token.clone();
        tampered.push('x');
        for bad in [tampered.as_str(), "", "not.a.jwt", "abc"] {
            let err = s.verify(bad).unwrap_err();
            assert!(err.is_unauthenticated(), "{bad:?} gave {err:?}");
            assert_ne!(err, AuthError::Expired);
        }
    }

    #[test]
    fn issue_rejects_malformed_claim() {
        let err = svc().issue(&IdentityClaim::new("not-an-email")).unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[test]
    fn construction_rejects_empty_secret_and_zero_ttl() {
        assert!(TokenService::new(TokenConfig::new("", 3600)).is_err());
        assert!(TokenService::new(TokenConfig::new("s", 0)).is_err());
    }
}

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::{Principal, policy::Role},
    config::AppConfig,
    models::User,
};

/// Claims
///
/// The payload structure embedded in every session token. Claims are signed
/// with the configured secret and validated on every request; they are the
/// only thing the server trusts about a returning client.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the UUID of the user the token was issued for.
    pub sub: Uuid,
    /// The username at issuance time, carried for display and logging.
    #[serde(default)]
    pub name: String,
    /// The role at issuance time. Role changes to the underlying user record
    /// do not retroactively affect already-issued tokens; the stale value
    /// rides until expiry. Absent or unrecognized values authenticate but
    /// grant no role.
    #[serde(default)]
    pub role: Option<String>,
    /// Issued At (iat): timestamp when the token was created.
    pub iat: usize,
    /// Expiration Time (exp): timestamp after which the token must not be
    /// accepted. Crucial for preventing replay and keeping sessions fresh.
    pub exp: usize,
    /// Issuer (iss): must match the configured issuer string on validation.
    pub iss: String,
    /// Audience (aud): must match the configured audience string on validation.
    pub aud: String,
}

/// VerificationError
///
/// The internal outcomes of a failed token verification, in validation order:
/// parse, signature, expiry, issuer/audience. These never leave the auth
/// layer; externally every failure collapses into "anonymous", so a caller
/// cannot distinguish an expired token from a forged one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    /// The text is not a well-formed signed token.
    Malformed,
    /// The signature does not match the configured secret.
    InvalidSignature,
    /// The token's validity window has passed.
    Expired,
    /// The issuer or audience claim does not match configuration.
    WrongAudience,
}

/// TokenState
///
/// The concrete type used to share the token service across the application state.
pub type TokenState = std::sync::Arc<TokenService>;

/// TokenService
///
/// Issues and verifies signed session tokens. Both keys and the validation
/// rules are derived once from the immutable AppConfig at construction time,
/// so every operation afterwards is a pure function of (token text, clock):
/// no ambient configuration reads, no stored state.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    ttl_minutes: i64,
}

impl TokenService {
    /// new
    ///
    /// Builds the service from the loaded configuration. The secret has
    /// already been checked non-empty at startup (fail-fast in AppConfig),
    /// so construction itself cannot fail.
    pub fn new(config: &AppConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        // No clock drift allowance: expiry is the token's own contract.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            ttl_minutes: config.token_ttl_minutes,
        }
    }

    /// issue
    ///
    /// Builds and signs a fresh token for the given user record. The validity
    /// window starts now and runs for the configured TTL; two tokens issued
    /// for the same user at different instants differ in their timestamp
    /// claims and each stays valid until its own expiry.
    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.ttl_minutes);

        let claims = Claims {
            sub: user.id,
            name: user.username.clone(),
            role: Some(user.role.clone()),
            iat: now.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        tracing::debug!(
            "Issuing token for user {} ({}), valid {}m",
            user.username,
            user.id,
            self.ttl_minutes
        );

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// verify
    ///
    /// Validates the token text and projects its claims into a Principal.
    /// All checks must pass: well-formed, signature, expiry, issuer/audience.
    /// A token whose role claim is missing or unrecognized still yields an
    /// authenticated Principal, but one holding no role; the policy layer
    /// treats that as matching no required-role set.
    pub fn verify(&self, token: &str) -> Result<Principal, VerificationError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => VerificationError::Expired,
                ErrorKind::InvalidSignature => VerificationError::InvalidSignature,
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                    VerificationError::WrongAudience
                }
                ErrorKind::MissingRequiredClaim(claim) if claim == "iss" || claim == "aud" => {
                    VerificationError::WrongAudience
                }
                _ => VerificationError::Malformed,
            }
        })?;

        Ok(Principal {
            user_id: data.claims.sub,
            username: data.claims.name,
            role: data.claims.role.as_deref().and_then(Role::parse),
            is_authenticated: true,
        })
    }
}

//! Token issuance and verification
//!
//! Tokens are HS256 JWTs. The header `kid` names the key version used to
//! sign, so a rotated secret can stay valid for verification while new
//! tokens are signed with the current one.

use std::collections::HashMap;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::config::TokenConfig;
use crate::errors::{ConfigError, TokenError};
use crate::models::{Claims, Credentials};

/// Signs and verifies credential tokens
pub struct TokenService {
  /// Key id of the signing key
  key_id: String,
  /// Current signing key
  encoding_key: EncodingKey,
  /// Verification keys by `kid`, the signing key included
  decoding_keys: HashMap<String, DecodingKey>,
  /// Lifetime of issued tokens in seconds
  ttl_secs: Option<u64>,
}

impl std::fmt::Debug for TokenService {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TokenService")
      .field("key_id", &self.key_id)
      .field("accepted_kids", &self.decoding_keys.keys().collect::<Vec<_>>())
      .field("ttl_secs", &self.ttl_secs)
      .finish_non_exhaustive()
  }
}

impl TokenService {
  /// Builds the service from validated key material.
  ///
  /// # Errors
  /// Returns `ConfigError` if the token configuration is invalid
  pub fn new(config: &TokenConfig) -> Result<Self, ConfigError> {
    config.validate()?;

    let mut decoding_keys = HashMap::with_capacity(config.previous_keys.len() + 1);
    decoding_keys.insert(
      config.key_id.clone(),
      DecodingKey::from_secret(config.secret.as_bytes()),
    );
    for key in &config.previous_keys {
      decoding_keys.insert(key.kid.clone(), DecodingKey::from_secret(key.secret.as_bytes()));
    }

    Ok(Self {
      key_id: config.key_id.clone(),
      encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
      decoding_keys,
      ttl_secs: config.ttl_secs,
    })
  }

  /// Issues a signed token carrying the credentials as claims.
  ///
  /// The credentials are not checked against anything.
  ///
  /// # Errors
  /// `TokenError::Signing` if encoding fails
  pub fn issue(&self, credentials: &Credentials) -> Result<String, TokenError> {
    let mut claims = Claims::from(credentials);
    claims.exp = self.ttl_secs.map(|ttl| jsonwebtoken::get_current_timestamp() + ttl);

    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(self.key_id.clone());

    let token =
      jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(TokenError::Signing)?;

    debug!(username = %claims.username, kid = %self.key_id, "Issued token");
    Ok(token)
  }

  /// Verifies a token and returns its claims.
  ///
  /// # Errors
  /// - `TokenError::Malformed`: not a JWT
  /// - `TokenError::UnknownKey`: header `kid` missing or not accepted
  /// - `TokenError::Invalid`: wrong algorithm, bad signature, or expired
  pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
    let header = jsonwebtoken::decode_header(token).map_err(TokenError::Malformed)?;

    let key = header
      .kid
      .as_deref()
      .and_then(|kid| self.decoding_keys.get(kid))
      .ok_or_else(|| TokenError::UnknownKey {
        kid: header.kid.clone(),
      })?;

    // `exp` is optional; when present it is still checked
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = true;

    let data =
      jsonwebtoken::decode::<Claims>(token, key, &validation).map_err(TokenError::Invalid)?;
    Ok(data.claims)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::VerificationKey;

  fn credentials(username: &str, password: &str) -> Credentials {
    Credentials {
      username: username.to_string(),
      password: password.to_string(),
    }
  }

  fn service(secret: &str, kid: &str) -> TokenService {
    TokenService::new(&TokenConfig::new(secret, kid)).unwrap()
  }

  #[test]
  fn issued_token_has_three_segments() {
    let token = service("secret", "v1").issue(&credentials("a", "b")).unwrap();
    assert_eq!(token.split('.').count(), 3);
  }

  #[test]
  fn issue_then_verify_returns_claims() {
    let service = service("secret", "v1");
    let token = service.issue(&credentials("a", "b")).unwrap();

    let claims = service.verify(&token).unwrap();
    assert_eq!(claims.username, "a");
    assert_eq!(claims.password, "b");
    assert_eq!(claims.exp, None);
  }

  #[test]
  fn header_carries_key_id() {
    let token = service("secret", "2026-10").issue(&credentials("a", "b")).unwrap();
    let header = jsonwebtoken::decode_header(&token).unwrap();
    assert_eq!(header.kid.as_deref(), Some("2026-10"));
    assert_eq!(header.alg, Algorithm::HS256);
  }

  #[test]
  fn token_signed_with_other_secret_is_invalid() {
    let token = service("other", "v1").issue(&credentials("a", "b")).unwrap();
    let err = service("secret", "v1").verify(&token).unwrap_err();
    assert!(matches!(err, TokenError::Invalid(_)));
  }

  #[test]
  fn token_with_unknown_kid_is_rejected() {
    let token = service("secret", "v9").issue(&credentials("a", "b")).unwrap();
    let err = service("secret", "v1").verify(&token).unwrap_err();
    assert!(matches!(err, TokenError::UnknownKey { kid: Some(kid) } if kid == "v9"));
  }

  #[test]
  fn garbage_is_malformed() {
    let err = service("secret", "v1").verify("not-a-token").unwrap_err();
    assert!(matches!(err, TokenError::Malformed(_)));
  }

  #[test]
  fn previous_key_still_verifies_after_rotation() {
    let old = service("old-secret", "v1");
    let token = old.issue(&credentials("a", "b")).unwrap();

    let mut config = TokenConfig::new("new-secret", "v2");
    config.previous_keys.push(VerificationKey {
      kid: "v1".to_string(),
      secret: "old-secret".to_string(),
    });
    let rotated = TokenService::new(&config).unwrap();

    assert_eq!(rotated.verify(&token).unwrap().username, "a");
    let fresh = rotated.issue(&credentials("c", "d")).unwrap();
    assert_eq!(jsonwebtoken::decode_header(&fresh).unwrap().kid.as_deref(), Some("v2"));
  }

  #[test]
  fn ttl_adds_expiry() {
    let mut config = TokenConfig::new("secret", "v1");
    config.ttl_secs = Some(60);
    let service = TokenService::new(&config).unwrap();

    let claims = service.verify(&service.issue(&credentials("a", "b")).unwrap()).unwrap();
    let exp = claims.exp.expect("exp should be set");
    assert!(exp > jsonwebtoken::get_current_timestamp());
  }

  #[test]
  fn expired_token_is_rejected() {
    let service = service("secret", "v1");
    let claims = Claims {
      username: "a".to_string(),
      password: "b".to_string(),
      exp: Some(1),
    };
    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some("v1".to_string());
    let token =
      jsonwebtoken::encode(&header, &claims, &EncodingKey::from_secret(b"secret")).unwrap();

    assert!(matches!(service.verify(&token), Err(TokenError::Invalid(_))));
  }

  #[test]
  fn invalid_config_is_rejected() {
    assert!(TokenService::new(&TokenConfig::new("", "v1")).is_err());
  }
}

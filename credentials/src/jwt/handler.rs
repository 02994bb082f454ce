use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Token handler for signing and verifying bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256) over a process-wide secret.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new token handler with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims into a token string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its `exp` claim
    /// * `TokenInvalid` - Bad signature or malformed token
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::new(self.algorithm);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    _ => JwtError::TokenInvalid(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

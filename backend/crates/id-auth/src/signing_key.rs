/// Key material a [`JwtSigner`](crate::JwtSigner) signs with.
#[derive(Clone)]
pub enum SigningKey {
    /// HMAC with SHA-256 (symmetric key)
    HS256 { secret: Vec<u8> },
    /// RSA with SHA-256 (PKCS#1 or PKCS#8 private key)
    RS256 { private_key_pem: String },
}

impl SigningKey {
    pub fn algorithm_name(&self) -> &'static str {
        match self {
            Self::HS256 { .. } => "HS256",
            Self::RS256 { .. } => "RS256",
        }
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningKey::{}(<redacted>)", self.algorithm_name())
    }
}

use zeroize::Zeroizing;

/// A plaintext password, held only for as long as hashing or verification
/// needs it. The buffer is wiped when the value is dropped, on every path.
///
/// Not `Clone`: there is exactly one copy, and it is moved into the hashing
/// call that consumes it.
pub struct PlaintextSecret(Zeroizing<String>);

impl PlaintextSecret {
    pub fn new(secret: String) -> Self {
        Self(Zeroizing::new(secret))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for PlaintextSecret {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl std::fmt::Debug for PlaintextSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PlaintextSecret(<redacted>)")
    }
}

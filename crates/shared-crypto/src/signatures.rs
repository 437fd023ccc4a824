//! # Ed25519 Signatures
//!
//! Twisted Edwards curve signatures with deterministic nonces, plus the
//! process-wide [`SignatureAuthority`] built on top of them.

use crate::CryptoError;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Ed25519 public key (32 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey([u8; 32]);

impl Ed25519PublicKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        // Validate it's a valid point
        VerifyingKey::from_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Verify a signature.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<(), CryptoError> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)?;

        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);

        verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PublicKey({})", self.to_hex())
    }
}

/// Ed25519 signature (64 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ed25519Signature([u8; SIGNATURE_LENGTH]);

impl Ed25519Signature {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse from a slice of arbitrary length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; SIGNATURE_LENGTH] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidSignatureFormat {
                    expected: SIGNATURE_LENGTH,
                    actual: bytes.len(),
                })?;
        Ok(Self(array))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }
}

/// Ed25519 keypair.
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
}

impl Ed25519KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret seed (32 bytes). The passed copy is wiped.
    pub fn from_seed(mut seed: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        seed.zeroize();
        Self { signing_key }
    }

    /// Create from a hex-encoded 32-byte seed.
    pub fn from_seed_hex(seed_hex: &str) -> Result<Self, CryptoError> {
        let mut bytes = hex::decode(seed_hex.trim())
            .map_err(|e| CryptoError::InvalidSeed(e.to_string()))?;
        let seed: Result<[u8; 32], _> = bytes.as_slice().try_into();
        let len = bytes.len();
        bytes.zeroize();
        let mut seed = seed.map_err(|_| {
            CryptoError::InvalidSeed(format!("expected 32 bytes, got {}", len))
        })?;
        let keypair = Self::from_seed(seed);
        seed.zeroize();
        Ok(keypair)
    }

    /// Get public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        let verifying_key = self.signing_key.verifying_key();
        Ed25519PublicKey(verifying_key.to_bytes())
    }

    /// Sign a message (deterministic - no RNG needed).
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        let sig = self.signing_key.sign(message);
        Ed25519Signature(sig.to_bytes())
    }
}

// `SigningKey` wipes its secret on drop.
impl ZeroizeOnDrop for Ed25519KeyPair {}

// =============================================================================
// SIGNATURE AUTHORITY
// =============================================================================

/// Holder of the single long-lived process keypair.
///
/// Created once by the application root and shared as
/// `Arc<SignatureAuthority>`. Signing always uses the same key, so any
/// signature it issues can later be verified against [`public_key`].
///
/// [`public_key`]: SignatureAuthority::public_key
pub struct SignatureAuthority {
    keypair: Ed25519KeyPair,
    public_key: Ed25519PublicKey,
}

impl SignatureAuthority {
    /// Generate the process keypair.
    pub fn generate() -> Self {
        Self::from_keypair(Ed25519KeyPair::generate())
    }

    /// Wrap an existing keypair.
    pub fn from_keypair(keypair: Ed25519KeyPair) -> Self {
        let public_key = keypair.public_key();
        tracing::info!(public_key = %public_key.to_hex(), "Signature authority initialised");
        Self {
            keypair,
            public_key,
        }
    }

    /// The process public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.public_key
    }

    /// Sign `message` with the process key.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.keypair.sign(message).as_bytes().to_vec()
    }

    /// Verify `signature` over `message` against `public_key`.
    ///
    /// Returns `false` for wrong-length signatures, wrong keys and tampered
    /// messages. Never panics.
    pub fn verify(&self, message: &[u8], signature: &[u8], public_key: &Ed25519PublicKey) -> bool {
        let signature = match Ed25519Signature::from_slice(signature) {
            Ok(signature) => signature,
            Err(e) => {
                tracing::debug!(error = %e, "Rejecting malformed signature");
                return false;
            }
        };
        public_key.verify(message, &signature).is_ok()
    }

    /// Verify against the process public key.
    pub fn verify_own(&self, message: &[u8], signature: &[u8]) -> bool {
        self.verify(message, signature, &self.public_key)
    }
}

impl fmt::Debug for SignatureAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureAuthority")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

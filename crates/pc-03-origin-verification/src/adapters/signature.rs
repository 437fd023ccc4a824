//! Signature check backed by the process [`SignatureAuthority`].

use shared_crypto::SignatureAuthority;
use shared_types::Coin;
use std::sync::Arc;

use crate::ports::outbound::SignatureCheck;

/// Verifies registered coins against their stored signature. Ids the
/// ledger never issued get a sign-then-verify attestation of
/// `{source}-{coin_id}` with the process key.
pub struct AuthoritySignatureCheck {
    authority: Arc<SignatureAuthority>,
}

impl AuthoritySignatureCheck {
    pub fn new(authority: Arc<SignatureAuthority>) -> Self {
        Self { authority }
    }
}

impl SignatureCheck for AuthoritySignatureCheck {
    fn verify_origin(&self, source: &str, coin_id: &str, registered: Option<&Coin>) -> bool {
        match registered {
            Some(coin) => self.authority.verify_own(&coin.message(), coin.signature()),
            None => {
                let message = format!("{}-{}", source, coin_id);
                let signature = self.authority.sign(message.as_bytes());
                self.authority.verify_own(message.as_bytes(), &signature)
            }
        }
    }
}

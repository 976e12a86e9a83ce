//! Canonical transaction signing and signature verification.
//!
//! Nodes only accept signatures in the canonical compact form. Signing is
//! deterministic, so when any key yields a non-canonical signature the only
//! way forward is a different digest: the signer moves the expiration one
//! second later and signs every key again.
use crate::config::ChainConfig;
use crate::crypto::sign_compact;
use crate::keybag::KeyBag;
use crate::keypair::PrivateKey;
use crate::settings::DEFAULT_MAX_SIGNING_ATTEMPTS;
use crate::transaction::SignedTransaction;
use crate::types::{PublicKey, Signature};
use crate::{Error, Result};

pub struct TransactionSigner<'a> {
    chain: &'a ChainConfig,
    max_attempts: u32,
}

impl<'a> TransactionSigner<'a> {
    pub fn new(chain: &'a ChainConfig) -> Self {
        TransactionSigner {
            chain,
            max_attempts: DEFAULT_MAX_SIGNING_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn get_max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Replaces the signatures of `stx` with one canonical signature per key,
    /// in key order. Returns the number of attempts used.
    pub fn sign(&self, stx: &mut SignedTransaction, keys: &[PrivateKey]) -> Result<u32> {
        if keys.is_empty() {
            return Err(Error::NoSigningKeyFound);
        }
        for attempt in 1..=self.max_attempts {
            let digest = stx.digest(self.chain)?;
            let mut signatures = Vec::with_capacity(keys.len());
            for key in keys {
                let signature = Signature(sign_compact(&digest, key.secret_key())?);
                if !signature.is_canonical() {
                    break;
                }
                signatures.push(signature);
            }

            if signatures.len() == keys.len() {
                stx.set_signatures(signatures);
                log::debug!(
                    "signed transaction {} with {} keys in {} attempts",
                    stx.id()?,
                    keys.len(),
                    attempt
                );
                return Ok(attempt);
            }

            let transaction = stx.get_transaction_mut();
            let bumped = transaction.get_expiration() + 1;
            log::debug!("non-canonical signature, moving expiration to {}", bumped);
            transaction.set_expiration(bumped);
        }
        Err(Error::CanonicalSignatureNotFound(self.max_attempts))
    }

    /// Recovers the public key behind every signature of `stx`.
    pub fn signing_keys(&self, stx: &SignedTransaction) -> Result<Vec<PublicKey>> {
        let digest = stx.digest(self.chain)?;
        stx.get_signatures()
            .iter()
            .map(|signature| signature.recover(&digest))
            .collect()
    }

    /// True when `stx` carries signatures and every one of them recovers to a
    /// key held in `keybag`.
    pub fn verify(&self, stx: &SignedTransaction, keybag: &KeyBag) -> Result<bool> {
        self.verify_by(stx, |key| keybag.contains(key))
    }

    pub fn verify_with_keys(&self, stx: &SignedTransaction, keys: &[PublicKey]) -> Result<bool> {
        self.verify_by(stx, |key| keys.contains(key))
    }

    fn verify_by<F: Fn(&PublicKey) -> bool>(
        &self,
        stx: &SignedTransaction,
        is_known: F,
    ) -> Result<bool> {
        if stx.get_signatures().is_empty() {
            return Ok(false);
        }
        let recovered = self.signing_keys(stx)?;
        Ok(recovered.iter().all(|key| is_known(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::crypto::is_canonical;
    use crate::operations::LimitOrderCancelOperation;
    use crate::transaction::Transaction;
    use crate::types::{AccountId, AssetAmount, AssetId, LimitOrderId};
    use proptest::prelude::*;

    fn chain() -> ChainConfig {
        config::lookup(config::BITSHARES_CHAIN_ID).unwrap()
    }

    fn unsigned(expiration: u32) -> SignedTransaction {
        let mut tx = Transaction::default();
        tx.set_ref_block(555, 3333333);
        tx.set_expiration(crate::types::TimePointSec::from_unix(expiration));
        tx.add_operation(LimitOrderCancelOperation {
            fee: AssetAmount::new(1000, AssetId::new(789)),
            fee_paying_account: AccountId::new(456),
            order: LimitOrderId::new(123),
            extensions: vec![],
        });
        SignedTransaction::from(tx)
    }

    #[test]
    fn sign_and_verify_test() {
        let chain = chain();
        let signer = TransactionSigner::new(&chain);
        let mut bag = KeyBag::new();
        let a = PrivateKey::generate();
        let b = PrivateKey::generate();
        bag.add(a.clone());
        bag.add(b.clone());

        let mut stx = unsigned(1136214245);
        let attempts = signer.sign(&mut stx, &[a.clone(), b.clone()]).unwrap();
        assert!(attempts >= 1);
        assert_eq!(
            stx.get_transaction().get_expiration().get_unix(),
            1136214245 + attempts - 1
        );
        assert_eq!(stx.get_signatures().len(), 2);
        assert_eq!(
            signer.signing_keys(&stx).unwrap(),
            vec![a.public_key(), b.public_key()]
        );
        assert!(signer.verify(&stx, &bag).unwrap());
        assert!(signer.verify_with_keys(&stx, &[a.public_key(), b.public_key()]).unwrap());
        assert!(!signer.verify_with_keys(&stx, &[a.public_key()]).unwrap());
    }

    #[test]
    fn verify_rejects_foreign_signature_test() {
        let chain = chain();
        let signer = TransactionSigner::new(&chain);
        let mut bag = KeyBag::new();
        bag.add(PrivateKey::generate());

        let mut stx = unsigned(1136214245);
        signer.sign(&mut stx, &[PrivateKey::generate()]).unwrap();
        assert!(!signer.verify(&stx, &bag).unwrap());

        assert!(!signer.verify(&unsigned(1136214245), &bag).unwrap());
    }

    #[test]
    fn verify_depends_on_chain_test() {
        let chain = chain();
        let testnet = config::lookup(config::TESTNET_CHAIN_ID).unwrap();
        let key = PrivateKey::generate();
        let mut stx = unsigned(1136214245);
        TransactionSigner::new(&chain).sign(&mut stx, &[key.clone()]).unwrap();
        assert!(!TransactionSigner::new(&testnet)
            .verify_with_keys(&stx, &[key.public_key()])
            .unwrap());
    }

    #[test]
    fn malformed_signature_is_error_test() {
        let chain = chain();
        let signer = TransactionSigner::new(&chain);
        let mut stx = unsigned(1136214245);
        stx.add_signature(Signature([0u8; 65]));
        assert!(signer.verify(&stx, &KeyBag::new()).is_err());
    }

    #[test]
    fn signing_errors_test() {
        let chain = chain();
        let mut stx = unsigned(1136214245);
        assert!(matches!(
            TransactionSigner::new(&chain).sign(&mut stx, &[]),
            Err(Error::NoSigningKeyFound)
        ));
        assert!(matches!(
            TransactionSigner::new(&chain)
                .with_max_attempts(0)
                .sign(&mut stx, &[PrivateKey::generate()]),
            Err(Error::CanonicalSignatureNotFound(0))
        ));
        assert!(stx.get_signatures().is_empty());
    }

    #[test]
    fn resign_replaces_signatures_test() {
        let chain = chain();
        let signer = TransactionSigner::new(&chain);
        let key = PrivateKey::generate();
        let mut stx = unsigned(1136214245);
        signer.sign(&mut stx, &[key.clone()]).unwrap();
        signer.sign(&mut stx, &[key]).unwrap();
        assert_eq!(stx.get_signatures().len(), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn signatures_are_canonical_and_verify(
            secret in prop::array::uniform32(1u8..),
            expiration in 1_000_000u32..2_000_000_000u32,
        ) {
            let chain = chain();
            let signer = TransactionSigner::new(&chain);
            let key = PrivateKey::from_secret_slice(&secret).unwrap();
            let mut stx = unsigned(expiration);
            signer.sign(&mut stx, &[key.clone()]).unwrap();

            for signature in stx.get_signatures() {
                prop_assert!(is_canonical(&signature.0));
                let header = signature.0[0];
                prop_assert!(header == 31 || header == 32);
            }
            prop_assert!(signer.verify_with_keys(&stx, &[key.public_key()]).unwrap());
        }
    }
}

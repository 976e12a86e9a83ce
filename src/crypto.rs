use ripemd160::Ripemd160;
use secp256k1::recovery::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};
use sha2::{Digest, Sha256, Sha512};

use crate::{Error, Result};

pub type GrapheneHash = [u8; 32];

/// Recovery byte offset for compact signatures over compressed keys.
pub const COMPACT_RECOVERY_OFFSET: u8 = 27 + 4;

pub fn hash(data: &[u8]) -> GrapheneHash {
    let mut output = [0u8; 32];
    output.copy_from_slice(Sha256::digest(data).as_slice());
    output
}

pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut output = [0u8; 64];
    output.copy_from_slice(Sha512::digest(data).as_slice());
    output
}

pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut output = [0u8; 20];
    output.copy_from_slice(Ripemd160::digest(data).as_slice());
    output
}

/// True when a 65-byte compact signature satisfies the Graphene canonical
/// form: neither R nor S may have its top bit set, and neither may carry a
/// redundant leading zero byte.
pub fn is_canonical(signature: &[u8; 65]) -> bool {
    signature[1] & 0x80 == 0
        && !(signature[1] == 0 && signature[2] & 0x80 == 0)
        && signature[33] & 0x80 == 0
        && !(signature[33] == 0 && signature[34] & 0x80 == 0)
}

/// Signs a 32-byte digest, returning `[recovery byte, R, S]`.
///
/// The signature is deterministic for a given key and digest; callers that
/// need a canonical signature change the digest and sign again.
pub fn sign_compact(digest: &GrapheneHash, secret_key: &SecretKey) -> Result<[u8; 65]> {
    let message = Message::from_slice(digest)?;
    let signature = SECP256K1.sign_recoverable(&message, secret_key);
    let (recovery_id, data) = signature.serialize_compact();

    let mut compact = [0u8; 65];
    compact[0] = COMPACT_RECOVERY_OFFSET + recovery_id.to_i32() as u8;
    compact[1..].copy_from_slice(&data);
    Ok(compact)
}

/// Recovers the signing public key from a compact signature and its digest.
pub fn recover_compact(digest: &GrapheneHash, signature: &[u8; 65]) -> Result<PublicKey> {
    let header = signature[0];
    if !(27..=34).contains(&header) {
        return Err(Error::InvalidSignature(format!(
            "recovery byte {} out of range",
            header
        )));
    }
    let recovery_id = RecoveryId::from_i32(((header - 27) & 3) as i32)?;
    let recoverable = RecoverableSignature::from_compact(&signature[1..], recovery_id)?;
    let message = Message::from_slice(digest)?;
    Ok(SECP256K1.recover(&message, &recoverable)?)
}

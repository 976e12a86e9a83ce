use std::fmt;
use std::str::FromStr;

use base58::{FromBase58, ToBase58};
use rand::RngCore;
use secp256k1::SecretKey;

use crate::crypto::{hash, sha512};
use crate::types::PublicKey;
use crate::{Error, Result};

/// Version byte of a wallet-import-format private key.
const WIF_VERSION: u8 = 0x80;

/// A secp256k1 private key together with its public key.
#[derive(Clone, PartialEq)]
pub struct PrivateKey {
    secret_key: SecretKey,
    public_key: PublicKey,
}

impl PrivateKey {
    /// Create and return a key from fresh OS randomness.
    pub fn generate() -> PrivateKey {
        let mut rng = rand::thread_rng();
        let mut bytes = [0u8; 32];
        loop {
            rng.fill_bytes(&mut bytes);
            // almost every 32-byte string is a valid scalar
            if let Ok(key) = PrivateKey::from_secret_slice(&bytes) {
                return key;
            }
        }
    }

    pub fn from_secret_slice(slice: &[u8]) -> Result<PrivateKey> {
        let secret_key = SecretKey::from_slice(slice)
            .map_err(|e| Error::InvalidKey(format!("private key: {}", e)))?;
        Ok(PrivateKey {
            public_key: PublicKey::from_secret_key(&secret_key),
            secret_key,
        })
    }

    pub fn from_secret_hex(secret_hex: &str) -> Result<PrivateKey> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(secret_hex, &mut bytes as &mut [u8])?;
        PrivateKey::from_secret_slice(&bytes)
    }

    /// Parse `base58(0x80 || key || sha256(sha256(0x80 || key))[0..4])`.
    pub fn from_wif(wif: &str) -> Result<PrivateKey> {
        let bytes = wif
            .from_base58()
            .map_err(|e| Error::InvalidKey(format!("wif base58 {:?}", e)))?;
        if bytes.len() != 37 {
            return Err(Error::InvalidKey(format!(
                "wif must decode to 37 bytes, got {}",
                bytes.len()
            )));
        }
        if bytes[0] != WIF_VERSION {
            return Err(Error::InvalidKey(format!(
                "wif version byte {:#04x}",
                bytes[0]
            )));
        }
        let checksum = hash(&hash(&bytes[..33]));
        if checksum[..4] != bytes[33..] {
            return Err(Error::InvalidKey(String::from("wif checksum mismatch")));
        }
        PrivateKey::from_secret_slice(&bytes[1..33])
    }

    pub fn to_wif(&self) -> String {
        let mut bytes = Vec::with_capacity(37);
        bytes.push(WIF_VERSION);
        bytes.extend_from_slice(&self.secret_key[..]);
        let checksum = hash(&hash(&bytes));
        bytes.extend_from_slice(&checksum[..4]);
        bytes.to_base58()
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// ECDH with `other`: SHA-512 of the x coordinate of `other * self`.
    pub fn shared_secret(&self, other: &PublicKey) -> Result<[u8; 64]> {
        let mut point = *other.get_inner();
        point.mul_assign(secp256k1::SECP256K1, &self.secret_key[..])?;
        Ok(sha512(&point.serialize()[1..]))
    }
}

impl FromStr for PrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PrivateKey::from_wif(s)
    }
}

// The secret never reaches logs.
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const MOCK_SECRET_HEX: &str =
        "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d";
    const MOCK_WIF: &str = "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ";

    #[test]
    fn wif_test() {
        let key = PrivateKey::from_wif(MOCK_WIF).unwrap();
        assert_eq!(hex::encode(&key.secret_key()[..]), MOCK_SECRET_HEX);
        assert_eq!(key.to_wif(), MOCK_WIF);
        assert_eq!(PrivateKey::from_secret_hex(MOCK_SECRET_HEX).unwrap(), key);
        assert_eq!(MOCK_WIF.parse::<PrivateKey>().unwrap(), key);
    }

    #[test]
    fn wif_rejects_corruption_test() {
        let mut corrupted = String::from(MOCK_WIF);
        corrupted.replace_range(10..11, "X");
        assert!(PrivateKey::from_wif(&corrupted).is_err());
        assert!(PrivateKey::from_wif("5HueCGU8").is_err());
        assert!(PrivateKey::from_wif("0OIl").is_err());
    }

    #[test]
    fn generate_test() {
        let key = PrivateKey::generate();
        assert_eq!(PrivateKey::from_wif(&key.to_wif()).unwrap(), key);
        assert_ne!(PrivateKey::generate(), key);
        assert!(!format!("{:?}", key).contains(&hex::encode(&key.secret_key()[..])));
    }

    #[test]
    fn shared_secret_test() {
        let alice = PrivateKey::generate();
        let bob = PrivateKey::generate();
        assert_eq!(
            alice.shared_secret(&bob.public_key()).unwrap()[..],
            bob.shared_secret(&alice.public_key()).unwrap()[..]
        );
    }
}

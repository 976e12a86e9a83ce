use aes::Aes256;
use block_modes::block_padding::Pkcs7;
use block_modes::{BlockMode, Cbc};
use macros::Marshal;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::crypto::{hash, sha512};
use crate::keypair::PrivateKey;
use crate::types::{number_or_string, Buffer, PublicKey};
use crate::{Error, Result};

// create an alias for convenience
type Aes256Cbc = Cbc<Aes256, Pkcs7>;

/// An encrypted note attached to a transfer.
///
/// The AES key and IV are the two halves of
/// `sha512(decimal nonce || hex(shared secret))`, and the plaintext carries
/// the first four bytes of its own SHA-256 as a checksum prefix.
#[derive(Clone, Debug, PartialEq, Marshal, Serialize, Deserialize)]
pub struct Memo {
    pub from: PublicKey,
    pub to: PublicKey,
    #[serde(deserialize_with = "number_or_string")]
    pub nonce: u64,
    pub message: Buffer,
}

impl Memo {
    pub fn generate_nonce() -> u64 {
        rand::thread_rng().gen()
    }

    pub fn encrypt(sender: &PrivateKey, to: &PublicKey, nonce: u64, text: &str) -> Result<Memo> {
        let cipher = Memo::cipher(sender, to, nonce)?;
        let mut plaintext = hash(text.as_bytes())[..4].to_vec();
        plaintext.extend_from_slice(text.as_bytes());
        Ok(Memo {
            from: sender.public_key(),
            to: *to,
            nonce,
            message: Buffer(cipher.encrypt_vec(&plaintext)),
        })
    }

    /// Decrypts with either party's key.
    pub fn decrypt(&self, key: &PrivateKey) -> Result<String> {
        let other = if key.public_key() == self.from {
            &self.to
        } else if key.public_key() == self.to {
            &self.from
        } else {
            return Err(Error::Memo(String::from(
                "key is neither sender nor recipient",
            )));
        };
        let cipher = Memo::cipher(key, other, self.nonce)?;
        let plaintext = cipher
            .decrypt_vec(self.message.as_slice())
            .map_err(|e| Error::Memo(format!("decrypt: {}", e)))?;
        if plaintext.len() < 4 {
            return Err(Error::Memo(String::from("message shorter than checksum")));
        }
        let (checksum, text) = plaintext.split_at(4);
        if hash(text)[..4] != *checksum {
            return Err(Error::Memo(String::from("checksum mismatch")));
        }
        String::from_utf8(text.to_vec()).map_err(|e| Error::Memo(format!("utf-8: {}", e)))
    }

    fn cipher(key: &PrivateKey, other: &PublicKey, nonce: u64) -> Result<Aes256Cbc> {
        let secret = key.shared_secret(other)?;
        let seed = format!("{}{}", nonce, hex::encode(&secret[..]));
        let material = sha512(seed.as_bytes());
        Aes256Cbc::new_from_slices(&material[..32], &material[32..48])
            .map_err(|e| Error::Memo(format!("cipher: {}", e)))
    }
}

use std::io::{Read, Write};

use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::codec::{to_bytes, Decoder, Encoder, Marshal, Unmarshal};
use crate::config::ChainConfig;
use crate::crypto::{hash, GrapheneHash};
use crate::operations::Operation;
use crate::settings::DEFAULT_EXPIRATION_SECS;
use crate::types::{Extensions, Signature, TimePointSec};
use crate::{Error, Result};

/// The unsigned transaction body. Its serialization, prefixed with the
/// chain id, is what gets signed.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct Transaction {
    ref_block_num: u16,
    ref_block_prefix: u32,
    expiration: TimePointSec,
    operations: Vec<Operation>,
    #[serde(default)]
    extensions: Extensions,
}

impl Transaction {
    /// An empty transaction expiring thirty seconds from now.
    pub fn new() -> Transaction {
        Transaction {
            expiration: TimePointSec::now() + DEFAULT_EXPIRATION_SECS,
            ..Default::default()
        }
    }

    pub fn add_operation<T: Into<Operation>>(&mut self, op: T) {
        self.operations.push(op.into());
    }

    pub fn get_operations(&self) -> &Vec<Operation> {
        &self.operations
    }

    pub fn get_operations_mut(&mut self) -> &mut Vec<Operation> {
        &mut self.operations
    }

    pub fn get_ref_block_num(&self) -> u16 {
        self.ref_block_num
    }

    pub fn get_ref_block_prefix(&self) -> u32 {
        self.ref_block_prefix
    }

    pub fn set_ref_block(&mut self, ref_block_num: u16, ref_block_prefix: u32) {
        self.ref_block_num = ref_block_num;
        self.ref_block_prefix = ref_block_prefix;
    }

    /// Points the transaction at a recent block: the low 16 bits of its
    /// number, and the little-endian u32 at bytes 4..8 of its id.
    pub fn set_reference_block(&mut self, head_block_number: u32, head_block_id: &str) -> Result<()> {
        let id = hex::decode(head_block_id)?;
        if id.len() < 8 {
            return Err(Error::InvalidData(format!(
                "block id {:?} is too short",
                head_block_id
            )));
        }
        let prefix = u32::from_le_bytes([id[4], id[5], id[6], id[7]]);
        self.set_ref_block((head_block_number & 0xffff) as u16, prefix);
        Ok(())
    }

    pub fn get_expiration(&self) -> TimePointSec {
        self.expiration
    }

    pub fn set_expiration(&mut self, expiration: TimePointSec) {
        self.expiration = expiration;
    }

    /// Moves an unset or already-passed expiration to `secs` from now.
    pub fn ensure_expiration(&mut self, secs: u32) {
        let now = TimePointSec::now();
        if self.expiration <= now {
            self.expiration = now + secs;
        }
    }

    pub fn get_extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        to_bytes(self)
    }

    /// SHA-256 over the raw chain id followed by the serialized body.
    pub fn digest(&self, chain: &ChainConfig) -> Result<GrapheneHash> {
        let mut data = chain.chain_id_bytes()?.to_vec();
        self.marshal(&mut Encoder::new(&mut data))?;
        Ok(hash(&data))
    }

    /// Hex of the first 20 bytes of SHA-256 over the serialized body.
    pub fn id(&self) -> Result<String> {
        let digest = hash(&self.to_bytes()?);
        Ok(hex::encode(&digest[..20]))
    }
}

/// A transaction plus its signatures, one per required key, in the JSON
/// shape nodes accept for broadcast.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    transaction: Transaction,
    #[serde(default)]
    signatures: Vec<Signature>,
}

impl SignedTransaction {
    pub fn new() -> SignedTransaction {
        SignedTransaction::from(Transaction::new())
    }

    pub fn get_transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn get_transaction_mut(&mut self) -> &mut Transaction {
        &mut self.transaction
    }

    pub fn add_operation<T: Into<Operation>>(&mut self, op: T) {
        self.transaction.add_operation(op);
    }

    pub fn get_signatures(&self) -> &Vec<Signature> {
        &self.signatures
    }

    pub fn add_signature(&mut self, signature: Signature) {
        self.signatures.push(signature);
    }

    pub fn set_signatures(&mut self, signatures: Vec<Signature>) {
        self.signatures = signatures;
    }

    pub fn clear_signatures(&mut self) {
        self.signatures.clear();
    }

    pub fn digest(&self, chain: &ChainConfig) -> Result<GrapheneHash> {
        self.transaction.digest(chain)
    }

    pub fn id(&self) -> Result<String> {
        self.transaction.id()
    }
}

impl From<Transaction> for SignedTransaction {
    fn from(transaction: Transaction) -> Self {
        SignedTransaction {
            transaction,
            signatures: vec![],
        }
    }
}

impl Marshal for SignedTransaction {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        self.transaction.marshal(enc)?;
        self.signatures
            .marshal(enc)
            .map_err(|e| e.context("encode SignedTransaction.signatures"))
    }
}

impl Unmarshal for SignedTransaction {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        let transaction = Transaction::unmarshal(dec)?;
        let signatures = Vec::<Signature>::unmarshal(dec)
            .map_err(|e| e.context("decode SignedTransaction.signatures"))?;
        Ok(SignedTransaction {
            transaction,
            signatures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::from_bytes;
    use crate::config;
    use crate::operations::LimitOrderCancelOperation;
    use crate::types::{AccountId, AssetAmount, AssetId, LimitOrderId};

    pub fn cancel_transaction() -> Transaction {
        let mut tx = Transaction::default();
        tx.set_ref_block(555, 3333333);
        tx.set_expiration("2006-01-02T15:04:05".parse().unwrap());
        tx.add_operation(LimitOrderCancelOperation {
            fee: AssetAmount::new(1000, AssetId::new(789)),
            fee_paying_account: AccountId::new(456),
            order: LimitOrderId::new(123),
            extensions: vec![],
        });
        tx
    }

    #[test]
    fn empty_transaction_bytes_test() {
        let mut tx = Transaction::default();
        tx.set_ref_block(34294, 3707022213);
        tx.set_expiration("2016-04-06T08:29:27".parse().unwrap());
        assert_eq!(hex::encode(tx.to_bytes().unwrap()), "f68585abf4dce7c80457000000");
        assert_eq!(from_bytes::<Transaction>(&tx.to_bytes().unwrap()).unwrap(), tx);
    }

    #[test]
    fn limit_order_cancel_transaction_bytes_test() {
        let tx = cancel_transaction();
        assert_eq!(
            hex::encode(tx.to_bytes().unwrap()),
            "2b02d5dc3200e540b9430102e8030000000000009506c8037b000000"
        );
    }

    #[test]
    fn reference_block_test() {
        let mut tx = Transaction::default();
        tx.set_reference_block(34294, "000085f685abf4dc000000000000000000000000")
            .unwrap();
        assert_eq!(tx.get_ref_block_num(), 34294);
        assert_eq!(tx.get_ref_block_prefix(), 3707022213);

        tx.set_reference_block(0x0001_85f6, "000185f685abf4dc").unwrap();
        assert_eq!(tx.get_ref_block_num(), 0x85f6);
        assert!(tx.set_reference_block(1, "0001").is_err());
        assert!(tx.set_reference_block(1, "zz").is_err());
    }

    #[test]
    fn digest_test() {
        let chain = config::lookup(config::BITSHARES_CHAIN_ID).unwrap();
        let tx = cancel_transaction();
        let mut data = hex::decode(config::BITSHARES_CHAIN_ID).unwrap();
        data.extend(tx.to_bytes().unwrap());
        assert_eq!(tx.digest(&chain).unwrap(), hash(&data));

        let testnet = config::lookup(config::TESTNET_CHAIN_ID).unwrap();
        assert_ne!(tx.digest(&chain).unwrap(), tx.digest(&testnet).unwrap());
        assert_eq!(tx.id().unwrap().len(), 40);
    }

    #[test]
    fn expiration_test() {
        let mut tx = Transaction::default();
        tx.ensure_expiration(30);
        let now = TimePointSec::now().get_unix();
        let expiration = tx.get_expiration().get_unix();
        assert!(expiration >= now + 29 && expiration <= now + 30);

        let later = TimePointSec::from_unix(now + 3600);
        tx.set_expiration(later);
        tx.ensure_expiration(30);
        assert_eq!(tx.get_expiration(), later);

        assert!(Transaction::new().get_expiration().get_unix() >= now + 29);
    }

    #[test]
    fn signed_transaction_json_test() {
        let mut stx = SignedTransaction::from(cancel_transaction());
        stx.add_signature(Signature([0x1f; 65]));
        let json = serde_json::to_value(&stx).unwrap();
        assert_eq!(json["ref_block_num"], 555);
        assert_eq!(json["expiration"], "2006-01-02T15:04:05");
        assert_eq!(json["operations"][0][0], 2);
        assert_eq!(json["signatures"][0].as_str().unwrap().len(), 130);

        let parsed: SignedTransaction = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, stx);

        let bytes = to_bytes(&stx).unwrap();
        assert_eq!(bytes.len(), 28 + 1 + 65);
        assert_eq!(from_bytes::<SignedTransaction>(&bytes).unwrap(), stx);
    }
}

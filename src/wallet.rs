use crate::config::{self, ChainConfig};
use crate::keybag::KeyBag;
use crate::operations::Operation;
use crate::rpc::{self, RpcCaller};
use crate::settings::{ClientSettings, DEFAULT_EXPIRATION_SECS, DEFAULT_MAX_SIGNING_ATTEMPTS};
use crate::signer::TransactionSigner;
use crate::transaction::SignedTransaction;
use crate::types::{AssetId, PublicKey};
use crate::{Error, Result};

/// The `Wallet` ties a key bag to a live node: it fills in the block
/// reference and fees of a transaction, picks the keys the node says are
/// required, signs, and broadcasts.
pub struct Wallet<C> {
    caller: C,
    keybag: KeyBag,
    chain: ChainConfig,
    expiration_secs: u32,
    max_signing_attempts: u32,
}

impl<C: RpcCaller> Wallet<C> {
    /// Asks the node for its chain id and selects the matching known
    /// network as current.
    pub async fn connect(caller: C, keybag: KeyBag) -> Result<Wallet<C>> {
        let chain_id = rpc::get_chain_id(&caller).await?;
        let chain = config::set_current(&chain_id)?;
        Ok(Wallet {
            caller,
            keybag,
            chain,
            expiration_secs: DEFAULT_EXPIRATION_SECS,
            max_signing_attempts: DEFAULT_MAX_SIGNING_ATTEMPTS,
        })
    }

    pub fn with_settings(mut self, settings: &ClientSettings) -> Self {
        self.expiration_secs = settings.expiration_secs;
        self.max_signing_attempts = settings.max_signing_attempts;
        self
    }

    pub fn get_chain(&self) -> &ChainConfig {
        &self.chain
    }

    pub fn get_caller(&self) -> &C {
        &self.caller
    }

    pub fn get_keybag(&self) -> &KeyBag {
        &self.keybag
    }

    pub fn get_keybag_mut(&mut self) -> &mut KeyBag {
        &mut self.keybag
    }

    /// Points `stx` at the current head block, refreshes its expiration
    /// and sets every operation's fee as the node quotes it in `fee_asset`.
    pub async fn prepare(&self, stx: &mut SignedTransaction, fee_asset: AssetId) -> Result<()> {
        let dgp = rpc::get_dynamic_global_properties(&self.caller).await?;
        let tx = stx.get_transaction_mut();
        tx.set_reference_block(dgp.head_block_number, &dgp.head_block_id)?;
        tx.ensure_expiration(self.expiration_secs);

        let fees = rpc::get_required_fees(&self.caller, tx.get_operations(), fee_asset).await?;
        for (op, fee) in tx.get_operations_mut().iter_mut().zip(fees.iter()) {
            op.apply_fee(fee)?;
        }
        log::debug!(
            "prepared transaction: ref block {} / {}, expiration {}",
            tx.get_ref_block_num(),
            tx.get_ref_block_prefix(),
            tx.get_expiration()
        );
        Ok(())
    }

    /// The keys from the bag whose signatures the node requires for `stx`.
    pub async fn required_keys(&self, stx: &SignedTransaction) -> Result<Vec<PublicKey>> {
        let potential = rpc::get_potential_signatures(&self.caller, stx).await?;
        let available: Vec<PublicKey> = potential
            .into_iter()
            .filter(|key| self.keybag.contains(key))
            .collect();
        if available.is_empty() {
            return Err(Error::NoSigningKeyFound);
        }
        rpc::get_required_signatures(&self.caller, stx, &available).await
    }

    /// Signs `stx` with the required keys. Returns the attempts used.
    pub async fn sign(&self, stx: &mut SignedTransaction) -> Result<u32> {
        stx.clear_signatures();
        let required = self.required_keys(stx).await?;
        let keys = self.keybag.privates_for(&required)?;
        TransactionSigner::new(&self.chain)
            .with_max_attempts(self.max_signing_attempts)
            .sign(stx, &keys)
    }

    pub async fn broadcast(&self, stx: &SignedTransaction) -> Result<()> {
        rpc::broadcast_transaction(&self.caller, stx).await
    }

    /// Builds, prepares, signs and broadcasts a transaction carrying `ops`.
    pub async fn send(&self, ops: Vec<Operation>, fee_asset: AssetId) -> Result<SignedTransaction> {
        let mut stx = SignedTransaction::new();
        for op in ops {
            stx.add_operation(op);
        }
        self.prepare(&mut stx, fee_asset).await?;
        self.sign(&mut stx).await?;
        self.broadcast(&stx).await?;
        Ok(stx)
    }
}

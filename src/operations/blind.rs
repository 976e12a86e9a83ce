use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::types::{AccountId, AssetAmount, BlindFactor, BlindInput, BlindOutput};

/// Moves a public balance into blinded outputs.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct TransferToBlindOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub amount: AssetAmount,
    pub from: AccountId,
    pub blinding_factor: BlindFactor,
    pub outputs: Vec<BlindOutput>,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct BlindTransferOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub inputs: Vec<BlindInput>,
    pub outputs: Vec<BlindOutput>,
}

/// Moves blinded inputs back into a public balance.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct TransferFromBlindOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub amount: AssetAmount,
    pub to: AccountId,
    pub blinding_factor: BlindFactor,
    pub inputs: Vec<BlindInput>,
}

use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::types::{Authority, Buffer, FixedBytes, PublicKey};

/// Pedersen commitment, 33 bytes.
pub type Commitment = FixedBytes<33>;
pub type BlindFactor = FixedBytes<32>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct BlindInput {
    pub commitment: Commitment,
    pub owner: Authority,
}

/// Lets the recipient of a blinded output find and decrypt it.
#[derive(Clone, Debug, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct StealthConfirmation {
    pub one_time_key: PublicKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<PublicKey>,
    pub encrypted_memo: Buffer,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Marshal, Serialize, Deserialize)]
pub struct BlindOutput {
    pub commitment: Commitment,
    /// Only required when there is more than one output.
    pub range_proof: Buffer,
    pub owner: Authority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stealth_memo: Option<StealthConfirmation>,
}

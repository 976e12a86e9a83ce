use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::types::{
    AccountId, AssetAmount, ChainParameters, CommitteeMemberId, PublicKey, WitnessId,
};

#[derive(Clone, Debug, PartialEq, Marshal, Serialize, Deserialize)]
pub struct WitnessCreateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub witness_account: AccountId,
    pub url: String,
    pub block_signing_key: PublicKey,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct WitnessUpdateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub witness: WitnessId,
    pub witness_account: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_signing_key: Option<PublicKey>,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct CommitteeMemberCreateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub committee_member_account: AccountId,
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct CommitteeMemberUpdateOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub committee_member: CommitteeMemberId,
    pub committee_member_account: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_url: Option<String>,
}

/// Only valid inside a committee proposal.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct CommitteeMemberUpdateGlobalParametersOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub new_parameters: ChainParameters,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_bytes, to_bytes};
    use crate::keypair::PrivateKey;
    use crate::operations::{Operation, OperationType};
    use crate::types::{FeeEntry, FeeParameters, FeeSchedule};

    #[test]
    fn witness_create_test() {
        let key = PrivateKey::generate().public_key();
        let op = WitnessCreateOperation {
            fee: AssetAmount::default(),
            witness_account: AccountId::new(8),
            url: String::from("https://w"),
            block_signing_key: key,
        };
        let bytes = to_bytes(&op).unwrap();
        assert_eq!(bytes.len(), 9 + 1 + 10 + 33);
        assert_eq!(&bytes[20..], &key.serialize()[..]);
        assert_eq!(from_bytes::<WitnessCreateOperation>(&bytes).unwrap(), op);
    }

    #[test]
    fn witness_update_test() {
        let op = WitnessUpdateOperation {
            witness: WitnessId::new(2),
            witness_account: AccountId::new(8),
            new_url: Some(String::from("u")),
            ..Default::default()
        };
        assert_eq!(&to_bytes(&op).unwrap()[9..], &[2, 8, 1, 1, b'u', 0]);
    }

    #[test]
    fn global_parameters_test() {
        let mut fees = FeeSchedule {
            parameters: vec![],
            scale: 10000,
        };
        fees.set_parameters(
            FeeEntry::new(
                OperationType::LimitOrderCancel,
                FeeParameters::default_for(OperationType::LimitOrderCancel),
            )
            .unwrap(),
        );
        let op = Operation::from(CommitteeMemberUpdateGlobalParametersOperation {
            fee: AssetAmount::default(),
            new_parameters: ChainParameters {
                current_fees: fees,
                block_interval: 3,
                ..Default::default()
            },
        });
        let bytes = to_bytes(&op).unwrap();
        assert_eq!(bytes[0], 31);
        assert_eq!(&bytes[10..12], &[1, 2]);
        assert_eq!(from_bytes::<Operation>(&bytes).unwrap(), op);
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(Operation::from_json(json).unwrap(), op);
    }
}

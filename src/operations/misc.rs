use std::collections::BTreeSet;

use macros::Marshal;
use serde::{Deserialize, Serialize};

use crate::types::{
    number_or_string, AccountId, AssetAmount, BalanceId, Buffer, Extensions, FbaAccumulatorId,
    Predicate, PublicKey,
};

/// Arbitrary application data; the chain only checks the fee and auths.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct CustomOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub payer: AccountId,
    pub required_auths: BTreeSet<AccountId>,
    pub id: u16,
    pub data: Buffer,
}

/// Fails the whole transaction unless every predicate holds.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct AssertOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub fee_paying_account: AccountId,
    pub predicates: Vec<Predicate>,
    pub required_auths: BTreeSet<AccountId>,
    #[serde(default)]
    pub extensions: Extensions,
}

/// Claims a genesis balance owned by `balance_owner_key`.
#[derive(Clone, Debug, PartialEq, Marshal, Serialize, Deserialize)]
pub struct BalanceClaimOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub deposit_to_account: AccountId,
    pub balance_to_claim: BalanceId,
    pub balance_owner_key: PublicKey,
    pub total_claimed: AssetAmount,
}

/// Virtual operation paying out a fee-backed-asset accumulator.
#[derive(Clone, Debug, Default, PartialEq, Marshal, Serialize, Deserialize)]
pub struct FbaDistributeOperation {
    #[serde(default)]
    pub fee: AssetAmount,
    pub account_id: AccountId,
    pub fba_id: FbaAccumulatorId,
    #[serde(deserialize_with = "number_or_string")]
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_bytes, to_bytes};
    use crate::keypair::PrivateKey;
    use crate::operations::Operation;
    use crate::types::{AccountNameEqLitPredicate, AssetId};

    #[test]
    fn custom_test() {
        let op = CustomOperation {
            payer: AccountId::new(5),
            required_auths: [AccountId::new(5)].iter().cloned().collect(),
            id: 0x0102,
            data: Buffer(vec![0xaa]),
            ..Default::default()
        };
        assert_eq!(&to_bytes(&op).unwrap()[9..], &[5, 1, 5, 2, 1, 1, 0xaa]);
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["data"], "aa");
    }

    #[test]
    fn assert_test() {
        let op = Operation::from(AssertOperation {
            fee_paying_account: AccountId::new(5),
            predicates: vec![Predicate::from(AccountNameEqLitPredicate {
                account_id: AccountId::new(5),
                name: String::from("bob"),
            })],
            ..Default::default()
        });
        let bytes = to_bytes(&op).unwrap();
        assert_eq!(&bytes[10..], &[5, 1, 0, 5, 3, b'b', b'o', b'b', 0, 0]);
        assert_eq!(from_bytes::<Operation>(&bytes).unwrap(), op);
    }

    #[test]
    fn balance_claim_test() {
        let key = PrivateKey::generate().public_key();
        let op = BalanceClaimOperation {
            fee: AssetAmount::default(),
            deposit_to_account: AccountId::new(1),
            balance_to_claim: BalanceId::new(2),
            balance_owner_key: key,
            total_claimed: AssetAmount::new(3, AssetId::new(0)),
        };
        let bytes = to_bytes(&op).unwrap();
        assert_eq!(bytes.len(), 9 + 1 + 1 + 33 + 9);
        assert_eq!(from_bytes::<BalanceClaimOperation>(&bytes).unwrap(), op);
    }

    #[test]
    fn fba_distribute_test() {
        let op = FbaDistributeOperation {
            account_id: AccountId::new(1),
            fba_id: "2.16.2".parse().unwrap(),
            amount: 9,
            ..Default::default()
        };
        assert_eq!(
            &to_bytes(&op).unwrap()[9..],
            &[1, 2, 9, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(serde_json::to_value(&op).unwrap()["fba_id"], "2.16.2");
    }
}

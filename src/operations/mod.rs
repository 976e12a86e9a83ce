/*!
# Operations

The closed set of protocol operations. On the wire an operation is its
uvarint tag followed by its fields; in JSON it is `[tag, {fields}]`. Every
operation starts with the fee it pays.

Tags are fixed by the protocol and never reused. Decoding an unknown tag, in
either form, fails with `Error::UnsupportedOperation`.
*/
use std::io::{Read, Write};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::codec::{Decoder, Encoder, Marshal, Unmarshal};
use crate::types::AssetAmount;
use crate::{Error, Result};

pub mod account;
pub mod asset;
pub mod blind;
pub mod misc;
pub mod order;
pub mod proposal;
pub mod transfer;
pub mod vesting;
pub mod withdraw;
pub mod witness;

pub use account::*;
pub use asset::*;
pub use blind::*;
pub use misc::*;
pub use order::*;
pub use proposal::*;
pub use transfer::*;
pub use vesting::*;
pub use withdraw::*;
pub use witness::*;

macro_rules! operations {
    ($($tag:literal => $variant:ident($op:ident) $name:literal,)+) => {
        /// The protocol tag of each operation.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum OperationType {
            $($variant = $tag,)+
        }

        impl OperationType {
            pub fn from_tag(tag: u64) -> Result<OperationType> {
                match tag {
                    $($tag => Ok(OperationType::$variant),)+
                    other => Err(Error::UnsupportedOperation(other)),
                }
            }

            /// The protocol's snake_case name, e.g. `limit_order_cancel`.
            pub fn name(&self) -> &'static str {
                match self {
                    $(OperationType::$variant => $name,)+
                }
            }

            pub fn all() -> &'static [OperationType] {
                &[$(OperationType::$variant,)+]
            }
        }

        #[derive(Clone, Debug, PartialEq)]
        pub enum Operation {
            $($variant($op),)+
        }

        impl Operation {
            pub fn op_type(&self) -> OperationType {
                match self {
                    $(Operation::$variant(_) => OperationType::$variant,)+
                }
            }

            pub fn get_fee(&self) -> &AssetAmount {
                match self {
                    $(Operation::$variant(op) => &op.fee,)+
                }
            }

            pub fn set_fee(&mut self, fee: AssetAmount) {
                match self {
                    $(Operation::$variant(op) => op.fee = fee,)+
                }
            }

            fn marshal_payload<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
                match self {
                    $(Operation::$variant(op) => op.marshal(enc),)+
                }
            }

            fn unmarshal_payload<R: Read>(
                op_type: OperationType,
                dec: &mut Decoder<R>,
            ) -> Result<Operation> {
                match op_type {
                    $(OperationType::$variant => Ok(Operation::$variant($op::unmarshal(dec)?)),)+
                }
            }

            fn payload_to_json(&self) -> serde_json::Result<Value> {
                match self {
                    $(Operation::$variant(op) => serde_json::to_value(op),)+
                }
            }

            fn payload_from_json(op_type: OperationType, payload: Value) -> Result<Operation> {
                match op_type {
                    $(OperationType::$variant => {
                        Ok(Operation::$variant(serde_json::from_value(payload)?))
                    })+
                }
            }
        }

        $(
            impl From<$op> for Operation {
                fn from(op: $op) -> Self {
                    Operation::$variant(op)
                }
            }
        )+
    };
}

operations! {
    0 => Transfer(TransferOperation) "transfer",
    1 => LimitOrderCreate(LimitOrderCreateOperation) "limit_order_create",
    2 => LimitOrderCancel(LimitOrderCancelOperation) "limit_order_cancel",
    3 => CallOrderUpdate(CallOrderUpdateOperation) "call_order_update",
    4 => FillOrder(FillOrderOperation) "fill_order",
    5 => AccountCreate(AccountCreateOperation) "account_create",
    6 => AccountUpdate(AccountUpdateOperation) "account_update",
    7 => AccountWhitelist(AccountWhitelistOperation) "account_whitelist",
    8 => AccountUpgrade(AccountUpgradeOperation) "account_upgrade",
    9 => AccountTransfer(AccountTransferOperation) "account_transfer",
    10 => AssetCreate(AssetCreateOperation) "asset_create",
    11 => AssetUpdate(AssetUpdateOperation) "asset_update",
    12 => AssetUpdateBitasset(AssetUpdateBitassetOperation) "asset_update_bitasset",
    13 => AssetUpdateFeedProducers(AssetUpdateFeedProducersOperation) "asset_update_feed_producers",
    14 => AssetIssue(AssetIssueOperation) "asset_issue",
    15 => AssetReserve(AssetReserveOperation) "asset_reserve",
    16 => AssetFundFeePool(AssetFundFeePoolOperation) "asset_fund_fee_pool",
    17 => AssetSettle(AssetSettleOperation) "asset_settle",
    18 => AssetGlobalSettle(AssetGlobalSettleOperation) "asset_global_settle",
    19 => AssetPublishFeed(AssetPublishFeedOperation) "asset_publish_feed",
    20 => WitnessCreate(WitnessCreateOperation) "witness_create",
    21 => WitnessUpdate(WitnessUpdateOperation) "witness_update",
    22 => ProposalCreate(ProposalCreateOperation) "proposal_create",
    23 => ProposalUpdate(ProposalUpdateOperation) "proposal_update",
    24 => ProposalDelete(ProposalDeleteOperation) "proposal_delete",
    25 => WithdrawPermissionCreate(WithdrawPermissionCreateOperation) "withdraw_permission_create",
    26 => WithdrawPermissionUpdate(WithdrawPermissionUpdateOperation) "withdraw_permission_update",
    27 => WithdrawPermissionClaim(WithdrawPermissionClaimOperation) "withdraw_permission_claim",
    28 => WithdrawPermissionDelete(WithdrawPermissionDeleteOperation) "withdraw_permission_delete",
    29 => CommitteeMemberCreate(CommitteeMemberCreateOperation) "committee_member_create",
    30 => CommitteeMemberUpdate(CommitteeMemberUpdateOperation) "committee_member_update",
    31 => CommitteeMemberUpdateGlobalParameters(CommitteeMemberUpdateGlobalParametersOperation) "committee_member_update_global_parameters",
    32 => VestingBalanceCreate(VestingBalanceCreateOperation) "vesting_balance_create",
    33 => VestingBalanceWithdraw(VestingBalanceWithdrawOperation) "vesting_balance_withdraw",
    34 => WorkerCreate(WorkerCreateOperation) "worker_create",
    35 => Custom(CustomOperation) "custom",
    36 => Assert(AssertOperation) "assert",
    37 => BalanceClaim(BalanceClaimOperation) "balance_claim",
    38 => OverrideTransfer(OverrideTransferOperation) "override_transfer",
    39 => TransferToBlind(TransferToBlindOperation) "transfer_to_blind",
    40 => BlindTransfer(BlindTransferOperation) "blind_transfer",
    41 => TransferFromBlind(TransferFromBlindOperation) "transfer_from_blind",
    42 => AssetSettleCancel(AssetSettleCancelOperation) "asset_settle_cancel",
    43 => AssetClaimFees(AssetClaimFeesOperation) "asset_claim_fees",
    44 => FbaDistribute(FbaDistributeOperation) "fba_distribute",
    45 => BidCollateral(BidCollateralOperation) "bid_collateral",
    46 => ExecuteBid(ExecuteBidOperation) "execute_bid",
    47 => AssetClaimPool(AssetClaimPoolOperation) "asset_claim_pool",
    48 => AssetUpdateIssuer(AssetUpdateIssuerOperation) "asset_update_issuer",
}

impl OperationType {
    /// Virtual operations are produced by the chain itself and never signed
    /// by a user.
    pub fn is_virtual(&self) -> bool {
        matches!(
            self,
            OperationType::FillOrder
                | OperationType::AssetSettleCancel
                | OperationType::FbaDistribute
                | OperationType::ExecuteBid
        )
    }
}

impl Operation {
    /// Parses the `[tag, {fields}]` form, failing with
    /// `UnsupportedOperation` for tags outside the protocol.
    pub fn from_json(value: Value) -> Result<Operation> {
        let (tag, payload): (u64, Value) = serde_json::from_value(value)?;
        let op_type = OperationType::from_tag(tag)?;
        Operation::payload_from_json(op_type, payload)
            .map_err(|e| e.context(format!("decode {} operation", op_type.name())))
    }

    /// Applies one entry of a `get_required_fees` answer.
    ///
    /// The entry is either an asset amount, or for `proposal_create` the
    /// nested `[fee, [fee of each proposed operation]]` form.
    pub fn apply_fee(&mut self, fee: &Value) -> Result<()> {
        match fee {
            Value::Array(parts) => {
                let (own, inner) = match parts.as_slice() {
                    [own, Value::Array(inner)] => (own, inner),
                    _ => {
                        return Err(Error::InvalidData(format!(
                            "unexpected fee shape {}",
                            fee
                        )))
                    }
                };
                self.set_fee(serde_json::from_value(own.clone())?);
                match self {
                    Operation::ProposalCreate(proposal) => {
                        if inner.len() != proposal.proposed_ops.len() {
                            return Err(Error::InvalidData(format!(
                                "{} fees for {} proposed operations",
                                inner.len(),
                                proposal.proposed_ops.len()
                            )));
                        }
                        for (wrapper, inner_fee) in proposal.proposed_ops.iter_mut().zip(inner) {
                            wrapper.op.apply_fee(inner_fee)?;
                        }
                        Ok(())
                    }
                    other => Err(Error::InvalidData(format!(
                        "nested fee for {} operation",
                        other.op_type().name()
                    ))),
                }
            }
            _ => {
                self.set_fee(serde_json::from_value(fee.clone())?);
                Ok(())
            }
        }
    }
}

impl Marshal for Operation {
    fn marshal<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        let op_type = self.op_type();
        enc.encode_uvarint(op_type as u64)?;
        self.marshal_payload(enc)
            .map_err(|e| e.context(format!("encode {} operation", op_type.name())))
    }
}

impl Unmarshal for Operation {
    fn unmarshal<R: Read>(dec: &mut Decoder<R>) -> Result<Self> {
        let op_type = OperationType::from_tag(dec.decode_uvarint()?)?;
        Operation::unmarshal_payload(op_type, dec)
            .map_err(|e| e.context(format!("decode {} operation", op_type.name())))
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let payload = self
            .payload_to_json()
            .map_err(serde::ser::Error::custom)?;
        (self.op_type() as u64, payload).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Operation::from_json(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_bytes, to_bytes};
    use crate::types::{AccountId, AssetId, LimitOrderId};
    use serde_json::json;

    fn cancel() -> Operation {
        Operation::from(LimitOrderCancelOperation {
            fee: AssetAmount::new(1000, AssetId::new(789)),
            fee_paying_account: AccountId::new(456),
            order: LimitOrderId::new(123),
            extensions: vec![],
        })
    }

    #[test]
    fn operation_tags_test() {
        assert_eq!(OperationType::all().len(), 49);
        for (i, op_type) in OperationType::all().iter().enumerate() {
            assert_eq!(*op_type as usize, i);
            assert_eq!(OperationType::from_tag(i as u64).unwrap(), *op_type);
        }
        assert_eq!(OperationType::AssetUpdateIssuer.name(), "asset_update_issuer");
        assert!(OperationType::ExecuteBid.is_virtual());
        assert!(!OperationType::Transfer.is_virtual());
    }

    #[test]
    fn limit_order_cancel_bytes_test() {
        let op = cancel();
        assert_eq!(op.op_type(), OperationType::LimitOrderCancel);
        let bytes = to_bytes(&op).unwrap();
        assert_eq!(hex::encode(&bytes), "02e8030000000000009506c8037b00");
        assert_eq!(from_bytes::<Operation>(&bytes).unwrap(), op);
    }

    #[test]
    fn unknown_tag_test() {
        assert!(matches!(
            from_bytes::<Operation>(&[49]),
            Err(Error::UnsupportedOperation(49))
        ));
        assert!(matches!(
            Operation::from_json(json!([77, {}])),
            Err(Error::UnsupportedOperation(77))
        ));
        let err = serde_json::from_value::<Operation>(json!([77, {}])).unwrap_err();
        assert!(err.to_string().contains("unsupported operation type 77"));
    }

    #[test]
    fn operation_json_test() {
        let op = cancel();
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(
            value,
            json!([2, {
                "fee": {"amount": 1000, "asset_id": "1.3.789"},
                "fee_paying_account": "1.2.456",
                "order": "1.7.123",
                "extensions": []
            }])
        );
        assert_eq!(Operation::from_json(value).unwrap(), op);

        // nodes omit the fee before it is set
        let unfunded = Operation::from_json(json!([2, {
            "fee_paying_account": "1.2.456",
            "order": "1.7.123",
            "extensions": []
        }]))
        .unwrap();
        assert_eq!(unfunded.get_fee().amount, 0);
    }

    #[test]
    fn decode_error_breadcrumb_test() {
        let err = from_bytes::<Operation>(&[2, 0xe8, 0x03]).unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("decode limit_order_cancel operation"));
        assert!(text.contains("LimitOrderCancelOperation.fee"));
    }

    #[test]
    fn apply_plain_fee_test() {
        let mut op = cancel();
        op.apply_fee(&json!({"amount": "250", "asset_id": "1.3.0"}))
            .unwrap();
        assert_eq!(op.get_fee(), &AssetAmount::new(250, AssetId::new(0)));
        assert!(op
            .apply_fee(&json!([{"amount": 1, "asset_id": "1.3.0"}, []]))
            .is_err());
    }

    #[test]
    fn apply_nested_fee_test() {
        let mut proposal = Operation::from(ProposalCreateOperation {
            proposed_ops: vec![OpWrapper { op: cancel() }, OpWrapper { op: cancel() }],
            ..Default::default()
        });
        proposal
            .apply_fee(&json!([
                {"amount": 30, "asset_id": "1.3.0"},
                [{"amount": 10, "asset_id": "1.3.0"}, {"amount": 20, "asset_id": "1.3.0"}]
            ]))
            .unwrap();
        assert_eq!(proposal.get_fee().amount, 30);
        match &proposal {
            Operation::ProposalCreate(p) => {
                assert_eq!(p.proposed_ops[0].op.get_fee().amount, 10);
                assert_eq!(p.proposed_ops[1].op.get_fee().amount, 20);
            }
            _ => unreachable!(),
        }

        assert!(proposal
            .apply_fee(&json!([{"amount": 30, "asset_id": "1.3.0"}, []]))
            .is_err());
    }
}

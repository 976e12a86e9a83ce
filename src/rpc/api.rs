//! Typed wrappers for the node calls the client needs.
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::RpcCaller;
use crate::operations::Operation;
use crate::transaction::SignedTransaction;
use crate::types::{number_or_string, AssetId, GrapheneId, PublicKey, TimePointSec, WitnessId};
use crate::{Error, Result, ResultExt};

pub const DATABASE_API_ID: u64 = 0;
pub const LOGIN_API_ID: u64 = 1;

/// Object 2.1.0: the head of the chain as the node currently sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DynamicGlobalProperties {
    pub id: GrapheneId,
    pub head_block_number: u32,
    pub head_block_id: String,
    pub time: TimePointSec,
    pub current_witness: WitnessId,
    #[serde(default)]
    pub next_maintenance_time: TimePointSec,
    #[serde(default)]
    pub last_budget_time: TimePointSec,
    #[serde(default, deserialize_with = "number_or_string")]
    pub witness_budget: i64,
    #[serde(default)]
    pub accounts_registered_this_interval: u32,
    #[serde(default)]
    pub recently_missed_count: u32,
    #[serde(default)]
    pub current_aslot: u64,
    #[serde(default)]
    pub recent_slots_filled: String,
    #[serde(default)]
    pub dynamic_flags: u32,
    #[serde(default)]
    pub last_irreversible_block_num: u32,
}

async fn call_as<C, T>(caller: &C, api_id: u64, method: &str, args: Vec<Value>) -> Result<T>
where
    C: RpcCaller + ?Sized,
    T: serde::de::DeserializeOwned,
{
    let result = caller.call(api_id, method, args).await.context(method)?;
    serde_json::from_value(result).context(format!("{} result", method))
}

pub async fn get_chain_id<C: RpcCaller + ?Sized>(caller: &C) -> Result<String> {
    call_as(caller, DATABASE_API_ID, "get_chain_id", vec![]).await
}

pub async fn get_dynamic_global_properties<C: RpcCaller + ?Sized>(
    caller: &C,
) -> Result<DynamicGlobalProperties> {
    call_as(caller, DATABASE_API_ID, "get_dynamic_global_properties", vec![]).await
}

/// Fee entries for `operations`, in order, paid in `fee_asset`. Each entry
/// is what [`Operation::apply_fee`] expects.
pub async fn get_required_fees<C: RpcCaller + ?Sized>(
    caller: &C,
    operations: &[Operation],
    fee_asset: AssetId,
) -> Result<Vec<Value>> {
    let fees: Vec<Value> = call_as(
        caller,
        DATABASE_API_ID,
        "get_required_fees",
        vec![serde_json::to_value(operations)?, json!(fee_asset)],
    )
    .await?;
    if fees.len() != operations.len() {
        return Err(Error::InvalidData(format!(
            "{} fees returned for {} operations",
            fees.len(),
            operations.len()
        )));
    }
    Ok(fees)
}

/// Every key that could possibly take part in authorizing `tx`.
pub async fn get_potential_signatures<C: RpcCaller + ?Sized>(
    caller: &C,
    tx: &SignedTransaction,
) -> Result<Vec<PublicKey>> {
    call_as(
        caller,
        DATABASE_API_ID,
        "get_potential_signatures",
        vec![serde_json::to_value(tx)?],
    )
    .await
}

/// The subset of `available` keys whose signatures `tx` needs.
pub async fn get_required_signatures<C: RpcCaller + ?Sized>(
    caller: &C,
    tx: &SignedTransaction,
    available: &[PublicKey],
) -> Result<Vec<PublicKey>> {
    call_as(
        caller,
        DATABASE_API_ID,
        "get_required_signatures",
        vec![serde_json::to_value(tx)?, serde_json::to_value(available)?],
    )
    .await
}

/// Resolves the numeric id of the network_broadcast API through login.
pub async fn get_network_broadcast_api_id<C: RpcCaller + ?Sized>(caller: &C) -> Result<u64> {
    call_as(caller, LOGIN_API_ID, "network_broadcast", vec![]).await
}

pub async fn broadcast_transaction<C: RpcCaller + ?Sized>(
    caller: &C,
    tx: &SignedTransaction,
) -> Result<()> {
    let api_id = get_network_broadcast_api_id(caller).await?;
    caller
        .call(api_id, "broadcast_transaction", vec![serde_json::to_value(tx)?])
        .await
        .context("broadcast_transaction")?;
    log::info!("broadcast transaction {}", tx.id()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair::PrivateKey;
    use crate::operations::TransferOperation;
    use crate::test_utilities::mocks::{MockCaller, MOCK_HEAD_BLOCK_ID, MOCK_HEAD_BLOCK_NUMBER};
    use crate::types::{AccountId, AssetAmount};

    #[tokio::test]
    async fn dynamic_global_properties_test() {
        let caller = MockCaller::bitshares();
        let dgp = get_dynamic_global_properties(&caller).await.unwrap();
        assert_eq!(dgp.head_block_number, MOCK_HEAD_BLOCK_NUMBER);
        assert_eq!(dgp.head_block_id, MOCK_HEAD_BLOCK_ID);
        assert_eq!(dgp.current_witness, WitnessId::new(12));
        assert_eq!(dgp.time.get_unix(), 1459931367);
        let calls = caller.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, DATABASE_API_ID);
        assert_eq!(calls[0].1, "get_dynamic_global_properties");
        assert!(calls[0].2.is_empty());
    }

    #[tokio::test]
    async fn required_fees_test() {
        let caller = MockCaller::new().with_response(
            "get_required_fees",
            json!([{"amount": "2000", "asset_id": "1.3.0"}]),
        );
        let ops = vec![Operation::from(TransferOperation::new(
            AccountId::new(1),
            AccountId::new(2),
            AssetAmount::new(5, AssetId::new(0)),
        ))];
        let fees = get_required_fees(&caller, &ops, AssetId::new(0)).await.unwrap();
        assert_eq!(fees.len(), 1);

        let (api_id, args) = caller.get_calls_to("get_required_fees").remove(0);
        assert_eq!(api_id, DATABASE_API_ID);
        assert_eq!(args[0][0][0], 0);
        assert_eq!(args[1], "1.3.0");

        let two = vec![ops[0].clone(), ops[0].clone()];
        assert!(get_required_fees(&caller, &two, AssetId::new(0)).await.is_err());
    }

    #[tokio::test]
    async fn signatures_test() {
        let key = PrivateKey::generate().public_key();
        let caller = MockCaller::new()
            .with_response("get_potential_signatures", json!([key]))
            .with_response("get_required_signatures", json!([key]));
        let tx = SignedTransaction::default();
        assert_eq!(get_potential_signatures(&caller, &tx).await.unwrap(), vec![key]);
        assert_eq!(
            get_required_signatures(&caller, &tx, &[key]).await.unwrap(),
            vec![key]
        );
        let (_, args) = caller.get_calls_to("get_required_signatures").remove(0);
        assert_eq!(args[1], json!([key]));
    }

    #[tokio::test]
    async fn broadcast_uses_resolved_api_id_test() {
        let caller = MockCaller::bitshares();
        broadcast_transaction(&caller, &SignedTransaction::default())
            .await
            .unwrap();
        let calls = caller.get_calls();
        assert_eq!(calls[0].0, LOGIN_API_ID);
        assert_eq!(calls[0].1, "network_broadcast");
        assert_eq!(calls[1].0, 2);
        assert_eq!(calls[1].1, "broadcast_transaction");
    }

    #[tokio::test]
    async fn rpc_error_keeps_method_context_test() {
        let caller = MockCaller::new().with_error("get_chain_id", 1, "boom");
        let err = get_chain_id(&caller).await.unwrap_err();
        assert_eq!(err.to_string(), "get_chain_id: rpc error 1: boom");
        assert!(matches!(err.root(), Error::Rpc { code: 1, .. }));
    }
}

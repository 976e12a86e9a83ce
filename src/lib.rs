/*!
# Graphene Rust

A client library for Graphene-family blockchains (BitShares and its
descendants).

Graphene consensus nodes hash and verify the exact byte sequence produced by
their C++ serializer. This crate reproduces that wire format for every
protocol operation, builds and signs transactions with canonical
recoverable secp256k1 signatures, and talks to nodes over JSON-RPC
(WebSocket or HTTP) to fetch the block reference, fees and required keys a
transaction needs before it can be broadcast.

# Layout

- `codec`: canonical binary encoder/decoder and the `Marshal` traits
- `types`: ids, amounts, prices, authorities, keys, memos, extensions
- `operations`: the tagged operation union
- `transaction`: the transaction envelope and its signing digest
- `signer`: canonical signing and signature verification
- `keypair`, `keybag`: private keys, WIF import
- `config`, `settings`: known networks and client settings
- `rpc`: `RpcCaller` plus WebSocket and HTTP clients
- `wallet`: prepare, sign and broadcast against a live node

# Usage

```no_run
use graphene_rust::{config, operations::LimitOrderCancelOperation, transaction::SignedTransaction};

let chain = config::lookup_by_name("BitShares").unwrap();
let mut tx = SignedTransaction::default();
tx.add_operation(LimitOrderCancelOperation::default());
println!("{}", hex::encode(tx.get_transaction().to_bytes().unwrap()));
println!("{}", hex::encode(tx.get_transaction().digest(&chain).unwrap()));
```
*/
#[macro_use]
extern crate lazy_static;

pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod keybag;
pub mod keypair;
pub mod operations;
pub mod rpc;
pub mod settings;
pub mod signer;
pub mod transaction;
pub mod types;
pub mod wallet;

mod test_setup;
#[cfg(test)]
pub mod test_utilities;

pub use error::{Error, Result, ResultExt};

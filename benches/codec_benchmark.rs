use criterion::{black_box, criterion_group, criterion_main, Criterion};
use graphene_rust::{
    codec::{from_bytes, to_bytes},
    config,
    keypair::PrivateKey,
    operations::{LimitOrderCancelOperation, TransferOperation},
    signer::TransactionSigner,
    transaction::{SignedTransaction, Transaction},
    types::{AccountId, AssetAmount, AssetId, LimitOrderId, TimePointSec},
};

fn make_transaction(ops: usize) -> Transaction {
    let mut tx = Transaction::default();
    tx.set_ref_block(34294, 3707022213);
    tx.set_expiration(TimePointSec::from_unix(1459931367));
    for i in 0..ops as u64 {
        tx.add_operation(TransferOperation::new(
            AccountId::new(i),
            AccountId::new(i + 1),
            AssetAmount::new(1000, AssetId::new(0)),
        ));
        tx.add_operation(LimitOrderCancelOperation {
            fee: AssetAmount::new(1000, AssetId::new(0)),
            fee_paying_account: AccountId::new(i),
            order: LimitOrderId::new(i),
            extensions: vec![],
        });
    }
    tx
}

fn bench_transaction_encode(c: &mut Criterion) {
    let tx = make_transaction(50);
    c.bench_function("transaction encode", |b| {
        b.iter(|| to_bytes(black_box(&tx)).unwrap())
    });
}

fn bench_transaction_decode(c: &mut Criterion) {
    let bytes = to_bytes(&make_transaction(50)).unwrap();
    c.bench_function("transaction decode", |b| {
        b.iter(|| from_bytes::<Transaction>(black_box(&bytes)).unwrap())
    });
}

fn bench_transaction_json(c: &mut Criterion) {
    let json = serde_json::to_string(&make_transaction(50)).unwrap();
    c.bench_function("transaction json parse", |b| {
        b.iter(|| serde_json::from_str::<Transaction>(black_box(&json)).unwrap())
    });
}

fn bench_transaction_sign(c: &mut Criterion) {
    let chain = config::lookup(config::BITSHARES_CHAIN_ID).unwrap();
    let signer = TransactionSigner::new(&chain);
    let key = PrivateKey::generate();
    let tx = make_transaction(1);
    c.bench_function("transaction sign", |b| {
        b.iter(|| {
            let mut stx = SignedTransaction::from(tx.clone());
            signer.sign(&mut stx, std::slice::from_ref(&key)).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_transaction_encode,
    bench_transaction_decode,
    bench_transaction_json,
    bench_transaction_sign
);
criterion_main!(benches);

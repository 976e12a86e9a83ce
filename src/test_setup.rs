#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    // RUST_LOG=graphene_rust=debug shows codec, signer and rpc traces
    let _ = env_logger::builder().is_test(true).try_init();
}

/*!
# Graphene Command Line Interface

Key inspection, offline transaction serialization and signing, and node
queries for Graphene chains.

## Usage

```bash
graphenecli help [subcommand]
```

## Available subcommands

**keys**

prints the public keys and addresses of a key file, or of a WIF typed at
the prompt

**serialize**

prints the wire bytes, id and signing digest of a JSON transaction

**sign**

signs a JSON transaction offline with every key of a key file

**chain-id**

asks a node for its chain id and names the matching network

**send**

prepares, signs and broadcasts a JSON transaction through a node

## Example

```bash
graphenecli --config graphene.toml sign --tx tx.json --keyfile keys.txt --chain BitShares
```
*/
use std::fs;
use std::io::Write;

use clap::{App, Arg, ArgMatches};
use graphene_rust::{
    config::{self, ChainConfig},
    keybag::KeyBag,
    keypair::PrivateKey,
    rpc,
    settings::ClientSettings,
    signer::TransactionSigner,
    transaction::SignedTransaction,
    types::AssetId,
    wallet::Wallet,
    Error, ResultExt,
};

fn keyfile_arg() -> Arg<'static, 'static> {
    Arg::with_name("keyfile")
        .short("k")
        .long("keyfile")
        .takes_value(true)
        .help("path to a file with one WIF key per line")
}

fn tx_arg() -> Arg<'static, 'static> {
    Arg::with_name("tx")
        .short("t")
        .long("tx")
        .required(true)
        .takes_value(true)
        .help("path to a JSON transaction")
}

fn chain_arg() -> Arg<'static, 'static> {
    Arg::with_name("chain")
        .short("c")
        .long("chain")
        .takes_value(true)
        .help("network name or prefix, e.g. BitShares or TEST")
}

fn node_arg() -> Arg<'static, 'static> {
    Arg::with_name("node")
        .short("n")
        .long("node")
        .takes_value(true)
        .help("node url (ws://, wss://, http:// or https://)")
}

#[tokio::main]
pub async fn main() -> graphene_rust::Result<()> {
    tracing_subscriber::fmt::init();

    let command_matches = App::new("Graphene Command Line Interface")
        .about("Inspect keys, serialize and sign transactions, and talk to Graphene nodes")
        .arg(
            Arg::with_name("config")
                .long("config")
                .takes_value(true)
                .help("settings file (defaults, then this file, then GRAPHENE_* env)"),
        )
        .subcommand(
            App::new("keys")
                .about("prints public keys and addresses")
                .arg(keyfile_arg())
                .arg(chain_arg()),
        )
        .subcommand(
            App::new("serialize")
                .about("prints the bytes, id and digest of a transaction")
                .arg(tx_arg())
                .arg(chain_arg()),
        )
        .subcommand(
            App::new("sign")
                .about("signs a transaction offline")
                .arg(tx_arg())
                .arg(keyfile_arg().required(true))
                .arg(chain_arg())
                .arg(
                    Arg::with_name("out")
                        .short("o")
                        .long("out")
                        .takes_value(true)
                        .help("write the signed transaction here instead of stdout"),
                ),
        )
        .subcommand(
            App::new("chain-id")
                .about("queries a node for its chain id")
                .arg(node_arg()),
        )
        .subcommand(
            App::new("send")
                .about("prepares, signs and broadcasts a transaction")
                .arg(tx_arg())
                .arg(keyfile_arg())
                .arg(node_arg())
                .arg(
                    Arg::with_name("fee-asset")
                        .long("fee-asset")
                        .takes_value(true)
                        .default_value("1.3.0")
                        .help("asset the fees are paid in"),
                ),
        )
        .get_matches();

    let settings = ClientSettings::load(command_matches.value_of("config"))?;

    match command_matches.subcommand() {
        ("keys", Some(matches)) => print_keys(matches, &settings),
        ("serialize", Some(matches)) => serialize(matches, &settings),
        ("sign", Some(matches)) => sign(matches, &settings),
        ("chain-id", Some(matches)) => chain_id(matches, &settings).await,
        ("send", Some(matches)) => send(matches, &settings).await,
        _ => {
            println!("{}", command_matches.usage());
            Ok(())
        }
    }
}

fn select_chain(matches: &ArgMatches, settings: &ClientSettings) -> graphene_rust::Result<ChainConfig> {
    let name = matches
        .value_of("chain")
        .map(String::from)
        .or_else(|| settings.chain.clone())
        .unwrap_or_else(|| String::from("BitShares"));
    let chain = config::lookup_by_name(&name).ok_or(Error::UnknownChainId(name))?;
    config::set_current_config(chain.clone());
    Ok(chain)
}

fn load_keybag(matches: &ArgMatches, settings: &ClientSettings) -> graphene_rust::Result<KeyBag> {
    let mut keybag = KeyBag::new();
    let path = matches
        .value_of("keyfile")
        .map(String::from)
        .or_else(|| settings.key_file.clone());
    match path {
        Some(path) => {
            keybag.import_file(&path)?;
        }
        None => {
            let wif = rpassword::prompt_password_stdout("WIF: ")?;
            keybag.add_wif(wif.trim())?;
        }
    }
    Ok(keybag)
}

fn read_transaction(matches: &ArgMatches) -> graphene_rust::Result<SignedTransaction> {
    let path = matches.value_of("tx").unwrap_or_default();
    let content = fs::read_to_string(path).context(format!("read {}", path))?;
    serde_json::from_str(&content).context(format!("parse {}", path))
}

fn print_keys(matches: &ArgMatches, settings: &ClientSettings) -> graphene_rust::Result<()> {
    let chain = select_chain(matches, settings)?;
    let keybag = load_keybag(matches, settings)?;
    for public_key in keybag.public_keys() {
        println!(
            "{}  {}",
            public_key.to_string_with_prefix(&chain.prefix),
            public_key.to_address().to_string_with_prefix(&chain.prefix)
        );
    }
    Ok(())
}

fn serialize(matches: &ArgMatches, settings: &ClientSettings) -> graphene_rust::Result<()> {
    let chain = select_chain(matches, settings)?;
    let stx = read_transaction(matches)?;
    let tx = stx.get_transaction();
    println!("bytes:  {}", hex::encode(tx.to_bytes()?));
    println!("id:     {}", tx.id()?);
    println!("digest: {}", hex::encode(tx.digest(&chain)?));
    Ok(())
}

fn sign(matches: &ArgMatches, settings: &ClientSettings) -> graphene_rust::Result<()> {
    let chain = select_chain(matches, settings)?;
    let keybag = load_keybag(matches, settings)?;
    let mut stx = read_transaction(matches)?;

    let keys: Vec<PrivateKey> = keybag
        .public_keys()
        .iter()
        .filter_map(|key| keybag.get(key).cloned())
        .collect();
    let attempts = TransactionSigner::new(&chain)
        .with_max_attempts(settings.max_signing_attempts)
        .sign(&mut stx, &keys)?;
    log::info!("signed with {} keys after {} attempts", keys.len(), attempts);

    let json = serde_json::to_string_pretty(&stx)?;
    match matches.value_of("out") {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            file.write_all(json.as_bytes())?;
        }
        None => println!("{}", json),
    }
    Ok(())
}

async fn chain_id(matches: &ArgMatches<'_>, settings: &ClientSettings) -> graphene_rust::Result<()> {
    let node = matches.value_of("node").unwrap_or(&settings.node);
    let caller = rpc::connect(node, settings.timeout()).await?;
    let chain_id = rpc::get_chain_id(&caller).await?;
    match config::lookup(&chain_id) {
        Some(chain) => println!("{} ({})", chain_id, chain.name),
        None => println!("{} (unknown network)", chain_id),
    }
    Ok(())
}

async fn send(matches: &ArgMatches<'_>, settings: &ClientSettings) -> graphene_rust::Result<()> {
    let keybag = load_keybag(matches, settings)?;
    let mut stx = read_transaction(matches)?;
    let fee_asset: AssetId = matches.value_of("fee-asset").unwrap_or("1.3.0").parse()?;

    let node = matches.value_of("node").unwrap_or(&settings.node);
    let caller = rpc::connect(node, settings.timeout()).await?;
    let wallet = Wallet::connect(caller, keybag).await?.with_settings(settings);

    wallet.prepare(&mut stx, fee_asset).await?;
    wallet.sign(&mut stx).await?;
    wallet.broadcast(&stx).await?;
    println!("{}", stx.id()?);
    Ok(())
}

use serde::Deserialize;

use crate::Result;

/// Client settings, layered: defaults, then an optional file, then `GRAPHENE_*` env.
///
/// ```toml
/// node = "wss://node.example.org/ws"
/// timeout_secs = 10
/// expiration_secs = 30
/// max_signing_attempts = 100
/// key_file = "keys.txt"
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ClientSettings {
    pub node: String,
    pub timeout_secs: u64,
    pub expiration_secs: u32,
    pub max_signing_attempts: u32,
    pub key_file: Option<String>,
    pub chain: Option<String>,
}

pub const DEFAULT_NODE: &str = "ws://127.0.0.1:8090";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_EXPIRATION_SECS: u32 = 30;
pub const DEFAULT_MAX_SIGNING_ATTEMPTS: u32 = 100;

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            node: DEFAULT_NODE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            expiration_secs: DEFAULT_EXPIRATION_SECS,
            max_signing_attempts: DEFAULT_MAX_SIGNING_ATTEMPTS,
            key_file: None,
            chain: None,
        }
    }
}

impl ClientSettings {
    /// Loads settings, reading `config_name` (any format the `config` crate
    /// understands, extension optional) when given.
    pub fn load(config_name: Option<&str>) -> Result<ClientSettings> {
        let mut settings = config::Config::default();
        settings.set_default("node", DEFAULT_NODE)?;
        settings.set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?;
        settings.set_default("expiration_secs", DEFAULT_EXPIRATION_SECS as i64)?;
        settings.set_default("max_signing_attempts", DEFAULT_MAX_SIGNING_ATTEMPTS as i64)?;

        if let Some(name) = config_name {
            settings.merge(config::File::with_name(name))?;
        }
        settings.merge(config::Environment::with_prefix("GRAPHENE"))?;

        let loaded: ClientSettings = settings.try_into()?;
        log::debug!("loaded client settings {:?}", loaded);
        Ok(loaded)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

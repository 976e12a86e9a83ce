use thiserror::Error;

/// Every failure the library can surface.
///
/// Deep failures are wrapped in [`Error::Context`] at each layer they cross,
/// so a bad field several levels down reads like
/// `encode TransferOperation.fee: encode AssetAmount.amount: ...`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or out-of-range input while decoding or parsing.
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unsupported operation type {0}")]
    UnsupportedOperation(u64),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("chain config not set")]
    ChainConfigNotSet,

    #[error("unknown chain id {0}")]
    UnknownChainId(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("secp256k1 error: {0}")]
    Secp256k1(#[from] secp256k1::Error),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("no canonical signature found after {0} attempts")]
    CanonicalSignatureNotFound(u32),

    #[error("no signing key found")]
    NoSigningKeyFound,

    #[error("key file line {line}: cannot parse {content:?}")]
    KeyFileParse { line: usize, content: String },

    #[error("memo error: {0}")]
    Memo(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("rpc call timed out")]
    Timeout,

    #[error("connection shut down")]
    Shutdown,

    #[error("settings error: {0}")]
    Settings(#[from] config::ConfigError),
}

impl Error {
    /// Wraps the error with a breadcrumb naming the operation in progress.
    pub fn context<C: Into<String>>(self, context: C) -> Error {
        Error::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Strips every `Context` layer and returns the underlying error.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Adds `.context(..)` to any `Result` whose error converts into [`Error`].
pub trait ResultExt<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| e.into().context(context))
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::InvalidData(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_builds_breadcrumb_trail() {
        let err = Error::InvalidData(String::from("short input"))
            .context("decode AssetAmount.amount")
            .context("decode TransferOperation.fee");
        assert_eq!(
            err.to_string(),
            "decode TransferOperation.fee: decode AssetAmount.amount: invalid data: short input"
        );
        assert!(matches!(err.root(), Error::InvalidData(_)));
    }

    #[test]
    fn result_ext_wraps_foreign_errors() {
        let res: std::result::Result<(), hex::FromHexError> = Err(hex::FromHexError::OddLength);
        let err = res.context("parse chain id").unwrap_err();
        assert!(err.to_string().starts_with("parse chain id: "));
    }
}

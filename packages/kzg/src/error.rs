#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("c-kzg error: {0}")]
    Native(#[from] c_kzg::Error),
    #[error("rust-eth-kzg error: {0}")]
    Portable(String),
    #[error("trusted setup: {0}")]
    TrustedSetup(String),
    #[error("roots-of-unity table: {0}")]
    Domain(String),
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("invalid table json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn portable(err: rust_eth_kzg::Error) -> Self {
        Self::Portable(format!("{err:?}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

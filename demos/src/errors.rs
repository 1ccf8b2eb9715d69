#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Other(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Wallet error: {0}")]
    Wallet(String),
}

impl From<eth::Error> for Error {
    fn from(error: eth::Error) -> Self {
        match error {
            eth::Error::Network(e) | eth::Error::TxExecution(e) => Self::Network(e),
            eth::Error::Wallet(e) => Self::Wallet(e),
            eth::Error::Other(e) => Self::Other(e),
        }
    }
}

impl From<kzg::Error> for Error {
    fn from(error: kzg::Error) -> Self {
        Self::Other(error.to_string())
    }
}

impl From<blob_encoding::Error> for Error {
    fn from(error: blob_encoding::Error) -> Self {
        Self::Other(error.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(error: config::ConfigError) -> Self {
        Self::Other(error.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Other(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

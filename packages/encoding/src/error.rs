#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("payload needs {needed} blobs, a transaction fits {max}")]
    PayloadTooLarge { needed: usize, max: usize },
    #[error("expected {expected} blobs, got {actual}")]
    BlobCount { actual: usize, expected: usize },
    #[error(transparent)]
    Kzg(#[from] kzg::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

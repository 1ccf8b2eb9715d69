//! Turns raw payload bytes into EIP-4844 blobs and wraps them, together with
//! their KZG artifacts, into the sidecar forms a blob transaction carries.

mod error;
mod packer;
mod sidecar;

pub use error::{Error, Result};
pub use packer::{Packer, USABLE_BYTES_PER_BLOB, USABLE_BYTES_PER_FIELD_ELEMENT};
pub use sidecar::{
    CellProofSidecar, EIP_7594_WRAPPER_VERSION, generate_sidecar, sidecar_versioned_hashes,
};

/// Protocol cap on blobs carried by a single transaction.
pub const MAX_BLOBS_PER_TRANSACTION: usize = 6;

/// Fails unless exactly `expected` blobs were produced. The demos use this to
/// pin down the blob count a payload is assumed to fit in.
pub fn ensure_blob_count(actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::BlobCount { actual, expected });
    }
    Ok(())
}

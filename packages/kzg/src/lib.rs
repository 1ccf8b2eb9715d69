//! Wrappers around the two KZG libraries used by the demos: the native
//! `c-kzg` bindings and the portable pure-Rust `rust_eth_kzg` implementation.
//!
//! All byte layouts follow the EIP-4844/EIP-7594 specs; nothing cryptographic
//! is implemented here.

mod domain;
mod error;
mod native;
mod portable;

pub use domain::EvaluationDomain;
pub use error::{Error, Result};
pub use native::NativeKzg;
pub use portable::PortableKzg;

pub const BYTES_PER_FIELD_ELEMENT: usize = 32;
pub const FIELD_ELEMENTS_PER_BLOB: usize = 4096;
pub const BYTES_PER_BLOB: usize = FIELD_ELEMENTS_PER_BLOB * BYTES_PER_FIELD_ELEMENT;
pub const FIELD_ELEMENTS_PER_CELL: usize = 64;
pub const BYTES_PER_CELL: usize = FIELD_ELEMENTS_PER_CELL * BYTES_PER_FIELD_ELEMENT;
pub const CELLS_PER_EXT_BLOB: usize = 128;

/// Version tag written over byte 0 of a commitment hash.
pub const VERSIONED_HASH_VERSION_KZG: u8 = 0x01;

pub type Blob = Box<[u8; BYTES_PER_BLOB]>;
pub type Commitment = [u8; 48];
pub type Proof = [u8; 48];
pub type Cell = Box<[u8; BYTES_PER_CELL]>;
pub type VersionedHash = [u8; 32];

/// The operations both backends support, used wherever the demos pit one
/// implementation against the other.
pub trait KzgBackend {
    fn name(&self) -> &'static str;

    fn blob_to_commitment(&self, blob: &Blob) -> Result<Commitment>;

    /// Cells and cell proofs of the extended blob, in cell-index order.
    fn compute_cells_and_proofs(&self, blob: &Blob) -> Result<(Vec<Cell>, Vec<Proof>)>;

    /// Recovers the full cell set of one blob from a partial subset.
    /// `indices[i]` is the cell index of `cells[i]`; at least half of the
    /// extended blob must be present.
    fn recover_cells(&self, indices: &[u64], cells: &[Cell]) -> Result<Vec<Cell>>;
}

/// Hash of a commitment with byte 0 replaced by the KZG version tag, as used
/// on the execution layer to reference blob data.
pub fn versioned_hash(commitment: &Commitment) -> VersionedHash {
    use sha2::{Digest, Sha256};

    let mut hash: [u8; 32] = Sha256::digest(commitment).into();
    hash[0] = VERSIONED_HASH_VERSION_KZG;
    hash
}

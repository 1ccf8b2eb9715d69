use alloy::{
    consensus::BlobTransactionSidecar,
    eips::eip4844::{Blob as AlloyBlob, Bytes48},
    primitives::B256,
};
use itertools::Itertools;
use kzg::{Blob, CELLS_PER_EXT_BLOB, Cell, Commitment, KzgBackend, NativeKzg, Proof};

use crate::Result;

/// Version tag of the cell-proof sidecar wrapper introduced by EIP-7594.
pub const EIP_7594_WRAPPER_VERSION: u8 = 1;

/// Builds the EIP-4844 sidecar for a set of blobs: one commitment and one
/// blob proof per blob.
pub fn generate_sidecar(
    blobs: impl IntoIterator<Item = Blob>,
    kzg: &NativeKzg,
) -> Result<BlobTransactionSidecar> {
    let blobs: Vec<Blob> = blobs.into_iter().collect();

    let mut commitments = Vec::with_capacity(blobs.len());
    let mut proofs = Vec::with_capacity(blobs.len());
    for blob in &blobs {
        let commitment = kzg.blob_to_commitment(blob)?;
        let proof = kzg.compute_blob_proof(blob, &commitment)?;
        commitments.push(Bytes48::from(commitment));
        proofs.push(Bytes48::from(proof));
    }

    Ok(BlobTransactionSidecar::new(
        blobs.into_iter().map(|blob| AlloyBlob::from(*blob)).collect(),
        commitments,
        proofs,
    ))
}

/// Versioned hashes of a sidecar's commitments, derived by hand rather than
/// taken from a built transaction.
pub fn sidecar_versioned_hashes(sidecar: &BlobTransactionSidecar) -> Vec<B256> {
    sidecar
        .commitments
        .iter()
        .map(|commitment| B256::from(kzg::versioned_hash(&commitment.0)))
        .collect()
}

/// The EIP-7594 sidecar form: per-cell proofs over the extended blobs instead
/// of one proof per blob. `cell_proofs` is blob-major, 128 proofs per blob.
pub struct CellProofSidecar {
    pub wrapper_version: u8,
    pub blobs: Vec<Blob>,
    pub commitments: Vec<Commitment>,
    pub cells: Vec<Cell>,
    pub cell_proofs: Vec<Proof>,
}

impl CellProofSidecar {
    pub fn generate(
        blobs: impl IntoIterator<Item = Blob>,
        backend: &impl KzgBackend,
    ) -> Result<Self> {
        let blobs: Vec<Blob> = blobs.into_iter().collect();

        let commitments: Vec<Commitment> = blobs
            .iter()
            .map(|blob| backend.blob_to_commitment(blob))
            .try_collect()?;

        let mut cells = Vec::with_capacity(blobs.len() * CELLS_PER_EXT_BLOB);
        let mut cell_proofs = Vec::with_capacity(blobs.len() * CELLS_PER_EXT_BLOB);
        for blob in &blobs {
            let (blob_cells, blob_proofs) = backend.compute_cells_and_proofs(blob)?;
            cells.extend(blob_cells);
            cell_proofs.extend(blob_proofs);
        }

        Ok(Self {
            wrapper_version: EIP_7594_WRAPPER_VERSION,
            blobs,
            commitments,
            cells,
            cell_proofs,
        })
    }

    pub fn versioned_hashes(&self) -> Vec<B256> {
        self.commitments
            .iter()
            .map(|commitment| B256::from(kzg::versioned_hash(commitment)))
            .collect()
    }

    /// The wire form accepted by today's execution-layer RPCs: the same blobs
    /// and commitments with freshly computed per-blob proofs.
    pub fn to_eip4844_sidecar(&self, kzg: &NativeKzg) -> Result<BlobTransactionSidecar> {
        generate_sidecar(self.blobs.iter().cloned(), kzg)
    }
}

#[cfg(test)]
mod tests {
    use kzg::PortableKzg;
    use pretty_assertions::assert_eq;
    use rand::{Rng, SeedableRng, rngs::SmallRng};

    use super::*;

    fn test_blobs(count: usize) -> Vec<Blob> {
        let mut rng = SmallRng::seed_from_u64(42);
        (0..count)
            .map(|_| {
                let mut blob: Blob = Box::new([0u8; kzg::BYTES_PER_BLOB]);
                for element in blob.chunks_mut(kzg::BYTES_PER_FIELD_ELEMENT) {
                    rng.fill(&mut element[1..]);
                }
                blob
            })
            .collect()
    }

    #[test]
    fn sidecar_carries_one_commitment_and_proof_per_blob() {
        // given
        let blobs = test_blobs(2);

        // when
        let sidecar = generate_sidecar(blobs, &NativeKzg::default()).unwrap();

        // then
        assert_eq!(sidecar.blobs.len(), 2);
        assert_eq!(sidecar.commitments.len(), 2);
        assert_eq!(sidecar.proofs.len(), 2);
    }

    #[test]
    fn manual_versioned_hashes_match_the_alloy_derivation() {
        // given
        let sidecar = generate_sidecar(test_blobs(2), &NativeKzg::default()).unwrap();

        // when
        let manual = sidecar_versioned_hashes(&sidecar);

        // then
        let alloys: Vec<B256> = sidecar.versioned_hashes().collect();
        assert_eq!(manual, alloys);
    }

    #[test]
    fn cell_proof_sidecar_holds_a_full_cell_grid() {
        // given
        let blobs = test_blobs(2);

        // when
        let sidecar = CellProofSidecar::generate(blobs, &PortableKzg::default()).unwrap();

        // then
        assert_eq!(sidecar.wrapper_version, EIP_7594_WRAPPER_VERSION);
        assert_eq!(sidecar.cells.len(), 2 * CELLS_PER_EXT_BLOB);
        assert_eq!(sidecar.cell_proofs.len(), 2 * CELLS_PER_EXT_BLOB);
        assert_eq!(sidecar.versioned_hashes().len(), 2);
    }

    #[test]
    fn both_sidecar_forms_reference_the_same_blob_data() {
        // given
        let blobs = test_blobs(1);
        let cell_sidecar = CellProofSidecar::generate(blobs, &NativeKzg::default()).unwrap();

        // when
        let wire = cell_sidecar.to_eip4844_sidecar(&NativeKzg::default()).unwrap();

        // then
        assert_eq!(sidecar_versioned_hashes(&wire), cell_sidecar.versioned_hashes());
    }
}

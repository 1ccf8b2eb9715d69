use std::path::Path;

use crate::{
    BYTES_PER_CELL, Blob, CELLS_PER_EXT_BLOB, Cell, Commitment, Error, KzgBackend, Proof, Result,
};

// https://github.com/ethereum/c-kzg-4844?tab=readme-ov-file#precompute
const PRECOMPUTE: u64 = 8;

enum Settings {
    Embedded(&'static c_kzg::KzgSettings),
    Loaded(Box<c_kzg::KzgSettings>),
}

/// The native `c-kzg` backend. Uses the embedded Ethereum trusted setup by
/// default, or a trusted-setup file read from disk.
pub struct NativeKzg {
    settings: Settings,
}

impl Default for NativeKzg {
    fn default() -> Self {
        Self {
            settings: Settings::Embedded(c_kzg::ethereum_kzg_settings(PRECOMPUTE)),
        }
    }
}

impl NativeKzg {
    pub fn from_trusted_setup_file(path: &Path) -> Result<Self> {
        let settings = c_kzg::KzgSettings::load_trusted_setup_file(path, PRECOMPUTE)
            .map_err(|e| Error::TrustedSetup(format!("{}: {e}", path.display())))?;

        Ok(Self {
            settings: Settings::Loaded(Box::new(settings)),
        })
    }

    fn settings(&self) -> &c_kzg::KzgSettings {
        match &self.settings {
            Settings::Embedded(settings) => settings,
            Settings::Loaded(settings) => settings,
        }
    }

    pub fn compute_blob_proof(&self, blob: &Blob, commitment: &Commitment) -> Result<Proof> {
        let proof = self
            .settings()
            .compute_blob_kzg_proof(&to_ckzg_blob(blob)?, &(*commitment).into())?;

        Ok(proof.to_bytes().into_inner())
    }

    pub fn verify_blob_proof(
        &self,
        blob: &Blob,
        commitment: &Commitment,
        proof: &Proof,
    ) -> Result<bool> {
        self.settings()
            .verify_blob_kzg_proof(
                &to_ckzg_blob(blob)?,
                &(*commitment).into(),
                &(*proof).into(),
            )
            .map_err(Into::into)
    }

    /// Opens the blob polynomial at an arbitrary point `z`, yielding the
    /// proof and the evaluation `y = p(z)`.
    pub fn compute_proof_at(&self, blob: &Blob, z: &[u8; 32]) -> Result<(Proof, [u8; 32])> {
        let (proof, y) = self
            .settings()
            .compute_kzg_proof(&to_ckzg_blob(blob)?, &(*z).into())?;

        let mut evaluation = [0u8; 32];
        evaluation.copy_from_slice(y.as_slice());

        Ok((proof.to_bytes().into_inner(), evaluation))
    }

    pub fn verify_proof(
        &self,
        commitment: &Commitment,
        z: &[u8; 32],
        y: &[u8; 32],
        proof: &Proof,
    ) -> Result<bool> {
        self.settings()
            .verify_kzg_proof(
                &(*commitment).into(),
                &(*z).into(),
                &(*y).into(),
                &(*proof).into(),
            )
            .map_err(Into::into)
    }

    /// Batch-verifies cell proofs for a sequence of blobs. `commitments` is
    /// one entry per blob; `cells` and `proofs` hold all cells of all blobs
    /// in blob-major, cell-index order.
    pub fn verify_cell_proofs(
        &self,
        commitments: &[Commitment],
        cells: &[Cell],
        proofs: &[Proof],
    ) -> Result<bool> {
        let commitments: Vec<c_kzg::Bytes48> = commitments
            .iter()
            .flat_map(|commitment| std::iter::repeat_n((*commitment).into(), CELLS_PER_EXT_BLOB))
            .collect();
        let indices: Vec<u64> = std::iter::repeat_n(
            0..CELLS_PER_EXT_BLOB as u64,
            cells.len().div_ceil(CELLS_PER_EXT_BLOB),
        )
        .flatten()
        .collect();
        let cells = to_ckzg_cells(cells)?;
        let proofs: Vec<c_kzg::Bytes48> = proofs.iter().map(|proof| (*proof).into()).collect();

        self.settings()
            .verify_cell_kzg_proof_batch(&commitments, &indices, &cells, &proofs)
            .map_err(Into::into)
    }

    /// Recovers the full cell set plus fresh cell proofs from a partial
    /// subset of one blob's cells.
    pub fn recover_cells_and_proofs(
        &self,
        indices: &[u64],
        cells: &[Cell],
    ) -> Result<(Vec<Cell>, Vec<Proof>)> {
        let cells = to_ckzg_cells(cells)?;
        let (recovered, proofs) = self
            .settings()
            .recover_cells_and_kzg_proofs(indices, &cells)?;

        Ok((
            recovered.iter().map(cell_bytes).collect(),
            proofs
                .iter()
                .map(|proof| proof.to_bytes().into_inner())
                .collect(),
        ))
    }
}

impl KzgBackend for NativeKzg {
    fn name(&self) -> &'static str {
        "c-kzg"
    }

    fn blob_to_commitment(&self, blob: &Blob) -> Result<Commitment> {
        let commitment = self.settings().blob_to_kzg_commitment(&to_ckzg_blob(blob)?)?;
        Ok(commitment.to_bytes().into_inner())
    }

    fn compute_cells_and_proofs(&self, blob: &Blob) -> Result<(Vec<Cell>, Vec<Proof>)> {
        let (cells, proofs) = self
            .settings()
            .compute_cells_and_kzg_proofs(&to_ckzg_blob(blob)?)?;

        Ok((
            cells.iter().map(cell_bytes).collect(),
            proofs
                .iter()
                .map(|proof| proof.to_bytes().into_inner())
                .collect(),
        ))
    }

    fn recover_cells(&self, indices: &[u64], cells: &[Cell]) -> Result<Vec<Cell>> {
        let (recovered, _proofs) = self.recover_cells_and_proofs(indices, cells)?;
        Ok(recovered)
    }
}

fn to_ckzg_blob(blob: &Blob) -> Result<c_kzg::Blob> {
    c_kzg::Blob::from_bytes(blob.as_slice()).map_err(Into::into)
}

fn to_ckzg_cells(cells: &[Cell]) -> Result<Vec<c_kzg::Cell>> {
    cells
        .iter()
        .map(|cell| c_kzg::Cell::from_bytes(cell.as_slice()).map_err(Into::into))
        .collect()
}

fn cell_bytes(cell: &c_kzg::Cell) -> Cell {
    let mut bytes = Box::new([0u8; BYTES_PER_CELL]);
    bytes.copy_from_slice(&cell.to_bytes());
    bytes
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tests::test_blob;

    #[test]
    fn blob_proof_verifies_against_its_commitment() {
        // given
        let kzg = NativeKzg::default();
        let blob = test_blob(1);
        let commitment = kzg.blob_to_commitment(&blob).unwrap();

        // when
        let proof = kzg.compute_blob_proof(&blob, &commitment).unwrap();

        // then
        assert!(kzg.verify_blob_proof(&blob, &commitment, &proof).unwrap());
    }

    #[test]
    fn tampered_blob_proof_is_rejected() {
        // given
        let kzg = NativeKzg::default();
        let blob = test_blob(2);
        let commitment = kzg.blob_to_commitment(&blob).unwrap();
        let mut proof = kzg.compute_blob_proof(&blob, &commitment).unwrap();

        // when
        proof[5] ^= 0xff;

        // then
        assert!(kzg.verify_blob_proof(&blob, &commitment, &proof).is_err()
            || !kzg.verify_blob_proof(&blob, &commitment, &proof).unwrap());
    }

    #[test]
    fn point_proof_opens_the_polynomial() {
        // given
        let kzg = NativeKzg::default();
        let blob = test_blob(3);
        let commitment = kzg.blob_to_commitment(&blob).unwrap();
        let mut z = [0u8; 32];
        z[31] = 10;

        // when
        let (proof, y) = kzg.compute_proof_at(&blob, &z).unwrap();

        // then
        assert!(kzg.verify_proof(&commitment, &z, &y, &proof).unwrap());
    }

    #[test]
    fn cells_recover_from_the_even_half() {
        // given
        let kzg = NativeKzg::default();
        let blob = test_blob(4);
        let (cells, proofs) = kzg.compute_cells_and_proofs(&blob).unwrap();
        assert_eq!(cells.len(), CELLS_PER_EXT_BLOB);
        assert_eq!(proofs.len(), CELLS_PER_EXT_BLOB);

        let indices: Vec<u64> = (0..CELLS_PER_EXT_BLOB as u64).step_by(2).collect();
        let partial: Vec<Cell> = indices
            .iter()
            .map(|i| cells[*i as usize].clone())
            .collect();

        // when
        let (recovered, recovered_proofs) =
            kzg.recover_cells_and_proofs(&indices, &partial).unwrap();

        // then
        assert_eq!(recovered, cells);
        assert_eq!(recovered_proofs, proofs);
    }

    #[test]
    fn cell_proof_batch_verifies() {
        // given
        let kzg = NativeKzg::default();
        let blob = test_blob(5);
        let commitment = kzg.blob_to_commitment(&blob).unwrap();

        // when
        let (cells, proofs) = kzg.compute_cells_and_proofs(&blob).unwrap();

        // then
        assert!(kzg
            .verify_cell_proofs(&[commitment], &cells, &proofs)
            .unwrap());
    }

    #[test]
    fn missing_trusted_setup_file_is_reported() {
        // when
        let result = NativeKzg::from_trusted_setup_file(Path::new("/does/not/exist"));

        // then
        assert!(matches!(result, Err(Error::TrustedSetup(_))));
    }
}

use rust_eth_kzg::DASContext;

use crate::{BYTES_PER_CELL, Blob, Cell, Commitment, Error, KzgBackend, Proof, Result};

/// The portable pure-Rust backend. Carries no unsafe FFI and runs anywhere,
/// at the price of slower proofs than the native bindings.
///
/// The underlying library only exposes the EIP-7594 surface, so blob proofs
/// and point openings stay native-only.
pub struct PortableKzg {
    ctx: DASContext,
}

impl Default for PortableKzg {
    fn default() -> Self {
        Self {
            ctx: DASContext::default(),
        }
    }
}

impl KzgBackend for PortableKzg {
    fn name(&self) -> &'static str {
        "rust-eth-kzg"
    }

    fn blob_to_commitment(&self, blob: &Blob) -> Result<Commitment> {
        self.ctx
            .blob_to_kzg_commitment(blob)
            .map_err(Error::portable)
    }

    fn compute_cells_and_proofs(&self, blob: &Blob) -> Result<(Vec<Cell>, Vec<Proof>)> {
        let (cells, proofs) = self
            .ctx
            .compute_cells_and_kzg_proofs(blob)
            .map_err(Error::portable)?;

        Ok((cells.to_vec(), proofs.to_vec()))
    }

    fn recover_cells(&self, indices: &[u64], cells: &[Cell]) -> Result<Vec<Cell>> {
        let cell_refs: Vec<&[u8; BYTES_PER_CELL]> = cells.iter().map(|cell| &**cell).collect();
        let (recovered, _proofs) = self
            .ctx
            .recover_cells_and_kzg_proofs(indices.to_vec(), cell_refs)
            .map_err(Error::portable)?;

        Ok(recovered.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{CELLS_PER_EXT_BLOB, NativeKzg, tests::test_blob};

    #[test]
    fn cells_and_proofs_match_the_native_backend() {
        // given
        let blob = test_blob(6);

        // when
        let (native_cells, native_proofs) = NativeKzg::default()
            .compute_cells_and_proofs(&blob)
            .unwrap();
        let (portable_cells, portable_proofs) = PortableKzg::default()
            .compute_cells_and_proofs(&blob)
            .unwrap();

        // then
        assert_eq!(portable_cells, native_cells);
        assert_eq!(portable_proofs, native_proofs);
    }

    #[test]
    fn cells_recover_from_the_odd_half() {
        // given
        let kzg = PortableKzg::default();
        let blob = test_blob(7);
        let (cells, _) = kzg.compute_cells_and_proofs(&blob).unwrap();

        let indices: Vec<u64> = (1..CELLS_PER_EXT_BLOB as u64).step_by(2).collect();
        let partial: Vec<Cell> = indices
            .iter()
            .map(|i| cells[*i as usize].clone())
            .collect();

        // when
        let recovered = kzg.recover_cells(&indices, &partial).unwrap();

        // then
        assert_eq!(recovered, cells);
    }

    #[test]
    fn recovery_needs_at_least_half_the_cells() {
        // given
        let kzg = PortableKzg::default();
        let blob = test_blob(8);
        let (cells, _) = kzg.compute_cells_and_proofs(&blob).unwrap();

        let indices: Vec<u64> = (0..(CELLS_PER_EXT_BLOB / 2 - 1) as u64).collect();
        let partial: Vec<Cell> = indices
            .iter()
            .map(|i| cells[*i as usize].clone())
            .collect();

        // when
        let result = kzg.recover_cells(&indices, &partial);

        // then
        assert!(result.is_err());
    }
}

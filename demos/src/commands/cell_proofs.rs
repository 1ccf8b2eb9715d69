use blob_encoding::CellProofSidecar;
use eth::{BlobTxRequest, U256};
use kzg::{CELLS_PER_EXT_BLOB, Cell, KzgBackend, PortableKzg};
use tracing::info;

use crate::{
    commands::{await_receipt, random_blobs},
    config::{CellProofsArgs, Config},
    errors::{Error, Result},
    setup,
};

pub async fn run(args: &CellProofsArgs, config: &Config) -> Result<()> {
    let kzg = setup::native_backend(config)?;

    let blobs = random_blobs(args.blobs)?;
    let sidecar = CellProofSidecar::generate(blobs, &kzg)?;
    println!(
        "sidecar (wrapper version {}): {} blobs, {} cells, {} cell proofs",
        sidecar.wrapper_version,
        sidecar.blobs.len(),
        sidecar.cells.len(),
        sidecar.cell_proofs.len()
    );

    let verified = kzg.verify_cell_proofs(&sidecar.commitments, &sidecar.cells, &sidecar.cell_proofs)?;
    if !verified {
        return Err(Error::Other("cell proof batch did not verify".to_string()));
    }
    println!("cell proof batch verified");

    recover_first_blob(&kzg, &sidecar)?;

    if args.broadcast {
        broadcast(config, &sidecar).await?;
    }

    Ok(())
}

/// Drops the odd-indexed half of the first blob's cells and rebuilds the full
/// extended blob from what is left, once per backend.
fn recover_first_blob(kzg: &kzg::NativeKzg, sidecar: &CellProofSidecar) -> Result<()> {
    let original = &sidecar.cells[..CELLS_PER_EXT_BLOB];

    let indices: Vec<u64> = (0..CELLS_PER_EXT_BLOB as u64).step_by(2).collect();
    let partial: Vec<Cell> = indices
        .iter()
        .map(|i| original[*i as usize].clone())
        .collect();
    info!("kept {} of {CELLS_PER_EXT_BLOB} cells", partial.len());

    let portable = PortableKzg::default();
    let backends: [&dyn KzgBackend; 2] = [kzg, &portable];
    for backend in backends {
        let recovered = backend.recover_cells(&indices, &partial)?;
        if recovered != original {
            return Err(Error::Other(format!(
                "{}: recovered cells differ from the originals",
                backend.name()
            )));
        }
        println!(
            "{}: recovered all {CELLS_PER_EXT_BLOB} cells from the even half",
            backend.name()
        );
    }

    Ok(())
}

/// Today's RPCs accept blobs in the EIP-4844 wire form, so the broadcast
/// rewraps them with per-blob proofs.
async fn broadcast(config: &Config, sidecar: &CellProofSidecar) -> Result<()> {
    let connection = setup::connect(config).await?;
    let kzg = setup::native_backend(config)?;

    let wire_sidecar = sidecar.to_eip4844_sidecar(&kzg)?;
    let versioned_hashes = sidecar.versioned_hashes();

    let submitted = connection
        .submit_blob_tx(BlobTxRequest {
            to: connection.signer_address(),
            value: U256::ZERO,
            sidecar: wire_sidecar,
            versioned_hashes,
        })
        .await?;
    println!("broadcast tx: {}", submitted.hash);

    let response = await_receipt(&connection, submitted.hash, &config.app).await?;
    if !response.succeeded {
        return Err(Error::Other(format!(
            "tx {} reverted in block {}",
            submitted.hash, response.block_number
        )));
    }
    println!("mined in block {}", response.block_number);

    Ok(())
}

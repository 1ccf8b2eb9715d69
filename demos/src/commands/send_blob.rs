use blob_encoding::{Packer, ensure_blob_count, generate_sidecar, sidecar_versioned_hashes};
use eth::{BlobTxRequest, U256};
use tracing::info;

use crate::{
    commands::{await_receipt, random_payload},
    config::{Config, SendBlobArgs},
    errors::{Error, Result},
    setup,
};

pub async fn run(args: &SendBlobArgs, config: &Config) -> Result<()> {
    let connection = setup::connect(config).await?;
    let kzg = setup::native_backend(config)?;

    let balance = connection.balance().await?;
    info!(
        "wallet {} holds {balance} wei",
        connection.signer_address()
    );

    let payload = match &args.message {
        Some(message) => message.clone().into_bytes(),
        None => random_payload(args.payload_bytes),
    };
    let blobs = Packer::new().pack(&payload)?;
    if let Some(expected) = args.expect_blobs {
        ensure_blob_count(blobs.len(), expected)?;
    }
    info!("packed {} payload bytes into {} blobs", payload.len(), blobs.len());

    let sidecar = generate_sidecar(blobs, &kzg)?;
    let versioned_hashes = sidecar_versioned_hashes(&sidecar);
    for hash in &versioned_hashes {
        println!("versioned hash: {hash}");
    }

    let fees = connection.fees().await?;
    info!(
        "fees: max_fee_per_gas {}, tip {}, blob base fee {}",
        fees.max_fee_per_gas, fees.max_priority_fee_per_gas, fees.blob_base_fee
    );

    let submitted = connection
        .submit_blob_tx(BlobTxRequest {
            to: connection.signer_address(),
            value: U256::ZERO,
            sidecar,
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

    println!(
        "mined in block {} (execution fee: {} wei, blob fee: {} wei)",
        response.block_number, response.fee, response.blob_fee
    );

    Ok(())
}

pub mod cell_proofs;
pub mod compare_backends;
pub mod point_eval;
pub mod send_blob;

use blob_encoding::{Packer, USABLE_BYTES_PER_BLOB};
use eth::{B256, Connection, TransactionResponse};
use kzg::Blob;
use rand::{Rng, RngCore, SeedableRng, rngs::SmallRng};

use crate::{
    config::App,
    errors::{Error, Result},
};

pub(crate) fn random_payload(num_bytes: usize) -> Vec<u8> {
    let mut payload = vec![0u8; num_bytes];
    rand::thread_rng().fill_bytes(&mut payload);
    payload
}

pub(crate) fn random_blobs(count: usize) -> Result<Vec<Blob>> {
    let payload = random_payload(count * USABLE_BYTES_PER_BLOB);
    Ok(Packer::new().pack(&payload)?)
}

/// Reproducible blob with canonical field elements, so reruns open the same
/// polynomial.
pub(crate) fn seeded_blob(seed: u64) -> Blob {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut blob: Blob = Box::new([0u8; kzg::BYTES_PER_BLOB]);
    for element in blob.chunks_mut(kzg::BYTES_PER_FIELD_ELEMENT) {
        rng.fill(&mut element[1..]);
    }
    blob
}

/// One propagation sleep, then a bounded receipt poll.
pub(crate) async fn await_receipt(
    connection: &Connection,
    tx_hash: B256,
    app: &App,
) -> Result<TransactionResponse> {
    tokio::time::sleep(app.propagation_delay).await;

    if connection.transaction_known(tx_hash).await? {
        tracing::info!("tx {tx_hash} is known to the node");
    }

    let deadline = tokio::time::Instant::now() + app.receipt_timeout;
    loop {
        if let Some(response) = connection.get_transaction_response(tx_hash).await? {
            return Ok(response);
        }

        if tokio::time::Instant::now() >= deadline {
            let known = connection.transaction_known(tx_hash).await?;
            return Err(Error::Network(format!(
                "no receipt for tx {tx_hash} within {} (known to the node: {known})",
                humantime::format_duration(app.receipt_timeout)
            )));
        }

        tokio::time::sleep(app.receipt_poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn seeded_blob_is_reproducible() {
        // when
        let first = seeded_blob(7);
        let second = seeded_blob(7);

        // then
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_give_different_blobs() {
        assert_ne!(seeded_blob(7), seeded_blob(8));
    }

    #[test]
    fn seeded_blob_keeps_every_field_element_canonical() {
        // when
        let blob = seeded_blob(7);

        // then
        for element in blob.chunks(kzg::BYTES_PER_FIELD_ELEMENT) {
            assert_eq!(element[0], 0);
        }
    }
}

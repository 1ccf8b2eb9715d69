use kzg::{BYTES_PER_BLOB, BYTES_PER_FIELD_ELEMENT, Blob};

use crate::{Error, MAX_BLOBS_PER_TRANSACTION, Result};

/// The leading byte of every field element stays zero so the element is below
/// the BLS12-381 scalar modulus no matter what the payload holds.
pub const USABLE_BYTES_PER_FIELD_ELEMENT: usize = BYTES_PER_FIELD_ELEMENT - 1;
pub const USABLE_BYTES_PER_BLOB: usize =
    USABLE_BYTES_PER_FIELD_ELEMENT * kzg::FIELD_ELEMENTS_PER_BLOB;

/// Packs payload bytes into blobs, 31 bytes per 32-byte field element.
#[derive(Debug, Default, Clone)]
pub struct Packer;

impl Packer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub const fn blobs_needed(&self, num_bytes: usize) -> usize {
        num_bytes.div_ceil(USABLE_BYTES_PER_BLOB)
    }

    pub fn pack(&self, payload: &[u8]) -> Result<Vec<Blob>> {
        let needed = self.blobs_needed(payload.len());
        if needed > MAX_BLOBS_PER_TRANSACTION {
            return Err(Error::PayloadTooLarge {
                needed,
                max: MAX_BLOBS_PER_TRANSACTION,
            });
        }

        let mut blobs = Vec::with_capacity(needed);
        for chunk in payload.chunks(USABLE_BYTES_PER_BLOB) {
            let mut blob: Blob = Box::new([0u8; BYTES_PER_BLOB]);
            for (element, piece) in blob
                .chunks_mut(BYTES_PER_FIELD_ELEMENT)
                .zip(chunk.chunks(USABLE_BYTES_PER_FIELD_ELEMENT))
            {
                element[1..=piece.len()].copy_from_slice(piece);
            }
            blobs.push(blob);
        }

        Ok(blobs)
    }

    /// Inverse of [`Self::pack`]. The payload length is not stored in the
    /// blobs, so the caller supplies it.
    pub fn unpack(&self, blobs: &[Blob], payload_len: usize) -> Result<Vec<u8>> {
        if self.blobs_needed(payload_len) != blobs.len() {
            return Err(Error::BlobCount {
                actual: blobs.len(),
                expected: self.blobs_needed(payload_len),
            });
        }

        let mut payload = Vec::with_capacity(payload_len);
        for blob in blobs {
            for element in blob.chunks(BYTES_PER_FIELD_ELEMENT) {
                let remaining = payload_len - payload.len();
                if remaining == 0 {
                    break;
                }
                let take = remaining.min(USABLE_BYTES_PER_FIELD_ELEMENT);
                payload.extend_from_slice(&element[1..=take]);
            }
        }

        Ok(payload)
    }
}

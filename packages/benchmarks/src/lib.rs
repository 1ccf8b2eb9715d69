use kzg::{BYTES_PER_BLOB, BYTES_PER_FIELD_ELEMENT, Blob};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Reproducible blobs with canonical field elements.
pub fn seeded_blobs(seed: u64, count: usize) -> Vec<Blob> {
    let mut rng = SmallRng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            let mut blob: Blob = Box::new([0u8; BYTES_PER_BLOB]);
            for element in blob.chunks_mut(BYTES_PER_FIELD_ELEMENT) {
                rng.fill(&mut element[1..]);
            }
            blob
        })
        .collect()
}

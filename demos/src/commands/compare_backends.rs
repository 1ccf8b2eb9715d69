use std::time::{Duration, Instant};

use kzg::{Blob, Commitment, KzgBackend, PortableKzg};

use crate::{
    commands::random_blobs,
    config::{CompareBackendsArgs, Config},
    errors::{Error, Result},
    setup,
};

pub fn run(args: &CompareBackendsArgs, config: &Config) -> Result<()> {
    let native = setup::native_backend(config)?;
    let portable = PortableKzg::default();
    let backends: [&dyn KzgBackend; 2] = [&native, &portable];

    for round in 1..=args.rounds {
        let blobs = random_blobs(args.blobs)?;
        println!("round {round}/{} over {} blobs", args.rounds, blobs.len());

        let mut commitments: Vec<Vec<Commitment>> = Vec::with_capacity(backends.len());
        for backend in backends {
            let (result, elapsed) = time_commitments(backend, &blobs)?;
            println!("  {:>14} commitments: {elapsed:?}", backend.name());
            commitments.push(result);
        }
        if commitments[0] != commitments[1] {
            return Err(Error::Other(
                "backends disagree on the commitments".to_string(),
            ));
        }

        for backend in backends {
            let elapsed = time_cells(backend, &blobs)?;
            println!("  {:>14} cells + proofs: {elapsed:?}", backend.name());
        }
    }

    Ok(())
}

fn time_commitments(
    backend: &dyn KzgBackend,
    blobs: &[Blob],
) -> Result<(Vec<Commitment>, Duration)> {
    let started = Instant::now();

    let mut commitments = Vec::with_capacity(blobs.len());
    for blob in blobs {
        commitments.push(backend.blob_to_commitment(blob)?);
    }

    Ok((commitments, started.elapsed()))
}

fn time_cells(backend: &dyn KzgBackend, blobs: &[Blob]) -> Result<Duration> {
    let started = Instant::now();

    for blob in blobs {
        backend.compute_cells_and_proofs(blob)?;
    }

    Ok(started.elapsed())
}

use eth::{B256, point_evaluation_input};
use kzg::{BYTES_PER_FIELD_ELEMENT, EvaluationDomain, KzgBackend, versioned_hash};

use crate::{
    commands::seeded_blob,
    config::{Config, PointEvalArgs},
    errors::{Error, Result},
    setup,
};

/// Roots of unity of the blob evaluation domain, bundled so opening a blob
/// at field element `i` needs no field arithmetic at runtime.
const DOMAIN_TABLE: &str = include_str!("../../data/roots_of_unity_4096.json");

pub async fn run(args: &PointEvalArgs, config: &Config) -> Result<()> {
    let kzg = setup::native_backend(config)?;
    let domain = EvaluationDomain::from_json(DOMAIN_TABLE)?;

    let blob = seeded_blob(args.seed);
    let commitment = kzg.blob_to_commitment(&blob)?;
    let hash = B256::from(versioned_hash(&commitment));
    println!("versioned hash: {hash}");

    let z = domain.point(args.index)?;
    let (proof, y) = kzg.compute_proof_at(&blob, &z)?;

    let element_offset = args.index * BYTES_PER_FIELD_ELEMENT;
    let element = &blob[element_offset..element_offset + BYTES_PER_FIELD_ELEMENT];
    if element != &y[..] {
        return Err(Error::Other(format!(
            "opening at root {} did not yield field element {}",
            hex::encode(z),
            args.index
        )));
    }
    println!(
        "field element {} opens to y = 0x{}",
        args.index,
        hex::encode(y)
    );

    if !kzg.verify_proof(&commitment, &z, &y, &proof)? {
        return Err(Error::Other("local proof verification failed".to_string()));
    }
    println!("proof verified locally");

    if args.offline {
        return Ok(());
    }

    let connection = setup::connect(config).await?;
    let input = point_evaluation_input(&hash, &z, &y, &commitment, &proof);
    if !connection.verify_point_evaluation(input).await? {
        return Err(Error::Other(
            "point evaluation precompile rejected the proof".to_string(),
        ));
    }
    println!("point evaluation precompile accepted the proof");

    Ok(())
}

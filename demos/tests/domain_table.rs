use kzg::{
    BYTES_PER_BLOB, BYTES_PER_FIELD_ELEMENT, EvaluationDomain, FIELD_ELEMENTS_PER_BLOB, KzgBackend,
    NativeKzg,
};
use pretty_assertions::assert_eq;
use rand::{Rng, SeedableRng, rngs::SmallRng};

const DOMAIN_TABLE: &str = include_str!("../data/roots_of_unity_4096.json");

fn test_blob(seed: u64) -> kzg::Blob {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut blob = Box::new([0u8; BYTES_PER_BLOB]);
    for element in blob.chunks_mut(BYTES_PER_FIELD_ELEMENT) {
        rng.fill(&mut element[1..]);
    }
    blob
}

#[test]
fn bundled_table_covers_the_whole_domain() {
    // when
    let domain = EvaluationDomain::from_json(DOMAIN_TABLE).unwrap();

    // then
    assert_eq!(domain.len(), FIELD_ELEMENTS_PER_BLOB);
}

#[test]
fn first_root_is_one() {
    // given
    let domain = EvaluationDomain::from_json(DOMAIN_TABLE).unwrap();

    // when
    let root = domain.point(0).unwrap();

    // then
    let mut one = [0u8; 32];
    one[31] = 1;
    assert_eq!(root, one);
}

#[test]
fn opening_at_a_table_root_yields_that_field_element() {
    // given
    let kzg = NativeKzg::default();
    let domain = EvaluationDomain::from_json(DOMAIN_TABLE).unwrap();
    let blob = test_blob(21);
    let commitment = kzg.blob_to_commitment(&blob).unwrap();

    for index in [0usize, 1, 17, FIELD_ELEMENTS_PER_BLOB - 1] {
        // when
        let z = domain.point(index).unwrap();
        let (proof, y) = kzg.compute_proof_at(&blob, &z).unwrap();

        // then
        let offset = index * BYTES_PER_FIELD_ELEMENT;
        assert_eq!(&y[..], &blob[offset..offset + BYTES_PER_FIELD_ELEMENT]);
        assert!(kzg.verify_proof(&commitment, &z, &y, &proof).unwrap());
    }
}

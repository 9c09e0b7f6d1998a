use ark_std::rand::{rngs::StdRng, SeedableRng};
use blake2::Blake2b512;
use num::BigUint;
use std::time::Instant;
use test_utils::{
    ecdsa::{keypair, sign},
    statistics::timed,
    test_serialization,
};
use zk_attest::{
    ec::scalar_mult::OpeningOrAdditionRep,
    error::Error,
    pok_ecdsa_list::{
        key_to_int, public_key_from_bytes, SignatureProofList, SystemParameters,
        TransformedEcdsaSig, ATTESTATION_SECURITY_LEVEL,
    },
};

fn key_list(first: BigUint) -> Vec<BigUint> {
    let mut keys = vec![first];
    keys.extend((4u32..=8).map(BigUint::from));
    keys
}

#[test]
fn attest_signature_by_listed_key() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = SystemParameters::generate(&mut rng, ATTESTATION_SECURITY_LEVEL);
    let key = keypair();
    let signed = sign(&key, b"kilroy was here");
    let keys = key_list(key_to_int(&signed.public_key).unwrap());

    let start = Instant::now();
    let proof = SignatureProofList::new(
        &mut rng,
        &params,
        &signed.msg_hash,
        &signed.signature,
        &signed.public_key,
        0,
        &keys,
    )
    .unwrap();
    println!(
        "Proving a signature by 1 of {} keys with {} repetitions takes {:?}",
        keys.len(),
        params.sec_level,
        start.elapsed()
    );

    let (valid, stats) = timed(3, || {
        proof
            .verify(&mut rng, &params, &signed.msg_hash, &keys)
            .unwrap()
    });
    assert!(valid);
    println!("Verifying takes {}", stats);

    test_serialization!(SignatureProofList, proof);
    test_serialization!(SystemParameters, params);

    // Changing any entry of the list makes verification fail
    for i in 0..keys.len() {
        let mut tampered = keys.clone();
        tampered[i] += 1u32;
        assert!(!proof
            .verify(&mut rng, &params, &signed.msg_hash, &tampered)
            .unwrap());
    }

    // So does moving the signer's key to another index
    let mut moved = keys.clone();
    moved.swap(0, 3);
    assert!(!proof
        .verify(&mut rng, &params, &signed.msg_hash, &moved)
        .unwrap());

    // The prover cannot claim a different index
    for index in 1..keys.len() {
        assert_eq!(
            SignatureProofList::new(
                &mut rng,
                &params,
                &signed.msg_hash,
                &signed.signature,
                &signed.public_key,
                index,
                &keys,
            ),
            Err(Error::CommitmentDoesNotOpenToValue(index))
        );
    }
    assert_eq!(
        SignatureProofList::new(
            &mut rng,
            &params,
            &signed.msg_hash,
            &signed.signature,
            &signed.public_key,
            8,
            &keys,
        ),
        Err(Error::IndexOutOfBounds(8, 8))
    );
}

#[test]
fn signature_by_unlisted_key() {
    let mut rng = StdRng::seed_from_u64(1u64);
    let params = SystemParameters::new::<Blake2b512>(b"attestation test", 8);
    let key = keypair();
    let other_key = keypair();
    let signed = sign(&key, b"kilroy was here");
    let other_signed = sign(&other_key, b"kilroy was here");
    let keys = key_list(key_to_int(&other_signed.public_key).unwrap());

    assert_eq!(
        SignatureProofList::new(
            &mut rng,
            &params,
            &signed.msg_hash,
            &signed.signature,
            &signed.public_key,
            0,
            &keys,
        ),
        Err(Error::CommitmentDoesNotOpenToValue(0))
    );

    // A signature is not transferable to another key
    assert_eq!(
        SignatureProofList::new(
            &mut rng,
            &params,
            &signed.msg_hash,
            &signed.signature,
            &other_signed.public_key,
            0,
            &keys,
        ),
        Err(Error::InvalidSignature)
    );

    // A proof for the other key's signature does not verify for a different message
    let proof = SignatureProofList::new(
        &mut rng,
        &params,
        &other_signed.msg_hash,
        &other_signed.signature,
        &other_signed.public_key,
        0,
        &keys,
    )
    .unwrap();
    assert!(proof
        .verify(&mut rng, &params, &other_signed.msg_hash, &keys)
        .unwrap());
    let different = sign(&other_key, b"kilroy was not here");
    // Only repetitions answered with a point addition depend on the message
    if proof
        .exp_proof
        .0
        .iter()
        .any(|rep| matches!(rep.response, OpeningOrAdditionRep::Addition(_)))
    {
        assert!(!proof
            .verify(&mut rng, &params, &different.msg_hash, &keys)
            .unwrap());
    }

    let public_key = public_key_from_bytes(&different.public_key).unwrap();
    let transformed =
        TransformedEcdsaSig::new(&different.signature, &different.msg_hash, &public_key).unwrap();
    assert!(transformed.verify_prehashed(&public_key).unwrap());
}

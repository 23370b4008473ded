//! tests/digest_tests.rs
//! Secret-prefixed digest containers

mod common;
use common::*;

use pbe_container::{hash, verify_hash, DigestEngine, HashAlgorithm, PbeError};
use std::io::Cursor;

fn hash_to_vec(payload: &[u8], algorithm: &str, secret: &str) -> Vec<u8> {
    let mut out = Vec::new();
    hash(Cursor::new(payload), algorithm, &password(secret))
        .unwrap()
        .save(&mut out)
        .unwrap();
    out
}

fn verify(container: &[u8], secret: &str) -> Result<bool, PbeError> {
    verify_hash(Cursor::new(container), &password(secret))?.verify()
}

#[test]
fn sha256_container_layout_and_known_answer() {
    init_tracing();
    let container = hash_to_vec(SPIKE_PAYLOAD, "SHA-256", TEST_SECRET);

    let mut expected = MARK.to_vec();
    expected.extend_from_slice(&[0x02, 0x00, 0x04, 0x20]);
    expected.extend_from_slice(
        &hex::decode("da20a2fdc0a2ba5f639264f0a9825b72f83c2586741bd5e6b768fc48fb50104a").unwrap(),
    );
    expected.extend_from_slice(SPIKE_PAYLOAD);
    assert_eq!(container, expected);
}

#[test]
fn md5_known_answer() {
    let container = hash_to_vec(SPIKE_PAYLOAD, "md5", TEST_SECRET);
    assert_eq!(&container[10..14], &[0x02, 0x00, 0x02, 0x10]);
    assert_eq!(hex::encode(&container[14..30]), "41613a826575faf39f088e86ec4dc882");
}

#[test]
fn every_hash_round_trips() {
    for &algorithm in HashAlgorithm::ALL {
        let payloads: [&[u8]; 3] = [b"", b"x", SPIKE_PAYLOAD];
        for payload in payloads {
            let container = hash_to_vec(payload, algorithm.name(), TEST_SECRET);
            assert_eq!(container.len(), 14 + algorithm.output_len() + payload.len());
            assert!(verify(&container, TEST_SECRET).unwrap(), "{algorithm}");
        }
    }
}

#[test]
fn flipped_payload_bit_fails_verification() {
    let mut container = hash_to_vec(SPIKE_PAYLOAD, "SHA-256", TEST_SECRET);
    let last = container.len() - 1;
    container[last] ^= 0x01;
    assert!(!verify(&container, TEST_SECRET).unwrap());
}

#[test]
fn flipped_digest_byte_fails_verification() {
    let mut container = hash_to_vec(SPIKE_PAYLOAD, "SHA-512", TEST_SECRET);
    container[14] ^= 0x80;
    assert!(!verify(&container, TEST_SECRET).unwrap());
}

#[test]
fn wrong_secret_fails_verification() {
    let container = hash_to_vec(SPIKE_PAYLOAD, "SHA-1", TEST_SECRET);
    assert!(!verify(&container, "Faye").unwrap());
    assert!(!verify(&container, "").unwrap());
}

#[test]
fn unicode_secret_is_accepted() {
    let container = hash_to_vec(b"data", "SHA-384", "contraseña");
    assert!(verify(&container, "contraseña").unwrap());
}

#[test]
fn payload_larger_than_one_chunk() {
    let payload = vec![0x5Au8; 150_000];
    let container = hash_to_vec(&payload, "MD2", TEST_SECRET);
    assert_eq!(&container[14 + 16..], payload.as_slice());
    assert!(verify(&container, TEST_SECRET).unwrap());
}

#[test]
fn cipher_container_is_rejected() {
    let container = encrypt_to_vec(
        b"secret",
        pbe_container::CipherAlgorithm::PbeWithMd5AndDes,
        &password(TEST_PASSWORD),
        TEST_ITERATIONS,
    );
    assert!(matches!(
        verify(&container, TEST_SECRET),
        Err(PbeError::UnexpectedOperation { .. })
    ));
}

#[test]
fn corrupt_headers_are_rejected() {
    let container = hash_to_vec(b"payload", "SHA-256", TEST_SECRET);

    let mut bad_mark = container.clone();
    bad_mark[9] = 0x01;
    assert!(matches!(verify(&bad_mark, TEST_SECRET), Err(PbeError::InvalidHeaderMark)));

    assert!(matches!(
        verify(&container[..20], TEST_SECRET),
        Err(PbeError::TruncatedData { expected: 32, actual: 6 })
    ));

    let mut bad_code = container.clone();
    bad_code[12] = 200;
    assert!(matches!(
        verify(&bad_code, TEST_SECRET),
        Err(PbeError::AlgorithmIndexOutOfRange { code: 200, .. })
    ));
}

#[test]
fn engine_reports_its_role() {
    let producer =
        DigestEngine::hash(Cursor::new(b"x"), HashAlgorithm::Md5, &password(TEST_SECRET)).unwrap();
    assert!(!producer.is_verifier());
    assert_eq!(producer.algorithm(), HashAlgorithm::Md5);
    assert!(matches!(producer.verify(), Err(PbeError::WrongMode { .. })));
}

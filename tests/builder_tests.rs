//! tests/builder_tests.rs
//! PbeBuilder finishers

mod common;
use common::*;

use pbe_container::{CipherAlgorithm, HashAlgorithm, MacAlgorithm, PbeBuilder};
use std::io::Cursor;

#[test]
fn builder_cipher_round_trip() {
    let pw = password(TEST_PASSWORD);
    let builder = PbeBuilder::new()
        .with_cipher(CipherAlgorithm::PbeWithSha1AndDesede)
        .with_iterations(TEST_ITERATIONS);

    let mut container = Vec::new();
    builder.encrypt(Cursor::new(b"built"), &pw).unwrap().save(&mut container).unwrap();
    assert_eq!(container[11], CipherAlgorithm::PbeWithSha1AndDesede.code());

    let mut plain = Vec::new();
    builder.decrypt(Cursor::new(container), &pw).unwrap().save(&mut plain).unwrap();
    assert_eq!(plain, b"built");
}

#[test]
fn builder_hash_and_mac_round_trip() {
    let secret = password(TEST_SECRET);
    let builder = PbeBuilder::default()
        .with_hash(HashAlgorithm::Sha384)
        .with_mac(MacAlgorithm::HmacMd5)
        .with_iterations(TEST_ITERATIONS);

    let mut hashed = Vec::new();
    builder.hash_stream(Cursor::new(SPIKE_PAYLOAD), &secret).unwrap().save(&mut hashed).unwrap();
    assert!(builder.verify_hash(Cursor::new(&hashed), &secret).unwrap().verify().unwrap());

    let mut macced = Vec::new();
    builder.mac_stream(Cursor::new(SPIKE_PAYLOAD), &secret).unwrap().save(&mut macced).unwrap();
    assert!(builder.verify_mac(Cursor::new(&macced), &secret).unwrap().verify().unwrap());

    // the MAC key depends on the iteration count
    let other = builder.with_iterations(TEST_ITERATIONS + 1);
    assert!(!other.verify_mac(Cursor::new(&macced), &secret).unwrap().verify().unwrap());
}

#[test]
fn builder_default_iterations_are_validated_late() {
    let builder = PbeBuilder::new().with_iterations(0);
    assert_eq!(builder.iterations(), 0);
    assert!(builder.encrypt(Cursor::new(b"x"), &password(TEST_PASSWORD)).is_err());
}

#[test]
fn builder_file_finishers() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, SPIKE_PAYLOAD).unwrap();

    let builder = PbeBuilder::new().with_iterations(TEST_ITERATIONS);
    let secret = password(TEST_SECRET);

    let macced = builder.mac_file(&input, &secret).unwrap();
    assert!(builder.verify_file(&macced, &secret).unwrap());

    let encrypted = builder.encrypt_file(&input, &secret).unwrap();
    let decrypted = builder.decrypt_file(&encrypted, &secret).unwrap();
    assert_eq!(std::fs::read(decrypted).unwrap(), SPIKE_PAYLOAD);
}

// Path: crates/crypto/src/sign/mod.rs

pub mod k1;

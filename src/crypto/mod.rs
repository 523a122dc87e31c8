//! # Cryptography Module
//!
//! Primitive providers and side-channel-safe helpers used by the envelope
//! layer. Nothing in here knows about blob layouts.
//!
//! ## Security Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CRYPTOGRAPHIC BUILDING BLOCKS                        │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐         │
//! │  │  ed25519        │  │  hash           │  │  kdf            │         │
//! │  │                 │  │                 │  │                 │         │
//! │  │ • keypair       │  │ • SHA-512       │  │ • scrypt        │         │
//! │  │ • sign          │  │ • key check     │  │ • KdfCost       │         │
//! │  │ • verify        │  │   (8 bytes)     │  │ • Protection    │         │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘         │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐         │
//! │  │  random         │  │  secret         │  │  util           │         │
//! │  │                 │  │                 │  │                 │         │
//! │  │ • OsRng         │  │ • raw key       │  │ • ct_eq         │         │
//! │  │ • retry with    │  │ • keystream     │  │ • wipe          │         │
//! │  │   backoff       │  │ • wipe on drop  │  │ • le32 codec    │         │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Choices & Rationale
//!
//! | Algorithm | Purpose | Why Chosen |
//! |-----------|---------|------------|
//! | Ed25519 | Signing | Fast, small keys, widely audited |
//! | SHA-512 | Key check, message digest | 64-byte output matches the signed payload |
//! | scrypt | Password KDF | Memory-hard, tunable cost |
//!
//! ## Security Considerations
//!
//! 1. **Key Zeroization**: Raw keys and keystreams are zeroized when dropped
//! 2. **Constant-Time Operations**: Digest and fingerprint checks use `subtle`
//! 3. **Secure Random**: Using `rand::rngs::OsRng` for salts, fingerprints and seeds

pub mod ed25519;
pub mod hash;
pub mod kdf;
pub mod random;
pub mod secret;
pub mod util;

pub use kdf::{KdfCost, Protection, MAX_MEMORY_BYTES, SALT_SIZE};
pub use secret::{Keystream, SecretKeyBytes, RAW_SECRET_KEY_SIZE};
pub use util::{ct_eq, le32_decode, le32_encode, wipe};

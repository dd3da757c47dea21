//! Cryptographic Utilities

use rand::{RngCore, rngs::OsRng};

/// Fill `len` bytes from the operating system CSPRNG.
///
/// Unlike `RngCore::fill_bytes` this reports entropy failure instead of panicking,
/// so startup code can decide how to abort.
pub fn try_random_bytes(len: usize) -> Result<Vec<u8>, rand::Error> {
    let mut bytes = vec![0u8; len];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(bytes)
}

//! Machine-derived salt
//!
//! The salt is a 64-bit FNV-1a hash of a 3-byte machine identity. The identity
//! is read from the platform machine id, then the hostname, and only when
//! neither is available is it random. A random identity means external ids are
//! stable for the process lifetime only.

use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use std::fs;

const MACHINE_ID_PATHS: &[&str] = &["/etc/machine-id", "/sys/class/dmi/id/product_uuid"];

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

static SALT: Lazy<u64> = Lazy::new(|| {
    let salt = fnv1a_64(&machine_id());
    tracing::debug!(salt, "resource id salt initialized");
    salt
});

/// Process-wide salt, computed on first use
pub fn salt() -> u64 {
    *SALT
}

/// Three bytes identifying this machine
pub fn machine_id() -> [u8; 3] {
    match platform_identity() {
        Some(identity) => digest_identity(&identity),
        None => {
            tracing::warn!("no machine id or hostname available, using a random resource id salt");
            rand::random::<[u8; 3]>()
        }
    }
}

fn platform_identity() -> Option<String> {
    MACHINE_ID_PATHS
        .iter()
        .filter_map(|path| fs::read_to_string(path).ok())
        .map(|content| content.trim().to_string())
        .find(|content| !content.is_empty())
        .or_else(|| {
            hostname::get()
                .ok()
                .map(|name| name.to_string_lossy().into_owned())
                .filter(|name| !name.is_empty())
        })
}

fn digest_identity(identity: &str) -> [u8; 3] {
    let digest = Sha256::digest(identity.as_bytes());
    [digest[0], digest[1], digest[2]]
}

pub(crate) fn fnv1a_64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

//! Credential generation.
//!
//! Produces one fresh value per credential slot the stack's configuration
//! expects, ready to paste into the live configuration file. Nothing is
//! written anywhere; persisting the values is the operator's job.

use std::fmt;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{CryptoRng, RngCore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    /// URL-safe base64 without padding.
    Base64,
    /// Lowercase hex. Safe inside connection URLs and shell quoting.
    Hex,
}

/// A configuration key and how much randomness its value carries.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub key: &'static str,
    bytes: usize,
    encoding: Encoding,
}

pub const SLOTS: [Slot; 5] = [
    Slot {
        key: "N8N_ENCRYPTION_KEY",
        bytes: 32,
        encoding: Encoding::Base64,
    },
    Slot {
        key: "N8N_USER_MANAGEMENT_JWT_SECRET",
        bytes: 32,
        encoding: Encoding::Base64,
    },
    Slot {
        key: "POSTGRES_PASSWORD",
        bytes: 16,
        encoding: Encoding::Hex,
    },
    Slot {
        key: "REDIS_PASSWORD",
        bytes: 16,
        encoding: Encoding::Hex,
    },
    Slot {
        key: "N8N_BASIC_AUTH_PASSWORD",
        bytes: 16,
        encoding: Encoding::Hex,
    },
];

/// A generated credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret {
    pub key: &'static str,
    pub value: String,
}

impl fmt::Display for Secret {
    /// Renders as a `KEY=value` configuration line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Generate a value for every slot, each drawn independently from `rng`.
pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Vec<Secret>, rand::Error> {
    SLOTS
        .iter()
        .map(|slot| {
            let mut bytes = vec![0u8; slot.bytes];
            rng.try_fill_bytes(&mut bytes)?;
            let value = match slot.encoding {
                Encoding::Base64 => URL_SAFE_NO_PAD.encode(&bytes),
                Encoding::Hex => hex::encode(&bytes),
            };
            Ok(Secret {
                key: slot.key,
                value,
            })
        })
        .collect()
}

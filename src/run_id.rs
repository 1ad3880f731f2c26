// src/run_id.rs

//! Short human-facing identifiers for individual runs ("build ids").
//!
//! Uniqueness is probabilistic only: 36^5 possible values, no collision
//! detection.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

pub const RUN_ID_LEN: usize = 5;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A five-character token from `A-Z0-9`.
///
/// Rendered (and persisted) with single spaces between characters, e.g.
/// `"Q 7 K 2 M"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId([u8; RUN_ID_LEN]);

impl RunId {
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut chars = [0u8; RUN_ID_LEN];
        for c in chars.iter_mut() {
            *c = ALPHABET[rng.gen_range(0..ALPHABET.len())];
        }
        RunId(chars)
    }

    /// The token without separators, e.g. `"Q7K2M"`.
    pub fn compact(&self) -> String {
        self.0.iter().map(|&b| b as char).collect()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl FromStr for RunId {
    type Err = String;

    /// Accepts the rendered form (`"A B C D E"`) as well as the compact one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<u8> = s
            .trim()
            .bytes()
            .filter(|b| *b != b' ')
            .collect();

        let chars: [u8; RUN_ID_LEN] = chars
            .try_into()
            .map_err(|v: Vec<u8>| format!("run id must have {RUN_ID_LEN} characters, got {}", v.len()))?;

        if let Some(&bad) = chars.iter().find(|&&b| !ALPHABET.contains(&b)) {
            return Err(format!("invalid run id character {:?}", bad as char));
        }

        Ok(RunId(chars))
    }
}

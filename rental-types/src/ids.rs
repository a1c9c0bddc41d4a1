//! Identity types for EquipRent.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypesError;

/// Identifier of a lead record held by the lead backend.
///
/// Opaque to the client: whatever string the backend returns from a
/// create call is stored and echoed back on updates.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(String);

impl LeadId {
    /// Create a LeadId, rejecting empty or whitespace-only values.
    pub fn new(id: impl Into<String>) -> Result<Self, TypesError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TypesError::EmptyLeadId);
        }
        Ok(Self(id))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LeadId({})", self.0)
    }
}

impl std::str::FromStr for LeadId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Alphabet for the random part of a request id.
const REQUEST_ID_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz@#$^&*";

/// Number of random characters in a request id.
const REQUEST_ID_RANDOM_LEN: usize = 119;

/// Size of each random chunk interleaved with a timestamp digit.
const REQUEST_ID_CHUNK: usize = 6;

/// Per-request correlation id sent as `x-request-signature-id`.
///
/// Random chunks of six characters alternate with the digits of the
/// reversed millisecond timestamp, so ids are unique per call and the
/// server can still recover when a request was issued.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh request id for the current instant.
    pub fn generate() -> Self {
        Self::generate_at(chrono::Utc::now().timestamp_millis())
    }

    /// Generate a request id for a given millisecond timestamp.
    pub fn generate_at(timestamp_millis: i64) -> Self {
        let random = random_chars(REQUEST_ID_RANDOM_LEN);
        let digits: Vec<char> = timestamp_millis.to_string().chars().rev().collect();
        let chunks: Vec<&[u8]> = random.chunks(REQUEST_ID_CHUNK).collect();

        let mut mixed = String::with_capacity(random.len() + digits.len());
        for i in 0..digits.len().max(chunks.len()) {
            if let Some(chunk) = chunks.get(i) {
                mixed.extend(chunk.iter().map(|&b| b as char));
            }
            if let Some(digit) = digits.get(i) {
                mixed.push(*digit);
            }
        }
        Self(mixed)
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestId({}..)", &self.0[..self.0.len().min(8)])
    }
}

/// Draw `len` characters uniformly from the request id alphabet.
fn random_chars(len: usize) -> Vec<u8> {
    // Bytes at or above the largest multiple of the alphabet size are skipped.
    let limit = (u8::MAX as usize / REQUEST_ID_ALPHABET.len()) * REQUEST_ID_ALPHABET.len();
    let mut out = Vec::with_capacity(len);
    let mut buf = [0u8; 64];
    while out.len() < len {
        getrandom::getrandom(&mut buf).expect("getrandom failed");
        for &b in buf.iter() {
            if (b as usize) < limit {
                out.push(REQUEST_ID_ALPHABET[b as usize % REQUEST_ID_ALPHABET.len()]);
                if out.len() == len {
                    break;
                }
            }
        }
    }
    out
}

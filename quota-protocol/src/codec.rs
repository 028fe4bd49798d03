//! Traits for encoding and decoding Kafka protocol message bodies

use anyhow::Result;
use bytes::{Buf, BufMut};

/// A type that can be encoded into a buffer.
///
/// Encoding fails only when a value cannot be represented on the wire, such
/// as a string longer than an INT16 length prefix allows.
pub trait Encodable {
    /// Encode a value into a buffer.
    fn encode(&self, buf: &mut impl BufMut) -> Result<()>;
}

/// A type that can be decoded from a buffer.
///
/// Wire-format failures are reported as [`quota_common::Error`] values
/// wrapped in `anyhow::Error`; callers that need to branch on them can use
/// `downcast_ref`.
pub trait Decodable: Sized {
    /// Decode a value from a buffer, consuming exactly the bytes it occupies.
    fn decode(buf: &mut impl Buf) -> Result<Self>;
}

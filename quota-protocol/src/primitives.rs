//! Primitive types used in the Kafka protocol

use anyhow::Result;
use bytes::{Buf, BufMut};
use quota_common::Error;
use serde::Serialize;

use crate::codec::{Decodable, Encodable};

/// Largest array count accepted on decode.
pub const MAX_ARRAY_COUNT: i32 = 2 * u16::MAX as i32;

/// Fails with [`Error::Truncated`] unless `buf` holds at least `needed` bytes.
pub fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<()> {
    let remaining = buf.remaining();
    if remaining < needed {
        return Err(Error::Truncated { needed, remaining }.into());
    }
    Ok(())
}

// --- Array length helpers ---

/// Writes the INT32 element count that prefixes every ARRAY.
pub fn encode_array_len(len: usize, buf: &mut impl BufMut) -> Result<()> {
    let len = i32::try_from(len).map_err(|_| Error::TooManyElements(len))?;
    len.encode(buf)
}

/// Reads an ARRAY element count.
///
/// A count of -1 is the null array and yields zero. Every element occupies
/// at least one byte, so a count larger than the remaining input is reported
/// as truncation before any element is read.
pub fn decode_array_len(buf: &mut impl Buf) -> Result<usize> {
    let count = i32::decode(buf)?;
    if count == -1 {
        return Ok(0);
    }
    if !(0..=MAX_ARRAY_COUNT).contains(&count) {
        return Err(Error::InvalidCount(count).into());
    }
    let count = count as usize;
    ensure_remaining(buf, count)?;
    Ok(count)
}

fn encode_str(s: &str, buf: &mut impl BufMut) -> Result<()> {
    let len = i16::try_from(s.len()).map_err(|_| Error::StringTooLong(s.len()))?;
    len.encode(buf)?;
    buf.put_slice(s.as_bytes());
    Ok(())
}

fn decode_str(len: usize, buf: &mut impl Buf) -> Result<String> {
    ensure_remaining(buf, len)?;
    let mut bytes = vec![0; len];
    buf.copy_to_slice(&mut bytes);
    Ok(String::from_utf8(bytes).map_err(Error::from)?)
}

// --- KafkaString ---

/// STRING: INT16 length followed by UTF-8 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct KafkaString(pub String);

impl Encodable for KafkaString {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        encode_str(&self.0, buf)
    }
}

impl Decodable for KafkaString {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        let len = i16::decode(buf)?;
        // A null sentinel in a non-nullable slot reads as empty.
        if len == -1 {
            return Ok(KafkaString(String::new()));
        }
        if len < 0 {
            return Err(Error::InvalidLength(len).into());
        }
        Ok(KafkaString(decode_str(len as usize, buf)?))
    }
}

impl From<&str> for KafkaString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for KafkaString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl KafkaString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

// --- NullableString ---

/// NULLABLE_STRING: like [`KafkaString`], with length -1 meaning absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct NullableString(pub Option<String>);

impl Encodable for NullableString {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        match &self.0 {
            Some(s) => encode_str(s, buf),
            None => (-1i16).encode(buf),
        }
    }
}

impl Decodable for NullableString {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        let len = i16::decode(buf)?;
        if len == -1 {
            return Ok(NullableString(None));
        }
        if len < 0 {
            return Err(Error::InvalidLength(len).into());
        }
        Ok(NullableString(Some(decode_str(len as usize, buf)?)))
    }
}

impl From<Option<String>> for NullableString {
    fn from(s: Option<String>) -> Self {
        Self(s)
    }
}

impl From<Option<&str>> for NullableString {
    fn from(s: Option<&str>) -> Self {
        Self(s.map(str::to_string))
    }
}

impl NullableString {
    pub fn null() -> Self {
        Self(None)
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }
}

// --- KafkaArray ---

/// ARRAY: INT32 count followed by that many elements.
///
/// Decoding a zero or null count yields an empty vector, never an absent one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct KafkaArray<T>(pub Vec<T>);

impl<T: Encodable> Encodable for KafkaArray<T> {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        encode_array_len(self.0.len(), buf)?;
        for item in &self.0 {
            item.encode(buf)?;
        }
        Ok(())
    }
}

impl<T: Decodable> Decodable for KafkaArray<T> {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        let len = decode_array_len(buf)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(T::decode(buf)?);
        }
        Ok(KafkaArray(items))
    }
}

impl<T> From<Vec<T>> for KafkaArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T> KafkaArray<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
}

// --- KafkaBool ---

/// BOOLEAN: one byte, zero is false and anything else is true.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct KafkaBool(pub bool);

impl Encodable for KafkaBool {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        (self.0 as i8).encode(buf)
    }
}

impl Decodable for KafkaBool {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        Ok(KafkaBool(i8::decode(buf)? != 0))
    }
}

impl From<bool> for KafkaBool {
    fn from(b: bool) -> Self {
        Self(b)
    }
}

// --- Fixed-width numbers ---

macro_rules! impl_codec_for_number {
    ($($t:ty),*) => {
        $(
            impl Encodable for $t {
                fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
                    buf.put_slice(&self.to_be_bytes());
                    Ok(())
                }
            }

            impl Decodable for $t {
                fn decode(buf: &mut impl Buf) -> Result<Self> {
                    let mut bytes = [0u8; std::mem::size_of::<$t>()];
                    ensure_remaining(buf, bytes.len())?;
                    buf.copy_to_slice(&mut bytes);
                    Ok(<$t>::from_be_bytes(bytes))
                }
            }
        )*
    };
}

impl_codec_for_number!(i8, i16, i32, i64, f64);

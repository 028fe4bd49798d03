//! DescribeClientQuotas Response (v0)
//!
//! ```text
//! DescribeClientQuotas Response (Version: 0) => throttle_time_ms error_code error_message [entries]
//!   throttle_time_ms => INT32
//!   error_code => INT16
//!   error_message => NULLABLE_STRING
//!   entries => [entity] [values]
//!     entity => entity_type entity_name
//!       entity_type => STRING
//!       entity_name => NULLABLE_STRING
//!     values => key value
//!       key => STRING
//!       value => FLOAT64
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::Result;
use bytes::{Buf, BufMut};
use serde::Serialize;
use tracing::debug;

use crate::api_keys::ApiKey;
use crate::codec::{Decodable, Encodable};
use crate::entity::QuotaEntity;
use crate::error_codes::ErrorResult;
use crate::primitives::{decode_array_len, encode_array_len, KafkaArray, KafkaString};
use crate::throttle;
use crate::version::{KafkaVersion, ProtocolBody};

/// Quota key for the producer byte-rate limit.
pub const PRODUCER_BYTE_RATE: &str = "producer_byte_rate";
/// Quota key for the consumer byte-rate limit.
pub const CONSUMER_BYTE_RATE: &str = "consumer_byte_rate";
/// Quota key for the request-time percentage limit.
pub const REQUEST_PERCENTAGE: &str = "request_percentage";
/// Quota key for the connection-creation rate limit.
pub const CONNECTION_CREATION_RATE: &str = "connection_creation_rate";

/// Quota values keyed by quota name, encoded as `[key(STRING) value(FLOAT64)]`
/// in key order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct QuotaValues(pub BTreeMap<String, f64>);

impl QuotaValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for QuotaValues {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Encodable for QuotaValues {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        encode_array_len(self.0.len(), buf)?;
        for (key, value) in &self.0 {
            KafkaString::from(key.as_str()).encode(buf)?;
            value.encode(buf)?;
        }
        Ok(())
    }
}

impl Decodable for QuotaValues {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        let count = decode_array_len(buf)?;
        let mut values = BTreeMap::new();
        for _ in 0..count {
            let key = KafkaString::decode(buf)?;
            let value = f64::decode(buf)?;
            values.insert(key.0, value);
        }
        Ok(Self(values))
    }
}

/// The quotas currently configured for one entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DescribeClientQuotasEntry {
    /// The quota entity description.
    pub entity: QuotaEntity,
    /// The quota values for the entity.
    pub values: QuotaValues,
}

impl Encodable for DescribeClientQuotasEntry {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        self.entity.encode(buf)?;
        self.values.encode(buf)
    }
}

impl Decodable for DescribeClientQuotasEntry {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        let entity = QuotaEntity::decode(buf)?;
        let values = QuotaValues::decode(buf)?;
        Ok(Self { entity, values })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DescribeClientQuotasResponse {
    /// The duration for which the request was throttled due to a quota
    /// violation, or zero if the request did not violate any quota.
    #[serde(rename = "throttle_time_ms", serialize_with = "throttle::serialize_millis")]
    pub throttle_time: Duration,
    /// The top-level error, or code 0 if the quota description succeeded.
    #[serde(flatten)]
    pub error: ErrorResult,
    /// A result entry per matching entity.
    pub entries: KafkaArray<DescribeClientQuotasEntry>,
}

impl Encodable for DescribeClientQuotasResponse {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        throttle::encode(self.throttle_time, buf)?;
        self.error.encode(buf)?;
        self.entries.encode(buf)
    }
}

impl Decodable for DescribeClientQuotasResponse {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        let throttle_time = throttle::decode(buf)?;
        let error = ErrorResult::decode(buf)?;
        let entries = KafkaArray::<DescribeClientQuotasEntry>::decode(buf)?;
        debug!(
            "Decoded DescribeClientQuotas response: error_code={}, {} entries",
            error.error_code,
            entries.len()
        );
        Ok(Self {
            throttle_time,
            error,
            entries,
        })
    }
}

impl ProtocolBody for DescribeClientQuotasResponse {
    const API_KEY: ApiKey = ApiKey::DescribeClientQuotas;
    const API_VERSION: i16 = 0;
    const HEADER_VERSION: i16 = 0;
    const REQUIRED_VERSION: KafkaVersion = KafkaVersion::V2_6_0_0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{CLIENT_ID, USER};
    use crate::error_codes::ErrorCode;
    use crate::primitives::NullableString;
    use bytes::BytesMut;

    const MILLION: [u8; 8] = [65, 46, 132, 128, 0, 0, 0, 0];

    fn encode(res: &DescribeClientQuotasResponse) -> Vec<u8> {
        let mut buf = BytesMut::new();
        res.encode(&mut buf).unwrap();
        buf.to_vec()
    }

    fn roundtrip(res: &DescribeClientQuotasResponse) {
        let bytes = encode(res);
        let mut read = &bytes[..];
        let decoded = DescribeClientQuotasResponse::decode(&mut read).unwrap();
        assert!(read.is_empty());
        assert_eq!(&decoded, res);
    }

    #[test]
    fn test_response_with_error() {
        let res = DescribeClientQuotasResponse {
            throttle_time: Duration::ZERO,
            error: ErrorResult::new(
                ErrorCode::UnsupportedVersion,
                "Custom entity type 'faulty' not supported",
            ),
            entries: KafkaArray(vec![]),
        };
        let mut expected = vec![
            0, 0, 0, 0, // throttle time
            0, 35, // error code
            0, 41, // error message length
        ];
        expected.extend_from_slice(b"Custom entity type 'faulty' not supported");
        expected.extend_from_slice(&[0, 0, 0, 0]); // entries
        assert_eq!(encode(&res), expected);
        roundtrip(&res);
    }

    #[test]
    fn test_single_value() {
        let res = DescribeClientQuotasResponse {
            throttle_time: Duration::ZERO,
            error: ErrorResult::none(),
            entries: KafkaArray(vec![DescribeClientQuotasEntry {
                entity: QuotaEntity::new().with_default(USER),
                values: QuotaValues::new().with(PRODUCER_BYTE_RATE, 1_000_000.0),
            }]),
        };
        let mut expected = vec![
            0, 0, 0, 0, // throttle time
            0, 0, // error code
            0xff, 0xff, // error message (null)
            0, 0, 0, 1, // entries
            0, 0, 0, 1, // entity
            0, 4, b'u', b's', b'e', b'r', // entity type
            0xff, 0xff, // entity name (null)
            0, 0, 0, 1, // values
            0, 18,
        ];
        expected.extend_from_slice(b"producer_byte_rate");
        expected.extend_from_slice(&MILLION);
        assert_eq!(encode(&res), expected);
        roundtrip(&res);
    }

    #[test]
    fn test_multi_value_is_key_ordered() {
        let res = DescribeClientQuotasResponse {
            entries: KafkaArray(vec![DescribeClientQuotasEntry {
                entity: QuotaEntity::new().with_default(USER),
                values: QuotaValues::new()
                    .with(PRODUCER_BYTE_RATE, 1_000_000.0)
                    .with(CONSUMER_BYTE_RATE, 1_000_000.0),
            }]),
            ..Default::default()
        };
        let mut expected = vec![
            0, 0, 0, 0, 0, 0, 0xff, 0xff, // throttle, error
            0, 0, 0, 1, // entries
            0, 0, 0, 1, 0, 4, b'u', b's', b'e', b'r', 0xff, 0xff, // entity
            0, 0, 0, 2, // values
            0, 18,
        ];
        expected.extend_from_slice(b"consumer_byte_rate");
        expected.extend_from_slice(&MILLION);
        expected.extend_from_slice(&[0, 18]);
        expected.extend_from_slice(b"producer_byte_rate");
        expected.extend_from_slice(&MILLION);
        assert_eq!(encode(&res), expected);
        roundtrip(&res);
    }

    #[test]
    fn test_complex_entity() {
        let res = DescribeClientQuotasResponse {
            entries: KafkaArray(vec![
                DescribeClientQuotasEntry {
                    entity: QuotaEntity::new().with_default(USER),
                    values: QuotaValues::new().with(PRODUCER_BYTE_RATE, 1_000_000.0),
                },
                DescribeClientQuotasEntry {
                    entity: QuotaEntity::new().with_name(CLIENT_ID, "reader"),
                    values: QuotaValues::new().with(CONSUMER_BYTE_RATE, 1_000_000.0),
                },
            ]),
            ..Default::default()
        };
        let bytes = encode(&res);
        let second_entity = [
            0, 0, 0, 1, // entity
            0, 9, b'c', b'l', b'i', b'e', b'n', b't', b'-', b'i', b'd', // entity type
            0, 6, b'r', b'e', b'a', b'd', b'e', b'r', // entity name
        ];
        assert!(bytes
            .windows(second_entity.len())
            .any(|w| w == second_entity));
        assert_eq!(&bytes[8..12], &[0, 0, 0, 2]);
        roundtrip(&res);
    }

    #[test]
    fn test_empty_and_absent_messages_stay_distinct() {
        let absent = DescribeClientQuotasResponse::default();
        let empty = DescribeClientQuotasResponse {
            error: ErrorResult {
                error_code: 0,
                error_message: NullableString(Some(String::new())),
            },
            ..Default::default()
        };
        assert_eq!(&encode(&absent)[6..8], &[0xff, 0xff]);
        assert_eq!(&encode(&empty)[6..8], &[0, 0]);
        roundtrip(&absent);
        roundtrip(&empty);
    }

    #[test]
    fn test_zero_counts_decode_empty() {
        let bytes = [
            0, 0, 0, 7, // throttle time
            0, 0, 0xff, 0xff, // error
            0, 0, 0, 1, // entries
            0, 0, 0, 0, // entity
            0, 0, 0, 0, // values
        ];
        let res = DescribeClientQuotasResponse::decode(&mut &bytes[..]).unwrap();
        assert_eq!(res.throttle_time, Duration::from_millis(7));
        assert_eq!(res.entries.len(), 1);
        assert!(res.entries.0[0].entity.is_empty());
        assert!(res.entries.0[0].values.is_empty());
    }

    #[test]
    fn test_error_code_is_data() {
        let bytes = [0, 0, 0, 0, 0, 42, 0xff, 0xff, 0, 0, 0, 0];
        let res = DescribeClientQuotasResponse::decode(&mut &bytes[..]).unwrap();
        assert!(res.error.is_error());
        assert_eq!(res.error.kind(), Some(ErrorCode::InvalidRequest));
    }

    #[test]
    fn test_truncated_value_fails() {
        let res = DescribeClientQuotasResponse {
            entries: KafkaArray(vec![DescribeClientQuotasEntry {
                entity: QuotaEntity::new().with_default(USER),
                values: QuotaValues::new().with(PRODUCER_BYTE_RATE, 1024.0),
            }]),
            ..Default::default()
        };
        let bytes = encode(&res);
        let err = DescribeClientQuotasResponse::decode(&mut &bytes[..bytes.len() - 1]).unwrap_err();
        assert!(err
            .downcast_ref::<quota_common::Error>()
            .unwrap()
            .is_truncation());
    }
}

//! AlterClientQuotas Response (v0)
//!
//! ```text
//! AlterClientQuotas Response (Version: 0) => throttle_time_ms [entries]
//!   throttle_time_ms => INT32
//!   entries => error_code error_message [entity]
//!     error_code => INT16
//!     error_message => NULLABLE_STRING
//!     entity => entity_type entity_name
//!       entity_type => STRING
//!       entity_name => NULLABLE_STRING
//! ```

use std::time::Duration;

use anyhow::Result;
use bytes::{Buf, BufMut};
use serde::Serialize;
use tracing::debug;

use crate::api_keys::ApiKey;
use crate::codec::{Decodable, Encodable};
use crate::entity::QuotaEntity;
use crate::error_codes::ErrorResult;
use crate::primitives::KafkaArray;
use crate::throttle;
use crate::version::{KafkaVersion, ProtocolBody};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlterClientQuotasResponse {
    /// The duration for which the request was throttled due to a quota
    /// violation, or zero if the request did not violate any quota.
    #[serde(rename = "throttle_time_ms", serialize_with = "throttle::serialize_millis")]
    pub throttle_time: Duration,
    /// The quota configuration entries altered.
    pub entries: KafkaArray<AlterClientQuotasEntryResponse>,
}

/// The outcome of altering one entity's quotas.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlterClientQuotasEntryResponse {
    /// The error, or code 0 if the quota alteration succeeded.
    #[serde(flatten)]
    pub error: ErrorResult,
    /// The quota entity altered.
    pub entity: QuotaEntity,
}

impl AlterClientQuotasEntryResponse {
    pub fn success(entity: QuotaEntity) -> Self {
        Self {
            error: ErrorResult::none(),
            entity,
        }
    }

    pub fn failure(entity: QuotaEntity, error: ErrorResult) -> Self {
        Self { error, entity }
    }
}

impl AlterClientQuotasResponse {
    /// Entries whose alteration the broker rejected.
    pub fn failures(&self) -> impl Iterator<Item = &AlterClientQuotasEntryResponse> {
        self.entries.iter().filter(|e| e.error.is_error())
    }
}

impl Encodable for AlterClientQuotasEntryResponse {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        self.error.encode(buf)?;
        self.entity.encode(buf)
    }
}

impl Decodable for AlterClientQuotasEntryResponse {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        let error = ErrorResult::decode(buf)?;
        let entity = QuotaEntity::decode(buf)?;
        Ok(Self { error, entity })
    }
}

impl Encodable for AlterClientQuotasResponse {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        throttle::encode(self.throttle_time, buf)?;
        self.entries.encode(buf)
    }
}

impl Decodable for AlterClientQuotasResponse {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        let throttle_time = throttle::decode(buf)?;
        let entries = KafkaArray::<AlterClientQuotasEntryResponse>::decode(buf)?;
        debug!(
            "Decoded AlterClientQuotas response: {} entries, throttled {:?}",
            entries.len(),
            throttle_time
        );
        Ok(Self {
            throttle_time,
            entries,
        })
    }
}

impl ProtocolBody for AlterClientQuotasResponse {
    const API_KEY: ApiKey = ApiKey::AlterClientQuotas;
    const API_VERSION: i16 = 0;
    const HEADER_VERSION: i16 = 0;
    const REQUIRED_VERSION: KafkaVersion = KafkaVersion::V2_6_0_0;
}

//! AlterClientQuotas Request (v0)
//!
//! ```text
//! AlterClientQuotas Request (Version: 0) => [entries] validate_only
//!   entries => [entity] [ops]
//!     entity => entity_type entity_name
//!       entity_type => STRING
//!       entity_name => NULLABLE_STRING
//!     ops => key value remove
//!       key => STRING
//!       value => FLOAT64
//!       remove => BOOLEAN
//!   validate_only => BOOLEAN
//! ```

use anyhow::Result;
use bytes::{Buf, BufMut};
use serde::Serialize;

use crate::api_keys::ApiKey;
use crate::codec::{Decodable, Encodable};
use crate::entity::QuotaEntity;
use crate::primitives::{KafkaArray, KafkaBool, KafkaString};
use crate::version::{KafkaVersion, ProtocolBody};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterClientQuotasRequest {
    /// The quota configuration entries to alter.
    pub entries: KafkaArray<AlterClientQuotasEntry>,
    /// Whether the alteration should be validated, but not performed.
    pub validate_only: KafkaBool,
}

/// The alterations to apply to one entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterClientQuotasEntry {
    /// The quota entity to alter.
    pub entity: QuotaEntity,
    /// An individual quota configuration entry to alter.
    pub ops: KafkaArray<QuotaOperation>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QuotaOperation {
    /// The quota configuration key.
    pub key: KafkaString,
    /// The value to set, ignored when `remove` is true.
    pub value: f64,
    /// Whether the quota configuration value should be removed instead of set.
    pub remove: KafkaBool,
}

impl QuotaOperation {
    pub fn set(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: KafkaString(key.into()),
            value,
            remove: KafkaBool(false),
        }
    }

    pub fn remove(key: impl Into<String>) -> Self {
        Self {
            key: KafkaString(key.into()),
            value: 0.0,
            remove: KafkaBool(true),
        }
    }
}

impl AlterClientQuotasEntry {
    pub fn new(entity: QuotaEntity, ops: Vec<QuotaOperation>) -> Self {
        Self {
            entity,
            ops: KafkaArray(ops),
        }
    }
}

impl AlterClientQuotasRequest {
    pub fn new(entries: Vec<AlterClientQuotasEntry>, validate_only: bool) -> Self {
        Self {
            entries: KafkaArray(entries),
            validate_only: KafkaBool(validate_only),
        }
    }
}

impl Encodable for QuotaOperation {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        self.key.encode(buf)?;
        self.value.encode(buf)?;
        self.remove.encode(buf)
    }
}

impl Decodable for QuotaOperation {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        let key = KafkaString::decode(buf)?;
        let value = f64::decode(buf)?;
        let remove = KafkaBool::decode(buf)?;
        Ok(Self { key, value, remove })
    }
}

impl Encodable for AlterClientQuotasEntry {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        self.entity.encode(buf)?;
        self.ops.encode(buf)
    }
}

impl Decodable for AlterClientQuotasEntry {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        let entity = QuotaEntity::decode(buf)?;
        let ops = KafkaArray::<QuotaOperation>::decode(buf)?;
        Ok(Self { entity, ops })
    }
}

impl Encodable for AlterClientQuotasRequest {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        self.entries.encode(buf)?;
        self.validate_only.encode(buf)
    }
}

impl Decodable for AlterClientQuotasRequest {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        let entries = KafkaArray::<AlterClientQuotasEntry>::decode(buf)?;
        let validate_only = KafkaBool::decode(buf)?;
        Ok(Self {
            entries,
            validate_only,
        })
    }
}

impl ProtocolBody for AlterClientQuotasRequest {
    const API_KEY: ApiKey = ApiKey::AlterClientQuotas;
    const API_VERSION: i16 = 0;
    const HEADER_VERSION: i16 = 1;
    const REQUIRED_VERSION: KafkaVersion = KafkaVersion::V2_6_0_0;
}

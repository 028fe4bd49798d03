//! DescribeClientQuotas Request (v0)
//!
//! ```text
//! DescribeClientQuotas Request (Version: 0) => [components] strict
//!   components => entity_type match_type match
//!     entity_type => STRING
//!     match_type => INT8
//!     match => NULLABLE_STRING
//!   strict => BOOLEAN
//! ```

use anyhow::Result;
use bytes::{Buf, BufMut};
use serde::Serialize;
use tracing::trace;

use crate::api_keys::ApiKey;
use crate::codec::{Decodable, Encodable};
use crate::primitives::{KafkaArray, KafkaBool, KafkaString, NullableString};
use crate::version::{KafkaVersion, ProtocolBody};

/// `match_type` for a component that names one entity exactly.
pub const MATCH_TYPE_EXACT: i8 = 0;
/// `match_type` for a component that selects the default entity.
pub const MATCH_TYPE_DEFAULT: i8 = 1;
/// `match_type` for a component that selects every named entity.
pub const MATCH_TYPE_ANY: i8 = 2;

/// Derives the wire `match_type` from a component's match string.
///
/// Absent matches any name, empty matches the default name, anything else
/// matches that name exactly.
pub fn derive_match_type(match_name: Option<&str>) -> i8 {
    match match_name {
        None => MATCH_TYPE_ANY,
        Some("") => MATCH_TYPE_DEFAULT,
        Some(_) => MATCH_TYPE_EXACT,
    }
}

/// A filter to be applied to matching client quotas.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DescribeClientQuotasRequest {
    /// The components to filter on.
    pub components: KafkaArray<DescribeClientQuotasComponent>,
    /// Whether the match is strict, i.e. entities with unspecified entity
    /// types are excluded.
    pub strict: KafkaBool,
}

/// A single filter component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct DescribeClientQuotasComponent {
    /// The entity type the filter component applies to, e.g. "user".
    pub entity_type: KafkaString,
    /// Absent matches any name, empty matches the default name, otherwise
    /// the name matched exactly.
    pub match_name: NullableString,
}

impl DescribeClientQuotasComponent {
    /// Matches exactly the entity called `name`.
    pub fn exact(entity_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            entity_type: KafkaString(entity_type.into()),
            match_name: NullableString(Some(name.into())),
        }
    }

    /// Matches only the default entity of `entity_type`.
    pub fn default_entity(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: KafkaString(entity_type.into()),
            match_name: NullableString(Some(String::new())),
        }
    }

    /// Matches every named entity of `entity_type`.
    pub fn any(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: KafkaString(entity_type.into()),
            match_name: NullableString(None),
        }
    }

    pub fn match_type(&self) -> i8 {
        derive_match_type(self.match_name.as_deref())
    }
}

impl DescribeClientQuotasRequest {
    pub fn new(components: Vec<DescribeClientQuotasComponent>, strict: bool) -> Self {
        Self {
            components: KafkaArray(components),
            strict: KafkaBool(strict),
        }
    }
}

impl Encodable for DescribeClientQuotasComponent {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        self.entity_type.encode(buf)?;
        self.match_type().encode(buf)?;
        self.match_name.encode(buf)
    }
}

impl Decodable for DescribeClientQuotasComponent {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        let entity_type = KafkaString::decode(buf)?;
        // The match string is authoritative; the tag is redundant.
        let match_type = i8::decode(buf)?;
        let match_name = NullableString::decode(buf)?;
        trace!(
            "Component {:?} carried match_type {}, match {:?}",
            entity_type.0,
            match_type,
            match_name.0
        );
        Ok(Self {
            entity_type,
            match_name,
        })
    }
}

impl Encodable for DescribeClientQuotasRequest {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        self.components.encode(buf)?;
        self.strict.encode(buf)
    }
}

impl Decodable for DescribeClientQuotasRequest {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        let components = KafkaArray::<DescribeClientQuotasComponent>::decode(buf)?;
        let strict = KafkaBool::decode(buf)?;
        Ok(Self { components, strict })
    }
}

impl ProtocolBody for DescribeClientQuotasRequest {
    const API_KEY: ApiKey = ApiKey::DescribeClientQuotas;
    const API_VERSION: i16 = 0;
    const HEADER_VERSION: i16 = 1;
    const REQUIRED_VERSION: KafkaVersion = KafkaVersion::V2_6_0_0;
}

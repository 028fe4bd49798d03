//! Quota entities: the user / client-id subjects a quota applies to

use std::collections::BTreeMap;

use anyhow::Result;
use bytes::{Buf, BufMut};
use serde::Serialize;

use crate::codec::{Decodable, Encodable};
use crate::primitives::{decode_array_len, encode_array_len, KafkaString, NullableString};

/// Entity type for authenticated principals.
pub const USER: &str = "user";
/// Entity type for client ids.
pub const CLIENT_ID: &str = "client-id";
/// Entity type for client IP addresses.
pub const IP: &str = "ip";

/// A quota entity: each entity type maps to an entity name, or to `None`
/// for the default entity of that type.
///
/// Encoded as `[entity_type(STRING) entity_name(NULLABLE_STRING)]`. The map
/// is ordered, so equal entities always produce the same bytes. Decoding
/// keeps the last name when a type repeats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct QuotaEntity(pub BTreeMap<String, Option<String>>);

impl QuotaEntity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component naming a specific entity of `entity_type`.
    pub fn with_name(mut self, entity_type: impl Into<String>, name: impl Into<String>) -> Self {
        self.0.insert(entity_type.into(), Some(name.into()));
        self
    }

    /// Adds a component for the default entity of `entity_type`.
    pub fn with_default(mut self, entity_type: impl Into<String>) -> Self {
        self.0.insert(entity_type.into(), None);
        self
    }

    /// Returns the name slot for `entity_type`; `Some(None)` is the default entity.
    pub fn get(&self, entity_type: &str) -> Option<Option<&str>> {
        self.0.get(entity_type).map(Option::as_deref)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, Option<V>)> for QuotaEntity {
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        )
    }
}

impl Encodable for QuotaEntity {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        encode_array_len(self.0.len(), buf)?;
        for (entity_type, entity_name) in &self.0 {
            KafkaString::from(entity_type.as_str()).encode(buf)?;
            NullableString::from(entity_name.as_deref()).encode(buf)?;
        }
        Ok(())
    }
}

impl Decodable for QuotaEntity {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        let count = decode_array_len(buf)?;
        let mut components = BTreeMap::new();
        for _ in 0..count {
            let entity_type = KafkaString::decode(buf)?;
            let entity_name = NullableString::decode(buf)?;
            components.insert(entity_type.0, entity_name.0);
        }
        Ok(Self(components))
    }
}

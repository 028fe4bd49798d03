//! Broker release versions and per-message protocol metadata

use std::fmt;
use std::str::FromStr;

use crate::api_keys::ApiKey;
use crate::codec::{Decodable, Encodable};

/// A Kafka broker release, compared component by component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KafkaVersion([u16; 4]);

impl KafkaVersion {
    /// The release that introduced the client-quota APIs.
    pub const V2_6_0_0: KafkaVersion = KafkaVersion::new(2, 6, 0, 0);

    pub const fn new(major: u16, minor: u16, patch: u16, build: u16) -> Self {
        Self([major, minor, patch, build])
    }

    pub fn is_at_least(&self, other: KafkaVersion) -> bool {
        *self >= other
    }
}

impl fmt::Display for KafkaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [major, minor, patch, build] = self.0;
        // Pre-1.0 releases used four components.
        if major == 0 {
            write!(f, "{}.{}.{}.{}", major, minor, patch, build)
        } else {
            write!(f, "{}.{}.{}", major, minor, patch)
        }
    }
}

impl FromStr for KafkaVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let mut parts = [0u16; 4];
        let mut count = 0;
        for part in s.trim().split('.') {
            if count == parts.len() {
                anyhow::bail!("Too many components in Kafka version: {}", s);
            }
            parts[count] = part
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid Kafka version {:?}: {}", s, e))?;
            count += 1;
        }
        if count < 2 {
            anyhow::bail!("Kafka version needs at least major.minor: {}", s);
        }
        Ok(Self(parts))
    }
}

/// Static metadata an enclosing request/response framer needs for a body.
pub trait ProtocolBody: Encodable + Decodable {
    /// The API this body belongs to.
    const API_KEY: ApiKey;
    /// The schema version this type encodes.
    const API_VERSION: i16;
    /// The request or response header version that frames this body.
    const HEADER_VERSION: i16;
    /// The oldest broker release that understands this body.
    const REQUIRED_VERSION: KafkaVersion;
}

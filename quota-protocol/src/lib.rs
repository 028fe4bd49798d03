//! Wire codec for the Kafka DescribeClientQuotas and AlterClientQuotas APIs.
//!
//! Only message bodies are handled here; request/response headers and
//! connection handling belong to the caller.

pub mod api_keys;
pub mod codec;
pub mod entity;
pub mod error_codes;
pub mod messages;
pub mod primitives;
mod throttle;
pub mod version;


pub use api_keys::*;
pub use codec::*;
pub use entity::QuotaEntity;
pub use error_codes::*;
pub use messages::*;
pub use primitives::*;
pub use version::*;

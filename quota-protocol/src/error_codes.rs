//! Kafka protocol error codes and per-entry error results

use anyhow::Result;
use bytes::{Buf, BufMut};
use num_derive::{FromPrimitive, ToPrimitive};
use serde::Serialize;

use crate::codec::{Decodable, Encodable};
use crate::primitives::NullableString;

/// The broker error-code taxonomy.
///
/// Codes are carried on the wire as plain `i16` so that responses with codes
/// missing from this list still decode; this enum only names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize)]
#[repr(i16)]
pub enum ErrorCode {
    UnknownServerError = -1,
    None = 0,
    OffsetOutOfRange = 1,
    CorruptMessage = 2,
    UnknownTopicOrPartition = 3,
    InvalidFetchSize = 4,
    LeaderNotAvailable = 5,
    NotLeaderForPartition = 6,
    RequestTimedOut = 7,
    BrokerNotAvailable = 8,
    ReplicaNotAvailable = 9,
    MessageTooLarge = 10,
    StaleControllerEpoch = 11,
    OffsetMetadataTooLarge = 12,
    NetworkException = 13,
    CoordinatorLoadInProgress = 14,
    CoordinatorNotAvailable = 15,
    NotCoordinator = 16,
    InvalidTopicException = 17,
    RecordListTooLarge = 18,
    NotEnoughReplicas = 19,
    NotEnoughReplicasAfterAppend = 20,
    InvalidRequiredAcks = 21,
    IllegalGeneration = 22,
    InconsistentGroupProtocol = 23,
    InvalidGroupId = 24,
    UnknownMemberId = 25,
    InvalidSessionTimeout = 26,
    RebalanceInProgress = 27,
    InvalidCommitOffsetSize = 28,
    TopicAuthorizationFailed = 29,
    GroupAuthorizationFailed = 30,
    ClusterAuthorizationFailed = 31,
    InvalidTimestamp = 32,
    UnsupportedSaslMechanism = 33,
    IllegalSaslState = 34,
    UnsupportedVersion = 35,
    TopicAlreadyExists = 36,
    InvalidPartitions = 37,
    InvalidReplicationFactor = 38,
    InvalidReplicaAssignment = 39,
    InvalidConfig = 40,
    NotController = 41,
    InvalidRequest = 42,
    UnsupportedForMessageFormat = 43,
    PolicyViolation = 44,
    OutOfOrderSequenceNumber = 45,
    DuplicateSequenceNumber = 46,
    InvalidProducerEpoch = 47,
    InvalidTxnState = 48,
    InvalidProducerIdMapping = 49,
    InvalidTransactionTimeout = 50,
    ConcurrentTransactions = 51,
    TransactionCoordinatorFenced = 52,
    TransactionalIdAuthorizationFailed = 53,
    SecurityDisabled = 54,
    OperationNotAttempted = 55,
    KafkaStorageError = 56,
    LogDirNotFound = 57,
    SaslAuthenticationFailed = 58,
    UnknownProducerId = 59,
    ReassignmentInProgress = 60,
}

impl Default for ErrorCode {
    fn default() -> Self {
        ErrorCode::None
    }
}

impl ErrorCode {
    /// Looks up a wire code, returning `None` for codes this list does not name.
    pub fn from_code(code: i16) -> Option<Self> {
        num_traits::FromPrimitive::from_i16(code)
    }

    pub fn code(self) -> i16 {
        self as i16
    }
}

impl From<ErrorCode> for i16 {
    fn from(code: ErrorCode) -> Self {
        code as i16
    }
}

/// An error code paired with an optional human-readable message.
///
/// `error_code` 0 with an absent message means success. An empty message is
/// kept distinct from an absent one in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ErrorResult {
    /// The error code, or 0 if there was no error.
    pub error_code: i16,
    /// The error message, or null if there was no error.
    pub error_message: NullableString,
}

impl ErrorResult {
    /// A successful result: code 0 and no message.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(code: impl Into<i16>, message: impl Into<String>) -> Self {
        Self {
            error_code: code.into(),
            error_message: NullableString(Some(message.into())),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_code != 0
    }

    /// The named error code, if the taxonomy knows it.
    pub fn kind(&self) -> Option<ErrorCode> {
        ErrorCode::from_code(self.error_code)
    }

    pub fn message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

impl Encodable for ErrorResult {
    fn encode(&self, buf: &mut impl BufMut) -> Result<()> {
        self.error_code.encode(buf)?;
        self.error_message.encode(buf)
    }
}

impl Decodable for ErrorResult {
    fn decode(buf: &mut impl Buf) -> Result<Self> {
        let error_code = i16::decode(buf)?;
        let error_message = NullableString::decode(buf)?;
        Ok(Self {
            error_code,
            error_message,
        })
    }
}

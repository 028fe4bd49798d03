use std::time::Duration;

use anyhow::Result;
use bytes::BytesMut;
use quota_protocol::codec::{Decodable, Encodable};
use quota_protocol::entity::{QuotaEntity, CLIENT_ID, USER};
use quota_protocol::error_codes::{ErrorCode, ErrorResult};
use quota_protocol::messages::*;
use quota_protocol::primitives::KafkaArray;
use quota_protocol::version::{KafkaVersion, ProtocolBody};
use quota_protocol::ApiKey;

fn roundtrip<T: Encodable + Decodable>(value: &T) -> Result<(Vec<u8>, T)> {
    let mut buf = BytesMut::new();
    value.encode(&mut buf)?;
    let bytes = buf.to_vec();

    let mut decode_buf = buf.freeze();
    let decoded = T::decode(&mut decode_buf)?;
    assert!(decode_buf.is_empty(), "decode left trailing bytes");
    Ok((bytes, decoded))
}

#[test]
fn test_describe_request_roundtrip() -> Result<()> {
    let req = DescribeClientQuotasRequest::new(
        vec![
            DescribeClientQuotasComponent::exact(USER, "alice"),
            DescribeClientQuotasComponent::any(CLIENT_ID),
        ],
        true,
    );

    let (bytes, decoded) = roundtrip(&req)?;

    assert_eq!(decoded, req);
    assert_eq!(decoded.components.0[0].match_type(), MATCH_TYPE_EXACT);
    assert_eq!(decoded.components.0[1].match_type(), MATCH_TYPE_ANY);
    assert_eq!(*bytes.last().unwrap(), 1);
    Ok(())
}

#[test]
fn test_describe_response_roundtrip() -> Result<()> {
    let res = DescribeClientQuotasResponse {
        throttle_time: Duration::from_millis(1200),
        error: ErrorResult::none(),
        entries: KafkaArray(vec![DescribeClientQuotasEntry {
            entity: QuotaEntity::new()
                .with_name(USER, "alice")
                .with_default(CLIENT_ID),
            values: QuotaValues::new()
                .with(PRODUCER_BYTE_RATE, 1_048_576.0)
                .with(REQUEST_PERCENTAGE, 12.5),
        }]),
    };

    let (bytes, decoded) = roundtrip(&res)?;

    assert_eq!(&bytes[..4], &1200i32.to_be_bytes());
    assert_eq!(decoded, res);
    let entry = &decoded.entries.0[0];
    assert_eq!(entry.entity.get(USER), Some(Some("alice")));
    assert_eq!(entry.entity.get(CLIENT_ID), Some(None));
    assert_eq!(entry.values.get(REQUEST_PERCENTAGE), Some(12.5));
    Ok(())
}

#[test]
fn test_alter_request_roundtrip() -> Result<()> {
    let req = AlterClientQuotasRequest::new(
        vec![
            AlterClientQuotasEntry::new(
                QuotaEntity::new().with_default(USER),
                vec![QuotaOperation::set(CONSUMER_BYTE_RATE, 2_000_000.0)],
            ),
            AlterClientQuotasEntry::new(
                QuotaEntity::new().with_name(CLIENT_ID, "reporting"),
                vec![QuotaOperation::remove(PRODUCER_BYTE_RATE)],
            ),
        ],
        false,
    );

    let (_, decoded) = roundtrip(&req)?;

    assert_eq!(decoded, req);
    assert!(decoded.entries.0[1].ops.0[0].remove.0);
    Ok(())
}

#[test]
fn test_alter_response_roundtrip() -> Result<()> {
    let res = AlterClientQuotasResponse {
        throttle_time: Duration::ZERO,
        entries: KafkaArray(vec![
            AlterClientQuotasEntryResponse::success(QuotaEntity::new().with_default(USER)),
            AlterClientQuotasEntryResponse::failure(
                QuotaEntity::new().with_default("faulty"),
                ErrorResult::new(ErrorCode::InvalidRequest, "Unhandled entity type"),
            ),
        ]),
    };

    let (_, decoded) = roundtrip(&res)?;

    assert_eq!(decoded, res);
    let failures: Vec<_> = decoded.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].error.kind(), Some(ErrorCode::InvalidRequest));
    assert_eq!(failures[0].error.message(), Some("Unhandled entity type"));
    Ok(())
}

#[test]
fn test_protocol_metadata() {
    assert_eq!(DescribeClientQuotasRequest::API_KEY, ApiKey::DescribeClientQuotas);
    assert_eq!(DescribeClientQuotasRequest::API_VERSION, 0);
    assert_eq!(DescribeClientQuotasRequest::HEADER_VERSION, 1);
    assert_eq!(DescribeClientQuotasResponse::API_KEY, ApiKey::DescribeClientQuotas);
    assert_eq!(DescribeClientQuotasResponse::HEADER_VERSION, 0);

    assert_eq!(AlterClientQuotasRequest::API_KEY, ApiKey::AlterClientQuotas);
    assert_eq!(AlterClientQuotasRequest::HEADER_VERSION, 1);
    assert_eq!(AlterClientQuotasResponse::API_KEY, ApiKey::AlterClientQuotas);
    assert_eq!(AlterClientQuotasResponse::API_VERSION, 0);
    assert_eq!(AlterClientQuotasResponse::HEADER_VERSION, 0);

    for required in [
        DescribeClientQuotasRequest::REQUIRED_VERSION,
        DescribeClientQuotasResponse::REQUIRED_VERSION,
        AlterClientQuotasRequest::REQUIRED_VERSION,
        AlterClientQuotasResponse::REQUIRED_VERSION,
    ] {
        assert_eq!(required, KafkaVersion::V2_6_0_0);
    }
}

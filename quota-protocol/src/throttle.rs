//! Throttle time: a `Duration` in memory, INT32 milliseconds on the wire

use std::time::Duration;

use anyhow::Result;
use bytes::{Buf, BufMut};
use serde::Serializer;
use tracing::warn;

use crate::codec::{Decodable, Encodable};

pub(crate) fn encode(throttle_time: Duration, buf: &mut impl BufMut) -> Result<()> {
    let millis = i32::try_from(throttle_time.as_millis()).unwrap_or_else(|_| {
        warn!(
            "Throttle time {:?} exceeds INT32 milliseconds, saturating",
            throttle_time
        );
        i32::MAX
    });
    millis.encode(buf)
}

pub(crate) fn decode(buf: &mut impl Buf) -> Result<Duration> {
    let millis = i32::decode(buf)?;
    if millis < 0 {
        warn!("Negative throttle time {}ms on the wire, reading as zero", millis);
        return Ok(Duration::ZERO);
    }
    Ok(Duration::from_millis(millis as u64))
}

pub(crate) fn serialize_millis<S: Serializer>(
    throttle_time: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(throttle_time.as_millis() as u64)
}

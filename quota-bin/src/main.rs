use std::io::Read;

use anyhow::{Context, Result};
use bytes::BytesMut;
use clap::{Parser, Subcommand, ValueEnum};
use quota_protocol::codec::{Decodable, Encodable};
use quota_protocol::entity::QuotaEntity;
use quota_protocol::messages::*;
use quota_protocol::version::{KafkaVersion, ProtocolBody};
use serde::Serialize;
use tracing::{debug, info, warn, Level};

/// Inspect and build Kafka client-quota message bodies
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a hex-encoded message body and print it as JSON
    Decode {
        /// Which body the bytes hold
        #[arg(short, long, value_enum)]
        message: MessageKind,
        /// Hex-encoded body; read from stdin when omitted
        hex: Option<String>,
    },
    /// Build a DescribeClientQuotas request and print its hex encoding
    Describe {
        /// Filter component: TYPE matches any name, TYPE= the default, TYPE=NAME exactly
        #[arg(short, long = "component", value_parser = parse_component)]
        components: Vec<DescribeClientQuotasComponent>,
        /// Exclude entities with component types not listed
        #[arg(long)]
        strict: bool,
    },
    /// Build a single-entity AlterClientQuotas request and print its hex encoding
    Alter {
        /// Entity component: TYPE for the default entity, TYPE=NAME for a named one
        #[arg(short, long = "entity", value_parser = parse_entity_component, required = true)]
        entity: Vec<(String, Option<String>)>,
        /// Quota to set, as KEY=VALUE
        #[arg(short, long = "set", value_parser = parse_set)]
        set: Vec<(String, f64)>,
        /// Quota key to remove
        #[arg(short, long = "remove")]
        remove: Vec<String>,
        /// Ask the broker to validate without applying
        #[arg(long)]
        validate_only: bool,
    },
    /// Print API key, versions, and minimum broker release of each body
    Metadata {
        /// Report whether a broker at this release supports each body
        #[arg(short, long)]
        broker_version: Option<KafkaVersion>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MessageKind {
    DescribeRequest,
    DescribeResponse,
    AlterRequest,
    AlterResponse,
}

fn split_component(s: &str) -> Result<(String, Option<String>), String> {
    let (entity_type, name) = match s.split_once('=') {
        Some((entity_type, name)) => (entity_type, Some(name.to_string())),
        None => (s, None),
    };
    if entity_type.is_empty() {
        return Err(format!("missing entity type in {:?}", s));
    }
    Ok((entity_type.to_string(), name))
}

fn parse_component(s: &str) -> Result<DescribeClientQuotasComponent, String> {
    let (entity_type, name) = split_component(s)?;
    Ok(match name {
        None => DescribeClientQuotasComponent::any(entity_type),
        Some(name) if name.is_empty() => DescribeClientQuotasComponent::default_entity(entity_type),
        Some(name) => DescribeClientQuotasComponent::exact(entity_type, name),
    })
}

fn parse_entity_component(s: &str) -> Result<(String, Option<String>), String> {
    split_component(s)
}

fn parse_set(s: &str) -> Result<(String, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", s))?;
    let value = value
        .parse()
        .map_err(|e| format!("invalid value for {}: {}", key, e))?;
    Ok((key.to_string(), value))
}

fn read_hex(hex: Option<String>) -> Result<Vec<u8>> {
    let text = match hex {
        Some(text) => text,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading hex from stdin")?;
            text
        }
    };
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&digits).context("input is not valid hex")
}

fn decode_body<T: Decodable + Serialize>(bytes: &[u8]) -> Result<String> {
    let mut buf = bytes;
    let body = T::decode(&mut buf)?;
    if !buf.is_empty() {
        warn!("{} trailing bytes after message body", buf.len());
    }
    Ok(serde_json::to_string_pretty(&body)?)
}

fn encode_hex<T: Encodable>(body: &T) -> Result<String> {
    let mut buf = BytesMut::new();
    body.encode(&mut buf)?;
    debug!("Encoded {} bytes", buf.len());
    Ok(hex::encode(&buf))
}

fn metadata_row<T: ProtocolBody>(name: &str, broker: Option<KafkaVersion>) -> String {
    let mut row = format!(
        "{:<30} key={:<3} version={} header_version={} min_broker={}",
        name,
        i16::from(T::API_KEY),
        T::API_VERSION,
        T::HEADER_VERSION,
        T::REQUIRED_VERSION
    );
    if let Some(broker) = broker {
        let supported = broker.is_at_least(T::REQUIRED_VERSION);
        row.push_str(if supported { " supported" } else { " unsupported" });
    }
    row
}

fn main() -> Result<()> {
    let args = Args::parse();

    quota_common::logging::init_logging(args.log_level);

    match args.command {
        Commands::Decode { message, hex } => {
            let bytes = read_hex(hex)?;
            info!("Decoding {} bytes as {:?}", bytes.len(), message);
            let json = match message {
                MessageKind::DescribeRequest => decode_body::<DescribeClientQuotasRequest>(&bytes),
                MessageKind::DescribeResponse => {
                    decode_body::<DescribeClientQuotasResponse>(&bytes)
                }
                MessageKind::AlterRequest => decode_body::<AlterClientQuotasRequest>(&bytes),
                MessageKind::AlterResponse => decode_body::<AlterClientQuotasResponse>(&bytes),
            }
            .with_context(|| format!("decoding {:?}", message))?;
            println!("{}", json);
        }
        Commands::Describe { components, strict } => {
            let request = DescribeClientQuotasRequest::new(components, strict);
            println!("{}", encode_hex(&request)?);
        }
        Commands::Alter {
            entity,
            set,
            remove,
            validate_only,
        } => {
            let entity: QuotaEntity = entity.into_iter().collect();
            let ops = set
                .into_iter()
                .map(|(key, value)| QuotaOperation::set(key, value))
                .chain(remove.into_iter().map(QuotaOperation::remove))
                .collect();
            let request = AlterClientQuotasRequest::new(
                vec![AlterClientQuotasEntry::new(entity, ops)],
                validate_only,
            );
            println!("{}", encode_hex(&request)?);
        }
        Commands::Metadata { broker_version } => {
            println!(
                "{}",
                metadata_row::<DescribeClientQuotasRequest>("DescribeClientQuotasRequest", broker_version)
            );
            println!(
                "{}",
                metadata_row::<DescribeClientQuotasResponse>("DescribeClientQuotasResponse", broker_version)
            );
            println!(
                "{}",
                metadata_row::<AlterClientQuotasRequest>("AlterClientQuotasRequest", broker_version)
            );
            println!(
                "{}",
                metadata_row::<AlterClientQuotasResponse>("AlterClientQuotasResponse", broker_version)
            );
        }
    }

    Ok(())
}

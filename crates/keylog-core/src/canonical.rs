//! Canonical CBOR encoding for deterministic serialization of record chains.
//!
//! Encoding follows RFC 8949 Core Deterministic Encoding:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats (amounts are u64)
//!
//! The transaction id of a chain is the Blake3 hash of these bytes, so the
//! encoding must never depend on platform or field order.

use ciborium::value::Value;

use crate::chain::{RecordChain, SignedRecord};
use crate::error::CoreError;
use crate::record::Output;

/// The current chain encoding version.
pub const CHAIN_VERSION: u8 = 0;

/// Integer keys for compact encoding. Keys 0-23 encode as single bytes.
mod keys {
    pub const VERSION: u64 = 0;
    pub const RECORDS: u64 = 1;

    pub const RECORD_INDEX: u64 = 0;
    pub const PUBLIC_KEY: u64 = 1;
    pub const PREROTATED_KEY_HASH: u64 = 2;
    pub const TWICE_PREROTATED_KEY_HASH: u64 = 3;
    pub const RELATIONSHIP: u64 = 4;
    pub const OUTPUTS: u64 = 5;
    pub const SIGNATURE: u64 = 6;

    pub const ADDRESS: u64 = 0;
    pub const AMOUNT: u64 = 1;
}

/// Encode a chain to canonical CBOR bytes.
pub fn canonical_chain_bytes(chain: &RecordChain) -> Result<Vec<u8>, CoreError> {
    let records = chain.records().iter().map(record_to_cbor_value).collect();
    let value = Value::Map(vec![
        (key(keys::VERSION), Value::Integer(CHAIN_VERSION.into())),
        (key(keys::RECORDS), Value::Array(records)),
    ]);

    let mut buf = Vec::new();
    encode_value_to(&mut buf, &value)?;
    Ok(buf)
}

fn key(k: u64) -> Value {
    Value::Integer(k.into())
}

fn record_to_cbor_value(signed: &SignedRecord) -> Value {
    let record = &signed.record;
    let outputs = record.outputs.iter().map(output_to_cbor_value).collect();

    Value::Map(vec![
        (
            key(keys::RECORD_INDEX),
            Value::Integer(signed.record_index.into()),
        ),
        (key(keys::PUBLIC_KEY), Value::Text(record.public_key.clone())),
        (
            key(keys::PREROTATED_KEY_HASH),
            Value::Text(record.prerotated_key_hash.clone()),
        ),
        (
            key(keys::TWICE_PREROTATED_KEY_HASH),
            Value::Text(record.twice_prerotated_key_hash.clone()),
        ),
        (
            key(keys::RELATIONSHIP),
            Value::Text(record.relationship.clone()),
        ),
        (key(keys::OUTPUTS), Value::Array(outputs)),
        (key(keys::SIGNATURE), Value::Text(signed.signature.clone())),
    ])
}

fn output_to_cbor_value(output: &Output) -> Value {
    Value::Map(vec![
        (key(keys::ADDRESS), Value::Text(output.address.clone())),
        (key(keys::AMOUNT), Value::Integer(output.amount.into())),
    ])
}

/// Recursively encode a CBOR value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) -> Result<(), CoreError> {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Text(s) => {
            encode_uint(buf, 3, s.len() as u64);
            buf.extend_from_slice(s.as_bytes());
        }
        Value::Array(arr) => {
            encode_uint(buf, 4, arr.len() as u64);
            for item in arr {
                encode_value_to(buf, item)?;
            }
        }
        Value::Map(entries) => encode_map_canonical(buf, entries)?,
        Value::Float(_) => {
            return Err(CoreError::EncodingError(
                "floats not supported in canonical encoding".into(),
            ))
        }
        other => {
            return Err(CoreError::EncodingError(format!(
                "unsupported CBOR value: {other:?}"
            )))
        }
    }
    Ok(())
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, i: ciborium::value::Integer) {
    let n: i128 = i.into();

    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_uint(buf, 1, (-1 - n) as u64);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a map canonically (major type 5), keys sorted by encoded bytes.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) -> Result<(), CoreError> {
    let mut pairs = Vec::with_capacity(entries.len());
    for (k, v) in entries {
        let mut key_buf = Vec::new();
        encode_value_to(&mut key_buf, k)?;
        pairs.push((key_buf, v));
    }

    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, pairs.len() as u64);
    for (key_bytes, value) in pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value)?;
    }
    Ok(())
}

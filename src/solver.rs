// Pure computations behind the tasks. Nothing here touches the network,
// which keeps the interesting parts easy to test in isolation.

use std::net::Ipv4Addr;

use cidr::Ipv4Cidr;
use md5::{Digest, Md5};
use serde_json::Value;

use crate::error::TaskError;

/// Pins are searched in `0..PIN_SPACE`.
pub const PIN_SPACE: u16 = 10_000;

/// Interpret a task argument as an integer. JSON integers are taken as-is,
/// strings must hold a signed decimal number (surrounding whitespace allowed).
pub fn parse_integer(value: &Value) -> Result<i64, TaskError> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| TaskError::NotAnInteger(value.to_string()))
}

/// Multiply all arguments together. An empty list has no product.
pub fn product(arguments: &[Value]) -> Result<i64, TaskError> {
    let (first, rest) = arguments
        .split_first()
        .ok_or(TaskError::MissingArgument { task: 3, index: 0 })?;
    rest.iter().try_fold(parse_integer(first)?, |acc, value| {
        acc.checked_mul(parse_integer(value)?)
            .ok_or(TaskError::Overflow)
    })
}

/// Lowercase hex md5 digest of the decimal form of `code`.
pub fn hash_code(code: u16) -> String {
    hex::encode(Md5::digest(code.to_string().as_bytes()))
}

/// Find the pin whose `hash_code` equals `target`, scanning from 0 upwards
/// and stopping at the first hit.
pub fn crack_pin(target: &str) -> Option<u16> {
    let target = target.trim();
    (0..PIN_SPACE).find(|&code| hash_code(code).eq_ignore_ascii_case(target))
}

/// Prefix length for a dotted netmask (`255.255.255.0`), a dotted hostmask
/// (`0.0.0.255`) or a bare prefix length (`24`).
pub fn prefix_length(mask: &str) -> Result<u8, TaskError> {
    let mask = mask.trim();
    let invalid = || TaskError::InvalidNetmask(mask.to_string());

    if !mask.is_empty() && mask.bytes().all(|b| b.is_ascii_digit()) {
        return mask
            .parse::<u8>()
            .ok()
            .filter(|&len| len <= 32)
            .ok_or_else(invalid);
    }

    let bits = u32::from(mask.parse::<Ipv4Addr>().map_err(|_| invalid())?);
    if bits.leading_ones() + bits.trailing_zeros() == 32 {
        // u32::leading_ones is at most 32
        return Ok(bits.leading_ones() as u8);
    }
    let host_bits = !bits;
    if host_bits.leading_ones() + host_bits.trailing_zeros() == 32 {
        return Ok(host_bits.leading_ones() as u8);
    }
    Err(invalid())
}

/// First usable host of the network `network`/`mask`. The network address
/// and the broadcast address are skipped, except for /31 (both addresses are
/// hosts) and /32 (the single address is the host).
pub fn first_host(network: &str, mask: &str) -> Result<Ipv4Addr, TaskError> {
    let address: Ipv4Addr = network
        .trim()
        .parse()
        .map_err(|_| TaskError::InvalidAddress(network.to_string()))?;
    let prefix = prefix_length(mask)?;
    let cidr = Ipv4Cidr::new(address, prefix).map_err(|e| TaskError::InvalidNetwork {
        network: address.to_string(),
        prefix,
        reason: e.to_string(),
    })?;

    let first = cidr.first_address();
    Ok(match cidr.network_length() {
        31 | 32 => first,
        _ => Ipv4Addr::from(u32::from(first) + 1),
    })
}

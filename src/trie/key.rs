//! Bit-sequence encoding of addresses and networks
//!
//! Keys are sequences of 0/1 bytes, one per bit, most significant bit
//! first, at the address family's natural width: 32 bits for IPv4 and 128
//! bits for IPv6. Encoding each family at its own width is what keeps a
//! wider address from being silently truncated into the narrower family's
//! key space.

use ipnet::IpNet;
use std::net::IpAddr;

/// Render the `width` low bits of `value` as a 0/1 sequence, most
/// significant bit first
fn bits(value: u128, width: usize) -> Vec<u8> {
    (0..width)
        .map(|i| ((value >> (width - 1 - i)) & 1) as u8)
        .collect()
}

/// Full-width bit sequence for a single address (no truncation)
pub fn address_bits(addr: &IpAddr) -> Vec<u8> {
    match addr {
        IpAddr::V4(v4) => bits(u32::from(*v4) as u128, 32),
        IpAddr::V6(v6) => bits(u128::from(*v6), 128),
    }
}

/// Bit sequence for a network: the canonical network address truncated to
/// the declared prefix length
pub fn network_bits(net: &IpNet) -> Vec<u8> {
    let mut key = address_bits(&net.network());
    key.truncate(net.prefix_len() as usize);
    key
}

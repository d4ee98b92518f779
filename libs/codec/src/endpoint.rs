//! Punching endpoints: a port plus a 16-byte address
//!
//! On the wire every address is the 16-byte IPv6 form. IPv4 addresses are
//! widened to `::ffff:a.b.c.d` before encoding, and decoding always yields the
//! IPv6 form. Equality works on the widened form so an IPv4 endpoint compares
//! equal to what comes back off the wire.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{AddrParseError, IpAddr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

use bytes::{BufMut, BytesMut};

use crate::constants::{ADDRESS_SIZE, ENDPOINT_SIZE};
use crate::error::{ProtocolError, ProtocolResult};
use crate::message_type::MessageType;
use crate::wire::WireReader;

/// Where a peer should attempt to connect
///
/// `ip == None` is an unset address; encoding a message carrying one fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Endpoint {
    pub port: u16,
    pub ip: Option<IpAddr>,
}

impl Endpoint {
    pub const SIZE: usize = ENDPOINT_SIZE;

    pub fn new(ip: impl Into<IpAddr>, port: u16) -> Self {
        Self {
            port,
            ip: Some(ip.into()),
        }
    }

    /// Endpoint with a port but no address
    pub const fn unset(port: u16) -> Self {
        Self { port, ip: None }
    }

    pub fn is_set(&self) -> bool {
        self.ip.is_some()
    }

    /// 16-byte wire form of the address, `None` if unset
    pub fn octets(&self) -> Option<[u8; ADDRESS_SIZE]> {
        self.ip.map(|ip| match ip {
            IpAddr::V4(v4) => v4.to_ipv6_mapped().octets(),
            IpAddr::V6(v6) => v6.octets(),
        })
    }

    /// True if the address is an IPv4 address, plain or widened
    pub fn is_ipv4(&self) -> bool {
        match self.ip {
            Some(IpAddr::V4(_)) => true,
            Some(IpAddr::V6(v6)) => v6.to_ipv4_mapped().is_some(),
            None => false,
        }
    }

    /// Socket address for connecting, with `::ffff:a.b.c.d` narrowed back to IPv4
    pub fn to_socket_addr(&self) -> Option<SocketAddr> {
        self.ip.map(|ip| {
            let ip = match ip {
                IpAddr::V6(v6) => v6
                    .to_ipv4_mapped()
                    .map(IpAddr::V4)
                    .unwrap_or(IpAddr::V6(v6)),
                v4 => v4,
            };
            SocketAddr::new(ip, self.port)
        })
    }

    /// Wire octets, or `UnsetAddress` naming the message and field
    pub(crate) fn require_octets(
        &self,
        message: MessageType,
        field: &'static str,
    ) -> ProtocolResult<[u8; ADDRESS_SIZE]> {
        self.octets()
            .ok_or_else(|| ProtocolError::unset_address(message, field))
    }

    /// Write port (u16 LE) followed by the 16 address bytes
    pub(crate) fn put(dst: &mut BytesMut, port: u16, octets: &[u8; ADDRESS_SIZE]) {
        dst.put_u16_le(port);
        dst.put_slice(octets);
    }

    pub(crate) fn read(
        reader: &mut WireReader<'_>,
        port_field: &'static str,
        address_field: &'static str,
    ) -> ProtocolResult<Self> {
        let port = reader.read_u16_le(port_field)?;
        let octets = reader.read_array::<ADDRESS_SIZE>(address_field)?;
        Ok(Self::new(Ipv6Addr::from(octets), port))
    }
}

impl PartialEq for Endpoint {
    fn eq(&self, other: &Self) -> bool {
        self.port == other.port && self.octets() == other.octets()
    }
}

impl Eq for Endpoint {}

impl Hash for Endpoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.port.hash(state);
        self.octets().hash(state);
    }
}

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr.ip(), addr.port())
    }
}

impl FromStr for Endpoint {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<SocketAddr>().map(Self::from)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_socket_addr() {
            Some(addr) => write!(f, "{addr}"),
            None => write!(f, "<unset>:{}", self.port),
        }
    }
}

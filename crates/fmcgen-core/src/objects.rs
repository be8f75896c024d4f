use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Valid ICMPv4 type/code combinations (IANA), keyed by type.
pub const ICMPV4_CODES: &[(u8, &[u8])] = &[
    (0, &[0]),
    (3, &[0, 1, 2, 3, 4, 5]),
    (5, &[0, 1, 2, 3]),
    (8, &[0]),
    (11, &[0, 1]),
    (12, &[0, 1, 2]),
    (40, &[0, 1, 2, 3, 4, 5]),
];

/// Records that other records can reference by name.
pub trait Named {
    fn name(&self) -> &str;
}

macro_rules! impl_named {
    ($($record:ty),* $(,)?) => {
        $(impl Named for $record {
            fn name(&self) -> &str {
                &self.name
            }
        })*
    };
}

impl_named!(
    Host,
    Network,
    Range,
    Port,
    Icmpv4,
    PortGroup,
    Url,
    UrlGroup,
    SecurityZone,
    NetworkGroup,
);

/// A single host address object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub name: String,
    pub ip: Ipv4Addr,
}

/// A network object identified by its CIDR prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub name: String,
    pub prefix: Ipv4Prefix,
}

/// An address range object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub name: String,
    pub ip_range: IpRange,
}

/// Transport protocol of a port object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Tcp,
    Udp,
    Esp,
}

impl Protocol {
    pub const ALL: [Protocol; 3] = [Protocol::Tcp, Protocol::Udp, Protocol::Esp];

    /// ESP carries no port numbers.
    pub fn has_ports(self) -> bool {
        !matches!(self, Protocol::Esp)
    }
}

/// A port object; `port` is absent for protocols without port numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    pub protocol: Protocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<PortSpec>,
}

/// Either a single port (emitted as an integer) or a `start-end` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortSpec {
    Single(u16),
    Range(PortRange),
}

/// An inclusive port range, emitted as `"start-end"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    pub fn new(start: u16, end: u16) -> Result<Self, Error> {
        if start > end {
            return Err(Error::InvalidValue(format!(
                "port range start {start} exceeds end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for PortRange {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (start, end) = value
            .split_once('-')
            .ok_or_else(|| Error::InvalidValue(format!("port range '{value}' has no '-'")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<u16>()
                .map_err(|err| Error::InvalidValue(format!("port range '{value}': {err}")))
        };
        Self::new(parse(start)?, parse(end)?)
    }
}

impl TryFrom<String> for PortRange {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PortRange> for String {
    fn from(value: PortRange) -> Self {
        value.to_string()
    }
}

/// An ICMPv4 object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icmpv4 {
    pub name: String,
    pub icmp_type: u8,
    pub code: u8,
}

impl Icmpv4 {
    /// Whether the type/code pair appears in [`ICMPV4_CODES`].
    pub fn is_valid_combination(&self) -> bool {
        ICMPV4_CODES
            .iter()
            .any(|(icmp_type, codes)| *icmp_type == self.icmp_type && codes.contains(&self.code))
    }
}

/// A group of port and ICMPv4 object references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortGroup {
    pub name: String,
    pub objects: Vec<String>,
}

/// A URL object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    pub name: String,
    pub url: String,
}

/// A URL group mixing URL object references and inline literals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    pub literals: Vec<String>,
}

/// Interface type of a security zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InterfaceType {
    Routed,
    Asa,
    Inline,
    Switched,
}

impl InterfaceType {
    pub const ALL: [InterfaceType; 4] = [
        InterfaceType::Routed,
        InterfaceType::Asa,
        InterfaceType::Inline,
        InterfaceType::Switched,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityZone {
    pub name: String,
    pub interface_type: InterfaceType,
}

/// A group of host, network, range and network group references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkGroup {
    pub name: String,
    pub objects: Vec<String>,
}

/// An IPv4 network prefix with host bits cleared, emitted as `a.b.c.d/len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ipv4Prefix {
    address: Ipv4Addr,
    prefix_len: u8,
}

impl Ipv4Prefix {
    /// Build a prefix, clearing any host bits set in `address`.
    pub fn new(address: Ipv4Addr, prefix_len: u8) -> Result<Self, Error> {
        if prefix_len > 32 {
            return Err(Error::InvalidValue(format!(
                "prefix length {prefix_len} exceeds 32"
            )));
        }
        Ok(Self::masked(address, prefix_len))
    }

    /// Like [`Ipv4Prefix::new`], saturating the length at 32.
    pub fn masked(address: Ipv4Addr, prefix_len: u8) -> Self {
        let prefix_len = prefix_len.min(32);
        let network = u32::from(address) & netmask(prefix_len);
        Self {
            address: Ipv4Addr::from(network),
            prefix_len,
        }
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn host_bits(&self) -> u32 {
        u32::from(self.address) & !netmask(self.prefix_len)
    }
}

fn netmask(prefix_len: u8) -> u32 {
    match prefix_len {
        0 => 0,
        len => u32::MAX << (32 - u32::from(len)),
    }
}

impl fmt::Display for Ipv4Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

impl FromStr for Ipv4Prefix {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (address, prefix_len) = value
            .split_once('/')
            .ok_or_else(|| Error::InvalidValue(format!("prefix '{value}' has no '/'")))?;
        let address = address
            .parse::<Ipv4Addr>()
            .map_err(|err| Error::InvalidValue(format!("prefix '{value}': {err}")))?;
        let prefix_len = prefix_len
            .parse::<u8>()
            .map_err(|err| Error::InvalidValue(format!("prefix '{value}': {err}")))?;
        Self::new(address, prefix_len)
    }
}

impl TryFrom<String> for Ipv4Prefix {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ipv4Prefix> for String {
    fn from(value: Ipv4Prefix) -> Self {
        value.to_string()
    }
}

/// An inclusive address range, emitted as `start-end`.
///
/// Endpoints are ordered by `Ipv4Addr`'s ordering, which compares the four
/// octets as a tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IpRange {
    start: Ipv4Addr,
    end: Ipv4Addr,
}

impl IpRange {
    /// Build a range from two endpoints in either order.
    pub fn ordered(a: Ipv4Addr, b: Ipv4Addr) -> Self {
        if a > b {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    pub fn start(&self) -> Ipv4Addr {
        self.start
    }

    pub fn end(&self) -> Ipv4Addr {
        self.end
    }
}

impl fmt::Display for IpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for IpRange {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (start, end) = value
            .split_once('-')
            .ok_or_else(|| Error::InvalidValue(format!("ip range '{value}' has no '-'")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<Ipv4Addr>()
                .map_err(|err| Error::InvalidValue(format!("ip range '{value}': {err}")))
        };
        let (start, end) = (parse(start)?, parse(end)?);
        if start > end {
            return Err(Error::InvalidValue(format!(
                "ip range '{value}' starts after it ends"
            )));
        }
        Ok(Self { start, end })
    }
}

impl TryFrom<String> for IpRange {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IpRange> for String {
    fn from(value: IpRange) -> Self {
        value.to_string()
    }
}

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::bitset::AddressSet;
use crate::error::{AddressParseError, Error};
use crate::net::Network;


/// The address family of an IP address. IPv4 sorts before IPv6.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Family {
    Ipv4,
    Ipv6,
}
impl Family {
    /// The number of bits in an address of this family.
    pub fn width(&self) -> u32 {
        match self {
            Family::Ipv4 => 32,
            Family::Ipv6 => 128,
        }
    }

    pub fn version(&self) -> u32 {
        match self {
            Family::Ipv4 => 4,
            Family::Ipv6 => 6,
        }
    }
}
impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IPv{}", self.version())
    }
}

/// The historic class of an IPv4 address, derived from its leading bits.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Class {
    A,
    B,
    C,
    /// multicast
    D,
    /// reserved
    E,
}
impl Class {
    /// The prefix length implied by the class.
    pub fn default_prefix(&self) -> u32 {
        match self {
            Class::A => 8,
            Class::B => 16,
            Class::C => 24,
            Class::D => 4,
            Class::E => 32,
        }
    }
}
impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Class::A => "A",
            Class::B => "B",
            Class::C => "C",
            Class::D => "D",
            Class::E => "E",
        };
        write!(f, "{}", letter)
    }
}

/// An IPv4 or IPv6 address.
///
/// Both families share the same 128-bit storage; IPv4 addresses occupy its bottom 32 bits. The
/// family travels with the bits, so two addresses of different families never compare equal, and
/// all IPv4 addresses sort before all IPv6 addresses.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Address {
    family: Family,
    bits: AddressSet,
}

impl Address {
    /// Constructs an IPv4 address from its four octets, most significant first.
    pub fn from_octets(octets: [u8; 4]) -> Address {
        Address {
            family: Family::Ipv4,
            bits: AddressSet::new(0, u64::from(u32::from_be_bytes(octets))),
        }
    }

    /// Constructs an IPv6 address from its eight 16-bit chunks, most significant first.
    pub fn from_hextets(hextets: [u16; 8]) -> Address {
        Address {
            family: Family::Ipv6,
            bits: set_from_hextets(&hextets),
        }
    }

    /// Constructs an address of the given family from raw bits. Bits that lie outside the
    /// family's width are cleared.
    pub fn from_bits(family: Family, bits: AddressSet) -> Address {
        Address {
            family,
            bits: bits & AddressSet::all_ones(family.width()),
        }
    }

    pub fn family(&self) -> Family { self.family }
    pub fn bits(&self) -> AddressSet { self.bits }

    pub fn is_ipv4(&self) -> bool { self.family == Family::Ipv4 }
    pub fn is_ipv6(&self) -> bool { self.family == Family::Ipv6 }

    /// Returns the four octets of an IPv4 address, or `None` for IPv6.
    pub fn octets(&self) -> Option<[u8; 4]> {
        match self.family {
            Family::Ipv4 => Some(self.ipv4_value().to_be_bytes()),
            Family::Ipv6 => None,
        }
    }

    /// Returns this address represented as 16-bit chunks. IPv4 addresses yield the chunks of
    /// their 128-bit storage, i.e. six zero chunks followed by the address.
    pub fn hextets(&self) -> [u16; 8] {
        let value = self.bits.to_u128();
        let mut ret = [0u16; 8];
        for (i, chunk) in ret.iter_mut().enumerate() {
            *chunk = (value >> (112 - i * 16)) as u16;
        }
        ret
    }

    /// Outputs an IPv6 address in its full string representation with all leading zeroes and no
    /// omission of zero chunks. IPv4 addresses are output in their usual form.
    pub fn exploded(&self) -> String {
        match self.family {
            Family::Ipv4 => self.to_string(),
            Family::Ipv6 => {
                let chunk_strings: Vec<String> = self.hextets()
                    .iter()
                    .map(|c| format!("{:04x}", c))
                    .collect();
                chunk_strings.join(":")
            },
        }
    }

    pub fn to_std(&self) -> IpAddr {
        match self.family {
            Family::Ipv4 => IpAddr::V4(Ipv4Addr::from(self.ipv4_value())),
            Family::Ipv6 => IpAddr::V6(Ipv6Addr::from(self.bits.to_u128())),
        }
    }

    fn ipv4_value(&self) -> u32 {
        (self.bits.low() & 0xFFFF_FFFF) as u32
    }

    fn ipv4_octet(&self, index: usize) -> u8 {
        self.ipv4_value().to_be_bytes()[index]
    }

    fn ipv6_top_hextet(&self) -> u16 {
        (self.bits.high() >> 48) as u16
    }

    /// Returns the IPv4 class of this address, or `None` for IPv6.
    pub fn class(&self) -> Option<Class> {
        if self.family != Family::Ipv4 {
            return None;
        }

        let top = self.ipv4_octet(0);
        let class = if top >> 7 == 0 {
            Class::A
        } else if top >> 6 == 0b10 {
            Class::B
        } else if top >> 5 == 0b110 {
            Class::C
        } else if top >> 4 == 0b1110 {
            Class::D
        } else {
            Class::E
        };
        Some(class)
    }

    /// Returns the prefix length that an address without an explicit prefix is assumed to have.
    ///
    /// IPv4 uses the classful prefix; IPv6 looks at the kind of address (128 for loopback and
    /// unspecified, 8 for multicast, 10 for link-local, 64 otherwise).
    pub fn default_mask(&self) -> u32 {
        match self.class() {
            Some(class) => class.default_prefix(),
            None => {
                if self.is_unspecified() || self.is_loopback() {
                    128
                } else if self.is_multicast() {
                    8
                } else if self.is_link_local() {
                    10
                } else {
                    64
                }
            },
        }
    }

    /// Returns the network of this address using its default mask.
    pub fn network(&self) -> Network {
        Network::with_default_mask(*self)
    }

    pub fn is_unspecified(&self) -> bool {
        self.bits.is_zero()
    }

    /// `127.0.0.0/8` or `::1`.
    pub fn is_loopback(&self) -> bool {
        match self.family {
            Family::Ipv4 => self.ipv4_octet(0) == 127,
            Family::Ipv6 => self.bits == AddressSet::new(0, 1),
        }
    }

    /// `224.0.0.0/4` or `ff00::/8`.
    pub fn is_multicast(&self) -> bool {
        match self.family {
            Family::Ipv4 => self.ipv4_octet(0) >> 4 == 0b1110,
            Family::Ipv6 => self.ipv6_top_hextet() >> 8 == 0xFF,
        }
    }

    /// `10.0.0.0/8`, `172.16.0.0/12`, `192.168.0.0/16` or `fc00::/7`.
    pub fn is_private(&self) -> bool {
        match self.family {
            Family::Ipv4 => {
                let (first, second) = (self.ipv4_octet(0), self.ipv4_octet(1));
                first == 10
                    || (first == 172 && second & 0xF0 == 16)
                    || (first == 192 && second == 168)
            },
            Family::Ipv6 => self.ipv6_top_hextet() & 0xFE00 == 0xFC00,
        }
    }

    /// `169.254.0.0/16` or `fe80::/10`.
    pub fn is_link_local(&self) -> bool {
        match self.family {
            Family::Ipv4 => self.ipv4_octet(0) == 169 && self.ipv4_octet(1) == 254,
            Family::Ipv6 => self.ipv6_top_hextet() & 0xFFC0 == 0xFE80,
        }
    }

    /// Formats per RFC 5952: the longest run of two or more zero chunks becomes `::`. A lone zero
    /// chunk is deliberately written out, so `1:2:3:4:5:6:7::` prints as `1:2:3:4:5:6:7:0`.
    fn fmt_ipv6(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bits.is_zero() {
            return write!(f, "::");
        }

        let chunks = self.hextets();

        // find the longest run of at least two zero chunks; the first one wins a tie
        let mut i = 0;
        let mut zero_index: Option<usize> = None;
        let mut zero_length = 1;
        while i < 8 {
            if chunks[i] != 0 {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            while j < 8 && chunks[j] == 0 {
                j += 1;
            }

            if zero_length < j - i {
                zero_index = Some(i);
                zero_length = j - i;
            }
            i = j;
        }

        let mut chunk_strings = Vec::with_capacity(8);
        let mut i = 0;
        while i < 8 {
            if zero_index == Some(i) {
                if i == 0 {
                    // the initial part of the address is zero
                    chunk_strings.push(String::new());
                }

                // an empty chunk causes two adjacent colons
                chunk_strings.push(String::new());
                i += zero_length;

                if i == 8 {
                    // the final part of the address is zero
                    chunk_strings.push(String::new());
                }
            } else {
                chunk_strings.push(format!("{:x}", chunks[i]));
                i += 1;
            }
        }

        write!(f, "{}", chunk_strings.join(":"))
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = if s.contains('.') {
            if s.contains(':') {
                Err(AddressParseError::UnknownAddressType)
            } else {
                parse_ipv4(s).map(|bits| Address { family: Family::Ipv4, bits })
            }
        } else if s.contains(':') {
            parse_ipv6(s).map(|bits| Address { family: Family::Ipv6, bits })
        } else {
            Err(AddressParseError::UnknownAddressType)
        };
        parsed.map_err(|e| Error::invalid_address(s, e))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family {
            Family::Ipv4 => {
                let [a, b, c, d] = self.ipv4_value().to_be_bytes();
                write!(f, "{}.{}.{}.{}", a, b, c, d)
            },
            Family::Ipv6 => self.fmt_ipv6(f),
        }
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Address::from_octets(addr.octets())
    }
}

impl From<Ipv6Addr> for Address {
    /// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) become IPv4 addresses.
    fn from(addr: Ipv6Addr) -> Self {
        match addr.to_ipv4_mapped() {
            Some(v4) => Address::from(v4),
            None => Address {
                family: Family::Ipv6,
                bits: AddressSet::from_u128(u128::from(addr)),
            },
        }
    }
}

impl From<IpAddr> for Address {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => Address::from(v4),
            IpAddr::V6(v6) => Address::from(v6),
        }
    }
}

fn set_from_hextets(hextets: &[u16; 8]) -> AddressSet {
    let value = hextets.iter()
        .fold(0u128, |acc, h| (acc << 16) | u128::from(*h));
    AddressSet::from_u128(value)
}

fn parse_ipv4(s: &str) -> Result<AddressSet, AddressParseError> {
    let chunks: Vec<&str> = s.split('.').collect();
    if chunks.len() != 4 {
        return Err(AddressParseError::IncorrectChunkCount(chunks.len(), 4));
    }

    let mut addr_val: u32 = 0;
    for (i, chunk) in chunks.iter().enumerate() {
        if chunk.is_empty() {
            return Err(AddressParseError::EmptyChunk(i));
        }
        if !chunk.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AddressParseError::InvalidChunk(i, String::from(*chunk)));
        }

        let chunk_val: u32 = chunk.parse()
            .map_err(|_| AddressParseError::InvalidChunk(i, String::from(*chunk)))?;
        if chunk_val > 255 {
            return Err(AddressParseError::ChunkOutOfRange(i, chunk_val, 255));
        }

        addr_val |= chunk_val << (24 - i * 8);
    }

    Ok(AddressSet::new(0, u64::from(addr_val)))
}

fn parse_hextet(index: usize, chunk: &str) -> Result<u16, AddressParseError> {
    if chunk.is_empty() {
        return Err(AddressParseError::EmptyChunk(index));
    }
    if chunk.len() > 4 || !chunk.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AddressParseError::InvalidChunk(index, String::from(chunk)));
    }
    u16::from_str_radix(chunk, 16)
        .map_err(|_| AddressParseError::InvalidChunk(index, String::from(chunk)))
}

fn split_chunks(part: &str) -> Vec<&str> {
    if part.is_empty() {
        Vec::new()
    } else {
        part.split(':').collect()
    }
}

fn parse_ipv6(s: &str) -> Result<AddressSet, AddressParseError> {
    if s == "::" {
        return Ok(AddressSet::ZERO);
    }

    let shortening_count = s.matches("::").count();
    if shortening_count > 1 {
        // "1234::5678::9abc" is invalid
        return Err(AddressParseError::TooManyShorteningElements(shortening_count, 1));
    }

    let mut hextets = [0u16; 8];
    if let Some((head, tail)) = s.split_once("::") {
        // shortened address "123::456a"; the gap stands for at least one zero chunk
        let head_chunks = split_chunks(head);
        let tail_chunks = split_chunks(tail);
        let given = head_chunks.len() + tail_chunks.len();
        if given > 7 {
            return Err(AddressParseError::IncorrectChunkCount(given, 7));
        }

        for (i, chunk) in head_chunks.iter().enumerate() {
            hextets[i] = parse_hextet(i, chunk)?;
        }
        let tail_start = 8 - tail_chunks.len();
        for (i, chunk) in tail_chunks.iter().enumerate() {
            hextets[tail_start + i] = parse_hextet(tail_start + i, chunk)?;
        }
    } else {
        // full address "123:45:678:9:ab:cd:ef:21"
        let chunks: Vec<&str> = s.split(':').collect();
        if chunks.len() != 8 {
            return Err(AddressParseError::IncorrectChunkCount(chunks.len(), 8));
        }
        for (i, chunk) in chunks.iter().enumerate() {
            hextets[i] = parse_hextet(i, chunk)?;
        }
    }

    Ok(set_from_hextets(&hextets))
}

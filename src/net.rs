use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;

use crate::addr::{Address, Family};
use crate::bitset::AddressSet;
use crate::cidr;
use crate::error::{Error, MaskError};


/// An IP network: a base address together with a contiguous prefix netmask.
///
/// The base address is always stored with its host bits cleared. Networks order by specificity,
/// longest prefix first, and then by base address.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Network {
    base_addr: Address,
    subnet_mask: AddressSet,
}

impl Network {
    pub fn new_with_prefix(
        addr: Address,
        cidr_prefix: u32,
    ) -> Result<Network, MaskError> {
        let subnet_mask = AddressSet::from_prefix_length(cidr_prefix, addr.family().width())?;
        Ok(Network::from_mask_bits(addr, subnet_mask))
    }

    /// Creates a network from an address and a netmask given in address form, e.g.
    /// `255.255.255.0`. The netmask must be of the same family and contiguous.
    pub fn new_with_mask(
        addr: Address,
        subnet_mask: Address,
    ) -> Result<Network, MaskError> {
        if addr.family() != subnet_mask.family() {
            return Err(MaskError::FamilyMismatch {
                addr: addr.family().version(),
                mask: subnet_mask.family().version(),
            });
        }
        if subnet_mask.bits().prefix_length(addr.family().width()).is_none() {
            return Err(MaskError::NonContiguous(subnet_mask.to_string()));
        }
        Ok(Network::from_mask_bits(addr, subnet_mask.bits()))
    }

    /// The network matching every address of the given family (`0.0.0.0/0` or `::/0`).
    pub fn default_route(family: Family) -> Network {
        Network {
            base_addr: Address::from_bits(family, AddressSet::ZERO),
            subnet_mask: AddressSet::ZERO,
        }
    }

    pub(crate) fn with_default_mask(addr: Address) -> Network {
        let subnet_mask = AddressSet::prefix_mask(addr.default_mask(), addr.family().width());
        Network::from_mask_bits(addr, subnet_mask)
    }

    fn from_mask_bits(addr: Address, subnet_mask: AddressSet) -> Network {
        // calculate base address by ANDing address with subnet mask
        let base_addr = Address::from_bits(addr.family(), addr.bits() & subnet_mask);
        Network {
            base_addr,
            subnet_mask,
        }
    }

    pub fn base_addr(&self) -> Address { self.base_addr }
    pub fn mask_bits(&self) -> AddressSet { self.subnet_mask }
    pub fn family(&self) -> Family { self.base_addr.family() }

    /// The netmask in address form, e.g. `255.255.255.0`.
    pub fn subnet_mask(&self) -> Address {
        Address::from_bits(self.family(), self.subnet_mask)
    }

    pub fn prefix_len(&self) -> u32 {
        self.subnet_mask.count_ones()
    }

    pub fn host_bits(&self) -> u32 {
        self.family().width() - self.prefix_len()
    }

    /// Whether this network matches every address (prefix length 0).
    pub fn is_default(&self) -> bool {
        self.prefix_len() == 0
    }

    /// Whether the address lies within this network. Addresses of the other family never do.
    pub fn contains(&self, addr: &Address) -> bool {
        addr.family() == self.family()
            && (addr.bits() & self.subnet_mask) == self.base_addr.bits()
    }

    /// The total number of addresses in this network, including network and broadcast addresses.
    pub fn address_count(&self) -> BigUint {
        BigUint::from(1u32) << self.host_bits()
    }

    /// The number of usable host addresses.
    ///
    /// IPv4 networks lose their network and broadcast addresses; IPv6 networks have no broadcast
    /// address and lose nothing. Networks with at most one host bit count as a single host.
    pub fn host_count(&self) -> BigUint {
        if self.host_bits() <= 1 {
            return BigUint::from(1u32);
        }

        let addr_count = self.address_count();
        match self.family() {
            Family::Ipv4 => addr_count - 2u32,
            Family::Ipv6 => addr_count,
        }
    }

    /// The broadcast address (all host bits set). Only IPv4 networks with more than one host have
    /// one.
    pub fn broadcast_addr(&self) -> Option<Address> {
        if self.family() != Family::Ipv4 || self.host_bits() <= 1 {
            return None;
        }
        Some(Address::from_bits(Family::Ipv4, self.base_addr.bits() | !self.subnet_mask))
    }
}

impl Ord for Network {
    fn cmp(&self, other: &Self) -> Ordering {
        other.prefix_len().cmp(&self.prefix_len())
            .then_with(|| self.base_addr.cmp(&other.base_addr))
    }
}
impl PartialOrd for Network {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        cidr::parse_cidr(s).map(|spec| spec.net)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base_addr, self.prefix_len())
    }
}

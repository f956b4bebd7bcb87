use std::ops::{BitAnd, BitOr, Not};

use crate::error::MaskError;


/// A 128-bit value stored as two 64-bit halves, used for IPv4 addresses, IPv6 addresses and
/// netmasks alike.
///
/// The value is read as a big-endian bit string: the most significant bit of `high` comes first,
/// the least significant bit of `low` comes last. IPv4 values only occupy the bottom 32 bits of
/// `low`. The derived ordering compares `high` first, then `low`, which is unsigned big-endian
/// ordering.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AddressSet {
    high: u64,
    low: u64,
}

impl AddressSet {
    pub const ZERO: AddressSet = AddressSet { high: 0, low: 0 };

    pub const fn new(
        high: u64,
        low: u64,
    ) -> AddressSet {
        AddressSet {
            high,
            low,
        }
    }

    pub const fn from_u128(value: u128) -> AddressSet {
        AddressSet::new((value >> 64) as u64, value as u64)
    }

    pub const fn to_u128(&self) -> u128 {
        ((self.high as u128) << 64) | (self.low as u128)
    }

    pub fn high(&self) -> u64 { self.high }
    pub fn low(&self) -> u64 { self.low }

    pub fn is_zero(&self) -> bool {
        self.high == 0 && self.low == 0
    }

    /// Returns the number of bits with the value 1 across both halves.
    pub fn count_ones(&self) -> u32 {
        self.high.count_ones() + self.low.count_ones()
    }

    /// Returns the number of 0-bits preceding the first 1-bit, scanning from the most significant
    /// bit of `high` down to the least significant bit of `low`. The all-zero value yields 128.
    pub fn leading_zeros(&self) -> u32 {
        if self.high != 0 {
            self.high.leading_zeros()
        } else {
            64 + self.low.leading_zeros()
        }
    }

    /// Builds a netmask of `prefix` one-bits, top-justified within an address space of `width`
    /// bits (32 for IPv4, 128 for IPv6).
    pub fn from_prefix_length(prefix: u32, width: u32) -> Result<AddressSet, MaskError> {
        if prefix > width {
            return Err(MaskError::PrefixOutOfRange(u64::from(prefix), width));
        }
        Ok(AddressSet::prefix_mask(prefix, width))
    }

    /// Same as `from_prefix_length` for callers that have already checked the prefix against the
    /// width. Prefixes beyond the width are clamped.
    pub(crate) fn prefix_mask(prefix: u32, width: u32) -> AddressSet {
        let width = width.min(128);
        let prefix = prefix.min(width);
        if prefix == 0 {
            return AddressSet::ZERO;
        }

        // `prefix` ones at the bottom, then shifted up to the top of the address space
        let ones = u128::MAX >> (128 - prefix);
        AddressSet::from_u128(ones << (width - prefix))
    }

    /// Returns the prefix length of this value if it is a well-formed netmask within an address
    /// space of `width` bits, i.e. a contiguous run of ones starting at the top of that space.
    pub fn prefix_length(&self, width: u32) -> Option<u32> {
        let width = width.min(128);
        if width < 128 && self.to_u128() >> width != 0 {
            // bits set outside the address space
            return None;
        }

        let ones = self.count_ones();
        if AddressSet::prefix_mask(ones, width) == *self {
            Some(ones)
        } else {
            None
        }
    }

    /// Returns a value whose bottom `width` bits are all ones.
    pub(crate) fn all_ones(width: u32) -> AddressSet {
        AddressSet::prefix_mask(width, width)
    }
}

impl BitAnd for AddressSet {
    type Output = AddressSet;

    fn bitand(self, rhs: Self) -> Self::Output {
        AddressSet::new(
            self.high & rhs.high,
            self.low & rhs.low,
        )
    }
}

impl BitOr for AddressSet {
    type Output = AddressSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        AddressSet::new(
            self.high | rhs.high,
            self.low | rhs.low,
        )
    }
}

impl Not for AddressSet {
    type Output = AddressSet;

    fn not(self) -> Self::Output {
        AddressSet::new(!self.high, !self.low)
    }
}

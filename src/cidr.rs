use once_cell::sync::Lazy;
use regex::Regex;

use crate::addr::Address;
use crate::error::{Error, MaskError};
use crate::net::Network;


static CIDR_REGEX: Lazy<Regex> = Lazy::new(||
    Regex::new("^(?P<addr>[^/]*)/(?P<prefix>[^/]*)$").unwrap()
);


/// An IP address together with the network it was written in, e.g. `192.168.67.236/24`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NetworkSpec {
    pub addr: Address,
    pub net: Network,
}

/// Parses `ADDRESS/PREFIX` where `PREFIX` is a decimal prefix length valid for the address family.
pub fn parse_cidr(spec: &str) -> Result<NetworkSpec, Error> {
    let caps = match CIDR_REGEX.captures(spec) {
        Some(c) => c,
        None => {
            return Err(Error::invalid_mask(spec, MaskError::NotNumeric(String::new())));
        },
    };
    let addr_str = caps.name("addr").expect("'addr' captured").as_str();
    let prefix_str = caps.name("prefix").expect("'prefix' captured").as_str();

    let addr: Address = addr_str.parse()?;
    let prefix = parse_prefix(prefix_str, addr.family().width())
        .map_err(|e| Error::invalid_mask(spec, e))?;
    let net = Network::new_with_prefix(addr, prefix)
        .map_err(|e| Error::invalid_mask(spec, e))?;

    Ok(NetworkSpec {
        addr,
        net,
    })
}

/// Parses either `ADDRESS/PREFIX` or a lone address. A lone address is placed in the network of
/// its default mask.
pub fn parse_netspec(spec: &str) -> Result<NetworkSpec, Error> {
    if spec.contains('/') {
        return parse_cidr(spec);
    }

    let addr: Address = spec.parse()?;
    Ok(NetworkSpec {
        addr,
        net: addr.network(),
    })
}

fn parse_prefix(prefix_str: &str, width: u32) -> Result<u32, MaskError> {
    if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MaskError::NotNumeric(String::from(prefix_str)));
    }
    // only digits are left, so parsing can only fail by overflowing
    let prefix: u64 = prefix_str.parse().unwrap_or(u64::MAX);
    if prefix > u64::from(width) {
        return Err(MaskError::PrefixOutOfRange(prefix, width));
    }
    Ok(prefix as u32)
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::error::AddressParseError;

    #[test]
    fn test_parse_cidr() {
        let spec = parse_cidr("192.168.67.236/24").unwrap();
        assert_eq!("192.168.67.236", spec.addr.to_string());
        assert_eq!("192.168.67.0/24", spec.net.to_string());

        let spec6 = parse_cidr("fe80::a55e:55ed:b50:1e7e/10").unwrap();
        assert_eq!("fe80::a55e:55ed:b50:1e7e", spec6.addr.to_string());
        assert_eq!("fe80::/10", spec6.net.to_string());

        assert_eq!("0.0.0.0/0", parse_cidr("0.0.0.0/0").unwrap().net.to_string());
        assert_eq!("::/0", parse_cidr("::/0").unwrap().net.to_string());
    }

    #[test]
    fn test_parse_cidr_errors() {
        assert_eq!(
            Err(Error::InvalidMask {
                text: String::from("10.0.0.0/33"),
                source: MaskError::PrefixOutOfRange(33, 32),
            }),
            parse_cidr("10.0.0.0/33"),
        );
        assert_eq!(
            Err(Error::InvalidMask {
                text: String::from("::/129"),
                source: MaskError::PrefixOutOfRange(129, 128),
            }),
            parse_cidr("::/129"),
        );
        assert_eq!(
            Err(Error::InvalidMask {
                text: String::from("10.0.0.0/99999999999"),
                source: MaskError::PrefixOutOfRange(99999999999, 32),
            }),
            parse_cidr("10.0.0.0/99999999999"),
        );
        assert_eq!(
            Err(Error::InvalidMask {
                text: String::from("::/4294967296"),
                source: MaskError::PrefixOutOfRange(4294967296, 128),
            }),
            parse_cidr("::/4294967296"),
        );
        assert_eq!(
            Err(Error::InvalidMask {
                text: String::from("10.0.0.0/abc"),
                source: MaskError::NotNumeric(String::from("abc")),
            }),
            parse_cidr("10.0.0.0/abc"),
        );
        assert_eq!(
            Err(Error::InvalidMask {
                text: String::from("10.0.0.0/"),
                source: MaskError::NotNumeric(String::new()),
            }),
            parse_cidr("10.0.0.0/"),
        );
        assert!(matches!(parse_cidr("10.0.0.0/8/8"), Err(Error::InvalidMask { .. })));
        assert!(matches!(parse_cidr("10.0.0.0"), Err(Error::InvalidMask { .. })));
        assert_eq!(
            Err(Error::InvalidAddress {
                text: String::from("10.0.0"),
                source: AddressParseError::IncorrectChunkCount(3, 4),
            }),
            parse_cidr("10.0.0/8"),
        );
    }

    #[test]
    fn test_parse_netspec() {
        let spec = parse_netspec("192.168.67.236").unwrap();
        assert_eq!("192.168.67.0/24", spec.net.to_string());

        let spec = parse_netspec("10.20.30.40/16").unwrap();
        assert_eq!("10.20.0.0/16", spec.net.to_string());

        let spec = parse_netspec("fe80::1").unwrap();
        assert_eq!("fe80::/10", spec.net.to_string());

        assert!(matches!(parse_netspec("1:1"), Err(Error::InvalidAddress { .. })));
    }
}

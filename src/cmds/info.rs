use std::io::{self, Write};

use crate::cidr::NetworkSpec;
use crate::cmds::{IP_ADDRESS_COLOR, LABEL_COLOR};
use crate::console::{Color, write_in_color};


const LABEL_WIDTH: isize = 11;
const YES_COLOR: Color = Color::Green;
const NO_COLOR: Color = Color::Red;
const CLASS_COLOR: Color = Color::Magenta;

const CHECK: &str = "v";
const CROSS: &str = "x";
const UNKNOWN: &str = "?";


fn write_label<W: Write>(out: &mut W, label: &str) -> io::Result<()> {
    write_in_color(out, label, Some(LABEL_COLOR), LABEL_WIDTH)?;
    write_in_color(out, ": ", Some(LABEL_COLOR), 0)
}

fn write_value<W: Write>(out: &mut W, label: &str, value: &str, color: Color) -> io::Result<()> {
    write_label(out, label)?;
    let shown = if value.is_empty() { UNKNOWN } else { value };
    write_in_color(out, shown, Some(color), 0)?;
    writeln!(out)
}

fn write_flag<W: Write>(out: &mut W, label: &str, flag: bool) -> io::Result<()> {
    if flag {
        write_value(out, label, CHECK, YES_COLOR)
    } else {
        write_value(out, label, CROSS, NO_COLOR)
    }
}

/// Describes an address and the network it was given in (or its default network).
///
/// The class and broadcast lines only apply to IPv4 and are left out for IPv6.
pub fn show_info<W: Write>(out: &mut W, spec: &NetworkSpec) -> io::Result<()> {
    let addr = spec.addr;
    let net = spec.net;

    write_value(out, "address", &addr.to_string(), IP_ADDRESS_COLOR)?;
    write_flag(out, "IPv4", addr.is_ipv4())?;
    write_flag(out, "IPv6", addr.is_ipv6())?;
    write_flag(out, "private", addr.is_private())?;
    write_flag(out, "loopback", addr.is_loopback())?;
    write_flag(out, "multicast", addr.is_multicast())?;
    write_flag(out, "link-local", addr.is_link_local())?;
    if addr.is_ipv4() {
        let class = addr.class()
            .map(|c| c.to_string())
            .unwrap_or_default();
        write_value(out, "class", &class, CLASS_COLOR)?;
    }
    write_value(out, "network", &net.base_addr().to_string(), IP_ADDRESS_COLOR)?;
    if addr.is_ipv4() {
        let broadcast = net.broadcast_addr()
            .map(|b| b.to_string())
            .unwrap_or_default();
        write_value(out, "broadcast", &broadcast, IP_ADDRESS_COLOR)?;
    }
    write_value(out, "netmask", &net.subnet_mask().to_string(), IP_ADDRESS_COLOR)?;
    write_value(out, "host(s)", &net.host_count().to_string(), LABEL_COLOR)?;

    Ok(())
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cidr::parse_netspec;

    fn info(spec: &str) -> String {
        #[cfg(feature = "console")]
        console::set_colors_enabled(false);

        let mut out = Vec::new();
        show_info(&mut out, &parse_netspec(spec).unwrap()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_ipv4_info() {
        let expected = "\
address    : 192.168.67.236
IPv4       : v
IPv6       : x
private    : v
loopback   : x
multicast  : x
link-local : x
class      : C
network    : 192.168.64.0
broadcast  : 192.168.127.255
netmask    : 255.255.192.0
host(s)    : 16382
";
        assert_eq!(expected, info("192.168.67.236/18"));
    }

    #[test]
    fn test_ipv4_default_network() {
        let text = info("10.1.2.3");
        assert!(text.contains("class      : A\n"));
        assert!(text.contains("network    : 10.0.0.0\n"));
        assert!(text.contains("netmask    : 255.0.0.0\n"));
    }

    #[test]
    fn test_ipv4_host_route_has_no_broadcast() {
        let text = info("10.1.2.3/32");
        assert!(text.contains("broadcast  : ?\n"));
        assert!(text.contains("host(s)    : 1\n"));
    }

    #[test]
    fn test_ipv6_info() {
        let expected = "\
address    : fe80::1
IPv4       : x
IPv6       : v
private    : x
loopback   : x
multicast  : x
link-local : v
network    : fe80::
netmask    : ffc0::
host(s)    : 332306998946228968225951765070086144
";
        assert_eq!(expected, info("fe80::1"));
    }
}

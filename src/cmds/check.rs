use std::io::{self, Write};

use crate::addr::Address;
use crate::cmds::{ARROW, ERROR_COLOR, IP_ADDRESS_COLOR, LABEL_COLOR, MUTED_COLOR};
use crate::console::write_in_color;
use crate::resolve::trace_all;
use crate::topology::Topology;


fn write_hops<W: Write>(out: &mut W, hops: &[Address], destination: &Address) -> io::Result<()> {
    write_in_color(out, format!("{:2} hop(s): ", hops.len()), Some(LABEL_COLOR), 0)?;
    for hop in hops {
        write_in_color(out, hop.to_string(), Some(IP_ADDRESS_COLOR), 0)?;
        write_in_color(out, format!(" {} ", ARROW), Some(MUTED_COLOR), 0)?;
    }
    write_in_color(out, destination.to_string(), Some(IP_ADDRESS_COLOR), 0)?;
    writeln!(out)
}

/// Traces the topology's probe addresses followed by `extra`, printing one line per destination:
/// either the path taken or the reason it could not be resolved.
///
/// Returns the number of destinations that could not be resolved.
pub fn check_routes<W: Write>(out: &mut W, topology: &Topology, extra: &[Address]) -> io::Result<usize> {
    let mut destinations = topology.probes().to_vec();
    destinations.extend_from_slice(extra);

    let mut failures = 0;
    for (destination, result) in trace_all(topology, &destinations) {
        match result {
            Ok(hops) => write_hops(out, &hops, &destination)?,
            Err(e) => {
                failures += 1;
                write_in_color(out, e.to_string(), Some(ERROR_COLOR), 0)?;
                writeln!(out)?;
            },
        }
    }
    Ok(failures)
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::route::{Route, Router, RouterKind, Status};

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    fn route(network: &str, gateway: &str) -> Route {
        Route {
            network: network.parse().unwrap(),
            gateway: addr(gateway),
            interface: String::new(),
            status: Status::Up,
            metric: 0,
        }
    }

    #[test]
    fn test_check_routes() {
        #[cfg(feature = "console")]
        console::set_colors_enabled(false);

        let topo = Topology::new(
            vec![addr("10.1.0.9"), addr("172.16.4.4")],
            vec![route("10.0.0.0/8", "10.0.0.1")],
            vec![
                Router::new("core", addr("10.0.0.1"), RouterKind::Router, vec![
                    route("10.1.0.0/16", "10.1.0.9"),
                    route("10.2.0.0/16", "10.2.0.1"),
                    route("10.3.0.0/16", "10.3.0.1"),
                ]),
                Router::new("pc", addr("10.1.0.9"), RouterKind::Host, vec![]),
                Router::new("loop", addr("10.2.0.1"), RouterKind::Router, vec![route("0.0.0.0/0", "10.0.0.1")]),
            ],
        );

        let mut out = Vec::new();
        let failures = check_routes(&mut out, &topo, &[addr("10.2.3.4"), addr("10.3.3.3")]).unwrap();
        assert_eq!(3, failures);

        let expected = " 2 hop(s): 10.0.0.1 \u{279C} 10.1.0.9 \u{279C} 10.1.0.9
172.16.0.0/16: network unreachable
10.0.0.1: routing loop detected
10.3.0.1: router not found
";
        assert_eq!(expected, String::from_utf8(out).unwrap());
    }
}

use std::io::{self, Write};

use crate::cmds::{ID_COLOR, IP_ADDRESS_COLOR, LABEL_COLOR, MUTED_COLOR, NETWORK_COLOR};
use crate::console::write_in_color;
use crate::route::RoutingTable;
use crate::topology::Topology;


const ADDRESS_WIDTH: isize = 16;
const INTERFACE_WIDTH: isize = -6;
const METRIC_WIDTH: isize = -4;


fn write_sep<W: Write>(out: &mut W) -> io::Result<()> {
    write_in_color(out, " | ", Some(MUTED_COLOR), 0)
}

fn write_routes<W: Write>(out: &mut W, table: &RoutingTable) -> io::Result<()> {
    for route in table.routes() {
        write!(out, " ")?;
        write_in_color(out, route.network.base_addr().to_string(), Some(NETWORK_COLOR), ADDRESS_WIDTH)?;
        write_sep(out)?;
        write_in_color(out, route.network.subnet_mask().to_string(), Some(NETWORK_COLOR), ADDRESS_WIDTH)?;
        write_sep(out)?;
        write_in_color(out, route.gateway.to_string(), Some(IP_ADDRESS_COLOR), ADDRESS_WIDTH)?;
        write_sep(out)?;
        write_in_color(out, &route.interface, None, INTERFACE_WIDTH)?;
        write_sep(out)?;
        write_in_color(out, route.metric.to_string(), None, METRIC_WIDTH)?;
        write_sep(out)?;
        write_in_color(out, route.status.to_string(), Some(LABEL_COLOR), 0)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Prints the topology's own routes, then the table of every router that has routes, each under a
/// heading naming the router.
pub fn print_tables<W: Write>(out: &mut W, topology: &Topology) -> io::Result<()> {
    write_routes(out, topology.routes())?;

    for router in topology.routers().routers() {
        if router.table.is_empty() {
            continue;
        }

        writeln!(out)?;
        write_in_color(out, &router.id, Some(ID_COLOR), 0)?;
        write!(out, " (")?;
        write_in_color(out, router.address.to_string(), Some(IP_ADDRESS_COLOR), 0)?;
        writeln!(out, ")")?;
        write_routes(out, &router.table)?;
    }
    Ok(())
}

use log::debug;
use rayon::prelude::*;

use crate::addr::Address;
use crate::error::Error;
use crate::route::Route;
use crate::topology::{RouterSet, Topology};


/// Follows the gateways of successive routers towards `destination`, starting with `route`.
///
/// Returns the gateway addresses in the order they are visited. The walk stops successfully at the
/// first host (a router declared as a host or one without routes). Revisiting a gateway fails with
/// `RoutingLoopDetected`, which also guarantees that the walk terminates.
pub fn trace(
    destination: &Address,
    route: &Route,
    routers: &RouterSet,
) -> Result<Vec<Address>, Error> {
    let mut hops: Vec<Address> = Vec::new();
    let mut gateway = route.gateway;
    loop {
        if hops.contains(&gateway) {
            return Err(Error::RoutingLoopDetected(gateway));
        }
        hops.push(gateway);

        let router = routers.find(&gateway)?;
        debug!("{}: hop {} at {} ({})", destination, hops.len(), router.id, gateway);
        if router.is_host() {
            break;
        }

        gateway = router.best_route(destination)?.gateway;
    }
    Ok(hops)
}

/// Traces each destination through the topology. Destinations are resolved in parallel; the
/// results come back in the order of `destinations`.
pub fn trace_all(
    topology: &Topology,
    destinations: &[Address],
) -> Vec<(Address, Result<Vec<Address>, Error>)> {
    destinations
        .par_iter()
        .map(|dest| (*dest, topology.trace(dest)))
        .collect()
}

/// Traces every probe address of the topology.
pub fn trace_probes(topology: &Topology) -> Vec<(Address, Result<Vec<Address>, Error>)> {
    trace_all(topology, topology.probes())
}

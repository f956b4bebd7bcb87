use crate::addr::Address;
use crate::error::Error;
use crate::resolve;
use crate::route::{Route, Router, RoutingTable};


/// The routers of a topology, kept sorted by descending address so that they can be looked up by
/// address with a binary search.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RouterSet {
    routers: Vec<Router>,
}
impl RouterSet {
    pub fn new(mut routers: Vec<Router>) -> RouterSet {
        routers.sort_by(|a, b| b.address.cmp(&a.address));
        RouterSet {
            routers,
        }
    }

    pub fn routers(&self) -> &[Router] { &self.routers }
    pub fn len(&self) -> usize { self.routers.len() }
    pub fn is_empty(&self) -> bool { self.routers.is_empty() }

    /// Finds the router owning the given address.
    pub fn find(&self, address: &Address) -> Result<&Router, Error> {
        // descending order: routers with greater addresses come first
        self.routers.binary_search_by(|r| address.cmp(&r.address))
            .map(|i| &self.routers[i])
            .map_err(|_| Error::RouterNotFound(*address))
    }
}
impl FromIterator<Router> for RouterSet {
    fn from_iter<I: IntoIterator<Item = Router>>(iter: I) -> Self {
        RouterSet::new(iter.into_iter().collect())
    }
}

/// Everything known about a network: the addresses to probe, the routes used to leave the local
/// machine and the routers with their own tables.
///
/// All lists are sorted once on construction and never change afterwards, so a topology can be
/// shared freely between concurrent queries.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Topology {
    probes: Vec<Address>,
    routes: RoutingTable,
    routers: RouterSet,
}
impl Topology {
    pub fn new(
        probes: Vec<Address>,
        routes: Vec<Route>,
        routers: Vec<Router>,
    ) -> Topology {
        Topology {
            probes,
            routes: RoutingTable::new(routes),
            routers: RouterSet::new(routers),
        }
    }

    pub fn probes(&self) -> &[Address] { &self.probes }
    pub fn routes(&self) -> &RoutingTable { &self.routes }
    pub fn routers(&self) -> &RouterSet { &self.routers }

    /// Selects the best route for the destination from the topology's own routes.
    pub fn best_route(&self, destination: &Address) -> Result<&Route, Error> {
        self.routes.best_route(destination)
    }

    pub fn find_router(&self, address: &Address) -> Result<&Router, Error> {
        self.routers.find(address)
    }

    /// Resolves the hops taken towards the destination, starting from the topology's own best
    /// route.
    pub fn trace(&self, destination: &Address) -> Result<Vec<Address>, Error> {
        let route = self.best_route(destination)?;
        resolve::trace(destination, route, &self.routers)
    }
}

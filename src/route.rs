use std::fmt;
use std::str::FromStr;

use log::trace;
use thiserror::Error;

use crate::addr::Address;
use crate::error::Error;
use crate::net::Network;


/// Whether a route takes part in route selection.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Status {
    Up,
    #[default]
    Down,
}
impl Status {
    pub fn is_up(&self) -> bool {
        *self == Status::Up
    }
}
impl FromStr for Status {
    type Err = ParseStatusError;

    /// An empty status means `Down`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "U" | "u" | "up" | "UP" => Ok(Status::Up),
            "" | "D" | "d" | "down" | "DOWN" => Ok(Status::Down),
            other => Err(ParseStatusError(String::from(other))),
        }
    }
}
impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Up => write!(f, "U"),
            Status::Down => write!(f, "D"),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{0:?}: unknown route status")]
pub struct ParseStatusError(pub String);

/// The kind of device a router entry stands for.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum RouterKind {
    #[default]
    Host,
    Router,
    Switch,
    Firewall,
}
impl FromStr for RouterKind {
    type Err = ParseKindError;

    /// An empty kind means `Host`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "host" => Ok(RouterKind::Host),
            "router" => Ok(RouterKind::Router),
            "switch" => Ok(RouterKind::Switch),
            "fw" | "firewall" => Ok(RouterKind::Firewall),
            other => Err(ParseKindError(String::from(other))),
        }
    }
}
impl fmt::Display for RouterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouterKind::Host => "host",
            RouterKind::Router => "router",
            RouterKind::Switch => "switch",
            RouterKind::Firewall => "firewall",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{0:?}: unknown device type")]
pub struct ParseKindError(pub String);

/// A static route: packets for `network` are handed to `gateway`.
///
/// `metric` is informational only; it never influences route selection.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Route {
    pub network: Network,
    pub gateway: Address,
    pub interface: String,
    pub status: Status,
    pub metric: u32,
}
impl Route {
    /// Whether this route is up and either covers the destination or is a default route.
    pub fn matches(&self, destination: &Address) -> bool {
        self.status.is_up()
            && (self.network.contains(destination) || self.network.is_default())
    }
}

/// A list of routes kept in order of descending specificity, so that the first matching route is
/// the most specific one.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoutingTable {
    routes: Vec<Route>,
}
impl RoutingTable {
    pub fn new(mut routes: Vec<Route>) -> RoutingTable {
        // stable: routes for the same network keep the order they were given in
        routes.sort_by(|a, b| a.network.cmp(&b.network));
        RoutingTable {
            routes,
        }
    }

    pub fn routes(&self) -> &[Route] { &self.routes }
    pub fn len(&self) -> usize { self.routes.len() }
    pub fn is_empty(&self) -> bool { self.routes.is_empty() }

    /// Returns the most specific route that is up and matches the destination.
    pub fn best_route(&self, destination: &Address) -> Result<&Route, Error> {
        let found = self.routes.iter()
            .find(|r| r.matches(destination));
        match found {
            Some(route) => {
                trace!("{}: selected {} via {}", destination, route.network, route.gateway);
                Ok(route)
            },
            None => Err(Error::NetworkUnreachable(destination.network())),
        }
    }
}
impl FromIterator<Route> for RoutingTable {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        RoutingTable::new(iter.into_iter().collect())
    }
}

/// A device in the topology, identified by its id and address, together with its own routes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Router {
    pub id: String,
    pub address: Address,
    pub kind: RouterKind,
    pub table: RoutingTable,
}
impl Router {
    pub fn new<S: Into<String>>(id: S, address: Address, kind: RouterKind, routes: Vec<Route>) -> Router {
        Router {
            id: id.into(),
            address,
            kind,
            table: RoutingTable::new(routes),
        }
    }

    /// Hosts are where a trace ends: either declared as such or without any routes.
    pub fn is_host(&self) -> bool {
        self.kind == RouterKind::Host || self.table.is_empty()
    }

    pub fn best_route(&self, destination: &Address) -> Result<&Route, Error> {
        self.table.best_route(destination)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    fn route(network: &str, gateway: &str, status: Status) -> Route {
        Route {
            network: network.parse().unwrap(),
            gateway: gateway.parse().unwrap(),
            interface: String::from("eth0"),
            status,
            metric: 0,
        }
    }

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(Ok(Status::Up), "U".parse());
        assert_eq!(Ok(Status::Up), "up".parse());
        assert_eq!(Ok(Status::Down), "D".parse());
        assert_eq!(Ok(Status::Down), "".parse());
        assert_eq!(Err(ParseStatusError(String::from("sideways"))), "sideways".parse::<Status>());
        assert_eq!(Status::Down, Status::default());
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(Ok(RouterKind::Host), "".parse());
        assert_eq!(Ok(RouterKind::Router), "router".parse());
        assert_eq!(Ok(RouterKind::Firewall), "fw".parse());
        assert_eq!(Ok(RouterKind::Firewall), "firewall".parse());
        assert_eq!(Ok(RouterKind::Switch), "switch".parse());
        assert!("toaster".parse::<RouterKind>().is_err());
    }

    #[test]
    fn test_table_order() {
        let table = RoutingTable::new(vec![
            route("0.0.0.0/0", "10.0.0.1", Status::Up),
            route("10.0.0.0/16", "10.0.0.2", Status::Up),
            route("10.0.1.0/24", "10.0.0.3", Status::Up),
            route("10.0.0.0/24", "10.0.0.4", Status::Up),
        ]);
        let order: Vec<String> = table.routes().iter().map(|r| r.network.to_string()).collect();
        assert_eq!(vec!["10.0.0.0/24", "10.0.1.0/24", "10.0.0.0/16", "0.0.0.0/0"], order);
    }

    #[test]
    fn test_most_specific_wins() {
        let table: RoutingTable = vec![
            route("10.1.0.0/16", "10.0.0.16", Status::Up),
            route("10.1.2.0/24", "10.0.0.24", Status::Up),
        ].into_iter().collect();
        assert_eq!(addr("10.0.0.24"), table.best_route(&addr("10.1.2.3")).unwrap().gateway);
        assert_eq!(addr("10.0.0.16"), table.best_route(&addr("10.1.9.3")).unwrap().gateway);
    }

    #[test]
    fn test_down_routes_are_skipped() {
        let table = RoutingTable::new(vec![
            route("10.1.2.0/24", "10.0.0.24", Status::Down),
            route("10.1.0.0/16", "10.0.0.16", Status::Up),
        ]);
        assert_eq!(addr("10.0.0.16"), table.best_route(&addr("10.1.2.3")).unwrap().gateway);
    }

    #[test]
    fn test_default_route_matches_everything() {
        let table = RoutingTable::new(vec![route("0.0.0.0/0", "10.0.0.1", Status::Up)]);
        assert_eq!(addr("10.0.0.1"), table.best_route(&addr("8.8.8.8")).unwrap().gateway);
        assert_eq!(addr("10.0.0.1"), table.best_route(&addr("192.168.1.1")).unwrap().gateway);
        assert_eq!(addr("10.0.0.1"), table.best_route(&addr("2001:db8::1")).unwrap().gateway);
    }

    #[test]
    fn test_metric_does_not_matter() {
        let mut cheap = route("10.1.0.0/16", "10.0.0.2", Status::Up);
        cheap.metric = 1;
        let mut expensive = route("10.1.0.0/16", "10.0.0.1", Status::Up);
        expensive.metric = 100;
        let table = RoutingTable::new(vec![expensive, cheap]);
        // same network: table order decides, and the table keeps the given order
        assert_eq!(addr("10.0.0.1"), table.best_route(&addr("10.1.2.3")).unwrap().gateway);
    }

    #[test]
    fn test_unreachable() {
        let table = RoutingTable::new(vec![route("10.1.0.0/16", "10.0.0.16", Status::Up)]);
        assert_eq!(
            Err(Error::NetworkUnreachable("192.168.67.0/24".parse().unwrap())),
            table.best_route(&addr("192.168.67.236")),
        );
        assert_eq!(
            Err(Error::NetworkUnreachable("172.16.0.0/16".parse().unwrap())),
            RoutingTable::default().best_route(&addr("172.16.5.4")),
        );
    }

    #[test]
    fn test_router_is_host() {
        let host = Router::new("pc", addr("10.0.0.9"), RouterKind::Router, vec![]);
        assert!(host.is_host());
        let declared = Router::new("pc", addr("10.0.0.9"), RouterKind::Host, vec![route("0.0.0.0/0", "10.0.0.1", Status::Up)]);
        assert!(declared.is_host());
        let router = Router::new("gw", addr("10.0.0.1"), RouterKind::Router, vec![route("0.0.0.0/0", "10.0.0.254", Status::Up)]);
        assert!(!router.is_host());
    }
}

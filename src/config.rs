//! Loading of topology files.
//!
//! A topology file is a YAML document with three optional lists: `addr` (addresses to probe),
//! `route` (routes of the local machine) and `device` (routers with their own routes). The records
//! are decoded as-is and then converted into a [`Topology`] in one pass.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::addr::Address;
use crate::cidr::parse_netspec;
use crate::error::Error;
use crate::route::{ParseKindError, ParseStatusError, Route, Router, RouterKind, Status};
use crate::topology::Topology;


#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("failed to decode topology: {0}")]
    Decode(#[from] serde_yaml::Error),

    #[error("{context}: {source}")]
    Record { context: String, source: RecordError },
}

/// A value within a record that could not be converted.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RecordError {
    #[error(transparent)]
    Value(#[from] Error),

    #[error(transparent)]
    Status(#[from] ParseStatusError),

    #[error(transparent)]
    Kind(#[from] ParseKindError),
}

/// The topology file as written.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct TopologyConfig {
    #[serde(rename = "addr")]
    pub probes: Vec<String>,

    #[serde(rename = "route")]
    pub routes: Vec<RouteConfig>,

    #[serde(rename = "device")]
    pub routers: Vec<RouterConfig>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct RouteConfig {
    /// `ADDRESS/PREFIX`, or a lone address that takes its default mask
    pub network: String,

    pub gateway: String,

    #[serde(default, rename = "iface")]
    pub interface: String,

    /// `U` or `D`; empty or missing means down
    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub metric: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct RouterConfig {
    pub id: String,

    /// `host`, `router`, `switch`, `fw` or `firewall`; empty or missing means host
    #[serde(default, rename = "type")]
    pub kind: String,

    #[serde(rename = "ip")]
    pub address: String,

    #[serde(default, rename = "route")]
    pub routes: Vec<RouteConfig>,
}

fn record<T, E: Into<RecordError>>(context: impl FnOnce() -> String, result: Result<T, E>) -> Result<T, LoadError> {
    result.map_err(|e| LoadError::Record { context: context(), source: e.into() })
}

impl RouteConfig {
    fn to_route(&self, owner: &str) -> Result<Route, LoadError> {
        let context = || format!("{}: route {}", owner, self.network);

        let network = record(context, parse_netspec(&self.network))?.net;
        let gateway: Address = record(context, self.gateway.parse::<Address>())?;
        let status: Status = record(context, self.state.parse::<Status>())?;
        if self.state.is_empty() {
            debug!("{}: no state given, assuming down", context());
        }

        Ok(Route {
            network,
            gateway,
            interface: self.interface.clone(),
            status,
            metric: self.metric,
        })
    }
}

impl RouterConfig {
    fn to_router(&self) -> Result<Router, LoadError> {
        let context = || format!("device {:?}", self.id);

        let address: Address = record(context, self.address.parse::<Address>())?;
        let kind: RouterKind = record(context, self.kind.parse::<RouterKind>())?;
        let owner = context();
        let routes = self.routes.iter()
            .map(|r| r.to_route(&owner))
            .collect::<Result<Vec<Route>, LoadError>>()?;

        Ok(Router::new(self.id.clone(), address, kind, routes))
    }
}

impl TopologyConfig {
    pub fn from_yaml(text: &str) -> Result<TopologyConfig, LoadError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Converts the records into a topology, sorting all route lists and the routers.
    pub fn into_topology(self) -> Result<Topology, LoadError> {
        let probes = self.probes.iter()
            .map(|p| record(|| format!("addr {}", p), parse_netspec(p)).map(|spec| spec.addr))
            .collect::<Result<Vec<Address>, LoadError>>()?;
        let routes = self.routes.iter()
            .map(|r| r.to_route("topology"))
            .collect::<Result<Vec<Route>, LoadError>>()?;
        let routers = self.routers.iter()
            .map(|r| r.to_router())
            .collect::<Result<Vec<Router>, LoadError>>()?;

        Ok(Topology::new(probes, routes, routers))
    }
}

/// Reads and converts a topology file.
pub fn load_topology(path: &Path) -> Result<Topology, LoadError> {
    info!("Loading topology from: {:?}", path);

    let file = File::open(path)
        .map_err(|e| LoadError::Io { path: path.to_path_buf(), source: e })?;
    let config: TopologyConfig = serde_yaml::from_reader(file)?;
    let topology = config.into_topology()?;

    info!(
        "Loaded {} router(s), {} route(s), {} probe(s)",
        topology.routers().len(), topology.routes().len(), topology.probes().len(),
    );
    Ok(topology)
}

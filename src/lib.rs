//! Static IP routing over a described topology.
//!
//! Addresses and networks of both IP families are parsed and compared through [`Address`] and
//! [`Network`]. A [`Topology`] holds routing tables for the local machine and for every known
//! router; it can trace the gateways a packet passes through on the way to a destination and build
//! a tree of which routers lead to which.

pub mod addr;
pub mod bitset;
pub mod cidr;
pub mod cmds;
pub mod config;
pub mod console;
pub mod error;
pub mod graph;
pub mod net;
pub mod resolve;
pub mod route;
pub mod topology;


pub use crate::addr::{Address, Family};
pub use crate::cidr::{NetworkSpec, parse_cidr, parse_netspec};
pub use crate::config::{LoadError, TopologyConfig, load_topology};
pub use crate::error::Error;
pub use crate::net::Network;
pub use crate::route::{Route, Router, RouterKind, RoutingTable, Status};
pub use crate::topology::{RouterSet, Topology};

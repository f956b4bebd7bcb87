use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;

use riproute::cmds::check::check_routes;
use riproute::cmds::graph::print_graph;
use riproute::cmds::info::show_info;
use riproute::cmds::tables::print_tables;
use riproute::graph::build_tree;
use riproute::{Address, Topology, load_topology, parse_netspec};


/// Static route inspection for a described network topology
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Describe an address and the network it belongs to
    Info {
        /// ADDRESS or ADDRESS/PREFIX
        spec: String,
    },

    /// Print the routing tables of a topology
    Tables {
        /// Path to the topology YAML file
        topology: PathBuf,
    },

    /// Trace the probe addresses of a topology, plus any given here
    Check {
        /// Path to the topology YAML file
        topology: PathBuf,

        /// Additional destinations (ADDRESS or ADDRESS/PREFIX)
        addresses: Vec<String>,
    },

    /// Print which routers lead to which, starting from every router
    Graph {
        /// Path to the topology YAML file
        topology: PathBuf,
    },
}


fn load(path: &Path) -> Result<Topology> {
    load_topology(path)
        .wrap_err_with(|| format!("Failed to load topology '{}'", path.display()))
}

fn parse_destinations(specs: &[String]) -> Result<Vec<Address>> {
    specs.iter()
        .map(|s| parse_netspec(s).map(|spec| spec.addr).wrap_err("Invalid destination"))
        .collect()
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Info { spec } => {
            let spec = parse_netspec(&spec)?;
            show_info(&mut out, &spec)?;
        },
        Command::Tables { topology } => {
            let topology = load(&topology)?;
            print_tables(&mut out, &topology)?;
        },
        Command::Check { topology, addresses } => {
            let extra = parse_destinations(&addresses)?;
            let topology = load(&topology)?;
            let failures = check_routes(&mut out, &topology, &extra)?;
            if failures > 0 {
                info!("{} destination(s) could not be resolved", failures);
                out.flush()?;
                std::process::exit(1);
            }
        },
        Command::Graph { topology } => {
            let topology = load(&topology)?;
            let forest = build_tree(&topology);
            info!("Graph is {} level(s) deep", forest.max_depth);
            print_graph(&mut out, &forest)?;
        },
    }

    out.flush()?;
    Ok(())
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::parse_from(["riproute", "check", "topo.yaml", "10.0.0.1", "10.1.0.0/16"]);
        match args.command {
            Command::Check { topology, addresses } => {
                assert_eq!(PathBuf::from("topo.yaml"), topology);
                assert_eq!(vec!["10.0.0.1", "10.1.0.0/16"], addresses);
            },
            other => panic!("unexpected command {:?}", other),
        }

        assert!(Args::try_parse_from(["riproute", "graph"]).is_err());
    }

    #[test]
    fn test_parse_destinations() {
        let parsed = parse_destinations(&[String::from("10.0.0.1"), String::from("10.1.2.3/16")]).unwrap();
        assert_eq!(vec!["10.0.0.1".parse::<Address>().unwrap(), "10.1.2.3".parse().unwrap()], parsed);
        assert!(parse_destinations(&[String::from("10.0.0")]).is_err());
    }
}

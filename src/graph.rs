use log::warn;

use crate::addr::Address;
use crate::net::Network;
use crate::route::Router;
use crate::topology::{RouterSet, Topology};


/// A router in the topology tree, reached from its parent through the route for `via`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node<'a> {
    pub router: &'a Router,
    /// `None` for the roots of the forest.
    pub via: Option<Network>,
    /// 1 for the roots.
    pub depth: usize,
    /// The number of levels in the subtree rooted at this node, counting the node itself.
    pub max_depth: usize,
    pub children: Vec<Node<'a>>,
}

/// One tree per router of a topology.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Forest<'a> {
    pub max_depth: usize,
    pub roots: Vec<Node<'a>>,
}

/// Builds one tree per router of the topology, routers with larger routing tables first.
///
/// The children of a node are the routers its routes point to, whatever the state of the route.
/// Gateways that do not belong to a known router are left out. A gateway whose router already
/// appears higher up on the same branch is not expanded again, which keeps cyclic topologies
/// finite.
pub fn build_tree(topology: &Topology) -> Forest<'_> {
    let routers = topology.routers();

    let mut by_size: Vec<&Router> = routers.routers().iter().collect();
    by_size.sort_by(|a, b| b.table.len().cmp(&a.table.len()));

    let mut forest = Forest::default();
    for router in by_size {
        let mut branch = vec![router.address];
        let (children, child_depth) = build_children(router, routers, 2, &mut branch);
        let root = Node {
            router,
            via: None,
            depth: 1,
            max_depth: child_depth + 1,
            children,
        };
        forest.max_depth = forest.max_depth.max(root.max_depth);
        forest.roots.push(root);
    }
    forest
}

fn build_children<'a>(
    router: &'a Router,
    routers: &'a RouterSet,
    level: usize,
    branch: &mut Vec<Address>,
) -> (Vec<Node<'a>>, usize) {
    let mut nodes = Vec::new();
    let mut deepest = 0;

    for route in router.table.routes() {
        let next = match routers.find(&route.gateway) {
            Ok(r) => r,
            Err(_) => continue,
        };
        if branch.contains(&next.address) {
            warn!("{} ({}): not expanding {} again, it is already on this branch", router.id, route.network, next.id);
            continue;
        }

        branch.push(next.address);
        let (children, child_depth) = build_children(next, routers, level + 1, branch);
        branch.pop();

        let node = Node {
            router: next,
            via: Some(route.network),
            depth: level,
            max_depth: child_depth + 1,
            children,
        };
        deepest = deepest.max(node.max_depth);
        nodes.push(node);
    }

    (nodes, deepest)
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::route::{Route, RouterKind, Status};

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    fn route(network: &str, gateway: &str, status: Status) -> Route {
        Route {
            network: network.parse().unwrap(),
            gateway: addr(gateway),
            interface: String::new(),
            status,
            metric: 0,
        }
    }

    fn ids<'a>(nodes: &[Node<'a>]) -> Vec<&'a str> {
        nodes.iter().map(|n| n.router.id.as_str()).collect()
    }

    #[test]
    fn test_tree() {
        let topo = Topology::new(
            vec![],
            vec![],
            vec![
                Router::new("pc", addr("10.1.0.9"), RouterKind::Host, vec![]),
                Router::new("core", addr("10.0.0.1"), RouterKind::Router, vec![
                    route("10.1.0.0/16", "10.1.0.1", Status::Up),
                    route("10.2.0.0/16", "10.2.0.1", Status::Down),
                    route("10.3.0.0/16", "10.3.0.1", Status::Up),
                ]),
                Router::new("access", addr("10.1.0.1"), RouterKind::Switch, vec![
                    route("10.1.0.9/32", "10.1.0.9", Status::Up),
                ]),
                Router::new("lab", addr("10.2.0.1"), RouterKind::Host, vec![]),
            ],
        );

        let forest = build_tree(&topo);
        // ties keep the address order of the router set (descending)
        assert_eq!(vec!["core", "access", "lab", "pc"], ids(&forest.roots));
        assert_eq!(3, forest.max_depth);

        let core = &forest.roots[0];
        assert_eq!(1, core.depth);
        assert_eq!(None, core.via);
        assert_eq!(3, core.max_depth);
        // the dangling 10.3.0.1 gateway is left out, the down route is kept
        assert_eq!(vec!["access", "lab"], ids(&core.children));

        let access = &core.children[0];
        assert_eq!(2, access.depth);
        assert_eq!(Some("10.1.0.0/16".parse().unwrap()), access.via);
        assert_eq!(2, access.max_depth);
        assert_eq!(vec!["pc"], ids(&access.children));
        assert_eq!(3, access.children[0].depth);
        assert_eq!(1, access.children[0].max_depth);

        let pc = &forest.roots[3];
        assert!(pc.children.is_empty());
        assert_eq!(1, pc.max_depth);
    }

    #[test]
    fn test_cycle_is_cut() {
        let topo = Topology::new(
            vec![],
            vec![],
            vec![
                Router::new("a", addr("10.0.0.1"), RouterKind::Router, vec![route("0.0.0.0/0", "10.0.0.2", Status::Up)]),
                Router::new("b", addr("10.0.0.2"), RouterKind::Router, vec![route("0.0.0.0/0", "10.0.0.1", Status::Up)]),
            ],
        );

        let forest = build_tree(&topo);
        assert_eq!(2, forest.roots.len());
        assert_eq!(2, forest.max_depth);
        for root in &forest.roots {
            assert_eq!(1, root.children.len());
            assert!(root.children[0].children.is_empty());
        }
    }

    #[test]
    fn test_empty_topology() {
        let topo = Topology::default();
        let forest = build_tree(&topo);
        assert_eq!(0, forest.max_depth);
        assert!(forest.roots.is_empty());
    }
}

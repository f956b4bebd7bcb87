use std::io::{self, Write};

use crate::cmds::{ARROW, ID_COLOR, IP_ADDRESS_COLOR, MUTED_COLOR, NETWORK_COLOR};
use crate::console::write_in_color;
use crate::graph::{Forest, Node};


const STEP: usize = 2;


fn write_node<W: Write>(out: &mut W, node: &Node<'_>, indent: usize) -> io::Result<()> {
    write!(out, "{:indent$}", "", indent = indent)?;
    write_in_color(out, &node.router.id, Some(ID_COLOR), 0)?;
    write!(out, " (")?;
    write_in_color(out, node.router.address.to_string(), Some(IP_ADDRESS_COLOR), 0)?;
    if let Some(via) = node.via {
        write!(out, " {} ", ARROW)?;
        write_in_color(out, via.to_string(), Some(NETWORK_COLOR), 0)?;
    }
    writeln!(out, ") [")?;

    for child in &node.children {
        write_node(out, child, indent + STEP)?;
    }
    if node.children.is_empty() {
        write!(out, "{:indent$}", "", indent = indent + STEP + 1)?;
        write_in_color(out, "<empty>", Some(MUTED_COLOR), 0)?;
        writeln!(out)?;
    }

    writeln!(out, "{:indent$}]", "", indent = indent)
}

/// Prints every tree of the forest, children indented below their parents.
pub fn print_graph<W: Write>(out: &mut W, forest: &Forest<'_>) -> io::Result<()> {
    for root in &forest.roots {
        write_node(out, root, 0)?;
    }
    Ok(())
}

pub mod check;
pub mod graph;
pub mod info;
pub mod tables;


use crate::console::Color;


pub(crate) const LABEL_COLOR: Color = Color::White;
pub(crate) const IP_ADDRESS_COLOR: Color = Color::Blue;
pub(crate) const NETWORK_COLOR: Color = Color::Green;
pub(crate) const ID_COLOR: Color = Color::Cyan;
pub(crate) const ERROR_COLOR: Color = Color::Red;
pub(crate) const MUTED_COLOR: Color = Color::DarkGray;

/// Separates the hops of a path.
pub const ARROW: &str = "\u{279C}";

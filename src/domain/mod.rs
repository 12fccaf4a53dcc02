// Domain layer: site content, the lead schema and the ports adapters implement.
// Nothing here touches the network or the filesystem.

pub mod catalog;
pub mod lead;
pub mod model;
pub mod ports;

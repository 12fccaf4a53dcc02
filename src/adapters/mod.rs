// Adapters layer: concrete implementations for external systems (HTTP surface, mail relays).

pub mod http;
pub mod mail;
pub mod smtp;

//! OOK remote-control outlet encoder.

pub mod command;
pub mod http;
pub mod modem;
pub mod params;
pub mod sequencer;
pub mod symbols;

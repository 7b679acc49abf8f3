// Domain layer: grant models and the ports the adapters plug into.

pub mod model;
pub mod ports;

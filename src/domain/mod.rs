// Domain layer: request shapes and the transport port. No HTTP specifics here.

pub mod model;
pub mod ports;

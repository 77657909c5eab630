// Domain layer: seed models and ports (interfaces) implemented by the adapters.

pub mod model;
pub mod ports;

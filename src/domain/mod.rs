// Domain layer: form and prediction models plus the ports the core talks through.

pub mod model;
pub mod ports;

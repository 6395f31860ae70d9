// Domain layer: value types and ports (interfaces). Only serde/chrono beyond std.

pub mod model;
pub mod ports;

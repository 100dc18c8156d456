// Domain layer: voucher records, derived reports and the ports the engine depends on.

pub mod model;
pub mod ports;

//! Domain layer: the payment entity, its value objects and the ports the
//! application layer depends on.

pub mod payment;
pub mod ports;

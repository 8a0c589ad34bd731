pub mod memory;
pub mod ports;
pub mod postgres;
pub mod repositories;

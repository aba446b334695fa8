//! iterdns application layer: ports implemented by infrastructure and the
//! use cases driving them.
pub mod ports;
pub mod use_cases;

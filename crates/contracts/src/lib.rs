//! Types shared between the club backend and its HTTP clients.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;

//! Pulsar Runtime - PHP interpreter discovery
//!
//! Laravel projects are often pinned to a PHP build shipped by a toolchain
//! manager (Herd) or vendored into the project itself. This crate decides
//! which `php` executable a project should run with.

mod php;

pub use php::*;

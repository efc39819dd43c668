//! Animation module - the capability boundary between gameplay code and
//! whatever animation graph drives the character rig.

mod driver;

pub use driver::*;

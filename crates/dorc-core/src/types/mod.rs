//! Type definitions for registry tags, retention policy and cleanup reports

mod policy;
mod report;
mod tag;

pub use policy::*;
pub use report::*;
pub use tag::*;

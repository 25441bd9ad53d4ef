//! Domain capabilities. Each one borrows a [`Session`](crate::session::Session)
//! and exposes the named operations of one API area.

pub mod chronicle;
pub mod lab;
pub mod wish;

pub use chronicle::ChronicleClient;
pub use lab::{BbsOptions, LabClient};
pub use wish::WishClient;

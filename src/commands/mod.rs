//! CLI commands implementation

pub mod gather;
pub mod init;
pub mod report;
pub mod status;

pub use gather::*;
pub use init::*;
pub use report::*;
pub use status::*;

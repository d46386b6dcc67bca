pub mod annotate;
pub mod batch;
mod command_result;
pub mod convert;
pub mod helper;
pub mod init;

pub use command_result::*;

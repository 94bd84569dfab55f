//! Library part of the `czmlctl` utility.
//!
//! The actual work (scene parsing, trajectory encoding and CZML generation) is done in the
//! `satczml-formats` crate, this is only the glue between the command line, the configuration
//! file and the output.
//!

pub use cli::*;
pub use cmds::*;
pub use config::*;
pub use error::*;

mod cli;
mod cmds;
mod config;
mod error;

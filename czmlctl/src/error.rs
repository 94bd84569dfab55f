//! Error module
//!

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Status {
    #[error("Can not write {0:?}: {1}")]
    Output(PathBuf, std::io::Error),
    #[error("Bad multiplier {0}, must be a finite number")]
    BadMultiplier(f64),
}

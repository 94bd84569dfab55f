//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for the configuration files of the
//! `satczml` tools.  This is a configuration file/struct neutral loading engine, storing only the
//! base directory and with `load()` read the proper file or the default one.
//!
//! This encapsulates the configuration file, available with `.inner()` or `.inner_mut()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, trace};

use crate::makepath;

/// Main name for the directory base
const TAG: &str = "satczml";

/// Every configuration file carries a version number so we can refuse stale ones.
///
pub trait Versioned {
    /// Version this code understands
    const VERSION: usize;

    /// Version found in the file
    fn version(&self) -> usize;
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown config file {0:?}")]
    UnknownFile(PathBuf),
    #[error("Can not read {0:?}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("Can not parse {0:?}: {1}")]
    Parse(PathBuf, hcl::Error),
    #[error("Bad file version {found}, expected {expected}")]
    BadFileVersion { found: usize, expected: usize },
}

/// Configuration for one of the CLI tools, loaded from an HCL file.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + Default + DeserializeOwned + Versioned> {
    /// Tag is the project name.
    tag: String,
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// Name of the file inside `basedir`
    fname: String,
    inner: T,
}

impl<T> ConfigFile<T>
where
    T: Debug + Default + DeserializeOwned + Versioned,
{
    #[tracing::instrument]
    fn new(tag: &str, fname: &str) -> Self {
        let basedir = match BaseDirs::new() {
            Some(base) => {
                #[cfg(unix)]
                let base = base.home_dir().join(".config");

                #[cfg(windows)]
                let base = base.data_local_dir().to_path_buf();

                debug!("base = {base:?}");
                makepath!(base, tag)
            }
            // No home directory at all, stay local.
            //
            None => makepath!(".", tag),
        };
        ConfigFile {
            tag: String::from(tag),
            basedir,
            fname: String::from(fname),
            inner: T::default(),
        }
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file
    ///
    pub fn default_file(&self) -> PathBuf {
        let cfg = self.config_path().join(&self.fname);
        debug!("default = {cfg:?}");
        cfg
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI, which must exist
    /// - default file in basedir (based on $HOME or $LOCALAPPDATA), defaults are used if absent
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>, default: &str) -> Result<ConfigFile<T>, ConfigError> {
        let mut cfg = ConfigFile::<T>::new(TAG, default);

        let fname = match fname {
            Some(fname) => {
                if !fname.exists() {
                    return Err(ConfigError::UnknownFile(fname.to_path_buf()));
                }
                fname.to_path_buf()
            }
            None => {
                let def = cfg.default_file();
                if !def.exists() {
                    trace!("no {def:?}, using defaults");
                    return Ok(cfg);
                }
                def
            }
        };

        trace!("Loading config file {fname:?} for {}", cfg.tag);

        let data = fs::read_to_string(&fname).map_err(|e| ConfigError::Read(fname.clone(), e))?;
        debug!("string data = {data}");

        let data: T = hcl::from_str(&data).map_err(|e| ConfigError::Parse(fname.clone(), e))?;
        debug!("struct data = {data:?}");

        if data.version() != T::VERSION {
            return Err(ConfigError::BadFileVersion {
                found: data.version(),
                expected: T::VERSION,
            });
        }

        cfg.inner = data;
        Ok(cfg)
    }

    /// Return the inner configuration file
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Return the inner configuration file as putable
    ///
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

use serde::Deserialize;

use satczml_common::Versioned;

/// Config filename
pub const CONFIG: &str = "czmlctl.hcl";

/// Defaults for the CLI tool, all of them can be overridden on the command line.
///
#[derive(Debug, Deserialize)]
pub struct Config {
    /// File version
    pub version: usize,
    /// Default clock multiplier
    pub multiplier: Option<f64>,
    /// Indent the output by default
    #[serde(default)]
    pub pretty: bool,
    /// Directory for log files
    pub log_dir: Option<String>,
    /// Hierarchical traces
    #[serde(default)]
    pub tree: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version: Self::VERSION,
            multiplier: None,
            pretty: false,
            log_dir: None,
            tree: false,
        }
    }
}

impl Versioned for Config {
    const VERSION: usize = 1;

    fn version(&self) -> usize {
        self.version
    }
}

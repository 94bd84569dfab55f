//! Module describing all possible commands and sub-commands to the `czmlctl` main driver
//!
//! We have two main commands:
//!
//! - `convert`
//! - `list`
//!
//! `convert` reads a scene file (HCL or JSON, see `satczml_formats::Scene`) and writes the
//! corresponding CZML document into a file or `stdout`.  The document window is computed
//! from the entities unless forced with `--window`.
//!
//! `list` displays the entities of a scene with their availability.
//!
//! `completion` is here just to configure the various shells completion system.
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};
use clap_complete::shells::Shell;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// debug mode, hierarchical traces.
    #[clap(short = 'D', long = "debug")]
    pub debug: bool,
    /// Output file (default is stdout).
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `completion SHELL`
/// `convert [-w window] [-m multiplier] [-p] scene`
/// `list scene`
/// `version`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Convert a scene into CZML
    Convert(ConvertOpts),
    /// List the entities of a scene
    List(ListOpts),
    /// Display version of all modules
    Version,
}

// ------

/// Options for conversion.
///
#[derive(Debug, Parser)]
pub struct ConvertOpts {
    /// Force the document window, BEGIN..END, BEGIN.. or ..END
    #[clap(short = 'w', long)]
    pub window: Option<String>,
    /// Clock multiplier
    #[clap(short = 'm', long)]
    pub multiplier: Option<f64>,
    /// Indent the output
    #[clap(short = 'p', long)]
    pub pretty: bool,
    /// Scene file (.hcl or .json)
    pub scene: PathBuf,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}

// ------

#[derive(Debug, Parser)]
pub struct ListOpts {
    /// Scene file (.hcl or .json)
    pub scene: PathBuf,
}

use std::fs;
use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::{info, trace};

use czmlctl::{convert_scene, list_entities, Config, Opts, Status, SubCommand, CONFIG};
use satczml_common::{init_logging, ConfigFile};
use satczml_formats::Scene;

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Config only has defaults for now.
    //
    let cfg = ConfigFile::<Config>::load(opts.config.as_deref(), CONFIG)?;
    let cfg = cfg.inner();

    // Initialise logging.
    //
    init_logging(NAME, opts.debug || cfg.tree, cfg.log_dir.clone())?;
    trace!("Logging initialised.");

    // Banner
    //
    banner()?;

    handle_subcmd(cfg, &opts)
}

pub fn handle_subcmd(cfg: &Config, opts: &Opts) -> Result<()> {
    match &opts.subcmd {
        // Handle `convert scene`
        //
        SubCommand::Convert(copts) => {
            trace!("convert");

            let czml = convert_scene(cfg, copts)?;
            match &opts.output {
                Some(output) => {
                    info!("Writing {output:?}");
                    fs::write(output, czml).map_err(|e| Status::Output(output.clone(), e))?;
                }
                None => println!("{czml}"),
            }
        }

        // Handle `list scene`
        //
        SubCommand::List(lopts) => {
            info!("Listing all entities:");

            let scene = Scene::load(&lopts.scene)?;
            let str = list_entities(&scene)?;
            println!("{}", str);
        }

        // Standalone completion generation
        //
        // NOTE: you can generate UNIX shells completion on Windows and vice-versa.  Not worth
        //       trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            eprintln!("Modules: ");
            eprintln!("\t{}", version());
            eprintln!("\t{}", satczml_common::version());
            eprintln!("\t{}", satczml_formats::version());
        }
    }
    Ok(())
}

/// Return our version number
///
#[inline]
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}

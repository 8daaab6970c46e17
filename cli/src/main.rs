#[macro_use]
extern crate log;

use std::io::Write;
use std::process;

use anyhow::Context;
use tflinspect_tflite::{Tflite, TfliteProtoModel};

mod params;

use params::Parameters;

/// Entrypoint for the command-line interface.
fn main() {
    let matches = params::app().get_matches();

    let level = match params::verbosity(&matches) {
        0 => "tflinspect=warn,tflinspect_tflite=warn",
        1 => "tflinspect=info,tflinspect_tflite=info",
        _ => "tflinspect=debug,tflinspect_tflite=debug",
    };
    let env = env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level);
    env_logger::Builder::from_env(env).init();

    if let Err(e) = handle(&matches) {
        error!("{e:?}");
        process::exit(1)
    }
}

fn handle(matches: &clap::ArgMatches) -> anyhow::Result<()> {
    let params = Parameters::from_clap(matches)?;
    params.warn_unapplied_selections();

    let proto = TfliteProtoModel::for_path(&params.model)
        .with_context(|| format!("Loading model {}", params.model.display()))?;
    info!("Loaded {} ({} bytes)", params.model.display(), proto.as_bytes().len());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    Tflite::default().report(&proto, Some(&params.perf), &mut out)?;
    out.flush()?;
    Ok(())
}

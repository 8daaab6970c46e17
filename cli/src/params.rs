use std::path::PathBuf;

use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use tflinspect_tflite::PerfPredictor;

pub fn app() -> Command<'static> {
    Command::new("tflinspect")
        .version(clap::crate_version!())
        .about("Prints operators, tensors and instruction estimates of a TensorFlow Lite model")
        .arg(Arg::new("model").required(true).help("Path to the .tflite model"))
        .arg(
            Arg::new("verbosity")
                .short('v')
                .multiple_occurrences(true)
                .help("Sets the level of verbosity (up to -vv)"),
        )
        .arg(index_selection("tensor", 't', "Tensor indices to print (all when no index is given)"))
        .arg(index_selection("operator", 'o', "Operator indices to print (all when no index is given)"))
        .arg(cycle_weight("add-cycle", "Cycles per addition"))
        .arg(cycle_weight("mul-cycle", "Cycles per multiplication"))
        .arg(cycle_weight("nonlinear-cycle", "Cycles per nonlinear function"))
}

fn index_selection(name: &'static str, short: char, help: &'static str) -> Arg<'static> {
    Arg::new(name)
        .short(short)
        .long(name)
        .takes_value(true)
        .multiple_values(true)
        .min_values(0)
        .validator(|s| s.parse::<usize>())
        .help(help)
}

fn cycle_weight(name: &'static str, help: &'static str) -> Arg<'static> {
    Arg::new(name).long(name).takes_value(true).default_value("1").validator(|s| s.parse::<u64>()).help(help)
}

/// Which tensors or operators the user asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    None,
    All,
    Indices(Vec<usize>),
}

impl Selection {
    fn from_clap(matches: &ArgMatches, name: &str) -> anyhow::Result<Selection> {
        if !matches.is_present(name) {
            return Ok(Selection::None);
        }
        let indices = matches
            .values_of(name)
            .into_iter()
            .flatten()
            .map(|v| v.parse::<usize>().with_context(|| format!("Invalid {name} index {v:?}")))
            .collect::<anyhow::Result<Vec<usize>>>()?;
        if indices.is_empty() {
            Ok(Selection::All)
        } else {
            Ok(Selection::Indices(indices))
        }
    }
}

/// Structure holding the parsed parameters.
#[derive(Clone, Debug)]
pub struct Parameters {
    pub model: PathBuf,
    pub tensors: Selection,
    pub operators: Selection,
    pub perf: PerfPredictor,
}

impl Parameters {
    pub fn from_clap(matches: &ArgMatches) -> anyhow::Result<Parameters> {
        let model = matches.value_of("model").context("Missing model path")?;
        Ok(Parameters {
            model: PathBuf::from(model),
            tensors: Selection::from_clap(matches, "tensor")?,
            operators: Selection::from_clap(matches, "operator")?,
            perf: PerfPredictor::new(
                matches.value_of_t("add-cycle")?,
                matches.value_of_t("mul-cycle")?,
                matches.value_of_t("nonlinear-cycle")?,
            ),
        })
    }

    /// The report always lists every tensor and operator.
    pub fn warn_unapplied_selections(&self) {
        if self.tensors != Selection::None {
            warn!("Tensor selection {:?} is not applied, every tensor is printed", self.tensors);
        }
        if self.operators != Selection::None {
            warn!("Operator selection {:?} is not applied, every operator is printed", self.operators);
        }
    }
}

pub fn verbosity(matches: &ArgMatches) -> usize {
    matches.occurrences_of("verbosity").min(2) as usize
}

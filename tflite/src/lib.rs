pub mod catalog;
pub mod model;
mod ops;
pub mod options;
pub mod perf;
pub mod registry;
pub mod report;
pub mod schema;
pub mod tensors;

pub use catalog::{OperatorCatalog, ResolvedOperator, TypeSummary};
pub use model::TfliteProtoModel;
pub use perf::PerfPredictor;
pub use registry::InstrCount;
pub use tensors::TensorDescriptor;

pub mod internal {
    pub use anyhow::{bail, ensure, format_err, Context};
    pub use derive_new::new;
    pub use log::{debug, info, trace, warn};

    pub type InspectResult<T> = anyhow::Result<T>;
}

use registry::Registry;

/// Operator cost models, ready to inspect models.
pub struct Tflite(Registry);

impl Default for Tflite {
    fn default() -> Tflite {
        let mut registry = Registry::default();
        ops::register_all(&mut registry);
        Tflite(registry)
    }
}

impl Tflite {
    pub fn registry(&self) -> &Registry {
        &self.0
    }
}

pub fn tflite() -> Tflite {
    Tflite::default()
}

use std::io::Write;

use crate::catalog::OperatorCatalog;
use crate::internal::*;
use crate::model::TfliteProtoModel;
use crate::perf::PerfPredictor;
use crate::schema::Model;
use crate::tensors::TensorDescriptor;
use crate::Tflite;

/// Header label for a subgraph: the first one is the main model.
pub fn subgraph_label(ix: usize) -> String {
    if ix == 0 {
        "Main model".to_string()
    } else {
        format!("Model #{ix}")
    }
}

/// One subgraph, fully resolved.
#[derive(Clone, Debug, new)]
pub struct SubgraphReport {
    pub index: usize,
    pub name: Option<String>,
    pub inputs: Vec<i32>,
    pub outputs: Vec<i32>,
    pub catalog: OperatorCatalog,
}

impl SubgraphReport {
    pub fn label(&self) -> String {
        subgraph_label(self.index)
    }

    pub fn render(&self, w: &mut dyn Write, perf: Option<&PerfPredictor>) -> InspectResult<()> {
        let label = self.label();
        writeln!(w, "[{label}]")?;
        writeln!(w)?;
        writeln!(w, "{label} input tensors: {:?}", self.inputs)?;
        writeln!(w, "{label} output tensors: {:?}", self.outputs)?;
        self.catalog.render(w, perf)
    }
}

impl Tflite {
    pub fn subgraph_report(&self, model: &Model, ix: usize) -> InspectResult<SubgraphReport> {
        let subgraph = model.subgraph(ix)?;
        info!(
            "Subgraph #{ix} ({}): {} operators, {} tensors",
            subgraph.name().unwrap_or("unnamed"),
            subgraph.operators_len(),
            subgraph.tensors_len()
        );
        for &tensor in subgraph.input_indices().iter().chain(subgraph.output_indices().iter()) {
            TensorDescriptor::resolve(model, &subgraph, tensor)
                .with_context(|| format!("Resolving boundary tensor #{tensor} of subgraph #{ix}"))?;
        }
        let catalog = OperatorCatalog::parse(self.registry(), model, &subgraph)
            .with_context(|| format!("Inspecting subgraph #{ix}"))?;
        Ok(SubgraphReport::new(
            ix,
            subgraph.name().map(|n| n.to_string()),
            subgraph.input_indices(),
            subgraph.output_indices(),
            catalog,
        ))
    }

    /// Writes the report of every subgraph, in file order. A subgraph is
    /// resolved completely before any of its lines is written.
    pub fn report(
        &self,
        proto: &TfliteProtoModel,
        perf: Option<&PerfPredictor>,
        w: &mut dyn Write,
    ) -> InspectResult<()> {
        let model = proto.root();
        info!(
            "TFLite model version {}, {} subgraphs, {} operator codes",
            model.version(),
            model.subgraphs_len(),
            model.operator_codes().map(|c| c.len()).unwrap_or(0)
        );
        if let Some(description) = model.description() {
            debug!("Model description: {description}");
        }
        for ix in 0..model.subgraphs_len() {
            let report = self.subgraph_report(&model, ix)?;
            report.render(w, perf)?;
            w.flush()?;
        }
        Ok(())
    }
}

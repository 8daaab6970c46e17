use std::collections::HashMap;
use std::io::Write;

use thousands::Separable;

use crate::internal::*;
use crate::options::OperatorOptions;
use crate::perf::PerfPredictor;
use crate::registry::{EstimateOp, InstrCount, Registry};
use crate::schema::{BuiltinOperator, Model, Operator, SubGraph};
use crate::tensors::{index_list, TensorDescriptor};

/// One operator with its opcode, tensors and options resolved.
#[derive(Clone, Debug)]
pub struct ResolvedOperator {
    pub index: usize,
    pub opcode: BuiltinOperator,
    pub opcode_str: String,
    pub inputs: Vec<TensorDescriptor>,
    pub outputs: Vec<TensorDescriptor>,
    pub options: OperatorOptions,
    /// None when no cost model applies.
    pub cost: Option<InstrCount>,
}

impl ResolvedOperator {
    pub fn can_compute(&self) -> bool {
        self.cost.is_some()
    }

    pub fn instructions(&self) -> Option<u64> {
        self.cost.and_then(|c| c.total())
    }
}

/// Per-opcode line of the summary. Sums are u128 so they can not overflow.
#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct TypeSummary {
    pub opcode_str: String,
    pub count: usize,
    pub instructions: Option<u128>,
}

/// Every operator of a subgraph, in document order and grouped by opcode
/// in first-encountered order.
#[derive(Clone, Debug, Default)]
pub struct OperatorCatalog {
    pub operators: Vec<ResolvedOperator>,
    per_type: Vec<(String, Vec<usize>)>,
    type_index: HashMap<String, usize>,
}

pub fn opcode_str(model: &Model, op: &Operator) -> InspectResult<(BuiltinOperator, String)> {
    let entry = model.operator_code(op.opcode_index())?;
    let Some(name) = entry.builtin.variant_name() else {
        bail!(
            "Unknown builtin opcode {} (operator code #{})",
            entry.builtin.0,
            op.opcode_index()
        )
    };
    if entry.builtin == BuiltinOperator::CUSTOM {
        let custom = entry.custom_name.unwrap_or_else(|| {
            warn!("Custom operator code #{} has no name", op.opcode_index());
            ""
        });
        Ok((entry.builtin, format!("{name}({custom})")))
    } else {
        Ok((entry.builtin, name.to_string()))
    }
}

impl OperatorCatalog {
    pub fn parse(registry: &Registry, model: &Model, subgraph: &SubGraph) -> InspectResult<OperatorCatalog> {
        let mut catalog = OperatorCatalog::default();
        for index in 0..subgraph.operators_len() {
            let flat = subgraph.operator(index)?;
            let op = catalog_operator(registry, model, subgraph, index, &flat)
                .with_context(|| format!("Resolving operator #{index}"))?;
            catalog.append(op);
        }
        Ok(catalog)
    }

    pub fn append(&mut self, op: ResolvedOperator) {
        let slot = match self.type_index.get(&op.opcode_str) {
            Some(slot) => *slot,
            None => {
                self.per_type.push((op.opcode_str.clone(), vec![]));
                self.type_index.insert(op.opcode_str.clone(), self.per_type.len() - 1);
                self.per_type.len() - 1
            }
        };
        self.per_type[slot].1.push(self.operators.len());
        self.operators.push(op);
    }

    pub fn operators_of_type(&self, opcode_str: &str) -> impl Iterator<Item = &ResolvedOperator> {
        self.type_index
            .get(opcode_str)
            .into_iter()
            .flat_map(move |slot| self.per_type[*slot].1.iter().map(move |ix| &self.operators[*ix]))
    }

    pub fn type_summaries(&self) -> Vec<TypeSummary> {
        self.per_type
            .iter()
            .map(|(opcode_str, members)| {
                let instructions = members
                    .iter()
                    .map(|ix| self.operators[*ix].instructions().map(u128::from))
                    .sum::<Option<u128>>();
                TypeSummary::new(opcode_str.clone(), members.len(), instructions)
            })
            .collect()
    }

    /// Sum over the fully computable opcode groups only.
    pub fn total_instructions(&self) -> u128 {
        self.type_summaries().iter().filter_map(|t| t.instructions).sum()
    }

    pub fn render(&self, w: &mut dyn Write, perf: Option<&PerfPredictor>) -> InspectResult<()> {
        writeln!(w)?;
        for op in &self.operators {
            render_operator(w, op, perf)?;
            writeln!(w)?;
        }
        writeln!(w)?;
        self.render_types_info(w)?;
        writeln!(w)?;
        Ok(())
    }

    pub fn render_types_info(&self, w: &mut dyn Write) -> InspectResult<()> {
        let summaries = self.type_summaries();
        writeln!(w, "Number of all operator types: {}", summaries.len())?;
        for summary in &summaries {
            writeln!(
                w,
                "\t{:38}: {:4} \t (instrs: {})",
                summary.opcode_str,
                summary.count,
                or_unknown(summary.instructions)
            )?;
        }
        writeln!(
            w,
            "{:46}: {:4} \t (total instrs: {})",
            "Number of all operators",
            self.operators.len(),
            self.total_instructions().separate_with_commas()
        )?;
        Ok(())
    }
}

fn catalog_operator(
    registry: &Registry,
    model: &Model,
    subgraph: &SubGraph,
    index: usize,
    flat: &Operator,
) -> InspectResult<ResolvedOperator> {
    let (opcode, opcode_str) = opcode_str(model, flat)?;
    let inputs = TensorDescriptor::resolve_all(model, subgraph, &flat.input_indices())?;
    let outputs = TensorDescriptor::resolve_all(model, subgraph, &flat.output_indices())?;
    let options = OperatorOptions::from_operator(flat);
    if let Some(fused) = options.fused_activation() {
        ensure!(fused.variant_name().is_some(), "Unknown fused activation {}", fused.0);
    }
    let cost = registry.estimate(&EstimateOp::new(opcode, &inputs, &outputs, &options));
    debug!("Operator #{index} {opcode_str} options: {:?} cost: {:?}", options.tag(), cost);
    Ok(ResolvedOperator { index, opcode, opcode_str, inputs, outputs, options, cost })
}

fn or_unknown<N: Separable>(n: Option<N>) -> String {
    n.map(|n| n.separate_with_commas()).unwrap_or_else(|| "???".to_string())
}

pub fn render_operator(
    w: &mut dyn Write,
    op: &ResolvedOperator,
    perf: Option<&PerfPredictor>,
) -> InspectResult<()> {
    let cycles = perf.and_then(|p| p.predict_cycles(op.cost.as_ref()));
    writeln!(
        w,
        "Operator {}: {} (instrs: {}, cycls: {})",
        op.index,
        op.opcode_str,
        or_unknown(op.instructions()),
        or_unknown(cycles)
    )?;
    if let Some(fused) = op.options.fused_activation() {
        writeln!(w, "\tFused Activation: {fused:?}")?;
    }
    writeln!(w, "\tInput Tensors{}", index_list(&op.inputs))?;
    for t in &op.inputs {
        writeln!(w, "\t\t{t}")?;
    }
    writeln!(w, "\tOutput Tensors{}", index_list(&op.outputs))?;
    for t in &op.outputs {
        writeln!(w, "\t\t{t}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ActivationFunctionType, BuiltinOptions, TensorType};
    use crate::tensors::TensorInfo;

    fn op(index: usize, opcode_str: &str, cost: Option<InstrCount>) -> ResolvedOperator {
        ResolvedOperator {
            index,
            opcode: BuiltinOperator::ADD,
            opcode_str: opcode_str.to_string(),
            inputs: vec![],
            outputs: vec![],
            options: OperatorOptions::None,
            cost,
        }
    }

    #[test]
    fn groups_in_first_encountered_order() {
        let mut catalog = OperatorCatalog::default();
        catalog.append(op(0, "CONV_2D", Some(InstrCount::new(1, 1, 0))));
        catalog.append(op(1, "ADD", Some(InstrCount::new(5, 0, 0))));
        catalog.append(op(2, "CONV_2D", Some(InstrCount::new(2, 2, 0))));
        catalog.append(op(3, "CUSTOM(foo)", None));
        let summaries = catalog.type_summaries();
        assert_eq!(
            summaries,
            vec![
                TypeSummary::new("CONV_2D".into(), 2, Some(6)),
                TypeSummary::new("ADD".into(), 1, Some(5)),
                TypeSummary::new("CUSTOM(foo)".into(), 1, None),
            ]
        );
        assert_eq!(summaries.iter().map(|s| s.count).sum::<usize>(), catalog.operators.len());
        assert_eq!(catalog.total_instructions(), 11);
        assert_eq!(
            catalog.operators_of_type("CONV_2D").map(|o| o.index).collect::<Vec<_>>(),
            vec![0, 2]
        );
    }

    #[test]
    fn one_unknown_member_spoils_the_bucket() {
        let mut catalog = OperatorCatalog::default();
        catalog.append(op(0, "MAX_POOL_2D", Some(InstrCount::new(3, 0, 0))));
        catalog.append(op(1, "MAX_POOL_2D", None));
        assert_eq!(catalog.type_summaries()[0].instructions, None);
        assert_eq!(catalog.total_instructions(), 0);
    }

    #[test]
    fn group_totals_do_not_overflow() {
        let mut catalog = OperatorCatalog::default();
        catalog.append(op(0, "ADD", Some(InstrCount::new(1 << 63, 0, 0))));
        catalog.append(op(1, "ADD", Some(InstrCount::new(1 << 63, 0, 0))));
        catalog.append(op(2, "MUL", Some(InstrCount::new(0, 1 << 63, 0))));
        assert_eq!(catalog.type_summaries()[0].instructions, Some(1 << 64));
        assert_eq!(catalog.total_instructions(), 3 << 63);
        let mut out = vec![];
        catalog.render_types_info(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("(total instrs: 27,670,116,110,564,327,424)\n"));
    }

    #[test]
    fn renders_summary_with_separators() {
        let mut catalog = OperatorCatalog::default();
        catalog.append(op(0, "FULLY_CONNECTED", Some(InstrCount::new(600_000, 650_000, 0))));
        catalog.append(op(1, "CUSTOM(TFLite_Detection_PostProcess)", None));
        let mut out = vec![];
        catalog.render_types_info(&mut out).unwrap();
        let expected = format!(
            "Number of all operator types: 2\n\t{:38}: {:4} \t (instrs: 1,250,000)\n\t{:38}: {:4} \t (instrs: ???)\n{:46}: {:4} \t (total instrs: 1,250,000)\n",
            "FULLY_CONNECTED", 1, "CUSTOM(TFLite_Detection_PostProcess)", 1, "Number of all operators", 2
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn renders_operator_block() {
        let out_tensor = TensorDescriptor::Present(TensorInfo::new(
            2,
            3,
            false,
            TensorType::FLOAT32,
            vec![1, 4],
            Some("out".into()),
        ));
        let resolved = ResolvedOperator {
            index: 7,
            opcode: BuiltinOperator::ADD,
            opcode_str: "ADD".into(),
            inputs: vec![TensorDescriptor::Absent(-1)],
            outputs: vec![out_tensor],
            options: OperatorOptions::Fused(BuiltinOptions::AddOptions, ActivationFunctionType::RELU),
            cost: Some(InstrCount::new(4, 0, 4)),
        };
        let mut out = vec![];
        render_operator(&mut out, &resolved, Some(&PerfPredictor::new(1, 1, 10))).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Operator 7: ADD (instrs: 8, cycls: 44)\n\
             \tFused Activation: RELU\n\
             \tInput Tensors[-1]\n\
             \t\tTensor   -1\n\
             \tOutput Tensors[2]\n\
             \t\tTensor    2 : buffer    3 |  Empty | FLOAT32 | Shape [1, 4] (out)\n"
        );

        let mut out = vec![];
        render_operator(&mut out, &resolved, None).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Operator 7: ADD (instrs: 8, cycls: ???)\n"));
    }
}

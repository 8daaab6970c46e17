use std::collections::HashMap;

use crate::internal::*;
use crate::options::OperatorOptions;
use crate::schema::BuiltinOperator;
use crate::tensors::TensorDescriptor;

/// Estimated arithmetic instructions for one operator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, new)]
pub struct InstrCount {
    pub add: u64,
    pub mul: u64,
    pub nonlinear: u64,
}

/// All arithmetic is checked: None means the count overflowed.
impl InstrCount {
    pub fn total(&self) -> Option<u64> {
        self.add.checked_add(self.mul)?.checked_add(self.nonlinear)
    }

    pub fn scaled(&self, n: u64) -> Option<InstrCount> {
        Some(InstrCount {
            add: self.add.checked_mul(n)?,
            mul: self.mul.checked_mul(n)?,
            nonlinear: self.nonlinear.checked_mul(n)?,
        })
    }

    pub fn checked_add(&self, other: &InstrCount) -> Option<InstrCount> {
        Some(InstrCount {
            add: self.add.checked_add(other.add)?,
            mul: self.mul.checked_add(other.mul)?,
            nonlinear: self.nonlinear.checked_add(other.nonlinear)?,
        })
    }
}

/// An operator as seen by a cost function.
#[derive(Clone, Copy, Debug, new)]
pub struct EstimateOp<'a> {
    pub opcode: BuiltinOperator,
    pub inputs: &'a [TensorDescriptor],
    pub outputs: &'a [TensorDescriptor],
    pub options: &'a OperatorOptions,
}

impl EstimateOp<'_> {
    /// Shape of a present input; None for an absent or missing slot.
    pub fn input_shape(&self, slot: usize) -> Option<&[i32]> {
        self.inputs.get(slot)?.shape()
    }

    pub fn has_input(&self, slot: usize) -> bool {
        self.input_shape(slot).is_some()
    }

    pub fn input_elements(&self, slot: usize) -> Option<u64> {
        self.inputs.get(slot)?.info()?.elements()
    }

    pub fn output_elements(&self) -> Option<u64> {
        self.outputs.first()?.info()?.elements()
    }
}

/// A cost function. None means the operator cost can not be computed.
pub type Estimator = fn(op: &EstimateOp) -> Option<InstrCount>;

#[derive(Default)]
pub struct Registry {
    pub estimators: HashMap<BuiltinOperator, Estimator>,
}

impl Registry {
    pub fn reg_estimator(&mut self, opcode: BuiltinOperator, estimator: Estimator) {
        self.estimators.insert(opcode, estimator);
    }

    pub fn supports(&self, opcode: BuiltinOperator) -> bool {
        self.estimators.contains_key(&opcode)
    }

    pub fn estimate(&self, op: &EstimateOp) -> Option<InstrCount> {
        let Some(estimator) = self.estimators.get(&op.opcode) else {
            trace!("No cost model for {:?}", op.opcode);
            return None;
        };
        let mut cost = (estimator)(op)?;
        if op.options.has_fused_nonlinearity() {
            cost.nonlinear = cost.nonlinear.checked_add(op.output_elements()?)?;
        }
        if cost.total().is_none() {
            trace!("Instruction count of {:?} overflows", op.opcode);
            return None;
        }
        Some(cost)
    }
}

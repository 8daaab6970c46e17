use crate::internal::*;
use crate::registry::InstrCount;

/// Turns instruction counts into a cycle estimate with one weight per
/// instruction category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, new)]
pub struct PerfPredictor {
    pub add_cycle: u64,
    pub mul_cycle: u64,
    pub nonlinear_cycle: u64,
}

impl Default for PerfPredictor {
    fn default() -> PerfPredictor {
        PerfPredictor { add_cycle: 1, mul_cycle: 1, nonlinear_cycle: 1 }
    }
}

impl PerfPredictor {
    /// None when the cost is unknown or the cycle count does not fit in a u64.
    pub fn predict_cycles(&self, cost: Option<&InstrCount>) -> Option<u64> {
        let c = cost?;
        c.add
            .checked_mul(self.add_cycle)?
            .checked_add(c.mul.checked_mul(self.mul_cycle)?)?
            .checked_add(c.nonlinear.checked_mul(self.nonlinear_cycle)?)
    }
}

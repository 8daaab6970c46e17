use super::per_output_element;
use crate::registry::{EstimateOp, InstrCount, Registry};
use crate::schema::BuiltinOperator;

pub fn register_all(reg: &mut Registry) {
    reg.reg_estimator(BuiltinOperator::ADD, |op| per_output_element(op, 1, 0, 0));
    reg.reg_estimator(BuiltinOperator::SUB, |op| per_output_element(op, 1, 0, 0));
    reg.reg_estimator(BuiltinOperator::MUL, |op| per_output_element(op, 0, 1, 0));
    reg.reg_estimator(BuiltinOperator::DIV, |op| per_output_element(op, 0, 1, 0));
    reg.reg_estimator(BuiltinOperator::SQUARED_DIFFERENCE, squared_difference);
}

fn squared_difference(op: &EstimateOp) -> Option<InstrCount> {
    per_output_element(op, 1, 1, 0)
}

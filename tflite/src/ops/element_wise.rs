use super::per_output_element;
use crate::registry::Registry;
use crate::schema::BuiltinOperator;

pub fn register_all(reg: &mut Registry) {
    for opcode in [
        BuiltinOperator::EXP,
        BuiltinOperator::LOG,
        BuiltinOperator::LOGISTIC,
        BuiltinOperator::RSQRT,
        BuiltinOperator::SQRT,
        BuiltinOperator::TANH,
    ] {
        reg.reg_estimator(opcode, |op| per_output_element(op, 0, 0, 1));
    }
}

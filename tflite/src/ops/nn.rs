use super::{bias, dims, per_output_element};
use crate::registry::{EstimateOp, InstrCount, Registry};
use crate::schema::BuiltinOperator;

pub fn register_all(reg: &mut Registry) {
    reg.reg_estimator(BuiltinOperator::FULLY_CONNECTED, fully_connected);
    reg.reg_estimator(BuiltinOperator::MEAN, reduce_mean);
    reg.reg_estimator(BuiltinOperator::SOFTMAX, softmax);

    for opcode in [
        BuiltinOperator::GELU,
        BuiltinOperator::HARD_SWISH,
        BuiltinOperator::RELU,
        BuiltinOperator::RELU6,
        BuiltinOperator::RELU_N1_TO_1,
    ] {
        reg.reg_estimator(opcode, |op| per_output_element(op, 0, 0, 1));
    }
}

// weights are [units, input_size]
fn fully_connected(op: &EstimateOp) -> Option<InstrCount> {
    let [_units, input_size] = dims::<2>(op.input_shape(1)?)?;
    per_output_element(op, input_size.saturating_sub(1) + bias(op, 2), input_size, 0)
}

// exp, running sum, normalization
fn softmax(op: &EstimateOp) -> Option<InstrCount> {
    per_output_element(op, 1, 1, 1)
}

fn reduce_mean(op: &EstimateOp) -> Option<InstrCount> {
    Some(InstrCount::new(op.input_elements(0)?, op.output_elements()?, 0))
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::*;
    use crate::options::OperatorOptions;
    use crate::registry::InstrCount;
    use crate::schema::{ActivationFunctionType, BuiltinOperator, BuiltinOptions};

    #[test]
    fn fully_connected_with_bias() {
        let cost = estimate(
            BuiltinOperator::FULLY_CONNECTED,
            &[t(&[1, 64]), t(&[10, 64]), t(&[10])],
            &[t(&[1, 10])],
            &OperatorOptions::Fused(
                BuiltinOptions::FullyConnectedOptions,
                ActivationFunctionType::NONE,
            ),
        );
        assert_eq!(cost, Some(InstrCount::new(640, 640, 0)));
    }

    #[test]
    fn fully_connected_without_bias_and_fused_tanh() {
        let cost = estimate(
            BuiltinOperator::FULLY_CONNECTED,
            &[t(&[1, 64]), t(&[10, 64]), absent()],
            &[t(&[1, 10])],
            &OperatorOptions::Fused(
                BuiltinOptions::FullyConnectedOptions,
                ActivationFunctionType::TANH,
            ),
        );
        assert_eq!(cost, Some(InstrCount::new(630, 640, 10)));
    }

    #[test]
    fn softmax_and_mean() {
        let softmax =
            estimate(BuiltinOperator::SOFTMAX, &[t(&[1, 1001])], &[t(&[1, 1001])], &OperatorOptions::None);
        assert_eq!(softmax, Some(InstrCount::new(1001, 1001, 1001)));
        let mean = estimate(
            BuiltinOperator::MEAN,
            &[t(&[1, 7, 7, 32]), t(&[2])],
            &[t(&[1, 1, 1, 32])],
            &OperatorOptions::None,
        );
        assert_eq!(mean, Some(InstrCount::new(7 * 7 * 32, 32, 0)));
    }

    #[test]
    fn relu_family() {
        for opcode in [BuiltinOperator::RELU, BuiltinOperator::RELU6, BuiltinOperator::HARD_SWISH] {
            let cost = estimate(opcode, &[t(&[4, 4])], &[t(&[4, 4])], &OperatorOptions::None);
            assert_eq!(cost, Some(InstrCount::new(0, 0, 16)));
        }
    }
}

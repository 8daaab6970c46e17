use crate::registry::{EstimateOp, InstrCount, Registry};

mod array;
mod cnn;
mod element_wise;
mod math;
mod nn;

pub fn register_all(reg: &mut Registry) {
    array::register_all(reg);
    cnn::register_all(reg);
    element_wise::register_all(reg);
    math::register_all(reg);
    nn::register_all(reg);
}

fn per_output_element(op: &EstimateOp, add: u64, mul: u64, nonlinear: u64) -> Option<InstrCount> {
    InstrCount::new(add, mul, nonlinear).scaled(op.output_elements()?)
}

/// 1 for a present bias input at `slot`, 0 for an absent one.
fn bias(op: &EstimateOp, slot: usize) -> u64 {
    op.has_input(slot) as u64
}

/// Dimensions of a shape with exactly `rank` non-negative dimensions.
fn dims<const R: usize>(shape: &[i32]) -> Option<[u64; R]> {
    if shape.len() != R || shape.iter().any(|d| *d < 0) {
        return None;
    }
    let mut dims = [0u64; R];
    for (d, s) in dims.iter_mut().zip(shape) {
        *d = *s as u64;
    }
    Some(dims)
}


#[cfg(test)]
mod tests {
    use super::test_utils::*;
    use super::*;
    use crate::options::OperatorOptions;
    use crate::schema::BuiltinOperator;
    use proptest::prelude::*;

    #[test]
    fn dims_checks_rank_and_sign() {
        assert_eq!(dims::<2>(&[3, 4]), Some([3, 4]));
        assert_eq!(dims::<2>(&[3, 4, 5]), None);
        assert_eq!(dims::<1>(&[-1]), None);
    }

    proptest! {
        #[test]
        fn element_wise_costs_are_deterministic_and_linear(
            shape in proptest::collection::vec(1i32..16, 0..4),
            opcode in prop_oneof![
                Just(BuiltinOperator::ADD),
                Just(BuiltinOperator::MUL),
                Just(BuiltinOperator::SQUARED_DIFFERENCE),
                Just(BuiltinOperator::TANH),
                Just(BuiltinOperator::SOFTMAX),
            ],
        ) {
            let inputs = [t(&shape), t(&shape)];
            let outputs = [t(&shape)];
            let first = estimate(opcode, &inputs, &outputs, &OperatorOptions::None);
            let second = estimate(opcode, &inputs, &outputs, &OperatorOptions::None);
            prop_assert_eq!(first, second);
            let unit = estimate(opcode, &[t(&[]), t(&[])], &[t(&[])], &OperatorOptions::None).unwrap();
            let n = shape.iter().map(|d| *d as u64).product::<u64>();
            prop_assert_eq!(first, unit.scaled(n));
        }
    }
}

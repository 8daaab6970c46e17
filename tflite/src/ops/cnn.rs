use super::{bias, dims, per_output_element};
use crate::options::OperatorOptions;
use crate::registry::{EstimateOp, InstrCount, Registry};
use crate::schema::BuiltinOperator;

pub fn register_all(reg: &mut Registry) {
    reg.reg_estimator(BuiltinOperator::AVERAGE_POOL_2D, average_pool_2d);
    reg.reg_estimator(BuiltinOperator::CONV_2D, conv2d);
    reg.reg_estimator(BuiltinOperator::DEPTHWISE_CONV_2D, dw_conv2d);
    reg.reg_estimator(BuiltinOperator::MAX_POOL_2D, max_pool_2d);
}

// kernel is OHWI: every output element accumulates KH*KW*I products
fn conv2d(op: &EstimateOp) -> Option<InstrCount> {
    let [_o, kh, kw, i] = dims::<4>(op.input_shape(1)?)?;
    let k = kh.checked_mul(kw)?.checked_mul(i)?;
    per_output_element(op, k.saturating_sub(1) + bias(op, 2), k, 0)
}

// kernel is 1HWO: one window per output channel
fn dw_conv2d(op: &EstimateOp) -> Option<InstrCount> {
    let [_one, kh, kw, _o] = dims::<4>(op.input_shape(1)?)?;
    let k = kh.checked_mul(kw)?;
    per_output_element(op, k.saturating_sub(1) + bias(op, 2), k, 0)
}

fn pool_window(op: &EstimateOp) -> Option<u64> {
    match op.options {
        OperatorOptions::Pool2D { filter_width, filter_height, .. }
            if *filter_width >= 0 && *filter_height >= 0 =>
        {
            Some(*filter_width as u64 * *filter_height as u64)
        }
        _ => None,
    }
}

fn average_pool_2d(op: &EstimateOp) -> Option<InstrCount> {
    let window = pool_window(op)?;
    per_output_element(op, window.saturating_sub(1), 1, 0)
}

// comparisons are counted as additions
fn max_pool_2d(op: &EstimateOp) -> Option<InstrCount> {
    let window = pool_window(op)?;
    per_output_element(op, window.saturating_sub(1), 0, 0)
}

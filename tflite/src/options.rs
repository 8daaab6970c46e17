use crate::schema::{ActivationFunctionType, BuiltinOptions, Operator, Padding};

/// Typed view over the `builtin_options` union, limited to the fields the
/// estimator and the report read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorOptions {
    None,
    Conv2D {
        padding: Padding,
        stride_w: i32,
        stride_h: i32,
        dilation_w: i32,
        dilation_h: i32,
        fused: ActivationFunctionType,
    },
    DepthwiseConv2D {
        padding: Padding,
        stride_w: i32,
        stride_h: i32,
        depth_multiplier: i32,
        fused: ActivationFunctionType,
    },
    Pool2D {
        padding: Padding,
        stride_w: i32,
        stride_h: i32,
        filter_width: i32,
        filter_height: i32,
        fused: ActivationFunctionType,
    },
    TransposeConv {
        padding: Padding,
        stride_w: i32,
        stride_h: i32,
        fused: ActivationFunctionType,
    },
    Concatenation {
        axis: i32,
        fused: ActivationFunctionType,
    },
    /// Tables whose only field of interest is the fused activation.
    Fused(BuiltinOptions, ActivationFunctionType),
    /// A typed payload without a fused activation.
    Other(BuiltinOptions),
}

impl OperatorOptions {
    pub fn from_operator(op: &Operator) -> OperatorOptions {
        let tag = op.builtin_options_type();
        if tag == BuiltinOptions::NONE || op.builtin_options().is_none() {
            return OperatorOptions::None;
        }
        if let Some(o) = op.builtin_options_as_conv_2_doptions() {
            OperatorOptions::Conv2D {
                padding: Padding(o.padding()),
                stride_w: o.stride_w(),
                stride_h: o.stride_h(),
                dilation_w: o.dilation_w_factor(),
                dilation_h: o.dilation_h_factor(),
                fused: ActivationFunctionType(o.fused_activation_function()),
            }
        } else if let Some(o) = op.builtin_options_as_depthwise_conv_2_doptions() {
            OperatorOptions::DepthwiseConv2D {
                padding: Padding(o.padding()),
                stride_w: o.stride_w(),
                stride_h: o.stride_h(),
                depth_multiplier: o.depth_multiplier(),
                fused: ActivationFunctionType(o.fused_activation_function()),
            }
        } else if let Some(o) = op.builtin_options_as_pool_2_doptions() {
            OperatorOptions::Pool2D {
                padding: Padding(o.padding()),
                stride_w: o.stride_w(),
                stride_h: o.stride_h(),
                filter_width: o.filter_width(),
                filter_height: o.filter_height(),
                fused: ActivationFunctionType(o.fused_activation_function()),
            }
        } else if let Some(o) = op.builtin_options_as_transpose_conv_options() {
            OperatorOptions::TransposeConv {
                padding: Padding(o.padding()),
                stride_w: o.stride_w(),
                stride_h: o.stride_h(),
                fused: ActivationFunctionType(o.fused_activation_function()),
            }
        } else if let Some(o) = op.builtin_options_as_concatenation_options() {
            OperatorOptions::Concatenation {
                axis: o.axis(),
                fused: ActivationFunctionType(o.fused_activation_function()),
            }
        } else if let Some(o) = op.builtin_options_as_fused_first() {
            OperatorOptions::Fused(tag, ActivationFunctionType(o.fused_activation_function()))
        } else if let Some(o) = op.builtin_options_as_fused_second() {
            OperatorOptions::Fused(tag, ActivationFunctionType(o.fused_activation_function()))
        } else {
            OperatorOptions::Other(tag)
        }
    }

    pub fn tag(&self) -> BuiltinOptions {
        match self {
            OperatorOptions::None => BuiltinOptions::NONE,
            OperatorOptions::Conv2D { .. } => BuiltinOptions::Conv2DOptions,
            OperatorOptions::DepthwiseConv2D { .. } => BuiltinOptions::DepthwiseConv2DOptions,
            OperatorOptions::Pool2D { .. } => BuiltinOptions::Pool2DOptions,
            OperatorOptions::TransposeConv { .. } => BuiltinOptions::TransposeConvOptions,
            OperatorOptions::Concatenation { .. } => BuiltinOptions::ConcatenationOptions,
            OperatorOptions::Fused(tag, _) | OperatorOptions::Other(tag) => *tag,
        }
    }

    pub fn fused_activation(&self) -> Option<ActivationFunctionType> {
        match self {
            OperatorOptions::Conv2D { fused, .. }
            | OperatorOptions::DepthwiseConv2D { fused, .. }
            | OperatorOptions::Pool2D { fused, .. }
            | OperatorOptions::TransposeConv { fused, .. }
            | OperatorOptions::Concatenation { fused, .. }
            | OperatorOptions::Fused(_, fused) => Some(*fused),
            OperatorOptions::None | OperatorOptions::Other(_) => None,
        }
    }

    /// True when a nonlinear function is applied on top of the operator output.
    pub fn has_fused_nonlinearity(&self) -> bool {
        self.fused_activation().map(|f| f != ActivationFunctionType::NONE).unwrap_or(false)
    }
}

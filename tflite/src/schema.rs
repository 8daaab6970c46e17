//! Read-only accessors for the part of the TFLite flatbuffer schema the
//! inspector walks.
//!
//! Tables follow the layout of `tensorflow/lite/schema/schema.fbs` and the
//! shape of `flatc --rust` output: one struct wrapping a `flatbuffers::Table`,
//! one `VT_*` slot constant per field, and a `Verifiable` impl so the buffer
//! can be checked once before it is read unchecked.

#![allow(clippy::missing_safety_doc)]

use flatbuffers::{ForwardsUOffset, Follow, InvalidFlatbuffer, Table, VOffsetT, Vector, Verifiable, Verifier};

macro_rules! flat_enum {
    ($(#[$meta:meta])* $name:ident($repr:ty) { $($variant:ident = $value:expr),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[repr(transparent)]
        pub struct $name(pub $repr);

        #[allow(non_upper_case_globals)]
        impl $name {
            $(pub const $variant: Self = Self($value);)*

            pub const ENUM_VALUES: &'static [Self] = &[$(Self::$variant),*];

            pub fn variant_name(self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some(stringify!($variant)),)*
                    _ => None,
                }
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                match self.variant_name() {
                    Some(name) => write!(f, "{name}"),
                    None => write!(f, "<UNKNOWN {:?}>", self.0),
                }
            }
        }
    };
}

flat_enum!(TensorType(i8) {
    FLOAT32 = 0,
    FLOAT16 = 1,
    INT32 = 2,
    UINT8 = 3,
    INT64 = 4,
    STRING = 5,
    BOOL = 6,
    INT16 = 7,
    COMPLEX64 = 8,
    INT8 = 9,
    FLOAT64 = 10,
    COMPLEX128 = 11,
    UINT64 = 12,
    RESOURCE = 13,
    VARIANT = 14,
    UINT32 = 15,
    UINT16 = 16,
    INT4 = 17,
});

flat_enum!(Padding(i8) { SAME = 0, VALID = 1 });

flat_enum!(ActivationFunctionType(i8) {
    NONE = 0,
    RELU = 1,
    RELU_N1_TO_1 = 2,
    RELU6 = 3,
    TANH = 4,
    SIGN_BIT = 5,
});

flat_enum!(
    /// Builtin operator codes. `CUSTOM` marks an operator whose name lives in
    /// `OperatorCode::custom_code`.
    BuiltinOperator(i32) {
    ADD = 0,
    AVERAGE_POOL_2D = 1,
    CONCATENATION = 2,
    CONV_2D = 3,
    DEPTHWISE_CONV_2D = 4,
    DEPTH_TO_SPACE = 5,
    DEQUANTIZE = 6,
    EMBEDDING_LOOKUP = 7,
    FLOOR = 8,
    FULLY_CONNECTED = 9,
    HASHTABLE_LOOKUP = 10,
    L2_NORMALIZATION = 11,
    L2_POOL_2D = 12,
    LOCAL_RESPONSE_NORMALIZATION = 13,
    LOGISTIC = 14,
    LSH_PROJECTION = 15,
    LSTM = 16,
    MAX_POOL_2D = 17,
    MUL = 18,
    RELU = 19,
    RELU_N1_TO_1 = 20,
    RELU6 = 21,
    RESHAPE = 22,
    RESIZE_BILINEAR = 23,
    RNN = 24,
    SOFTMAX = 25,
    SPACE_TO_DEPTH = 26,
    SVDF = 27,
    TANH = 28,
    CONCAT_EMBEDDINGS = 29,
    SKIP_GRAM = 30,
    CALL = 31,
    CUSTOM = 32,
    EMBEDDING_LOOKUP_SPARSE = 33,
    PAD = 34,
    UNIDIRECTIONAL_SEQUENCE_RNN = 35,
    GATHER = 36,
    BATCH_TO_SPACE_ND = 37,
    SPACE_TO_BATCH_ND = 38,
    TRANSPOSE = 39,
    MEAN = 40,
    SUB = 41,
    DIV = 42,
    SQUEEZE = 43,
    UNIDIRECTIONAL_SEQUENCE_LSTM = 44,
    STRIDED_SLICE = 45,
    BIDIRECTIONAL_SEQUENCE_RNN = 46,
    EXP = 47,
    TOPK_V2 = 48,
    SPLIT = 49,
    LOG_SOFTMAX = 50,
    DELEGATE = 51,
    BIDIRECTIONAL_SEQUENCE_LSTM = 52,
    CAST = 53,
    PRELU = 54,
    MAXIMUM = 55,
    ARG_MAX = 56,
    MINIMUM = 57,
    LESS = 58,
    NEG = 59,
    PADV2 = 60,
    GREATER = 61,
    GREATER_EQUAL = 62,
    LESS_EQUAL = 63,
    SELECT = 64,
    SLICE = 65,
    SIN = 66,
    TRANSPOSE_CONV = 67,
    SPARSE_TO_DENSE = 68,
    TILE = 69,
    EXPAND_DIMS = 70,
    EQUAL = 71,
    NOT_EQUAL = 72,
    LOG = 73,
    SUM = 74,
    SQRT = 75,
    RSQRT = 76,
    SHAPE = 77,
    POW = 78,
    ARG_MIN = 79,
    FAKE_QUANT = 80,
    REDUCE_PROD = 81,
    REDUCE_MAX = 82,
    PACK = 83,
    LOGICAL_OR = 84,
    ONE_HOT = 85,
    LOGICAL_AND = 86,
    LOGICAL_NOT = 87,
    UNPACK = 88,
    REDUCE_MIN = 89,
    FLOOR_DIV = 90,
    REDUCE_ANY = 91,
    SQUARE = 92,
    ZEROS_LIKE = 93,
    FILL = 94,
    FLOOR_MOD = 95,
    RANGE = 96,
    RESIZE_NEAREST_NEIGHBOR = 97,
    LEAKY_RELU = 98,
    SQUARED_DIFFERENCE = 99,
    MIRROR_PAD = 100,
    ABS = 101,
    SPLIT_V = 102,
    UNIQUE = 103,
    CEIL = 104,
    REVERSE_V2 = 105,
    ADD_N = 106,
    GATHER_ND = 107,
    COS = 108,
    WHERE = 109,
    RANK = 110,
    ELU = 111,
    REVERSE_SEQUENCE = 112,
    MATRIX_DIAG = 113,
    QUANTIZE = 114,
    MATRIX_SET_DIAG = 115,
    ROUND = 116,
    HARD_SWISH = 117,
    IF = 118,
    WHILE = 119,
    NON_MAX_SUPPRESSION_V4 = 120,
    NON_MAX_SUPPRESSION_V5 = 121,
    SCATTER_ND = 122,
    SELECT_V2 = 123,
    DENSIFY = 124,
    SEGMENT_SUM = 125,
    BATCH_MATMUL = 126,
    PLACEHOLDER_FOR_GREATER_OP_CODES = 127,
    CUMSUM = 128,
    CALL_ONCE = 129,
    BROADCAST_TO = 130,
    RFFT2D = 131,
    CONV_3D = 132,
    IMAG = 133,
    REAL = 134,
    COMPLEX_ABS = 135,
    HASHTABLE = 136,
    HASHTABLE_FIND = 137,
    HASHTABLE_IMPORT = 138,
    HASHTABLE_SIZE = 139,
    REDUCE_ALL = 140,
    CONV_3D_TRANSPOSE = 141,
    VAR_HANDLE = 142,
    READ_VARIABLE = 143,
    ASSIGN_VARIABLE = 144,
    BROADCAST_ARGS = 145,
    RANDOM_STANDARD_NORMAL = 146,
    BUCKETIZE = 147,
    RANDOM_UNIFORM = 148,
    MULTINOMIAL = 149,
    GELU = 150,
    DYNAMIC_UPDATE_SLICE = 151,
    RELU_0_TO_1 = 152,
    UNSORTED_SEGMENT_PROD = 153,
    UNSORTED_SEGMENT_MAX = 154,
    UNSORTED_SEGMENT_SUM = 155,
    ATAN2 = 156,
    UNSORTED_SEGMENT_MIN = 157,
    SIGN = 158,
    BITCAST = 159,
    BITWISE_XOR = 160,
    RIGHT_SHIFT = 161,
});

flat_enum!(
    /// Type tag of the `Operator::builtin_options` union.
    BuiltinOptions(u8) {
    NONE = 0,
    Conv2DOptions = 1,
    DepthwiseConv2DOptions = 2,
    ConcatEmbeddingsOptions = 3,
    LSHProjectionOptions = 4,
    Pool2DOptions = 5,
    SVDFOptions = 6,
    RNNOptions = 7,
    FullyConnectedOptions = 8,
    SoftmaxOptions = 9,
    ConcatenationOptions = 10,
    AddOptions = 11,
    L2NormOptions = 12,
    LocalResponseNormalizationOptions = 13,
    LSTMOptions = 14,
    ResizeBilinearOptions = 15,
    CallOptions = 16,
    ReshapeOptions = 17,
    SkipGramOptions = 18,
    SpaceToDepthOptions = 19,
    EmbeddingLookupSparseOptions = 20,
    MulOptions = 21,
    PadOptions = 22,
    GatherOptions = 23,
    BatchToSpaceNDOptions = 24,
    SpaceToBatchNDOptions = 25,
    TransposeOptions = 26,
    ReducerOptions = 27,
    SubOptions = 28,
    DivOptions = 29,
    SqueezeOptions = 30,
    SequenceRNNOptions = 31,
    StridedSliceOptions = 32,
    ExpOptions = 33,
    TopKV2Options = 34,
    SplitOptions = 35,
    LogSoftmaxOptions = 36,
    CastOptions = 37,
    DequantizeOptions = 38,
    MaximumMinimumOptions = 39,
    ArgMaxOptions = 40,
    LessOptions = 41,
    NegOptions = 42,
    PadV2Options = 43,
    GreaterOptions = 44,
    GreaterEqualOptions = 45,
    LessEqualOptions = 46,
    SelectOptions = 47,
    SliceOptions = 48,
    TransposeConvOptions = 49,
    SparseToDenseOptions = 50,
    TileOptions = 51,
    ExpandDimsOptions = 52,
    EqualOptions = 53,
    NotEqualOptions = 54,
    ShapeOptions = 55,
    PowOptions = 56,
    ArgMinOptions = 57,
    FakeQuantOptions = 58,
    PackOptions = 59,
    LogicalOrOptions = 60,
    OneHotOptions = 61,
    LogicalAndOptions = 62,
    LogicalNotOptions = 63,
    UnpackOptions = 64,
    FloorDivOptions = 65,
    SquareOptions = 66,
    ZerosLikeOptions = 67,
    FillOptions = 68,
    BidirectionalSequenceLSTMOptions = 69,
    BidirectionalSequenceRNNOptions = 70,
    UnidirectionalSequenceLSTMOptions = 71,
    FloorModOptions = 72,
    RangeOptions = 73,
    ResizeNearestNeighborOptions = 74,
    LeakyReluOptions = 75,
    SquaredDifferenceOptions = 76,
    MirrorPadOptions = 77,
    AbsOptions = 78,
    SplitVOptions = 79,
    UniqueOptions = 80,
    ReverseV2Options = 81,
    AddNOptions = 82,
    GatherNdOptions = 83,
    CosOptions = 84,
    WhereOptions = 85,
    RankOptions = 86,
    ReverseSequenceOptions = 87,
    MatrixDiagOptions = 88,
    QuantizeOptions = 89,
    MatrixSetDiagOptions = 90,
    HardSwishOptions = 91,
    IfOptions = 92,
    WhileOptions = 93,
    DepthToSpaceOptions = 94,
    NonMaxSuppressionV4Options = 95,
    NonMaxSuppressionV5Options = 96,
    ScatterNdOptions = 97,
    SelectV2Options = 98,
    DensifyOptions = 99,
    SegmentSumOptions = 100,
    BatchMatMulOptions = 101,
    CumsumOptions = 102,
    CallOnceOptions = 103,
    BroadcastToOptions = 104,
    Rfft2dOptions = 105,
    Conv3DOptions = 106,
    HashtableOptions = 107,
    HashtableFindOptions = 108,
    HashtableImportOptions = 109,
    HashtableSizeOptions = 110,
    VarHandleOptions = 111,
    ReadVariableOptions = 112,
    AssignVariableOptions = 113,
    RandomOptions = 114,
    BucketizeOptions = 115,
    GeluOptions = 116,
    DynamicUpdateSliceOptions = 117,
    UnsortedSegmentProdOptions = 118,
    UnsortedSegmentMaxOptions = 119,
    UnsortedSegmentMinOptions = 120,
    UnsortedSegmentSumOptions = 121,
    ATan2Options = 122,
    SignOptions = 123,
    BitcastOptions = 124,
    BitwiseXorOptions = 125,
    RightShiftOptions = 126,
});

macro_rules! flat_table_follow {
    ($name:ident) => {
        impl<'a> Follow<'a> for $name<'a> {
            type Inner = $name<'a>;
            #[inline]
            unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
                Self { _tab: Table::new(buf, loc) }
            }
        }

        impl<'a> $name<'a> {
            #[inline]
            pub unsafe fn init_from_table(table: Table<'a>) -> Self {
                $name { _tab: table }
            }
        }
    };
}

/// Scalar-only option tables. Every accessor falls back to the schema default
/// when the field is absent from the vtable.
macro_rules! options_table {
    ($name:ident { $($field:ident: $ty:ty = ($slot:expr, $default:expr)),* $(,)? }) => {
        #[derive(Copy, Clone, PartialEq)]
        pub struct $name<'a> {
            pub _tab: Table<'a>,
        }

        flat_table_follow!($name);

        impl Verifiable for $name<'_> {
            #[inline]
            fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
                v.visit_table(pos)?
                    $(.visit_field::<$ty>(stringify!($field), $slot, false)?)*
                    .finish();
                Ok(())
            }
        }

        impl<'a> $name<'a> {
            $(
                #[inline]
                pub fn $field(&self) -> $ty {
                    unsafe { self._tab.get::<$ty>($slot, Some($default)).unwrap() }
                }
            )*
        }
    };
}

#[derive(Copy, Clone, PartialEq)]
pub struct Model<'a> {
    pub _tab: Table<'a>,
}

flat_table_follow!(Model);

impl<'a> Model<'a> {
    pub const VT_VERSION: VOffsetT = 4;
    pub const VT_OPERATOR_CODES: VOffsetT = 6;
    pub const VT_SUBGRAPHS: VOffsetT = 8;
    pub const VT_DESCRIPTION: VOffsetT = 10;
    pub const VT_BUFFERS: VOffsetT = 12;

    #[inline]
    pub fn version(&self) -> u32 {
        unsafe { self._tab.get::<u32>(Model::VT_VERSION, Some(0)).unwrap() }
    }

    #[inline]
    pub fn operator_codes(&self) -> Option<Vector<'a, ForwardsUOffset<OperatorCode<'a>>>> {
        unsafe {
            self._tab.get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<OperatorCode>>>>(
                Model::VT_OPERATOR_CODES,
                None,
            )
        }
    }

    #[inline]
    pub fn subgraphs(&self) -> Option<Vector<'a, ForwardsUOffset<SubGraph<'a>>>> {
        unsafe {
            self._tab.get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<SubGraph>>>>(
                Model::VT_SUBGRAPHS,
                None,
            )
        }
    }

    #[inline]
    pub fn description(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Model::VT_DESCRIPTION, None) }
    }

    #[inline]
    pub fn buffers(&self) -> Option<Vector<'a, ForwardsUOffset<Buffer<'a>>>> {
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<Buffer>>>>(Model::VT_BUFFERS, None)
        }
    }
}

impl Verifiable for Model<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<u32>("version", Self::VT_VERSION, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<OperatorCode>>>>(
                "operator_codes",
                Self::VT_OPERATOR_CODES,
                false,
            )?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<SubGraph>>>>(
                "subgraphs",
                Self::VT_SUBGRAPHS,
                false,
            )?
            .visit_field::<ForwardsUOffset<&str>>("description", Self::VT_DESCRIPTION, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<Buffer>>>>(
                "buffers",
                Self::VT_BUFFERS,
                false,
            )?
            .finish();
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct SubGraph<'a> {
    pub _tab: Table<'a>,
}

flat_table_follow!(SubGraph);

impl<'a> SubGraph<'a> {
    pub const VT_TENSORS: VOffsetT = 4;
    pub const VT_INPUTS: VOffsetT = 6;
    pub const VT_OUTPUTS: VOffsetT = 8;
    pub const VT_OPERATORS: VOffsetT = 10;
    pub const VT_NAME: VOffsetT = 12;

    #[inline]
    pub fn tensors(&self) -> Option<Vector<'a, ForwardsUOffset<Tensor<'a>>>> {
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<Tensor>>>>(SubGraph::VT_TENSORS, None)
        }
    }

    #[inline]
    pub fn inputs(&self) -> Option<Vector<'a, i32>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, i32>>>(SubGraph::VT_INPUTS, None) }
    }

    #[inline]
    pub fn outputs(&self) -> Option<Vector<'a, i32>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, i32>>>(SubGraph::VT_OUTPUTS, None) }
    }

    #[inline]
    pub fn operators(&self) -> Option<Vector<'a, ForwardsUOffset<Operator<'a>>>> {
        unsafe {
            self._tab.get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<Operator>>>>(
                SubGraph::VT_OPERATORS,
                None,
            )
        }
    }

    #[inline]
    pub fn name(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(SubGraph::VT_NAME, None) }
    }
}

impl Verifiable for SubGraph<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<Tensor>>>>(
                "tensors",
                Self::VT_TENSORS,
                false,
            )?
            .visit_field::<ForwardsUOffset<Vector<'_, i32>>>("inputs", Self::VT_INPUTS, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, i32>>>("outputs", Self::VT_OUTPUTS, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<Operator>>>>(
                "operators",
                Self::VT_OPERATORS,
                false,
            )?
            .visit_field::<ForwardsUOffset<&str>>("name", Self::VT_NAME, false)?
            .finish();
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct Tensor<'a> {
    pub _tab: Table<'a>,
}

flat_table_follow!(Tensor);

impl<'a> Tensor<'a> {
    pub const VT_SHAPE: VOffsetT = 4;
    pub const VT_TYPE_: VOffsetT = 6;
    pub const VT_BUFFER: VOffsetT = 8;
    pub const VT_NAME: VOffsetT = 10;

    #[inline]
    pub fn shape(&self) -> Option<Vector<'a, i32>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, i32>>>(Tensor::VT_SHAPE, None) }
    }

    #[inline]
    pub fn type_(&self) -> TensorType {
        TensorType(unsafe { self._tab.get::<i8>(Tensor::VT_TYPE_, Some(0)).unwrap() })
    }

    #[inline]
    pub fn buffer(&self) -> u32 {
        unsafe { self._tab.get::<u32>(Tensor::VT_BUFFER, Some(0)).unwrap() }
    }

    #[inline]
    pub fn name(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Tensor::VT_NAME, None) }
    }
}

impl Verifiable for Tensor<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, i32>>>("shape", Self::VT_SHAPE, false)?
            .visit_field::<i8>("type_", Self::VT_TYPE_, false)?
            .visit_field::<u32>("buffer", Self::VT_BUFFER, false)?
            .visit_field::<ForwardsUOffset<&str>>("name", Self::VT_NAME, false)?
            .finish();
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct Buffer<'a> {
    pub _tab: Table<'a>,
}

flat_table_follow!(Buffer);

impl<'a> Buffer<'a> {
    pub const VT_DATA: VOffsetT = 4;
    pub const VT_OFFSET: VOffsetT = 6;
    pub const VT_SIZE: VOffsetT = 8;

    #[inline]
    pub fn data(&self) -> Option<Vector<'a, u8>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, u8>>>(Buffer::VT_DATA, None) }
    }

    /// Position of the payload outside the flatbuffer, for models over 2GB.
    #[inline]
    pub fn offset(&self) -> u64 {
        unsafe { self._tab.get::<u64>(Buffer::VT_OFFSET, Some(0)).unwrap() }
    }

    #[inline]
    pub fn size(&self) -> u64 {
        unsafe { self._tab.get::<u64>(Buffer::VT_SIZE, Some(0)).unwrap() }
    }
}

impl Verifiable for Buffer<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, u8>>>("data", Self::VT_DATA, false)?
            .visit_field::<u64>("offset", Self::VT_OFFSET, false)?
            .visit_field::<u64>("size", Self::VT_SIZE, false)?
            .finish();
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct OperatorCode<'a> {
    pub _tab: Table<'a>,
}

flat_table_follow!(OperatorCode);

impl<'a> OperatorCode<'a> {
    pub const VT_DEPRECATED_BUILTIN_CODE: VOffsetT = 4;
    pub const VT_CUSTOM_CODE: VOffsetT = 6;
    pub const VT_VERSION: VOffsetT = 8;
    pub const VT_BUILTIN_CODE: VOffsetT = 10;

    #[inline]
    pub fn deprecated_builtin_code(&self) -> i8 {
        unsafe { self._tab.get::<i8>(OperatorCode::VT_DEPRECATED_BUILTIN_CODE, Some(0)).unwrap() }
    }

    #[inline]
    pub fn custom_code(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(OperatorCode::VT_CUSTOM_CODE, None) }
    }

    #[inline]
    pub fn version(&self) -> i32 {
        unsafe { self._tab.get::<i32>(OperatorCode::VT_VERSION, Some(1)).unwrap() }
    }

    #[inline]
    pub fn builtin_code(&self) -> BuiltinOperator {
        BuiltinOperator(unsafe {
            self._tab.get::<i32>(OperatorCode::VT_BUILTIN_CODE, Some(0)).unwrap()
        })
    }
}

impl Verifiable for OperatorCode<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<i8>("deprecated_builtin_code", Self::VT_DEPRECATED_BUILTIN_CODE, false)?
            .visit_field::<ForwardsUOffset<&str>>("custom_code", Self::VT_CUSTOM_CODE, false)?
            .visit_field::<i32>("version", Self::VT_VERSION, false)?
            .visit_field::<i32>("builtin_code", Self::VT_BUILTIN_CODE, false)?
            .finish();
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct Operator<'a> {
    pub _tab: Table<'a>,
}

flat_table_follow!(Operator);

impl<'a> Operator<'a> {
    pub const VT_OPCODE_INDEX: VOffsetT = 4;
    pub const VT_INPUTS: VOffsetT = 6;
    pub const VT_OUTPUTS: VOffsetT = 8;
    pub const VT_BUILTIN_OPTIONS_TYPE: VOffsetT = 10;
    pub const VT_BUILTIN_OPTIONS: VOffsetT = 12;

    #[inline]
    pub fn opcode_index(&self) -> u32 {
        unsafe { self._tab.get::<u32>(Operator::VT_OPCODE_INDEX, Some(0)).unwrap() }
    }

    #[inline]
    pub fn inputs(&self) -> Option<Vector<'a, i32>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, i32>>>(Operator::VT_INPUTS, None) }
    }

    #[inline]
    pub fn outputs(&self) -> Option<Vector<'a, i32>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, i32>>>(Operator::VT_OUTPUTS, None) }
    }

    #[inline]
    pub fn builtin_options_type(&self) -> BuiltinOptions {
        BuiltinOptions(unsafe {
            self._tab.get::<u8>(Operator::VT_BUILTIN_OPTIONS_TYPE, Some(0)).unwrap()
        })
    }

    /// Raw union payload. Only the variants listed in
    /// `verify_builtin_options` are checked by the verifier.
    #[inline]
    pub fn builtin_options(&self) -> Option<Table<'a>> {
        unsafe { self._tab.get::<ForwardsUOffset<Table<'a>>>(Operator::VT_BUILTIN_OPTIONS, None) }
    }

    fn builtin_options_as<T>(&self, tag: BuiltinOptions, wrap: unsafe fn(Table<'a>) -> T) -> Option<T> {
        if self.builtin_options_type() == tag {
            self.builtin_options().map(|t| unsafe { wrap(t) })
        } else {
            None
        }
    }

    pub fn builtin_options_as_conv_2_doptions(&self) -> Option<Conv2DOptions<'a>> {
        self.builtin_options_as(BuiltinOptions::Conv2DOptions, Conv2DOptions::init_from_table)
    }

    pub fn builtin_options_as_depthwise_conv_2_doptions(
        &self,
    ) -> Option<DepthwiseConv2DOptions<'a>> {
        self.builtin_options_as(
            BuiltinOptions::DepthwiseConv2DOptions,
            DepthwiseConv2DOptions::init_from_table,
        )
    }

    pub fn builtin_options_as_pool_2_doptions(&self) -> Option<Pool2DOptions<'a>> {
        self.builtin_options_as(BuiltinOptions::Pool2DOptions, Pool2DOptions::init_from_table)
    }

    pub fn builtin_options_as_transpose_conv_options(&self) -> Option<TransposeConvOptions<'a>> {
        self.builtin_options_as(
            BuiltinOptions::TransposeConvOptions,
            TransposeConvOptions::init_from_table,
        )
    }

    pub fn builtin_options_as_concatenation_options(&self) -> Option<ConcatenationOptions<'a>> {
        self.builtin_options_as(
            BuiltinOptions::ConcatenationOptions,
            ConcatenationOptions::init_from_table,
        )
    }

    /// Option tables with the fused activation as first field.
    pub fn builtin_options_as_fused_first(&self) -> Option<FusedFirstOptions<'a>> {
        if FUSED_FIRST.contains(&self.builtin_options_type()) {
            self.builtin_options().map(|t| unsafe { FusedFirstOptions::init_from_table(t) })
        } else {
            None
        }
    }

    /// Option tables with the fused activation as second field.
    pub fn builtin_options_as_fused_second(&self) -> Option<FusedSecondOptions<'a>> {
        if FUSED_SECOND.contains(&self.builtin_options_type()) {
            self.builtin_options().map(|t| unsafe { FusedSecondOptions::init_from_table(t) })
        } else {
            None
        }
    }
}

pub const FUSED_FIRST: &[BuiltinOptions] = &[
    BuiltinOptions::RNNOptions,
    BuiltinOptions::FullyConnectedOptions,
    BuiltinOptions::AddOptions,
    BuiltinOptions::L2NormOptions,
    BuiltinOptions::LSTMOptions,
    BuiltinOptions::MulOptions,
    BuiltinOptions::SubOptions,
    BuiltinOptions::DivOptions,
    BuiltinOptions::BidirectionalSequenceLSTMOptions,
    BuiltinOptions::UnidirectionalSequenceLSTMOptions,
];

pub const FUSED_SECOND: &[BuiltinOptions] = &[
    BuiltinOptions::SVDFOptions,
    BuiltinOptions::SequenceRNNOptions,
    BuiltinOptions::BidirectionalSequenceRNNOptions,
];

fn verify_builtin_options(
    tag: BuiltinOptions,
    v: &mut Verifier,
    pos: usize,
) -> Result<(), InvalidFlatbuffer> {
    match tag {
        BuiltinOptions::Conv2DOptions => v.verify_union_variant::<ForwardsUOffset<Conv2DOptions>>(
            "BuiltinOptions::Conv2DOptions",
            pos,
        ),
        BuiltinOptions::DepthwiseConv2DOptions => v
            .verify_union_variant::<ForwardsUOffset<DepthwiseConv2DOptions>>(
                "BuiltinOptions::DepthwiseConv2DOptions",
                pos,
            ),
        BuiltinOptions::Pool2DOptions => v.verify_union_variant::<ForwardsUOffset<Pool2DOptions>>(
            "BuiltinOptions::Pool2DOptions",
            pos,
        ),
        BuiltinOptions::TransposeConvOptions => v
            .verify_union_variant::<ForwardsUOffset<TransposeConvOptions>>(
                "BuiltinOptions::TransposeConvOptions",
                pos,
            ),
        BuiltinOptions::ConcatenationOptions => v
            .verify_union_variant::<ForwardsUOffset<ConcatenationOptions>>(
                "BuiltinOptions::ConcatenationOptions",
                pos,
            ),
        tag if FUSED_FIRST.contains(&tag) => {
            v.verify_union_variant::<ForwardsUOffset<FusedFirstOptions>>("BuiltinOptions", pos)
        }
        tag if FUSED_SECOND.contains(&tag) => {
            v.verify_union_variant::<ForwardsUOffset<FusedSecondOptions>>("BuiltinOptions", pos)
        }
        _ => Ok(()),
    }
}

impl Verifiable for Operator<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<u32>("opcode_index", Self::VT_OPCODE_INDEX, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, i32>>>("inputs", Self::VT_INPUTS, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, i32>>>("outputs", Self::VT_OUTPUTS, false)?
            .visit_union::<u8, _>(
                "builtin_options_type",
                Self::VT_BUILTIN_OPTIONS_TYPE,
                "builtin_options",
                Self::VT_BUILTIN_OPTIONS,
                false,
                |key, v, pos| verify_builtin_options(BuiltinOptions(key), v, pos),
            )?
            .finish();
        Ok(())
    }
}

options_table!(Conv2DOptions {
    padding: i8 = (4, 0),
    stride_w: i32 = (6, 0),
    stride_h: i32 = (8, 0),
    fused_activation_function: i8 = (10, 0),
    dilation_w_factor: i32 = (12, 1),
    dilation_h_factor: i32 = (14, 1),
});

options_table!(DepthwiseConv2DOptions {
    padding: i8 = (4, 0),
    stride_w: i32 = (6, 0),
    stride_h: i32 = (8, 0),
    depth_multiplier: i32 = (10, 0),
    fused_activation_function: i8 = (12, 0),
    dilation_w_factor: i32 = (14, 1),
    dilation_h_factor: i32 = (16, 1),
});

options_table!(Pool2DOptions {
    padding: i8 = (4, 0),
    stride_w: i32 = (6, 0),
    stride_h: i32 = (8, 0),
    filter_width: i32 = (10, 0),
    filter_height: i32 = (12, 0),
    fused_activation_function: i8 = (14, 0),
});

options_table!(TransposeConvOptions {
    padding: i8 = (4, 0),
    stride_w: i32 = (6, 0),
    stride_h: i32 = (8, 0),
    fused_activation_function: i8 = (10, 0),
});

options_table!(ConcatenationOptions {
    axis: i32 = (4, 0),
    fused_activation_function: i8 = (6, 0),
});

options_table!(FusedFirstOptions {
    fused_activation_function: i8 = (4, 0),
});

options_table!(FusedSecondOptions {
    fused_activation_function: i8 = (6, 0),
});

#[inline]
pub fn root_as_model(buf: &[u8]) -> Result<Model, InvalidFlatbuffer> {
    flatbuffers::root::<Model>(buf)
}

/// # Safety
/// `buf` must have gone through `root_as_model` successfully.
#[inline]
pub unsafe fn root_as_model_unchecked(buf: &[u8]) -> Model {
    flatbuffers::root_unchecked::<Model>(buf)
}

pub const MODEL_IDENTIFIER: &str = "TFL3";

#[inline]
pub fn model_buffer_has_identifier(buf: &[u8]) -> bool {
    buf.len() >= 8 && flatbuffers::buffer_has_identifier(buf, MODEL_IDENTIFIER, false)
}

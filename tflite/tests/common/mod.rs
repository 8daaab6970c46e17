#![allow(dead_code)]

use flatbuffers::{FlatBufferBuilder, WIPOffset};
use tflinspect_tflite::schema::{
    Buffer, BuiltinOperator, BuiltinOptions, Model, Operator, OperatorCode, SubGraph, Tensor,
    TensorType,
};
use tflinspect_tflite::{Tflite, TfliteProtoModel};

pub struct TensorDef {
    pub shape: Vec<i32>,
    pub datum_type: TensorType,
    pub buffer: u32,
    pub name: String,
}

pub fn tensor(shape: &[i32], buffer: u32, name: &str) -> TensorDef {
    TensorDef { shape: shape.to_vec(), datum_type: TensorType::FLOAT32, buffer, name: name.into() }
}

pub enum OptionsDef {
    None,
    Conv2D { fused: i8 },
    Pool2D { filter_width: i32, filter_height: i32 },
    /// Option tables holding only a fused activation in their first field.
    Fused(BuiltinOptions, i8),
}

pub struct OperatorDef {
    pub opcode_index: u32,
    pub inputs: Vec<i32>,
    pub outputs: Vec<i32>,
    pub options: OptionsDef,
}

pub fn operator(opcode_index: u32, inputs: &[i32], outputs: &[i32], options: OptionsDef) -> OperatorDef {
    OperatorDef { opcode_index, inputs: inputs.to_vec(), outputs: outputs.to_vec(), options }
}

pub struct SubGraphDef {
    pub name: String,
    pub tensors: Vec<TensorDef>,
    pub inputs: Vec<i32>,
    pub outputs: Vec<i32>,
    pub operators: Vec<OperatorDef>,
}

pub struct OpcodeDef {
    pub builtin: i32,
    pub custom: Option<String>,
}

pub fn builtin(op: BuiltinOperator) -> OpcodeDef {
    OpcodeDef { builtin: op.0, custom: None }
}

pub fn custom(name: &str) -> OpcodeDef {
    OpcodeDef { builtin: BuiltinOperator::CUSTOM.0, custom: Some(name.into()) }
}

#[derive(Default)]
pub struct ModelDef {
    pub opcodes: Vec<OpcodeDef>,
    /// Buffer #0 is the conventional empty sentinel and is always emitted.
    pub buffers: Vec<Vec<u8>>,
    pub subgraphs: Vec<SubGraphDef>,
}

const POOL_FILTER_WIDTH: u16 = 10;
const POOL_FILTER_HEIGHT: u16 = 12;
const CONV_FUSED: u16 = 10;
const FUSED_FIRST: u16 = 4;

fn build_options<'a>(
    fbb: &mut FlatBufferBuilder<'a>,
    options: &OptionsDef,
) -> Option<(BuiltinOptions, WIPOffset<flatbuffers::UnionWIPOffset>)> {
    let (tag, table) = match options {
        OptionsDef::None => return None,
        OptionsDef::Conv2D { fused } => {
            let start = fbb.start_table();
            fbb.push_slot::<i8>(4, 1, 0);
            fbb.push_slot::<i32>(6, 1, 0);
            fbb.push_slot::<i32>(8, 1, 0);
            fbb.push_slot::<i8>(CONV_FUSED, *fused, 0);
            (BuiltinOptions::Conv2DOptions, fbb.end_table(start))
        }
        OptionsDef::Pool2D { filter_width, filter_height } => {
            let start = fbb.start_table();
            fbb.push_slot::<i8>(4, 1, 0);
            fbb.push_slot::<i32>(6, 2, 0);
            fbb.push_slot::<i32>(8, 2, 0);
            fbb.push_slot::<i32>(POOL_FILTER_WIDTH, *filter_width, 0);
            fbb.push_slot::<i32>(POOL_FILTER_HEIGHT, *filter_height, 0);
            (BuiltinOptions::Pool2DOptions, fbb.end_table(start))
        }
        OptionsDef::Fused(tag, fused) => {
            let start = fbb.start_table();
            fbb.push_slot::<i8>(FUSED_FIRST, *fused, 0);
            (*tag, fbb.end_table(start))
        }
    };
    Some((tag, table.as_union_value()))
}

impl ModelDef {
    pub fn build(&self) -> Vec<u8> {
        let mut fbb = FlatBufferBuilder::new();

        let mut buffers = vec![];
        for data in std::iter::once(&vec![]).chain(self.buffers.iter()) {
            let data = (!data.is_empty()).then(|| fbb.create_vector(data.as_slice()));
            let start = fbb.start_table();
            if let Some(data) = data {
                fbb.push_slot_always(Buffer::VT_DATA, data);
            }
            buffers.push(fbb.end_table(start));
        }
        let buffers = fbb.create_vector(&buffers);

        let mut opcodes = vec![];
        for def in &self.opcodes {
            let custom = def.custom.as_deref().map(|c| fbb.create_string(c));
            let start = fbb.start_table();
            fbb.push_slot::<i8>(OperatorCode::VT_DEPRECATED_BUILTIN_CODE, def.builtin.min(127) as i8, 0);
            if let Some(custom) = custom {
                fbb.push_slot_always(OperatorCode::VT_CUSTOM_CODE, custom);
            }
            fbb.push_slot::<i32>(OperatorCode::VT_VERSION, 1, 1);
            fbb.push_slot::<i32>(OperatorCode::VT_BUILTIN_CODE, def.builtin, 0);
            opcodes.push(fbb.end_table(start));
        }
        let opcodes = fbb.create_vector(&opcodes);

        let mut subgraphs = vec![];
        for sg in &self.subgraphs {
            let mut tensors = vec![];
            for t in &sg.tensors {
                let shape = fbb.create_vector(t.shape.as_slice());
                let name = fbb.create_string(&t.name);
                let start = fbb.start_table();
                fbb.push_slot_always(Tensor::VT_SHAPE, shape);
                fbb.push_slot::<i8>(Tensor::VT_TYPE_, t.datum_type.0, 0);
                fbb.push_slot::<u32>(Tensor::VT_BUFFER, t.buffer, 0);
                fbb.push_slot_always(Tensor::VT_NAME, name);
                tensors.push(fbb.end_table(start));
            }
            let tensors = fbb.create_vector(&tensors);

            let mut operators = vec![];
            for op in &sg.operators {
                let inputs = fbb.create_vector(op.inputs.as_slice());
                let outputs = fbb.create_vector(op.outputs.as_slice());
                let options = build_options(&mut fbb, &op.options);
                let start = fbb.start_table();
                fbb.push_slot::<u32>(Operator::VT_OPCODE_INDEX, op.opcode_index, 0);
                fbb.push_slot_always(Operator::VT_INPUTS, inputs);
                fbb.push_slot_always(Operator::VT_OUTPUTS, outputs);
                if let Some((tag, table)) = options {
                    fbb.push_slot::<u8>(Operator::VT_BUILTIN_OPTIONS_TYPE, tag.0, 0);
                    fbb.push_slot_always(Operator::VT_BUILTIN_OPTIONS, table);
                }
                operators.push(fbb.end_table(start));
            }
            let operators = fbb.create_vector(&operators);

            let inputs = fbb.create_vector(sg.inputs.as_slice());
            let outputs = fbb.create_vector(sg.outputs.as_slice());
            let name = fbb.create_string(&sg.name);
            let start = fbb.start_table();
            fbb.push_slot_always(SubGraph::VT_TENSORS, tensors);
            fbb.push_slot_always(SubGraph::VT_INPUTS, inputs);
            fbb.push_slot_always(SubGraph::VT_OUTPUTS, outputs);
            fbb.push_slot_always(SubGraph::VT_OPERATORS, operators);
            fbb.push_slot_always(SubGraph::VT_NAME, name);
            subgraphs.push(fbb.end_table(start));
        }
        let subgraphs = fbb.create_vector(&subgraphs);

        let description = fbb.create_string("tflinspect test model");
        let start = fbb.start_table();
        fbb.push_slot::<u32>(Model::VT_VERSION, 3, 0);
        fbb.push_slot_always(Model::VT_OPERATOR_CODES, opcodes);
        fbb.push_slot_always(Model::VT_SUBGRAPHS, subgraphs);
        fbb.push_slot_always(Model::VT_DESCRIPTION, description);
        fbb.push_slot_always(Model::VT_BUFFERS, buffers);
        let model = fbb.end_table(start);
        fbb.finish(model, Some("TFL3"));
        fbb.finished_data().to_vec()
    }

    pub fn proto(&self) -> TfliteProtoModel {
        TfliteProtoModel::new(self.build()).unwrap()
    }
}

pub fn report(def: &ModelDef) -> anyhow::Result<String> {
    let mut out = vec![];
    Tflite::default().report(&def.proto(), Some(&Default::default()), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

/// Input [1,8,8,1], 3x3 kernel with bias, output [1,6,6,1].
pub fn conv_subgraph(name: &str, conv_opcode_index: u32) -> SubGraphDef {
    SubGraphDef {
        name: name.into(),
        tensors: vec![
            tensor(&[1, 8, 8, 1], 0, "input"),
            tensor(&[1, 3, 3, 1], 1, "kernel"),
            tensor(&[1], 2, "bias"),
            tensor(&[1, 6, 6, 1], 0, "output"),
        ],
        inputs: vec![0],
        outputs: vec![3],
        operators: vec![operator(conv_opcode_index, &[0, 1, 2], &[3], OptionsDef::Conv2D { fused: 0 })],
    }
}

pub fn conv_buffers() -> Vec<Vec<u8>> {
    vec![vec![0; 36], vec![0; 4]]
}

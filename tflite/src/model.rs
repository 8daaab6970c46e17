use std::path::Path;

use crate::internal::*;
use crate::schema::{self, Buffer, BuiltinOperator, Model, OperatorCode, SubGraph, Tensor};

/// A TFLite model file held in memory, checked by the flatbuffers verifier
/// at construction.
#[derive(Clone, Debug)]
pub struct TfliteProtoModel(Vec<u8>);

impl TfliteProtoModel {
    pub fn new(buf: Vec<u8>) -> InspectResult<TfliteProtoModel> {
        let _ = schema::root_as_model(&buf).context("Malformed TFLite model")?;
        if !schema::model_buffer_has_identifier(&buf) {
            warn!("Model file does not carry the {} identifier", schema::MODEL_IDENTIFIER);
        }
        Ok(TfliteProtoModel(buf))
    }

    pub fn for_path(path: impl AsRef<Path>) -> InspectResult<TfliteProtoModel> {
        let buf = fs_err::read(path.as_ref())?;
        TfliteProtoModel::new(buf)
    }

    pub fn for_read(reader: &mut dyn std::io::Read) -> InspectResult<TfliteProtoModel> {
        let mut buf = vec![];
        reader.read_to_end(&mut buf)?;
        TfliteProtoModel::new(buf)
    }

    pub fn root(&self) -> Model {
        unsafe { schema::root_as_model_unchecked(&self.0) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Opcode as declared in the model's operator code table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpcodeEntry<'a> {
    pub builtin: BuiltinOperator,
    pub custom_name: Option<&'a str>,
}

impl<'a> OperatorCode<'a> {
    /// Newer files store opcodes above 127 in `builtin_code` and clamp the
    /// deprecated byte to 127; older files only fill the byte.
    pub fn effective_builtin_code(&self) -> BuiltinOperator {
        BuiltinOperator(self.builtin_code().0.max(self.deprecated_builtin_code() as i32))
    }
}

impl<'a> Model<'a> {
    pub fn subgraphs_len(&self) -> usize {
        self.subgraphs().map(|s| s.len()).unwrap_or(0)
    }

    pub fn subgraph(&self, ix: usize) -> InspectResult<SubGraph<'a>> {
        let subgraphs = self.subgraphs().context("No subgraphs in TFLite model")?;
        ensure!(ix < subgraphs.len(), "Subgraph #{} out of range ({} subgraphs)", ix, subgraphs.len());
        Ok(subgraphs.get(ix))
    }

    pub fn buffer(&self, ix: u32) -> InspectResult<Buffer<'a>> {
        let buffers = self.buffers().context("No buffers in TFLite model")?;
        ensure!(
            (ix as usize) < buffers.len(),
            "Buffer #{} out of range ({} buffers)",
            ix,
            buffers.len()
        );
        Ok(buffers.get(ix as usize))
    }

    pub fn operator_code(&self, ix: u32) -> InspectResult<OpcodeEntry<'a>> {
        let codes = self.operator_codes().context("No operator codes in TFLite model")?;
        ensure!(
            (ix as usize) < codes.len(),
            "Operator code #{} out of range ({} operator codes)",
            ix,
            codes.len()
        );
        let code = codes.get(ix as usize);
        Ok(OpcodeEntry { builtin: code.effective_builtin_code(), custom_name: code.custom_code() })
    }
}

impl<'a> SubGraph<'a> {
    pub fn tensors_len(&self) -> usize {
        self.tensors().map(|t| t.len()).unwrap_or(0)
    }

    pub fn operators_len(&self) -> usize {
        self.operators().map(|o| o.len()).unwrap_or(0)
    }

    pub fn tensor(&self, ix: usize) -> InspectResult<Tensor<'a>> {
        let tensors = self.tensors().context("No tensors in subgraph")?;
        ensure!(ix < tensors.len(), "Tensor #{} out of range ({} tensors)", ix, tensors.len());
        Ok(tensors.get(ix))
    }

    pub fn operator(&self, ix: usize) -> InspectResult<schema::Operator<'a>> {
        let operators = self.operators().context("No operators in subgraph")?;
        ensure!(ix < operators.len(), "Operator #{} out of range ({} operators)", ix, operators.len());
        Ok(operators.get(ix))
    }

    pub fn input_indices(&self) -> Vec<i32> {
        self.inputs().map(|v| v.iter().collect()).unwrap_or_default()
    }

    pub fn output_indices(&self) -> Vec<i32> {
        self.outputs().map(|v| v.iter().collect()).unwrap_or_default()
    }
}

impl<'a> schema::Operator<'a> {
    pub fn input_indices(&self) -> Vec<i32> {
        self.inputs().map(|v| v.iter().collect()).unwrap_or_default()
    }

    pub fn output_indices(&self) -> Vec<i32> {
        self.outputs().map(|v| v.iter().collect()).unwrap_or_default()
    }
}

impl<'a> Buffer<'a> {
    /// Empty buffers back tensors computed at runtime.
    pub fn is_filled(&self) -> bool {
        self.data().map(|d| d.len() > 0).unwrap_or(false) || self.size() > 0
    }
}

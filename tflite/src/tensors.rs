use std::fmt;

use itertools::Itertools;

use crate::internal::*;
use crate::schema::{Model, SubGraph, TensorType};

/// What the report knows about one operator input or output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TensorDescriptor {
    /// Optional input left out by the operator (negative index, usually -1).
    Absent(i32),
    Present(TensorInfo),
}

#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct TensorInfo {
    pub index: usize,
    pub buffer: u32,
    pub buffer_filled: bool,
    pub datum_type: TensorType,
    pub shape: Vec<i32>,
    pub name: Option<String>,
}

impl TensorDescriptor {
    pub fn resolve(model: &Model, subgraph: &SubGraph, index: i32) -> InspectResult<TensorDescriptor> {
        if index < 0 {
            return Ok(TensorDescriptor::Absent(index));
        }
        let tensor = subgraph.tensor(index as usize)?;
        let datum_type = tensor.type_();
        ensure!(datum_type.variant_name().is_some(), "Unknown tensor type {} for tensor #{}", datum_type.0, index);
        let buffer = model
            .buffer(tensor.buffer())
            .with_context(|| format!("Resolving buffer of tensor #{index}"))?;
        Ok(TensorDescriptor::Present(TensorInfo {
            index: index as usize,
            buffer: tensor.buffer(),
            buffer_filled: buffer.is_filled(),
            datum_type,
            shape: tensor.shape().map(|s| s.iter().collect()).unwrap_or_default(),
            name: tensor.name().map(|n| n.to_string()),
        }))
    }

    pub fn resolve_all(
        model: &Model,
        subgraph: &SubGraph,
        indices: &[i32],
    ) -> InspectResult<Vec<TensorDescriptor>> {
        indices.iter().map(|&ix| TensorDescriptor::resolve(model, subgraph, ix)).collect()
    }

    pub fn index(&self) -> i32 {
        match self {
            TensorDescriptor::Absent(ix) => *ix,
            TensorDescriptor::Present(info) => info.index as i32,
        }
    }

    pub fn info(&self) -> Option<&TensorInfo> {
        match self {
            TensorDescriptor::Absent(_) => None,
            TensorDescriptor::Present(info) => Some(info),
        }
    }

    pub fn shape(&self) -> Option<&[i32]> {
        self.info().map(|info| &*info.shape)
    }
}

impl TensorInfo {
    pub fn type_name(&self) -> &'static str {
        self.datum_type.variant_name().unwrap_or("?")
    }

    pub fn shape_string(&self) -> String {
        if self.shape.is_empty() {
            "Scalar".to_string()
        } else {
            format!("[{}]", self.shape.iter().join(", "))
        }
    }

    /// Element count, or None when a dimension is unknown (negative) or the
    /// count does not fit in a u64.
    pub fn elements(&self) -> Option<u64> {
        elements(&self.shape)
    }
}

pub fn elements(shape: &[i32]) -> Option<u64> {
    shape.iter().try_fold(1u64, |acc, &d| if d < 0 { None } else { acc.checked_mul(d as u64) })
}

impl fmt::Display for TensorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TensorDescriptor::Absent(ix) => write!(f, "Tensor {ix:4}"),
            TensorDescriptor::Present(info) => write!(
                f,
                "Tensor {:4} : buffer {:4} | {} | {:7} | Shape {} ({})",
                info.index,
                info.buffer,
                if info.buffer_filled { "Filled" } else { " Empty" },
                info.type_name(),
                info.shape_string(),
                info.name.as_deref().unwrap_or(""),
            ),
        }
    }
}

pub fn index_list(tensors: &[TensorDescriptor]) -> String {
    format!("[{}]", tensors.iter().map(|t| t.index()).join(", "))
}

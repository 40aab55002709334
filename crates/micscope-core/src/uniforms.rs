//! Uniform block layout for the line program and named-parameter access.
//!
//! WGSL has no per-uniform locations the way GLSL does; every parameter
//! lives in one uniform buffer. The lookup table maps each parameter name to
//! its byte offset and component count inside that buffer so a draw call can
//! set parameters by name and upload the resulting block in one write.

use crate::error::{Result, ScopeError};
use crate::series::{SeriesKind, ValueRange};
use fnv::FnvHashMap;
use glam::Vec3;
use std::mem::{offset_of, size_of};

/// CPU image of `LineUniforms` in `line.wgsl`. WGSL pads the struct to a
/// 16-byte multiple, hence the trailing padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineUniforms {
    pub color: [f32; 3],
    pub length: f32,
    pub min_value: f32,
    pub max_value: f32,
    pub _pad: [f32; 2],
}

pub const LINE_UNIFORMS_SIZE: usize = size_of::<LineUniforms>();

pub const U_LENGTH: &str = "length";
pub const U_MIN_VALUE: &str = "minValue";
pub const U_MAX_VALUE: &str = "maxValue";
pub const U_COLOR: &str = "color";

// (name, byte offset, f32 components)
const LINE_UNIFORM_FIELDS: [(&str, usize, usize); 4] = [
    (U_COLOR, offset_of!(LineUniforms, color), 3),
    (U_LENGTH, offset_of!(LineUniforms, length), 1),
    (U_MIN_VALUE, offset_of!(LineUniforms, min_value), 1),
    (U_MAX_VALUE, offset_of!(LineUniforms, max_value), 1),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformLocation {
    pub offset: usize,
    pub components: usize,
}

impl UniformLocation {
    pub fn byte_len(&self) -> usize {
        self.components * size_of::<f32>()
    }
}

/// Parameter name → location table, built once when the program is linked.
#[derive(Clone, Debug)]
pub struct UniformLocations {
    map: FnvHashMap<&'static str, UniformLocation>,
    block_size: usize,
}

impl UniformLocations {
    pub fn for_line_program() -> Self {
        let map = LINE_UNIFORM_FIELDS
            .iter()
            .map(|&(name, offset, components)| (name, UniformLocation { offset, components }))
            .collect();
        Self {
            map,
            block_size: LINE_UNIFORMS_SIZE,
        }
    }

    pub fn get(&self, name: &str) -> Result<UniformLocation> {
        self.map
            .get(name)
            .copied()
            .ok_or_else(|| ScopeError::UnknownUniform(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Start an all-zero block for one draw call.
    pub fn block(&self) -> UniformBlock<'_> {
        UniformBlock {
            locations: self,
            bytes: vec![0; self.block_size],
        }
    }
}

/// Byte image of one uniform buffer, filled in by parameter name.
pub struct UniformBlock<'a> {
    locations: &'a UniformLocations,
    bytes: Vec<u8>,
}

impl<'a> UniformBlock<'a> {
    pub fn set(&mut self, name: &str, values: &[f32]) -> Result<()> {
        let loc = self.locations.get(name)?;
        if loc.components != values.len() {
            return Err(ScopeError::UniformTypeMismatch {
                name: name.to_string(),
                expected: loc.components,
                actual: values.len(),
            });
        }
        self.bytes[loc.offset..loc.offset + loc.byte_len()]
            .copy_from_slice(bytemuck::cast_slice(values));
        Ok(())
    }

    #[inline]
    pub fn set_f32(&mut self, name: &str, value: f32) -> Result<()> {
        self.set(name, &[value])
    }

    #[inline]
    pub fn set_vec3(&mut self, name: &str, value: Vec3) -> Result<()> {
        self.set(name, &value.to_array())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Parameters for one draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderUniforms {
    pub length: f32,
    pub min_value: f32,
    pub max_value: f32,
    pub color: Vec3,
}

impl RenderUniforms {
    pub fn for_series(kind: SeriesKind, len: usize, range: ValueRange) -> Self {
        Self {
            length: len as f32,
            min_value: range.min(),
            max_value: range.max(),
            color: kind.color(),
        }
    }

    /// Write every parameter into a fresh block.
    pub fn encode<'a>(&self, locations: &'a UniformLocations) -> Result<UniformBlock<'a>> {
        let mut block = locations.block();
        block.set_f32(U_LENGTH, self.length)?;
        block.set_f32(U_MIN_VALUE, self.min_value)?;
        block.set_f32(U_MAX_VALUE, self.max_value)?;
        block.set_vec3(U_COLOR, self.color)?;
        Ok(block)
    }
}

//! Typed vertex attribute storage.
//!
//! This module provides:
//! - [`ComponentDatatype`] - Closed set of per-component storage formats
//! - [`AttributeValues`] - Homogeneous component storage tagged with its datatype
//! - [`AttributeBuffer`] - One vertex attribute channel of a mesh
//!
//! An [`AttributeBuffer`] is a flat, vertex-major sequence of scalar
//! components. The concrete element kind travels with the data, so copies
//! made through [`Clone`] always land in storage of the same datatype as
//! the source rather than being widened through a generic numeric type.

/// Per-component storage format of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentDatatype {
    /// 8-bit signed integer.
    Byte,
    /// 8-bit unsigned integer.
    UnsignedByte,
    /// 16-bit signed integer.
    Short,
    /// 16-bit unsigned integer.
    UnsignedShort,
    /// 32-bit signed integer.
    Int,
    /// 32-bit unsigned integer.
    UnsignedInt,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
}

impl ComponentDatatype {
    /// Get the size in bytes of one component.
    pub fn size_in_bytes(&self) -> usize {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short | Self::UnsignedShort => 2,
            Self::Int | Self::UnsignedInt | Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }

    /// Whether this datatype is an integer kind (eligible for normalization).
    pub fn is_integer(&self) -> bool {
        !matches!(self, Self::Float32 | Self::Float64)
    }
}

/// Homogeneous component storage for one attribute channel.
///
/// Each variant owns a vector of one concrete element kind. Cloning a value
/// deep-copies the vector and keeps the kind, which is what makes
/// [`AttributeBuffer::clone`] type-preserving.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValues {
    Byte(Vec<i8>),
    UnsignedByte(Vec<u8>),
    Short(Vec<i16>),
    UnsignedShort(Vec<u16>),
    Int(Vec<i32>),
    UnsignedInt(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl AttributeValues {
    /// Get the datatype tag of this storage.
    pub fn datatype(&self) -> ComponentDatatype {
        match self {
            Self::Byte(_) => ComponentDatatype::Byte,
            Self::UnsignedByte(_) => ComponentDatatype::UnsignedByte,
            Self::Short(_) => ComponentDatatype::Short,
            Self::UnsignedShort(_) => ComponentDatatype::UnsignedShort,
            Self::Int(_) => ComponentDatatype::Int,
            Self::UnsignedInt(_) => ComponentDatatype::UnsignedInt,
            Self::Float32(_) => ComponentDatatype::Float32,
            Self::Float64(_) => ComponentDatatype::Float64,
        }
    }

    /// Number of scalar components stored.
    pub fn len(&self) -> usize {
        match self {
            Self::Byte(v) => v.len(),
            Self::UnsignedByte(v) => v.len(),
            Self::Short(v) => v.len(),
            Self::UnsignedShort(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::UnsignedInt(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Float64(v) => v.len(),
        }
    }

    /// Check whether no components are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the components as raw bytes in native layout.
    ///
    /// This is the view a GPU upload consumes; the datatype and
    /// normalization tags tell the pipeline how to interpret it.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Byte(v) => bytemuck::cast_slice(v),
            Self::UnsignedByte(v) => v,
            Self::Short(v) => bytemuck::cast_slice(v),
            Self::UnsignedShort(v) => bytemuck::cast_slice(v),
            Self::Int(v) => bytemuck::cast_slice(v),
            Self::UnsignedInt(v) => bytemuck::cast_slice(v),
            Self::Float32(v) => bytemuck::cast_slice(v),
            Self::Float64(v) => bytemuck::cast_slice(v),
        }
    }

    /// Borrow the components as `f32`, if that is the concrete kind.
    pub fn as_f32(&self) -> Option<&[f32]> {
        match self {
            Self::Float32(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the components as `u8`, if that is the concrete kind.
    pub fn as_u8(&self) -> Option<&[u8]> {
        match self {
            Self::UnsignedByte(v) => Some(v),
            _ => None,
        }
    }
}

/// One vertex attribute channel: typed component storage plus layout tags.
///
/// The buffer does not copy or validate `values` on construction; producing
/// a `values` length that is an exact multiple of `components_per_vertex`
/// is the caller's contract. Buffers built by the polyline tessellator
/// always satisfy it.
///
/// [`Clone`] produces a fully independent copy in storage of the same
/// concrete datatype; `clone_from` does the same while reusing the
/// target's allocation where possible.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBuffer {
    components_per_vertex: u32,
    normalize: bool,
    values: AttributeValues,
}

impl AttributeBuffer {
    /// Create an attribute buffer, storing `values` as given.
    ///
    /// `components_per_vertex` must be in `1..=4`.
    pub fn new(components_per_vertex: u32, normalize: bool, values: AttributeValues) -> Self {
        debug_assert!((1..=4).contains(&components_per_vertex));
        Self {
            components_per_vertex,
            normalize,
            values,
        }
    }

    /// Create a non-normalized 32-bit float buffer.
    pub fn float32(components_per_vertex: u32, values: Vec<f32>) -> Self {
        Self::new(components_per_vertex, false, AttributeValues::Float32(values))
    }

    /// Create a normalized unsigned-byte buffer (unorm fixed point).
    pub fn unorm8(components_per_vertex: u32, values: Vec<u8>) -> Self {
        Self::new(
            components_per_vertex,
            true,
            AttributeValues::UnsignedByte(values),
        )
    }

    /// Get the per-component storage format.
    pub fn datatype(&self) -> ComponentDatatype {
        self.values.datatype()
    }

    /// Get the number of scalar components per vertex (1 to 4).
    pub fn components_per_vertex(&self) -> u32 {
        self.components_per_vertex
    }

    /// Whether integer components are interpreted as normalized fixed point
    /// when consumed for rendering.
    pub fn normalize(&self) -> bool {
        self.normalize
    }

    /// Borrow the component storage.
    pub fn values(&self) -> &AttributeValues {
        &self.values
    }

    /// Mutably borrow the component storage.
    pub fn values_mut(&mut self) -> &mut AttributeValues {
        &mut self.values
    }

    /// Total number of scalar components stored.
    pub fn component_count(&self) -> usize {
        self.values.len()
    }

    /// Number of logical vertices (component count / components per vertex).
    pub fn vertex_count(&self) -> usize {
        self.values.len() / self.components_per_vertex as usize
    }

    /// Size of the stored components in bytes.
    pub fn byte_size(&self) -> usize {
        self.values.len() * self.datatype().size_in_bytes()
    }
}

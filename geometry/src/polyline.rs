//! Screen-space polyline tessellation.
//!
//! This module provides:
//! - [`PolylineDescriptor`] - Validated tessellation input
//! - [`PolylineChannels`] - Which optional attribute channels to produce
//! - [`PolylineMesh`] - The resulting indexed triangle mesh
//! - [`IndexData`] / [`IndexFormat`] - Index storage sized to the vertex count
//!
//! # Technique
//!
//! A polyline of `N` positions is expanded into one quad per segment:
//! `4N - 4` vertices and `6(N - 1)` indices. Every vertex carries the
//! position immediately before and after its anchor along the polyline
//! (clamped at the endpoints) plus a signed expansion side, so the vertex
//! shader can compute a screen-space perpendicular offset at draw time and
//! hold a constant pixel width under any projection. Raw positions alone
//! cannot do this, which is why three position copies travel per vertex.
//!
//! Tessellation is synchronous and stateless between calls. Each call reads
//! its own descriptor and writes a freshly allocated mesh, so concurrent
//! calls from independent threads are safe.

use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::attribute::AttributeBuffer;
use crate::error::{GeometryError, GeometryResult};
use crate::math::Vec3;

/// Fixed attribute-name keys of a [`PolylineMesh`].
///
/// The downstream shader stage looks attributes up by these exact strings;
/// renaming any of them breaks the contract.
pub mod attribute_names {
    /// Anchor position of the vertex (float3).
    pub const POSITION: &str = "position";
    /// Position preceding the anchor along the polyline (float3).
    pub const PREV_POSITION: &str = "prevPosition";
    /// Position following the anchor along the polyline (float3).
    pub const NEXT_POSITION: &str = "nextPosition";
    /// Signed expansion side and line width in pixels (float2).
    pub const EXPAND_AND_WIDTH: &str = "expandAndWidth";
    /// Normalized distance along the polyline and expansion side (float2).
    pub const ST: &str = "st";
    /// Vertex color (unorm8x4), present only when colors were supplied.
    pub const COLOR: &str = "color";
}

bitflags! {
    /// Optional attribute channels a tessellation request may ask for.
    ///
    /// The `position` channel is always produced and has no flag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PolylineChannels: u32 {
        /// Produce `prevPosition` and `nextPosition`.
        const ADJACENCY = 1 << 0;
        /// Produce `expandAndWidth`.
        const EXPAND_AND_WIDTH = 1 << 1;
        /// Produce `st`.
        const ST = 1 << 2;
        /// Produce `color` (requires colors in the descriptor).
        const COLOR = 1 << 3;
    }
}

impl Default for PolylineChannels {
    fn default() -> Self {
        Self::all()
    }
}

/// Index format for indexed drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexFormat {
    /// 16-bit unsigned integers (max 65535 vertices).
    Uint16,
    /// 32-bit unsigned integers.
    Uint32,
}

impl IndexFormat {
    /// Get the size in bytes of each index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }
}

/// Triangle index storage, sized to the mesh's vertex count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexData {
    Uint16(Vec<u16>),
    Uint32(Vec<u32>),
}

impl IndexData {
    /// Get the storage format.
    pub fn format(&self) -> IndexFormat {
        match self {
            Self::Uint16(_) => IndexFormat::Uint16,
            Self::Uint32(_) => IndexFormat::Uint32,
        }
    }

    /// Number of indices stored (3 per triangle).
    pub fn len(&self) -> usize {
        match self {
            Self::Uint16(v) => v.len(),
            Self::Uint32(v) => v.len(),
        }
    }

    /// Check whether no indices are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the indices widened to `u32`.
    pub fn iter_u32(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        match self {
            Self::Uint16(v) => Box::new(v.iter().map(|&i| u32::from(i))),
            Self::Uint32(v) => Box::new(v.iter().copied()),
        }
    }

    /// Size of the stored indices in bytes.
    pub fn byte_size(&self) -> usize {
        self.len() * self.format().size()
    }
}

/// An indexed triangle mesh produced by polyline tessellation.
///
/// Attributes are keyed by the fixed names in [`attribute_names`]. Every
/// buffer present has the same vertex count, and every index is below that
/// count.
#[derive(Debug, Clone)]
pub struct PolylineMesh {
    attributes: BTreeMap<&'static str, AttributeBuffer>,
    indices: IndexData,
    vertex_count: usize,
}

impl PolylineMesh {
    /// Look up an attribute buffer by its fixed name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeBuffer> {
        self.attributes.get(name)
    }

    /// Iterate the attribute names present in this mesh.
    pub fn attribute_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes.keys().copied()
    }

    /// Iterate `(name, buffer)` pairs.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &AttributeBuffer)> + '_ {
        self.attributes.iter().map(|(name, buffer)| (*name, buffer))
    }

    /// Get the triangle indices.
    pub fn indices(&self) -> &IndexData {
        &self.indices
    }

    /// Number of vertices shared by every attribute buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Total byte size of all attribute buffers plus indices.
    ///
    /// Useful for planning GPU upload sizes before creating buffers.
    pub fn total_byte_size(&self) -> usize {
        let attribute_bytes: usize = self.attributes.values().map(|b| b.byte_size()).sum();
        attribute_bytes + self.indices.byte_size()
    }
}

/// Tessellation input for a screen-space wide line.
///
/// The descriptor is a transient, caller-owned value; tessellation reads it
/// and produces an independent [`PolylineMesh`] with its own storage.
///
/// # Example
///
/// ```
/// use streamline_geometry::math::Vec3;
/// use streamline_geometry::PolylineDescriptor;
///
/// let mesh = PolylineDescriptor::new(vec![
///     Vec3::new(0.0, 0.0, 0.0),
///     Vec3::new(1.0, 1.0, 0.0),
/// ])
/// .with_width(4.0)
/// .create_geometry()
/// .unwrap();
/// assert_eq!(mesh.vertex_count(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PolylineDescriptor {
    /// Ordered polyline positions; at least 2 are required.
    pub positions: Vec<Vec3>,
    /// Line width in pixels; must be finite and > 0.
    pub width: f32,
    /// Optional RGBA colors, one per position or one per segment.
    pub colors: Option<Vec<[f32; 4]>>,
    /// Whether `colors` is interpreted per vertex (interpolated along each
    /// segment) rather than per segment (constant across each segment).
    pub colors_per_vertex: bool,
    /// Which optional attribute channels to produce.
    pub channels: PolylineChannels,
}

impl PolylineDescriptor {
    /// Create a descriptor with a 1-pixel width and all channels enabled.
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            width: 1.0,
            colors: None,
            colors_per_vertex: false,
            channels: PolylineChannels::default(),
        }
    }

    /// Set the line width in pixels.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Set per-vertex colors (one per position, interpolated along segments).
    pub fn with_vertex_colors(mut self, colors: Vec<[f32; 4]>) -> Self {
        self.colors = Some(colors);
        self.colors_per_vertex = true;
        self
    }

    /// Set per-segment colors (constant across each segment).
    ///
    /// One color per segment is expected; a trailing per-position extra is
    /// tolerated and ignored, since callers often hold one color per point.
    pub fn with_segment_colors(mut self, colors: Vec<[f32; 4]>) -> Self {
        self.colors = Some(colors);
        self.colors_per_vertex = false;
        self
    }

    /// Restrict the produced attribute channels.
    pub fn with_channels(mut self, channels: PolylineChannels) -> Self {
        self.channels = channels;
        self
    }

    /// Validate the descriptor without building anything.
    pub fn validate(&self) -> GeometryResult<()> {
        let n = self.positions.len();
        if n < 2 {
            return Err(GeometryError::MissingInput(format!(
                "at least 2 positions are required, got {n}"
            )));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(GeometryError::InvalidParameter(format!(
                "width must be finite and > 0, got {}",
                self.width
            )));
        }
        if let Some(colors) = &self.colors {
            let len = colors.len();
            let valid = if self.colors_per_vertex {
                len == n
            } else {
                len == n - 1 || len == n
            };
            if !valid {
                return Err(GeometryError::InvalidParameter(format!(
                    "colors has an invalid length: got {len} for {n} positions \
                     ({} expected)",
                    if self.colors_per_vertex {
                        "one per position"
                    } else {
                        "one per segment"
                    }
                )));
            }
        }
        Ok(())
    }

    /// Tessellate this polyline into an indexed triangle mesh.
    ///
    /// Fails fast with [`GeometryError`] on invalid input, before any
    /// allocation. For validated input tessellation cannot fail: coincident
    /// consecutive positions produce a well-defined zero-area quad (no
    /// direction is ever normalized on the CPU, so there is no
    /// divide-by-zero path).
    pub fn create_geometry(&self) -> GeometryResult<PolylineMesh> {
        self.validate()?;

        let n = self.positions.len();
        let segment_count = n - 1;
        let vertex_count = 4 * n - 4;

        let want_adjacency = self.channels.contains(PolylineChannels::ADJACENCY);
        let want_expand = self.channels.contains(PolylineChannels::EXPAND_AND_WIDTH);
        let want_st = self.channels.contains(PolylineChannels::ST);
        let want_color =
            self.channels.contains(PolylineChannels::COLOR) && self.colors.is_some();

        let mut position = Vec::with_capacity(vertex_count * 3);
        let mut prev_position = alloc_if(want_adjacency, vertex_count * 3);
        let mut next_position = alloc_if(want_adjacency, vertex_count * 3);
        let mut expand_and_width = alloc_if(want_expand, vertex_count * 2);
        let mut st = alloc_if(want_st, vertex_count * 2);
        let mut color: Vec<u8> = Vec::with_capacity(if want_color { vertex_count * 4 } else { 0 });
        let color_source = if want_color { self.colors.as_deref() } else { None };

        // Normalized by point index rather than arc length so that
        // coincident points never produce a 0/0.
        let inv_last = 1.0 / (n - 1) as f32;

        for i in 0..segment_count {
            let start = self.positions[i];
            let end = self.positions[i + 1];
            // Adjacency clamps at the polyline endpoints.
            let before_start = self.positions[i.saturating_sub(1)];
            let after_end = self.positions[(i + 2).min(n - 1)];

            // Four vertices per segment: {start, end} x {side -1, side +1}.
            let corners: [(Vec3, Vec3, Vec3, f32, usize); 4] = [
                (start, before_start, end, -1.0, i),
                (start, before_start, end, 1.0, i),
                (end, start, after_end, -1.0, i + 1),
                (end, start, after_end, 1.0, i + 1),
            ];

            for (anchor, prev, next, side, point_index) in corners {
                position.extend_from_slice(anchor.as_slice());
                if want_adjacency {
                    prev_position.extend_from_slice(prev.as_slice());
                    next_position.extend_from_slice(next.as_slice());
                }
                if want_expand {
                    expand_and_width.push(side);
                    expand_and_width.push(self.width);
                }
                if want_st {
                    st.push(point_index as f32 * inv_last);
                    st.push(side);
                }
                if let Some(colors) = color_source {
                    let rgba = if self.colors_per_vertex {
                        colors[point_index]
                    } else {
                        colors[i]
                    };
                    color.extend(rgba.iter().map(|&c| to_unorm8(c)));
                }
            }
        }

        let mut attributes = BTreeMap::new();
        attributes.insert(attribute_names::POSITION, AttributeBuffer::float32(3, position));
        if want_adjacency {
            attributes.insert(
                attribute_names::PREV_POSITION,
                AttributeBuffer::float32(3, prev_position),
            );
            attributes.insert(
                attribute_names::NEXT_POSITION,
                AttributeBuffer::float32(3, next_position),
            );
        }
        if want_expand {
            attributes.insert(
                attribute_names::EXPAND_AND_WIDTH,
                AttributeBuffer::float32(2, expand_and_width),
            );
        }
        if want_st {
            attributes.insert(attribute_names::ST, AttributeBuffer::float32(2, st));
        }
        if want_color {
            attributes.insert(attribute_names::COLOR, AttributeBuffer::unorm8(4, color));
        }

        let indices = build_indices(segment_count, vertex_count);

        log::trace!(
            "tessellated polyline: {} positions -> {} vertices, {} indices",
            n,
            vertex_count,
            indices.len()
        );

        Ok(PolylineMesh {
            attributes,
            indices,
            vertex_count,
        })
    }
}

fn alloc_if(wanted: bool, capacity: usize) -> Vec<f32> {
    if wanted {
        Vec::with_capacity(capacity)
    } else {
        Vec::new()
    }
}

/// Convert a [0, 1] float color component to unorm8 with rounding.
fn to_unorm8(component: f32) -> u8 {
    (component.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Emit two counter-clockwise triangles per segment quad.
///
/// In the segment's local frame (+x along the segment, +y toward side +1)
/// the quad is (b) bottom-left, (b+1) top-left, (b+2) bottom-right,
/// (b+3) top-right; winding is consistent across all segments so backface
/// culling behaves uniformly.
fn build_indices(segment_count: usize, vertex_count: usize) -> IndexData {
    if vertex_count <= usize::from(u16::MAX) {
        let mut indices = Vec::with_capacity(segment_count * 6);
        for i in 0..segment_count {
            let b = (4 * i) as u16;
            indices.extend_from_slice(&[b, b + 2, b + 3, b, b + 3, b + 1]);
        }
        IndexData::Uint16(indices)
    } else {
        let mut indices = Vec::with_capacity(segment_count * 6);
        for i in 0..segment_count {
            let b = (4 * i) as u32;
            indices.extend_from_slice(&[b, b + 2, b + 3, b, b + 3, b + 1]);
        }
        IndexData::Uint32(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::ComponentDatatype;

    fn three_points() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_rejects_too_few_positions() {
        let err = PolylineDescriptor::new(vec![]).create_geometry().unwrap_err();
        assert!(matches!(err, GeometryError::MissingInput(_)));

        let err = PolylineDescriptor::new(vec![Vec3::zeros()])
            .create_geometry()
            .unwrap_err();
        assert!(matches!(err, GeometryError::MissingInput(_)));
    }

    #[test]
    fn test_rejects_bad_width() {
        for width in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = PolylineDescriptor::new(three_points())
                .with_width(width)
                .create_geometry()
                .unwrap_err();
            assert!(matches!(err, GeometryError::InvalidParameter(_)));
        }
    }

    #[test]
    fn test_rejects_color_count_mismatch() {
        // Per-vertex mode requires exactly one color per position.
        let err = PolylineDescriptor::new(three_points())
            .with_vertex_colors(vec![[1.0, 0.0, 0.0, 1.0]; 2])
            .create_geometry()
            .unwrap_err();
        assert!(matches!(err, GeometryError::InvalidParameter(_)));

        // Per-segment mode accepts N-1 or N entries, nothing else.
        let err = PolylineDescriptor::new(three_points())
            .with_segment_colors(vec![[1.0, 0.0, 0.0, 1.0]; 5])
            .create_geometry()
            .unwrap_err();
        assert!(matches!(err, GeometryError::InvalidParameter(_)));
    }

    #[test]
    fn test_three_point_counts() {
        let mesh = PolylineDescriptor::new(three_points())
            .with_width(10.0)
            .create_geometry()
            .unwrap();

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.indices().len(), 12);

        for name in [
            attribute_names::POSITION,
            attribute_names::PREV_POSITION,
            attribute_names::NEXT_POSITION,
        ] {
            let buffer = mesh.attribute(name).unwrap();
            assert_eq!(buffer.component_count(), 24, "{name}");
            assert_eq!(buffer.vertex_count(), 8, "{name}");
            assert_eq!(buffer.datatype(), ComponentDatatype::Float32);
        }
        for name in [attribute_names::EXPAND_AND_WIDTH, attribute_names::ST] {
            let buffer = mesh.attribute(name).unwrap();
            assert_eq!(buffer.component_count(), 16, "{name}");
            assert_eq!(buffer.vertex_count(), 8, "{name}");
        }
        assert!(mesh.attribute(attribute_names::COLOR).is_none());
    }

    #[test]
    fn test_adjacency_clamped_at_endpoints() {
        let mesh = PolylineDescriptor::new(three_points())
            .create_geometry()
            .unwrap();

        let prev = mesh
            .attribute(attribute_names::PREV_POSITION)
            .unwrap()
            .values()
            .as_f32()
            .unwrap();
        let next = mesh
            .attribute(attribute_names::NEXT_POSITION)
            .unwrap()
            .values()
            .as_f32()
            .unwrap();

        // First segment's start vertices repeat the first point as "prev".
        assert_eq!(&prev[0..3], &[0.0, 0.0, 0.0]);
        assert_eq!(&prev[3..6], &[0.0, 0.0, 0.0]);
        // Last segment's end vertices repeat the last point as "next".
        let tail = next.len() - 6;
        assert_eq!(&next[tail..tail + 3], &[2.0, 0.0, 0.0]);
        assert_eq!(&next[tail + 3..], &[2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_expand_and_width_values() {
        let mesh = PolylineDescriptor::new(three_points())
            .with_width(10.0)
            .create_geometry()
            .unwrap();

        let ew = mesh
            .attribute(attribute_names::EXPAND_AND_WIDTH)
            .unwrap()
            .values()
            .as_f32()
            .unwrap();

        for vertex in 0..8 {
            let side = ew[vertex * 2];
            let width = ew[vertex * 2 + 1];
            let expected_side = if vertex % 2 == 0 { -1.0 } else { 1.0 };
            assert_eq!(side, expected_side, "vertex {vertex}");
            assert_eq!(width, 10.0, "vertex {vertex}");
        }
    }

    #[test]
    fn test_st_spans_zero_to_one() {
        let mesh = PolylineDescriptor::new(three_points())
            .create_geometry()
            .unwrap();

        let st = mesh
            .attribute(attribute_names::ST)
            .unwrap()
            .values()
            .as_f32()
            .unwrap();

        // Segment 0: start s = 0, end s = 0.5; segment 1: 0.5 and 1.
        let s: Vec<f32> = (0..8).map(|v| st[v * 2]).collect();
        assert_eq!(s, vec![0.0, 0.0, 0.5, 0.5, 0.5, 0.5, 1.0, 1.0]);
        // t mirrors the expansion side.
        let t: Vec<f32> = (0..8).map(|v| st[v * 2 + 1]).collect();
        assert_eq!(t, vec![-1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_segment_colors() {
        let red = [1.0, 0.0, 0.0, 1.0];
        let green = [0.0, 1.0, 0.0, 1.0];
        let blue = [0.0, 0.0, 1.0, 1.0];

        // One color per position in per-segment mode: trailing entry ignored.
        let mesh = PolylineDescriptor::new(three_points())
            .with_segment_colors(vec![red, green, blue])
            .create_geometry()
            .unwrap();

        let color = mesh.attribute(attribute_names::COLOR).unwrap();
        assert_eq!(color.component_count(), 32);
        assert_eq!(color.datatype(), ComponentDatatype::UnsignedByte);
        assert!(color.normalize());

        let bytes = color.values().as_u8().unwrap();
        // All four vertices of segment 0 are red, of segment 1 green.
        for vertex in 0..4 {
            assert_eq!(&bytes[vertex * 4..vertex * 4 + 4], &[255, 0, 0, 255]);
        }
        for vertex in 4..8 {
            assert_eq!(&bytes[vertex * 4..vertex * 4 + 4], &[0, 255, 0, 255]);
        }
    }

    #[test]
    fn test_per_vertex_colors() {
        let red = [1.0, 0.0, 0.0, 1.0];
        let green = [0.0, 1.0, 0.0, 1.0];
        let blue = [0.0, 0.0, 1.0, 1.0];

        let mesh = PolylineDescriptor::new(three_points())
            .with_vertex_colors(vec![red, green, blue])
            .create_geometry()
            .unwrap();

        let color = mesh.attribute(attribute_names::COLOR).unwrap();
        assert_eq!(color.component_count(), 32);

        let bytes = color.values().as_u8().unwrap();
        // Vertices anchored at a given input position share that position's
        // color: segment 0 carries red->green, segment 1 green->blue.
        let expected: [[u8; 4]; 8] = [
            [255, 0, 0, 255],
            [255, 0, 0, 255],
            [0, 255, 0, 255],
            [0, 255, 0, 255],
            [0, 255, 0, 255],
            [0, 255, 0, 255],
            [0, 0, 255, 255],
            [0, 0, 255, 255],
        ];
        for (vertex, rgba) in expected.iter().enumerate() {
            assert_eq!(&bytes[vertex * 4..vertex * 4 + 4], rgba, "vertex {vertex}");
        }
    }

    #[test]
    fn test_indices_in_bounds_and_local_to_segment() {
        let mesh = PolylineDescriptor::new(three_points())
            .create_geometry()
            .unwrap();

        assert_eq!(mesh.indices().format(), IndexFormat::Uint16);
        let indices: Vec<u32> = mesh.indices().iter_u32().collect();
        assert_eq!(indices.len(), 12);

        for (triangle, tri) in indices.chunks(3).enumerate() {
            let segment = (triangle / 2) as u32;
            for &index in tri {
                assert!((index as usize) < mesh.vertex_count());
                assert!(index >= segment * 4 && index < segment * 4 + 4);
            }
        }
    }

    #[test]
    fn test_winding_is_consistent() {
        // In the local frame used by the quad layout, signed area of each
        // triangle must be positive (counter-clockwise).
        let mesh = PolylineDescriptor::new(three_points())
            .create_geometry()
            .unwrap();

        let indices: Vec<u32> = mesh.indices().iter_u32().collect();
        // Local 2D corner coordinates: even vertex = side -1, odd = side +1;
        // (vertex % 4) < 2 = segment start, else end.
        let local = |v: u32| -> (f32, f32) {
            let x = if v % 4 < 2 { 0.0 } else { 1.0 };
            let y = if v % 2 == 0 { -1.0 } else { 1.0 };
            (x, y)
        };
        for tri in indices.chunks(3) {
            let (ax, ay) = local(tri[0]);
            let (bx, by) = local(tri[1]);
            let (cx, cy) = local(tri[2]);
            let area = (bx - ax) * (cy - ay) - (cx - ax) * (by - ay);
            assert!(area > 0.0, "triangle {tri:?} is not counter-clockwise");
        }
    }

    #[test]
    fn test_duplicate_points_stay_finite() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ];
        let mesh = PolylineDescriptor::new(positions)
            .with_width(3.0)
            .create_geometry()
            .unwrap();

        assert_eq!(mesh.vertex_count(), 8);
        for (name, buffer) in mesh.attributes() {
            if let Some(values) = buffer.values().as_f32() {
                assert!(values.iter().all(|v| v.is_finite()), "{name}");
            }
        }
    }

    #[test]
    fn test_channel_selection() {
        let mesh = PolylineDescriptor::new(three_points())
            .with_channels(PolylineChannels::EXPAND_AND_WIDTH)
            .create_geometry()
            .unwrap();

        assert!(mesh.attribute(attribute_names::POSITION).is_some());
        assert!(mesh.attribute(attribute_names::EXPAND_AND_WIDTH).is_some());
        assert!(mesh.attribute(attribute_names::PREV_POSITION).is_none());
        assert!(mesh.attribute(attribute_names::NEXT_POSITION).is_none());
        assert!(mesh.attribute(attribute_names::ST).is_none());
    }

    #[test]
    fn test_index_format_grows_with_vertex_count() {
        // 16385 positions -> 65536 vertices, one past the u16 range.
        let positions: Vec<Vec3> = (0..16385).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let mesh = PolylineDescriptor::new(positions)
            .with_channels(PolylineChannels::empty())
            .create_geometry()
            .unwrap();

        assert_eq!(mesh.vertex_count(), 65536);
        assert_eq!(mesh.indices().format(), IndexFormat::Uint32);
        assert_eq!(mesh.indices().len(), 6 * 16384);
    }

    #[test]
    fn test_total_byte_size() {
        let mesh = PolylineDescriptor::new(three_points())
            .with_segment_colors(vec![[1.0, 1.0, 1.0, 1.0]; 2])
            .create_geometry()
            .unwrap();

        // 3 x float3 + 2 x float2 buffers, 8 vertices each, plus unorm8x4
        // color and 12 u16 indices.
        let expected = 3 * (8 * 3 * 4) + 2 * (8 * 2 * 4) + 8 * 4 + 12 * 2;
        assert_eq!(mesh.total_byte_size(), expected);
    }
}

//! Index buffers over the `width x height` vertex grid.
//!
//! Grid cell `(x, y)` owns vertex `y * width + x`; row `y + 1` is the row
//! below row `y` in image order ("top" is the smaller `y`). Winding is
//! measured in grid coordinates, `x` to the right and `y` down:
//!
//! - `Triangles`: every quad is split into `(tl, tr, bl)` and `(tr, br, bl)`,
//!   both with positive signed area.
//! - `TriangleStrip`: rows are emitted as `(y, y + 1)` column pairs, giving
//!   negative signed area (the opposite of `Triangles`); consecutive row
//!   strips are stitched with two repeated indices, producing four zero-area
//!   triangles per seam.
//! - `Lines`: every horizontal and vertical grid edge exactly once, no
//!   diagonals.
//! - `Points`: identity.

use crate::error::{HeightfieldError, Result};
use std::fmt;
use std::str::FromStr;

/// Primitive topology used to interpret an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    #[default]
    TriangleStrip,
    Triangles,
    Lines,
    Points,
}

impl Topology {
    pub const ALL: [Topology; 4] = [
        Topology::TriangleStrip,
        Topology::Triangles,
        Topology::Lines,
        Topology::Points,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TriangleStrip => "triangle-strip",
            Self::Triangles => "triangles",
            Self::Lines => "lines",
            Self::Points => "points",
        }
    }

    /// Smallest grid this topology can be built on.
    #[inline]
    pub fn min_dimensions(self) -> (u32, u32) {
        match self {
            Self::Points => (1, 1),
            Self::TriangleStrip | Self::Triangles | Self::Lines => (2, 2),
        }
    }

    /// Exact index count for a grid that satisfies [`Self::min_dimensions`].
    pub fn index_count(self, width: u32, height: u32) -> u64 {
        let w = u64::from(width);
        let h = u64::from(height);
        match self {
            Self::Points => w * h,
            Self::TriangleStrip => 2 * w * (h - 1) + 2 * (h - 2),
            Self::Triangles => 6 * (w - 1) * (h - 1),
            Self::Lines => 2 * (w - 1) * h + 2 * w * (h - 1),
        }
    }

    /// Number of primitives a draw of `index_count` indices produces,
    /// counting the zero-area seam triangles of a strip.
    pub fn primitive_count(self, index_count: usize) -> usize {
        match self {
            Self::TriangleStrip => index_count.saturating_sub(2),
            Self::Triangles => index_count / 3,
            Self::Lines => index_count / 2,
            Self::Points => index_count,
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topology {
    type Err = HeightfieldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "triangle-strip" | "triangle-strips" | "strip" => Ok(Self::TriangleStrip),
            "triangles" | "triangle-list" => Ok(Self::Triangles),
            "lines" | "line-list" => Ok(Self::Lines),
            "points" | "point-list" => Ok(Self::Points),
            _ => Err(HeightfieldError::InvalidTopologySelector(s.to_owned())),
        }
    }
}

/// Storage width of one index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexWidth {
    U16,
    U32,
}

impl IndexWidth {
    /// Largest vertex index representable at this width.
    #[inline]
    pub fn max_index(self) -> u64 {
        match self {
            Self::U16 => u64::from(u16::MAX),
            Self::U32 => u64::from(u32::MAX),
        }
    }

    #[inline]
    pub fn bytes(self) -> usize {
        match self {
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }

    /// Picks the narrowest width that addresses `vertex_count` vertices.
    ///
    /// Grids needing 32-bit indices are rejected unless the device supports
    /// them.
    pub fn select(vertex_count: u64, wide_supported: bool) -> Result<Self> {
        if Self::U16.fits(vertex_count) {
            Ok(Self::U16)
        } else if wide_supported && Self::U32.fits(vertex_count) {
            Ok(Self::U32)
        } else {
            Err(HeightfieldError::IndexRangeOverflow {
                vertex_count,
                width: if wide_supported { Self::U32 } else { Self::U16 },
            })
        }
    }

    /// `true` when every index into `vertex_count` vertices fits.
    #[inline]
    pub fn fits(self, vertex_count: u64) -> bool {
        vertex_count.saturating_sub(1) <= self.max_index()
    }

    pub fn check(self, vertex_count: u64) -> Result<()> {
        if self.fits(vertex_count) {
            Ok(())
        } else {
            Err(HeightfieldError::IndexRangeOverflow {
                vertex_count,
                width: self,
            })
        }
    }
}

impl fmt::Display for IndexWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U16 => f.write_str("16-bit"),
            Self::U32 => f.write_str("32-bit"),
        }
    }
}

/// A finished index sequence in its storage width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexBuffer {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexBuffer {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn width(&self) -> IndexWidth {
        match self {
            Self::U16(_) => IndexWidth::U16,
            Self::U32(_) => IndexWidth::U32,
        }
    }

    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            Self::U16(v) => v.get(i).map(|&x| u32::from(x)),
            Self::U32(v) => v.get(i).copied(),
        }
    }

    /// Indices widened to `u32`, in order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Raw little-endian bytes for GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U16(v) => bytemuck::cast_slice(v),
            Self::U32(v) => bytemuck::cast_slice(v),
        }
    }
}

trait GridIndex: Copy {
    /// Caller guarantees `v` fits.
    fn from_u32(v: u32) -> Self;
}

impl GridIndex for u16 {
    #[inline(always)]
    fn from_u32(v: u32) -> Self {
        v as u16
    }
}

impl GridIndex for u32 {
    #[inline(always)]
    fn from_u32(v: u32) -> Self {
        v
    }
}

/// Builds the index sequence for `topology` over a `width x height` grid.
pub fn build_indices(
    width: u32,
    height: u32,
    topology: Topology,
    index_width: IndexWidth,
) -> Result<IndexBuffer> {
    if width == 0 || height == 0 {
        return Err(HeightfieldError::dims(
            width,
            height,
            "width and height must be positive",
        ));
    }

    let (min_w, min_h) = topology.min_dimensions();
    if width < min_w || height < min_h {
        return Err(HeightfieldError::dims(
            width,
            height,
            "topology needs at least two rows and two columns",
        ));
    }

    index_width.check(u64::from(width) * u64::from(height))?;

    let count = topology.index_count(width, height) as usize;
    let indices = match index_width {
        IndexWidth::U16 => IndexBuffer::U16(fill(width, height, topology, count)),
        IndexWidth::U32 => IndexBuffer::U32(fill(width, height, topology, count)),
    };
    debug_assert_eq!(indices.len(), count);

    log::debug!(
        "built {} {} indices for {} on {}x{}",
        indices.len(),
        index_width,
        topology,
        width,
        height
    );

    Ok(indices)
}

fn fill<I: GridIndex>(w: u32, h: u32, topology: Topology, count: usize) -> Vec<I> {
    let mut out = Vec::with_capacity(count);
    let mut push = |v: u32| out.push(I::from_u32(v));

    match topology {
        Topology::Points => {
            for y in 0..h {
                (0..w).for_each(|x| push(y * w + x));
            }
        }
        Topology::TriangleStrip => strip(w, h, &mut push),
        Topology::Triangles => triangles(w, h, &mut push),
        Topology::Lines => lines(w, h, &mut push),
    }

    out
}

fn strip(w: u32, h: u32, push: &mut impl FnMut(u32)) {
    for y in 0..h - 1 {
        for x in 0..w {
            push(y * w + x);
            push((y + 1) * w + x);
        }

        // Bridge into the next strip: repeat the last vertex, then repeat
        // the next strip's first vertex. Both row lengths are even, so the
        // winding parity carries over unchanged.
        if y < h - 2 {
            push((y + 1) * w + (w - 1));
            push((y + 1) * w);
        }
    }
}

fn triangles(w: u32, h: u32, push: &mut impl FnMut(u32)) {
    for y in 0..h - 1 {
        for x in 0..w - 1 {
            let top_left = y * w + x;
            let top_right = top_left + 1;
            let bot_left = top_left + w;
            let bot_right = bot_left + 1;

            push(top_left);
            push(top_right);
            push(bot_left);

            push(top_right);
            push(bot_right);
            push(bot_left);
        }
    }
}

fn lines(w: u32, h: u32, push: &mut impl FnMut(u32)) {
    for y in 0..h {
        let row = y * w;
        for x in 0..w - 1 {
            push(row + x);
            push(row + x + 1);
        }

        if y + 1 < h {
            for x in 0..w {
                push(row + x);
                push(row + w + x);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32s(buf: &IndexBuffer) -> Vec<u32> {
        buf.iter().collect()
    }

    /// Triangles of a strip, with odd triangles re-ordered to the winding of
    /// the even ones.
    fn strip_triangles(idx: &[u32]) -> Vec<[u32; 3]> {
        idx.windows(3)
            .enumerate()
            .map(|(k, t)| {
                if k % 2 == 0 {
                    [t[0], t[1], t[2]]
                } else {
                    [t[1], t[0], t[2]]
                }
            })
            .collect()
    }

    fn signed_area(w: u32, tri: [u32; 3]) -> i64 {
        let p = |i: u32| (i64::from(i % w), i64::from(i / w));
        let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
        (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
    }

    #[test]
    fn points_are_identity() {
        let idx = build_indices(3, 2, Topology::Points, IndexWidth::U16).unwrap();
        assert_eq!(u32s(&idx), vec![0, 1, 2, 3, 4, 5]);

        let single = build_indices(1, 1, Topology::Points, IndexWidth::U32).unwrap();
        assert_eq!(single, IndexBuffer::U32(vec![0]));
    }

    #[test]
    fn strip_sequence_on_3x3() {
        let idx = build_indices(3, 3, Topology::TriangleStrip, IndexWidth::U16).unwrap();
        assert_eq!(
            u32s(&idx),
            vec![0, 3, 1, 4, 2, 5, 5, 3, 3, 6, 4, 7, 5, 8]
        );
    }

    #[test]
    fn single_row_pair_strip_has_no_bridge() {
        let idx = build_indices(4, 2, Topology::TriangleStrip, IndexWidth::U32).unwrap();
        assert_eq!(u32s(&idx), vec![0, 4, 1, 5, 2, 6, 3, 7]);
    }

    #[test]
    fn strip_renders_every_quad_with_consistent_winding() {
        for (w, h) in [(2, 2), (2, 5), (5, 2), (7, 4), (16, 9)] {
            let idx = u32s(&build_indices(w, h, Topology::TriangleStrip, IndexWidth::U32).unwrap());
            assert_eq!(idx.len() as u64, Topology::TriangleStrip.index_count(w, h));

            let tris = strip_triangles(&idx);
            let real: Vec<_> = tris
                .iter()
                .copied()
                .filter(|t| t[0] != t[1] && t[1] != t[2] && t[0] != t[2])
                .collect();

            assert_eq!(real.len() as u32, 2 * (w - 1) * (h - 1), "{w}x{h}");
            assert_eq!(tris.len() - real.len(), 4 * (h as usize - 2), "{w}x{h}");
            assert!(real.iter().all(|&t| signed_area(w, t) < 0), "{w}x{h}");
        }
    }

    #[test]
    fn triangle_list_on_3x2() {
        let idx = build_indices(3, 2, Topology::Triangles, IndexWidth::U16).unwrap();
        assert_eq!(
            u32s(&idx),
            vec![0, 1, 3, 1, 4, 3, 1, 2, 4, 2, 5, 4]
        );
    }

    #[test]
    fn triangle_list_winding_is_uniform() {
        let idx = u32s(&build_indices(6, 4, Topology::Triangles, IndexWidth::U16).unwrap());
        for tri in idx.chunks_exact(3) {
            assert!(signed_area(6, [tri[0], tri[1], tri[2]]) > 0);
        }
    }

    #[test]
    fn lines_on_3x2() {
        let idx = build_indices(3, 2, Topology::Lines, IndexWidth::U16).unwrap();
        assert_eq!(
            u32s(&idx),
            vec![0, 1, 1, 2, 0, 3, 1, 4, 2, 5, 3, 4, 4, 5]
        );
    }

    #[test]
    fn lines_cover_each_edge_once() {
        let (w, h) = (5u32, 4u32);
        let idx = u32s(&build_indices(w, h, Topology::Lines, IndexWidth::U32).unwrap());
        let mut edges: Vec<(u32, u32)> = idx
            .chunks_exact(2)
            .map(|e| (e[0].min(e[1]), e[0].max(e[1])))
            .collect();

        for &(a, b) in &edges {
            let horizontal = b == a + 1 && a % w != w - 1;
            let vertical = b == a + w;
            assert!(horizontal || vertical, "({a},{b}) is not a grid edge");
        }

        let total = edges.len();
        edges.sort_unstable();
        edges.dedup();
        assert_eq!(edges.len(), total);
        assert_eq!(total as u32, (w - 1) * h + w * (h - 1));
    }

    #[test]
    fn dimension_preconditions() {
        for topology in [Topology::TriangleStrip, Topology::Triangles, Topology::Lines] {
            for (w, h) in [(1, 5), (5, 1), (0, 3), (3, 0)] {
                assert!(matches!(
                    build_indices(w, h, topology, IndexWidth::U32),
                    Err(HeightfieldError::InvalidDimensions { .. })
                ));
            }
        }
        assert!(build_indices(1, 7, Topology::Points, IndexWidth::U16).is_ok());
        assert!(matches!(
            build_indices(0, 7, Topology::Points, IndexWidth::U16),
            Err(HeightfieldError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn narrow_indices_reject_large_grids() {
        // 256 * 256 vertices: largest index is exactly u16::MAX.
        let idx = build_indices(256, 256, Topology::Points, IndexWidth::U16).unwrap();
        assert_eq!(idx.get(idx.len() - 1), Some(65_535));

        assert_eq!(
            build_indices(256, 257, Topology::Triangles, IndexWidth::U16),
            Err(HeightfieldError::IndexRangeOverflow {
                vertex_count: 256 * 257,
                width: IndexWidth::U16,
            })
        );
        assert!(build_indices(256, 257, Topology::Triangles, IndexWidth::U32).is_ok());
    }

    #[test]
    fn width_selection() {
        assert_eq!(IndexWidth::select(65_536, false), Ok(IndexWidth::U16));
        assert_eq!(IndexWidth::select(65_537, true), Ok(IndexWidth::U32));
        assert!(matches!(
            IndexWidth::select(65_537, false),
            Err(HeightfieldError::IndexRangeOverflow { .. })
        ));
        assert!(IndexWidth::select(u64::from(u32::MAX) + 2, true).is_err());
    }

    #[test]
    fn byte_view_matches_width() {
        let narrow = build_indices(4, 3, Topology::Triangles, IndexWidth::U16).unwrap();
        let wide = build_indices(4, 3, Topology::Triangles, IndexWidth::U32).unwrap();
        assert_eq!(narrow.as_bytes().len(), narrow.len() * 2);
        assert_eq!(wide.as_bytes().len(), wide.len() * 4);
        assert_eq!(u32s(&narrow), u32s(&wide));
    }

    #[test]
    fn topology_selectors() {
        assert_eq!("triangle-strips".parse::<Topology>(), Ok(Topology::TriangleStrip));
        assert_eq!(" Lines ".parse::<Topology>(), Ok(Topology::Lines));
        assert_eq!(
            "quads".parse::<Topology>(),
            Err(HeightfieldError::InvalidTopologySelector("quads".into()))
        );
        for t in Topology::ALL {
            assert_eq!(t.to_string().parse::<Topology>(), Ok(t));
        }
    }

    #[test]
    fn primitive_counts() {
        assert_eq!(Topology::TriangleStrip.primitive_count(14), 12);
        assert_eq!(Topology::Triangles.primitive_count(12), 4);
        assert_eq!(Topology::Lines.primitive_count(14), 7);
        assert_eq!(Topology::Points.primitive_count(6), 6);
    }
}

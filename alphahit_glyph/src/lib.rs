// Copyright 2026 the Alphahit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph-quad containment and UV mapping for text alpha hit testing.
//!
//! Rasterized text is a run of textured quads, one per glyph, each mapping
//! into a font atlas. Hitting text precisely means finding the glyph quad
//! under the query point and sampling the atlas at the corresponding
//! texture coordinate — the inter-glyph gaps and the transparent parts of
//! each glyph cell are then up to the alpha threshold, not the line box.
//!
//! Upright glyphs are axis-aligned rectangles. Italic styling shears the
//! quad into a parallelogram, so containment switches to a half-plane test
//! and the normalized coordinates come from a shear-corrected solve.
//!
//! The entry point is [`resolve_glyph_sample`]: first containing quad in
//! render order wins; no containing quad is a miss.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use kurbo::{Point, Rect};

/// Glyph styling relevant to hit geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GlyphStyle {
    /// Axis-aligned quad.
    #[default]
    Upright,
    /// Sheared (parallelogram) quad.
    Italic,
}

/// One rendered glyph: four corners with their texture coordinates.
///
/// Corners are ordered bottom-left, top-left, top-right, bottom-right, in
/// the element's local space; `uvs` matches corner for corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphQuad {
    /// Corner positions in element-local space.
    pub corners: [Point; 4],
    /// Normalized texture coordinates per corner.
    pub uvs: [Point; 4],
    /// Upright or sheared geometry.
    pub style: GlyphStyle,
}

impl GlyphQuad {
    /// Normalized position of `local` within the quad, when contained.
    ///
    /// Upright quads use half-open rectangle containment; italic quads
    /// accept edge-inclusive points of the parallelogram. Degenerate quads
    /// (zero width or height) contain nothing.
    #[must_use]
    pub fn normalized_hit(&self, local: Point) -> Option<Point> {
        match self.style {
            GlyphStyle::Upright => self.normalized_in_rect(local),
            GlyphStyle::Italic => self.normalized_in_parallelogram(local),
        }
    }

    /// Bilinear interpolation of the corner UVs at a normalized position.
    #[must_use]
    pub fn uv_at(&self, normalized: Point) -> Point {
        let [bl, tl, tr, br] = self.uvs;
        let bottom = bl.lerp(br, normalized.x);
        let top = tl.lerp(tr, normalized.x);
        bottom.lerp(top, normalized.y)
    }

    /// Texture sample coordinate for `local`, when the quad contains it.
    #[must_use]
    pub fn sample_at(&self, local: Point, tex_width: u32, tex_height: u32) -> Option<(i32, i32)> {
        let uv = self.uv_at(self.normalized_hit(local)?);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "sample coordinates are truncated toward zero by design"
        )]
        Some((
            (uv.x * f64::from(tex_width)) as i32,
            (uv.y * f64::from(tex_height)) as i32,
        ))
    }

    fn bounds(&self) -> Rect {
        let [bl, tl, _, br] = self.corners;
        Rect::new(
            bl.x,
            bl.y,
            bl.x + (br.x - bl.x).abs(),
            bl.y + (tl.y - bl.y).abs(),
        )
    }

    fn normalized_in_rect(&self, local: Point) -> Option<Point> {
        let rect = self.bounds();
        if !rect.contains(local) {
            return None;
        }
        let width = rect.width();
        let height = rect.height();
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Point::new(
            (local.x - rect.x0) / width,
            (local.y - rect.y0) / height,
        ))
    }

    fn normalized_in_parallelogram(&self, local: Point) -> Option<Point> {
        // Corners wind clockwise; a point left of any edge is outside.
        for i in 0..4 {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % 4];
            let cross = (b.x - a.x) * (local.y - a.y) - (local.x - a.x) * (b.y - a.y);
            if cross > 0.0 {
                return None;
            }
        }
        let [bl, tl, _, br] = self.corners;
        let height = tl.y - bl.y;
        let width = br.x - bl.x;
        if height <= 0.0 || width <= 0.0 {
            return None;
        }
        // Undo the shear: the x extent slides with the y fraction.
        let ny = (local.y - bl.y) / height;
        let nx = (local.x - bl.x - (tl.x - bl.x) * ny) / width;
        Some(Point::new(nx, ny))
    }
}

/// Finds the first quad containing `local` and returns its texture sample.
///
/// Quads are visited in render order; no containing quad means the point
/// hit only inter-glyph space and is a miss.
#[must_use]
pub fn resolve_glyph_sample(
    quads: &[GlyphQuad],
    local: Point,
    tex_width: u32,
    tex_height: u32,
) -> Option<(i32, i32)> {
    quads
        .iter()
        .find_map(|quad| quad.sample_at(local, tex_width, tex_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Upright quad covering [0,10]x[0,20], UVs over [0.25,0.5]x[0.5,1.0].
    fn upright() -> GlyphQuad {
        GlyphQuad {
            corners: [
                Point::new(0.0, 0.0),
                Point::new(0.0, 20.0),
                Point::new(10.0, 20.0),
                Point::new(10.0, 0.0),
            ],
            uvs: [
                Point::new(0.25, 0.5),
                Point::new(0.25, 1.0),
                Point::new(0.5, 1.0),
                Point::new(0.5, 0.5),
            ],
            style: GlyphStyle::Upright,
        }
    }

    /// The same quad sheared 5 to the right at the top.
    fn italic() -> GlyphQuad {
        GlyphQuad {
            corners: [
                Point::new(0.0, 0.0),
                Point::new(5.0, 20.0),
                Point::new(15.0, 20.0),
                Point::new(10.0, 0.0),
            ],
            style: GlyphStyle::Italic,
            ..upright()
        }
    }

    #[test]
    fn upright_center_maps_to_uv_center() {
        let quad = upright();
        let normalized = quad.normalized_hit(Point::new(5.0, 10.0)).expect("inside");
        assert!((normalized.x - 0.5).abs() < 1e-9 && (normalized.y - 0.5).abs() < 1e-9);
        let uv = quad.uv_at(normalized);
        assert!((uv.x - 0.375).abs() < 1e-9 && (uv.y - 0.75).abs() < 1e-9);
    }

    #[test]
    fn upright_outside_misses() {
        let quad = upright();
        assert!(quad.normalized_hit(Point::new(-0.1, 5.0)).is_none());
        assert!(quad.normalized_hit(Point::new(5.0, 25.0)).is_none());
    }

    #[test]
    fn italic_accepts_the_sheared_lean() {
        let quad = italic();
        // Right of the upright bounds but inside the lean.
        let inside = Point::new(12.0, 18.0);
        assert!(quad.normalized_hit(inside).is_some());
        // Inside the upright bounds but left of the sheared left edge.
        let outside = Point::new(0.5, 18.0);
        assert!(quad.normalized_hit(outside).is_none());
    }

    #[test]
    fn italic_normalization_undoes_the_shear() {
        let quad = italic();
        // Halfway up, the shear shifts x by 2.5; the sheared center is at
        // x = 5 + 2.5.
        let normalized = quad.normalized_hit(Point::new(7.5, 10.0)).expect("inside");
        assert!((normalized.x - 0.5).abs() < 1e-9 && (normalized.y - 0.5).abs() < 1e-9);
    }

    #[test]
    fn degenerate_quad_contains_nothing() {
        let mut quad = upright();
        quad.corners[1].y = 0.0;
        assert!(quad.normalized_hit(Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn first_containing_quad_wins() {
        let mut second = upright();
        // Same geometry, different UV window.
        second.uvs = [
            Point::new(0.5, 0.0),
            Point::new(0.5, 0.5),
            Point::new(0.75, 0.5),
            Point::new(0.75, 0.0),
        ];
        let sample = resolve_glyph_sample(&[upright(), second], Point::new(5.0, 10.0), 100, 100)
            .expect("inside both");
        // The first quad's UVs decide: (0.375, 0.75) scaled by 100.
        assert_eq!(sample, (37, 75));
    }

    #[test]
    fn no_containing_quad_is_a_miss() {
        assert!(resolve_glyph_sample(&[upright()], Point::new(50.0, 50.0), 64, 64).is_none());
    }
}

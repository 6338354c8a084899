// Copyright 2026 the Alphahit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprite region geometry for alpha hit testing.
//!
//! Given a point in an element's local space, the resolvers here answer:
//! *which source-texture pixel does that point show?* — or, for rendering
//! modes that hide part of the rectangle, *is the point visible at all?*
//! Each rendering mode gets its own resolver:
//!
//! - [`resolve_simple`]: the whole texture stretched over the rectangle.
//!   There is no rejection path; points outside the rectangle simply sample
//!   outside the texture, and out-of-bounds sampling is the texture
//!   collaborator's contract.
//! - [`resolve_sliced`]: 9-slice. Corners sample their source zones at
//!   native scale, edges stretch along one axis, the center stretches both.
//!   A `fill_center = false` center is a miss.
//! - [`resolve_tiled`]: borders as in sliced; the middle wraps over the
//!   native tile extent.
//! - [`resolve_filled`]: bar and radial fills hide part of the rectangle;
//!   visible points sample exactly as [`resolve_simple`]. See [`FillConfig`].
//!
//! [`Polygon`] provides the even-odd containment test used for sprite
//! physics shapes ([`SpriteRegion::hits_physics_shape`]).
//!
//! All resolvers take the element's geometric state (size, pivot) as plain
//! parameters; nothing here reaches back into a scene graph.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use kurbo::{Point, Size};

mod fill;
mod nine_slice;
mod sprite;

pub use fill::{
    FillConfig, FillMethod, HorizontalOrigin, Origin90, Origin180, Origin360, VerticalOrigin,
    normalize_turns, resolve_filled,
};
pub use nine_slice::{resolve_sliced, resolve_tiled};
pub use sprite::{Border, Polygon, SpriteRegion, shape_local_point};

/// Outcome of mapping a local point through a region resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolved {
    /// Texture-space pixel to sample. May lie outside the texture; the
    /// sampling collaborator owns out-of-bounds behavior.
    Sample {
        /// Pixel column.
        x: i32,
        /// Pixel row (row 0 at the bottom).
        y: i32,
    },
    /// The point falls outside the mode's visible region.
    Outside,
}

/// How an element presents its texture; selects the resolver.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderMode {
    /// The whole texture stretched over the rectangle.
    Simple,
    /// 9-slice with native-scale corners.
    Sliced {
        /// Whether the center region is visible (and therefore hittable).
        fill_center: bool,
    },
    /// Native-size middle tile repeated; borders at native scale.
    Tiled {
        /// Whether the un-bordered center is visible.
        fill_center: bool,
    },
    /// A fraction of the rectangle shown per the fill configuration.
    Filled(FillConfig),
}

/// Maps a local point into normalized rectangle space: `local / size + pivot`.
#[must_use]
pub fn normalized_point(local: Point, size: Size, pivot: Point) -> Point {
    Point::new(
        local.x / size.width + pivot.x,
        local.y / size.height + pivot.y,
    )
}

/// Resolves a point under [`RenderMode::Simple`].
#[must_use]
pub fn resolve_simple(
    local: Point,
    size: Size,
    pivot: Point,
    tex_width: u32,
    tex_height: u32,
) -> Resolved {
    sample_at(normalized_point(local, size, pivot), tex_width, tex_height)
}

/// Truncating texture sample at a normalized coordinate.
pub(crate) fn sample_at(coord: Point, tex_width: u32, tex_height: u32) -> Resolved {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "sample coordinates are truncated toward zero by design"
    )]
    Resolved::Sample {
        x: (coord.x * f64::from(tex_width)) as i32,
        y: (coord.y * f64::from(tex_height)) as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_center_samples_texture_center() {
        let resolved = resolve_simple(
            Point::ZERO,
            Size::new(100.0, 50.0),
            Point::new(0.5, 0.5),
            64,
            64,
        );
        assert_eq!(resolved, Resolved::Sample { x: 32, y: 32 });
    }

    #[test]
    fn simple_corner_samples_origin() {
        let resolved = resolve_simple(
            Point::new(-50.0, -25.0),
            Size::new(100.0, 50.0),
            Point::new(0.5, 0.5),
            64,
            64,
        );
        assert_eq!(resolved, Resolved::Sample { x: 0, y: 0 });
    }

    #[test]
    fn simple_never_rejects_out_of_rect_points() {
        let resolved = resolve_simple(
            Point::new(-200.0, 0.0),
            Size::new(100.0, 100.0),
            Point::new(0.5, 0.5),
            64,
            64,
        );
        // Outside the rectangle still resolves; the sampler owns what
        // happens at a negative coordinate.
        assert_eq!(resolved, Resolved::Sample { x: -96, y: 32 });
    }
}

// Copyright 2026 the Alphahit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprite region data and physics-shape containment.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::normalized_point;

/// 9-slice border insets in source-texture pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Border {
    /// Left inset.
    pub left: f64,
    /// Top inset.
    pub top: f64,
    /// Right inset.
    pub right: f64,
    /// Bottom inset.
    pub bottom: f64,
}

impl Border {
    /// No border.
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// The same inset on all four sides.
    #[must_use]
    pub const fn uniform(inset: f64) -> Self {
        Self {
            left: inset,
            top: inset,
            right: inset,
            bottom: inset,
        }
    }
}

/// A closed vertex loop in sprite-local units.
///
/// The loop closes implicitly from the last vertex back to the first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    /// Ordered loop vertices.
    pub points: Vec<Point>,
}

impl Polygon {
    /// Wraps an ordered vertex loop.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Even-odd containment test.
    ///
    /// Counts scanline crossings over the edges that straddle the point's
    /// y; an odd count means inside. A point exactly on an edge's
    /// x-intercept is contained. The result is independent of winding
    /// order and of which vertex starts the loop.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let points = &self.points;
        let mut crossings = 0_u32;
        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            // Only edges straddling the scanline can cross it.
            if (a.y <= point.y) == (b.y <= point.y) {
                continue;
            }
            let x = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x == x {
                return true;
            }
            if point.x < x {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }
}

/// A sub-rectangle of a texture atlas with its hit-testing metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteRegion {
    /// The sprite's pixels within the atlas, in texture pixels.
    pub texture_rect: Rect,
    /// Optional 9-slice border insets.
    pub border: Border,
    /// Sprite pixels per local unit; scales the physics shapes.
    pub pixels_per_unit: f64,
    /// Physics-shape outlines in sprite-local units. Almost every sprite
    /// carries zero or one.
    pub physics_shapes: SmallVec<[Polygon; 1]>,
}

impl SpriteRegion {
    /// A borderless region covering `texture_rect` with no physics shapes.
    #[must_use]
    pub fn new(texture_rect: Rect) -> Self {
        Self {
            texture_rect,
            border: Border::ZERO,
            pixels_per_unit: 1.0,
            physics_shapes: SmallVec::new(),
        }
    }

    /// Sprite extent in texture pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        self.texture_rect.size()
    }

    /// Whether any physics shape contains the sprite-local point.
    ///
    /// With no shapes configured there is no constraint, and every point
    /// hits.
    #[must_use]
    pub fn hits_physics_shape(&self, point: Point) -> bool {
        if self.physics_shapes.is_empty() {
            return true;
        }
        self.physics_shapes.iter().any(|shape| shape.contains(point))
    }
}

/// Maps an element-local point into sprite-local shape units.
///
/// Shapes are centered on the sprite (pivot-relative) and scaled by
/// `pixels_per_unit`, so the normalized point is re-centered and scaled by
/// the sprite extent.
#[must_use]
pub fn shape_local_point(local: Point, size: Size, pivot: Point, sprite: &SpriteRegion) -> Point {
    let coord = normalized_point(local, size, pivot);
    let sprite_size = sprite.size();
    Point::new(
        (coord.x - 0.5) * sprite_size.width / sprite.pixels_per_unit,
        (coord.y - 0.5) * sprite_size.height / sprite.pixels_per_unit,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use smallvec::smallvec;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
    }

    #[test]
    fn unit_square_containment() {
        let square = unit_square();
        assert!(square.contains(Point::new(0.5, 0.5)));
        assert!(!square.contains(Point::new(1.5, 0.5)));
        // Exactly on the right edge: the x-intercept match counts as inside.
        assert!(square.contains(Point::new(1.0, 0.5)));
    }

    #[test]
    fn containment_ignores_winding_order() {
        let mut reversed = unit_square();
        reversed.points.reverse();
        for (x, y, expected) in [(0.5, 0.5, true), (1.5, 0.5, false), (-0.1, 0.9, false)] {
            assert_eq!(reversed.contains(Point::new(x, y)), expected);
        }
    }

    #[test]
    fn containment_ignores_starting_vertex() {
        let mut rotated = unit_square();
        rotated.points.rotate_left(2);
        assert!(rotated.contains(Point::new(0.5, 0.5)));
        assert!(!rotated.contains(Point::new(1.5, 0.5)));
    }

    #[test]
    fn concave_polygon_uses_even_odd_rule() {
        // A "U": the notch between the arms is outside.
        let u_shape = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 3.0),
            Point::new(2.0, 3.0),
            Point::new(2.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 3.0),
            Point::new(0.0, 3.0),
        ]);
        assert!(u_shape.contains(Point::new(0.5, 2.0)));
        assert!(!u_shape.contains(Point::new(1.5, 2.0)));
        assert!(u_shape.contains(Point::new(2.5, 2.0)));
    }

    #[test]
    fn any_shape_hits_and_none_means_unconstrained() {
        let mut sprite = SpriteRegion::new(Rect::new(0.0, 0.0, 4.0, 4.0));
        assert!(sprite.hits_physics_shape(Point::new(9.0, 9.0)));

        let far_square = Polygon::new(vec![
            Point::new(10.0, 10.0),
            Point::new(11.0, 10.0),
            Point::new(11.0, 11.0),
            Point::new(10.0, 11.0),
        ]);
        sprite.physics_shapes = smallvec![unit_square(), far_square];
        assert!(sprite.hits_physics_shape(Point::new(0.5, 0.5)));
        assert!(sprite.hits_physics_shape(Point::new(10.5, 10.5)));
        assert!(!sprite.hits_physics_shape(Point::new(5.0, 5.0)));
    }

    #[test]
    fn shape_points_are_pivot_relative_sprite_units() {
        let sprite = SpriteRegion {
            pixels_per_unit: 2.0,
            ..SpriteRegion::new(Rect::new(0.0, 0.0, 64.0, 64.0))
        };
        let size = Size::new(100.0, 100.0);
        let pivot = Point::new(0.5, 0.5);
        let center = shape_local_point(Point::ZERO, size, pivot, &sprite);
        assert!(center.x.abs() < 1e-9 && center.y.abs() < 1e-9);
        let corner = shape_local_point(Point::new(50.0, 50.0), size, pivot, &sprite);
        assert!((corner.x - 16.0).abs() < 1e-9 && (corner.y - 16.0).abs() < 1e-9);
    }
}

// Copyright 2026 the Alphahit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing against sprite physics shapes.

use kurbo::Point;

use alphahit_raycast::{Projection, RectElement};
use alphahit_region::{SpriteRegion, shape_local_point};

use crate::{Coverage, DiagnosticsSink, FilterSettings, Mapped, decide, map_screen_point};

/// Raycast filter over a sprite's physics-shape outlines.
///
/// No alpha is sampled: a point inside any shape loop is a guaranteed
/// accept and anything else a guaranteed reject, so every non-zero
/// threshold behaves identically. A sprite with no shapes configured
/// accepts its whole rectangle.
#[derive(Clone, Debug)]
pub struct ShapeHitFilter {
    /// Element placement and rectangle.
    pub element: RectElement,
    /// Query settings.
    pub settings: FilterSettings,
    /// Sprite carrying the physics shapes.
    pub sprite: SpriteRegion,
}

impl ShapeHitFilter {
    /// A filter over `sprite`'s shapes with default settings.
    #[must_use]
    pub fn new(element: RectElement, sprite: SpriteRegion) -> Self {
        Self {
            element,
            settings: FilterSettings::default(),
            sprite,
        }
    }

    /// Whether `screen` counts as hitting this element.
    pub fn hit_test(
        &self,
        screen: Point,
        projection: Option<&dyn Projection>,
        diagnostics: &mut dyn DiagnosticsSink,
    ) -> bool {
        let local =
            match map_screen_point(&self.element, &self.settings, screen, projection, diagnostics) {
                Mapped::Done(hit) => return hit,
                Mapped::Local(local) => local,
            };
        decide(self.coverage(local), self.settings.threshold)
    }

    fn coverage(&self, local: Point) -> Coverage {
        let point = shape_local_point(local, self.element.size, self.element.pivot, &self.sprite);
        if self.sprite.hits_physics_shape(point) {
            Coverage::Accept
        } else {
            Coverage::Reject
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alphahit_region::Polygon;
    use kurbo::{Rect, Size};

    fn element() -> RectElement {
        RectElement::axis_aligned(Point::ZERO, Size::new(100.0, 100.0))
    }

    /// 64x64 sprite with a centered 32x32 diamond shape.
    fn diamond_sprite() -> SpriteRegion {
        let mut sprite = SpriteRegion::new(Rect::new(0.0, 0.0, 64.0, 64.0));
        sprite.physics_shapes.push(Polygon::new(vec![
            Point::new(0.0, -16.0),
            Point::new(16.0, 0.0),
            Point::new(0.0, 16.0),
            Point::new(-16.0, 0.0),
        ]));
        sprite
    }

    fn filter() -> ShapeHitFilter {
        let mut filter = ShapeHitFilter::new(element(), diamond_sprite());
        filter.settings = FilterSettings::with_threshold(0.5);
        filter
    }

    #[test]
    fn shape_interior_hits_and_corners_miss() {
        let filter = filter();
        // Element center maps to the diamond's center.
        assert!(filter.hit_test(Point::new(0.0, 0.0), None, &mut ()));
        // The rectangle corner lies outside the diamond.
        assert!(!filter.hit_test(Point::new(45.0, 45.0), None, &mut ()));
    }

    #[test]
    fn no_shapes_means_no_constraint() {
        let mut filter = filter();
        filter.sprite.physics_shapes.clear();
        assert!(filter.hit_test(Point::new(45.0, 45.0), None, &mut ()));
    }

    #[test]
    fn pixels_per_unit_scales_the_shape_space() {
        let mut filter = filter();
        // Shrinking the unit doubles the shape's reach over the element.
        filter.sprite.pixels_per_unit = 2.0;
        assert!(filter.hit_test(Point::new(30.0, 0.0), None, &mut ()));
        let mut tight = self::filter();
        tight.sprite.pixels_per_unit = 1.0;
        assert!(!tight.hit_test(Point::new(30.0, 0.0), None, &mut ()));
    }
}

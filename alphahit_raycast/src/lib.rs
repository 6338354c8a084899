// Copyright 2026 the Alphahit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-space to element-local coordinate mapping.
//!
//! This crate answers one question for the rest of the workspace: given a
//! point on the screen, where does it land on a rectangular UI element?
//! Elements live on arbitrary planes in world space (a rigid transform plus
//! a local rectangle and pivot), so the mapping is a ray/plane intersection
//! followed by an inverse transform into local coordinates.
//!
//! Two picking modes are supported:
//!
//! - **Projected**: the host camera implements [`Projection`] and supplies a
//!   world-space ray through the screen point.
//! - **Orthographic/null**: without a projection, a synthetic ray starts at
//!   `(screen.x, screen.y, ray_depth)` and travels along world +Z. For an
//!   un-tilted element this intersection reduces to the closed-form depth
//!   solve, so the one code path covers both formulations.
//!
//! The entry point is [`screen_to_local`]. [`ray_depth_conflict`] is a
//! purely advisory companion check: a `ray_depth` that starts the synthetic
//! ray beyond the element's nearest corner produces geometrically suspect
//! results, and callers are expected to surface that through their own
//! diagnostics rather than have this crate reject the query.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use glam::{DAffine3, DVec3};
use kurbo::{Point, Rect, Size};

/// Dot products smaller than this count as perpendicular.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Depth used for the synthetic no-projection ray origin when the caller
/// does not configure one.
pub const DEFAULT_RAY_DEPTH: f64 = -100.0;

/// A world-space ray.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    /// Ray origin.
    pub origin: DVec3,
    /// Ray direction. Not required to be unit length.
    pub direction: DVec3,
}

impl Ray {
    /// The point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Host camera collaborator.
///
/// Implementations turn a screen point into a world-space picking ray. The
/// absence of a projection selects the orthographic/null mapping mode.
pub trait Projection {
    /// Returns the picking ray passing through `screen`.
    fn screen_point_to_ray(&self, screen: Point) -> Ray;
}

/// A rectangular UI element placed in world space.
///
/// The element's geometry is a local rectangle of `size` anchored at a
/// normalized `pivot`, carried by a rigid `world_from_local` transform.
/// Width and height are non-negative and the pivot lies in `[0, 1]²`.
#[derive(Clone, Copy, Debug)]
pub struct RectElement {
    /// World-from-local rigid transform.
    pub world_from_local: DAffine3,
    /// Local rectangle extents.
    pub size: Size,
    /// Normalized pivot; `(0.5, 0.5)` centers the rectangle on the origin.
    pub pivot: Point,
}

impl RectElement {
    /// An untransformed, center-pivoted element in the world XY plane.
    #[must_use]
    pub fn axis_aligned(center: Point, size: Size) -> Self {
        Self {
            world_from_local: DAffine3::from_translation(DVec3::new(center.x, center.y, 0.0)),
            size,
            pivot: Point::new(0.5, 0.5),
        }
    }

    /// World-space position of the pivot.
    #[must_use]
    pub fn position(&self) -> DVec3 {
        self.world_from_local.translation
    }

    /// Unit normal of the element's plane (local +Z carried to world space).
    #[must_use]
    pub fn forward(&self) -> DVec3 {
        self.world_from_local.matrix3.z_axis.normalize_or_zero()
    }

    /// The element rectangle in local coordinates, pivot at the origin.
    #[must_use]
    pub fn local_rect(&self) -> Rect {
        let x0 = -self.pivot.x * self.size.width;
        let y0 = -self.pivot.y * self.size.height;
        Rect::new(x0, y0, x0 + self.size.width, y0 + self.size.height)
    }

    /// Maps a local point into normalized rectangle space.
    ///
    /// Points inside the rectangle land in `[0, 1]²`; points outside map
    /// beyond it. Callers own the non-degenerate-size invariant; a
    /// zero-extent rectangle yields non-finite coordinates.
    #[must_use]
    pub fn normalized(&self, local: Point) -> Point {
        Point::new(
            local.x / self.size.width + self.pivot.x,
            local.y / self.size.height + self.pivot.y,
        )
    }

    /// The four world-space corners of the rectangle.
    #[must_use]
    pub fn world_corners(&self) -> [DVec3; 4] {
        let r = self.local_rect();
        [
            self.world_from_local
                .transform_point3(DVec3::new(r.x0, r.y0, 0.0)),
            self.world_from_local
                .transform_point3(DVec3::new(r.x0, r.y1, 0.0)),
            self.world_from_local
                .transform_point3(DVec3::new(r.x1, r.y1, 0.0)),
            self.world_from_local
                .transform_point3(DVec3::new(r.x1, r.y0, 0.0)),
        ]
    }

    /// Depth (world z) of the nearest rectangle corner.
    #[must_use]
    pub fn min_corner_depth(&self) -> f64 {
        let corners = self.world_corners();
        let mut min_z = corners[0].z;
        for corner in &corners[1..] {
            min_z = min_z.min(corner.z);
        }
        min_z
    }
}

/// Builds the picking ray for `screen`.
///
/// With a projection the host camera provides the ray; without one a
/// synthetic ray starts at depth `ray_depth` and travels along world +Z.
#[must_use]
pub fn screen_point_to_ray(
    projection: Option<&dyn Projection>,
    screen: Point,
    ray_depth: f64,
) -> Ray {
    match projection {
        Some(projection) => projection.screen_point_to_ray(screen),
        None => Ray {
            origin: DVec3::new(screen.x, screen.y, ray_depth),
            direction: DVec3::Z,
        },
    }
}

/// Intersects the picking ray for `screen` with the element's plane.
///
/// Returns `None` when the ray cannot reach the plane. A ray whose origin
/// already lies on the plane maps to its own origin even though the forward
/// intersection fails there.
#[must_use]
pub fn screen_to_world(
    element: &RectElement,
    screen: Point,
    projection: Option<&dyn Projection>,
    ray_depth: f64,
) -> Option<DVec3> {
    let ray = screen_point_to_ray(projection, screen, ray_depth);
    let normal = element.forward();
    let to_element = (element.position() - ray.origin).normalize_or_zero();
    match plane_raycast(&ray, normal, element.position()) {
        Some(t) => Some(ray.at(t)),
        // The origin already sits on the element's plane: it is its own
        // intersection even though the forward raycast found nothing.
        None if to_element.dot(normal).abs() < PARALLEL_EPSILON => Some(ray.origin),
        None => None,
    }
}

/// Maps a screen point into the element's local coordinate space.
#[must_use]
pub fn screen_to_local(
    element: &RectElement,
    screen: Point,
    projection: Option<&dyn Projection>,
    ray_depth: f64,
) -> Option<Point> {
    let world = screen_to_world(element, screen, projection, ray_depth)?;
    let local = element.world_from_local.inverse().transform_point3(world);
    Some(Point::new(local.x, local.y))
}

/// Advisory check for a misconfigured synthetic ray depth.
///
/// Returns the nearest corner depth when `ray_depth` would start the
/// synthetic ray at or beyond it. Detection only: callers report the
/// condition and carry on with the query.
#[must_use]
pub fn ray_depth_conflict(element: &RectElement, ray_depth: f64) -> Option<f64> {
    let min_depth = element.min_corner_depth();
    (ray_depth > min_depth).then_some(min_depth)
}

/// Forward ray/plane intersection parameter, if any.
fn plane_raycast(ray: &Ray, normal: DVec3, point_on_plane: DVec3) -> Option<f64> {
    let along = ray.direction.dot(normal);
    if along.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (point_on_plane - ray.origin).dot(normal) / along;
    (t > 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// A pinhole at `eye` looking toward +Z through the world XY plane.
    struct Pinhole {
        eye: DVec3,
    }

    impl Projection for Pinhole {
        fn screen_point_to_ray(&self, screen: Point) -> Ray {
            Ray {
                origin: self.eye,
                direction: DVec3::new(screen.x, screen.y, 0.0) - self.eye,
            }
        }
    }

    #[test]
    fn null_projection_maps_to_local_offsets() {
        let element = RectElement::axis_aligned(Point::new(10.0, 20.0), Size::new(100.0, 50.0));
        let local = screen_to_local(&element, Point::new(30.0, 30.0), None, DEFAULT_RAY_DEPTH)
            .expect("mapping should succeed");
        assert!(close(local.x, 20.0) && close(local.y, 10.0));
    }

    #[test]
    fn pivot_shifts_normalized_space() {
        let mut element = RectElement::axis_aligned(Point::ZERO, Size::new(10.0, 10.0));
        element.pivot = Point::new(0.0, 0.0);
        let coord = element.normalized(Point::new(5.0, 2.5));
        assert!(close(coord.x, 0.5) && close(coord.y, 0.25));
    }

    #[test]
    fn rotated_element_inverts_into_local_space() {
        let mut element = RectElement::axis_aligned(Point::ZERO, Size::new(20.0, 20.0));
        element.world_from_local = DAffine3::from_rotation_z(core::f64::consts::FRAC_PI_2);
        let local = screen_to_local(&element, Point::new(0.0, 5.0), None, DEFAULT_RAY_DEPTH)
            .expect("mapping should succeed");
        assert!(close(local.x, 5.0) && close(local.y, 0.0));
    }

    #[test]
    fn edge_on_element_rejects_parallel_ray() {
        let mut element = RectElement::axis_aligned(Point::ZERO, Size::new(10.0, 10.0));
        // Plane normal becomes world +X; the synthetic +Z ray runs parallel.
        element.world_from_local = DAffine3::from_rotation_y(core::f64::consts::FRAC_PI_2);
        let mapped = screen_to_local(&element, Point::new(5.0, 0.0), None, DEFAULT_RAY_DEPTH);
        assert!(mapped.is_none());
    }

    #[test]
    fn ray_origin_on_plane_maps_to_itself() {
        let mut element = RectElement::axis_aligned(Point::ZERO, Size::new(10.0, 10.0));
        element.world_from_local = DAffine3::from_rotation_y(core::f64::consts::FRAC_PI_2);
        // Screen x = 0 puts the synthetic origin exactly on the x = 0 plane.
        let world = screen_to_world(&element, Point::new(0.0, 3.0), None, DEFAULT_RAY_DEPTH)
            .expect("on-plane origin should resolve");
        assert!(close(world.x, 0.0) && close(world.y, 3.0) && close(world.z, DEFAULT_RAY_DEPTH));
    }

    #[test]
    fn projected_ray_lands_on_plane() {
        let element = RectElement::axis_aligned(Point::new(2.0, -1.0), Size::new(40.0, 40.0));
        let camera = Pinhole {
            eye: DVec3::new(0.0, 0.0, -100.0),
        };
        let local = screen_to_local(
            &element,
            Point::new(7.0, 3.0),
            Some(&camera),
            DEFAULT_RAY_DEPTH,
        )
        .expect("mapping should succeed");
        assert!(close(local.x, 5.0) && close(local.y, 4.0));
    }

    #[test]
    fn plane_behind_projected_ray_rejects() {
        let mut element = RectElement::axis_aligned(Point::ZERO, Size::new(10.0, 10.0));
        // Element sits behind the camera; the forward intersection is at t < 0.
        element.world_from_local = DAffine3::from_translation(DVec3::new(0.0, 0.0, -200.0));
        let camera = Pinhole {
            eye: DVec3::new(0.0, 0.0, -100.0),
        };
        let mapped = screen_to_world(&element, Point::new(1.0, 1.0), Some(&camera), 0.0);
        assert!(mapped.is_none());
    }

    #[test]
    fn ray_depth_conflict_detects_element_behind_origin() {
        let mut element = RectElement::axis_aligned(Point::ZERO, Size::new(10.0, 10.0));
        element.world_from_local = DAffine3::from_translation(DVec3::new(0.0, 0.0, -200.0));
        let conflict = ray_depth_conflict(&element, DEFAULT_RAY_DEPTH);
        assert_eq!(conflict, Some(-200.0));

        let safe = RectElement::axis_aligned(Point::ZERO, Size::new(10.0, 10.0));
        assert_eq!(ray_depth_conflict(&safe, DEFAULT_RAY_DEPTH), None);
    }
}

// Copyright 2026 the Alphahit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 9-slice and tiled region mapping.
//!
//! Both modes partition each axis into a near border, a middle zone, and a
//! far border. Borders sample their source zones at native scale; the
//! middle either stretches (sliced) or wraps over the native tile extent
//! (tiled). When the rectangle is too small for the summed borders, the
//! borders on that axis shrink by the rectangle's stretch factor and the
//! native mapping scales back up accordingly.

use kurbo::{Point, Size};

use crate::{Border, Resolved, SpriteRegion};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Zone {
    Near,
    Middle,
    Far,
}

/// Resolves a point under [`crate::RenderMode::Sliced`].
#[must_use]
pub fn resolve_sliced(
    local: Point,
    size: Size,
    pivot: Point,
    sprite: &SpriteRegion,
    fill_center: bool,
) -> Resolved {
    let p = rect_point(local, size, pivot);
    let adj = adjusted_borders(&sprite.border, size);
    let rect = sprite.texture_rect;
    let border = &sprite.border;
    let (zone_x, sx) = slice_axis(
        p.x,
        size.width,
        rect.x0,
        rect.x1,
        border.left,
        border.right,
        adj.left,
        adj.right,
    );
    let (zone_y, sy) = slice_axis(
        p.y,
        size.height,
        rect.y0,
        rect.y1,
        border.bottom,
        border.top,
        adj.bottom,
        adj.top,
    );
    if !fill_center && zone_x == Zone::Middle && zone_y == Zone::Middle {
        return Resolved::Outside;
    }
    sample(sx, sy)
}

/// Resolves a point under [`crate::RenderMode::Tiled`].
#[must_use]
pub fn resolve_tiled(
    local: Point,
    size: Size,
    pivot: Point,
    sprite: &SpriteRegion,
    fill_center: bool,
) -> Resolved {
    let p = rect_point(local, size, pivot);
    let adj = adjusted_borders(&sprite.border, size);
    let rect = sprite.texture_rect;
    let border = &sprite.border;
    let (zone_x, sx) = tile_axis(
        p.x,
        size.width,
        rect.x0,
        rect.x1,
        border.left,
        border.right,
        adj.left,
        adj.right,
    );
    let (zone_y, sy) = tile_axis(
        p.y,
        size.height,
        rect.y0,
        rect.y1,
        border.bottom,
        border.top,
        adj.bottom,
        adj.top,
    );
    if !fill_center && zone_x == Zone::Middle && zone_y == Zone::Middle {
        return Resolved::Outside;
    }
    sample(sx, sy)
}

/// The local point re-based to the rectangle's bottom-left corner.
fn rect_point(local: Point, size: Size, pivot: Point) -> Point {
    Point::new(
        local.x + pivot.x * size.width,
        local.y + pivot.y * size.height,
    )
}

/// Border insets scaled down per axis when the rectangle cannot hold them.
fn adjusted_borders(border: &Border, size: Size) -> Border {
    let mut adjusted = *border;
    let horizontal = border.left + border.right;
    if horizontal > size.width && horizontal > 0.0 {
        let scale = size.width / horizontal;
        adjusted.left *= scale;
        adjusted.right *= scale;
    }
    let vertical = border.bottom + border.top;
    if vertical > size.height && vertical > 0.0 {
        let scale = size.height / vertical;
        adjusted.bottom *= scale;
        adjusted.top *= scale;
    }
    adjusted
}

/// Ratio mapping an adjusted border back onto its native source zone.
fn native_scale(native: f64, adjusted: f64) -> f64 {
    if adjusted > 0.0 { native / adjusted } else { 1.0 }
}

/// One axis of the sliced mapping: native borders, stretched middle.
fn slice_axis(
    p: f64,
    extent: f64,
    src0: f64,
    src1: f64,
    near: f64,
    far: f64,
    adj_near: f64,
    adj_far: f64,
) -> (Zone, f64) {
    if p < adj_near {
        (Zone::Near, src0 + p * native_scale(near, adj_near))
    } else if p >= extent - adj_far {
        (Zone::Far, src1 - (extent - p) * native_scale(far, adj_far))
    } else {
        let span = extent - adj_near - adj_far;
        let t = if span > 0.0 { (p - adj_near) / span } else { 0.0 };
        let src_span = (src1 - src0) - near - far;
        (Zone::Middle, src0 + near + t * src_span)
    }
}

/// One axis of the tiled mapping: native borders, wrapped middle.
fn tile_axis(
    p: f64,
    extent: f64,
    src0: f64,
    src1: f64,
    near: f64,
    far: f64,
    adj_near: f64,
    adj_far: f64,
) -> (Zone, f64) {
    if p < adj_near {
        (Zone::Near, src0 + p * native_scale(near, adj_near))
    } else if p >= extent - adj_far {
        (Zone::Far, src1 - (extent - p) * native_scale(far, adj_far))
    } else {
        let tile = (src1 - src0) - near - far;
        if tile > 0.0 {
            // `p >= adj_near` in this branch, so the remainder is already
            // non-negative.
            (Zone::Middle, src0 + near + (p - adj_near) % tile)
        } else {
            // Degenerate tile: collapse the wrap onto the near tile edge.
            (Zone::Middle, src0 + near)
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "sample coordinates are truncated toward zero by design"
)]
fn sample(sx: f64, sy: f64) -> Resolved {
    Resolved::Sample {
        x: sx as i32,
        y: sy as i32,
    }
}

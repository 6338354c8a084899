// Copyright 2026 the Alphahit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar and radial fill geometry.
//!
//! A filled element shows only part of its rectangle. Every sub-mode boils
//! down to the same shape: compute a normalized progress `t` for the query
//! point, then accept it against one inclusive window — `[0, amount]`, or
//! `[1 - amount, 1]` when the configured origin/direction opposes the
//! formula's base direction. Base directions are fixed and documented per
//! mode (historical implementations disagreed on sign conventions; this
//! crate picks one and sticks to it):
//!
//! - Bars measure along +x / +y and flip for the far origins (right / top).
//! - Radial-90 corner framings measure the **clockwise** sweep, so the
//!   window flips when `clockwise == false`.
//! - Radial-180 and radial-360 framings measure the **counterclockwise**
//!   sweep, so the window flips when `clockwise == true`.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use core::f64::consts::{FRAC_PI_2, PI, TAU};

use kurbo::{Point, Size};

use crate::{Resolved, normalized_point, sample_at};

/// Anchor side for horizontal bar fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalOrigin {
    /// Fill grows from the left edge.
    Left,
    /// Fill grows from the right edge.
    Right,
}

/// Anchor side for vertical bar fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalOrigin {
    /// Fill grows from the bottom edge.
    Bottom,
    /// Fill grows from the top edge.
    Top,
}

/// Anchor corner for quarter-circle fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin90 {
    /// Pivot at the bottom-left corner.
    BottomLeft,
    /// Pivot at the top-left corner.
    TopLeft,
    /// Pivot at the top-right corner.
    TopRight,
    /// Pivot at the bottom-right corner.
    BottomRight,
}

/// Anchor side for half-circle fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin180 {
    /// Pivot at the middle of the bottom edge.
    Bottom,
    /// Pivot at the middle of the left edge.
    Left,
    /// Pivot at the middle of the top edge.
    Top,
    /// Pivot at the middle of the right edge.
    Right,
}

/// Anchor direction for full-circle fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin360 {
    /// Sweep anchored at the bottom of the circle.
    Bottom,
    /// Sweep anchored at the right of the circle.
    Right,
    /// Sweep anchored at the top of the circle.
    Top,
    /// Sweep anchored at the left of the circle.
    Left,
}

/// Fill sub-mode with its origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillMethod {
    /// Horizontal bar.
    Horizontal(HorizontalOrigin),
    /// Vertical bar.
    Vertical(VerticalOrigin),
    /// Quarter circle swept from a corner.
    Radial90(Origin90),
    /// Half circle swept from a side.
    Radial180(Origin180),
    /// Full circle swept around the center.
    Radial360(Origin360),
}

/// Complete fill configuration for a filled element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillConfig {
    /// Fill sub-mode and origin.
    pub method: FillMethod,
    /// Visible fraction in `[0, 1]`.
    pub amount: f64,
    /// Sweep direction for the radial sub-modes.
    pub clockwise: bool,
}

impl FillConfig {
    /// Whether the normalized point lies in the visible filled region.
    ///
    /// `amount >= 1` saturates to the whole rectangle and `amount <= 0`
    /// hides all of it, without evaluating any geometry.
    #[must_use]
    pub fn accepts(&self, coord: Point, size: Size) -> bool {
        if self.amount >= 1.0 {
            return true;
        }
        if self.amount <= 0.0 {
            return false;
        }
        let (t, flipped) = match self.method {
            FillMethod::Horizontal(origin) => (coord.x, origin == HorizontalOrigin::Right),
            FillMethod::Vertical(origin) => (coord.y, origin == VerticalOrigin::Top),
            FillMethod::Radial90(origin) => (radial90_progress(coord, origin), !self.clockwise),
            FillMethod::Radial180(origin) => {
                (radial180_progress(coord, size, origin), self.clockwise)
            }
            FillMethod::Radial360(origin) => (radial360_progress(coord, origin), self.clockwise),
        };
        in_window(t, self.amount, flipped)
    }
}

/// Resolves a point under [`crate::RenderMode::Filled`].
///
/// Visible points sample exactly as the simple mode does: against the full
/// rectangle and texture, never a sub-rectangle.
#[must_use]
pub fn resolve_filled(
    local: Point,
    size: Size,
    pivot: Point,
    fill: &FillConfig,
    tex_width: u32,
    tex_height: u32,
) -> Resolved {
    let coord = normalized_point(local, size, pivot);
    if fill.accepts(coord, size) {
        sample_at(coord, tex_width, tex_height)
    } else {
        Resolved::Outside
    }
}

/// Wraps a raw angle in radians into `[0, 1)` turns.
///
/// Continuous modulo wraparound: inputs a full turn apart map to the same
/// value up to floating error.
#[must_use]
pub fn normalize_turns(radians: f64) -> f64 {
    let wrapped = radians % TAU;
    let wrapped = if wrapped < 0.0 { wrapped + TAU } else { wrapped };
    let turns = wrapped / TAU;
    // A tiny negative input can round back up to a full turn.
    if turns >= 1.0 { 0.0 } else { turns }
}

/// The inclusive acceptance window shared by every fill sub-mode.
fn in_window(t: f64, amount: f64, flipped: bool) -> bool {
    let (low, high) = if flipped {
        (1.0 - amount, 1.0)
    } else {
        (0.0, amount)
    };
    low <= t && t <= high
}

/// Clockwise quadrant progress from the origin corner, in `[0, 1]` for
/// points inside the rectangle.
fn radial90_progress(coord: Point, origin: Origin90) -> f64 {
    match origin {
        Origin90::BottomLeft => {
            let angle = coord.y.atan2(coord.x);
            (FRAC_PI_2 - angle) / FRAC_PI_2
        }
        Origin90::BottomRight => {
            let angle = coord.y.atan2(coord.x - 1.0);
            1.0 - (angle - FRAC_PI_2) / FRAC_PI_2
        }
        Origin90::TopLeft => {
            let angle = (coord.y - 1.0).atan2(coord.x);
            angle / -FRAC_PI_2
        }
        Origin90::TopRight => {
            let angle = (coord.y - 1.0).atan2(coord.x - 1.0);
            (angle + FRAC_PI_2) / -FRAC_PI_2
        }
    }
}

/// Counterclockwise half-plane progress from the origin side, in `[0, 1]`
/// over the visible half and negative beyond it.
///
/// Deltas are scaled by the element extents so the angle is measured in
/// element units, not normalized units.
fn radial180_progress(coord: Point, size: Size, origin: Origin180) -> f64 {
    let dx = |px: f64| (coord.x - px) * size.width;
    let dy = |py: f64| (coord.y - py) * size.height;
    let (u, v) = match origin {
        Origin180::Bottom => (dx(0.5), dy(0.0)),
        Origin180::Left => (-dy(0.5), dx(0.0)),
        Origin180::Top => (-dx(0.5), -dy(1.0)),
        Origin180::Right => (dy(0.5), -dx(1.0)),
    };
    v.atan2(u) / PI
}

/// Counterclockwise full-circle progress around the rectangle center, in
/// `[0, 1)` turns, phase-anchored at the origin.
fn radial360_progress(coord: Point, origin: Origin360) -> f64 {
    let offset = match origin {
        Origin360::Bottom => -FRAC_PI_2,
        Origin360::Left => -PI,
        Origin360::Top => FRAC_PI_2,
        Origin360::Right => 0.0,
    };
    let angle = (0.5 - coord.y).atan2(0.5 - coord.x) + offset;
    normalize_turns(angle)
}

//! Viewport handling: the affine map from world coordinates through radar
//! space onto canvas pixels, plus zoom/pan state and radar level selection
//! for multi-floor maps.

use common::maps::{LowerLevel, MapMeta};

use crate::interp::InterpolatedPlayer;

/// Reference edge length of the square radar images.
pub const RADAR_SIZE: f64 = 1024.0;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Camera {
    /// Double-activation reset: zoom back to 1, pan to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Changes zoom anchored at a canvas point: the world point under the
    /// anchor stays fixed in screen space across the zoom change.
    pub fn zoom_at(&mut self, anchor: (f64, f64), new_zoom: f64, canvas: f64) {
        let new_zoom = new_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = new_zoom / self.zoom;
        self.pan_x = anchor.0 - (anchor.0 - self.pan_x) * ratio;
        self.pan_y = anchor.1 - (anchor.1 - self.pan_y) * ratio;
        self.zoom = new_zoom;
        self.clamp_pan(canvas);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64, canvas: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
        self.clamp_pan(canvas);
    }

    /// With zoom >= 1 the scaled radar is at least canvas-sized; keeping the
    /// pan in `[canvas - canvas*zoom, 0]` means it always covers the canvas
    /// and can never be dragged out of view.
    fn clamp_pan(&mut self, canvas: f64) {
        let min = canvas - canvas * self.zoom;
        self.pan_x = self.pan_x.clamp(min, 0.0);
        self.pan_y = self.pan_y.clamp(min, 0.0);
    }
}

/// The full world-to-canvas transform for one map and canvas size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub meta: MapMeta,
    pub canvas: f64,
    pub camera: Camera,
}

impl Transform {
    pub fn world_to_canvas(&self, wx: f64, wy: f64) -> (f64, f64) {
        let px = self.canvas / RADAR_SIZE;
        let x = (wx - self.meta.pos_x) / self.meta.scale * px;
        let y = (self.meta.pos_y - wy) / self.meta.scale * px;
        (
            x * self.camera.zoom + self.camera.pan_x,
            y * self.camera.zoom + self.camera.pan_y,
        )
    }

    pub fn canvas_to_world(&self, cx: f64, cy: f64) -> (f64, f64) {
        let px = self.canvas / RADAR_SIZE;
        let x = (cx - self.camera.pan_x) / self.camera.zoom;
        let y = (cy - self.camera.pan_y) / self.camera.zoom;
        (
            x / px * self.meta.scale + self.meta.pos_x,
            self.meta.pos_y - y / px * self.meta.scale,
        )
    }

    /// A world-space distance in canvas pixels at the current zoom.
    pub fn world_len(&self, d: f64) -> f64 {
        d / self.meta.scale * (self.canvas / RADAR_SIZE) * self.camera.zoom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadarLevel {
    Upper,
    Lower,
}

/// Which radar image to draw: the manual override wins, otherwise the lower
/// level is shown while the majority of alive players are below the map's Z
/// threshold.
pub fn active_level(
    lower: Option<&LowerLevel>,
    players: &[InterpolatedPlayer],
    override_level: Option<RadarLevel>,
) -> RadarLevel {
    if let Some(level) = override_level {
        return level;
    }
    let Some(lower) = lower else {
        return RadarLevel::Upper;
    };
    let mut alive = 0usize;
    let mut below = 0usize;
    for player in players.iter().filter(|p| !p.is_dead()) {
        alive += 1;
        if player.z < lower.z_max {
            below += 1;
        }
    }
    if alive > 0 && below * 2 > alive {
        RadarLevel::Lower
    } else {
        RadarLevel::Upper
    }
}

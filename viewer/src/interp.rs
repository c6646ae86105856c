//! Frame interpolation: the record set stores 4 keyframes per second, the
//! playback cursor is continuous, so every continuously-varying field is
//! linearly interpolated between the surrounding frames.

use common::replay::{FLAG_CARRIER, FLAG_DEAD, FLAG_T_SIDE};
use common::{Frame, PlayerState, Round};

/// One player's interpolated state at a sub-frame cursor position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatedPlayer {
    pub idx: i32,
    pub flags: i32,
    pub hp: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f64,
}

impl InterpolatedPlayer {
    pub fn is_dead(&self) -> bool {
        self.flags & FLAG_DEAD != 0
    }

    pub fn is_t_side(&self) -> bool {
        self.flags & FLAG_T_SIDE != 0
    }

    pub fn carries_bomb(&self) -> bool {
        self.flags & FLAG_CARRIER != 0
    }
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Shortest-arc angle interpolation in degrees.
///
/// A wrap from 359 to 1 animates as +2 degrees, not -358: the delta is
/// normalized into (-180, 180] before scaling.
pub fn lerp_angle(a: f64, b: f64, t: f64) -> f64 {
    let mut delta = (b - a).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    (a + delta * t).rem_euclid(360.0)
}

/// The frames surrounding `cursor` plus the fractional position between them.
/// The cursor is clamped into the round's frame range.
pub fn frame_window(round: &Round, cursor: f64) -> Option<(&Frame, &Frame, f64)> {
    if round.frames.is_empty() {
        return None;
    }
    let max = (round.frames.len() - 1) as f64;
    let clamped = cursor.clamp(0.0, max);
    let lo = clamped.floor() as usize;
    let hi = (lo + 1).min(round.frames.len() - 1);
    Some((&round.frames[lo], &round.frames[hi], clamped - lo as f64))
}

/// The (fractional) source tick the cursor currently points at.
pub fn tick_at(round: &Round, cursor: f64) -> f64 {
    match frame_window(round, cursor) {
        Some((lo, hi, t)) => lerp(lo.tick as f64, hi.tick as f64, t),
        None => 0.0,
    }
}

/// Interpolated state for every player visible around the cursor.
///
/// Players present in only one of the two frames snap to the frame they exist
/// in; status flags always come from the floor frame.
pub fn players_at(round: &Round, cursor: f64) -> Vec<InterpolatedPlayer> {
    let Some((lo, hi, t)) = frame_window(round, cursor) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(lo.players.len());
    for a in lo.players.iter() {
        match hi.players.iter().find(|b| b.idx == a.idx) {
            Some(b) => out.push(InterpolatedPlayer {
                idx: a.idx,
                flags: a.flags,
                hp: lerp(a.hp as f64, b.hp as f64, t),
                x: lerp(a.x as f64, b.x as f64, t),
                y: lerp(a.y as f64, b.y as f64, t),
                z: lerp(a.z as f64, b.z as f64, t),
                yaw: lerp_angle(a.yaw as f64, b.yaw as f64, t),
            }),
            None => out.push(snap(a)),
        }
    }
    for b in hi.players.iter() {
        if !lo.players.iter().any(|a| a.idx == b.idx) {
            out.push(snap(b));
        }
    }
    out
}

fn snap(state: &PlayerState) -> InterpolatedPlayer {
    InterpolatedPlayer {
        idx: state.idx,
        flags: state.flags,
        hp: state.hp as f64,
        x: state.x as f64,
        y: state.y as f64,
        z: state.z as f64,
        yaw: state.yaw as f64,
    }
}

//! Grenade lifecycle correlation: throw, flight and detonation arrive as
//! separate notifications for the same physical object and are folded into
//! single entities here.

use common::{GrenadeKind, GrenadeTrail, Team};

use crate::event::{Actor, ProjectileKind, TrajectorySample};

/// Smoke display duration, ~18 s at 64 ticks/s. Fixed rather than taken from
/// the real expiry notification, which can arrive after the round has been
/// closed and copied into the result set.
pub const SMOKE_TICKS: u32 = 1152;

/// Incendiary/molotov burn duration, ~7 s at 64 ticks/s.
pub const FIRE_TICKS: u32 = 448;

/// Upper bound on stored trail points per throw.
pub const MAX_TRAIL_POINTS: usize = 80;

#[derive(Debug, Clone, Copy)]
struct PendingThrow {
    tick: u32,
    thrower: i32,
}

/// Correlates projectile throw/destroy pairs within one round, keyed by the
/// decoder's unique projectile id.
#[derive(Debug, Default)]
pub struct GrenadeTracker {
    pending: std::collections::HashMap<i64, PendingThrow>,
}

impl GrenadeTracker {
    pub fn thrown(&mut self, projectile: i64, tick: u32, thrower: i32) {
        self.pending.insert(projectile, PendingThrow { tick, thrower });
    }

    /// Closes a pending entry, producing the compressed throw arc. `None`
    /// when the equipment type is untracked, the throw was never recorded or
    /// the trajectory is too short to draw. Smoke team coloring resolves
    /// here, the throw can precede team-assignment visibility.
    pub fn destroyed(
        &mut self,
        projectile: i64,
        kind: ProjectileKind,
        thrower: Option<&Actor>,
        trajectory: &[TrajectorySample],
        tick: u32,
    ) -> Option<GrenadeTrail> {
        let mut kind = kind.grenade_kind()?;
        if kind == GrenadeKind::Smoke {
            kind = match thrower.and_then(|t| t.team) {
                Some(Team::Ct) => GrenadeKind::SmokeCt,
                Some(Team::T) => GrenadeKind::SmokeT,
                None => GrenadeKind::Smoke,
            };
        }

        let info = match self.pending.remove(&projectile) {
            Some(info) => info,
            None => {
                tracing::trace!(projectile, "destroy without recorded throw, skipping");
                return None;
            }
        };
        if trajectory.len() < 2 {
            return None;
        }

        Some(GrenadeTrail {
            start_tick: info.tick,
            end_tick: tick,
            kind,
            thrower: info.thrower,
            points: subsample(trajectory, info.tick),
        })
    }
}

/// Subsamples a raw flight path to at most [`MAX_TRAIL_POINTS`] points with a
/// uniform stride, always keeping the final raw sample so the landing
/// position survives quantization.
fn subsample(trajectory: &[TrajectorySample], start_tick: u32) -> Vec<[i32; 3]> {
    let step = trajectory.len().div_ceil(MAX_TRAIL_POINTS).max(1);

    let mut points = Vec::with_capacity(MAX_TRAIL_POINTS);
    for sample in trajectory.iter().step_by(step) {
        points.push(trail_point(sample, start_tick));
    }

    let last = trail_point(&trajectory[trajectory.len() - 1], start_tick);
    if points.last().map(|p| p[0]) != Some(last[0]) {
        // The stride skipped the landing sample; make room for it if needed.
        if points.len() == MAX_TRAIL_POINTS {
            points.pop();
        }
        points.push(last);
    }
    points
}

fn trail_point(sample: &TrajectorySample, start_tick: u32) -> [i32; 3] {
    let offset =
        ((sample.time_seconds * common::TICK_RATE as f64).round() as i64 - start_tick as i64).max(0);
    [
        offset as i32,
        sample.position.x.round() as i32,
        sample.position.y.round() as i32,
    ]
}

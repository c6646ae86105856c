//! Scene construction: turns (data set, playback state) into an ordered list
//! of draw instructions. The op order inside a [`Scene`] is the painter's
//! algorithm; reordering any layer changes what occludes what.

use common::maps::{LowerLevel, MapMeta};
use common::{BombEventKind, DemoData, GrenadeKind, Round};

use crate::feed;
use crate::interp::{self, InterpolatedPlayer};
use crate::playback::Playback;
use crate::viewport::{active_level, RadarLevel, Transform};

/// Lifetime of the flash/HE burst ring, in ticks.
pub const BURST_RING_TICKS: f64 = 32.0;
/// How long a kill marker keeps flashing at the victim's position, in ticks.
pub const KILL_FLASH_TICKS: f64 = 96.0;
/// How long a landed throw arc keeps fading, in ticks.
pub const TRAIL_FADE_TICKS: f64 = 128.0;
/// How long a shot renders a muzzle ring on the shooter, in ticks.
pub const MUZZLE_FLASH_TICKS: f64 = 8.0;

/// World-space radii of the area effects.
pub const SMOKE_RADIUS: f64 = 144.0;
pub const FIRE_RADIUS: f64 = 120.0;
/// World-space radius a burst ring grows to.
pub const BURST_RADIUS: f64 = 110.0;

/// Canvas-space pick radius for the hover tooltip.
pub const HOVER_RADIUS: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

pub const CT_COLOR: Color = Color::rgb(0x5a, 0x8b, 0xd6);
pub const T_COLOR: Color = Color::rgb(0xd6, 0xa8, 0x4a);

const SMOKE_GRAY: Color = Color::rgb(0xb4, 0xb4, 0xb4);
const SMOKE_CT: Color = Color::rgb(0x8c, 0xa8, 0xd0);
const SMOKE_T: Color = Color::rgb(0xd0, 0xb8, 0x84);
const FIRE_ORANGE: Color = Color::rgb(0xe8, 0x6a, 0x17);
const FLASH_WHITE: Color = Color::rgb(0xf2, 0xf2, 0xf2);
const HE_RED: Color = Color::rgb(0xd8, 0x4a, 0x38);

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Radar {
        level: RadarLevel,
    },
    /// Filled circle for an active smoke or fire.
    AreaEffect {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
    },
    /// Throw arc polyline, already truncated to the cursor position.
    Trail {
        points: Vec<(f64, f64)>,
        color: Color,
    },
    /// Expanding ring for an instantaneous detonation.
    BurstRing {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
    },
    BombMarker {
        x: f64,
        y: f64,
        planted: bool,
    },
    /// `age` is normalized into [0, 1] over the marker's lifetime.
    KillFlash {
        x: f64,
        y: f64,
        age: f64,
    },
    DeadMarker {
        x: f64,
        y: f64,
        color: Color,
    },
    Player {
        x: f64,
        y: f64,
        yaw: f64,
        color: Color,
        hp: i32,
        label: String,
        muzzle: bool,
        carrier: bool,
    },
    FeedLine {
        row: usize,
        text: String,
    },
    Tooltip {
        x: f64,
        y: f64,
        lines: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub ops: Vec<DrawOp>,
}

pub struct SceneInput<'a> {
    pub data: &'a DemoData,
    pub meta: MapMeta,
    pub lower: Option<LowerLevel>,
    pub playback: &'a Playback,
    /// Canvas edge length in pixels (the canvas is square, like the radar).
    pub canvas: f64,
    /// Pointer position in canvas space, if hovering.
    pub hover: Option<(f64, f64)>,
}

pub fn build(input: &SceneInput<'_>) -> Scene {
    let mut scene = Scene::default();

    let Some(round) = input.data.rounds.get(input.playback.round()) else {
        scene.ops.push(DrawOp::Radar {
            level: RadarLevel::Upper,
        });
        return scene;
    };

    let cursor = input.playback.cursor();
    let tick = interp::tick_at(round, cursor);
    let players = interp::players_at(round, cursor);
    let tr = Transform {
        meta: input.meta,
        canvas: input.canvas,
        camera: input.playback.camera,
    };

    scene.ops.push(DrawOp::Radar {
        level: active_level(input.lower.as_ref(), &players, input.playback.level_override),
    });

    push_area_effects(&mut scene, round, tick, &tr);
    push_trails(&mut scene, round, tick, &tr);
    push_burst_rings(&mut scene, round, tick, &tr);
    push_bomb(&mut scene, round, tick, &tr);
    push_kill_flashes(&mut scene, round, tick, &tr);
    push_players(&mut scene, input.data, round, &players, tick, &tr);

    for (row, entry) in feed::visible(input.data, round, tick).iter().enumerate() {
        scene.ops.push(DrawOp::FeedLine {
            row,
            text: entry.text.clone(),
        });
    }

    if let Some(hover) = input.hover {
        push_tooltip(&mut scene, input.data, &players, hover, &tr);
    }

    scene
}

fn side_color(player: &InterpolatedPlayer) -> Color {
    if player.is_t_side() {
        T_COLOR
    } else {
        CT_COLOR
    }
}

fn push_area_effects(scene: &mut Scene, round: &Round, tick: f64, tr: &Transform) {
    for grenade in round.grenades.iter() {
        if grenade.end_tick == 0 {
            continue; // instantaneous, rendered as a burst ring
        }
        if tick < grenade.start_tick as f64 || tick > grenade.end_tick as f64 {
            continue;
        }
        let (color, radius) = match grenade.kind {
            GrenadeKind::Smoke => (SMOKE_GRAY, SMOKE_RADIUS),
            GrenadeKind::SmokeCt => (SMOKE_CT, SMOKE_RADIUS),
            GrenadeKind::SmokeT => (SMOKE_T, SMOKE_RADIUS),
            GrenadeKind::Fire => (FIRE_ORANGE, FIRE_RADIUS),
            GrenadeKind::Flash | GrenadeKind::He => continue,
        };
        let (x, y) = tr.world_to_canvas(grenade.x as f64, grenade.y as f64);
        scene.ops.push(DrawOp::AreaEffect {
            x,
            y,
            radius: tr.world_len(radius),
            color: color.with_alpha(0.55),
        });
    }
}

fn push_trails(scene: &mut Scene, round: &Round, tick: f64, tr: &Transform) {
    for trail in round.trails.iter() {
        let start = trail.start_tick as f64;
        let end = trail.end_tick as f64;
        if tick < start || tick > end + TRAIL_FADE_TICKS {
            continue;
        }
        let alpha = if tick <= end {
            1.0
        } else {
            1.0 - (tick - end) / TRAIL_FADE_TICKS
        };
        // Only the part of the arc flown so far.
        let elapsed = tick - start;
        let points: Vec<(f64, f64)> = trail
            .points
            .iter()
            .filter(|p| p[0] as f64 <= elapsed)
            .map(|p| tr.world_to_canvas(p[1] as f64, p[2] as f64))
            .collect();
        if points.len() < 2 {
            continue;
        }
        scene.ops.push(DrawOp::Trail {
            points,
            color: trail_color(trail.kind).with_alpha(alpha * 0.8),
        });
    }
}

fn trail_color(kind: GrenadeKind) -> Color {
    match kind {
        GrenadeKind::Smoke => SMOKE_GRAY,
        GrenadeKind::SmokeCt => SMOKE_CT,
        GrenadeKind::SmokeT => SMOKE_T,
        GrenadeKind::Flash => FLASH_WHITE,
        GrenadeKind::He => HE_RED,
        GrenadeKind::Fire => FIRE_ORANGE,
    }
}

fn push_burst_rings(scene: &mut Scene, round: &Round, tick: f64, tr: &Transform) {
    for grenade in round.grenades.iter().filter(|g| g.end_tick == 0) {
        let age = tick - grenade.start_tick as f64;
        if !(0.0..=BURST_RING_TICKS).contains(&age) {
            continue;
        }
        let t = age / BURST_RING_TICKS;
        let color = match grenade.kind {
            GrenadeKind::Flash => FLASH_WHITE,
            _ => HE_RED,
        };
        let (x, y) = tr.world_to_canvas(grenade.x as f64, grenade.y as f64);
        scene.ops.push(DrawOp::BurstRing {
            x,
            y,
            radius: tr.world_len(BURST_RADIUS * t),
            color: color.with_alpha(1.0 - t),
        });
    }
}

fn push_bomb(scene: &mut Scene, round: &Round, tick: f64, tr: &Transform) {
    let mut planted = false;
    let mut last = None;
    for action in round.bomb.iter().filter(|b| (b.tick as f64) <= tick) {
        match action.action {
            BombEventKind::Planted => planted = true,
            BombEventKind::Defused | BombEventKind::Exploded => planted = false,
            _ => {}
        }
        last = Some(action);
    }
    if let Some(action) = last {
        let (x, y) = tr.world_to_canvas(action.x as f64, action.y as f64);
        scene.ops.push(DrawOp::BombMarker { x, y, planted });
    }
}

fn push_kill_flashes(scene: &mut Scene, round: &Round, tick: f64, tr: &Transform) {
    for kill in round.kills.iter() {
        let age = tick - kill.tick as f64;
        if !(0.0..=KILL_FLASH_TICKS).contains(&age) {
            continue;
        }
        let (x, y) = tr.world_to_canvas(kill.victim_x as f64, kill.victim_y as f64);
        scene.ops.push(DrawOp::KillFlash {
            x,
            y,
            age: age / KILL_FLASH_TICKS,
        });
    }
}

fn push_players(
    scene: &mut Scene,
    data: &DemoData,
    round: &Round,
    players: &[InterpolatedPlayer],
    tick: f64,
    tr: &Transform,
) {
    // Dead below alive, so live markers stay legible in a pile.
    for player in players.iter().filter(|p| p.is_dead()) {
        let (x, y) = tr.world_to_canvas(player.x, player.y);
        scene.ops.push(DrawOp::DeadMarker {
            x,
            y,
            color: side_color(player).with_alpha(0.6),
        });
    }
    for player in players.iter().filter(|p| !p.is_dead()) {
        let (x, y) = tr.world_to_canvas(player.x, player.y);
        let muzzle = round.shots.iter().any(|s| {
            s.player == player.idx && {
                let age = tick - s.tick as f64;
                (0.0..=MUZZLE_FLASH_TICKS).contains(&age)
            }
        });
        let label = data
            .players
            .get(player.idx as usize)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        scene.ops.push(DrawOp::Player {
            x,
            y,
            yaw: player.yaw,
            color: side_color(player),
            hp: player.hp.round() as i32,
            label,
            muzzle,
            carrier: player.carries_bomb(),
        });
    }
}

fn push_tooltip(
    scene: &mut Scene,
    data: &DemoData,
    players: &[InterpolatedPlayer],
    hover: (f64, f64),
    tr: &Transform,
) {
    let mut best: Option<(f64, &InterpolatedPlayer, (f64, f64))> = None;
    for player in players.iter().filter(|p| !p.is_dead()) {
        let pos = tr.world_to_canvas(player.x, player.y);
        let dist = ((pos.0 - hover.0).powi(2) + (pos.1 - hover.1).powi(2)).sqrt();
        if dist <= HOVER_RADIUS && best.map(|(d, _, _)| dist < d).unwrap_or(true) {
            best = Some((dist, player, pos));
        }
    }
    if let Some((_, player, (x, y))) = best {
        let name = data
            .players
            .get(player.idx as usize)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "?".to_owned());
        scene.ops.push(DrawOp::Tooltip {
            x,
            y,
            lines: vec![name, format!("{} HP", player.hp.round() as i32)],
        });
    }
}

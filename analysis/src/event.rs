//! The decoded notification stream consumed by the aggregator.
//!
//! The demo decoder is an external collaborator; it hands us already-parsed,
//! typed events in tick order. Keeping this a closed enum means the
//! aggregator's single `match` is checked exhaustively by the compiler, there
//! is no per-event-type handler registration.

use common::Team;

#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A player reference carried inside an event, with the state the decoder saw
/// at the moment the event fired.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Actor {
    pub id: u64,
    pub name: String,
    pub team: Option<Team>,
    pub position: Vec3,
}

/// One raw sample of a projectile's flight path.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrajectorySample {
    /// Seconds since demo start, as reported by the decoder.
    pub time_seconds: f64,
    pub position: Vec3,
}

/// Grenade equipment classes the decoder can report on a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ProjectileKind {
    Smoke,
    Flash,
    He,
    Molotov,
    Incendiary,
    Decoy,
}

impl ProjectileKind {
    /// The wire grenade type for this equipment, `None` for untracked kinds.
    pub fn grenade_kind(self) -> Option<common::GrenadeKind> {
        match self {
            Self::Smoke => Some(common::GrenadeKind::Smoke),
            Self::Flash => Some(common::GrenadeKind::Flash),
            Self::He => Some(common::GrenadeKind::He),
            Self::Molotov | Self::Incendiary => Some(common::GrenadeKind::Fire),
            Self::Decoy => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Event {
    RoundStart {
        warmup: bool,
    },
    FreezeTimeEnd,
    RoundEnd {
        winner: Option<Team>,
    },
    Kill {
        attacker: Option<Actor>,
        victim: Option<Actor>,
        assister: Option<Actor>,
        weapon: String,
        headshot: bool,
        flash_assist: bool,
    },
    PlayerHurt {
        attacker: Option<Actor>,
        victim: Option<Actor>,
        health_damage: i32,
        team_damage: bool,
    },
    BombPlantBegin {
        player: Option<Actor>,
        site: char,
    },
    BombPlanted {
        player: Option<Actor>,
        site: char,
    },
    BombDefuseBegin {
        player: Option<Actor>,
    },
    BombDefused {
        player: Option<Actor>,
        site: char,
    },
    BombExploded,
    BombDropped {
        player: Option<Actor>,
    },
    BombPickedUp {
        player: Option<Actor>,
    },
    SmokeStart {
        position: Vec3,
        thrower: Option<Actor>,
    },
    HeExplode {
        position: Vec3,
    },
    FlashExplode {
        position: Vec3,
    },
    IncendiaryStart {
        position: Vec3,
    },
    ProjectileThrown {
        projectile: i64,
        thrower: Option<Actor>,
    },
    ProjectileDestroyed {
        projectile: i64,
        kind: ProjectileKind,
        thrower: Option<Actor>,
        trajectory: Vec<TrajectorySample>,
    },
    WeaponFire {
        shooter: Option<Actor>,
    },
}

/// The playing participants' state at one decoded frame boundary, used to
/// capture position keyframes.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct WorldSnapshot {
    pub players: Vec<LivePlayer>,
    pub bomb_carrier: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LivePlayer {
    pub id: u64,
    pub name: String,
    pub team: Option<Team>,
    pub alive: bool,
    pub health: i32,
    pub position: Vec3,
    pub yaw: f64,
}

/// One element of the decoder's output sequence: game events interleaved with
/// frame boundaries (the point where the original source polled its tick
/// accessor and game state).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum StreamItem {
    GameEvent { tick: u32, event: Event },
    FrameEnd { tick: u32, world: WorldSnapshot },
}

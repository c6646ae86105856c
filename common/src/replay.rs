//! Compact positional-array wire types.
//!
//! Every type here serializes as a flat JSON array instead of a keyed object
//! to keep the embedded data set small. The decoder indexes by position, so
//! the element order of each array is part of the contract and must never
//! change.

use serde::de::Error as _;

/// Flag bits carried in [`PlayerState::flags`].
///
/// Bits 0-1: 0=CT+alive, 1=CT+dead, 2=T+alive, 3=T+dead. Bit 2: bomb carrier.
pub const FLAG_DEAD: i32 = 1;
pub const FLAG_T_SIDE: i32 = 2;
pub const FLAG_CARRIER: i32 = 4;

/// One sampled tick's snapshot of all player states.
///
/// Wire form: `[tick, [[idx,flags,hp,x,y,z,yaw], ...]]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub tick: u32,
    pub players: Vec<PlayerState>,
}

impl serde::Serialize for Frame {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        (self.tick, &self.players).serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Frame {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (tick, players) = <(u32, Vec<PlayerState>)>::deserialize(deserializer)?;
        Ok(Self { tick, players })
    }
}

/// One player's state at a sampled tick.
///
/// Wire form: `[idx, flags, hp, x, y, z, yaw]`, all integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    pub idx: i32,
    pub flags: i32,
    pub hp: i32,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub yaw: i32,
}

impl PlayerState {
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

impl serde::Serialize for PlayerState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        [self.idx, self.flags, self.hp, self.x, self.y, self.z, self.yaw].serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for PlayerState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let [idx, flags, hp, x, y, z, yaw] = <[i32; 7]>::deserialize(deserializer)?;
        Ok(Self {
            idx,
            flags,
            hp,
            x,
            y,
            z,
            yaw,
        })
    }
}

/// Wire form: `[tick, atkIdx, vicIdx, weapon, hs, atkX, atkY, vicX, vicY, dmg]`.
///
/// `dmg` is the cumulative damage the attacker had dealt the victim this round
/// up to and including the kill tick, not just the lethal hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kill {
    pub tick: u32,
    pub attacker: i32,
    pub victim: i32,
    pub weapon: String,
    pub headshot: bool,
    pub attacker_x: i32,
    pub attacker_y: i32,
    pub victim_x: i32,
    pub victim_y: i32,
    pub dmg: i32,
}

impl serde::Serialize for Kill {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        (
            self.tick,
            self.attacker,
            self.victim,
            &self.weapon,
            self.headshot as u8,
            self.attacker_x,
            self.attacker_y,
            self.victim_x,
            self.victim_y,
            self.dmg,
        )
            .serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Kill {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (tick, attacker, victim, weapon, hs, attacker_x, attacker_y, victim_x, victim_y, dmg) =
            <(u32, i32, i32, String, u8, i32, i32, i32, i32, i32)>::deserialize(deserializer)?;
        Ok(Self {
            tick,
            attacker,
            victim,
            weapon,
            headshot: hs != 0,
            attacker_x,
            attacker_y,
            victim_x,
            victim_y,
            dmg,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BombEventKind {
    PlantBegin = 0,
    Planted = 1,
    DefuseBegin = 2,
    Defused = 3,
    Exploded = 4,
    Dropped = 5,
    PickedUp = 6,
}

impl TryFrom<u8> for BombEventKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        Ok(match value {
            0 => Self::PlantBegin,
            1 => Self::Planted,
            2 => Self::DefuseBegin,
            3 => Self::Defused,
            4 => Self::Exploded,
            5 => Self::Dropped,
            6 => Self::PickedUp,
            other => return Err(other),
        })
    }
}

/// Wire form: `[tick, action, x, y, site]` with action in `0..=6`.
///
/// `x`/`y` are the last-known bomb position; `site` is `"A"`, `"B"` or `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BombAction {
    pub tick: u32,
    pub action: BombEventKind,
    pub x: i32,
    pub y: i32,
    pub site: String,
}

impl serde::Serialize for BombAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        (self.tick, self.action as u8, self.x, self.y, &self.site).serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for BombAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (tick, action, x, y, site) = <(u32, u8, i32, i32, String)>::deserialize(deserializer)?;
        let action = BombEventKind::try_from(action)
            .map_err(|v| D::Error::custom(format!("bomb action {} out of range", v)))?;
        Ok(Self {
            tick,
            action,
            x,
            y,
            site,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GrenadeKind {
    Smoke = 0,
    Flash = 1,
    He = 2,
    Fire = 3,
    SmokeCt = 4,
    SmokeT = 5,
}

impl GrenadeKind {
    pub fn is_smoke(self) -> bool {
        matches!(self, Self::Smoke | Self::SmokeCt | Self::SmokeT)
    }
}

impl TryFrom<u8> for GrenadeKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        Ok(match value {
            0 => Self::Smoke,
            1 => Self::Flash,
            2 => Self::He,
            3 => Self::Fire,
            4 => Self::SmokeCt,
            5 => Self::SmokeT,
            other => return Err(other),
        })
    }
}

/// A detonation or area effect on the ground.
///
/// Wire form: `[startTick, endTick, type, x, y]`; `endTick == 0` marks an
/// instantaneous effect (flash/HE) whose display duration is a viewer
/// constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grenade {
    pub start_tick: u32,
    pub end_tick: u32,
    pub kind: GrenadeKind,
    pub x: i32,
    pub y: i32,
}

impl serde::Serialize for Grenade {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        (self.start_tick, self.end_tick, self.kind as u8, self.x, self.y).serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Grenade {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (start_tick, end_tick, kind, x, y) =
            <(u32, u32, u8, i32, i32)>::deserialize(deserializer)?;
        let kind = GrenadeKind::try_from(kind)
            .map_err(|v| D::Error::custom(format!("grenade type {} out of range", v)))?;
        Ok(Self {
            start_tick,
            end_tick,
            kind,
            x,
            y,
        })
    }
}

/// Wire form: `[tick, playerIdx]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shot {
    pub tick: u32,
    pub player: i32,
}

impl serde::Serialize for Shot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        (self.tick, self.player).serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Shot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (tick, player) = <(u32, i32)>::deserialize(deserializer)?;
        Ok(Self { tick, player })
    }
}

/// The throw arc of a grenade projectile.
///
/// Wire form: `[startTick, endTick, type, throwerIdx, [[tickOffset,x,y],...]]`
/// with at most 80 points and non-decreasing tick offsets; the final point is
/// always the real landing sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrenadeTrail {
    pub start_tick: u32,
    pub end_tick: u32,
    pub kind: GrenadeKind,
    pub thrower: i32,
    pub points: Vec<[i32; 3]>,
}

impl serde::Serialize for GrenadeTrail {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        (
            self.start_tick,
            self.end_tick,
            self.kind as u8,
            self.thrower,
            &self.points,
        )
            .serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for GrenadeTrail {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (start_tick, end_tick, kind, thrower, points) =
            <(u32, u32, u8, i32, Vec<[i32; 3]>)>::deserialize(deserializer)?;
        let kind = GrenadeKind::try_from(kind)
            .map_err(|v| D::Error::custom(format!("grenade type {} out of range", v)))?;
        Ok(Self {
            start_tick,
            end_tick,
            kind,
            thrower,
            points,
        })
    }
}

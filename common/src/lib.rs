pub mod maps;
pub mod replay;

pub use replay::{BombAction, BombEventKind, Frame, Grenade, GrenadeKind, GrenadeTrail, Kill, PlayerState, Shot};

/// How many ticks between sampled player-position frames.
///
/// At 64 ticks/sec, 16 ticks gives 4 keyframes per second, which the viewer
/// interpolates up to display rate.
pub const SAMPLE_TICKS: u32 = 16;

/// Reference tick rate of the source simulation.
pub const TICK_RATE: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Team {
    Ct,
    T,
}

/// The full replay data set for one match, as embedded into the final artifact.
///
/// `stats` is parallel to `players`: a player's stable index is their position
/// in the `players` list.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct DemoData {
    pub map: String,
    pub players: Vec<PlayerInfo>,
    pub stats: Vec<PlayerStat>,
    pub rounds: Vec<Round>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerInfo {
    pub id: String,
    pub name: String,
}

/// Per-player match aggregate across all retained rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct PlayerStat {
    /// Kills.
    pub k: u32,
    /// Deaths.
    pub d: u32,
    /// Headshot kills.
    pub hs: u32,
    /// Damage dealt, excluding self and team damage.
    pub dmg: u32,
    /// Rounds played, for ADR = dmg / r.
    pub r: u32,
}

/// One competitive round with all its sampled frames and events.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Round {
    #[serde(rename = "n")]
    pub num: u32,
    #[serde(rename = "w", with = "winner_str")]
    pub winner: Option<Team>,
    /// CT score at the START of this round.
    #[serde(rename = "cts")]
    pub ct_score: u32,
    /// T score at the START of this round.
    #[serde(rename = "ts")]
    pub t_score: u32,
    /// Tick at which freeze time ended.
    #[serde(rename = "fe")]
    pub freeze_end: u32,
    pub frames: Vec<Frame>,
    pub kills: Vec<Kill>,
    pub bomb: Vec<BombAction>,
    pub grenades: Vec<Grenade>,
    pub shots: Vec<Shot>,
    /// Raw per-damage-event pairs: `[playerIdx, healthDamage]`.
    pub dmg: Vec<[i32; 2]>,
    pub trails: Vec<GrenadeTrail>,
}

/// `"CT"`, `"T"` or `""` on the wire.
mod winner_str {
    use super::Team;

    pub fn serialize<S>(value: &Option<Team>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(match value {
            Some(Team::Ct) => "CT",
            Some(Team::T) => "T",
            None => "",
        })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Team>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <std::borrow::Cow<'de, str> as serde::Deserialize>::deserialize(deserializer)?;
        match raw.as_ref() {
            "CT" => Ok(Some(Team::Ct)),
            "T" => Ok(Some(Team::T)),
            "" => Ok(None),
            other => Err(serde::de::Error::custom(format!(
                "unknown winner tag {:?}",
                other
            ))),
        }
    }
}

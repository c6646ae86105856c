//! The event-feed overlay: a merged, time-filtered view over the round's
//! kill, bomb and grenade streams.

use common::{BombEventKind, DemoData, GrenadeKind, Round};

/// Maximum visible feed entries.
pub const FEED_CAP: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub tick: u32,
    pub text: String,
}

/// The entries visible at `tick`: everything that has happened so far,
/// newest first, capped at [`FEED_CAP`].
pub fn visible(data: &DemoData, round: &Round, tick: f64) -> Vec<FeedEntry> {
    let name = |idx: i32| {
        data.players
            .get(idx as usize)
            .map(|p| p.name.as_str())
            .unwrap_or("?")
    };

    let mut entries = Vec::new();
    for kill in round.kills.iter().filter(|k| (k.tick as f64) <= tick) {
        let hs = if kill.headshot { " HS" } else { "" };
        entries.push(FeedEntry {
            tick: kill.tick,
            text: format!(
                "{} [{}{}] {}",
                name(kill.attacker),
                kill.weapon,
                hs,
                name(kill.victim)
            ),
        });
    }
    for action in round.bomb.iter().filter(|b| (b.tick as f64) <= tick) {
        let text = match action.action {
            BombEventKind::PlantBegin => format!("Planting the bomb ({})", action.site),
            BombEventKind::Planted => format!("Bomb planted ({})", action.site),
            BombEventKind::DefuseBegin => "Defusing the bomb".to_owned(),
            BombEventKind::Defused => "Bomb defused".to_owned(),
            BombEventKind::Exploded => "Bomb exploded".to_owned(),
            BombEventKind::Dropped => "Bomb dropped".to_owned(),
            BombEventKind::PickedUp => "Bomb picked up".to_owned(),
        };
        entries.push(FeedEntry {
            tick: action.tick,
            text,
        });
    }
    for grenade in round
        .grenades
        .iter()
        .filter(|g| (g.start_tick as f64) <= tick)
    {
        let text = match grenade.kind {
            GrenadeKind::Smoke | GrenadeKind::SmokeCt | GrenadeKind::SmokeT => "Smoke deployed",
            GrenadeKind::Flash => "Flashbang detonated",
            GrenadeKind::He => "HE detonated",
            GrenadeKind::Fire => "Fire started",
        };
        entries.push(FeedEntry {
            tick: grenade.start_tick,
            text: text.to_owned(),
        });
    }

    // Stable sort: entries sharing a tick keep stream order.
    entries.sort_by(|a, b| b.tick.cmp(&a.tick));
    entries.truncate(FEED_CAP);
    entries
}

/// Caches the visible subset so the overlay is only re-rendered when its
/// identity actually changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    entries: Vec<FeedEntry>,
}

impl Feed {
    /// Recomputes the visible entries; returns true when they changed.
    pub fn update(&mut self, data: &DemoData, round: &Round, tick: f64) -> bool {
        let next = visible(data, round, tick);
        if next == self.entries {
            return false;
        }
        self.entries = next;
        true
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }
}

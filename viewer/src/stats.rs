//! Round-scoped statistics panel data.

use common::Round;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundStatRow {
    pub player: i32,
    pub kills: u32,
    pub deaths: u32,
    pub hs_percent: f64,
    pub damage: u32,
}

/// The stats table for the displayed round, derived strictly from that
/// round's kill and damage records, never from match-wide aggregates.
/// Recomputed whenever the active round changes.
pub fn round_stats(round: &Round) -> Vec<RoundStatRow> {
    #[derive(Default)]
    struct Acc {
        kills: u32,
        deaths: u32,
        headshots: u32,
        damage: u32,
    }

    let mut acc = std::collections::BTreeMap::<i32, Acc>::new();
    for kill in round.kills.iter() {
        let attacker = acc.entry(kill.attacker).or_default();
        attacker.kills += 1;
        if kill.headshot {
            attacker.headshots += 1;
        }
        acc.entry(kill.victim).or_default().deaths += 1;
    }
    for [player, damage] in round.dmg.iter() {
        acc.entry(*player).or_default().damage += (*damage).max(0) as u32;
    }

    let mut rows: Vec<RoundStatRow> = acc
        .into_iter()
        .map(|(player, a)| RoundStatRow {
            player,
            kills: a.kills,
            deaths: a.deaths,
            hs_percent: if a.kills > 0 {
                a.headshots as f64 / a.kills as f64 * 100.0
            } else {
                0.0
            },
            damage: a.damage,
        })
        .collect();
    rows.sort_by(|a, b| b.damage.cmp(&a.damage).then(a.player.cmp(&b.player)));
    rows
}

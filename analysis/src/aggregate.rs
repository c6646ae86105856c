//! The event aggregation engine: consumes the decoded notification stream and
//! produces the compact per-round record set.

use common::replay::{FLAG_CARRIER, FLAG_DEAD, FLAG_T_SIDE};
use common::{
    BombAction, BombEventKind, DemoData, Frame, Grenade, GrenadeKind, Kill, PlayerInfo,
    PlayerState, PlayerStat, Round, Shot, Team, SAMPLE_TICKS,
};

use crate::damage::DamageAttribution;
use crate::event::{Actor, Event, ProjectileKind, StreamItem, TrajectorySample, Vec3, WorldSnapshot};
use crate::grenades::{GrenadeTracker, FIRE_TICKS, SMOKE_TICKS};
use crate::sampling::SamplingController;

/// Rounds with fewer captured frames than this are degenerate (aborted,
/// instantly surrendered) and are dropped from the output.
pub const MIN_ROUND_FRAMES: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum AggregateError<E> {
    /// The decoder collaborator failed; aggregation cannot proceed.
    #[error("decode event stream: {0}")]
    Source(E),
    #[error(transparent)]
    Map(#[from] common::maps::MapError),
}

/// Runs the full aggregation over a decoded stream.
///
/// Stream errors are fatal and abort the whole run; there is no partial
/// success for a single match.
pub fn aggregate<I, E>(map_name: &str, stream: I) -> Result<DemoData, AggregateError<E>>
where
    I: IntoIterator<Item = Result<StreamItem, E>>,
{
    let mut aggregator = Aggregator::new();
    for item in stream {
        match item.map_err(AggregateError::Source)? {
            StreamItem::GameEvent { tick, event } => aggregator.handle_event(tick, &event),
            StreamItem::FrameEnd { tick, world } => aggregator.observe_tick(tick, &world),
        }
    }
    Ok(aggregator.finish(map_name)?)
}

/// First-seen player registry plus the stats list kept parallel to it.
///
/// An index is assigned the first time an identity is seen and never reused
/// or reassigned for the lifetime of the match.
#[derive(Debug, Default)]
struct PlayerTable {
    players: Vec<PlayerInfo>,
    stats: Vec<PlayerStat>,
    index: std::collections::HashMap<u64, usize>,
}

impl PlayerTable {
    fn index_of(&mut self, id: u64, name: &str) -> usize {
        match self.index.entry(id) {
            std::collections::hash_map::Entry::Occupied(entry) => {
                let idx = *entry.get();
                // Players can rename mid-match, keep the latest display name.
                if self.players[idx].name != name {
                    self.players[idx].name = name.to_owned();
                }
                idx
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                let idx = self.players.len();
                entry.insert(idx);
                self.players.push(PlayerInfo {
                    id: id.to_string(),
                    name: name.to_owned(),
                });
                self.stats.push(PlayerStat::default());
                idx
            }
        }
    }

    fn actor_idx(&mut self, actor: &Actor) -> usize {
        self.index_of(actor.id, &actor.name)
    }
}

/// All transient state scoped to one open round, dropped wholesale at close.
#[derive(Debug, Default)]
struct RoundAccumulator {
    round: Round,
    sampling: SamplingController,
    damage: DamageAttribution,
    grenades: GrenadeTracker,
    last_shot: std::collections::HashMap<usize, u32>,
    bomb_x: i32,
    bomb_y: i32,
    bomb_site: String,
}

/// Turns per-tick/per-event notifications into round-scoped records. At most
/// one round is open at any time; events observed with no open round are
/// dropped, never an error (the source emits out-of-round telemetry around
/// warmup and end-of-demo cleanup).
#[derive(Debug, Default)]
pub struct Aggregator {
    table: PlayerTable,
    rounds: Vec<Round>,
    ct_score: u32,
    t_score: u32,
    round_num: u32,
    current: Option<RoundAccumulator>,
    last_world: WorldSnapshot,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes one decoded notification, `tick` being the source tick counter
    /// at the moment it fired.
    pub fn handle_event(&mut self, tick: u32, event: &Event) {
        match event {
            Event::RoundStart { warmup } => self.start_round(*warmup),
            Event::FreezeTimeEnd => self.freeze_time_end(tick),
            Event::RoundEnd { winner } => self.close_round(tick, *winner),
            Event::Kill {
                attacker,
                victim,
                weapon,
                headshot,
                ..
            } => self.on_kill(tick, attacker.as_ref(), victim.as_ref(), weapon, *headshot),
            Event::PlayerHurt {
                attacker,
                victim,
                health_damage,
                team_damage,
            } => self.on_hurt(attacker.as_ref(), victim.as_ref(), *health_damage, *team_damage),
            Event::BombPlantBegin { player, site } => {
                self.on_bomb(tick, BombEventKind::PlantBegin, player.as_ref(), Some(*site))
            }
            Event::BombPlanted { player, site } => {
                self.on_bomb(tick, BombEventKind::Planted, player.as_ref(), Some(*site))
            }
            Event::BombDefuseBegin { player } => {
                self.on_bomb(tick, BombEventKind::DefuseBegin, player.as_ref(), None)
            }
            Event::BombDefused { player, site } => {
                self.on_bomb(tick, BombEventKind::Defused, player.as_ref(), Some(*site))
            }
            Event::BombExploded => self.on_bomb(tick, BombEventKind::Exploded, None, None),
            Event::BombDropped { player } => {
                self.on_bomb(tick, BombEventKind::Dropped, player.as_ref(), None)
            }
            Event::BombPickedUp { player } => {
                self.on_bomb(tick, BombEventKind::PickedUp, player.as_ref(), None)
            }
            Event::SmokeStart { position, thrower } => {
                self.on_smoke(tick, *position, thrower.as_ref())
            }
            Event::HeExplode { position } => self.on_instant(tick, *position, GrenadeKind::He),
            Event::FlashExplode { position } => {
                self.on_instant(tick, *position, GrenadeKind::Flash)
            }
            Event::IncendiaryStart { position } => self.on_fire(tick, *position),
            Event::ProjectileThrown { projectile, thrower } => {
                self.on_thrown(tick, *projectile, thrower.as_ref())
            }
            Event::ProjectileDestroyed {
                projectile,
                kind,
                thrower,
                trajectory,
            } => self.on_destroyed(tick, *projectile, *kind, thrower.as_ref(), trajectory),
            Event::WeaponFire { shooter } => self.on_shot(tick, shooter.as_ref()),
        }
    }

    /// Called at every decoded frame boundary; captures a position keyframe
    /// when the sampling conditions hold.
    pub fn observe_tick(&mut self, tick: u32, world: &WorldSnapshot) {
        self.last_world = world.clone();

        let Some(cur) = self.current.as_mut() else {
            return;
        };
        if !cur.sampling.should_capture(tick) {
            return;
        }
        let frame = capture_frame(&mut self.table, tick, world);
        if frame.players.is_empty() {
            return;
        }
        cur.round.frames.push(frame);
        cur.sampling.mark_captured(tick);
    }

    /// Consumes the engine; fails when the map has no coordinate metadata,
    /// since the viewer could not place anything.
    pub fn finish(self, map_name: &str) -> Result<DemoData, common::maps::MapError> {
        common::maps::lookup(map_name)?;

        tracing::info!(
            map = map_name,
            rounds = self.rounds.len(),
            players = self.table.players.len(),
            "aggregation finished"
        );

        Ok(DemoData {
            map: map_name.to_owned(),
            players: self.table.players,
            stats: self.table.stats,
            rounds: self.rounds,
        })
    }

    fn start_round(&mut self, warmup: bool) {
        if warmup {
            tracing::trace!("ignoring warmup round start");
            return;
        }
        self.round_num += 1;
        self.current = Some(RoundAccumulator {
            round: Round {
                num: self.round_num,
                ct_score: self.ct_score,
                t_score: self.t_score,
                ..Round::default()
            },
            ..RoundAccumulator::default()
        });
    }

    fn freeze_time_end(&mut self, tick: u32) {
        let Some(cur) = self.current.as_mut() else {
            return;
        };
        cur.sampling.freeze_ended(tick);
        cur.round.freeze_end = tick;
    }

    fn close_round(&mut self, tick: u32, winner: Option<Team>) {
        let Some(mut cur) = self.current.take() else {
            tracing::trace!(tick, "round end without open round, dropping");
            return;
        };
        cur.round.winner = winner;
        match winner {
            Some(Team::Ct) => self.ct_score += 1,
            Some(Team::T) => self.t_score += 1,
            None => {}
        }

        // One terminal frame at the end tick so the final kill or the
        // explosion has a rendered position. Skipped when the end tick is the
        // last sampled tick, frame ticks stay strictly increasing.
        if tick > cur.sampling.last_sampled() {
            let frame = capture_frame(&mut self.table, tick, &self.last_world);
            if !frame.players.is_empty() {
                cur.round.frames.push(frame);
            }
        }

        if cur.round.frames.len() < MIN_ROUND_FRAMES {
            tracing::debug!(
                round = cur.round.num,
                frames = cur.round.frames.len(),
                "discarding round without meaningful live play"
            );
            return;
        }

        // Round-played credit, based on who was present in the first frame.
        if let Some(first) = cur.round.frames.first() {
            for state in first.players.iter() {
                if let Some(stat) = self.table.stats.get_mut(state.idx as usize) {
                    stat.r += 1;
                }
            }
        }

        tracing::debug!(
            round = cur.round.num,
            frames = cur.round.frames.len(),
            kills = cur.round.kills.len(),
            "round closed"
        );
        self.rounds.push(cur.round);
    }

    fn on_kill(
        &mut self,
        tick: u32,
        attacker: Option<&Actor>,
        victim: Option<&Actor>,
        weapon: &str,
        headshot: bool,
    ) {
        let Some(cur) = self.current.as_mut() else {
            return;
        };
        let (Some(attacker), Some(victim)) = (attacker, victim) else {
            tracing::trace!(tick, "kill without resolvable combatants, dropping");
            return;
        };

        let ai = self.table.actor_idx(attacker);
        let vi = self.table.actor_idx(victim);
        cur.round.kills.push(Kill {
            tick,
            attacker: ai as i32,
            victim: vi as i32,
            weapon: weapon.to_owned(),
            headshot,
            attacker_x: attacker.position.x.round() as i32,
            attacker_y: attacker.position.y.round() as i32,
            victim_x: victim.position.x.round() as i32,
            victim_y: victim.position.y.round() as i32,
            dmg: cur.damage.total(ai as i32, vi as i32),
        });

        self.table.stats[ai].k += 1;
        if headshot {
            self.table.stats[ai].hs += 1;
        }
        self.table.stats[vi].d += 1;
    }

    fn on_hurt(
        &mut self,
        attacker: Option<&Actor>,
        victim: Option<&Actor>,
        amount: i32,
        team_damage: bool,
    ) {
        let Some(cur) = self.current.as_mut() else {
            return;
        };
        let (Some(attacker), Some(victim)) = (attacker, victim) else {
            return;
        };
        // Self and same-side damage counts neither towards stats nor towards
        // kill-context attribution.
        if team_damage || attacker.id == victim.id || attacker.team == victim.team {
            return;
        }

        let ai = self.table.actor_idx(attacker);
        let vi = self.table.actor_idx(victim);
        self.table.stats[ai].dmg += amount.max(0) as u32;
        cur.round.dmg.push([ai as i32, amount]);
        cur.damage.record(ai as i32, vi as i32, amount);
    }

    fn on_bomb(
        &mut self,
        tick: u32,
        action: BombEventKind,
        player: Option<&Actor>,
        site: Option<char>,
    ) {
        let Some(cur) = self.current.as_mut() else {
            return;
        };
        match action {
            // Anchored to the acting player's position.
            BombEventKind::PlantBegin | BombEventKind::Planted | BombEventKind::Dropped => {
                let Some(player) = player else {
                    return;
                };
                cur.bomb_x = player.position.x.round() as i32;
                cur.bomb_y = player.position.y.round() as i32;
            }
            // Happen at the last-known bomb position but still need an actor.
            BombEventKind::DefuseBegin | BombEventKind::Defused => {
                if player.is_none() {
                    return;
                }
            }
            BombEventKind::Exploded | BombEventKind::PickedUp => {}
        }
        if let Some(site) = site {
            cur.bomb_site = site.to_string();
        }
        cur.round.bomb.push(BombAction {
            tick,
            action,
            x: cur.bomb_x,
            y: cur.bomb_y,
            site: cur.bomb_site.clone(),
        });
    }

    fn on_smoke(&mut self, tick: u32, position: Vec3, thrower: Option<&Actor>) {
        let Some(cur) = self.current.as_mut() else {
            return;
        };
        let kind = match thrower.and_then(|t| t.team) {
            Some(Team::Ct) => GrenadeKind::SmokeCt,
            Some(Team::T) => GrenadeKind::SmokeT,
            None => GrenadeKind::Smoke,
        };
        cur.round.grenades.push(Grenade {
            start_tick: tick,
            end_tick: tick + SMOKE_TICKS,
            kind,
            x: position.x.round() as i32,
            y: position.y.round() as i32,
        });
    }

    fn on_instant(&mut self, tick: u32, position: Vec3, kind: GrenadeKind) {
        let Some(cur) = self.current.as_mut() else {
            return;
        };
        cur.round.grenades.push(Grenade {
            start_tick: tick,
            end_tick: 0,
            kind,
            x: position.x.round() as i32,
            y: position.y.round() as i32,
        });
    }

    fn on_fire(&mut self, tick: u32, position: Vec3) {
        let Some(cur) = self.current.as_mut() else {
            return;
        };
        cur.round.grenades.push(Grenade {
            start_tick: tick,
            end_tick: tick + FIRE_TICKS,
            kind: GrenadeKind::Fire,
            x: position.x.round() as i32,
            y: position.y.round() as i32,
        });
    }

    fn on_thrown(&mut self, tick: u32, projectile: i64, thrower: Option<&Actor>) {
        let Some(cur) = self.current.as_mut() else {
            return;
        };
        let thrower_idx = match thrower {
            Some(actor) => self.table.actor_idx(actor) as i32,
            None => -1,
        };
        cur.grenades.thrown(projectile, tick, thrower_idx);
    }

    fn on_destroyed(
        &mut self,
        tick: u32,
        projectile: i64,
        kind: ProjectileKind,
        thrower: Option<&Actor>,
        trajectory: &[TrajectorySample],
    ) {
        let Some(cur) = self.current.as_mut() else {
            return;
        };
        if let Some(trail) = cur
            .grenades
            .destroyed(projectile, kind, thrower, trajectory, tick)
        {
            cur.round.trails.push(trail);
        }
    }

    fn on_shot(&mut self, tick: u32, shooter: Option<&Actor>) {
        let Some(cur) = self.current.as_mut() else {
            return;
        };
        let Some(shooter) = shooter else {
            return;
        };
        let idx = self.table.actor_idx(shooter);
        // One shot marker per player per sampling window, automatic fire
        // would flood the record otherwise.
        if let Some(last) = cur.last_shot.get(&idx) {
            if tick.saturating_sub(*last) < SAMPLE_TICKS {
                return;
            }
        }
        cur.round.shots.push(Shot {
            tick,
            player: idx as i32,
        });
        cur.last_shot.insert(idx, tick);
    }
}

fn capture_frame(table: &mut PlayerTable, tick: u32, world: &WorldSnapshot) -> Frame {
    let mut frame = Frame {
        tick,
        players: Vec::with_capacity(world.players.len()),
    };
    for player in world.players.iter().filter(|p| p.id != 0) {
        let mut flags = match player.team {
            Some(Team::Ct) => 0,
            _ => FLAG_T_SIDE,
        };
        if !player.alive {
            flags |= FLAG_DEAD;
        }
        if world.bomb_carrier == Some(player.id) {
            flags |= FLAG_CARRIER;
        }
        frame.players.push(PlayerState {
            idx: table.index_of(player.id, &player.name) as i32,
            flags,
            hp: player.health,
            x: player.position.x.round() as i32,
            y: player.position.y.round() as i32,
            z: player.position.z.round() as i32,
            yaw: player.yaw.round() as i32,
        });
    }
    frame
}

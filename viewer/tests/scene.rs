use common::maps::MapMeta;
use common::replay::{BombAction, BombEventKind, Frame, Grenade, GrenadeKind, Kill, PlayerState, Shot};
use common::{DemoData, PlayerInfo, Round};
use viewer::scene::{build, DrawOp, SceneInput, KILL_FLASH_TICKS};
use viewer::{Playback, RadarLevel};

fn meta() -> MapMeta {
    MapMeta {
        pos_x: -3230.0,
        pos_y: 1713.0,
        scale: 5.0,
    }
}

fn state(idx: i32, flags: i32, x: i32) -> PlayerState {
    PlayerState {
        idx,
        flags,
        hp: 100,
        x,
        y: 0,
        z: 0,
        yaw: 0,
    }
}

fn data() -> DemoData {
    let round = Round {
        freeze_end: 640,
        frames: vec![
            Frame {
                tick: 640,
                players: vec![state(0, 0, 0), state(1, 2, 200), state(2, 2 | 1, 400)],
            },
            Frame {
                tick: 656,
                players: vec![state(0, 0, 50), state(1, 2, 250), state(2, 2 | 1, 400)],
            },
        ],
        kills: vec![Kill {
            tick: 630,
            attacker: 0,
            victim: 2,
            weapon: "usp".to_owned(),
            headshot: false,
            attacker_x: 0,
            attacker_y: 0,
            victim_x: 400,
            victim_y: 0,
            dmg: 100,
        }],
        bomb: vec![BombAction {
            tick: 620,
            action: BombEventKind::Planted,
            x: 100,
            y: 100,
            site: "A".to_owned(),
        }],
        grenades: vec![
            Grenade {
                start_tick: 600,
                end_tick: 1752,
                kind: GrenadeKind::SmokeCt,
                x: 300,
                y: 300,
            },
            Grenade {
                start_tick: 635,
                end_tick: 0,
                kind: GrenadeKind::Flash,
                x: 10,
                y: 10,
            },
        ],
        shots: vec![Shot {
            tick: 638,
            player: 0,
        }],
        ..Round::default()
    };
    DemoData {
        map: "de_inferno".to_owned(),
        players: vec![
            PlayerInfo {
                id: "1".to_owned(),
                name: "alice".to_owned(),
            },
            PlayerInfo {
                id: "2".to_owned(),
                name: "bob".to_owned(),
            },
            PlayerInfo {
                id: "3".to_owned(),
                name: "carol".to_owned(),
            },
        ],
        stats: Vec::new(),
        rounds: vec![round],
    }
}

fn input<'a>(data: &'a DemoData, playback: &'a Playback) -> SceneInput<'a> {
    SceneInput {
        data,
        meta: meta(),
        lower: None,
        playback,
        canvas: 1024.0,
        hover: None,
    }
}

/// Index of the first op matching the predicate.
fn find(ops: &[DrawOp], pred: impl Fn(&DrawOp) -> bool) -> Option<usize> {
    ops.iter().position(pred)
}

#[test]
fn layers_follow_painter_order() {
    let data = data();
    let playback = Playback::new(); // cursor at frame 0, tick 640
    let scene = build(&input(&data, &playback));
    let ops = &scene.ops;

    let radar = find(ops, |op| matches!(op, DrawOp::Radar { .. })).unwrap();
    let smoke = find(ops, |op| matches!(op, DrawOp::AreaEffect { .. })).unwrap();
    let burst = find(ops, |op| matches!(op, DrawOp::BurstRing { .. })).unwrap();
    let bomb = find(ops, |op| matches!(op, DrawOp::BombMarker { .. })).unwrap();
    let flash = find(ops, |op| matches!(op, DrawOp::KillFlash { .. })).unwrap();
    let dead = find(ops, |op| matches!(op, DrawOp::DeadMarker { .. })).unwrap();
    let player = find(ops, |op| matches!(op, DrawOp::Player { .. })).unwrap();

    assert!(radar < smoke);
    assert!(smoke < burst);
    assert!(burst < bomb);
    assert!(bomb < flash);
    assert!(flash < dead);
    assert!(dead < player);
}

#[test]
fn radar_op_is_always_first() {
    let data = DemoData::default();
    let playback = Playback::new();
    let scene = build(&input(&data, &playback));
    assert!(matches!(scene.ops[0], DrawOp::Radar { level: RadarLevel::Upper }));
    assert_eq!(scene.ops.len(), 1);
}

#[test]
fn alive_players_render_with_names_and_muzzle() {
    let data = data();
    let playback = Playback::new();
    let scene = build(&input(&data, &playback));

    let alive: Vec<&DrawOp> = scene
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::Player { .. }))
        .collect();
    assert_eq!(alive.len(), 2);

    // Player 0 fired at tick 638, within the muzzle window at 640.
    let DrawOp::Player { label, muzzle, .. } = alive[0] else {
        unreachable!();
    };
    assert_eq!(label, "alice");
    assert!(*muzzle);

    let DrawOp::Player { label, muzzle, .. } = alive[1] else {
        unreachable!();
    };
    assert_eq!(label, "bob");
    assert!(!*muzzle);
}

#[test]
fn dead_player_renders_a_marker_not_a_token() {
    let data = data();
    let playback = Playback::new();
    let scene = build(&input(&data, &playback));

    let dead = scene
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::DeadMarker { .. }))
        .count();
    assert_eq!(dead, 1);
}

#[test]
fn kill_flash_expires() {
    let data = data();
    let mut playback = Playback::new();
    // Cursor 1 = tick 656; the kill at 630 is 26 ticks old, still flashing.
    playback.seek(1.0, &data.rounds[0]);
    let scene = build(&input(&data, &playback));
    assert!(scene
        .ops
        .iter()
        .any(|op| matches!(op, DrawOp::KillFlash { .. })));

    // Age beyond the lifetime: ticks only span 640..656 here, so check the
    // age math directly from the op.
    let Some(DrawOp::KillFlash { age, .. }) = scene
        .ops
        .iter()
        .find(|op| matches!(op, DrawOp::KillFlash { .. }))
    else {
        unreachable!();
    };
    assert!((age - 26.0 / KILL_FLASH_TICKS).abs() < 1e-9);
}

#[test]
fn bomb_marker_tracks_planted_state() {
    let data = data();
    let playback = Playback::new();
    let scene = build(&input(&data, &playback));
    assert!(scene
        .ops
        .iter()
        .any(|op| matches!(op, DrawOp::BombMarker { planted: true, .. })));
}

#[test]
fn smoke_renders_only_while_active() {
    let mut data = data();
    data.rounds[0].grenades[0].start_tick = 700; // after both frames
    let playback = Playback::new();
    let scene = build(&input(&data, &playback));
    assert!(!scene
        .ops
        .iter()
        .any(|op| matches!(op, DrawOp::AreaEffect { .. })));
}

#[test]
fn hover_near_a_player_produces_a_tooltip() {
    let data = data();
    let playback = Playback::new();

    let mut with_hover = input(&data, &playback);
    // Player 0 sits at world (0, 0); locate them on canvas first.
    let probe = build(&with_hover);
    let Some(DrawOp::Player { x, y, .. }) = probe
        .ops
        .iter()
        .find(|op| matches!(op, DrawOp::Player { .. }))
    else {
        unreachable!();
    };
    with_hover.hover = Some((*x + 3.0, *y - 3.0));

    let scene = build(&with_hover);
    let Some(DrawOp::Tooltip { lines, .. }) = scene
        .ops
        .iter()
        .find(|op| matches!(op, DrawOp::Tooltip { .. }))
    else {
        panic!("expected a tooltip");
    };
    assert_eq!(lines[0], "alice");
    assert_eq!(lines[1], "100 HP");

    // Far away: no tooltip.
    with_hover.hover = Some((*x + 500.0, *y));
    let scene = build(&with_hover);
    assert!(!scene
        .ops
        .iter()
        .any(|op| matches!(op, DrawOp::Tooltip { .. })));
}

use pretty_assertions::assert_eq;

use common::{Frame, PlayerState, Round};
use viewer::interp::{frame_window, lerp_angle, players_at, tick_at};

fn state(idx: i32, flags: i32, hp: i32, x: i32, yaw: i32) -> PlayerState {
    PlayerState {
        idx,
        flags,
        hp,
        x,
        y: x * 2,
        z: 0,
        yaw,
    }
}

fn round() -> Round {
    Round {
        frames: vec![
            Frame {
                tick: 640,
                players: vec![state(0, 0, 100, 0, 350), state(1, 2, 100, 400, 0)],
            },
            Frame {
                tick: 656,
                players: vec![state(0, 0, 60, 100, 10), state(1, 2, 100, 500, 90)],
            },
            Frame {
                tick: 672,
                players: vec![state(0, 1, 0, 100, 10)],
            },
        ],
        ..Round::default()
    }
}

#[test]
fn yaw_interpolates_through_the_wrap() {
    assert_eq!(lerp_angle(350.0, 10.0, 0.5), 0.0);
    assert_eq!(lerp_angle(350.0, 10.0, 0.25), 355.0);
    assert_eq!(lerp_angle(10.0, 350.0, 0.5), 0.0);
    assert_eq!(lerp_angle(0.0, 90.0, 0.5), 45.0);
    // Opposite directions take the positive arc.
    assert_eq!(lerp_angle(0.0, 180.0, 0.5), 90.0);
}

#[test]
fn cursor_clamps_to_the_frame_range() {
    let round = round();
    assert_eq!(tick_at(&round, -3.0), 640.0);
    assert_eq!(tick_at(&round, 0.5), 648.0);
    assert_eq!(tick_at(&round, 99.0), 672.0);

    let (lo, hi, t) = frame_window(&round, 2.0).unwrap();
    assert_eq!(lo.tick, 672);
    assert_eq!(hi.tick, 672);
    assert_eq!(t, 0.0);
}

#[test]
fn empty_round_yields_nothing() {
    let round = Round::default();
    assert!(frame_window(&round, 0.0).is_none());
    assert_eq!(tick_at(&round, 0.0), 0.0);
    assert!(players_at(&round, 0.0).is_empty());
}

#[test]
fn positions_and_health_interpolate() {
    let players = players_at(&round(), 0.5);
    let p0 = players.iter().find(|p| p.idx == 0).unwrap();
    assert_eq!(p0.x, 50.0);
    assert_eq!(p0.y, 100.0);
    assert_eq!(p0.hp, 80.0);
    // 350 -> 10 through the wrap.
    assert_eq!(p0.yaw, 0.0);
}

#[test]
fn flags_come_from_the_floor_frame() {
    // Frame 1 has player 0 alive, frame 2 dead.
    let players = players_at(&round(), 1.75);
    let p0 = players.iter().find(|p| p.idx == 0).unwrap();
    assert!(!p0.is_dead());

    let players = players_at(&round(), 2.0);
    let p0 = players.iter().find(|p| p.idx == 0).unwrap();
    assert!(p0.is_dead());
}

#[test]
fn player_missing_from_one_frame_snaps() {
    // Player 1 vanishes between frames 1 and 2; no interpolation partner, so
    // their last known state is used as-is.
    let players = players_at(&round(), 1.5);
    let p1 = players.iter().find(|p| p.idx == 1).unwrap();
    assert_eq!(p1.x, 500.0);
    assert_eq!(p1.yaw, 90.0);
}

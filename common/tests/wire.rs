use pretty_assertions::assert_eq;

use common::replay::{
    BombAction, BombEventKind, Frame, Grenade, GrenadeKind, GrenadeTrail, Kill, PlayerState, Shot,
};
use common::{Round, Team};

#[test]
fn frame_element_order() {
    let frame = Frame {
        tick: 640,
        players: vec![
            PlayerState {
                idx: 0,
                flags: 0,
                hp: 100,
                x: 128,
                y: -300,
                z: 64,
                yaw: 90,
            },
            PlayerState {
                idx: 5,
                flags: 7,
                hp: 0,
                x: -1,
                y: -2,
                z: -3,
                yaw: 359,
            },
        ],
    };

    let json = serde_json::to_string(&frame).unwrap();
    assert_eq!(
        json,
        "[640,[[0,0,100,128,-300,64,90],[5,7,0,-1,-2,-3,359]]]"
    );

    let back: Frame = serde_json::from_str(&json).unwrap();
    assert_eq!(back, frame);
}

#[test]
fn kill_element_order() {
    let kill = Kill {
        tick: 720,
        attacker: 3,
        victim: 7,
        weapon: "ak47".to_owned(),
        headshot: true,
        attacker_x: 100,
        attacker_y: 200,
        victim_x: 300,
        victim_y: 400,
        dmg: 55,
    };

    let json = serde_json::to_string(&kill).unwrap();
    assert_eq!(json, "[720,3,7,\"ak47\",1,100,200,300,400,55]");

    let back: Kill = serde_json::from_str(&json).unwrap();
    assert_eq!(back, kill);
}

#[test]
fn kill_headshot_false_is_zero() {
    let kill = Kill {
        tick: 1,
        attacker: 0,
        victim: 1,
        weapon: "glock".to_owned(),
        headshot: false,
        attacker_x: 0,
        attacker_y: 0,
        victim_x: 0,
        victim_y: 0,
        dmg: 100,
    };

    let json = serde_json::to_string(&kill).unwrap();
    assert_eq!(json, "[1,0,1,\"glock\",0,0,0,0,0,100]");
}

#[test]
fn bomb_action_element_order() {
    let action = BombAction {
        tick: 5000,
        action: BombEventKind::Planted,
        x: 1200,
        y: -450,
        site: "A".to_owned(),
    };

    let json = serde_json::to_string(&action).unwrap();
    assert_eq!(json, "[5000,1,1200,-450,\"A\"]");

    let back: BombAction = serde_json::from_str(&json).unwrap();
    assert_eq!(back, action);
}

#[test]
fn bomb_action_out_of_range_rejected() {
    let err = serde_json::from_str::<BombAction>("[5000,7,0,0,\"\"]").unwrap_err();
    assert!(err.to_string().contains("bomb action 7"));
}

#[test]
fn grenade_element_order() {
    let smoke = Grenade {
        start_tick: 1000,
        end_tick: 2152,
        kind: GrenadeKind::SmokeCt,
        x: 10,
        y: 20,
    };
    assert_eq!(serde_json::to_string(&smoke).unwrap(), "[1000,2152,4,10,20]");

    // Instantaneous effects carry endTick == 0.
    let flash = Grenade {
        start_tick: 900,
        end_tick: 0,
        kind: GrenadeKind::Flash,
        x: -5,
        y: -6,
    };
    assert_eq!(serde_json::to_string(&flash).unwrap(), "[900,0,1,-5,-6]");
}

#[test]
fn grenade_kind_out_of_range_rejected() {
    assert!(serde_json::from_str::<Grenade>("[1,2,6,0,0]").is_err());
}

#[test]
fn shot_element_order() {
    let shot = Shot { tick: 42, player: 9 };
    let json = serde_json::to_string(&shot).unwrap();
    assert_eq!(json, "[42,9]");
    assert_eq!(serde_json::from_str::<Shot>(&json).unwrap(), shot);
}

#[test]
fn trail_element_order() {
    let trail = GrenadeTrail {
        start_tick: 800,
        end_tick: 960,
        kind: GrenadeKind::He,
        thrower: 2,
        points: vec![[0, 100, 200], [32, 150, 250], [160, 180, 300]],
    };

    let json = serde_json::to_string(&trail).unwrap();
    assert_eq!(
        json,
        "[800,960,2,2,[[0,100,200],[32,150,250],[160,180,300]]]"
    );

    let back: GrenadeTrail = serde_json::from_str(&json).unwrap();
    assert_eq!(back, trail);
}

#[test]
fn round_uses_short_keys() {
    let round = Round {
        num: 3,
        winner: Some(Team::Ct),
        ct_score: 2,
        t_score: 0,
        freeze_end: 640,
        ..Round::default()
    };

    let json = serde_json::to_string(&round).unwrap();
    assert_eq!(
        json,
        concat!(
            "{\"n\":3,\"w\":\"CT\",\"cts\":2,\"ts\":0,\"fe\":640,",
            "\"frames\":[],\"kills\":[],\"bomb\":[],\"grenades\":[],",
            "\"shots\":[],\"dmg\":[],\"trails\":[]}"
        )
    );
}

#[test]
fn winner_tags() {
    let mut round = Round::default();

    round.winner = Some(Team::T);
    assert!(serde_json::to_string(&round).unwrap().contains("\"w\":\"T\""));

    round.winner = None;
    assert!(serde_json::to_string(&round).unwrap().contains("\"w\":\"\""));

    let back: Round = serde_json::from_str("{\"n\":1,\"w\":\"\",\"cts\":0,\"ts\":0,\"fe\":0,\"frames\":[],\"kills\":[],\"bomb\":[],\"grenades\":[],\"shots\":[],\"dmg\":[],\"trails\":[]}").unwrap();
    assert_eq!(back.winner, None);

    assert!(serde_json::from_str::<Round>(
        "{\"n\":1,\"w\":\"X\",\"cts\":0,\"ts\":0,\"fe\":0,\"frames\":[],\"kills\":[],\"bomb\":[],\"grenades\":[],\"shots\":[],\"dmg\":[],\"trails\":[]}"
    )
    .is_err());
}

#[test]
fn flag_bits() {
    let alive_ct = PlayerState {
        idx: 0,
        flags: 0,
        hp: 100,
        x: 0,
        y: 0,
        z: 0,
        yaw: 0,
    };
    assert!(!alive_ct.is_dead());
    assert!(!alive_ct.is_t_side());
    assert!(!alive_ct.carries_bomb());

    let dead_t_carrier = PlayerState {
        flags: 1 | 2 | 4,
        ..alive_ct
    };
    assert!(dead_t_carrier.is_dead());
    assert!(dead_t_carrier.is_t_side());
    assert!(dead_t_carrier.carries_bomb());
}

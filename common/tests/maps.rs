use pretty_assertions::assert_eq;

use common::maps;

#[test]
fn known_maps_resolve() {
    let meta = maps::lookup("de_dust2").unwrap();
    assert_eq!(meta.pos_x, -2476.0);
    assert_eq!(meta.pos_y, 3239.0);
    assert_eq!(meta.scale, 4.4);

    for name in [
        "de_ancient", "de_anubis", "de_dust2", "de_inferno", "de_mirage", "de_nuke", "de_overpass",
        "de_train", "de_vertigo",
    ] {
        assert!(maps::lookup(name).is_ok(), "missing metadata for {}", name);
    }
}

#[test]
fn unknown_map_is_an_error() {
    let err = maps::lookup("de_aztec").unwrap_err();
    assert!(err.to_string().contains("de_aztec"));
}

#[test]
fn multi_level_maps_expose_a_lower_radar() {
    let lower = maps::lower("de_nuke").unwrap();
    assert_eq!(lower.z_max, -495.0);
    assert_eq!(maps::lower("de_vertigo").unwrap().z_max, 11700.0);
    assert_eq!(maps::lower("de_train").unwrap().z_max, -130.0);
    assert!(maps::lower("de_mirage").is_none());
}

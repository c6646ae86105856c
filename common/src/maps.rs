//! Per-map radar coordinate metadata, taken from the CS2 overview files.
//!
//! Radar images are square (1024x1024 reference space); `pos_x`/`pos_y` is the
//! world coordinate of the image's top-left corner and `scale` is world units
//! per radar pixel.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapMeta {
    pub pos_x: f64,
    pub pos_y: f64,
    pub scale: f64,
}

/// Lower-level radar metadata for multi-floor maps.
///
/// CS2 lower levels share the upper level's radar space, so only the Z
/// threshold differs: a player below `z_max` is on the lower level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowerLevel {
    pub meta: MapMeta,
    pub z_max: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("unsupported map {0:?}")]
    Unknown(String),
}

static METAS: phf::Map<&'static str, MapMeta> = phf::phf_map! {
    "de_ancient" => MapMeta { pos_x: -2953.0, pos_y: 2164.0, scale: 5.0 },
    "de_anubis" => MapMeta { pos_x: -2796.0, pos_y: 3328.0, scale: 5.22 },
    "de_dust2" => MapMeta { pos_x: -2476.0, pos_y: 3239.0, scale: 4.4 },
    "de_inferno" => MapMeta { pos_x: -2087.0, pos_y: 3870.0, scale: 4.9 },
    "de_mirage" => MapMeta { pos_x: -3230.0, pos_y: 1713.0, scale: 5.0 },
    "de_nuke" => MapMeta { pos_x: -3453.0, pos_y: 2887.0, scale: 7.0 },
    "de_overpass" => MapMeta { pos_x: -4831.0, pos_y: 1781.0, scale: 5.2 },
    "de_train" => MapMeta { pos_x: -2308.0, pos_y: 2078.0, scale: 4.082077 },
    "de_vertigo" => MapMeta { pos_x: -3168.0, pos_y: 1762.0, scale: 4.0 },
};

static LOWERS: phf::Map<&'static str, LowerLevel> = phf::phf_map! {
    // Pit and the lower bomb site sit below z = -495.
    "de_nuke" => LowerLevel {
        meta: MapMeta { pos_x: -3453.0, pos_y: 2887.0, scale: 7.0 },
        z_max: -495.0,
    },
    // Scaffolding level below z = 11700.
    "de_vertigo" => LowerLevel {
        meta: MapMeta { pos_x: -3168.0, pos_y: 1762.0, scale: 4.0 },
        z_max: 11700.0,
    },
    // Underground passage below z = -130.
    "de_train" => LowerLevel {
        meta: MapMeta { pos_x: -2308.0, pos_y: 2078.0, scale: 4.082077 },
        z_max: -130.0,
    },
};

/// Coordinate metadata for a map; an unknown name is a configuration error,
/// the viewer has nothing to place entities with.
pub fn lookup(map_name: &str) -> Result<MapMeta, MapError> {
    METAS
        .get(map_name)
        .copied()
        .ok_or_else(|| MapError::Unknown(map_name.to_owned()))
}

/// Lower-level metadata, `None` for single-floor maps.
pub fn lower(map_name: &str) -> Option<LowerLevel> {
    LOWERS.get(map_name).copied()
}

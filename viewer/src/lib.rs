//! Playback engine for the compact round-replay data set.
//!
//! Everything here is pure computation: the engine decodes the record set,
//! tracks playback state and produces an ordered list of draw instructions
//! per animation callback. Executing those instructions against an actual
//! canvas is the embedding surface's job, which keeps the interpolation,
//! viewport and layering logic testable without a graphical surface.

pub mod feed;
pub mod interp;
pub mod playback;
pub mod scene;
pub mod stats;
pub mod viewport;

pub use feed::{Feed, FeedEntry, FEED_CAP};
pub use interp::InterpolatedPlayer;
pub use playback::{Playback, SAMPLE_RATE, SPEEDS};
pub use scene::{build, Color, DrawOp, Scene, SceneInput};
pub use stats::{round_stats, RoundStatRow};
pub use viewport::{Camera, RadarLevel, Transform};

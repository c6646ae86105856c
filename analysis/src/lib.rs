pub mod aggregate;
pub mod damage;
pub mod event;
pub mod grenades;
pub mod sampling;

pub use aggregate::{aggregate, AggregateError, Aggregator, MIN_ROUND_FRAMES};
pub use event::{
    Actor, Event, LivePlayer, ProjectileKind, StreamItem, TrajectorySample, Vec3, WorldSnapshot,
};

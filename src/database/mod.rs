pub mod fixture;
pub mod postgres;
pub mod record;
pub mod store;

pub use fixture::{FixtureError, StaticPlayerStore};
pub use postgres::{DatabaseError, PgPlayerStore};
pub use record::{decode_rows, RecordError};
pub use store::{
    BackendError, Column, ColumnKind, PlayerStore, Projection, PER_MINUTE_PROJECTION,
    ROSTER_PROJECTION,
};

//! Data model of the grid.

mod column;
mod events;
mod formatting;
mod grouping;
mod row;
mod snapshot;
mod summary;

pub use column::*;
pub use events::*;
pub use formatting::*;
pub use grouping::*;
pub use row::*;
pub use snapshot::*;
pub use summary::*;

//! Reorder engine
//!
//! Keeps every lane's priorities contiguous and unique while records move
//! within and between lanes. A move is planned from a consistent snapshot
//! and applied as a single unit of work.
//!
//! # Moves
//!
//! - Same lane, towards the back: the records it passes shift forward by one
//! - Same lane, towards the front: the records it passes shift back by one
//! - Across lanes: the source lane closes its gap, the destination lane
//!   opens a slot
//!
//! Requested priorities past the end of a lane are clamped to "last".

mod engine;
mod errors;
mod plan;

pub use engine::{MoveOutcome, ReorderEngine};
pub use errors::{ReorderError, ReorderResult};
pub use plan::{plan_move, MovePlan};

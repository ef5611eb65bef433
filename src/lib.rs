//! laneboard - a three-lane client board whose priorities stay contiguous
//!
//! Every lane holds priorities `1..=N` with no gaps or duplicates, before
//! and after every move. Moves are planned from a consistent snapshot and
//! committed as one unit of work through a journal-backed store.

pub mod api;
pub mod board;
pub mod cli;
pub mod context;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod reorder;
pub mod storage;
pub mod validator;

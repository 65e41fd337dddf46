/// Database layer: connection pooling and migrations
///
/// Models and their SQL operations live in the `models` module at the crate
/// root.

pub mod migrations;
pub mod pool;

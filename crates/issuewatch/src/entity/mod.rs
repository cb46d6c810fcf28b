//! SeaORM entity definitions for the issuewatch database schema.

pub mod category;
pub mod issue;
pub mod prelude;
pub mod repository;

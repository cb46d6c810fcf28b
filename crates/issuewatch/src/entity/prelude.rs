//! Re-exports of all entities for convenient glob imports.

pub use super::category::Entity as Category;
pub use super::issue::Entity as Issue;
pub use super::repository::Entity as Repository;

pub mod admin;
pub mod refresh;

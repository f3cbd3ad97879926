//! DML statement builders (SELECT, INSERT, UPDATE, DELETE, EXISTS).

pub mod delete;
pub mod exists;
pub mod insert;
pub mod select;
pub mod update;

pub use delete::remove;
pub use exists::{EXISTS_COLUMN, exists};
pub use insert::insert;
pub use select::select;
pub use update::update;

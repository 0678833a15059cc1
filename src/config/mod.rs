//! Game configuration: schema and loading.

pub mod loader;
pub mod schema;

pub use loader::{defaults, load, validate};
pub use schema::GameConfig;

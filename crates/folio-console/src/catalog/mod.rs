//! Catalog entities and their data providers
//!
//! Entity records are created by the backend; the console holds only the
//! currently fetched page, replaced wholesale on every fetch and
//! discarded when the page unmounts.

pub mod models;
pub mod provider;
pub mod transport;

pub use models::*;
pub use provider::*;
pub use transport::*;

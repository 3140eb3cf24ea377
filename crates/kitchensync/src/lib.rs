//! `kitchensync` - An offline-first synchronization engine for recipe records
//!
//! This library keeps a signed-in user's recipe collection synchronized with a
//! remote document store, applying local mutations optimistically and
//! reconciling them against remote refreshes.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod recipe;
pub mod session;
pub mod store;
pub mod sync;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use recipe::{Category, OwnerId, Recipe, RecipeDraft, RecipeId};
pub use session::SessionUser;
pub use store::{HttpStore, MemoryStore, RecipeStore, RemoteError};
pub use sync::{RecipeSync, SyncView};

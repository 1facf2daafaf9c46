pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod middleware;
pub mod router;
pub mod state;

pub use config::Config;
pub use error::ApiError;
pub use router::{app, router};
pub use state::{AppState, AppStateInner};

mod error;
mod projects_json;
mod settings_json;

pub use error::*;
pub use projects_json::*;
pub use settings_json::*;

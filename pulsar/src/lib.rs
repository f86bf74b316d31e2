//! Pulsar - Laravel tinker runner and log follower
//!
//! - [`tinker`]: run a snippet through `php artisan tinker` and recover a clean result
//! - [`logs`]: follow `storage/logs/laravel.log` with a bounded initial view
//! - [`App`]: service object tying settings, saved projects and both engines together

pub mod app;
pub mod config;
pub mod host;
pub mod logs;
pub mod output;
pub mod paths;
pub mod tinker;

pub use app::App;
pub use host::{ChannelHost, ConsoleHost, Host, HostEvent};

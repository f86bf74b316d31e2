pub mod projects;
pub mod run;
pub mod settings;
pub mod tail;

use std::sync::Arc;

use pulsar::{App, ConsoleHost};

pub(crate) fn open_app() -> Result<App, Box<dyn std::error::Error>> {
    Ok(App::open(Arc::new(ConsoleHost))?)
}

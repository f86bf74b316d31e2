use clap::Subcommand;

use pulsar::output;
use pulsar_core::Theme;

use super::open_app;

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print current settings
    Show,

    /// Change settings
    Set {
        /// `dark` or `light`; anything else means dark
        #[arg(long)]
        theme: Option<String>,

        /// Explicit PHP binary; pass an empty string to clear
        #[arg(long)]
        php_path: Option<String>,
    },
}

pub fn run(cmd: SettingsCommands) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app()?;

    match cmd {
        SettingsCommands::Show => {
            let settings = app.settings();
            output::section("Settings");
            println!("theme     {}", settings.theme);
            println!(
                "php path  {}",
                settings.php_path_override().unwrap_or("(auto-detect)")
            );
            output::muted(&format!("stored in {}", app.home().display()));
        }
        SettingsCommands::Set { theme, php_path } => {
            let mut settings = app.settings();
            if let Some(theme) = theme {
                settings.theme = Theme::from_name(&theme);
            }
            if let Some(php_path) = php_path {
                settings.php_path = php_path;
            }
            app.update_settings(settings)?;
            output::success("Settings saved");
        }
    }

    Ok(())
}

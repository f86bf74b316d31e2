use clap::{Parser, Subcommand};

use crate::commands::{self, projects, settings};

/// Pulsar - run Laravel tinker snippets and follow application logs
#[derive(Parser)]
#[command(name = "pulsar")]
#[command(version)]
#[command(about = "Pulsar - run Laravel tinker snippets and follow application logs")]
pub struct Cli {
    /// Show verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage saved projects
    #[command(subcommand, visible_alias = "project")]
    Projects(projects::ProjectCommands),

    /// Run a PHP snippet through `php artisan tinker`
    Run {
        /// Project id or directory
        #[arg(long, short = 'p', env = "PULSAR_PROJECT")]
        project: String,

        /// Code to run; read from stdin when omitted
        code: Option<String>,

        /// Print output lines as they arrive
        #[arg(long)]
        stream: bool,
    },

    /// Show the end of the project log and follow new lines
    Tail {
        /// Project id or directory
        #[arg(long, short = 'p', env = "PULSAR_PROJECT")]
        project: String,
    },

    /// Show or change settings
    #[command(subcommand)]
    Settings(settings::SettingsCommands),
}

impl Cli {
    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            Commands::Projects(cmd) => projects::run(cmd),
            Commands::Run {
                project,
                code,
                stream,
            } => commands::run::run(&project, code, stream),
            Commands::Tail { project } => commands::tail::run(&project),
            Commands::Settings(cmd) => settings::run(cmd),
        }
    }
}

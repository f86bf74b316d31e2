use std::path::PathBuf;

use clap::Subcommand;

use pulsar::output;

use super::open_app;

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List saved projects
    #[command(visible_alias = "list")]
    Ls,

    /// Save a Laravel project (prompts for a directory when PATH is omitted)
    Add {
        /// Project directory
        path: Option<PathBuf>,

        /// Display name (defaults to the directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Forget a saved project
    #[command(visible_aliases = ["remove", "delete"])]
    Rm {
        /// Project id
        id: String,
    },
}

pub fn run(cmd: ProjectCommands) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app()?;

    match cmd {
        ProjectCommands::Ls => {
            let projects = app.projects();
            if projects.is_empty() {
                output::muted("No projects yet. Add one with 'pulsar projects add <path>'.");
                return Ok(());
            }
            output::section("Projects");
            for project in projects {
                println!(
                    "{}  {}  {}",
                    output::brand_muted(&project.id),
                    output::brand_accent(&project.name).bold(),
                    project.path
                );
            }
        }
        ProjectCommands::Add { path, name } => {
            let Some(path) = path.or_else(|| app.select_directory()) else {
                output::muted("No directory selected.");
                return Ok(());
            };
            let path = path.canonicalize().unwrap_or(path);
            let project = app.add_project(name.as_deref().unwrap_or(""), &path)?;
            output::success(&format!(
                "Added {} ({})",
                output::emphasized(&project.name),
                project.id
            ));
        }
        ProjectCommands::Rm { id } => {
            if app.remove_project(&id)? {
                output::success(&format!("Removed project {}", output::emphasized(&id)));
            } else {
                return Err(format!("Project '{}' not found", id).into());
            }
        }
    }

    Ok(())
}

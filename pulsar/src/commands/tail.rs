use pulsar::output;

use super::open_app;

pub fn run(project: &str) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(project))
}

async fn run_async(project: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app()?;
    let project_dir = app.project_dir(project)?;

    let snapshot = app.start_tail(&project_dir).await?;
    if !snapshot.is_empty() {
        println!("{snapshot}");
    }
    output::muted("Following log (Ctrl+c to stop)");

    tokio::signal::ctrl_c().await?;
    app.stop_tail().await;
    Ok(())
}

use std::io::Read;

use tokio::sync::mpsc;

use pulsar::output;

use super::open_app;

pub fn run(project: &str, code: Option<String>, stream: bool) -> Result<(), Box<dyn std::error::Error>> {
    let code = match code {
        Some(code) => code,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(project, &code, stream))
}

async fn run_async(project: &str, code: &str, stream: bool) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app()?;
    let project_dir = app.project_dir(project)?;

    if output::is_verbose() {
        output::step(&format!(
            "Running tinker in {}",
            output::emphasized(&project_dir.display().to_string())
        ));
    }

    if !stream {
        println!("{}", app.run_tinker(&project_dir, code).await);
        return Ok(());
    }

    let (tx, mut rx) = mpsc::channel::<String>(256);
    let printer = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            println!("{line}");
        }
    });

    let result = app.run_tinker_streaming(&project_dir, code, tx).await;
    let _ = printer.await;

    // Failures never reach the line channel; surface them here.
    if result.starts_with("Error") {
        output::error_stderr(&result);
    }
    Ok(())
}

use std::fs::{self, File};
use std::sync::Mutex;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod app;
mod chat;
mod config;
mod fact;
mod handler;
mod profile;
mod tui;
mod ui;

use app::App;
use config::Config;
use tui::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = Config::load()?;
    tracing::info!(locale = %config.locale, fact_url = %config.fact_url, "starting portfolio");

    let mut app = App::new(&config);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app).await;
    finish(result, tui::restore())
}

/// Log both outcomes; the loop's own error wins over a failed terminal restore.
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    if let Err(ref e) = result {
        tracing::error!(error = %e, "portfolio exited with an error");
    }
    if let Err(ref e) = restored {
        tracing::error!(error = %e, "could not restore the terminal");
    }
    result.and(restored)
}

async fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    let mut events = EventHandler::new();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }
    }

    if let Some(task) = app.fact_task.take() {
        task.abort();
    }
    Ok(())
}

/// Log to `<cache_dir>/portfolio/portfolio.log`; the terminal belongs to the UI.
/// Filter defaults to `portfolio=info` and honours `RUST_LOG`.
fn init_logging() {
    let Some(log_dir) = dirs::cache_dir().map(|d| d.join("portfolio")) else {
        return;
    };
    if fs::create_dir_all(&log_dir).is_err() {
        return;
    }
    let Ok(file) = File::create(log_dir.join("portfolio.log")) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("portfolio=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn run_error_survives_failed_restore() {
        let err = finish(Err(anyhow!("event loop broke")), Err(anyhow!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "event loop broke");
    }

    #[test]
    fn restore_error_reported_after_clean_run() {
        let err = finish(Ok(()), Err(anyhow!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "restore failed");
        assert!(finish(Ok(()), Ok(())).is_ok());
    }
}

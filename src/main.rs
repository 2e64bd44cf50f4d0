//! Sitecraft - terminal demo host for the site creation progress screen.
//!
//! # Overview
//!
//! This binary drives the library the way an application screen would:
//! - Logging infrastructure (file rotation + console output)
//! - Tokio runtime running the background [`SiteCreationService`]
//! - A [`CreationSession`] pumped from the main thread, which stands in for
//!   the UI thread
//!
//! # Execution Flow
//!
//! 1. Load `Sitecraft Data/sitecraft.yaml` (defaults if missing)
//! 2. Initialize logging → logs/sitecraft.<date>
//! 3. Start the creation on a fresh session
//! 4. Pump phase notifications and redraw the checklist
//! 5. Optionally tear the session down mid-way (`demo.teardown_after`), persist
//!    its snapshot, and recreate it from that snapshot; the bus replays the
//!    latest phase and the creation is not restarted
//! 6. Exit once the session reaches a terminal phase

use anyhow::Result;
use sitecraft::services::{ScriptedBackend, SiteCreationService};
use sitecraft::{
    APP_NAME, ConfigManager, CreationListener, CreationSession, Metrics, PhaseBus,
    ProgressController, VERSION,
};
use std::sync::Arc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Host capability printing to the terminal
struct ConsoleListener;

impl CreationListener for ConsoleListener {
    fn creation_success(&self) {
        tracing::info!("Creation success reported to host");
        println!("Your site is ready!");
    }

    fn help_requested(&self) {
        println!("Site creation runs in the background; you can leave this screen.");
    }
}

fn main() -> Result<()> {
    let config_manager = ConfigManager::new("Sitecraft Data")?;
    let app_config = config_manager.load_app_config()?;

    let _guard = sitecraft::logging::setup_logging(&app_config.logging)?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .thread_name("sitecraft-worker")
        .build()?;

    let demo = &app_config.demo;
    let bus = PhaseBus::new(app_config.bus.capacity);
    let metrics = Arc::new(Metrics::new());
    let listener: Arc<dyn CreationListener> = Arc::new(ConsoleListener);
    let service = SiteCreationService::new(
        bus.clone(),
        ScriptedBackend::from_settings(demo),
        runtime.handle().clone(),
    )
    .with_step_timeout(demo.step_timeout());

    // A snapshot left behind by an earlier process refers to an operation that died with it
    config_manager.clear_snapshot()?;

    let mut session = CreationSession::create(
        demo.params(),
        None,
        &service,
        bus.clone(),
        Arc::clone(&listener),
        Arc::clone(&metrics),
    );
    session.resume();
    render(session.controller());

    let mut torn_down = false;
    while !session.controller().is_finished() {
        std::thread::sleep(POLL_INTERVAL);

        if session.pump() > 0 {
            render(session.controller());
        }

        let teardown_due = demo.teardown_after.is_some() && bus.last() == demo.teardown_after;
        if !torn_down && teardown_due && !session.controller().is_finished() {
            torn_down = true;

            session.pause();
            config_manager.save_snapshot(&session.save_state())?;
            drop(session);
            tracing::info!("Session torn down, background creation continues");

            std::thread::sleep(demo.step_delay());

            session = CreationSession::create(
                demo.params(),
                config_manager.load_snapshot()?,
                &service,
                bus.clone(),
                Arc::clone(&listener),
                Arc::clone(&metrics),
            );
            session.resume();
            tracing::info!("Session recreated from snapshot");
            render(session.controller());
        }
    }

    session.pause();
    config_manager.clear_snapshot()?;

    metrics.log_summary();
    runtime.shutdown_timeout(Duration::from_secs(5));

    tracing::info!("Application shutdown complete");
    Ok(())
}

/// Draw the checklist, first step on top
fn render(controller: &ProgressController) {
    let display = controller.display();

    if display.shows_error() {
        println!("  [!] Something went wrong while creating your site.");
        return;
    }

    for (step, enabled) in display.steps.iter().rev() {
        println!("  [{}] {}", if *enabled { 'x' } else { ' ' }, step.label());
    }
    println!();
}

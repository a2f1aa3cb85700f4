use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use trianglebin::{AppConfig, TrianglebinApp};
use trianglebin_engine::fault::FaultReporter;
use trianglebin_engine::logging::init_logging;
use trianglebin_engine::window::Runtime;
use trianglebin_ui::UiContext;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("trianglebin: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    init_logging(config.logging.clone());
    log::info!("trianglebin {} starting", env!("CARGO_PKG_VERSION"));

    let mut ui = UiContext::default();
    if let Some((path, bytes)) = trianglebin::config::load_system_font() {
        match ui.load_font(&bytes) {
            Ok(_) => log::info!("ui font: {path}"),
            Err(err) => log::warn!("{path}: {err}"),
        }
    }
    if !ui.has_font() {
        log::warn!("no usable system font; panel text disabled");
    }

    let faults = Arc::new(FaultReporter::new(config.fault_policy.into_prompt()));
    Runtime::run(config.window, config.gpu, faults, TrianglebinApp::new(ui))
}

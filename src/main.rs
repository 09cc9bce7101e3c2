use log::LevelFilter;
use muninn::config::{Config, Mode};
use muninn::host;

fn init_logging(mode: Mode) {
    env_logger::Builder::new()
        .filter_level(mode.default_log_level())
        .filter_module("wgpu_core", LevelFilter::Warn)
        .filter_module("wgpu_hal", LevelFilter::Warn)
        .filter_module("naga", LevelFilter::Warn)
        .filter_module("eframe", LevelFilter::Info)
        .filter_module("egui_wgpu", LevelFilter::Info)
        .parse_default_env()
        .init();
}

fn main() -> muninn::Result<()> {
    let mode = Mode::from_env();
    init_logging(mode);

    let config = Config::from_env().inspect_err(|e| log::error!("{}", e))?;

    host::launch(config, mode).inspect_err(|e| log::error!("Unable to open window: {}", e))
}

use anyhow::Context;

use lantern::{
    app::LanternApp,
    config::AppConfig,
    logging::{init_logging, LoggingConfig},
};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let mut config = AppConfig::default();
    if let Some(path) = std::env::args_os().nth(1) {
        config = config.with_model(path);
    }

    LanternApp::new(config)
        .run()
        .context("lantern exited with an error")
}

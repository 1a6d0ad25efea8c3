use gol_cells::{config::LifeConfig, GameOfLifeApp, LifeError};

fn main() -> Result<(), LifeError> {
    let config = LifeConfig::default();
    pollster::block_on(gol_cells::app::run(
        GameOfLifeApp::new(config.clone()),
        &config,
    ))
}

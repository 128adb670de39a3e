use anyhow::Context;
use relm4::prelude::*;
use wheel::config;
use wheel::gui::app::AppModel;
use wheel::gui::wheel::{WheelModel, assets};
use wheel::sys::runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_setup();
    let sprite_dir = config::get_config_dir().ok();
    if let Some(dir) = &sprite_dir
        && let Err(e) = assets::write_defaults(dir)
    {
        log::error!("Failed to write default sprites: {}", e);
    }

    let model = WheelModel::new(&config, sprite_dir.as_deref())
        .context("Cannot build the wheel from the configured sprites")?;

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.steer.wheel");
    app.run::<AppModel>((model, rx));
    Ok(())
}

use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Builder;

/// Runs the config watcher on its own thread so the GTK main loop never
/// blocks on filesystem events.
pub fn start_background_services(tx: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name("wheel-watcher".into())
        .spawn(move || {
            let rt = match Builder::new_current_thread().enable_all().build() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to start watcher runtime: {}", e);
                    return;
                }
            };
            rt.block_on(crate::config::run_async_watcher(tx));
        });

    if let Err(e) = spawned {
        log::error!("Failed to spawn watcher thread: {}", e);
    }
}

use crate::config;
use crate::events::AppEvent;
use crate::sys::server;
use async_channel::Sender;
use std::io;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

/// Where the background services listen.
#[derive(Debug, Clone)]
pub struct Services {
    pub socket_path: PathBuf,
    pub config_path: PathBuf,
}

impl Services {
    /// Serves the control socket and watches the config file until both stop.
    pub async fn run(self, tx: Sender<AppEvent>) {
        tokio::join!(
            server::run_server(self.socket_path, tx.clone()),
            config::run_async_watcher(self.config_path, tx),
        );
        log::debug!("background services stopped");
    }
}

/// Runs `services` on a dedicated thread with its own Tokio runtime. They
/// only talk to the widget through `tx`.
pub fn start_background_services(
    tx: Sender<AppEvent>,
    services: Services,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("fandial-services".into())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create Tokio runtime: {}", e);
                    return;
                }
            };
            rt.block_on(services.run(tx));
        })
}

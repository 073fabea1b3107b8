use crate::events::{AppEvent, ControlCommand};
use async_channel::Sender;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

pub const DEFAULT_SOCKET_PATH: &str = "/tmp/fandial.sock";

pub async fn run_server(socket_path: PathBuf, tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if fs_err::metadata(&socket_path).is_ok() {
        let _ = fs_err::remove_file(&socket_path);
    }

    let listener = match UnixListener::bind(&socket_path) {
        Ok(l) => l,
        Err(e) => {
            log::error!(
                "Failed to bind control socket {}: {}",
                socket_path.display(),
                e
            );
            return;
        }
    };
    log::info!("Listening for commands on {}", socket_path.display());

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        let Some(event) = parse_line(&line) else {
                            continue;
                        };
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

fn parse_line(line: &str) -> Option<AppEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match line.parse::<ControlCommand>() {
        Ok(command) => Some(command.into()),
        Err(_) => {
            log::warn!("Ignoring unknown control command '{}'", line);
            None
        }
    }
}

pub fn send_command(socket_path: &Path, command: ControlCommand) -> anyhow::Result<()> {
    use std::io::Write;
    use std::os::unix::net::UnixStream;

    let mut stream = UnixStream::connect(socket_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to fandial at {}: {}. Is fandial running?",
            socket_path.display(),
            e
        )
    })?;

    writeln!(stream, "{}", command)?;
    Ok(())
}

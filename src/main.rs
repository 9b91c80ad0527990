//! Entry point for the **panegrid** driver.
//!
//! Reads newline-delimited JSON [`Command`]s from standard input on a
//! background thread and applies them to a [`Workspace`] on the main thread.
//! After every command the resulting arrangement is printed to standard
//! output as one line of JSON.  Deferred work (divider renormalisation) runs
//! whenever the command channel is empty.

use panegrid::command::Command;
use panegrid::config::Config;
use panegrid::source::StreamSource;
use panegrid::traits::CommandSource;
use panegrid::workspace::Workspace;
use log::{error, info};
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::sync::mpsc;

/// Resolve the default config path (`$XDG_CONFIG_HOME/panegrid/config.json`).
fn default_config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("panegrid").join("config.json")
}

/// `--config <path>` from the command line, if given.
fn config_arg() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

/// Load the config, falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_arg().unwrap_or_else(default_config_path);
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

//  Main

fn main() {
    env_logger::init();

    let config = load_config();
    let workspace = Workspace::from_config(&config, config.host_context());

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_command_sources(cmd_tx);

    run_event_loop(workspace, cmd_rx);
}

//  Event loop

fn run_event_loop(mut workspace: Workspace, cmd_rx: mpsc::Receiver<Command>) {
    info!("panegrid running with {} layout", workspace.layout().kind());
    loop {
        let cmd = match cmd_rx.try_recv() {
            Ok(cmd) => cmd,
            Err(mpsc::TryRecvError::Empty) => {
                workspace.layout_mut().on_idle();
                match cmd_rx.recv() {
                    Ok(cmd) => cmd,
                    Err(_) => break,
                }
            }
            Err(mpsc::TryRecvError::Disconnected) => break,
        };
        if let Err(e) = workspace.handle(cmd) {
            error!("command error: {}", e);
        }
        print_arrangement(&workspace);
    }
    info!("all command sources closed, exiting");
}

fn print_arrangement(workspace: &Workspace) {
    match serde_json::to_string(&workspace.arrange_viewport()) {
        Ok(json) => {
            let mut out = std::io::stdout().lock();
            if let Err(e) = writeln!(out, "{}", json).and_then(|_| out.flush()) {
                error!("failed to write arrangement: {}", e);
            }
        }
        Err(e) => error!("failed to serialize arrangement: {}", e),
    }
}

//  Helpers

fn spawn_command_sources(tx: mpsc::Sender<Command>) {
    std::thread::spawn(move || {
        let mut source = StreamSource::new(BufReader::new(std::io::stdin()));
        if let Err(e) = source.run(tx) {
            error!("stdin reader error: {}", e);
        }
    });
}

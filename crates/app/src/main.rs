//! Baton - who holds the team's turn token
//!
//! Console front end for the rotation engine. Each input line is one
//! action; the board is redrawn after every action.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use baton_core::BatonConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod console;
mod render;
mod state;

use state::{AppState, Reply};

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Baton");

    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match BatonConfig::resolve_path(explicit).and_then(|p| BatonConfig::load(&p)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut app_state = AppState::new(&config);

    if let Err(e) = run(&mut app_state, io::stdin().lock(), io::stdout().lock()) {
        tracing::error!("Console error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Baton stopped");
}

/// Read commands until `quit` or end of input
fn run<R: BufRead, W: Write>(app_state: &mut AppState, input: R, mut output: W) -> io::Result<()> {
    writeln!(output, "{}", render::board(app_state))?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        app_state.tick();

        let reply = match console::parse(&line, app_state.engine.roster()) {
            Ok(command) => app_state.handle(command),
            Err(message) => Reply::Text(message),
        };

        match reply {
            Reply::Quit => break,
            Reply::Text(text) => writeln!(output, "{}", text)?,
            Reply::Board(notice) => {
                if let Some(notice) = notice {
                    writeln!(output, "{}", notice)?;
                }
                writeln!(output, "{}", render::board(app_state))?;
            }
        }

        write!(output, "> ")?;
        output.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn config() -> BatonConfig {
        BatonConfig::from_toml("[roster]\nmembers = [\"Alice\", \"Bob\"]\n").unwrap()
    }

    #[test]
    fn test_session_script() {
        let mut app_state = AppState::new(&config());
        let input = Cursor::new("join Alice\njoin Bob\npass Alice\nquit\njoin Alice\n");
        let mut output = Vec::new();

        run(&mut app_state, input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Baton passed from Alice to Bob!"));
        assert_eq!(app_state.engine.current_holder(), Some("Bob"));
        // nothing after quit is applied
        assert!(app_state.engine.is_queued("Alice"));
    }

    #[test]
    fn test_parse_errors_are_printed() {
        let mut app_state = AppState::new(&config());
        let input = Cursor::new("dance\n");
        let mut output = Vec::new();

        run(&mut app_state, input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Unknown command 'dance'"));
    }

    #[test]
    fn test_load_config_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("baton.toml");
        std::fs::write(&path, "[roster]\nmembers = [\"Alice\"]\n").unwrap();

        let config = BatonConfig::load(&path).unwrap();
        let app_state = AppState::new(&config);
        assert_eq!(app_state.engine.roster().len(), 1);
    }
}

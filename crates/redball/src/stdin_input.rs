//! Terminal input pump
//!
//! Without a touch screen the binary reads lines from stdin on a background
//! thread and forwards them to the engine as [`AppEvent`]s:
//!
//! | line        | event                     |
//! |-------------|---------------------------|
//! | empty       | tap                       |
//! | `c`         | `C` (show debug boxes)    |
//! | `v`         | `V` (hide debug boxes)    |
//! | `q`         | `Escape` (quit)           |
//! | `u`         | `Up` (same as a tap)      |
//!
//! End of input closes the window.

use redball_engine::input::KeyCode;
use redball_engine::AppEvent;
use std::io::{self, BufRead};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

/// Translate one line of input into events
pub fn parse_line(line: &str) -> Vec<AppEvent> {
    let key = match line.trim().to_ascii_lowercase().as_str() {
        "" => return vec![AppEvent::Tap],
        "c" => KeyCode::C,
        "v" => KeyCode::V,
        "q" => KeyCode::Escape,
        "u" => KeyCode::Up,
        other => {
            log::warn!("Ignoring unknown input {:?}", other);
            return Vec::new();
        }
    };
    vec![AppEvent::KeyPressed(key), AppEvent::KeyReleased(key)]
}

/// Pump events from any reader until it ends or the receiver hangs up
pub fn pump<R: BufRead>(reader: R, events: &Sender<AppEvent>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        };
        for event in parse_line(&line) {
            if events.send(event).is_err() {
                return;
            }
        }
    }
    // The engine may already be gone
    let _ = events.send(AppEvent::WindowCloseRequested);
}

/// Spawn the stdin reader thread
pub fn spawn(events: Sender<AppEvent>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-input".to_string())
        .spawn(move || pump(io::stdin().lock(), &events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::mpsc;

    #[test]
    fn test_parse_lines() {
        assert_eq!(parse_line(""), vec![AppEvent::Tap]);
        assert_eq!(parse_line("  "), vec![AppEvent::Tap]);
        assert_eq!(
            parse_line("Q"),
            vec![AppEvent::KeyPressed(KeyCode::Escape), AppEvent::KeyReleased(KeyCode::Escape)]
        );
        assert!(parse_line("jump").is_empty());
    }

    #[test]
    fn test_pump_closes_window_at_end_of_input() {
        let (tx, rx) = mpsc::channel();
        pump(Cursor::new("\nc\n"), &tx);

        let events: Vec<AppEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                AppEvent::Tap,
                AppEvent::KeyPressed(KeyCode::C),
                AppEvent::KeyReleased(KeyCode::C),
                AppEvent::WindowCloseRequested,
            ]
        );
    }
}

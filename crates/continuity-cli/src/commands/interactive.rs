use std::io::BufRead;

use continuity_core::clock::now_ms;
use continuity_core::{Dashboard, Key, KeyEvent};

use crate::render;
use crate::session::{self, SessionOptions};

/// What one line of input means.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Key(KeyEvent),
    Quit,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    let key = match line.trim() {
        "" => return Input::Unknown,
        "quit" | "exit" => return Input::Quit,
        "left" => Key::Left,
        "right" => Key::Right,
        "up" => Key::Up,
        "down" => Key::Down,
        "space" => Key::Space,
        "enter" => Key::Enter,
        "esc" | "escape" => Key::Escape,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                _ => return Input::Unknown,
            }
        }
    };
    Input::Key(KeyEvent::new(key))
}

pub fn run(opts: &SessionOptions) -> Result<(), Box<dyn std::error::Error>> {
    let (config, mut store) = session::open(opts)?;
    let mut dashboard = Dashboard::new(config.notices, now_ms());

    print!("{}", render::page(&store, Some(&dashboard)));
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let now = now_ms();
        dashboard.tick(now);
        store.refresh();

        match parse_input(&line) {
            Input::Quit => break,
            Input::Unknown => {
                eprintln!("unrecognized input: {}", line.trim());
                continue;
            }
            Input::Key(event) => {
                let Some(week) = store.week().cloned() else {
                    continue;
                };
                if let Some(intent) = dashboard.handle_key(event, &week, now) {
                    let event = dashboard.apply(intent, &mut store, now);
                    tracing::debug!(?event, "intent applied");
                }
            }
        }
        print!("{}", render::page(&store, Some(&dashboard)));
    }

    dashboard.teardown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_keys_and_chars() {
        assert_eq!(parse_input("left"), Input::Key(KeyEvent::new(Key::Left)));
        assert_eq!(parse_input(" enter "), Input::Key(KeyEvent::new(Key::Enter)));
        assert_eq!(parse_input("?"), Input::Key(KeyEvent::new(Key::Char('?'))));
        assert_eq!(parse_input("L"), Input::Key(KeyEvent::new(Key::Char('L'))));
        assert_eq!(parse_input("quit"), Input::Quit);
        assert_eq!(parse_input("sideways"), Input::Unknown);
        assert_eq!(parse_input(""), Input::Unknown);
    }
}

use std::io::Write;

use common::games::SessionBroadcaster;
use common::games::snake::{Direction, SessionCommand, SessionEvent, SessionPhase, SessionSnapshot};
use common::log;

pub const HELP: &str = "Commands: w/a/s/d or up/down/left/right to turn, p to pause, \
                        enter to start, r to restart, q to quit";

/// Maps one line of console input to a session command.
pub fn parse_command(line: &str) -> Option<SessionCommand> {
    let command = match line.trim().to_ascii_lowercase().as_str() {
        "w" | "up" => SessionCommand::Turn(Direction::Up),
        "s" | "down" => SessionCommand::Turn(Direction::Down),
        "a" | "left" => SessionCommand::Turn(Direction::Left),
        "d" | "right" => SessionCommand::Turn(Direction::Right),
        "p" | "pause" => SessionCommand::TogglePause,
        "" | "enter" | "start" => SessionCommand::Begin,
        "r" | "restart" => SessionCommand::Restart,
        "q" | "quit" => SessionCommand::Quit,
        _ => return None,
    };
    Some(command)
}

/// Draws frames on stdout; events go to the log.
#[derive(Clone)]
pub struct ConsoleBroadcaster {
    clear_screen: bool,
}

impl ConsoleBroadcaster {
    pub fn new(clear_screen: bool) -> Self {
        Self { clear_screen }
    }
}

impl SessionBroadcaster for ConsoleBroadcaster {
    async fn broadcast_state(&self, snapshot: SessionSnapshot) {
        let mut frame = String::new();
        if self.clear_screen {
            frame.push_str("\x1B[2J\x1B[H");
        }
        frame.push_str(&snapshot.render_ascii());
        frame.push_str(&status_line(&snapshot));
        frame.push('\n');

        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(frame.as_bytes()).and_then(|_| stdout.flush()) {
            log!("Failed to draw frame: {}", e);
        }
    }

    async fn broadcast_event(&self, event: SessionEvent) {
        match event {
            SessionEvent::GameOver {
                reason,
                score,
                level,
                high_score,
                new_high_score,
            } => {
                let record = if new_high_score { " (new record)" } else { "" };
                log!(
                    "Game over by {:?}: score {}{}, level {}, best {}",
                    reason, score, record, level, high_score
                );
            }
            other => log!("{:?}", other),
        }
    }
}

pub fn status_line(snapshot: &SessionSnapshot) -> String {
    let mut line = format!(
        "Score {} | Level {} | Best {} | {} ms",
        snapshot.score, snapshot.level, snapshot.high_score, snapshot.speed_ms
    );
    if let Some(effect) = snapshot.active_effect {
        let seconds = effect.remaining_ms as f64 / 1000.0;
        line.push_str(&format!(" | {} {:.1}s", effect.kind.as_str(), seconds));
    }
    let hint = match snapshot.phase {
        SessionPhase::Start => " | press enter to start",
        SessionPhase::Paused => " | paused, p to resume",
        SessionPhase::GameOver => " | game over, enter or r to play again",
        SessionPhase::Playing => "",
    };
    line.push_str(hint);
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::snake::{ActiveEffectView, PowerUpKind};

    #[test]
    fn test_parse_turns() {
        assert_eq!(parse_command("w"), Some(SessionCommand::Turn(Direction::Up)));
        assert_eq!(parse_command(" LEFT "), Some(SessionCommand::Turn(Direction::Left)));
        assert_eq!(parse_command("d"), Some(SessionCommand::Turn(Direction::Right)));
    }

    #[test]
    fn test_parse_controls() {
        assert_eq!(parse_command(""), Some(SessionCommand::Begin));
        assert_eq!(parse_command("p"), Some(SessionCommand::TogglePause));
        assert_eq!(parse_command("restart"), Some(SessionCommand::Restart));
        assert_eq!(parse_command("q"), Some(SessionCommand::Quit));
        assert_eq!(parse_command("jump"), None);
    }

    #[test]
    fn test_status_line_shows_effect() {
        let snapshot = SessionSnapshot {
            phase: SessionPhase::Paused,
            width: 5,
            height: 5,
            snake: Vec::new(),
            head: None,
            direction: Direction::Right,
            food: None,
            power_up: None,
            active_effect: Some(ActiveEffectView {
                kind: PowerUpKind::SpeedBoost,
                remaining_ms: 2500,
            }),
            score: 30,
            level: 1,
            high_score: 90,
            speed_ms: 100,
            tick: 12,
        };
        assert_eq!(
            status_line(&snapshot),
            "Score 30 | Level 1 | Best 90 | 100 ms | speed boost 2.5s | paused, p to resume"
        );
    }
}

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Named high-activity trading sessions (killzones), as fixed UTC hour
/// ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionWindow {
    Tokyo,
    London,
    NewYorkAm,
    NewYorkPmMacro,
}

impl std::fmt::Display for SessionWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionWindow::Tokyo => write!(f, "TOKYO"),
            SessionWindow::London => write!(f, "LONDON"),
            SessionWindow::NewYorkAm => write!(f, "NEW YORK AM"),
            SessionWindow::NewYorkPmMacro => write!(f, "NEW YORK PM MACRO"),
        }
    }
}

/// Classify a UTC hour into a session window.
///
/// Tokyo 00–03, London 07–10, New York AM 12–15, New York PM macro
/// 18–20; `None` outside all ranges. Ranges are half-open.
pub fn session_at(hour: u32) -> Option<SessionWindow> {
    match hour {
        0..=2 => Some(SessionWindow::Tokyo),
        7..=9 => Some(SessionWindow::London),
        12..=14 => Some(SessionWindow::NewYorkAm),
        18..=19 => Some(SessionWindow::NewYorkPmMacro),
        _ => None,
    }
}

/// The session window containing `now`.
pub fn current_session(now: DateTime<Utc>) -> Option<SessionWindow> {
    session_at(now.hour())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_boundaries() {
        assert_eq!(session_at(0), Some(SessionWindow::Tokyo));
        assert_eq!(session_at(2), Some(SessionWindow::Tokyo));
        assert_eq!(session_at(3), None);
        assert_eq!(session_at(7), Some(SessionWindow::London));
        assert_eq!(session_at(10), None);
        assert_eq!(session_at(12), Some(SessionWindow::NewYorkAm));
        assert_eq!(session_at(15), None);
        assert_eq!(session_at(18), Some(SessionWindow::NewYorkPmMacro));
        assert_eq!(session_at(20), None);
        assert_eq!(session_at(23), None);
    }

    #[test]
    fn classifier_is_total_over_the_day() {
        // Every hour classifies without panicking; exactly 11 hours are
        // inside a session (3 + 3 + 3 + 2)
        let in_session = (0..24).filter(|&h| session_at(h).is_some()).count();
        assert_eq!(in_session, 11);
    }

    #[test]
    fn display_labels() {
        assert_eq!(SessionWindow::NewYorkAm.to_string(), "NEW YORK AM");
        assert_eq!(SessionWindow::Tokyo.to_string(), "TOKYO");
    }
}

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootEvent {
    /// The line at this index is now visible.
    LineRevealed(usize),
    Complete,
}

/// Plays a fixed script one line at a time, then holds briefly and completes.
///
/// Per-line delay is `total / N`. After the last line a trailing pause runs
/// before `Complete`, which is emitted exactly once. An empty script completes
/// after the pause alone.
#[derive(Debug, Clone)]
pub struct BootSequencer {
    lines: Vec<String>,
    line_delay: Duration,
    trailing_pause: Duration,
    revealed: usize,
    until_next: Duration,
    completed: bool,
}

impl BootSequencer {
    pub fn new<I, S>(lines: I, total: Duration, trailing_pause: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let line_delay = match u32::try_from(lines.len()) {
            Ok(0) => Duration::ZERO,
            Ok(count) => total / count,
            Err(_) => Duration::ZERO,
        };
        let until_next = if lines.is_empty() {
            trailing_pause
        } else {
            line_delay
        };

        Self {
            lines,
            line_delay,
            trailing_pause,
            revealed: 0,
            until_next,
            completed: false,
        }
    }

    pub fn line_delay(&self) -> Duration {
        self.line_delay
    }

    pub fn revealed_lines(&self) -> &[String] {
        &self.lines[..self.revealed]
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Advance by `dt`, returning every event that fell due, in order.
    pub fn advance(&mut self, dt: Duration) -> Vec<BootEvent> {
        let mut events = Vec::new();
        let mut budget = dt;

        while !self.completed {
            if budget < self.until_next {
                self.until_next -= budget;
                break;
            }
            budget -= self.until_next;

            if self.revealed < self.lines.len() {
                events.push(BootEvent::LineRevealed(self.revealed));
                self.revealed += 1;
                self.until_next = if self.revealed < self.lines.len() {
                    self.line_delay
                } else {
                    self.trailing_pause
                };
            } else {
                self.completed = true;
                events.push(BootEvent::Complete);
            }
        }

        events
    }
}

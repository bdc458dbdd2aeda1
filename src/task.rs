use anyhow::Result;
use chrono::NaiveDate;

use crate::date::{self, DateFormat};

/// One slot in a task file. An empty `text` marks the slot as free;
/// free slots keep their line so indices stay stable across saves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Task {
    pub prioritized: bool,
    pub due: Option<NaiveDate>,
    pub text: String,
}

impl Task {
    pub fn new(text: impl Into<String>, prioritized: bool, due: Option<NaiveDate>) -> Self {
        Self {
            prioritized,
            due,
            text: text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Decode one file line. A leading `*` sets the priority flag, the
    /// first `[...]` pair holds the due date (any expression the date
    /// parser accepts), the rest is the body. Lines with no body decode
    /// to the empty slot.
    pub fn from_line(raw: &str, fmt: &DateFormat, today: NaiveDate) -> Result<Self> {
        let line = raw.trim();
        let prioritized = line.starts_with('*');

        let mut due = None;
        let mut body_start = if prioritized { char_offset(line, 2) } else { 0 };
        if let Some(open) = line.find('[') {
            if let Some(close) = line[open + 1..].find(']') {
                let close = open + 1 + close;
                due = Some(date::parse_expr(&line[open + 1..close], fmt, today)?);
                body_start = close + 1;
            }
        }

        let text = line[body_start..].trim();
        if text.is_empty() {
            // a bare marker is not a task
            return Ok(Task::default());
        }
        Ok(Task {
            prioritized,
            due,
            text: text.to_string(),
        })
    }

    /// Inverse of `from_line` for canonically formed tasks.
    pub fn to_line(&self, fmt: &DateFormat) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut line = String::new();
        if self.prioritized {
            line.push_str("* ");
        }
        if let Some(due) = self.due {
            line.push('[');
            line.push_str(&fmt.format(due));
            line.push_str("] ");
        }
        line.push_str(&self.text);
        line
    }
}

/// Byte index of the nth character, clamped to the end of the string.
fn char_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

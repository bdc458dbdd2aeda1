use chrono::NaiveDate;

use crate::date::DateFormat;
use crate::task::Task;

pub const RESET: &str = "\x1b[0m";

const FG_RED: &str = "\x1b[31m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_BLUE: &str = "\x1b[34m";
const FG_MAGENTA: &str = "\x1b[35m";
const FG_CYAN: &str = "\x1b[36m";

/// ANSI sequences keyed by how soon a task is due. Values come straight
/// from the config and are emitted verbatim.
#[derive(Debug, Clone)]
pub struct Palette {
    pub overdue: String,
    pub today: String,
    pub tomorrow: String,
    pub week: String,
    pub done: String,
    pub prio: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            overdue: FG_RED.to_string(),
            today: FG_YELLOW.to_string(),
            tomorrow: FG_CYAN.to_string(),
            week: FG_BLUE.to_string(),
            done: FG_GREEN.to_string(),
            prio: FG_MAGENTA.to_string(),
        }
    }
}

/// Priority beats the due-date buckets; tasks due a week or more out
/// stay uncolored.
fn pick_color<'a>(task: &Task, today: NaiveDate, palette: &'a Palette) -> Option<&'a str> {
    if task.prioritized {
        return Some(&palette.prio);
    }
    let due = task.due?;
    let day_diff = (due - today).num_days();
    if day_diff < 0 {
        Some(&palette.overdue)
    } else if day_diff == 0 {
        Some(&palette.today)
    } else if day_diff == 1 {
        Some(&palette.tomorrow)
    } else if day_diff < 7 {
        Some(&palette.week)
    } else {
        None
    }
}

/// One display line: two-wide index, two-wide priority star, the due date
/// right-aligned to the format width inside brackets, then the body.
/// Colored lines end with the reset sequence.
pub fn render_line(
    idx: usize,
    task: &Task,
    color_override: Option<&str>,
    today: NaiveDate,
    fmt: &DateFormat,
    palette: &Palette,
) -> String {
    let color = color_override.or_else(|| pick_color(task, today, palette));
    let date = task.due.map(|due| fmt.format(due)).unwrap_or_default();

    let mut out = String::new();
    if let Some(color) = color {
        out.push_str(color);
    }
    out.push_str(&format!("{idx:>2}"));
    out.push_str(&format!("{:>2}", if task.prioritized { "*" } else { "" }));
    out.push_str(&format!("[{date:>width$}]", width = fmt.width()));
    out.push(' ');
    out.push_str(&task.text);
    if color.is_some() {
        out.push_str(RESET);
    }
    out
}

use std::ops::Range;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Duration, NaiveDate};

pub const DEFAULT_DATE_FORMAT: &str = "dd-mm-yyyy";

/// Monday is offset 0, so "next sunday" is at most six days out.
struct WeekdayName {
    aliases: [&'static str; 3],
    offset: u32,
}

const WEEKDAYS: [WeekdayName; 7] = [
    WeekdayName { aliases: ["monday", "mon", "mo"], offset: 0 },
    WeekdayName { aliases: ["tuesday", "tue", "tu"], offset: 1 },
    WeekdayName { aliases: ["wednesday", "wed", "we"], offset: 2 },
    WeekdayName { aliases: ["thursday", "thu", "th"], offset: 3 },
    WeekdayName { aliases: ["friday", "fri", "fr"], offset: 4 },
    WeekdayName { aliases: ["saturday", "sat", "sa"], offset: 5 },
    WeekdayName { aliases: ["sunday", "sun", "su"], offset: 6 },
];

/// A date pattern like `dd-mm-yyyy`: one contiguous run each of `d`, `m`
/// and `y`, in any order, with arbitrary delimiters between them. Run
/// lengths set the zero-padding width of the matching component.
#[derive(Debug, Clone)]
pub struct DateFormat {
    pattern: String,
    day: Range<usize>,
    month: Range<usize>,
    year: Range<usize>,
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT).expect("default pattern is valid")
    }
}

impl DateFormat {
    pub fn new(pattern: &str) -> Result<Self> {
        if !pattern.is_ascii() {
            bail!("invalid date format pattern: '{pattern}'");
        }
        Ok(Self {
            day: run_of(pattern, 'd')?,
            month: run_of(pattern, 'm')?,
            year: run_of(pattern, 'y')?,
            pattern: pattern.to_string(),
        })
    }

    /// Display width of a formatted date, used for list alignment.
    pub fn width(&self) -> usize {
        self.pattern.len()
    }

    pub fn format(&self, date: NaiveDate) -> String {
        let mut parts = [
            (self.day.clone(), format!("{:0width$}", date.day(), width = self.day.len())),
            (self.month.clone(), format!("{:0width$}", date.month(), width = self.month.len())),
            (self.year.clone(), format!("{:0width$}", date.year(), width = self.year.len())),
        ];
        // replace right to left so earlier ranges stay valid even when a
        // component overflows its run width
        parts.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));
        let mut out = self.pattern.clone();
        for (range, value) in parts {
            out.replace_range(range, &value);
        }
        out
    }

    /// Positional match against the pattern: the input must be the same
    /// length, and the characters under each letter run must be numeric.
    /// Delimiter positions are not inspected.
    pub fn parse_literal(&self, input: &str) -> Result<NaiveDate> {
        self.fields(input)
            .and_then(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day))
            .with_context(|| format!("invalid date format: '{input}'"))
    }

    fn fields(&self, input: &str) -> Option<(i32, u32, u32)> {
        if !input.is_ascii() || input.len() != self.pattern.len() {
            return None;
        }
        let year = input[self.year.clone()].parse().ok()?;
        let month = input[self.month.clone()].parse().ok()?;
        let day = input[self.day.clone()].parse().ok()?;
        Some((year, month, day))
    }
}

fn run_of(pattern: &str, letter: char) -> Result<Range<usize>> {
    let start = pattern
        .find(letter)
        .with_context(|| format!("date format pattern '{pattern}' is missing '{letter}'"))?;
    let end = pattern.rfind(letter).map_or(0, |i| i + 1);
    if pattern[start..end].chars().any(|c| c != letter) {
        bail!("date format pattern '{pattern}' has a broken '{letter}' run");
    }
    Ok(start..end)
}

/// Resolve a user-supplied date expression against `today`. Keywords and
/// weekday names are case-insensitive; anything unrecognized is tried as a
/// literal date in the configured format.
pub fn parse_expr(expr: &str, fmt: &DateFormat, today: NaiveDate) -> Result<NaiveDate> {
    let lowered = expr.to_lowercase();
    match lowered.as_str() {
        "today" | "tday" => return Ok(today),
        "tomorrow" => return Ok(today + Duration::days(1)),
        "nextweek" | "nweek" => return Ok(today + Duration::days(7)),
        _ => {}
    }
    if let Some(target) = weekday_offset(&lowered) {
        let current = today.weekday().num_days_from_monday();
        // same weekday resolves to today, not next week
        let increment = (target + 7 - current) % 7;
        return Ok(today + Duration::days(i64::from(increment)));
    }
    fmt.parse_literal(expr)
}

fn weekday_offset(word: &str) -> Option<u32> {
    WEEKDAYS
        .iter()
        .find(|day| day.aliases.contains(&word))
        .map(|day| day.offset)
}

use std::collections::HashMap;
use std::{env, fs};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

use crate::date::DateFormat;
use crate::render::Palette;

const COMMENT_CHAR: char = '#';

/// Everything the commands need from the environment, resolved once at
/// startup and passed around explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub todo_path: PathBuf,
    pub done_path: PathBuf,
    pub date_format: DateFormat,
    pub palette: Palette,
}

pub fn load() -> Result<Config> {
    let home = BaseDirs::new()
        .context("cannot determine home directory")?
        .home_dir()
        .to_path_buf();
    let exe_dir = exe_dir()?;
    let path = locate(&home, &exe_dir).context("cannot find config")?;
    let text = fs::read_to_string(&path)
        .with_context(|| format!("could not read file '{}'", path.display()))?;
    Config::parse(&text, &path, &home, &exe_dir)
}

/// First existing file wins; no config anywhere is fatal.
fn locate(home: &Path, exe_dir: &Path) -> Option<PathBuf> {
    [
        home.join(".config/dstodo/config"),
        home.join(".dstodo/config"),
        home.join(".dstodo.cfg"),
        exe_dir.join("config"),
    ]
    .into_iter()
    .find(|path| path.exists())
}

fn exe_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("cannot locate own binary")?;
    Ok(exe
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf))
}

impl Config {
    fn parse(text: &str, origin: &Path, home: &Path, exe_dir: &Path) -> Result<Config> {
        let entries = parse_ini(text, origin, home);

        let txt_dir = entries
            .get("TXT_DIR")
            .map_or_else(|| exe_dir.to_path_buf(), PathBuf::from);
        let date_format = match entries.get("DATE_FORMAT") {
            Some(pattern) => DateFormat::new(pattern)?,
            None => DateFormat::default(),
        };

        let mut palette = Palette::default();
        let overrides = [
            ("OVERDUE_COLOR", &mut palette.overdue),
            ("TODAY_COLOR", &mut palette.today),
            ("TOMORROW_COLOR", &mut palette.tomorrow),
            ("WEEK_COLOR", &mut palette.week),
            ("DONE_COLOR", &mut palette.done),
            ("PRIO_COLOR", &mut palette.prio),
        ];
        for (key, slot) in overrides {
            if let Some(value) = entries.get(key) {
                *slot = value.clone();
            }
        }

        Ok(Config {
            todo_path: txt_dir.join("todo.txt"),
            done_path: txt_dir.join("done.txt"),
            date_format,
            palette,
        })
    }
}

/// `key=value` per line, `#` starts a comment anywhere, both sides
/// trimmed. Lines without `=` are warned about and skipped.
fn parse_ini(text: &str, origin: &Path, home: &Path) -> HashMap<String, String> {
    let mut entries = HashMap::new();
    for (line_no, raw) in text.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) => {
                entries.insert(key.trim().to_string(), expand_home(value.trim(), home));
            }
            None => eprintln!(
                "WARNING: config '{}' has error at line {}",
                origin.display(),
                line_no + 1
            ),
        }
    }
    entries
}

fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_CHAR) {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// The first `~` and the first `$HOME` in a value become the home dir.
fn expand_home(value: &str, home: &Path) -> String {
    let home = home.to_string_lossy();
    value.replacen('~', &home, 1).replacen("$HOME", &home, 1)
}

use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::config::Config;
use crate::date;
use crate::render;
use crate::store::Store;
use crate::task::Task;

/// Ambient state every command needs.
pub struct Ctx {
    pub config: Config,
    pub today: NaiveDate,
}

/// Verb names with their accepted spellings. Kept alongside the clap
/// attributes because `add` needs to tell a sub-verb from a date.
const VERBS: &[(&str, &[&str])] = &[
    ("add", &["add", "a"]),
    ("prioritize", &["prioritize", "priorize", "prio", "pri", "p"]),
    ("list", &["list", "ls", "ll", "l"]),
    ("remove", &["remove", "rm", "delete"]),
    ("done", &["done", "do"]),
];

fn verb_for(word: &str) -> Option<&'static str> {
    VERBS
        .iter()
        .find(|(_, aliases)| aliases.contains(&word))
        .map(|(name, _)| *name)
}

fn render(ctx: &Ctx, idx: usize, task: &Task, color: Option<&str>) -> String {
    render::render_line(idx, task, color, ctx.today, &ctx.config.date_format, &ctx.config.palette)
}

/// The trailing word of `add` is either a `prioritize` alias or a due
/// date expression; any other verb there is an error.
pub fn add(ctx: &Ctx, todo: &mut Store, text: &str, when: Option<&str>) -> Result<String> {
    let mut prioritized = false;
    let mut due = None;
    if let Some(word) = when {
        match verb_for(word) {
            Some("prioritize") => prioritized = true,
            Some(_) => bail!("invalid sub-command: '{word}'"),
            None => due = Some(date::parse_expr(word, &ctx.config.date_format, ctx.today)?),
        }
    }
    let idx = todo.append(Task::new(text, prioritized, due));
    Ok(render(ctx, idx, todo.fetch(idx)?, None))
}

pub fn prioritize(ctx: &Ctx, todo: &mut Store, text: &str) -> Result<String> {
    add(ctx, todo, text, Some("prioritize"))
}

/// Both sections, each with its header, dash rule and surrounding blank
/// lines; empty sections disappear entirely. Done tasks are rendered in
/// the done color regardless of their own state.
pub fn list(ctx: &Ctx, todo: &Store, done: &Store, filter: Option<&str>) -> Result<Vec<String>> {
    let filter = match filter {
        Some(expr) => Some(date::parse_expr(expr, &ctx.config.date_format, ctx.today)?),
        None => None,
    };

    let mut out = Vec::new();
    let todos = todo.list_view(filter);
    if !todos.is_empty() {
        out.push(String::new());
        out.push(format!("Todos ({}):", todos.len()));
        out.push("-".repeat(50));
        for &(idx, task) in &todos {
            out.push(render(ctx, idx, task, None));
        }
        out.push(String::new());
    }

    let dones = done.list_view(filter);
    if !dones.is_empty() {
        out.push(format!("Done ({}):", dones.len()));
        out.push("-".repeat(50));
        for &(idx, task) in &dones {
            out.push(render(ctx, idx, task, Some(&ctx.config.palette.done)));
        }
        out.push(String::new());
    }
    Ok(out)
}

pub fn remove(ctx: &Ctx, todo: &mut Store, idx: usize) -> Result<String> {
    let removed = todo.remove(idx)?;
    Ok(format!("The task: \"{}\" got deleted", render(ctx, idx, &removed, None)))
}

pub fn done(ctx: &Ctx, todo: &mut Store, done: &mut Store, idx: usize) -> Result<String> {
    let task = todo.move_to(idx, done)?;
    Ok(format!("The task: \"{}\" is done! :)", render(ctx, idx, &task, None)))
}

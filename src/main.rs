use anyhow::Result;
use chrono::Local;
use clap::error::ErrorKind;
use clap::Parser;

use dstodo::{
    commands::{self, Ctx},
    config, persistence, Cli, Cmd,
};

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // help and version are not failures; everything else exits 1
            let kind = err.kind();
            let _ = err.print();
            match kind {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => std::process::exit(0),
                _ => std::process::exit(1),
            }
        }
    };
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let ctx = Ctx {
        config: config::load()?,
        today: Local::now().date_naive(),
    };
    let fmt = &ctx.config.date_format;
    let mut todo = persistence::load(&ctx.config.todo_path, fmt, ctx.today)?;

    match cli.cmd {
        Cmd::Add { text, when } => {
            let line = commands::add(&ctx, &mut todo, &text, when.as_deref())?;
            persistence::save(&ctx.config.todo_path, &todo, fmt)?;
            println!("{line}");
        }
        Cmd::Prioritize { text } => {
            let line = commands::prioritize(&ctx, &mut todo, &text)?;
            persistence::save(&ctx.config.todo_path, &todo, fmt)?;
            println!("{line}");
        }
        Cmd::List { filter } => {
            let done = persistence::load(&ctx.config.done_path, fmt, ctx.today)?;
            for line in commands::list(&ctx, &todo, &done, filter.as_deref())? {
                println!("{line}");
            }
        }
        Cmd::Remove { index } => {
            let message = commands::remove(&ctx, &mut todo, index)?;
            persistence::save(&ctx.config.todo_path, &todo, fmt)?;
            println!("{message}");
        }
        Cmd::Done { index } => {
            let mut done = persistence::load(&ctx.config.done_path, fmt, ctx.today)?;
            let message = commands::done(&ctx, &mut todo, &mut done, index)?;
            persistence::save(&ctx.config.todo_path, &todo, fmt)?;
            persistence::save(&ctx.config.done_path, &done, fmt)?;
            println!("{message}");
        }
    }

    Ok(())
}

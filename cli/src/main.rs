use std::env;
use std::io;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use crate::commands::{FieldArgs, NewRecordArgs};
use crate::menu::Menu;

mod commands;
mod menu;
mod table;

#[derive(Subcommand, PartialEq, Debug)]
enum Action {
    /// Show every record, page by page
    List,
    /// Add a record; all six fields are required
    Add(NewRecordArgs),
    /// Change some fields of the record with the given number
    Edit {
        id: u64,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Show records whose given fields match exactly
    Find(FieldArgs),
    /// Interactive menu (the default)
    Menu,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "phonebook.json")]
    file: String,
    #[arg(short, long, default_value_t = 5)]
    page_size: usize,
    #[command(subcommand)]
    action: Option<Action>,
}

fn page_size(from_args: usize) -> Result<usize> {
    let page_size = match env::var("PAGE_SIZE").ok() {
        Some(value) => value.trim().parse::<usize>().map_err(|e| anyhow!("invalid PAGE_SIZE `{}`: {}", value, e))?,
        None => from_args,
    };
    if page_size == 0 {
        return Err(anyhow!("page size must be at least 1"));
    }

    Ok(page_size)
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let args = Args::parse();
    let file_name = env::var("PHONEBOOK_FILE").ok().unwrap_or(args.file);
    let page_size = page_size(args.page_size)?;
    log::info!("using directory file {}", file_name);

    let mut store = recordstore::open_file_store(&file_name)?;
    let mut stdout = io::stdout().lock();

    match args.action.unwrap_or(Action::Menu) {
        Action::List => commands::list(&mut store, page_size, &mut stdout)?,
        Action::Add(fields) => commands::add(&mut store, fields, &mut stdout)?,
        Action::Edit { id, fields } => commands::edit(&mut store, id, fields, &mut stdout)?,
        Action::Find(fields) => commands::find(&mut store, fields, page_size, &mut stdout)?,
        Action::Menu => Menu::new(&mut store, io::stdin().lock(), stdout, page_size).run()?,
    }

    Ok(())
}

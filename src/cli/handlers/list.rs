// src/cli/handlers/list.rs

use crate::cli::args::ListArgs;
use crate::cli::handlers::commons;
use crate::models::{Candidate, FinderConfig};
use crate::system::launcher;
use anyhow::{Result, anyhow};
use clap::Parser;
use colored::Colorize;
use dialoguer::{Select, theme::ColorfulTheme};

/// The main handler for the `list` command.
pub fn handle(args: Vec<String>, config: &FinderConfig) -> Result<()> {
    let list_args = ListArgs::try_parse_from(&args)?;
    let matches = commons::resolve_candidates(config)?;

    println!();
    print_table(&matches, &list_args);
    println!();

    if list_args.ask {
        let versions: Vec<&str> = matches.iter().map(|m| m.version.as_str()).collect();
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Which version of the app do you want to launch?")
            .items(&versions)
            .default(0)
            .interact()?;

        let chosen = matches
            .get(selection)
            .ok_or_else(|| anyhow!("selection out of range"))?;
        commons::announce_launch(chosen, &[]);
        let code = launcher::launch(chosen, &[])?;
        std::process::exit(code)
    }

    Ok(())
}

/// Prints the version table. Column widths are computed from the rows; the
/// `#` column only appears with `--ask`, the path column with `--paths`.
fn print_table(matches: &[Candidate], args: &ListArgs) {
    let rows: Vec<(String, String, String)> = matches
        .iter()
        .map(|m| {
            (
                m.version.clone(),
                m.tags.join(", "),
                dunce::simplified(&m.path).display().to_string(),
            )
        })
        .collect();

    let version_width = column_width("version", rows.iter().map(|r| r.0.as_str()));
    let tags_width = column_width("tags", rows.iter().map(|r| r.1.as_str()));
    let index_width = matches.len().to_string().len().max(1);

    let mut header = String::new();
    if args.ask {
        header.push_str(&format!("{:>index_width$}  ", "#"));
    }
    header.push_str(&format!("{:<version_width$}  {:<tags_width$}", "version", "tags"));
    if args.paths {
        header.push_str("  path");
    }
    println!("{}", header.blue().bold());

    for (i, (version, tags, path)) in rows.iter().enumerate() {
        let mut row = String::new();
        if args.ask {
            row.push_str(&format!("{:>index_width$}  ", i + 1));
        }
        row.push_str(&format!("{version:<version_width$}  {tags:<tags_width$}"));
        if args.paths {
            row.push_str("  ");
            row.push_str(path);
        }
        println!("{}", row);
    }
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(str::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}

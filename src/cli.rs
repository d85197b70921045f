// File: ./src/cli.rs
//! Shared command-line interface logic: argument parsing and help output.
use anyhow::{Result, bail};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive terminal viewer.
    Interactive,
    /// Write the printable HTML page to `out` (stdout when `None`).
    Render {
        query: String,
        category: Option<String>,
        out: Option<PathBuf>,
    },
    Help,
}

/// Global options plus the selected command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub source: Option<String>,
    pub lang: Option<String>,
    pub command: Command,
}

fn value_for(flag: &str, it: &mut impl Iterator<Item = String>) -> Result<String> {
    match it.next() {
        Some(v) => Ok(v),
        None => bail!("Missing value for {}", flag),
    }
}

impl CliArgs {
    /// Parses everything after the binary name.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = CliArgs {
            root: None,
            source: None,
            lang: None,
            command: Command::Interactive,
        };
        let mut it = args.into_iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "-h" | "--help" | "help" => parsed.command = Command::Help,
                "-r" | "--root" => parsed.root = Some(PathBuf::from(value_for(&arg, &mut it)?)),
                "-s" | "--source" => parsed.source = Some(value_for(&arg, &mut it)?),
                "--lang" => parsed.lang = Some(value_for(&arg, &mut it)?),
                "render" => {
                    parsed.command = Command::Render {
                        query: String::new(),
                        category: None,
                        out: None,
                    }
                }
                "-q" | "--query" | "-c" | "--category" | "-o" | "--out" => {
                    let value = value_for(&arg, &mut it)?;
                    let Command::Render {
                        query,
                        category,
                        out,
                    } = &mut parsed.command
                    else {
                        bail!("{} is only valid after 'render'", arg);
                    };
                    match arg.as_str() {
                        "-q" | "--query" => *query = value,
                        "-c" | "--category" => *category = Some(value),
                        _ => *out = Some(PathBuf::from(value)),
                    }
                }
                other => bail!("Unknown argument: {}", other),
            }
        }
        Ok(parsed)
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "nfview v{} - Viewer for NFPC/NFTC change logs and standards listings",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [--source <url|dir>] [--lang <code>]", binary_name);
    println!(
        "    {} render [--query <text>] [--category <tag>] [--out <file.html>]",
        binary_name
    );
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>      Use a different directory for config and cache.");
    println!("    -s, --source <loc>     Base URL or directory holding data.json and friends.");
    println!("    --lang <code>          Interface language (en, ko).");
    println!("    -h, --help             Show this help message.");
    println!();
    println!("RENDER COMMAND:");
    println!("    {} render > page.html                   Full page, no filter", binary_name);
    println!("    {} render --query 101                   Only entries matching '101'", binary_name);
    println!("    {} render --category NFTC --out x.html  Standards scoped to NFTC", binary_name);
    println!();
    println!("KEYBINDINGS:");
    println!("    Tab            Next section (change log, listing, standards)");
    println!("    /              Search (live); Enter keeps, Esc clears");
    println!("    Left/Right     Previous/next category; 0 = all, 1-9 = n-th category");
    println!("    j/k            Move selection");
    println!("    y              Copy the selected link");
    println!("    o, Enter       Open the selected link");
    println!("    p              Print the current view");
    println!("    r              Reload all documents");
    println!("    q              Quit");
}

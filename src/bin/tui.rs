use anyhow::{Context, Result};
use nfview::cli::{CliArgs, Command, print_help};
use nfview::config::Config;
use nfview::context::{AppContext, StandardContext};
use nfview::controller::ViewController;
use nfview::loader::Loader;
use nfview::model::CategoryFilter;
use nfview::render::render_page;
use nfview::snapshot::{Snapshot, SnapshotSources};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = match CliArgs::parse(env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}\n", e);
            print_help("nfview");
            std::process::exit(2);
        }
    };

    if args.command == Command::Help {
        print_help("nfview");
        return Ok(());
    }

    let ctx: Arc<dyn AppContext> = Arc::new(StandardContext::new(args.root.clone()));

    let mut cfg = match Config::load_or_default(ctx.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            // A broken config is reported, never silently replaced by defaults.
            eprintln!("Error loading configuration:\n{}", e);
            std::process::exit(1);
        }
    };
    if let Some(source) = args.source {
        cfg.source = source;
    }
    nfview::init_locale(args.lang.as_deref().or(cfg.locale.as_deref()));

    match args.command {
        Command::Render {
            query,
            category,
            out,
        } => {
            init_term_logger(cfg.log_level_filter());
            render(&cfg, &query, category.as_deref(), out).await
        }
        Command::Interactive => {
            init_file_logger(ctx.as_ref(), cfg.log_level_filter());
            nfview::tui::run(ctx, cfg).await
        }
        Command::Help => Ok(()),
    }
}

async fn render(
    cfg: &Config,
    query: &str,
    category: Option<&str>,
    out: Option<PathBuf>,
) -> Result<()> {
    let loader = Loader::new(&cfg.source, &cfg.user_agent)?;
    let snapshot = Snapshot::load(&loader, &SnapshotSources::from_config(cfg)).await;

    let mut controller = ViewController::new(snapshot);
    controller.set_query(query);
    if let Some(tag) = category {
        controller.set_category(CategoryFilter::parse(tag));
    }
    let html = render_page(controller.view());

    match out {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            log::info!("Page written to {}", path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}

fn init_term_logger(level: LevelFilter) {
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

/// The alternate screen owns the terminal, so the interactive viewer logs to
/// a file in the cache directory instead.
fn init_file_logger(ctx: &dyn AppContext, level: LevelFilter) {
    let Some(path) = ctx.get_log_file_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, ConfigBuilder::new().build(), file);
        }
        Err(e) => eprintln!("Warning: cannot open log file {}: {}", path.display(), e),
    }
}

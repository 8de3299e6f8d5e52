use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pkhouse::{GameType, NameTables};
use pktools::{
    app_paths, convert, create, delete, export, import, list, logging, parse_game, rename, show,
    Context,
};
use std::path::PathBuf;

#[derive(Parser)]
struct Opts {
    #[arg(long, short = 'c')]
    config_dir: Option<PathBuf>,
    #[arg(long, short = 'g', default_value = "sv", value_parser = parse_game)]
    game: GameType,
    /// Directory holding species.txt, moves.txt, natures.txt and abilities.txt
    #[arg(long)]
    names_dir: Option<PathBuf>,
    /// Log to rotating files in this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Log to rotating files under <config dir>/logs instead of stderr
    #[arg(long)]
    log_to_file: bool,
    #[arg(long)]
    enable_debug: bool,
    #[command(subcommand)]
    tool: ToolOpts,
}

#[derive(Subcommand)]
enum ToolOpts {
    List(list::Opts),
    Create(create::Opts),
    Rename(rename::Opts),
    Delete(delete::Opts),
    Show(show::Opts),
    Import(import::Opts),
    Export(export::Opts),
    Convert(convert::Opts),
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let app_paths = app_paths::get_app_paths(opts.config_dir)?;
    if let Some(log_dir) = app_paths.resolve_log_dir(opts.log_dir, opts.log_to_file) {
        std::fs::create_dir_all(&log_dir)?;
        logging::initialize(opts.enable_debug, &log_dir)?;
    } else {
        env_logger::init_from_env(env_logger::Env::new().filter("RUST_LOG"));
    }

    let names = match &opts.names_dir {
        Some(dir) => NameTables::load_dir(dir)
            .with_context(|| format!("Failed to load names from {}", dir.display()))?,
        None => NameTables::default(),
    };
    let ctx = Context {
        game: opts.game,
        bank_root: app_paths.get_bank_root(),
        names,
    };

    match opts.tool {
        ToolOpts::List(opts) => list::run(&ctx, opts),
        ToolOpts::Create(opts) => create::run(&ctx, opts),
        ToolOpts::Rename(opts) => rename::run(&ctx, opts),
        ToolOpts::Delete(opts) => delete::run(&ctx, opts),
        ToolOpts::Show(opts) => show::run(&ctx, opts),
        ToolOpts::Import(opts) => import::run(&ctx, opts),
        ToolOpts::Export(opts) => export::run(&ctx, opts),
        ToolOpts::Convert(opts) => convert::run(ctx.game, opts),
    }
    .map_err(|err| {
        log::error!("Failed to execute command: {err:#}");
        err
    })
}

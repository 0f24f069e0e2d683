//! `viso-live` command line: stream a structure over HTTP, show it in a
//! native window, or embed it in a toolkit-owned window.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use viso_live::options::ConcurrencyMode;
use viso_live::window::toolkit;
use viso_live::{
    Context, LiveError, OffscreenScene, Options, StreamingServer, StructureModel,
};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Live delivery of a GPU-rendered molecular viewer",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity level (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve a bootstrap page and a live PNG stream over HTTP.
    Serve(ServeArgs),
    /// Open a standalone window that redraws continuously.
    Window(WindowArgs),
    /// Open a toolkit-owned window that embeds the view and redraws on expose.
    Embed(WindowArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// PDB or mmCIF file to render
    #[arg(value_name = "STRUCTURE")]
    structure: Option<PathBuf>,

    /// Interface to listen on
    #[arg(long, value_name = "ADDR")]
    address: Option<String>,

    /// Port to listen on (default 8000, or 443 with TLS)
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Serve each connection on its own thread
    #[arg(long)]
    threaded: bool,

    /// Cap each stream at this many frames per second (0 = unlimited)
    #[arg(long, value_name = "N")]
    max_fps: Option<u32>,
}

#[derive(Args, Debug)]
struct WindowArgs {
    /// PDB or mmCIF file to render
    #[arg(value_name = "STRUCTURE")]
    structure: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long, value_name = "PX")]
    width: Option<u32>,

    /// Window height in pixels
    #[arg(long, value_name = "PX")]
    height: Option<u32>,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => log::LevelFilter::Error,
        (false, 0) => log::LevelFilter::Info,
        (false, 1) => log::LevelFilter::Debug,
        (false, _) => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_options(path: Option<&Path>) -> Result<Options, LiveError> {
    match path {
        Some(path) => {
            log::debug!("reading configuration from {}", path.display());
            Options::load(path)
        }
        None => Ok(Options::default()),
    }
}

fn read_structure(
    arg: Option<PathBuf>,
    options: &Options,
) -> Result<Vec<u8>, LiveError> {
    let path = arg.or_else(|| options.structure.clone()).ok_or_else(|| {
        LiveError::Options(
            "no structure file given on the command line or in the config"
                .to_owned(),
        )
    })?;
    log::info!("loading structure {}", path.display());
    std::fs::read(&path).map_err(LiveError::Io)
}

fn serve(args: ServeArgs, mut options: Options) -> Result<(), LiveError> {
    if let Some(address) = args.address {
        options.server.address = address;
    }
    if args.port.is_some() {
        options.server.port = args.port;
    }
    if args.threaded {
        options.server.concurrency = ConcurrencyMode::ThreadPerConnection;
    }
    if let Some(max_fps) = args.max_fps {
        options.server.max_fps = max_fps;
    }

    let bytes = read_structure(args.structure, &options)?;
    let scene = OffscreenScene::load(&bytes, &options.view)?;
    let server = StreamingServer::bind(&options.server, scene)?;
    server.serve_forever()
}

fn apply_window_args(args: &WindowArgs, options: &mut Options) {
    if let Some(width) = args.width {
        options.window.width = width;
    }
    if let Some(height) = args.height {
        options.window.height = height;
    }
}

fn window(args: WindowArgs, mut options: Options) -> Result<(), LiveError> {
    apply_window_args(&args, &mut options);
    let bytes = read_structure(args.structure, &options)?;

    let context = Context::headless()?;
    let model = StructureModel::new(&context, &bytes)?;
    context.run_blocking_loop(&model, &options.window, options.view.style())?;
    drop(model);
    drop(context);
    Ok(())
}

fn embed(args: WindowArgs, mut options: Options) -> Result<(), LiveError> {
    apply_window_args(&args, &mut options);
    let bytes = read_structure(args.structure, &options)?;

    let context = Context::headless()?;
    let model = StructureModel::new(&context, &bytes)?;
    toolkit::run_embedded(&context, &model, &options.window, options.view.style())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = ctrlc::set_handler(|| {
        log::info!("keyboard interrupt");
        std::process::exit(0);
    }) {
        log::warn!("could not install interrupt handler: {e}");
    }

    let result = load_options(cli.config.as_deref()).and_then(|options| {
        match cli.command {
            Commands::Serve(args) => serve(args, options),
            Commands::Window(args) => window(args, options),
            Commands::Embed(args) => embed(args, options),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

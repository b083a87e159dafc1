use clap::Parser;
use miette::Result;
use stn::cli::{Cli, Commands, GlobalOpts};
use stn::core::Direction;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_tracing(&global);

    match cli.command {
        Commands::Init => stn::cli::commands::init::run(&global),
        Commands::List(args) => stn::cli::commands::list::run(args, &global),
        Commands::Summary => stn::cli::commands::summary::run(&global),
        Commands::Show(args) => stn::cli::commands::show::run(args, &global),
        Commands::Add(args) => stn::cli::commands::add::run(args, &global),
        Commands::Update(args) => stn::cli::commands::update::run(args, &global),
        Commands::Issue(args) => stn::cli::commands::txn::run(args, Direction::Issue, &global),
        Commands::Receive(args) => stn::cli::commands::txn::run(args, Direction::Receive, &global),
        Commands::Delete(args) => stn::cli::commands::delete::run(args, &global),
        Commands::Export(args) => stn::cli::commands::export::run(args, &global),
        Commands::Facets => stn::cli::commands::facets::run(&global),
        Commands::Config => stn::cli::commands::config::run(&global),
        Commands::Completions(args) => stn::cli::commands::completions::run(args),
    }
}

/// Log to stderr; `STN_LOG` overrides the level picked from -q/-v
fn init_tracing(global: &GlobalOpts) {
    let fallback = if global.quiet {
        "error"
    } else if global.verbose {
        "stn=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("STN_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

use clap::Parser;
use miette::Result;
use rfp::cli::{Cli, Commands, GlobalOpts};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior so piping to `head` exits quietly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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
    init_logging(&global);

    match cli.command {
        Commands::Init(args) => rfp::cli::commands::init::run(args),
        Commands::List(args) => rfp::cli::commands::list::run(args, &global),
        Commands::Metrics(args) => rfp::cli::commands::metrics::run(args, &global),
        Commands::Funnel(args) => rfp::cli::commands::funnel::run(args, &global),
        Commands::Team(args) => rfp::cli::commands::team::run(args, &global),
        Commands::Delays(args) => rfp::cli::commands::delays::run(args, &global),
        Commands::Export(args) => rfp::cli::commands::export::run(args, &global),
        Commands::Auth(cmd) => rfp::cli::commands::auth::run(cmd, &global),
        Commands::Chat(args) => rfp::cli::commands::chat::run(args, &global),
        Commands::Config(cmd) => rfp::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => rfp::cli::commands::completions::run(args),
    }
}

/// Diagnostics go to stderr; `RFP_LOG` overrides the level picked from flags
fn init_logging(global: &GlobalOpts) {
    let default_level = if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("RFP_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("rfp={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init();
}

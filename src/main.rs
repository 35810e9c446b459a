use clap::Parser;
use miette::Result;
use tdesk::cli::{Cli, Commands};
use tdesk::core::{logging, ColorChoice, Config};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, `tdesk export big.txt | head` panics on the broken pipe.
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

    let (config, skipped) = Config::load_from(global.project.as_deref());
    logging::init_logging(global.verbose, config.log_level.as_deref());
    for err in &skipped {
        tracing::warn!(error = %err, "ignoring config file");
    }
    match config.color_choice() {
        ColorChoice::Always => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        }
        ColorChoice::Never => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        ColorChoice::Auto => {}
    }

    match cli.command {
        Commands::Export(args) => tdesk::cli::commands::export::run(args, &global),
        Commands::Init(args) => tdesk::cli::commands::init::run(args, &global),
        Commands::Config(cmd) => tdesk::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => tdesk::cli::commands::completions::run(args),
    }
}

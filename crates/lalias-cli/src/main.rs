mod cmd;

use anyhow::{anyhow, Context};
use clap::Parser;
use std::ffi::OsString;

#[derive(Parser)]
#[command(
    name = "lal",
    about = "Personal command aliases: store parameterized multi-line shell commands in ./.lal and run them",
    version,
    after_help = "Operations (first token):\n  \
        --append, -a <name> <line>...     append lines, creating the alias if needed\n  \
        --truncate, -t <name> [count]     drop the last count lines (default 1)\n  \
        --delete, -d <name>               remove an alias\n  \
        --rename, -rn <name> <new-name>   rename an alias\n  \
        --overwrite, -ow <name> <line>... replace every line of an alias\n  \
        --list, -l                        show all aliases\n  \
        <name> [arg]...                   run an alias, substituting <<N>> with the Nth arg"
)]
struct Cli {
    /// Print the alias listing as JSON
    #[arg(long)]
    json: bool,

    /// Operation flag and its inputs, or an alias name followed by its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "TOKENS")]
    tokens: Vec<OsString>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let rendered = e.to_string();
            let summary = rendered.lines().next().unwrap_or_default();
            eprintln!("error: {}", summary.trim_start_matches("error: "));
            std::process::exit(1);
        }
    };

    // RUST_LOG replaces the default level outright, so a bare `debug` applies.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = utf8_tokens(cli.tokens).and_then(|tokens| {
        let root = std::env::current_dir().context("failed to resolve the current directory")?;
        cmd::run(&root, &tokens, cli.json)
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn utf8_tokens(raw: Vec<OsString>) -> anyhow::Result<Vec<String>> {
    raw.into_iter()
        .map(|token| {
            token
                .into_string()
                .map_err(|bad| anyhow!("argument is not valid UTF-8: {}", bad.to_string_lossy()))
        })
        .collect()
}

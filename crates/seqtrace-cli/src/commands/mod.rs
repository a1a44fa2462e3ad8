pub mod dot;
pub mod render;
pub mod trace;

use crate::cli::{Cli, Commands};

/// Dispatch a parsed command to its handler.
pub fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Dot(args) => dot::handle(args),
        Commands::Render(args) => render::handle(args, cli.quiet),
        Commands::Trace(args) => trace::handle(args),
    }
}

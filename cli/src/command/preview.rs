use std::io::Write;

use flexible_commands::{Invocation, render};
use rand::{SeedableRng, rngs::StdRng};

use crate::{cli::PreviewArgs, shell::Shell};

use super::utils;

pub fn preview(shell: &mut Shell, args: PreviewArgs) -> anyhow::Result<()> {
    let doc = utils::load_command(&args.path)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let invocation = Invocation {
        arguments: args.arguments,
        online_players: args.players,
    };

    shell.status("Rendering", format!("/{} as {}", doc.alias, doc.run_as))?;
    let mut stdout = std::io::stdout();
    for _ in 0..args.count {
        let line = render(&doc, &invocation, &mut rng)?;
        writeln!(stdout, "{line}")?;
    }
    stdout.flush()?;
    Ok(())
}

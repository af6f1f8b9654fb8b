fn main() -> anyhow::Result<()> {
    flexible_commands_cli::run_cli()
}

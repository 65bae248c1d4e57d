fn main() -> anyhow::Result<()> {
    glbscope::cli::run_cli()
}

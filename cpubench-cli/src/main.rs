fn main() -> anyhow::Result<()> {
    cpubench_cli::run()
}

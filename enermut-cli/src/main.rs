//! Enermut binary entry point.

fn main() -> anyhow::Result<()> {
    enermut_cli::run()
}

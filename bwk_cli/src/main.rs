use bwk_cli::{inner_main, Cli};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let value = inner_main(args)?;
    println!("{value:#}");
    Ok(())
}

use clap::Parser;
use console::style;
use reposync::config::Cli;
use reposync::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli)?;

    println!("reposync v{}", reposync::VERSION);

    match reposync::commands::sync::run(&config)? {
        Some(branch) => println!(
            "{} Branch '{}' pushed.",
            style(">>>").cyan().bold(),
            branch
        ),
        None => println!(
            "{} Nothing pushed.",
            style(">>>").cyan().bold()
        ),
    }

    Ok(())
}

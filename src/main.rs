use anyhow::{Context, Result};
use gitscroll::{Config, generate_site};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    config.validate().context("Invalid configuration")?;

    let report = generate_site(&config).context("Failed to generate site")?;
    let output = &report.output;

    println!(
        "Generated: {} ({} files)",
        output.join("files.html").display(),
        report.files
    );
    println!(
        "Generated: {} ({} commits, {} new commit pages)",
        output.join("log.html").display(),
        report.commits,
        report.commit_pages_written
    );
    println!(
        "Generated: {} ({} refs)",
        output.join("refs.html").display(),
        report.refs
    );
    println!(
        "Generated: {} ({} entries)",
        output.join("atom.xml").display(),
        report.feed_entries
    );

    if config.open {
        let log = output.join("log.html");
        if let Err(e) = open::that(&log) {
            tracing::warn!("Failed to open {}: {}", log.display(), e);
        }
    }

    Ok(())
}

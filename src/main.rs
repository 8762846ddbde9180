use anyhow::Result;
use log::LevelFilter;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = regprobe::cli::build_cli().get_matches();
    regprobe::cli::run(&matches).await?;
    Ok(())
}

use anyhow::Result;

mod app;
mod cli;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse();
    app::run(args).await
}

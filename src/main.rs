use anyhow::Result;
use clap::Parser;
use classcharts::demo::{self, config::Args, log_format};

#[tokio::main]
async fn main() -> Result<()> {
    log_format::init();

    let args = Args::parse();
    demo::run(args).await
}

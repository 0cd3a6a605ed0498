//! Bookshelf server binary

use bookshelf_core::logging_facility;
use bookshelf_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load();
    logging_facility::init(config.log_profile.into());

    bookshelf_server::serve(config).await
}

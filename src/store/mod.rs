pub mod artworks;
pub mod favorites;

pub use artworks::ArtworkStore;
pub use favorites::FavoriteStore;

use crate::config::DatabaseConfig;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Database};

/// Connect to the Atlas cluster and verify it with a ping.
///
/// Uses Stable API v1 in strict mode so the driver rejects commands
/// outside the versioned API surface.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Database> {
    let mut options = ClientOptions::parse(config.connection_uri()).await?;
    options.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );

    let client = Client::with_options(options)?;
    let db = client.database(&config.db_name);
    db.run_command(doc! { "ping": 1 }, None).await?;

    Ok(db)
}

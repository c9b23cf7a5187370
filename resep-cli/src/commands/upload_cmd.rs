use clap::Args;
use std::path::PathBuf;

use resep_core::{ApiError, UploadClient};

#[derive(Args)]
pub struct UploadCommand {
    /// Path to the image file (.jpg, .jpeg, .png, .webp, max 5 MiB)
    pub path: PathBuf,
}

impl UploadCommand {
    pub async fn run(
        &self,
        client: Option<&UploadClient>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let client = client.ok_or(ApiError::NotConfigured)?;

        let response = client.upload(&self.path).await?;
        println!("Upload complete.");

        // Surface the stored URL when the server reports one.
        let url = response
            .get("url")
            .or_else(|| response.get("data").and_then(|data| data.get("url")))
            .and_then(|value| value.as_str());

        match url {
            Some(url) => println!("URL: {}", url),
            None => println!("{}", serde_json::to_string_pretty(&response)?),
        }

        Ok(())
    }
}

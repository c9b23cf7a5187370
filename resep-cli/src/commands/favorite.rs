use clap::{Args, Subcommand};

use resep_core::{FavoritesService, IdentityProvider, RecipeId};

use super::OutputFormat;

#[derive(Args)]
pub struct FavoriteCommand {
    #[command(subcommand)]
    pub command: FavoriteSubcommand,
}

#[derive(Subcommand)]
pub enum FavoriteSubcommand {
    /// List favorites (server merged with the local fallback)
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Toggle a recipe in the favorites
    Toggle {
        /// Recipe id (number or slug)
        recipe_id: String,
    },
}

impl FavoriteCommand {
    pub async fn run(
        &self,
        service: &FavoritesService,
        identity: &mut IdentityProvider,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let user_identifier = identity.get_or_create();

        match &self.command {
            FavoriteSubcommand::List { format } => {
                let favorites = service.fetch(&user_identifier).await;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&favorites)?);
                    }
                    OutputFormat::Text => {
                        if favorites.is_empty() {
                            println!("No favorites yet.");
                        } else {
                            println!("Favorites ({}):", favorites.len());
                            for id in &favorites {
                                println!("  - {}", id);
                            }
                        }
                    }
                }
            }

            FavoriteSubcommand::Toggle { recipe_id } => {
                let id: RecipeId = recipe_id.parse()?;
                let state = service.toggle(&id, &user_identifier).await?;

                if state {
                    println!("Added {} to favorites", id);
                } else {
                    println!("Removed {} from favorites", id);
                }
            }
        }

        Ok(())
    }
}

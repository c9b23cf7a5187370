use clap::{Args, Subcommand};

use resep_core::{ApiClient, ApiError, Category, Difficulty, RecipeQuery, SortOrder};

use super::OutputFormat;

#[derive(Args)]
pub struct RecipeCommand {
    #[command(subcommand)]
    pub command: RecipeSubcommand,
}

#[derive(Subcommand)]
pub enum RecipeSubcommand {
    /// List recipes from the catalog
    List {
        /// Filter by category (makanan, minuman)
        #[arg(long)]
        category: Option<String>,

        /// Filter by difficulty (mudah, sedang, sulit)
        #[arg(long)]
        difficulty: Option<String>,

        /// Sort field (e.g., created_at)
        #[arg(long = "sort-by")]
        sort_by: Option<String>,

        /// Sort direction (asc, desc)
        #[arg(long)]
        order: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl RecipeCommand {
    pub async fn run(&self, client: Option<&ApiClient>) -> Result<(), Box<dyn std::error::Error>> {
        let client = client.ok_or(ApiError::NotConfigured)?;

        match &self.command {
            RecipeSubcommand::List {
                category,
                difficulty,
                sort_by,
                order,
                format,
            } => {
                let query = RecipeQuery {
                    category: category
                        .as_deref()
                        .map(str::parse::<Category>)
                        .transpose()?,
                    difficulty: difficulty
                        .as_deref()
                        .map(str::parse::<Difficulty>)
                        .transpose()?,
                    sort_by: sort_by.clone(),
                    order: order.as_deref().map(str::parse::<SortOrder>).transpose()?,
                };

                let recipes = client.list_recipes(&query).await?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&recipes)?);
                    }
                    OutputFormat::Text => {
                        if recipes.is_empty() {
                            println!("No recipes found.");
                            return Ok(());
                        }

                        for recipe in &recipes {
                            let category = recipe
                                .category
                                .map(|c| c.to_string())
                                .unwrap_or_else(|| "-".to_string());
                            let difficulty = recipe
                                .difficulty
                                .map(|d| d.to_string())
                                .unwrap_or_else(|| "-".to_string());
                            println!(
                                "  {:>6}  {:30}  {:8}  {}",
                                recipe.id.to_string(),
                                recipe.name,
                                category,
                                difficulty
                            );
                        }
                        println!("\nTotal: {} recipe(s)", recipes.len());
                    }
                }
            }
        }

        Ok(())
    }
}

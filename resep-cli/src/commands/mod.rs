use clap::ValueEnum;

mod config_cmd;
mod favorite;
mod profile;
mod recipe;
mod upload_cmd;

pub use config_cmd::ConfigCommand;
pub use favorite::FavoriteCommand;
pub use profile::ProfileCommand;
pub use recipe::RecipeCommand;
pub use upload_cmd::UploadCommand;

/// Output format shared by listing commands.
#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

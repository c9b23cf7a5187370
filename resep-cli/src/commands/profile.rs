use clap::{Args, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

use resep_core::{validate_image, IdentityProvider, LocalStore};

use super::OutputFormat;

#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Show the stored profile
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Edit username and bio
    Edit {
        /// New username
        #[arg(long)]
        username: Option<String>,

        /// New bio
        #[arg(long)]
        bio: Option<String>,
    },

    /// Set the avatar from an image file
    Avatar {
        /// Path to the image (.jpg, .jpeg, .png, .webp, max 5 MiB)
        path: PathBuf,
    },

    /// Remove profile, favorites and user identifier
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl ProfileCommand {
    pub fn run(
        &self,
        store: &LocalStore,
        identity: &mut IdentityProvider,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ProfileSubcommand::Show { format } => {
                let profile = store.load_profile();
                let user_identifier = identity.get_or_create();

                match format {
                    OutputFormat::Json => {
                        let output = serde_json::json!({
                            "user_identifier": user_identifier,
                            "username": profile.username,
                            "bio": profile.bio,
                            "avatar": profile.avatar,
                        });
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", profile.username);
                        println!("{}", "=".repeat(profile.username.len()));
                        println!("ID: {}", user_identifier);
                        if profile.bio.is_empty() {
                            println!("Bio: (not set)");
                        } else {
                            println!("Bio: {}", profile.bio);
                        }
                        match &profile.avatar {
                            Some(avatar) => println!("Avatar: set ({} bytes)", avatar.len()),
                            None => println!("Avatar: (not set)"),
                        }
                    }
                }
            }

            ProfileSubcommand::Edit { username, bio } => {
                if username.is_none() && bio.is_none() {
                    return Err("Nothing to change. Pass --username and/or --bio.".into());
                }

                let mut profile = store.load_profile();
                if let Some(username) = username {
                    profile.username = username.clone();
                }
                if let Some(bio) = bio {
                    profile.bio = bio.clone();
                }
                store.save_profile(&profile)?;

                println!("Profile saved.");
            }

            ProfileSubcommand::Avatar { path } => {
                let info = validate_image(path)?;
                let bytes = std::fs::read(path)?;

                let mut profile = store.load_profile();
                profile.set_avatar(info.mime, &bytes);
                store.save_profile(&profile)?;

                println!("Avatar updated ({} bytes, {}).", info.size, info.mime);
            }

            ProfileSubcommand::Reset { yes } => {
                if !yes && !confirm("Remove profile, favorites and identifier? [y/N]: ")? {
                    println!("Aborted.");
                    return Ok(());
                }

                store.reset()?;
                identity.reset()?;
                println!("Local data removed. A new identifier will be generated on next use.");
            }
        }

        Ok(())
    }
}

fn confirm(prompt: &str) -> Result<bool, io::Error> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y"))
}

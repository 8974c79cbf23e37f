use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Personalized Story Maker")]
pub struct Cli {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[arg(long, default_value = "dist")]
    pub dist_dir: PathBuf,
    /// TOML file holding GEMINI_API_KEY, used when the environment has none
    #[arg(long, default_value = "secrets.toml")]
    pub secrets_file: PathBuf,
}

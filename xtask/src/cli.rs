use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(about = "Story Maker utilities - trunk must be installed")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Build the frontend and launch the app")]
    Launch,
    #[command(about = "Build a release bundle under StoryMaker/")]
    Dist { target_triple: Option<String> },
}

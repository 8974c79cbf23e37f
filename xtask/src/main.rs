use clap::Parser;
use std::path::Path;

mod cli;

const BUNDLE_DIR: &str = "StoryMaker";

async fn run(cmd: &mut tokio::process::Command) -> Result<(), Box<dyn std::error::Error>> {
    let status = cmd.spawn()?.wait().await?;
    if !status.success() {
        return Err(format!("{:?} exited with {}", cmd.as_std(), status).into());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Launch => {
            let mut cmd = tokio::process::Command::new("trunk");
            cmd.current_dir(std::fs::canonicalize("frontend")?);
            cmd.arg("build");
            run(&mut cmd).await?;

            let mut cmd = tokio::process::Command::new("cargo");
            cmd.arg("run")
                .arg("--package")
                .arg("story-launcher")
                .arg("--")
                .arg("--dist-dir")
                .arg("frontend/dist");
            run(&mut cmd).await?;

            Ok(())
        }
        cli::Command::Dist { target_triple } => {
            let mut cmd = tokio::process::Command::new("cargo");
            cmd.arg("build")
                .arg("--package")
                .arg("story-launcher")
                .arg("--release");
            if let Some(target_triple) = &target_triple {
                cmd.arg("--target").arg(target_triple);
            }
            run(&mut cmd).await?;

            let mut cmd = tokio::process::Command::new("trunk");
            cmd.current_dir(std::fs::canonicalize("frontend")?);
            cmd.arg("build").arg("--release");
            run(&mut cmd).await?;

            let release_dir = match &target_triple {
                Some(triple) => Path::new("target").join(triple).join("release"),
                None => Path::new("target").join("release"),
            };
            let bundle_dist = Path::new(BUNDLE_DIR).join("dist");
            tokio::fs::create_dir_all(&bundle_dist).await?;
            tokio::fs::copy(
                release_dir.join("story-launcher"),
                Path::new(BUNDLE_DIR).join("story-launcher"),
            )
            .await?;

            let mut entries = tokio::fs::read_dir("frontend/dist").await?;
            while let Some(file) = entries.next_entry().await? {
                tokio::fs::copy(file.path(), bundle_dist.join(file.file_name())).await?;
            }

            Ok(())
        }
    }
}

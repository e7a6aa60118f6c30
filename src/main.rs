use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};

use assetgen::alphabet;
use assetgen::glyph::GlyphProducer;
use assetgen::pipeline::run_pipeline;
use assetgen::tts::TtsProducer;

mod args;
use args::{Args, Command};

const SCRATCH_DIR: &str = "gen_tmp";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info") // set to "debug" for more logs
        .init();

    let args = Args::parse();

    let scratch_dir = prepare_scratch_dir(SCRATCH_DIR)?;
    let result = run(args.command, &scratch_dir).await;

    // Best-effort cleanup; a leftover scratch dir is not a pipeline failure.
    if let Err(e) = fs::remove_dir_all(&scratch_dir) {
        warn!("could not remove scratch dir {}: {}", scratch_dir.display(), e);
    }

    result
}

async fn run(command: Command, scratch_dir: &Path) -> anyhow::Result<()> {
    match command {
        Command::Audio {
            tts_bin,
            out,
            tool_timeout_secs,
        } => {
            info!("Starting audio asset generation with '{}'", tts_bin);
            let items = alphabet::spoken_symbols().map(|s| (s.symbol, s.phrase()));
            let mut producer =
                TtsProducer::new(&tts_bin, scratch_dir, Duration::from_secs(tool_timeout_secs));
            let doc = run_pipeline(items, &mut producer, Path::new(&out)).await?;
            info!("Audio document complete: {} entries in {}", doc.len(), out);
        }
        Command::Glyphs {
            browser_bin,
            trim_bin,
            template,
            out,
            tool_timeout_secs,
        } => {
            if !Path::new(&template).exists() {
                error!("Template file not found: {}", template);
                std::process::exit(1);
            }
            let template_html = fs::read_to_string(&template)?;
            info!("Starting glyph asset generation with '{}'", browser_bin);
            let items = alphabet::glyph_symbols().map(|c| (c, c.to_string()));
            let mut producer = GlyphProducer::new(
                &browser_bin,
                &trim_bin,
                template_html,
                scratch_dir,
                Duration::from_secs(tool_timeout_secs),
            );
            let doc = run_pipeline(items, &mut producer, Path::new(&out)).await?;
            info!("Glyph document complete: {} entries in {}", doc.len(), out);
        }
    }
    Ok(())
}

fn prepare_scratch_dir(path: &str) -> anyhow::Result<PathBuf> {
    if Path::new(path).exists() {
        info!("Removing existing scratch dir '{}'", path);
        fs::remove_dir_all(path)?;
    }
    fs::create_dir_all(path)?;
    // The glyph pipeline builds a file:// URL from this path.
    Ok(fs::canonicalize(path)?)
}

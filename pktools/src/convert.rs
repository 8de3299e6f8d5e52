use clap::{Args, ValueEnum};
use pkhouse::{crypto, GameType};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

#[derive(Debug, Args)]
pub struct Opts {
    #[arg(value_enum)]
    pub direction: Direction,
    #[arg(long, value_parser = crate::parse_game)]
    pub game: Option<GameType>,
    #[arg(long)]
    pub input: PathBuf,
    #[arg(long)]
    pub output: PathBuf,
}

/// Encrypts or decrypts a single record file. Uses the global game unless
/// `--game` overrides it.
pub fn run(default_game: GameType, opts: Opts) -> anyhow::Result<()> {
    let profile = opts.game.unwrap_or(default_game).profile();
    let input = std::fs::read(&opts.input)?;
    if input.len() != profile.party_size && input.len() != profile.stored_size() {
        log::warn!(
            "{} is {} bytes, expected {} or {}",
            opts.input.display(),
            input.len(),
            profile.stored_size(),
            profile.party_size
        );
    }
    let output = match opts.direction {
        Direction::Encrypt => crypto::encrypt(&input, profile),
        Direction::Decrypt => crypto::decrypt(&input, profile),
    };
    std::fs::write(&opts.output, output)?;
    println!("Wrote {}", opts.output.display());
    Ok(())
}

pub mod app_paths;
pub mod convert;
pub mod create;
pub mod delete;
pub mod export;
pub mod import;
pub mod list;
pub mod logging;
pub mod rename;
pub mod show;

use pkhouse::{BankManager, GameType, NameTables};
use std::path::PathBuf;

/// State shared by every subcommand.
pub struct Context {
    pub game: GameType,
    pub bank_root: PathBuf,
    pub names: NameTables,
}

impl Context {
    pub fn bank_manager(&self) -> anyhow::Result<BankManager> {
        Ok(BankManager::new(&self.bank_root, self.game)?)
    }
}

pub fn parse_game(value: &str) -> Result<GameType, String> {
    GameType::from_dir_name(value).ok_or_else(|| {
        let known = GameType::ALL
            .iter()
            .map(|game| game.dir_name())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown game '{value}', expected one of: {known}")
    })
}

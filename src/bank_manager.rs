use std::path::{Path, PathBuf};

use crate::{game::GameType, Bank, Error, Result};

pub const BANK_EXTENSION: &str = "bin";
pub const DEFAULT_BANK_NAME: &str = "Default";
/// Single-file bank written before banks were split per game.
pub const LEGACY_BANK_FILE: &str = "bank.bin";
pub const MAX_NAME_LENGTH: usize = 32;

const ILLEGAL_NAME_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];
const PATH_SEPARATORS: &[char] = &['/', '\\'];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BankInfo {
    pub name: String,
    pub path: PathBuf,
    pub occupied: usize,
}

/// Catalog of the bank files of one game family, stored as
/// `<root>/<family dir>/<name>.bin`.
pub struct BankManager {
    root: PathBuf,
    game: GameType,
    banks: Vec<BankInfo>,
}

impl BankManager {
    pub fn new(root: impl Into<PathBuf>, game: GameType) -> Result<Self> {
        let mut manager = BankManager {
            root: root.into(),
            game,
            banks: Vec::new(),
        };
        manager.initialize()?;
        Ok(manager)
    }

    fn initialize(&mut self) -> Result<()> {
        std::fs::create_dir_all(self.bank_dir())?;
        if self.game == GameType::ScarletViolet {
            self.migrate_legacy_bank()?;
        }
        self.refresh()
    }

    fn migrate_legacy_bank(&self) -> Result<()> {
        let legacy_path = self.root.join(LEGACY_BANK_FILE);
        let default_path = self.bank_path(DEFAULT_BANK_NAME);
        if legacy_path.is_file() && !default_path.exists() {
            std::fs::rename(&legacy_path, &default_path)?;
            log::info!(
                "Migrated legacy bank {} to {}",
                legacy_path.display(),
                default_path.display()
            );
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn game_type(&self) -> GameType {
        self.game
    }

    pub fn set_game_type(&mut self, game: GameType) -> Result<()> {
        self.game = game;
        self.initialize()
    }

    pub fn bank_dir(&self) -> PathBuf {
        self.root.join(self.game.dir_name())
    }

    pub fn bank_path(&self, name: &str) -> PathBuf {
        self.bank_dir().join(format!("{name}.{BANK_EXTENSION}"))
    }

    pub fn banks(&self) -> &[BankInfo] {
        &self.banks
    }

    pub fn find(&self, name: &str) -> Option<&BankInfo> {
        self.banks.iter().find(|info| info.name == name)
    }

    /// Rescans the active directory.
    pub fn refresh(&mut self) -> Result<()> {
        let mut banks = Vec::new();
        for entry in std::fs::read_dir(self.bank_dir())? {
            let path = entry?.path();
            if !path.is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(BANK_EXTENSION)
            {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let mut bank = Bank::new(self.game);
            let occupied = match bank.load(&path) {
                Ok(()) => bank.occupied_count(),
                Err(err) => {
                    log::warn!("Unable to read bank {}: {err}", path.display());
                    0
                }
            };
            banks.push(BankInfo {
                name: name.to_owned(),
                path,
                occupied,
            });
        }

        banks.sort_by_key(|info| info.name.to_lowercase());
        log::debug!("Found {} banks in {}", banks.len(), self.bank_dir().display());
        self.banks = banks;
        Ok(())
    }

    /// Creates an empty bank and returns its sanitized name.
    pub fn create_bank(&mut self, name: &str) -> Result<String> {
        let name = checked_name(name)?;
        let path = self.bank_path(&name);
        if path.exists() {
            return Err(Error::AlreadyExists(path));
        }
        Bank::new(self.game).save(&path)?;
        log::info!("Created bank {name}");
        self.refresh()?;
        Ok(name)
    }

    /// Path of a bank in the catalog. Names that are not listed, including
    /// anything that would leave the family directory, are not found.
    fn existing_bank_path(&self, name: &str) -> Result<PathBuf> {
        let path = self.bank_path(&canonical_name(name)?);
        match self.find(name) {
            Some(info) if path.is_file() => Ok(info.path.clone()),
            _ => Err(Error::NotFound(path)),
        }
    }

    pub fn rename_bank(&mut self, old_name: &str, new_name: &str) -> Result<String> {
        let old_path = self.existing_bank_path(old_name)?;
        let new_name = checked_name(new_name)?;
        let new_path = self.bank_path(&new_name);
        if new_path.exists() {
            return Err(Error::AlreadyExists(new_path));
        }
        std::fs::rename(&old_path, &new_path)?;
        log::info!("Renamed bank {old_name} to {new_name}");
        self.refresh()?;
        Ok(new_name)
    }

    pub fn delete_bank(&mut self, name: &str) -> Result<()> {
        let path = self.existing_bank_path(name)?;
        std::fs::remove_file(&path)?;
        log::info!("Deleted bank {name}");
        self.refresh()
    }

    /// Loads the named bank. A bank that does not exist yet comes back empty.
    pub fn load_bank(&self, name: &str) -> Result<Bank> {
        let mut bank = Bank::new(self.game);
        bank.load(self.bank_path(&canonical_name(name)?))?;
        Ok(bank)
    }

    /// Writes `bank` under `name`, which must already be a sanitized name.
    pub fn save_bank(&mut self, name: &str, bank: &Bank) -> Result<()> {
        bank.save(self.bank_path(&canonical_name(name)?))?;
        self.refresh()
    }
}

/// Strips characters that are not allowed in file names, trims surrounding
/// whitespace and caps the length. Path separators become spaces so that
/// `"My/Bank"` reads as `"My Bank"`. Case is preserved.
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if PATH_SEPARATORS.contains(&c) { ' ' } else { c })
        .filter(|c| !ILLEGAL_NAME_CHARS.contains(c) && !c.is_control())
        .collect();
    cleaned
        .trim()
        .chars()
        .take(MAX_NAME_LENGTH)
        .collect::<String>()
        .trim_end()
        .to_owned()
}

fn checked_name(name: &str) -> Result<String> {
    let sanitized = sanitize_name(name);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        return Err(Error::InvalidName(name.to_owned()));
    }
    Ok(sanitized)
}

/// Accepts only names that sanitizing leaves unchanged.
fn canonical_name(name: &str) -> Result<String> {
    match checked_name(name) {
        Ok(sanitized) if sanitized == name => Ok(sanitized),
        _ => Err(Error::InvalidName(name.to_owned())),
    }
}

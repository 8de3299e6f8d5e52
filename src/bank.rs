use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::{game::GameType, Error, Pokemon, Result};

pub const BANK_MAGIC: &[u8; 8] = b"PKHOUSE\0";
pub const BANK_HEADER_SIZE: usize = 16;

/// A fixed grid of decrypted records for one game family.
#[derive(Clone, Debug)]
pub struct Bank {
    game: GameType,
    slots: Vec<Pokemon>,
}

impl Default for Bank {
    fn default() -> Self {
        Bank::new(GameType::default())
    }
}

impl Bank {
    pub fn new(game: GameType) -> Self {
        Bank {
            game,
            slots: vec![Pokemon::new(game); game.box_count() * game.slots_per_box()],
        }
    }

    pub fn game_type(&self) -> GameType {
        self.game
    }

    /// Switches to the shape of `game`, discarding every slot.
    pub fn set_game_type(&mut self, game: GameType) {
        *self = Bank::new(game);
    }

    pub fn box_count(&self) -> usize {
        self.game.box_count()
    }

    pub fn slots_per_box(&self) -> usize {
        self.game.slots_per_box()
    }

    pub fn slot_size(&self) -> usize {
        self.game.slot_size()
    }

    fn slot_index(&self, box_number: usize, slot: usize) -> Option<usize> {
        if box_number < self.box_count() && slot < self.slots_per_box() {
            Some(box_number * self.slots_per_box() + slot)
        } else {
            None
        }
    }

    /// Returns the record at `(box_number, slot)`, or an empty record when the
    /// position is out of range.
    pub fn get_slot(&self, box_number: usize, slot: usize) -> Pokemon {
        self.slot_index(box_number, slot)
            .map(|idx| self.slots[idx].clone())
            .unwrap_or_else(|| Pokemon::new(self.game))
    }

    /// Out-of-range positions are ignored.
    pub fn set_slot(&mut self, box_number: usize, slot: usize, pokemon: &Pokemon) {
        if let Some(idx) = self.slot_index(box_number, slot) {
            self.slots[idx] = Pokemon::from_decrypted(pokemon.data(), self.game);
        }
    }

    pub fn clear_slot(&mut self, box_number: usize, slot: usize) {
        if let Some(idx) = self.slot_index(box_number, slot) {
            self.slots[idx] = Pokemon::new(self.game);
        }
    }

    /// `(box, slot, record)` for every non-empty slot.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (usize, usize, &Pokemon)> + '_ {
        let per_box = self.slots_per_box();
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, pkmn)| !pkmn.is_empty())
            .map(move |(idx, pkmn)| (idx / per_box, idx % per_box, pkmn))
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|pkmn| !pkmn.is_empty()).count()
    }

    /// Replaces the contents with the bank at `path`. A missing file is not an
    /// error and leaves the bank as it was; so does any failure.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = match std::fs::read(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No bank at {}, keeping an empty bank", path.display());
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        *self = Bank::from_bytes(&contents).map_err(|err| {
            log::warn!("Rejected bank {}: {err}", path.display());
            err
        })?;
        log::debug!(
            "Loaded {} bank from {} ({} occupied)",
            self.game,
            path.display(),
            self.occupied_count()
        );
        Ok(())
    }

    pub fn from_bytes(contents: &[u8]) -> Result<Self> {
        if contents.len() < BANK_HEADER_SIZE || &contents[..8] != BANK_MAGIC {
            return Err(Error::BadMagic);
        }
        let version = LittleEndian::read_u32(&contents[8..12]);
        let game = GameType::from_version(version).ok_or(Error::UnsupportedVersion(version))?;

        let slot_size = game.slot_size();
        let slot_count = game.box_count() * game.slots_per_box();
        let records = &contents[BANK_HEADER_SIZE..];
        if records.len() < slot_count * slot_size {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }

        let slots = records
            .chunks_exact(slot_size)
            .take(slot_count)
            .map(|record| Pokemon::from_decrypted(record, game))
            .collect();
        Ok(Bank { game, slots })
    }

    pub fn write_to(&self, writer: &mut impl Write) -> io::Result<()> {
        writer.write_all(BANK_MAGIC)?;
        writer.write_u32::<LittleEndian>(self.game.version())?;
        writer.write_u32::<LittleEndian>(0)?;
        for pkmn in &self.slots {
            writer.write_all(pkmn.data())?;
        }
        Ok(())
    }

    /// Writes the whole bank to `path`. The data goes to a sibling temporary
    /// file first, so `path` is either fully replaced or left untouched.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let temp_path = temp_path_for(path);
        let result = File::create(&temp_path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            self.write_to(&mut writer)?;
            writer.into_inner().map_err(|err| err.into_error())?.sync_all()
        });

        match result.and_then(|()| std::fs::rename(&temp_path, path)) {
            Ok(()) => {
                log::debug!("Saved {} bank to {}", self.game, path.display());
                Ok(())
            }
            Err(err) => {
                log::error!("Failed to save bank to {}: {err}", path.display());
                let _ = std::fs::remove_file(&temp_path);
                Err(err.into())
            }
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pokemon(species: u16) -> Pokemon {
        let mut pkmn = Pokemon::new(GameType::ScarletViolet);
        pkmn.set_encryption_constant(0xA5A5_0000 | u32::from(species));
        pkmn.set_species_internal(species);
        pkmn
    }

    #[test]
    fn default_shape_is_scarlet_violet() {
        let bank = Bank::default();
        assert_eq!(bank.box_count(), 32);
        assert_eq!(bank.slots_per_box(), 30);
        assert_eq!(bank.slot_size(), 0x158);
        assert_eq!(bank.occupied_count(), 0);
    }

    #[test]
    fn empty_bank_serialization() {
        let mut out = Vec::new();
        Bank::default().write_to(&mut out).unwrap();
        assert_eq!(
            &out[..16],
            &[0x50, 0x4B, 0x48, 0x4F, 0x55, 0x53, 0x45, 0x00, 0x01, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(out.len(), 16 + 960 * 0x158);
        assert!(out[16..].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn slot_set_get() {
        let mut bank = Bank::default();
        let pkmn = pokemon(25);
        bank.set_slot(3, 7, &pkmn);
        assert_eq!(bank.get_slot(3, 7), pkmn);
        assert_eq!(bank.get_slot(3, 7).game(), GameType::ScarletViolet);
        assert_eq!(bank.occupied_count(), 1);
        let occupied: Vec<_> = bank.iter_occupied().map(|(b, s, _)| (b, s)).collect();
        assert_eq!(occupied, vec![(3, 7)]);

        bank.clear_slot(3, 7);
        assert!(bank.get_slot(3, 7).is_empty());
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut bank = Bank::default();
        bank.set_slot(32, 0, &pokemon(1));
        bank.set_slot(0, 30, &pokemon(1));
        bank.clear_slot(99, 99);
        assert_eq!(bank.occupied_count(), 0);
        assert!(bank.get_slot(40, 40).is_empty());
    }

    #[test]
    fn get_slot_is_tagged_with_bank_game() {
        let mut bank = Bank::new(GameType::LegendsArceus);
        bank.set_slot(0, 0, &pokemon(1));
        let pkmn = bank.get_slot(0, 0);
        assert_eq!(pkmn.game(), GameType::LegendsArceus);
        assert_eq!(pkmn.data().len(), 0x178);
    }

    #[test]
    fn rejects_unknown_version() {
        let mut bytes = BANK_MAGIC.to_vec();
        bytes.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
        bytes.extend_from_slice(&[0; 4]);
        assert!(matches!(
            Bank::from_bytes(&bytes),
            Err(Error::UnsupportedVersion(0xFFFF_FFFF))
        ));
    }

    #[test]
    fn rejects_bad_magic() {
        assert!(matches!(Bank::from_bytes(b"PKROAM\0\0\x01\0\0\0\0\0\0\0"), Err(Error::BadMagic)));
        assert!(matches!(Bank::from_bytes(b"PKH"), Err(Error::BadMagic)));
    }

    #[test]
    fn set_game_type_reshapes() {
        let mut bank = Bank::default();
        bank.set_slot(0, 0, &pokemon(1));
        bank.set_game_type(GameType::LetsGo);
        assert_eq!(bank.box_count(), 40);
        assert_eq!(bank.slots_per_box(), 25);
        assert_eq!(bank.occupied_count(), 0);
    }
}

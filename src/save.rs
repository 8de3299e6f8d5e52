use std::{io, path::Path};

use crate::{
    game::GameType,
    text::{decode_utf16_field, encode_utf16_field},
    Error, Pokemon, Result,
};

pub const KEY_BOX_DATA: u32 = 0x0D66_012C;
pub const KEY_BOX_LAYOUT: u32 = 0x1972_2C89;

const BOX_COUNT: usize = 32;
const SLOTS_PER_BOX: usize = 30;
const SLOT_GAP: usize = 0x30;
const BOX_NAME_LENGTH: usize = 0x22;
const SAVE_GAME: GameType = GameType::ScarletViolet;

/// One named block of a decrypted save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveBlock {
    pub key: u32,
    pub data: Vec<u8>,
}

/// The encrypted block container a save file is stored in.
pub trait BlockStore {
    fn decrypt(&self, raw: &[u8]) -> io::Result<Vec<SaveBlock>>;

    fn encrypt(&self, blocks: &[SaveBlock]) -> io::Result<Vec<u8>>;

    fn find_block(&self, blocks: &[SaveBlock], key: u32) -> Option<usize> {
        blocks.iter().position(|block| block.key == key)
    }
}

/// Box storage of a Scarlet/Violet save.
///
/// Each box slot is an encrypted party-sized record followed by `SLOT_GAP`
/// bytes of padding.
pub struct SaveFile<S: BlockStore> {
    store: S,
    blocks: Vec<SaveBlock>,
    box_data: usize,
    box_layout: Option<usize>,
}

impl<S: BlockStore> SaveFile<S> {
    pub fn load(path: impl AsRef<Path>, store: S) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|err| {
            log::error!("Unable to read save {}: {err}", path.display());
            err
        })?;
        let save = SaveFile::from_bytes(&raw, store)?;
        log::debug!("Loaded save {} ({} blocks)", path.display(), save.blocks.len());
        Ok(save)
    }

    pub fn from_bytes(raw: &[u8], store: S) -> Result<Self> {
        let blocks = store.decrypt(raw)?;
        let box_data = store
            .find_block(&blocks, KEY_BOX_DATA)
            .ok_or(Error::MissingBlock(KEY_BOX_DATA))?;
        let box_layout = store.find_block(&blocks, KEY_BOX_LAYOUT);
        if box_layout.is_none() {
            log::warn!("Save has no box layout block, using default box names");
        }
        Ok(SaveFile {
            store,
            blocks,
            box_data,
            box_layout,
        })
    }

    pub fn box_count(&self) -> usize {
        BOX_COUNT
    }

    pub fn slots_per_box(&self) -> usize {
        SLOTS_PER_BOX
    }

    fn stride() -> usize {
        SAVE_GAME.slot_size() + SLOT_GAP
    }

    fn slot_range(&self, box_number: usize, slot: usize) -> Option<std::ops::Range<usize>> {
        if box_number >= BOX_COUNT || slot >= SLOTS_PER_BOX {
            return None;
        }
        let start = (box_number * SLOTS_PER_BOX + slot) * Self::stride();
        let range = start..start + Self::stride();
        (range.end <= self.blocks[self.box_data].data.len()).then_some(range)
    }

    /// Decodes the record at `(box_number, slot)`; out of range gives an empty
    /// record.
    pub fn box_slot(&self, box_number: usize, slot: usize) -> Pokemon {
        match self.slot_range(box_number, slot) {
            Some(range) => {
                let party_size = SAVE_GAME.slot_size();
                let stored = &self.blocks[self.box_data].data[range];
                Pokemon::from_encrypted(&stored[..party_size], SAVE_GAME)
            }
            None => Pokemon::new(SAVE_GAME),
        }
    }

    /// Encodes `pokemon` into the slot and zero-fills the padding after it.
    pub fn set_box_slot(&mut self, box_number: usize, slot: usize, pokemon: &Pokemon) {
        let Some(range) = self.slot_range(box_number, slot) else {
            return;
        };
        let encrypted = Pokemon::from_decrypted(pokemon.data(), SAVE_GAME).encrypted();
        let stored = &mut self.blocks[self.box_data].data[range];
        let (record, gap) = stored.split_at_mut(encrypted.len());
        record.copy_from_slice(&encrypted);
        gap.fill(0);
    }

    pub fn clear_box_slot(&mut self, box_number: usize, slot: usize) {
        if let Some(range) = self.slot_range(box_number, slot) {
            self.blocks[self.box_data].data[range].fill(0);
        }
    }

    fn box_name_range(&self, box_number: usize) -> Option<(usize, std::ops::Range<usize>)> {
        let layout = self.box_layout?;
        if box_number >= BOX_COUNT {
            return None;
        }
        let start = box_number * BOX_NAME_LENGTH;
        let range = start..start + BOX_NAME_LENGTH;
        (range.end <= self.blocks[layout].data.len()).then_some((layout, range))
    }

    pub fn box_name(&self, box_number: usize) -> String {
        self.box_name_range(box_number)
            .map(|(layout, range)| decode_utf16_field(&self.blocks[layout].data[range]))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Box {}", box_number + 1))
    }

    /// Returns false when the save has no layout block or the box is out of
    /// range.
    pub fn set_box_name(&mut self, box_number: usize, name: &str) -> bool {
        match self.box_name_range(box_number) {
            Some((layout, range)) => {
                encode_utf16_field(name, &mut self.blocks[layout].data[range]);
                true
            }
            None => false,
        }
    }

    pub fn blocks(&self) -> &[SaveBlock] {
        &self.blocks
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.store.encrypt(&self.blocks)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let raw = self.to_bytes()?;
        std::fs::write(path, raw).map_err(|err| {
            log::error!("Unable to write save {}: {err}", path.display());
            err
        })?;
        log::debug!("Wrote save {}", path.display());
        Ok(())
    }
}

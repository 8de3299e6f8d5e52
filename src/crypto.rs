//! Block-shuffle cipher used by the 3DS/Switch-era entity formats.
//!
//! A record is `[8-byte header][4 blocks][party stats]`. The first word of the
//! header (the encryption constant) seeds an LCG keystream and picks one of 24
//! block orders.

use byteorder::{ByteOrder, LittleEndian};

use crate::game::GenerationProfile;

const HEADER_SIZE: usize = 8;
const LCG_MULTIPLIER: u32 = 0x41C6_4E6D;
const LCG_INCREMENT: u32 = 0x0000_6073;

/// Row `sv` lists, for every shuffled position, the source block index.
/// Rows 24..32 repeat rows 0..8 so any 5-bit selector is valid.
#[rustfmt::skip]
const BLOCK_POSITION: [[u8; 4]; 32] = [
    [0, 1, 2, 3], [0, 1, 3, 2], [0, 2, 1, 3], [0, 3, 1, 2],
    [0, 2, 3, 1], [0, 3, 2, 1], [1, 0, 2, 3], [1, 0, 3, 2],
    [2, 0, 1, 3], [3, 0, 1, 2], [2, 0, 3, 1], [3, 0, 2, 1],
    [1, 2, 0, 3], [1, 3, 0, 2], [2, 1, 0, 3], [3, 1, 0, 2],
    [2, 3, 0, 1], [3, 2, 0, 1], [1, 2, 3, 0], [1, 3, 2, 0],
    [2, 1, 3, 0], [3, 1, 2, 0], [2, 3, 1, 0], [3, 2, 1, 0],
    [0, 1, 2, 3], [0, 1, 3, 2], [0, 2, 1, 3], [0, 3, 1, 2],
    [0, 2, 3, 1], [0, 3, 2, 1], [1, 0, 2, 3], [1, 0, 3, 2],
];

/// Row of `BLOCK_POSITION` that undoes row `sv`.
#[rustfmt::skip]
const BLOCK_POSITION_INVERT: [u8; 32] = [
    0, 1, 2, 4, 3, 5, 6, 7, 12, 18, 13, 19, 8, 10, 14, 20,
    16, 22, 9, 11, 15, 21, 17, 23, 0, 1, 2, 4, 3, 5, 6, 7,
];

pub fn shuffle_value(encryption_constant: u32) -> usize {
    ((encryption_constant >> 13) & 31) as usize
}

/// XORs `data` with the keystream seeded from `seed`, one little-endian
/// `u16` at a time. A trailing odd byte is left alone.
pub fn crypt_array(data: &mut [u8], seed: u32) {
    let mut seed = seed;
    for pair in data.chunks_exact_mut(2) {
        seed = seed.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT);
        let word = LittleEndian::read_u16(pair) ^ (seed >> 16) as u16;
        LittleEndian::write_u16(pair, word);
    }
}

/// Applies the keystream to the block region and, separately, to the party
/// stats. Both regions restart the keystream from the encryption constant.
fn crypt_record(data: &mut [u8], encryption_constant: u32, profile: GenerationProfile) {
    let end = profile.stored_size().min(data.len());
    crypt_array(&mut data[HEADER_SIZE.min(end)..end], encryption_constant);
    if data.len() > end {
        crypt_array(&mut data[end..], encryption_constant);
    }
}

/// Reorders the blocks so that block `i` of the output is block
/// `BLOCK_POSITION[sv][i]` of the input.
pub fn shuffle(data: &[u8], sv: usize, profile: GenerationProfile) -> Vec<u8> {
    let mut out = data.to_vec();
    let block_size = profile.block_size;
    let order = &BLOCK_POSITION[sv & 31];
    for (dest, &src) in order.iter().enumerate().take(profile.block_count) {
        let src_start = HEADER_SIZE + block_size * src as usize;
        let dest_start = HEADER_SIZE + block_size * dest;
        if src_start + block_size > data.len() || dest_start + block_size > data.len() {
            continue;
        }
        out[dest_start..dest_start + block_size]
            .copy_from_slice(&data[src_start..src_start + block_size]);
    }
    out
}

fn sized_for(data: &[u8], profile: GenerationProfile) -> Vec<u8> {
    let mut buffer = data[..data.len().min(profile.party_size)].to_vec();
    buffer.resize(profile.party_size, 0);
    buffer
}

/// Decrypts an encoded record. The output is always `profile.party_size`
/// bytes; shorter input is zero-padded and longer input truncated.
pub fn decrypt(data: &[u8], profile: GenerationProfile) -> Vec<u8> {
    let mut buffer = sized_for(data, profile);
    let encryption_constant = LittleEndian::read_u32(&buffer[..4]);
    let sv = shuffle_value(encryption_constant);

    crypt_record(&mut buffer, encryption_constant, profile);
    shuffle(&buffer, sv, profile)
}

/// Inverse of [`decrypt`].
pub fn encrypt(data: &[u8], profile: GenerationProfile) -> Vec<u8> {
    let buffer = sized_for(data, profile);
    let encryption_constant = LittleEndian::read_u32(&buffer[..4]);
    let sv = shuffle_value(encryption_constant);

    let mut buffer = shuffle(&buffer, BLOCK_POSITION_INVERT[sv] as usize, profile);
    crypt_record(&mut buffer, encryption_constant, profile);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILES: [GenerationProfile; 3] = [
        GenerationProfile::GEN6,
        GenerationProfile::GEN8A,
        GenerationProfile::GEN9,
    ];

    fn pseudo_random_record(seed: u32, len: usize) -> Vec<u8> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                (state >> 24) as u8
            })
            .collect()
    }

    #[test]
    fn inverse_rows_undo_every_shuffle() {
        for sv in 0..32 {
            let forward = BLOCK_POSITION[sv];
            let back = BLOCK_POSITION[BLOCK_POSITION_INVERT[sv] as usize];
            for i in 0..4 {
                assert_eq!(back[forward[i] as usize] as usize, i, "sv {sv}");
            }
        }
    }

    #[test]
    fn keystream_matches_lcg() {
        let mut data = [0u8; 5];
        crypt_array(&mut data, 0);
        // seed 0 -> 0x00006073 -> upper half 0x0000
        assert_eq!(&data[..2], &[0, 0]);
        let second = 0x6073u32.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT);
        assert_eq!(LittleEndian::read_u16(&data[2..4]), (second >> 16) as u16);
        assert_eq!(data[4], 0);
    }

    #[test]
    fn decrypt_and_encrypt_are_inverse() {
        for profile in PROFILES {
            for seed in 0..64 {
                let record = pseudo_random_record(seed, profile.party_size);
                assert_eq!(decrypt(&encrypt(&record, profile), profile), record);
                assert_eq!(encrypt(&decrypt(&record, profile), profile), record);
            }
        }
    }

    #[test]
    fn header_is_never_encrypted() {
        let record = pseudo_random_record(7, GenerationProfile::GEN9.party_size);
        let encrypted = encrypt(&record, GenerationProfile::GEN9);
        assert_eq!(&encrypted[..8], &record[..8]);
    }

    #[test]
    fn party_stats_restart_the_keystream() {
        let profile = GenerationProfile::GEN9;
        let mut record = vec![0u8; profile.party_size];
        LittleEndian::write_u32(&mut record[..4], 0x1234_5678);
        let encrypted = encrypt(&record, profile);

        let mut expected_tail = vec![0u8; profile.party_size - profile.stored_size()];
        crypt_array(&mut expected_tail, 0x1234_5678);
        assert_eq!(&encrypted[profile.stored_size()..], &expected_tail[..]);

        let mut expected_first_block = vec![0u8; profile.block_size];
        crypt_array(&mut expected_first_block, 0x1234_5678);
        assert_eq!(&encrypted[8..8 + profile.block_size], &expected_first_block[..]);
    }

    #[test]
    fn unshuffle_places_source_blocks() {
        let profile = GenerationProfile::GEN6;
        let mut record = vec![0u8; profile.party_size];
        for block in 0..4 {
            let start = 8 + block * profile.block_size;
            record[start..start + profile.block_size].fill(block as u8 + 1);
        }
        // sv 23 is the full reversal
        let shuffled = shuffle(&record, 23, profile);
        for (i, &src) in BLOCK_POSITION[23].iter().enumerate() {
            assert_eq!(shuffled[8 + i * profile.block_size], src + 1);
        }
        assert_eq!(&shuffled[profile.stored_size()..], &record[profile.stored_size()..]);
    }

    #[test]
    fn input_is_sized_to_party_record() {
        let out = decrypt(&[0u8; 10], GenerationProfile::GEN9);
        assert_eq!(out.len(), GenerationProfile::GEN9.party_size);
        let out = encrypt(&[0u8; 1000], GenerationProfile::GEN8A);
        assert_eq!(out.len(), GenerationProfile::GEN8A.party_size);
    }
}

//! Conversion between Scarlet/Violet internal species numbering and the
//! national dex.
//!
//! Both tables are game data in their own right. They are kept independently
//! rather than derived from one another.

const FIRST_UNALIGNED_9: u16 = 917;

/// `national = internal + delta[internal - 917]`
#[rustfmt::skip]
const TABLE9_INTERNAL_TO_NATIONAL: [i8; 106] = [
    65, -1, -1, -1, -1, 31, 31, 47, 47, 29, 29, 53, 31, 31, 46, 44,
    30, 30, -7, -7, -7, 13, 13, -2, -2, 23, 23, 24, -21, -21, 27, 27,
    47, 47, 47, 26, 14, -33, -33, -33, -17, -17, 3, -29, 12, -12, -31, -31,
    -31, 3, 3, -24, -24, -44, -44, -30, -30, -28, -28, 23, 23, 6, 7, 29,
    8, 3, 4, 4, 20, 4, 23, 6, 3, 3, 4, -1, 13, 9, 7, 5,
    7, 9, 9, -43, -43, -43, -68, -68, -68, -58, -58, -25, -29, -31, 1, -1,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// `internal = national + delta[national - 917]`
#[rustfmt::skip]
const TABLE9_NATIONAL_TO_INTERNAL: [i8; 106] = [
    1, 1, 1, 1, 33, 33, 33, 21, 21, 44, 44, 7, 7, 7, 29, 31,
    31, 31, 68, 68, 68, 2, 2, 17, 17, 30, 30, 24, 24, 28, 28, 58,
    58, 12, -13, -13, -31, -31, -29, -29, 43, 43, 43, -31, -31, -3, -30, -30,
    -23, -23, -14, -24, -3, -3, -47, -47, -12, -27, -27, -44, -46, -26, 31, 29,
    -53, -65, 25, -6, -3, -7, -4, -4, -8, -4, 1, -3, -3, -6, -4, -47,
    -47, -47, -23, -23, -5, -7, -9, -7, -20, -13, -9, -9, -29, -23, 1, -1,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

fn apply_delta(species: u16, table: &[i8]) -> u16 {
    let Some(index) = species.checked_sub(FIRST_UNALIGNED_9) else {
        return species;
    };
    match table.get(index as usize) {
        Some(delta) => species.wrapping_add_signed(i16::from(*delta)),
        None => species,
    }
}

/// Internal (stored) species id to national dex number.
pub fn get_national9(internal: u16) -> u16 {
    apply_delta(internal, &TABLE9_INTERNAL_TO_NATIONAL)
}

/// National dex number to internal (stored) species id.
pub fn get_internal9(national: u16) -> u16 {
    apply_delta(national, &TABLE9_NATIONAL_TO_INTERNAL)
}

use byteorder::{ByteOrder, LittleEndian};

/// Decodes a nul-terminated UTF-16LE field. Unpaired surrogates become
/// U+FFFD.
pub(crate) fn decode_utf16_field(field: &[u8]) -> String {
    let units = field
        .chunks_exact(2)
        .map(LittleEndian::read_u16)
        .take_while(|unit| *unit != 0);
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Writes `text` into `field` as UTF-16LE, truncated to leave room for the
/// terminator, and zero-fills the remainder.
pub(crate) fn encode_utf16_field(text: &str, field: &mut [u8]) {
    field.fill(0);
    let max_units = (field.len() / 2).saturating_sub(1);
    for (slot, unit) in field
        .chunks_exact_mut(2)
        .zip(text.encode_utf16().take(max_units))
    {
        LittleEndian::write_u16(slot, unit);
    }
}

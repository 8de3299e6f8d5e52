use std::path::Path;

pub const UNKNOWN_NAME: &str = "???";

/// Read-only species/move/nature/ability name lookup.
///
/// Build one before any display code runs and share it by reference; there is
/// no reload path. Each table is one name per line with the line number as the
/// id, so line 0 is id 0.
#[derive(Clone, Debug, Default)]
pub struct NameTables {
    species: Vec<String>,
    moves: Vec<String>,
    natures: Vec<String>,
    abilities: Vec<String>,
}

impl NameTables {
    pub fn from_text(species: &str, moves: &str, natures: &str, abilities: &str) -> Self {
        NameTables {
            species: parse_lines(species),
            moves: parse_lines(moves),
            natures: parse_lines(natures),
            abilities: parse_lines(abilities),
        }
    }

    /// Loads `species.txt`, `moves.txt`, `natures.txt` and `abilities.txt`
    /// from `dir`. A missing file leaves that table empty.
    pub fn load_dir(dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let dir = dir.as_ref();
        let read = |name: &str| -> std::io::Result<Vec<String>> {
            let path = dir.join(name);
            match std::fs::read_to_string(&path) {
                Ok(text) => Ok(parse_lines(&text)),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    log::warn!("Name table {} not found", path.display());
                    Ok(Vec::new())
                }
                Err(err) => Err(err),
            }
        };

        let tables = NameTables {
            species: read("species.txt")?,
            moves: read("moves.txt")?,
            natures: read("natures.txt")?,
            abilities: read("abilities.txt")?,
        };
        log::debug!(
            "Loaded names: {} species, {} moves, {} natures, {} abilities",
            tables.species.len(),
            tables.moves.len(),
            tables.natures.len(),
            tables.abilities.len()
        );
        Ok(tables)
    }

    pub fn species(&self, id: u16) -> &str {
        lookup(&self.species, id)
    }

    pub fn move_name(&self, id: u16) -> &str {
        lookup(&self.moves, id)
    }

    pub fn nature(&self, id: u8) -> &str {
        lookup(&self.natures, id.into())
    }

    pub fn ability(&self, id: u16) -> &str {
        lookup(&self.abilities, id)
    }
}

fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end_matches('\r').to_owned())
        .collect()
}

fn lookup(table: &[String], id: u16) -> &str {
    table
        .get(id as usize)
        .map(String::as_str)
        .unwrap_or(UNKNOWN_NAME)
}

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a bank file (bad magic)")]
    BadMagic,
    #[error("unsupported bank version 0x{0:08x}")]
    UnsupportedVersion(u32),
    #[error("save block 0x{0:08X} not found")]
    MissingBlock(u32),
    #[error("invalid bank name: {0:?}")]
    InvalidName(String),
    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod bank;
pub mod bank_manager;
pub mod crypto;
pub mod error;
pub mod game;
pub mod host;
pub mod names;
pub mod pokemon;
pub mod save;
pub mod species;
mod text;

pub use bank::Bank;
pub use bank_manager::{BankInfo, BankManager};
pub use error::{Error, Result};
pub use game::{GameType, GenerationProfile};
pub use names::NameTables;
pub use pokemon::Pokemon;
pub use save::{BlockStore, SaveBlock, SaveFile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrainerId {
    pub public_id: u16,
    pub secret_id: u16,
}

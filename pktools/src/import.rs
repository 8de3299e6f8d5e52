use anyhow::Context as _;
use clap::Args;
use pkhouse::Pokemon;
use std::path::PathBuf;

use crate::Context;

#[derive(Debug, Args)]
pub struct Opts {
    pub bank: String,
    #[arg(long)]
    pub box_number: usize,
    #[arg(long)]
    pub slot: usize,
    #[arg(long)]
    pub file: PathBuf,
    /// The file holds an encrypted record
    #[arg(long)]
    pub encrypted: bool,
    #[arg(short, long)]
    pub force: bool,
}

/// Box and slot numbers on the command line start at 1.
pub fn run(ctx: &Context, opts: Opts) -> anyhow::Result<()> {
    let mut manager = ctx.bank_manager()?;
    if manager.find(&opts.bank).is_none() {
        anyhow::bail!("No bank named {}", opts.bank);
    }
    let mut bank = manager.load_bank(&opts.bank)?;
    let (box_number, slot) = crate::export::zero_based(opts.box_number, opts.slot)?;
    if box_number >= bank.box_count() || slot >= bank.slots_per_box() {
        anyhow::bail!(
            "Position out of range, bank has {} boxes of {} slots",
            bank.box_count(),
            bank.slots_per_box()
        );
    }
    if !bank.get_slot(box_number, slot).is_empty() && !opts.force {
        anyhow::bail!("That box position is occupied!");
    }

    let data = std::fs::read(&opts.file)
        .with_context(|| format!("Failed to read {}", opts.file.display()))?;
    let pokemon = if opts.encrypted {
        Pokemon::from_encrypted(&data, bank.game_type())
    } else {
        Pokemon::from_decrypted(&data, bank.game_type())
    };
    bank.set_slot(box_number, slot, &pokemon);
    manager.save_bank(&opts.bank, &bank)?;
    println!("Wrote Pokemon into bank {}", opts.bank);
    Ok(())
}

use clap::Args;
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
    pub dest: PathBuf,
    /// Write the record encrypted
    #[arg(long)]
    pub encrypted: bool,
    /// Clear the slot after exporting
    #[arg(long)]
    pub take: bool,
}

pub(crate) fn zero_based(box_number: usize, slot: usize) -> anyhow::Result<(usize, usize)> {
    match (box_number.checked_sub(1), slot.checked_sub(1)) {
        (Some(box_number), Some(slot)) => Ok((box_number, slot)),
        _ => Err(anyhow::anyhow!("Box and slot numbers start at 1")),
    }
}

pub fn run(ctx: &Context, opts: Opts) -> anyhow::Result<()> {
    let mut manager = ctx.bank_manager()?;
    if manager.find(&opts.bank).is_none() {
        anyhow::bail!("No bank named {}", opts.bank);
    }
    let mut bank = manager.load_bank(&opts.bank)?;
    let (box_number, slot) = zero_based(opts.box_number, opts.slot)?;

    let pokemon = bank.get_slot(box_number, slot);
    if pokemon.is_empty() {
        println!("No Pokemon in that location!");
        return Ok(());
    }

    let data = if opts.encrypted {
        pokemon.encrypted()
    } else {
        pokemon.data().to_vec()
    };
    println!("Saving to {}", opts.dest.display());
    std::fs::write(&opts.dest, data)?;

    if opts.take {
        bank.clear_slot(box_number, slot);
        manager.save_bank(&opts.bank, &bank)?;
    }
    Ok(())
}

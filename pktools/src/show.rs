use anyhow::Context as _;
use clap::Args;

use crate::Context;

#[derive(Debug, Args)]
pub struct Opts {
    pub name: String,
    #[arg(long)]
    pub box_number: Option<usize>,
}

pub fn run(ctx: &Context, opts: Opts) -> anyhow::Result<()> {
    let manager = ctx.bank_manager()?;
    if manager.find(&opts.name).is_none() {
        anyhow::bail!("No bank named {}", opts.name);
    }
    let bank = manager
        .load_bank(&opts.name)
        .with_context(|| format!("Failed to load bank {}", opts.name))?;

    for (box_number, slot, pkmn) in bank.iter_occupied() {
        if opts.box_number.is_some_and(|wanted| wanted != box_number + 1) {
            continue;
        }
        let [m1, m2, m3, m4] = pkmn.move_names(&ctx.names);
        println!(
            "Box {:2} Slot {:2}: {:12} {} [{}] {m1}/{m2}/{m3}/{m4}",
            box_number + 1,
            slot + 1,
            pkmn.display_name(&ctx.names),
            pkmn,
            ctx.names.nature(pkmn.nature()),
        );
    }
    Ok(())
}

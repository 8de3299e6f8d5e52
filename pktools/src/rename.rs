use clap::Args;

use crate::Context;

#[derive(Debug, Args)]
pub struct Opts {
    pub old_name: String,
    pub new_name: String,
}

pub fn run(ctx: &Context, opts: Opts) -> anyhow::Result<()> {
    let mut manager = ctx.bank_manager()?;
    let name = manager.rename_bank(&opts.old_name, &opts.new_name)?;
    println!("Renamed bank {} to {name}", opts.old_name);
    Ok(())
}

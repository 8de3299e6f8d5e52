use clap::Args;

use crate::Context;

#[derive(Debug, Args)]
pub struct Opts {
    pub name: String,
}

pub fn run(ctx: &Context, opts: Opts) -> anyhow::Result<()> {
    let mut manager = ctx.bank_manager()?;
    let name = manager.create_bank(&opts.name)?;
    println!("Created bank {name}");
    Ok(())
}

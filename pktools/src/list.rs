use clap::Args;

use crate::Context;

#[derive(Debug, Args)]
pub struct Opts {}

pub fn run(ctx: &Context, _opts: Opts) -> anyhow::Result<()> {
    let manager = ctx.bank_manager()?;
    println!("{} banks in {}", ctx.game, manager.bank_dir().display());
    for info in manager.banks() {
        println!("{:32} {:4} occupied", info.name, info.occupied);
    }
    Ok(())
}

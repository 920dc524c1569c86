mod alpha_bleed;
mod asset_name;
mod commands;
mod data;
mod glob;
mod image;
mod options;
mod packing;

use std::process;

use structopt::StructOpt;

use crate::options::{Options, Subcommand};

fn main() {
    env_logger::init();

    let options = Options::from_args();

    match run(options) {
        Ok(_) => {}
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}

fn run(options: Options) -> anyhow::Result<()> {
    match options.command {
        Subcommand::Layout(layout_options) => commands::layout(layout_options)?,
        Subcommand::Pack(pack_options) => commands::pack(pack_options)?,
    }

    Ok(())
}

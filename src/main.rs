use std::env;

use anyhow::{bail, Context};

use nes_core::ines::InesFile;
use nes_core::{Cartridge, Nes};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Some(rom_path) = env::args().nth(1) else {
        bail!("usage: nes-core <rom.nes>");
    };

    let ines = InesFile::load(&rom_path)
        .with_context(|| format!("could not load iNES file {rom_path:?}"))?;
    let cartridge = Cartridge::new(ines);

    let mut nes = Nes::new();
    nes.insert_cartridge(cartridge)
        .context("could not insert cartridge")?;

    nes.run()?;
    Ok(())
}

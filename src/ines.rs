//! iNES ROM file ingestion
//!
//! Parses the iNES format: a 16-byte header, an optional 512-byte trainer
//! block, PRG ROM data and CHR ROM data.
//!
//! Read more about the iNES ROM file format in:
//! https://www.nesdev.org/wiki/INES
//!
//! NES2.0 is not implemented. Header bytes 9 to 15 are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::errors::InesError;
use crate::utils::bv;

pub const PRG_ROM_BANK_SIZE: usize = 16 * 1024;
pub const CHR_ROM_BANK_SIZE: usize = 8 * 1024;
pub const PRG_RAM_BANK_SIZE: usize = 8 * 1024;

const HEADER_MAGIC_BYTES: [u8; 4] = [b'N', b'E', b'S', 0x1A];
const TRAINER_SIZE: usize = 512;

/// A fully ingested iNES file: parsed header plus raw data blobs
pub struct InesFile {
    pub header: InesHeader,
    pub trainer: Option<Vec<u8>>,
    pub prg_rom: Vec<u8>,
    pub chr_rom: Vec<u8>,
}

#[derive(Debug, Clone, Copy)]
pub struct InesHeader {
    /// PRG ROM size in 16 KiB units
    pub prg_rom_banks: u8,

    /// CHR ROM size in 8 KiB units, zero meaning CHR RAM
    pub chr_rom_banks: u8,

    pub flags6: u8,
    pub flags7: u8,

    /// PRG RAM size in 8 KiB units, zero inferring one
    pub prg_ram_banks: u8,
}

impl InesHeader {
    /// Mapper identifier: low nibble in flags 6, high nibble in flags 7
    pub fn mapper_id(&self) -> u8 {
        (self.flags7 & 0xF0) | (self.flags6 >> 4)
    }

    pub fn vertical_mirroring(&self) -> bool {
        bv(self.flags6, 0) != 0
    }

    pub fn four_screen(&self) -> bool {
        bv(self.flags6, 3) != 0
    }

    pub fn has_trainer(&self) -> bool {
        bv(self.flags6, 2) != 0
    }

    pub fn prg_rom_size(&self) -> usize {
        self.prg_rom_banks as usize * PRG_ROM_BANK_SIZE
    }

    pub fn chr_rom_size(&self) -> usize {
        self.chr_rom_banks as usize * CHR_ROM_BANK_SIZE
    }

    pub fn prg_ram_size(&self) -> usize {
        if self.prg_ram_banks > 0 {
            self.prg_ram_banks as usize * PRG_RAM_BANK_SIZE
        } else {
            PRG_RAM_BANK_SIZE
        }
    }
}

impl InesFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InesError> {
        let mut file = File::open(path).map_err(InesError::OpenFailed)?;
        Self::parse(&mut file)
    }

    /// Ingest an in-memory iNES image
    pub fn load_bytes(bytes: &[u8]) -> Result<Self, InesError> {
        let mut reader = bytes;
        Self::parse(&mut reader)
    }

    fn parse<R: Read>(reader: &mut R) -> Result<Self, InesError> {
        let mut raw_header = [0u8; 16];
        read_exactly(reader, &mut raw_header)?;

        if raw_header[0..4] != HEADER_MAGIC_BYTES {
            return Err(InesError::MagicBytesMismatch);
        }

        let header = InesHeader {
            prg_rom_banks: raw_header[4],
            chr_rom_banks: raw_header[5],
            flags6: raw_header[6],
            flags7: raw_header[7],
            prg_ram_banks: raw_header[8],
        };
        debug!("iNES header: {header:?}, mapper {}", header.mapper_id());

        // a cartridge without program data could never serve the reset vector
        if header.prg_rom_banks == 0 {
            return Err(InesError::MissingPrgRom);
        }

        let trainer = if header.has_trainer() {
            let mut buf = vec![0u8; TRAINER_SIZE];
            read_exactly(reader, &mut buf)?;
            Some(buf)
        } else {
            None
        };

        let mut prg_rom = vec![0u8; header.prg_rom_size()];
        read_exactly(reader, &mut prg_rom)?;

        let mut chr_rom = vec![0u8; header.chr_rom_size()];
        read_exactly(reader, &mut chr_rom)?;

        Ok(Self {
            header,
            trainer,
            prg_rom,
            chr_rom,
        })
    }
}

fn read_exactly<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), InesError> {
    reader.read_exact(buf).map_err(|error| {
        if error.kind() == std::io::ErrorKind::UnexpectedEof {
            InesError::EarlyEndOfFile
        } else {
            InesError::ReadError(error)
        }
    })
}

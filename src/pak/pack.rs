#![forbid(unsafe_code)]

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::pak::cipher::Cipher;
use crate::pak::compile::read_compiled_header;
use crate::pak::error::{PakError, PakResult};
use crate::pak::format::MAGIC;
use crate::pak::io::{len_u32, write_bytes, write_enciphered_str, write_u32};
use crate::pak::version::{Version, CURRENT};

/// Result of a successful pack, printed as the one line summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackSummary {
    pub assets: usize,
    pub bytes: u64,
}

impl fmt::Display for PackSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.assets == 1 {
            f.write_str("Packed 1 asset")?;
        } else {
            write!(f, "Packed {} assets", self.assets)?;
        }
        write!(f, " to archive (approx. {})", display_size(self.bytes))
    }
}

/// Decimal KB below one megabyte, MB from there on.
pub fn display_size(bytes: u64) -> String {
    if bytes >= 1_000_000 {
        format!("{:.1} MB", bytes as f64 / 1_000_000.0)
    } else {
        format!("{:.1} KB", bytes as f64 / 1_000.0)
    }
}

/// Archive layout:
/// - [MAGIC "pla"]
/// - [u8 major][u8 minor][u8 revision]
/// - [u32 entry_count]
/// - entries, in caller order:
///   - [u8 major][u8 minor][u8 revision]
///   - [u32 name_len][name bytes, enciphered]
///   - [u32 payload_len][compressed frame copied from the compiled file]
///
/// Payloads are trusted as they are and never inflated here. A failure leaves
/// whatever was already written at `dest`.
pub fn pack(
    cipher: &dyn Cipher,
    dest: &Path,
    optimize: bool,
    files: &[PathBuf],
) -> PakResult<PackSummary> {
    if optimize {
        debug!("optimize has no effect when packing; payloads are copied as compiled");
    }
    pack_as(CURRENT, cipher, dest, files)
}

/// Packs with an explicit tool version. Every compiled file must carry
/// exactly this version.
pub(crate) fn pack_as(
    version: Version,
    cipher: &dyn Cipher,
    dest: &Path,
    files: &[PathBuf],
) -> PakResult<PackSummary> {
    let mut out = BufWriter::new(File::create(dest)?);
    out.write_all(&MAGIC)?;
    version.write(&mut out)?;
    write_u32(&mut out, len_u32(files.len())?)?;

    let mut names: HashSet<String> = HashSet::with_capacity(files.len());

    for file in files {
        let contents = std::fs::read(file).map_err(|e| PakError::input(file, e))?;
        let header = read_compiled_header(&contents).map_err(|e| match e {
            PakError::Io(io) => PakError::input(file, format!("truncated compiled asset: {io}")),
            other => other,
        })?;

        if header.version != version {
            return Err(PakError::VersionMismatch {
                expected: version,
                found: header.version,
            });
        }

        if !names.insert(header.name.clone()) {
            return Err(PakError::DuplicateName(header.name));
        }

        let payload = &contents[header.payload_offset..];
        version.write(&mut out)?;
        write_enciphered_str(&mut out, cipher, &header.name)?;
        write_bytes(&mut out, payload)?;

        debug!("packed {} ({} bytes) from {}", header.name, payload.len(), file.display());
    }

    out.flush()?;
    let summary = PackSummary {
        assets: files.len(),
        bytes: out.stream_position()?,
    };
    info!("{} -> {}", summary, dest.display());
    Ok(summary)
}

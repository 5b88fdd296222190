#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use log::debug;

use crate::pak::cipher::Cipher;
use crate::pak::classify::classify_source;
use crate::pak::deflate::compress;
use crate::pak::error::{PakError, PakResult};
use crate::pak::frame::Frame;
use crate::pak::io::{read_str, write_str};
use crate::pak::path::logical_name;
use crate::pak::version::{Version, CURRENT};

/// Header of a compiled asset file. The compressed frame follows at
/// `payload_offset` and runs to the end of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledHeader {
    pub version: Version,
    pub name: String,
    pub payload_offset: usize,
}

/// Compiled asset layout:
/// - [u8 major][u8 minor][u8 revision]
/// - [u32 name_len][name bytes UTF-8, not enciphered]
/// - zlib compressed frame up to EOF
pub fn compile(
    cipher: &dyn Cipher,
    base: &Path,
    asset: &str,
    dest: &Path,
    optimize: bool,
) -> PakResult<()> {
    let source_path = base.join(asset);
    let name = logical_name(asset);

    let contents = std::fs::read(&source_path).map_err(|e| PakError::input(&source_path, e))?;
    let frame = encode_source(cipher, &name, &source_path, contents)?;
    let compressed = compress(&frame.to_bytes(), optimize)?;

    debug!(
        "compiled {name} as {} ({} bytes compressed) -> {}",
        frame.kind,
        compressed.len(),
        dest.display()
    );

    let mut out = BufWriter::new(File::create(dest)?);
    write_compiled(&mut out, CURRENT, &name, &compressed)?;
    out.flush()?;
    Ok(())
}

/// Classifies and frames one loaded source file.
pub fn encode_source(
    cipher: &dyn Cipher,
    name: &str,
    source_path: &Path,
    contents: Vec<u8>,
) -> PakResult<Frame> {
    let category = classify_source(name, source_path, &contents)?;
    Frame::encode(category, contents, cipher).map_err(|e| match e {
        PakError::Invalid(msg) => PakError::input(source_path, msg),
        other => other,
    })
}

pub fn write_compiled(
    w: &mut dyn Write,
    version: Version,
    name: &str,
    compressed: &[u8],
) -> PakResult<()> {
    version.write(w)?;
    write_str(w, name)?;
    w.write_all(compressed)?;
    Ok(())
}

pub fn read_compiled_header(bytes: &[u8]) -> PakResult<CompiledHeader> {
    let mut cur = Cursor::new(bytes);
    let version = Version::read(&mut cur)?;
    let name = read_str(&mut cur)?;
    Ok(CompiledHeader {
        version,
        name,
        payload_offset: cur.position() as usize,
    })
}

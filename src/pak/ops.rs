#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use crate::pak::cipher::XorCipher;
use crate::pak::compile::compile as compile_impl;
use crate::pak::error::{PakError, PakResult};
use crate::pak::pack::{pack as pack_impl, PackSummary};
use crate::pak::path::{compiled_path, normalize_rel_path, should_exclude};
use crate::pak::read::Archive;

/// Compiles `base/asset` into one compiled asset file at `dest`. Silent on success.
pub fn compile(key: &str, base: &Path, asset: &str, dest: &Path, optimize: bool) -> PakResult<()> {
    let cipher = XorCipher::new(key)?;
    compile_impl(&cipher, base, asset, dest, optimize)
}

/// Packs compiled asset files, in the given order, into one archive and
/// prints the summary line.
pub fn pack(key: &str, dest: &Path, optimize: bool, files: &[PathBuf]) -> PakResult<PackSummary> {
    let cipher = XorCipher::new(key)?;
    let summary = pack_impl(&cipher, dest, optimize, files)?;
    println!("{summary}");
    Ok(summary)
}

/// Compiles every file under `base` into `output/<logical name>.asset`.
///
/// `output` may live inside `base`; it is skipped while walking.
/// Returns the compiled files sorted by logical name.
pub fn compile_dir(
    key: &str,
    base: &Path,
    output: &Path,
    excludes: &[String],
    optimize: bool,
) -> PakResult<Vec<PathBuf>> {
    let cipher = XorCipher::new(key)?;

    let base = base.canonicalize().map_err(|e| PakError::input(base, e))?;
    std::fs::create_dir_all(output)?;
    let output_root = output.canonicalize()?;
    if output_root == base {
        return Err(PakError::Config(
            "output directory must differ from the asset directory".into(),
        ));
    }

    let mut assets: Vec<String> = Vec::new();
    let walker = WalkDir::new(&base)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !e.path().starts_with(&output_root));
    for ent in walker {
        let ent = ent.map_err(|e| {
            let msg = e.to_string();
            PakError::Io(e.into_io_error().unwrap_or_else(|| std::io::Error::other(msg)))
        })?;

        if !ent.file_type().is_file() {
            continue;
        }

        let logical = normalize_rel_path(&base, ent.path())?;
        if should_exclude(&logical, excludes) {
            debug!("excluded {logical}");
            continue;
        }
        assets.push(logical);
    }

    assets.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));

    let mut compiled = Vec::with_capacity(assets.len());
    for logical in assets {
        let dest = compiled_path(output, &logical);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        compile_impl(&cipher, &base, &logical, &dest, optimize)?;
        compiled.push(dest);
    }

    info!("compiled {} assets into {}", compiled.len(), output.display());
    Ok(compiled)
}

pub fn list(archive: &Path, key: &str, verbose: bool) -> PakResult<()> {
    let cipher = XorCipher::new(key)?;
    let archive = Archive::open(archive, &cipher)?;

    for (i, e) in archive.entries().into_iter().enumerate() {
        if verbose {
            let frame = archive.unpack_at(i)?;
            println!(
                "{}  version={} compressed={} kind={}",
                e.name, e.version, e.payload_len, frame.kind
            );
        } else {
            println!("{}", e.name);
        }
    }
    Ok(())
}

/// Writes the reconstructed source of every matching entry under `output`.
pub fn extract(archive: &Path, key: &str, output: &Path, filter: &[String]) -> PakResult<usize> {
    let cipher = XorCipher::new(key)?;
    let archive = Archive::open(archive, &cipher)?;
    std::fs::create_dir_all(output)?;

    let mut written = 0;
    for (i, e) in archive.entries().into_iter().enumerate() {
        if !filter.is_empty() && !filter.iter().any(|s| e.name.contains(s)) {
            continue;
        }
        if e.name.split('/').any(|part| part == ".." || part.is_empty()) {
            return Err(PakError::Invalid(format!("unsafe entry name: {}", e.name)));
        }

        let source = archive.unpack_at(i)?.into_source(archive.cipher())?;

        let mut out_path = output.to_path_buf();
        for part in e.name.split('/') {
            out_path.push(part);
        }
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&out_path, &source)?;
        debug!("extracted {} -> {}", e.name, out_path.display());
        written += 1;
    }

    Ok(written)
}

/// Inflates and decodes every entry.
pub fn verify(archive: &Path, key: &str) -> PakResult<usize> {
    let cipher = XorCipher::new(key)?;
    let archive = Archive::open(archive, &cipher)?;

    for (i, e) in archive.entries().into_iter().enumerate() {
        archive
            .unpack_at(i)
            .and_then(|frame| frame.into_source(archive.cipher()))
            .map_err(|err| PakError::Invalid(format!("{}: {err}", e.name)))?;
    }

    println!("ok: {} entries", archive.len());
    Ok(archive.len())
}

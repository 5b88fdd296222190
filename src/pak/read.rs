#![forbid(unsafe_code)]

use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

use log::debug;

use crate::pak::cipher::Cipher;
use crate::pak::deflate::inflate;
use crate::pak::error::{PakError, PakResult};
use crate::pak::format::{Entry, EntryInfo, MAGIC};
use crate::pak::frame::Frame;
use crate::pak::io::{read_enciphered_str, read_exact, read_u32};
use crate::pak::version::{Version, CURRENT};

/// A loaded archive. Entries are found by scanning the whole file once.
pub struct Archive<'c> {
    data: Vec<u8>,
    entries: Vec<Entry>,
    cipher: &'c dyn Cipher,
}

impl<'c> Archive<'c> {
    pub fn open(path: &Path, cipher: &'c dyn Cipher) -> PakResult<Self> {
        let data = std::fs::read(path).map_err(|e| PakError::input(path, e))?;
        Self::from_bytes(data, cipher)
    }

    pub fn from_bytes(data: Vec<u8>, cipher: &'c dyn Cipher) -> PakResult<Self> {
        Self::from_bytes_as(CURRENT, data, cipher)
    }

    pub(crate) fn from_bytes_as(
        expected: Version,
        data: Vec<u8>,
        cipher: &'c dyn Cipher,
    ) -> PakResult<Self> {
        let entries = read_entries(expected, &data, cipher).map_err(|e| match e {
            PakError::Io(io) => PakError::Invalid(format!("archive truncated: {io}")),
            other => other,
        })?;
        debug!("loaded {} archive entries", entries.len());
        Ok(Self {
            data,
            entries,
            cipher,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in archive order.
    pub fn entries(&self) -> Vec<EntryInfo> {
        self.entries
            .iter()
            .map(|e| EntryInfo {
                name: e.name.clone(),
                version: e.version,
                payload_len: e.payload_len as u64,
            })
            .collect()
    }

    fn index_of(&self, name: &str) -> PakResult<usize> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| PakError::Invalid(format!("asset '{name}' not found")))
    }

    /// Compressed frame bytes of the entry at `index`, exactly as packed.
    pub fn payload_at(&self, index: usize) -> PakResult<&[u8]> {
        let e = self
            .entries
            .get(index)
            .ok_or_else(|| PakError::Invalid(format!("entry index {index} out of range")))?;
        Ok(&self.data[e.payload_offset..e.payload_offset + e.payload_len])
    }

    pub fn payload(&self, name: &str) -> PakResult<&[u8]> {
        self.payload_at(self.index_of(name)?)
    }

    /// Inflates the entry at `index` back into its frame.
    pub fn unpack_at(&self, index: usize) -> PakResult<Frame> {
        let frame = Frame::parse(inflate(self.payload_at(index)?)?)?;
        frame.skeleton_source()?;
        Ok(frame)
    }

    pub fn unpack(&self, name: &str) -> PakResult<Frame> {
        self.unpack_at(self.index_of(name)?)
    }

    pub fn cipher(&self) -> &'c dyn Cipher {
        self.cipher
    }
}

fn read_entries(expected: Version, data: &[u8], cipher: &dyn Cipher) -> PakResult<Vec<Entry>> {
    let mut cur = Cursor::new(data);

    let magic = read_exact::<3>(&mut cur)?;
    if magic != MAGIC {
        return Err(PakError::Invalid("bad archive magic".into()));
    }

    let version = Version::read(&mut cur)?;
    if version != expected {
        return Err(PakError::VersionMismatch {
            expected,
            found: version,
        });
    }

    let count = read_u32(&mut cur)? as usize;
    let mut out: Vec<Entry> = Vec::with_capacity(count.min(4096));
    let mut names: HashSet<String> = HashSet::with_capacity(count.min(4096));

    for _ in 0..count {
        let version = Version::read(&mut cur)?;
        if version != expected {
            return Err(PakError::VersionMismatch {
                expected,
                found: version,
            });
        }

        let name = read_enciphered_str(&mut cur, cipher)?;
        if !names.insert(name.clone()) {
            return Err(PakError::Invalid(format!("asset '{name}' appears twice")));
        }
        let payload_len = read_u32(&mut cur)? as usize;
        let payload_offset = cur.position() as usize;
        if payload_offset + payload_len > data.len() {
            return Err(PakError::Invalid(format!("payload outside file: {name}")));
        }
        cur.set_position((payload_offset + payload_len) as u64);

        out.push(Entry {
            name,
            version,
            payload_offset,
            payload_len,
        });
    }

    if cur.position() as usize != data.len() {
        return Err(PakError::Invalid("trailing bytes after last entry".into()));
    }

    Ok(out)
}

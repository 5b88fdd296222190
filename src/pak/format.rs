#![forbid(unsafe_code)]

use std::fmt;

use crate::pak::version::Version;

/// Archive header magic.
pub const MAGIC: [u8; 3] = *b"pla";

/// Suffix given to compiled asset files by batch compilation.
pub const COMPILED_SUFFIX: &str = "asset";

/// Category tag written as the first byte of every frame.
///
/// The byte values are part of the runtime format. New categories take an
/// unused byte; existing values never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AssetKind {
    Image = b'i',
    Shader = b's',
    Font = b'f',
    Audio = b'a',
    Skeleton = b'x',
    Atlas = b'y',
    Misc = b'm',
}

impl AssetKind {
    pub const ALL: [AssetKind; 7] = [
        AssetKind::Image,
        AssetKind::Shader,
        AssetKind::Font,
        AssetKind::Audio,
        AssetKind::Skeleton,
        AssetKind::Atlas,
        AssetKind::Misc,
    ];

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }

    pub fn name(self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Shader => "shader",
            AssetKind::Font => "font",
            AssetKind::Audio => "audio",
            AssetKind::Skeleton => "skeleton",
            AssetKind::Atlas => "atlas",
            AssetKind::Misc => "misc",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source form of a skeleton, stored as the flag byte after the `x` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SkeletonSource {
    Binary = 0,
    Json = 1,
}

#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub name: String,
    pub version: Version,
    pub payload_offset: usize,
    pub payload_len: usize,
}

/// Public view of an archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub version: Version,
    /// Length of the compressed frame.
    pub payload_len: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_vocabulary_is_stable() {
        let tags: Vec<u8> = AssetKind::ALL.iter().map(|k| k.tag()).collect();
        assert_eq!(tags, b"isfaxym");
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert_eq!(AssetKind::from_tag(b'x'), Some(AssetKind::Skeleton));
        assert_eq!(AssetKind::from_tag(b'z'), None);
        assert_eq!(AssetKind::from_tag(0), None);
    }
}

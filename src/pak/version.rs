#![forbid(unsafe_code)]

use std::fmt;
use std::io::{Read, Write};

use crate::pak::error::PakResult;
use crate::pak::io::{read_u8, write_u8};

/// Version triple stamped on compiled assets, archives and archive entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub revision: u8,
}

/// Version of this tool. Must match the package version.
pub const CURRENT: Version = Version::new(1, 1, 0);

impl Version {
    pub const fn new(major: u8, minor: u8, revision: u8) -> Self {
        Self {
            major,
            minor,
            revision,
        }
    }

    pub fn write(&self, w: &mut dyn Write) -> PakResult<()> {
        write_u8(w, self.major)?;
        write_u8(w, self.minor)?;
        write_u8(w, self.revision)
    }

    pub fn read(r: &mut dyn Read) -> PakResult<Self> {
        let major = read_u8(r)?;
        let minor = read_u8(r)?;
        let revision = read_u8(r)?;
        Ok(Self::new(major, minor, revision))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn current_matches_package_version() {
        assert_eq!(CURRENT.to_string(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn writes_three_raw_bytes() {
        let mut buf = Vec::new();
        Version::new(1, 2, 3).write(&mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(
            Version::read(&mut Cursor::new(buf)).unwrap(),
            Version::new(1, 2, 3)
        );
    }

    #[test]
    fn equality_is_component_wise() {
        assert_ne!(Version::new(1, 0, 0), Version::new(1, 1, 0));
        assert_ne!(Version::new(1, 1, 1), Version::new(1, 1, 0));
    }
}

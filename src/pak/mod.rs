#![forbid(unsafe_code)]

mod cipher;
mod classify;
mod compile;
mod deflate;
mod error;
mod format;
mod frame;
pub mod io;
mod ops;
mod pack;
mod path;
mod read;
mod version;

pub use cipher::{Cipher, XorCipher};
pub use classify::{classify, is_skeleton_document, Category};
pub use compile::{read_compiled_header, CompiledHeader};
pub use error::{PakError, PakResult};
pub use format::{AssetKind, EntryInfo, SkeletonSource, MAGIC};
pub use frame::Frame;
pub use pack::{display_size, PackSummary};
pub use read::Archive;
pub use version::{Version, CURRENT};

pub use ops::{compile, compile_dir, extract, list, pack, verify};

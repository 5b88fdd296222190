#![forbid(unsafe_code)]

use std::path::Path;

use serde_json::Value;

use crate::pak::error::{PakError, PakResult};
use crate::pak::format::{AssetKind, SkeletonSource};

const IMAGE_EXTENSIONS: [&str; 8] = ["png", "bmp", "jpg", "jpeg", "hdr", "psd", "tga", "gif"];
const AUDIO_EXTENSIONS: [&str; 3] = ["mp3", "wav", "ogg"];

/// What a source file is compiled as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Image,
    Shader,
    Font,
    Audio,
    Skeleton(SkeletonSource),
    Atlas,
    Misc,
}

impl Category {
    pub fn kind(self) -> AssetKind {
        match self {
            Category::Image => AssetKind::Image,
            Category::Shader => AssetKind::Shader,
            Category::Font => AssetKind::Font,
            Category::Audio => AssetKind::Audio,
            Category::Skeleton(_) => AssetKind::Skeleton,
            Category::Atlas => AssetKind::Atlas,
            Category::Misc => AssetKind::Misc,
        }
    }
}

/// Lower-cased extension of a logical name, empty when there is none.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Only `.json` needs its contents looked at.
pub fn needs_document(ext: &str) -> bool {
    ext == "json"
}

/// A JSON document is a skeleton when it has non-null `skeleton` and `bones`.
pub fn is_skeleton_document(doc: &Value) -> bool {
    let present = |key: &str| doc.get(key).is_some_and(|v| !v.is_null());
    present("skeleton") && present("bones")
}

/// Classifies by lower-cased extension. `document` is only consulted for
/// `json`, where anything other than a skeleton document falls through to misc.
pub fn classify(ext: &str, document: Option<&Value>) -> Category {
    match ext {
        e if IMAGE_EXTENSIONS.contains(&e) => Category::Image,
        "shd" => Category::Shader,
        "ttf" => Category::Font,
        e if AUDIO_EXTENSIONS.contains(&e) => Category::Audio,
        "skel" => Category::Skeleton(SkeletonSource::Binary),
        "json" if document.is_some_and(is_skeleton_document) => {
            Category::Skeleton(SkeletonSource::Json)
        }
        "atlas" => Category::Atlas,
        _ => Category::Misc,
    }
}

/// Classifies a loaded source file. Malformed JSON is an input error;
/// well-formed JSON without the skeleton keys is simply misc.
pub fn classify_source(name: &str, path: &Path, contents: &[u8]) -> PakResult<Category> {
    let ext = extension_of(name);
    if !needs_document(&ext) {
        return Ok(classify(&ext, None));
    }

    let doc: Value = serde_json::from_slice(contents)
        .map_err(|e| PakError::input(path, format!("invalid json: {e}")))?;
    Ok(classify(&ext, Some(&doc)))
}

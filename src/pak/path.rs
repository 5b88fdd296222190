#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use crate::pak::error::{PakError, PakResult};
use crate::pak::format::COMPILED_SUFFIX;

/// Logical name of an asset: forward slashes, no trailing slash.
pub fn logical_name(asset: &str) -> String {
    let out = asset.replace('\\', "/");
    out.trim_end_matches('/').to_string()
}

/// Logical name of a file found while walking `input_root`.
pub fn normalize_rel_path(input_root: &Path, file_path: &Path) -> PakResult<String> {
    let rel = file_path
        .strip_prefix(input_root)
        .map_err(|_| PakError::input(file_path, "path is outside the asset directory"))?;

    let mut out = String::new();
    for (i, comp) in rel.components().enumerate() {
        if i != 0 {
            out.push('/');
        }
        out.push_str(&comp.as_os_str().to_string_lossy());
    }

    let out = logical_name(out.trim_start_matches('/'));
    if out.is_empty() {
        return Err(PakError::Invalid("empty relative path".into()));
    }

    Ok(out)
}

/// `<output>/<logical name>.asset`
pub fn compiled_path(output: &Path, logical: &str) -> PathBuf {
    let mut p = output.to_path_buf();
    for part in logical.split('/') {
        p.push(part);
    }
    let mut s = p.into_os_string();
    s.push(".");
    s.push(COMPILED_SUFFIX);
    PathBuf::from(s)
}

pub fn should_exclude(norm_path: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|e| !e.is_empty() && norm_path.contains(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backslashes_and_trailing_slashes() {
        assert_eq!(logical_name("images\\ui\\button.png"), "images/ui/button.png");
        assert_eq!(logical_name("shaders/"), "shaders");
        assert_eq!(logical_name(""), "");
    }

    #[test]
    fn relative_to_root() {
        let root = Path::new("/assets");
        let name = normalize_rel_path(root, Path::new("/assets/sfx/hit.wav")).unwrap();
        assert_eq!(name, "sfx/hit.wav");
        assert!(normalize_rel_path(root, Path::new("/other/a.png")).is_err());
    }

    #[test]
    fn compiled_path_appends_suffix() {
        let p = compiled_path(Path::new("out"), "sfx/hit.wav");
        assert_eq!(p, Path::new("out").join("sfx").join("hit.wav.asset"));
    }

    #[test]
    fn excludes_match_substrings() {
        let ex = vec![".git".to_string(), String::new()];
        assert!(should_exclude(".git/config", &ex));
        assert!(!should_exclude("images/a.png", &ex));
    }
}

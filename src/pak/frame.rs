#![forbid(unsafe_code)]

use std::io::Cursor;

use crate::pak::cipher::Cipher;
use crate::pak::classify::Category;
use crate::pak::error::{PakError, PakResult};
use crate::pak::format::{AssetKind, SkeletonSource};
use crate::pak::io::{read_bytes, write_bytes, write_u8};

/// Tag byte plus category specific payload, before compression.
///
/// Layouts of `body`:
/// - shader: `[u32 len][enciphered UTF-8 source]`
/// - skeleton: `[u8 source flag][raw bytes]`
/// - everything else: raw bytes verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub kind: AssetKind,
    pub body: Vec<u8>,
}

impl Frame {
    /// Builds the frame for one classified source file.
    pub fn encode(category: Category, source: Vec<u8>, cipher: &dyn Cipher) -> PakResult<Self> {
        let body = match category {
            Category::Shader => {
                let text = String::from_utf8(source)
                    .map_err(|_| PakError::Invalid("shader source is not utf8".into()))?;
                let mut body = Vec::with_capacity(4 + text.len());
                write_bytes(&mut body, &cipher.encipher(text.as_bytes()))?;
                body
            }
            Category::Skeleton(src) => {
                let mut body = Vec::with_capacity(1 + source.len());
                write_u8(&mut body, src as u8)?;
                body.extend_from_slice(&source);
                body
            }
            Category::Image
            | Category::Font
            | Category::Audio
            | Category::Atlas
            | Category::Misc => source,
        };

        Ok(Self {
            kind: category.kind(),
            body,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.body.len());
        out.push(self.kind.tag());
        out.extend_from_slice(&self.body);
        out
    }

    pub fn parse(mut bytes: Vec<u8>) -> PakResult<Self> {
        let Some(&tag) = bytes.first() else {
            return Err(PakError::Invalid("empty frame".into()));
        };
        let kind = AssetKind::from_tag(tag)
            .ok_or_else(|| PakError::Invalid(format!("unknown asset tag 0x{tag:02x}")))?;
        bytes.remove(0);
        Ok(Self { kind, body: bytes })
    }

    /// Skeleton source form, `None` for other kinds.
    pub fn skeleton_source(&self) -> PakResult<Option<SkeletonSource>> {
        if self.kind != AssetKind::Skeleton {
            return Ok(None);
        }
        match self.body.first() {
            Some(0) => Ok(Some(SkeletonSource::Binary)),
            Some(1) => Ok(Some(SkeletonSource::Json)),
            Some(other) => Err(PakError::Invalid(format!("unknown skeleton flag {other}"))),
            None => Err(PakError::Invalid("skeleton frame without flag byte".into())),
        }
    }

    /// Rebuilds the bytes of the file the frame was compiled from.
    pub fn into_source(self, cipher: &dyn Cipher) -> PakResult<Vec<u8>> {
        match self.kind {
            AssetKind::Shader => {
                let mut cur = Cursor::new(self.body);
                let text = cipher.decipher(&read_bytes(&mut cur)?);
                if cur.position() as usize != cur.get_ref().len() {
                    return Err(PakError::Invalid("trailing bytes after shader source".into()));
                }
                String::from_utf8(text)
                    .map(String::into_bytes)
                    .map_err(|_| {
                        PakError::Invalid("deciphered shader is not utf8 (wrong key?)".into())
                    })
            }
            AssetKind::Skeleton => {
                self.skeleton_source()?;
                let mut body = self.body;
                body.remove(0);
                Ok(body)
            }
            AssetKind::Image
            | AssetKind::Font
            | AssetKind::Audio
            | AssetKind::Atlas
            | AssetKind::Misc => Ok(self.body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pak::cipher::XorCipher;

    fn key() -> XorCipher {
        XorCipher::new("k").unwrap()
    }

    #[test]
    fn raw_categories_pass_bytes_through() {
        for cat in [
            Category::Image,
            Category::Font,
            Category::Audio,
            Category::Atlas,
            Category::Misc,
        ] {
            let frame = Frame::encode(cat, vec![9, 8, 7], &key()).unwrap();
            assert_eq!(frame.to_bytes(), [cat.kind().tag(), 9, 8, 7]);
        }
    }

    #[test]
    fn shader_source_is_enciphered_and_prefixed() {
        let src = b"void main(){}".to_vec();
        let frame = Frame::encode(Category::Shader, src.clone(), &key()).unwrap();

        let mut expected = vec![b's', 13, 0, 0, 0];
        expected.extend(src.iter().map(|b| b ^ b'k'));
        assert_eq!(frame.to_bytes(), expected);

        assert_eq!(frame.into_source(&key()).unwrap(), src);
    }

    #[test]
    fn shader_must_be_utf8() {
        let res = Frame::encode(Category::Shader, vec![0xFF, 0xFE], &key());
        assert!(matches!(res, Err(PakError::Invalid(_))));
    }

    #[test]
    fn skeleton_carries_source_flag() {
        let json = Frame::encode(
            Category::Skeleton(SkeletonSource::Json),
            b"{}".to_vec(),
            &key(),
        )
        .unwrap();
        assert_eq!(json.to_bytes(), [b'x', 1, b'{', b'}']);
        assert_eq!(json.skeleton_source().unwrap(), Some(SkeletonSource::Json));

        let bin =
            Frame::encode(Category::Skeleton(SkeletonSource::Binary), vec![5], &key()).unwrap();
        assert_eq!(bin.to_bytes(), [b'x', 0, 5]);
        assert_eq!(bin.into_source(&key()).unwrap(), [5]);
    }

    #[test]
    fn parse_splits_tag_from_body() {
        let frame = Frame::parse(vec![b'm', 1, 2]).unwrap();
        assert_eq!(frame.kind, AssetKind::Misc);
        assert_eq!(frame.body, [1, 2]);

        assert!(Frame::parse(Vec::new()).is_err());
        assert!(Frame::parse(vec![b'q', 1]).is_err());
    }
}

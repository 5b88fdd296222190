#![forbid(unsafe_code)]

//! Length-prefixed binary primitives shared by compiled assets and archives.
//!
//! Every integer is little-endian with a fixed width, independent of the host.

use std::io::{Read, Write};

use crate::pak::cipher::Cipher;
use crate::pak::error::{PakError, PakResult};

pub fn write_u8(w: &mut dyn Write, v: u8) -> PakResult<()> {
    w.write_all(&[v])?;
    Ok(())
}

pub fn write_u32(w: &mut dyn Write, v: u32) -> PakResult<()> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

pub fn write_i32(w: &mut dyn Write, v: i32) -> PakResult<()> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Converts an in-memory length to the on-disk `u32` length prefix.
pub fn len_u32(len: usize) -> PakResult<u32> {
    u32::try_from(len).map_err(|_| PakError::Invalid(format!("length {len} does not fit in u32")))
}

/// `[u32 len][bytes]`
pub fn write_bytes(w: &mut dyn Write, v: &[u8]) -> PakResult<()> {
    write_u32(w, len_u32(v.len())?)?;
    w.write_all(v)?;
    Ok(())
}

/// `[u32 len][UTF-8 bytes]`; an empty string is just the zero prefix.
pub fn write_str(w: &mut dyn Write, v: &str) -> PakResult<()> {
    write_bytes(w, v.as_bytes())
}

pub fn write_enciphered_str(w: &mut dyn Write, cipher: &dyn Cipher, v: &str) -> PakResult<()> {
    write_bytes(w, &cipher.encipher(v.as_bytes()))
}

pub fn read_exact<const N: usize>(r: &mut dyn Read) -> PakResult<[u8; N]> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

pub fn read_u8(r: &mut dyn Read) -> PakResult<u8> {
    Ok(read_exact::<1>(r)?[0])
}

pub fn read_u32(r: &mut dyn Read) -> PakResult<u32> {
    Ok(u32::from_le_bytes(read_exact::<4>(r)?))
}

pub fn read_i32(r: &mut dyn Read) -> PakResult<i32> {
    Ok(i32::from_le_bytes(read_exact::<4>(r)?))
}

pub fn read_bytes(r: &mut dyn Read) -> PakResult<Vec<u8>> {
    let len = read_u32(r)? as u64;
    let mut out = Vec::new();
    r.take(len).read_to_end(&mut out)?;
    if out.len() as u64 != len {
        return Err(PakError::Invalid(format!(
            "blob truncated: expected {len} bytes, got {}",
            out.len()
        )));
    }
    Ok(out)
}

pub fn read_str(r: &mut dyn Read) -> PakResult<String> {
    let bytes = read_bytes(r)?;
    String::from_utf8(bytes).map_err(|_| PakError::Invalid("string is not utf8".into()))
}

pub fn read_enciphered_str(r: &mut dyn Read, cipher: &dyn Cipher) -> PakResult<String> {
    let bytes = cipher.decipher(&read_bytes(r)?);
    String::from_utf8(bytes)
        .map_err(|_| PakError::Invalid("deciphered string is not utf8 (wrong key?)".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pak::cipher::XorCipher;
    use quickcheck_macros::quickcheck;
    use std::io::Cursor;

    #[test]
    fn integers_are_little_endian() {
        let mut buf = Vec::new();
        write_u32(&mut buf, 0x0403_0201).unwrap();
        write_i32(&mut buf, -2).unwrap();
        write_u8(&mut buf, 7).unwrap();
        assert_eq!(buf, [1, 2, 3, 4, 0xFE, 0xFF, 0xFF, 0xFF, 7]);

        let mut cur = Cursor::new(buf);
        assert_eq!(read_u32(&mut cur).unwrap(), 0x0403_0201);
        assert_eq!(read_i32(&mut cur).unwrap(), -2);
        assert_eq!(read_u8(&mut cur).unwrap(), 7);
    }

    #[test]
    fn empty_string_is_bare_zero_prefix() {
        let mut buf = Vec::new();
        write_str(&mut buf, "").unwrap();
        assert_eq!(buf, [0, 0, 0, 0]);
        assert_eq!(read_str(&mut Cursor::new(buf)).unwrap(), "");
    }

    #[test]
    fn string_prefix_counts_bytes_not_chars() {
        let mut buf = Vec::new();
        write_str(&mut buf, "é").unwrap();
        assert_eq!(buf, [2, 0, 0, 0, 0xC3, 0xA9]);
    }

    #[test]
    fn truncated_blob_is_rejected() {
        let buf = vec![10, 0, 0, 0, 1, 2, 3];
        assert!(matches!(
            read_bytes(&mut Cursor::new(buf)),
            Err(PakError::Invalid(_))
        ));
    }

    #[test]
    fn enciphered_string_hides_plain_bytes() {
        let cipher = XorCipher::new("key").unwrap();
        let mut buf = Vec::new();
        write_enciphered_str(&mut buf, &cipher, "images/a.png").unwrap();
        assert_eq!(&buf[..4], &[12, 0, 0, 0]);
        assert_ne!(&buf[4..], b"images/a.png");
        assert_eq!(
            read_enciphered_str(&mut Cursor::new(buf), &cipher).unwrap(),
            "images/a.png"
        );
    }

    #[quickcheck]
    fn strings_survive_the_wire(s: String) -> bool {
        let mut buf = Vec::new();
        write_str(&mut buf, &s).unwrap();
        buf.len() == 4 + s.len() && read_str(&mut Cursor::new(buf)).unwrap() == s
    }
}

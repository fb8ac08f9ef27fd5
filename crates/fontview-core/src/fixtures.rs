//! Font files for unit tests

use std::path::{Path, PathBuf};

pub const DEJAVU: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../default_fonts/DejaVuSans.ttf");

/// Copy of DejaVu Sans in `dir` whose family name reads `family` instead.
///
/// The name table is patched in place, so `family` must be as long as "DejaVu Sans".
pub fn dejavu_with_family(dir: &Path, file_name: &str, family: &str) -> PathBuf {
    const ORIGINAL: &str = "DejaVu Sans";
    assert_eq!(family.len(), ORIGINAL.len());

    let mut data = std::fs::read(DEJAVU).unwrap();
    let utf16 = |s: &str| s.encode_utf16().flat_map(u16::to_be_bytes).collect::<Vec<u8>>();
    for (from, to) in [
        (ORIGINAL.as_bytes().to_vec(), family.as_bytes().to_vec()),
        (utf16(ORIGINAL), utf16(family)),
    ] {
        let starts: Vec<usize> = data
            .windows(from.len())
            .enumerate()
            .filter(|(_, window)| *window == from.as_slice())
            .map(|(start, _)| start)
            .collect();
        for start in starts {
            data[start..start + to.len()].copy_from_slice(&to);
        }
    }

    let path = dir.join(file_name);
    std::fs::write(&path, data).unwrap();
    path
}

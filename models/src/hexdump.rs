//! 원시 구조체의 hex + ASCII 덤프.
//!
//! 한 줄 형식: `0xOOOOOOOO  hh hh .. hh  hh .. hh  ascii` (가운데 바이트 뒤에 공백 하나 추가)

use std::fmt;

pub const DEFAULT_WIDTH: usize = 16;

/// `Display`로 출력되는 hex 덤프 어댑터
#[derive(Debug, Clone, Copy)]
pub struct HexDump<'a> {
    bytes: &'a [u8],
    width: usize,
    offset: u64,
}

impl<'a> HexDump<'a> {
    /// `width`가 0이면 [`DEFAULT_WIDTH`] 사용
    pub fn new(bytes: &'a [u8], width: usize, offset: u64) -> Self {
        let width = if width == 0 { DEFAULT_WIDTH } else { width };
        Self { bytes, width, offset }
    }
}

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut offset = self.offset;
        for chunk in self.bytes.chunks(self.width) {
            write!(f, "{:#010x}  ", offset)?;
            for (i, byte) in chunk.iter().enumerate() {
                write!(f, "{:02x} ", byte)?;
                if i + 1 == self.width / 2 {
                    f.write_str(" ")?;
                }
            }
            f.write_str(" ")?;
            for &byte in chunk {
                write!(f, "{}", printable(byte))?;
            }
            f.write_str("\n")?;
            offset = offset.wrapping_add(self.width as u64);
        }
        Ok(())
    }
}

/// `bytes`를 `offset`부터 시작하는 덤프 문자열로 변환
pub fn render(bytes: &[u8], width: usize, offset: u64) -> String {
    HexDump::new(bytes, width, offset).to_string()
}

// 공백과 출력 가능한 ASCII만 그대로, 탭/개행 등 나머지는 '.'
fn printable(byte: u8) -> char {
    if byte == b' ' || byte.is_ascii_graphic() {
        byte as char
    } else {
        '.'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_bytes_render_as_dots() {
        let bytes: Vec<u8> = (0x00..0x10).collect();
        let dump = render(&bytes, 16, 0);

        assert_eq!(dump.lines().count(), 1);
        assert_eq!(
            dump,
            "0x00000000  00 01 02 03 04 05 06 07  08 09 0a 0b 0c 0d 0e 0f  ................\n"
        );
    }

    #[test]
    fn offsets_advance_by_width_and_last_line_is_short() {
        let dump = render(b"NTFS    \x00\x02\x08", 8, 0x100000);
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "0x00100000  4e 54 46 53  20 20 20 20  NTFS    ");
        assert_eq!(lines[1], "0x00100008  00 02 08  ...");
    }

    #[test]
    fn zero_width_falls_back_to_default() {
        let bytes = [0x41u8; 32];
        assert_eq!(render(&bytes, 0, 0x1c0), render(&bytes, DEFAULT_WIDTH, 0x1c0));
        assert_eq!(render(&bytes, 0, 0).lines().count(), 2);
    }

    #[test]
    fn whitespace_controls_are_not_printable() {
        let dump = render(b"a\tb\nc d\x7f", 16, 0);
        assert!(dump.ends_with(" a.b.c d.\n"));
    }

    #[test]
    fn render_is_deterministic() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(render(&bytes, 16, 0x7e00), render(&bytes, 16, 0x7e00));
        assert_eq!(render(&[], 16, 0), "");
    }

    #[test]
    fn width_one_has_no_midpoint_gap() {
        assert_eq!(render(b"AB", 1, 0), "0x00000000  41  A\n0x00000001  42  B\n");
    }
}

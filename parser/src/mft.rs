use binrw::BinReaderExt;
use models::mft::{FileRecordHeader, FILE_SIGNATURE, MFT_RECORD_SIZE};
use models::{DecodeOptions, ScopeError};
use std::io::Cursor;

/// `record_offset`에 위치한 1024바이트 MFT 레코드의 헤더를 파싱한다.
/// 헤더 뒤의 속성(Attribute)은 순회하지 않고, Fixup 배열도 적용하지 않는다.
pub fn parse_file_record_header(
    data: &[u8],
    record_offset: u64,
    options: &DecodeOptions,
) -> Result<FileRecordHeader, ScopeError> {
    ScopeError::ensure_len("MFT Record Header", data, MFT_RECORD_SIZE)?;

    let mut reader = Cursor::new(data);
    let header: FileRecordHeader = reader
        .read_le_args((record_offset,))
        .map_err(|e| ScopeError::ParseError {
            structure: "MFT Record Header",
            details: e.to_string(),
        })?;

    if options.strict && !header.has_file_signature() {
        return Err(ScopeError::SignatureMismatch {
            structure: "MFT Record Header",
            expected: String::from_utf8_lossy(&FILE_SIGNATURE.to_le_bytes()).into_owned(),
            found: header.signature_str(),
        });
    }

    Ok(header)
}

use thiserror::Error;

/// ntscope 전 단계에서 사용되는 통합 에러 타입
#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("I/O Error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("No bootable NTFS partition found in the {slots} partition table slots")]
    NoBootablePartition { slots: usize },

    #[error("Truncated buffer for '{structure}': need {expected} bytes, got {actual}")]
    TruncatedBuffer {
        structure: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Signature mismatch in '{structure}': expected {expected:?}, found {found:?}")]
    SignatureMismatch {
        structure: &'static str,
        expected: String,
        found: String,
    },

    #[error("Cluster geometry overflows a 64-bit disk offset (MFT cluster {mft_lcn})")]
    GeometryOverflow { mft_lcn: u64 },

    #[error("Parsing failed for structure '{structure}': {details}")]
    ParseError { structure: &'static str, details: String },
}

impl ScopeError {
    /// `data`가 `structure`에 필요한 `expected` 바이트 이상인지 확인
    pub fn ensure_len(structure: &'static str, data: &[u8], expected: usize) -> Result<(), Self> {
        if data.len() < expected {
            return Err(Self::TruncatedBuffer {
                structure,
                expected,
                actual: data.len(),
            });
        }
        Ok(())
    }
}

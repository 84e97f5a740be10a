/// 디코더 실행 옵션
///
/// 기본값은 관대 모드: OEM ID와 레코드 시그니처를 읽기만 하고 비교하지 않는다.
/// `strict`이면 둘 다 [`ScopeError::SignatureMismatch`](crate::ScopeError::SignatureMismatch)로 처리한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub strict: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

//! 生成器错误类型定义

use thiserror::Error;

/// 生成器错误类型
///
/// `Faulted` 是生产者自身的故障（只会出现一次，出现在进入完成态的那一次拉取）；
/// 其余变体都是消费者侧的误用，每次误用都会可靠地失败，不会返回陈旧数据。
#[derive(Error, Debug)]
pub enum GeneratorError<E> {
    /// 生产者在 yield 之前失败
    #[error("Producer faulted: {0}")]
    Faulted(#[source] E),

    /// 当前没有可读取的值（尚未 advance，或已完成）
    #[error("No current value (generator not advanced or already finished)")]
    NoValue,

    /// 对已完成的生成器继续 advance
    #[error("Generator already finished")]
    Exhausted,

    /// 对已被 detach() 移走状态的空生成器 advance
    #[error("Generator is empty (state was moved out)")]
    Empty,
}

impl<E> GeneratorError<E> {
    /// 是否为生产者故障（而非误用）
    pub fn is_fault(&self) -> bool {
        matches!(self, GeneratorError::Faulted(_))
    }

    /// 取出生产者故障
    pub fn into_fault(self) -> Option<E> {
        match self {
            GeneratorError::Faulted(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GeneratorError;
    use std::io;

    #[test]
    fn test_generator_error_display() {
        let err: GeneratorError<io::Error> =
            GeneratorError::Faulted(io::Error::other("sensor offline"));
        let msg = format!("{}", err);
        assert!(msg.contains("Producer faulted") && msg.contains("sensor offline"));

        let err: GeneratorError<io::Error> = GeneratorError::Exhausted;
        assert_eq!(format!("{}", err), "Generator already finished");

        let err: GeneratorError<io::Error> = GeneratorError::Empty;
        assert!(format!("{}", err).contains("empty"));
    }

    #[test]
    fn test_fault_source_is_preserved() {
        use std::error::Error;

        let err: GeneratorError<io::Error> = GeneratorError::Faulted(io::Error::other("boom"));
        assert!(err.source().is_some());
        assert!(err.is_fault());
        assert_eq!(err.into_fault().map(|e| e.to_string()), Some("boom".to_string()));

        let err: GeneratorError<io::Error> = GeneratorError::NoValue;
        assert!(err.source().is_none());
        assert!(!err.is_fault());
    }
}

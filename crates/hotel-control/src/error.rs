//! 控制层错误类型定义

use crate::capability::BoxError;
use std::time::Duration;
use thiserror::Error;

/// 控制层错误类型
#[derive(Error, Debug)]
pub enum ControlError {
    /// 反馈函数失败（生成器体内的生产者故障）
    #[error("Feedback function failed: {0}")]
    Feedback(#[source] BoxError),

    /// 收敛判定失败（生成器体内的生产者故障）
    #[error("Settled predicate failed: {0}")]
    Settled(#[source] BoxError),

    /// 两次迭代之间的 dT 为零
    ///
    /// dT 以整毫秒计，拉取间隔小于 1ms 也会落到这里。
    #[error("Zero control interval: dT = {elapsed:?} truncates to 0 ms (pace pulls at least 1 ms apart)")]
    ZeroInterval { elapsed: Duration },

    /// 增益分母为零
    #[error("Invalid gain ratio {num}/0: denominator must be non-zero")]
    ZeroDenominator { num: i64 },

    /// 增益不是有限值
    #[error("Invalid gain {name} = {value}: must be finite")]
    NonFiniteGain { name: &'static str, value: f64 },
}

impl ControlError {
    /// 是否来自调用方提供的回调（反馈函数或收敛判定）
    pub fn is_callback_fault(&self) -> bool {
        matches!(self, ControlError::Feedback(_) | ControlError::Settled(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_control_error_display() {
        let err = ControlError::Feedback("encoder unplugged".into());
        let msg = format!("{}", err);
        assert!(msg.contains("Feedback function failed") && msg.contains("encoder unplugged"));
        assert!(err.source().is_some());
        assert!(err.is_callback_fault());

        let err = ControlError::ZeroInterval {
            elapsed: Duration::from_micros(300),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Zero control interval") && msg.contains("300"));
        assert!(!err.is_callback_fault());

        let err = ControlError::ZeroDenominator { num: 3 };
        assert_eq!(
            format!("{}", err),
            "Invalid gain ratio 3/0: denominator must be non-zero"
        );
    }
}

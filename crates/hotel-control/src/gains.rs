//! 增益 - 有理数常量到实数增益
//!
//! 增益用精确的有理数（`num / den`）书写，构造时换算一次为 `f64`，
//! 之后在控制器生命周期内固定不变。

use crate::error::ControlError;
use std::fmt;

/// 有理数增益常量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GainRatio {
    num: i64,
    den: i64,
}

impl GainRatio {
    /// `0/1`
    pub const ZERO: GainRatio = GainRatio::from_integer(0);

    /// `1/1`
    pub const ONE: GainRatio = GainRatio::from_integer(1);

    /// 创建有理数增益（分母不能为零）
    pub fn new(num: i64, den: i64) -> Result<Self, ControlError> {
        if den == 0 {
            return Err(ControlError::ZeroDenominator { num });
        }
        Ok(GainRatio { num, den })
    }

    /// 整数增益 `n/1`
    pub const fn from_integer(num: i64) -> Self {
        GainRatio { num, den: 1 }
    }

    pub fn num(&self) -> i64 {
        self.num
    }

    pub fn den(&self) -> i64 {
        self.den
    }

    /// 换算为实数
    pub fn value(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl fmt::Display for GainRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// PID 增益（Kp / Ki / Kd）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gains {
    /// 比例增益
    pub kp: f64,
    /// 积分增益
    pub ki: f64,
    /// 微分增益
    pub kd: f64,
}

impl Gains {
    /// 从实数增益创建（必须为有限值）
    pub fn new(kp: f64, ki: f64, kd: f64) -> Result<Self, ControlError> {
        for (name, value) in [("kp", kp), ("ki", ki), ("kd", kd)] {
            if !value.is_finite() {
                return Err(ControlError::NonFiniteGain { name, value });
            }
        }
        Ok(Gains { kp, ki, kd })
    }

    /// 从有理数增益创建
    pub fn from_ratios(kp: GainRatio, ki: GainRatio, kd: GainRatio) -> Self {
        Gains {
            kp: kp.value(),
            ki: ki.value(),
            kd: kd.value(),
        }
    }

    /// 纯比例控制
    pub fn p(kp: GainRatio) -> Self {
        Self::from_ratios(kp, GainRatio::ZERO, GainRatio::ZERO)
    }

    /// PI 控制
    pub fn pi(kp: GainRatio, ki: GainRatio) -> Self {
        Self::from_ratios(kp, ki, GainRatio::ZERO)
    }

    /// PD 控制
    pub fn pd(kp: GainRatio, kd: GainRatio) -> Self {
        Self::from_ratios(kp, GainRatio::ZERO, kd)
    }
}

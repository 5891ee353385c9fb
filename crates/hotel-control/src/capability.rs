//! 能力 trait - 控制器在调用边界上要求的接口
//!
//! 每个概念只定义一次：
//!
//! | Trait | 形状 | 说明 |
//! |-------|------|------|
//! | [`FeedbackFn<T>`] | `FnMut() -> Result<T, E>` | 读取当前过程值 |
//! | [`SettledFn<T>`] | `FnMut(T) -> bool` | 根据当前误差判断是否收敛 |
//! | [`ControlTarget`] | `i16` `i32` `i64` `f32` `f64` | 设定值 / 误差类型 |
//! | [`ControlOutput`] | `i16` `i32` `i64` `f32` `f64` | 执行器输出类型 |
//!
//! 不可失败的反馈函数用 [`infallible`] 包装，可失败的收敛判定用 [`fallible`] 包装。

use std::fmt;

/// 回调返回的外部错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 反馈函数：每次迭代调用一次，返回当前过程值
pub trait FeedbackFn<T> {
    /// 采样当前过程值
    fn sample(&mut self) -> Result<T, BoxError>;
}

impl<T, E, F> FeedbackFn<T> for F
where
    F: FnMut() -> Result<T, E>,
    E: Into<BoxError>,
{
    fn sample(&mut self) -> Result<T, BoxError> {
        self().map_err(Into::into)
    }
}

/// 不会失败的反馈函数，见 [`infallible`]
#[derive(Clone)]
pub struct Infallible<F>(F);

/// 把 `FnMut() -> T` 包装为反馈函数
///
/// ```rust
/// use hotel_control::{FeedbackFn, infallible};
///
/// let mut feedback = infallible(|| 42.0_f64);
/// assert_eq!(feedback.sample().unwrap(), 42.0);
/// ```
pub fn infallible<T, F>(f: F) -> Infallible<F>
where
    F: FnMut() -> T,
{
    Infallible(f)
}

impl<T, F> FeedbackFn<T> for Infallible<F>
where
    F: FnMut() -> T,
{
    fn sample(&mut self) -> Result<T, BoxError> {
        Ok((self.0)())
    }
}

/// 收敛判定：每次迭代在计算误差之后立即调用一次
pub trait SettledFn<T> {
    /// 当前误差是否已收敛
    fn is_settled(&mut self, error: T) -> Result<bool, BoxError>;
}

impl<T, F> SettledFn<T> for F
where
    F: FnMut(T) -> bool,
{
    fn is_settled(&mut self, error: T) -> Result<bool, BoxError> {
        Ok(self(error))
    }
}

/// 可能失败的收敛判定，见 [`fallible`]
#[derive(Clone)]
pub struct Fallible<F>(F);

/// 把 `FnMut(T) -> Result<bool, E>` 包装为收敛判定
pub fn fallible<T, E, F>(f: F) -> Fallible<F>
where
    F: FnMut(T) -> Result<bool, E>,
    E: Into<BoxError>,
{
    Fallible(f)
}

impl<T, E, F> SettledFn<T> for Fallible<F>
where
    F: FnMut(T) -> Result<bool, E>,
    E: Into<BoxError>,
{
    fn is_settled(&mut self, error: T) -> Result<bool, BoxError> {
        (self.0)(error).map_err(Into::into)
    }
}

impl<F> fmt::Debug for Infallible<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Infallible(..)")
    }
}

impl<F> fmt::Debug for Fallible<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Fallible(..)")
    }
}

/// 设定值 / 误差的数值类型
///
/// 整数类型的误差和积分累加使用饱和运算，避免溢出 panic。
pub trait ControlTarget: Copy + PartialEq + fmt::Debug {
    /// 零值（初始设定值、积分和上次误差）
    const ZERO: Self;

    /// `setpoint - measured`
    fn error(setpoint: Self, measured: Self) -> Self;

    /// 积分累加 `self + error`
    fn accumulate(self, error: Self) -> Self;

    /// 转换为控制律使用的实数
    fn to_f64(self) -> f64;
}

/// 执行器输出类型
pub trait ControlOutput {
    /// 从控制律的实数结果转换（整数类型饱和截断，NaN 变为 0）
    fn from_control(value: f64) -> Self;
}

macro_rules! impl_integer_signal {
    ($($t:ty),*) => {$(
        impl ControlTarget for $t {
            const ZERO: Self = 0;

            fn error(setpoint: Self, measured: Self) -> Self {
                setpoint.saturating_sub(measured)
            }

            fn accumulate(self, error: Self) -> Self {
                self.saturating_add(error)
            }

            fn to_f64(self) -> f64 {
                self as f64
            }
        }

        impl ControlOutput for $t {
            fn from_control(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

macro_rules! impl_float_signal {
    ($($t:ty),*) => {$(
        impl ControlTarget for $t {
            const ZERO: Self = 0.0;

            fn error(setpoint: Self, measured: Self) -> Self {
                setpoint - measured
            }

            fn accumulate(self, error: Self) -> Self {
                self + error
            }

            fn to_f64(self) -> f64 {
                self as f64
            }
        }

        impl ControlOutput for $t {
            fn from_control(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

impl_integer_signal!(i16, i32, i64);
impl_float_signal!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_feedback_propagates_error() {
        let mut calls = 0;
        let mut feedback = move || -> Result<f64, &'static str> {
            calls += 1;
            if calls > 1 { Err("stale encoder") } else { Ok(1.5) }
        };

        assert_eq!(FeedbackFn::<f64>::sample(&mut feedback).unwrap(), 1.5);
        let err = FeedbackFn::<f64>::sample(&mut feedback).unwrap_err();
        assert_eq!(err.to_string(), "stale encoder");
    }

    #[test]
    fn test_settled_closure_and_fallible() {
        let mut settled = |error: i32| error.abs() < 3;
        assert!(settled.is_settled(2).unwrap());
        assert!(!settled.is_settled(-3).unwrap());

        let mut checked = fallible(|error: f64| {
            if error.is_nan() { Err("NaN error") } else { Ok(error == 0.0) }
        });
        assert!(checked.is_settled(0.0).unwrap());
        assert!(checked.is_settled(f64::NAN).is_err());
    }

    #[test]
    fn test_integer_target_saturates() {
        assert_eq!(i16::error(i16::MAX, i16::MIN), i16::MAX);
        assert_eq!(i32::MAX.accumulate(1), i32::MAX);
        assert_eq!(i32::error(10, 3), 7);
    }

    #[test]
    fn test_output_conversion() {
        assert_eq!(i32::from_control(9.99), 9);
        assert_eq!(i32::from_control(-9.99), -9);
        assert_eq!(i16::from_control(1.0e9), i16::MAX);
        assert_eq!(i32::from_control(f64::NAN), 0);
        assert_eq!(f32::from_control(0.5), 0.5);
    }
}

//! 电机控制器类型别名
//!
//! 电机命令为 `i32`（例如 ±127 的电压档位），调用方在驱动电机前自行限幅。
//!
//! ```rust
//! use hotel_control::{GainRatio, Gains, MotorPositionController, infallible};
//!
//! # let encoder_position = || 180.0_f64;
//! let controller = MotorPositionController::new(
//!     Gains::pd(GainRatio::new(1, 2)?, GainRatio::new(1, 100)?),
//!     infallible(encoder_position),      // 反馈函数
//!     |error: f64| error.abs() < 5.0,    // 收敛判定
//! )
//! .with_setpoint(200.0);                 // 初始设定值（可选）
//! # let _ = controller;
//! # Ok::<(), hotel_control::ControlError>(())
//! ```

use crate::clock::MonotonicClock;
use crate::pid::PidController;

/// 位置控制器（反馈例如编码器位置）
pub type MotorPositionController<F, S, C = MonotonicClock> = PidController<f64, i32, F, S, C>;

/// 速度控制器（反馈例如实际转速）
pub type MotorVelocityController<F, S, C = MonotonicClock> = PidController<f64, i32, F, S, C>;

/// 力矩控制器（反馈例如电流，整数毫安）
pub type MotorTorqueController<F, S, C = MonotonicClock> = PidController<i32, i32, F, S, C>;

/// 电压控制器（反馈例如电机电压）
pub type MotorVoltageController<F, S, C = MonotonicClock> = PidController<f64, i32, F, S, C>;

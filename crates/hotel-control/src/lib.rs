//! # Hotel Control - 生成器驱动的 PID 控制
//!
//! 控制律写成生成器：每拉取一次就采样一次反馈、计算一次输出；
//! 何时拉取（采样率）完全由调用方决定。
//!
//! ## 包含模块
//!
//! - `capability` - 反馈函数 / 收敛判定 / 数值类型的能力 trait
//! - `clock` - 单调时钟协作者（`MonotonicClock`、`ManualClock`）
//! - `gains` - 有理数增益与 `Gains`
//! - `pid` - `PidController` 及其生成器体
//! - `motor` - 电机控制器类型别名
//! - `config` - TOML 配置
//! - `loop_runner` - 带节拍的控制循环包装器
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! use hotel_control::{Gains, GainRatio, MotorPositionController, infallible};
//! use std::time::Duration;
//!
//! # fn read_encoder() -> f64 { 0.0 }
//! # fn drive_motor(_: i32) {}
//! let gains = Gains::from_ratios(
//!     GainRatio::new(1, 2)?,
//!     GainRatio::ZERO,
//!     GainRatio::new(1, 100)?,
//! );
//! let mut controller = MotorPositionController::new(
//!     gains,
//!     infallible(read_encoder),
//!     |error: f64| error.abs() < 5.0,
//! )
//! .with_setpoint(200.0);
//!
//! for output in controller.run() {
//!     drive_motor(output?.clamp(-127, 127));
//!     std::thread::sleep(Duration::from_millis(20));
//! }
//!
//! // 新目标，立即开始新一轮控制
//! for output in controller.target(300.0).run() {
//!     drive_motor(output?.clamp(-127, 127));
//!     std::thread::sleep(Duration::from_millis(10));
//! }
//! # Ok::<(), hotel_control::ControlError>(())
//! ```

pub mod capability;
pub mod clock;
pub mod config;
pub mod error;
pub mod gains;
pub mod loop_runner;
pub mod motor;
pub mod pid;

// 重新导出常用类型
pub use capability::{
    BoxError, ControlOutput, ControlTarget, Fallible, FeedbackFn, Infallible, SettledFn, fallible,
    infallible,
};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{ConfigError, ControllerSection, GainSpec, GainsConfig, HotelConfig, LoopSection};
pub use error::ControlError;
pub use gains::{GainRatio, Gains};
pub use loop_runner::{LoopConfig, LoopError, LoopOutcome, StopReason, drive, drive_until};
pub use motor::{
    MotorPositionController, MotorTorqueController, MotorVelocityController,
    MotorVoltageController,
};
pub use pid::{PidController, PidRun};

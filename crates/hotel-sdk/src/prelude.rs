//! Prelude - 常用类型的便捷导入
//!
//! 大多数用户应该使用这个模块来导入常用类型：
//!
//! ```rust
//! use hotel_sdk::prelude::*;
//! ```

// 生成器
pub use hotel_coro::{Generator, GeneratorError, Producer, Step};

// 控制器
pub use hotel_control::{
    MotorPositionController, MotorTorqueController, MotorVelocityController,
    MotorVoltageController, PidController,
};

// 增益与配置
pub use hotel_control::{GainRatio, Gains, HotelConfig, LoopConfig};

// 能力 trait（反馈函数 / 收敛判定 / 时钟）
pub use hotel_control::{Clock, FeedbackFn, ManualClock, MonotonicClock, SettledFn};
pub use hotel_control::{fallible, infallible};

// 控制循环
pub use hotel_control::{LoopOutcome, StopReason, drive, drive_until};

// 错误类型
pub use hotel_control::{ConfigError, ControlError, LoopError};

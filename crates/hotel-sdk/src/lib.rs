//! Hotel SDK - 生成器驱动的 PID 控制
//!
//! 面向嵌入式执行器（电机、舵机）的控制库：控制律写成生成器，
//! 每拉取一次执行一次迭代，采样率由调用方决定。
//!
//! # 架构设计
//!
//! 本 SDK 采用分层架构，从底层到高层：
//!
//! - **生成器层** (`coro`): 单消费者、拉取式的生成器原语
//! - **控制层** (`control`): PID 控制器、时钟、增益配置、控制循环
//!
//! # 快速开始
//!
//! ```rust
//! use hotel_sdk::prelude::*;
//! // 或
//! use hotel_sdk::{Gains, GainRatio, MotorPositionController};
//! ```
//!
//! 需要自己实现生成器体的用户可以直接使用生成器层：
//!
//! ```rust
//! use hotel_sdk::coro::{Generator, Producer, Step};
//! ```

pub use hotel_control as control;
pub use hotel_coro as coro;

pub mod logging;
pub mod prelude;

// --- 用户以此为界 ---
// 以下是通过 Facade Pattern 提供的公共 API

// 生成器层
pub use hotel_coro::{Generator, GeneratorError, Producer, Step};

// 控制层（推荐入口）
pub use hotel_control::{
    ControlError, GainRatio, Gains, HotelConfig, LoopConfig, LoopError, LoopOutcome,
    MotorPositionController, MotorTorqueController, MotorVelocityController,
    MotorVoltageController, PidController, StopReason, drive, drive_until, fallible, infallible,
};

// 日志
pub use logging::{LoggingError, init_logging, init_logging_with};

//! Loop Runner - 控制循环包装器
//!
//! 调用方侧的节拍辅助：驱动**一个**生成器，按固定间隔拉取并把输出交给执行器。
//! 它不是调度器，不会并发驱动多个生成器。
//!
//! # 核心功能
//!
//! - **节拍**: 每次拉取前休眠 `period`（可选 `spin_sleep` 低抖动延时）
//! - **外部超时**: `max_iterations` / `timeout` 到达后 drop 生成器（即取消）
//! - **外部停止**: [`drive_until`] 在每次拉取前检查停止条件（例如 Ctrl+C 标志）
//! - **错误区分**: 控制器故障与执行器错误分别返回
//!
//! # 使用场景
//!
//! ```rust,no_run
//! use hotel_control::{Gains, GainRatio, LoopConfig, MotorPositionController, drive, infallible};
//! use std::time::Duration;
//!
//! # fn read_encoder() -> f64 { 0.0 }
//! # fn motor_move(_: i32) -> Result<(), std::io::Error> { Ok(()) }
//! let mut controller = MotorPositionController::new(
//!     Gains::p(GainRatio::new(1, 2)?),
//!     infallible(read_encoder),
//!     |error: f64| error.abs() < 5.0,
//! )
//! .with_setpoint(200.0);
//!
//! let config = LoopConfig {
//!     period: Duration::from_millis(20),      // 50Hz
//!     max_iterations: Some(500),
//!     timeout: Some(Duration::from_secs(10)),
//!     spin: false,
//! };
//!
//! let outcome = drive(controller.run(), |output: i32| motor_move(output.clamp(-127, 127)), &config)?;
//! println!("{:?} after {} iterations", outcome.reason, outcome.iterations);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::ControlError;
use hotel_coro::{Generator, Producer};
use std::time::{Duration, Instant};
use thiserror::Error;

/// 控制循环配置
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    /// 两次拉取之间的间隔
    ///
    /// 控制器的 dT 以整毫秒计，因此至少为 1ms。
    pub period: Duration,

    /// 最大迭代次数（None 表示直到收敛）
    pub max_iterations: Option<usize>,

    /// 总运行时间上限（None 表示不限）
    pub timeout: Option<Duration>,

    /// 使用 `spin_sleep` 代替 `std::thread::sleep`
    pub spin: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        LoopConfig {
            period: Duration::from_millis(20), // 默认 50Hz
            max_iterations: None,
            timeout: None,
            spin: false,
        }
    }
}

impl LoopConfig {
    /// 校验配置
    pub fn validate(&self) -> Result<(), String> {
        if self.period < Duration::from_millis(1) {
            return Err(format!(
                "period {:?} is shorter than the 1 ms control resolution",
                self.period
            ));
        }
        if self.period < Duration::from_millis(5) {
            tracing::warn!(
                "Very short control period: {:?}. Jitter may exceed the period.",
                self.period
            );
        }
        Ok(())
    }
}

/// 循环结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// 生成器正常结束（收敛）
    Settled,
    /// 达到最大迭代次数
    IterationLimit,
    /// 达到超时
    Timeout,
    /// 停止条件为真（`drive_until`）
    Stopped,
}

/// 循环结果
#[derive(Debug, Clone, PartialEq)]
pub struct LoopOutcome {
    pub reason: StopReason,
    /// 交给执行器的输出个数
    pub iterations: usize,
    pub elapsed: Duration,
}

/// 控制循环错误
#[derive(Error, Debug)]
pub enum LoopError<A> {
    /// 配置无效
    #[error("Invalid loop config: {0}")]
    InvalidConfig(String),

    /// 控制器故障（反馈函数、收敛判定或 dT）
    #[error("Controller fault after {iterations} iterations: {source}")]
    Control {
        iterations: usize,
        #[source]
        source: ControlError,
    },

    /// 执行器返回错误
    #[error("Actuator error after {iterations} iterations: {source}")]
    Actuator {
        iterations: usize,
        #[source]
        source: A,
    },
}

/// 运行控制循环
///
/// 阻塞直到：
/// - 生成器结束（`StopReason::Settled`）
/// - 达到 `max_iterations` 或 `timeout`（生成器被 drop）
/// - 控制器或执行器出错
///
/// 每次迭代：休眠 `period` → 拉取一个输出 → `actuate(output)`。
pub fn drive<P, A, E>(
    generator: Generator<P>,
    actuate: A,
    config: &LoopConfig,
) -> Result<LoopOutcome, LoopError<E>>
where
    P: Producer<Error = ControlError>,
    A: FnMut(P::Item) -> Result<(), E>,
{
    drive_until(generator, actuate, config, || false)
}

/// 运行控制循环，`should_stop()` 为真时提前结束（`StopReason::Stopped`）
///
/// 停止条件在休眠之后、拉取之前检查，因此停止后不会再采样反馈。
pub fn drive_until<P, A, E, S>(
    mut generator: Generator<P>,
    mut actuate: A,
    config: &LoopConfig,
    mut should_stop: S,
) -> Result<LoopOutcome, LoopError<E>>
where
    P: Producer<Error = ControlError>,
    A: FnMut(P::Item) -> Result<(), E>,
    S: FnMut() -> bool,
{
    config.validate().map_err(LoopError::InvalidConfig)?;

    let start = Instant::now();
    let mut iterations = 0;

    let outcome = |reason, iterations| LoopOutcome {
        reason,
        iterations,
        elapsed: start.elapsed(),
    };

    loop {
        if let Some(max_iter) = config.max_iterations
            && iterations >= max_iter
        {
            tracing::debug!("Control loop reached max_iterations ({})", max_iter);
            return Ok(outcome(StopReason::IterationLimit, iterations));
        }

        if let Some(timeout) = config.timeout
            && start.elapsed() >= timeout
        {
            tracing::warn!("Control loop timed out after {} iterations", iterations);
            return Ok(outcome(StopReason::Timeout, iterations));
        }

        // 先休眠再拉取：控制器的 dT 从构造（或 target()）时刻起算
        if config.spin {
            spin_sleep::sleep(config.period);
        } else {
            std::thread::sleep(config.period);
        }

        if should_stop() {
            tracing::info!("Control loop stopped after {} iterations", iterations);
            return Ok(outcome(StopReason::Stopped, iterations));
        }

        match generator.next() {
            None => {
                tracing::debug!("Control loop settled after {} iterations", iterations);
                return Ok(outcome(StopReason::Settled, iterations));
            },
            Some(Err(source)) => {
                return Err(LoopError::Control { iterations, source });
            },
            Some(Ok(output)) => {
                actuate(output).map_err(|source| LoopError::Actuator { iterations, source })?;
            },
        }

        iterations += 1;
    }
}

//! PID Controller - 以生成器形式运行的比例-积分-微分控制器
//!
//! # 算法
//!
//! ```text
//! output = Kp * e + Ki * Σe * dT + Kd * (e_last - e) / dT
//! ```
//!
//! 其中：
//! - `e` = 设定值 - 反馈值（误差）
//! - `Σe` = 累积误差（包含本次误差）
//! - `e_last` = 上一次迭代的误差
//! - `dT` = 距上一次迭代（或构造 / `target()`）的整毫秒数
//!
//! # 迭代顺序
//!
//! 1. 采样反馈，计算误差
//! 2. 收敛判定：已收敛则结束生成器（本次不产出值，也不改动积分/微分历史）
//! 3. 读取时钟，dT 为 0 则以 `ControlError::ZeroInterval` 结束（同样不改动历史）
//! 4. 累加误差、计算输出、更新时间戳和上次误差，产出输出
//!
//! 控制器本身不做输出限幅、积分限幅或抗饱和，输出范围由调用方负责。

use crate::capability::{ControlOutput, ControlTarget, FeedbackFn, SettledFn};
use crate::clock::{Clock, MonotonicClock};
use crate::error::ControlError;
use crate::gains::Gains;
use hotel_coro::{Generator, Producer, Step};
use std::fmt;
use std::marker::PhantomData;

/// PID 控制器
///
/// - `T`: 设定值 / 误差类型（反馈函数的返回类型）
/// - `O`: 生成器输出类型（与被控执行器一致）
/// - `F`: 反馈函数
/// - `S`: 收敛判定
/// - `C`: 时钟
pub struct PidController<T, O, F, S, C = MonotonicClock>
where
    C: Clock,
{
    /// 增益（构造后固定）
    gains: Gains,

    /// 当前设定值
    setpoint: T,

    /// 累积误差（积分项）
    error_accumulator: T,

    /// 上一次误差（微分项）
    last_error: T,

    /// 上一次迭代的时刻
    last_iteration: C::Instant,

    feedback: F,
    settled: S,
    clock: C,
    _output: PhantomData<fn() -> O>,
}

impl<T, O, F, S> PidController<T, O, F, S, MonotonicClock>
where
    T: ControlTarget,
    O: ControlOutput,
    F: FeedbackFn<T>,
    S: SettledFn<T>,
{
    /// 创建 PID 控制器（系统单调时钟，设定值为零）
    ///
    /// # 示例
    ///
    /// ```rust
    /// use hotel_control::{GainRatio, Gains, PidController, infallible};
    ///
    /// let mut controller: PidController<f64, i32, _, _> = PidController::new(
    ///     Gains::p(GainRatio::ONE),
    ///     infallible(|| 0.0_f64),
    ///     |error: f64| error.abs() < 0.5,
    /// )
    /// .with_setpoint(0.0);
    ///
    /// // 误差为零，立即收敛，不产出任何值
    /// assert_eq!(controller.run().count(), 0);
    /// ```
    pub fn new(gains: Gains, feedback: F, settled: S) -> Self {
        Self::with_clock(gains, feedback, settled, MonotonicClock)
    }
}

impl<T, O, F, S, C> PidController<T, O, F, S, C>
where
    T: ControlTarget,
    O: ControlOutput,
    F: FeedbackFn<T>,
    S: SettledFn<T>,
    C: Clock,
{
    /// 使用指定时钟创建 PID 控制器（设定值为零）
    pub fn with_clock(gains: Gains, feedback: F, settled: S, clock: C) -> Self {
        let last_iteration = clock.now();
        PidController {
            gains,
            setpoint: T::ZERO,
            error_accumulator: T::ZERO,
            last_error: T::ZERO,
            last_iteration,
            feedback,
            settled,
            clock,
            _output: PhantomData,
        }
    }

    /// 设置初始设定值
    pub fn with_setpoint(mut self, setpoint: T) -> Self {
        self.setpoint = setpoint;
        self
    }

    /// 以生成器形式运行控制律
    ///
    /// 每次拉取执行一次迭代，直到收敛判定为真时结束。生成器可变借用控制器，
    /// 多次调用 `run()` 共享同一份控制状态，但同一时刻只能有一个生成器。
    ///
    /// # 示例
    ///
    /// ```rust,no_run
    /// # use hotel_control::{GainRatio, Gains, MotorPositionController, infallible};
    /// # fn motor_move(_: i32) {}
    /// # let mut controller = MotorPositionController::new(
    /// #     Gains::p(GainRatio::ONE), infallible(|| 0.0_f64), |e: f64| e.abs() < 5.0,
    /// # );
    /// for output in controller.run() {
    ///     motor_move(output?.clamp(-127, 127));
    ///     std::thread::sleep(std::time::Duration::from_millis(20));
    /// }
    /// # Ok::<(), hotel_control::ControlError>(())
    /// ```
    pub fn run(&mut self) -> Generator<PidRun<'_, T, O, F, S, C>> {
        Generator::new(PidRun { controller: self })
    }

    /// 设置新的设定值，并清空积分/微分历史
    ///
    /// 返回控制器本身，便于直接链式调用 `run()`：
    ///
    /// ```rust,no_run
    /// # use hotel_control::{GainRatio, Gains, MotorPositionController, infallible};
    /// # fn motor_move(_: i32) {}
    /// # let mut controller = MotorPositionController::new(
    /// #     Gains::p(GainRatio::ONE), infallible(|| 0.0_f64), |e: f64| e.abs() < 5.0,
    /// # );
    /// for output in controller.target(300.0).run() {
    ///     motor_move(output?.clamp(-127, 127));
    /// }
    /// # Ok::<(), hotel_control::ControlError>(())
    /// ```
    pub fn target(&mut self, setpoint: T) -> &mut Self {
        self.setpoint = setpoint;
        self.error_accumulator = T::ZERO;
        self.last_error = T::ZERO;
        self.last_iteration = self.clock.now();

        tracing::debug!(setpoint = ?setpoint, "PID controller retargeted");
        self
    }

    /// 当前设定值
    pub fn setpoint(&self) -> T {
        self.setpoint
    }

    /// 增益
    pub fn gains(&self) -> Gains {
        self.gains
    }

    /// 当前累积误差
    ///
    /// 用于调试和监控。
    pub fn accumulated_error(&self) -> T {
        self.error_accumulator
    }

    /// 上一次误差
    pub fn last_error(&self) -> T {
        self.last_error
    }

    /// 执行一次迭代
    ///
    /// `Ok(None)` 表示已收敛。
    fn iterate(&mut self) -> Result<Option<O>, ControlError> {
        // 1. 误差
        let measured = self.feedback.sample().map_err(ControlError::Feedback)?;
        let error = T::error(self.setpoint, measured);

        // 2. 收敛判定（在累加之前）
        if self.settled.is_settled(error).map_err(ControlError::Settled)? {
            tracing::debug!(error = ?error, "PID controller settled");
            return Ok(None);
        }

        // 3. dT
        let now = self.clock.now();
        let elapsed = self.clock.elapsed(self.last_iteration, now);
        let dt_ms = elapsed.as_millis();
        if dt_ms == 0 {
            tracing::warn!(
                "PID controller received zero dt: {:?}, ending control episode",
                elapsed
            );
            return Err(ControlError::ZeroInterval { elapsed });
        }
        let dt = dt_ms as f64;

        // 4. 积分 + 输出
        self.error_accumulator = self.error_accumulator.accumulate(error);

        let e = error.to_f64();
        let p_term = self.gains.kp * e;
        let i_term = self.gains.ki * self.error_accumulator.to_f64() * dt;
        let d_term = self.gains.kd * ((self.last_error.to_f64() - e) / dt);
        let value = p_term + i_term + d_term;

        self.last_iteration = now;
        self.last_error = error;

        tracing::trace!(error = ?error, dt_ms = ?dt_ms, output = value, "PID iteration");
        Ok(Some(O::from_control(value)))
    }
}

impl<T, O, F, S, C> fmt::Debug for PidController<T, O, F, S, C>
where
    T: fmt::Debug,
    C: Clock,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PidController")
            .field("gains", &self.gains)
            .field("setpoint", &self.setpoint)
            .field("error_accumulator", &self.error_accumulator)
            .field("last_error", &self.last_error)
            .field("last_iteration", &self.last_iteration)
            .finish_non_exhaustive()
    }
}

/// `PidController::run()` 的生成器体
///
/// 跨挂起点保存的状态全部在控制器字段中，这里只持有对控制器的独占借用；
/// drop 即取消，不会再调用反馈函数。
pub struct PidRun<'a, T, O, F, S, C>
where
    C: Clock,
{
    controller: &'a mut PidController<T, O, F, S, C>,
}

impl<T, O, F, S, C> Producer for PidRun<'_, T, O, F, S, C>
where
    T: ControlTarget,
    O: ControlOutput,
    F: FeedbackFn<T>,
    S: SettledFn<T>,
    C: Clock,
{
    type Item = O;
    type Error = ControlError;

    fn resume(&mut self) -> Step<O, ControlError> {
        self.controller.iterate().into()
    }
}

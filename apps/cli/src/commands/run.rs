//! 运行命令
//!
//! 以 `MotorPositionController` 驱动模拟执行器，直到收敛、达到迭代上限、
//! 超时或 Ctrl+C。
//!
//! Ctrl+C 在每次拉取前检查：停止后不再采样反馈，也不再执行控制迭代。

use crate::commands::config::load_config;
use crate::simulation::SimulatedActuator;
use anyhow::{Context, Result};
use clap::Args;
use hotel_sdk::prelude::*;
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 运行命令参数（覆盖配置文件）
#[derive(Args, Debug)]
pub struct RunCommand {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 设定值
    #[arg(long, allow_negative_numbers = true)]
    pub setpoint: Option<f64>,

    /// 控制周期（毫秒）
    #[arg(long)]
    pub period_ms: Option<u64>,

    /// 最大迭代次数
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// 超时（毫秒）
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// 收敛阈值
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// 使用 spin_sleep 低抖动延时
    #[arg(long)]
    pub spin: bool,

    /// 模拟执行器的初始位置
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub start: f64,

    /// 模拟执行器的响应系数（每个命令单位的位移）
    #[arg(long, default_value_t = 1.0)]
    pub response: f64,
}

impl RunCommand {
    /// 合并配置文件与命令行参数
    pub fn effective_config(&self) -> Result<HotelConfig> {
        let mut config = load_config(self.config.as_deref())?;

        if let Some(setpoint) = self.setpoint {
            config.controller.setpoint = setpoint;
        }
        if let Some(tolerance) = self.tolerance {
            config.controller.tolerance = tolerance;
        }
        if let Some(period_ms) = self.period_ms {
            config.pacing.period_ms = period_ms;
        }
        if self.max_iterations.is_some() {
            config.pacing.max_iterations = self.max_iterations;
        }
        if self.timeout_ms.is_some() {
            config.pacing.timeout_ms = self.timeout_ms;
        }
        if self.spin {
            config.pacing.spin = true;
        }

        Ok(config)
    }

    pub fn execute(&self) -> Result<()> {
        let config = self.effective_config()?;
        let gains = config.gains.to_gains().context("Invalid gains")?;
        let loop_config = config.pacing.to_loop_config();
        let tolerance = config.controller.tolerance;

        // Ctrl+C：下一次拉取前结束循环并 drop 生成器
        let running = Arc::new(AtomicBool::new(true));
        let r = running.clone();
        ctrlc::set_handler(move || {
            r.store(false, Ordering::SeqCst);
        })
        .context("Failed to install Ctrl+C handler")?;

        let actuator = SimulatedActuator::new(self.start, self.response);
        let mut controller = MotorPositionController::new(
            gains,
            infallible(actuator.encoder()),
            move |error: f64| error.abs() < tolerance,
        )
        .with_setpoint(config.controller.setpoint);

        println!(
            "▶️  setpoint={} start={} period={:?}",
            config.controller.setpoint,
            actuator.position(),
            loop_config.period
        );

        let mut sample = 0;
        let outcome = drive_until(
            controller.run(),
            |command: i32| -> Result<(), Infallible> {
                let applied = actuator.apply(command);
                sample += 1;
                println!(
                    "{:>5}  command={:>5}  applied={:>4}  position={:.2}",
                    sample,
                    command,
                    applied,
                    actuator.position()
                );
                Ok(())
            },
            &loop_config,
            || !running.load(Ordering::SeqCst),
        )
        .context("Control loop failed")?;

        println!(
            "{} {}",
            outcome_marker(outcome.reason),
            summarize(&outcome, actuator.position())
        );
        Ok(())
    }
}

/// 结束原因的状态标记
fn outcome_marker(reason: StopReason) -> &'static str {
    match reason {
        StopReason::Settled => "✅",
        StopReason::IterationLimit | StopReason::Timeout => "⚠️",
        StopReason::Stopped => "🛑",
    }
}

fn summarize(outcome: &LoopOutcome, position: f64) -> String {
    format!(
        "{:?} after {} iterations ({:?}), position={:.2}",
        outcome.reason, outcome.iterations, outcome.elapsed, position
    )
}

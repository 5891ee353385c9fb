//! # Hotel CLI
//!
//! 用生成器驱动的 PID 控制器控制一个模拟的一阶执行器。
//!
//! ## 使用
//!
//! ```bash
//! # 生成默认配置
//! hotel-cli config init hotel.toml
//!
//! # 运行控制循环（命令行参数覆盖配置文件）
//! hotel-cli run --config hotel.toml --setpoint 200 --period-ms 20
//!
//! # 查看生效的配置
//! hotel-cli config show --config hotel.toml
//!
//! # 调试日志
//! RUST_LOG=hotel=debug hotel-cli run --setpoint 50
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod simulation;

use commands::{ConfigCommand, RunCommand};

/// Hotel CLI - PID 控制命令行工具
#[derive(Parser, Debug)]
#[command(name = "hotel-cli")]
#[command(about = "Drive a PID controller against a simulated actuator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),

    /// 运行控制循环
    Run {
        #[command(flatten)]
        args: RunCommand,
    },
}

fn main() -> Result<()> {
    // 初始化日志（RUST_LOG 优先，默认 hotel=info）
    hotel_sdk::init_logging()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Config(cmd) => cmd.execute(),
        Commands::Run { args } => args.execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_run_overrides() {
        let cli = Cli::try_parse_from([
            "hotel-cli",
            "run",
            "--config",
            "motor.toml",
            "--setpoint",
            "150",
            "--period-ms",
            "10",
            "--max-iterations",
            "50",
            "--spin",
        ])
        .unwrap();

        match cli.command {
            Commands::Run { args } => {
                assert_eq!(args.config, Some(PathBuf::from("motor.toml")));
                assert_eq!(args.setpoint, Some(150.0));
                assert_eq!(args.period_ms, Some(10));
                assert_eq!(args.max_iterations, Some(50));
                assert_eq!(args.timeout_ms, None);
                assert!(args.spin);
            },
            other => panic!("Expected run command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_init_default_path() {
        let cli = Cli::try_parse_from(["hotel-cli", "config", "init"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommand::Init { path, force }) => {
                assert_eq!(path, PathBuf::from(commands::config::DEFAULT_CONFIG_FILE));
                assert!(!force);
            },
            other => panic!("Expected config init, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_setpoint_is_accepted() {
        let cli =
            Cli::try_parse_from(["hotel-cli", "run", "--setpoint", "-40.5"]).unwrap();
        let Commands::Run { args } = cli.command else {
            panic!("Expected run command");
        };
        assert_eq!(args.setpoint, Some(-40.5));
    }
}

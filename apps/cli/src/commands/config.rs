//! 配置管理命令
//!
//! 查看生效的控制器配置，或生成默认配置文件

use anyhow::{Context, Result};
use clap::Subcommand;
use hotel_sdk::HotelConfig;
use std::path::{Path, PathBuf};

/// 默认配置文件（当前目录）
pub const DEFAULT_CONFIG_FILE: &str = "hotel.toml";

/// 加载配置
///
/// 优先使用指定路径；未指定时尝试当前目录下的 `hotel.toml`，
/// 都不存在则使用默认配置。
pub fn load_config(path: Option<&Path>) -> Result<HotelConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.exists() {
                tracing::debug!("No config file found, using defaults");
                return Ok(HotelConfig::default());
            }
            fallback
        },
    };

    HotelConfig::load_from_file(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 打印生效的配置
    Show {
        /// 配置文件路径
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// 写入默认配置文件
    Init {
        /// 目标路径
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// 覆盖已存在的文件
        #[arg(short, long)]
        force: bool,
    },
}

impl ConfigCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            ConfigCommand::Show { config } => Self::show_(config.as_deref()),
            ConfigCommand::Init { path, force } => Self::init_(&path, force),
        }
    }

    fn show_(path: Option<&Path>) -> Result<()> {
        let config = load_config(path)?;
        let gains = config.gains.to_gains()?;

        print!("{}", config.to_toml_string()?);
        println!();
        println!("# 生效增益: kp={} ki={} kd={}", gains.kp, gains.ki, gains.kd);
        Ok(())
    }

    fn init_(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }

        HotelConfig::default()
            .save_to_file(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        println!("✅ 已写入默认配置: {}", path.display());
        Ok(())
    }
}

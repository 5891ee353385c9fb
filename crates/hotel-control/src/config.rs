//! # 控制器配置
//!
//! 从 TOML 加载增益、设定值和控制循环参数。增益既可以写成实数，
//! 也可以写成精确的有理数：
//!
//! ```toml
//! [gains]
//! kp = { num = 1, den = 2 }
//! ki = 0.0
//! kd = { num = 1, den = 100 }
//!
//! [controller]
//! setpoint = 200.0
//! tolerance = 5.0
//!
//! [loop]
//! period_ms = 20
//! max_iterations = 500
//! timeout_ms = 10000
//! spin = false
//! ```

use crate::error::ControlError;
use crate::gains::{GainRatio, Gains};
use crate::loop_runner::LoopConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML 解析失败
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML 序列化失败
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// 文件读写失败
    #[error("Config IO error: {0}")]
    Io(#[from] io::Error),

    /// 增益无效
    #[error("Invalid gains: {0}")]
    Gain(#[from] ControlError),
}

/// 单个增益：实数或有理数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GainSpec {
    /// `{ num = 1, den = 2 }`
    Ratio { num: i64, den: i64 },
    /// `0.5`
    Value(f64),
}

impl GainSpec {
    /// 换算为实数增益
    pub fn resolve(&self) -> Result<f64, ControlError> {
        match *self {
            GainSpec::Ratio { num, den } => Ok(GainRatio::new(num, den)?.value()),
            GainSpec::Value(value) => Ok(value),
        }
    }
}

impl Default for GainSpec {
    fn default() -> Self {
        GainSpec::Value(0.0)
    }
}

impl From<f64> for GainSpec {
    fn from(value: f64) -> Self {
        GainSpec::Value(value)
    }
}

impl From<GainRatio> for GainSpec {
    fn from(ratio: GainRatio) -> Self {
        GainSpec::Ratio {
            num: ratio.num(),
            den: ratio.den(),
        }
    }
}

/// `[gains]` 段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GainsConfig {
    pub kp: GainSpec,
    #[serde(default)]
    pub ki: GainSpec,
    #[serde(default)]
    pub kd: GainSpec,
}

impl GainsConfig {
    /// 换算为 `Gains`（增益在此处固定）
    pub fn to_gains(&self) -> Result<Gains, ControlError> {
        Gains::new(self.kp.resolve()?, self.ki.resolve()?, self.kd.resolve()?)
    }
}

/// `[controller]` 段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerSection {
    /// 初始设定值
    #[serde(default)]
    pub setpoint: f64,

    /// 收敛阈值（|误差| < tolerance 视为收敛）
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_tolerance() -> f64 {
    1.0
}

impl Default for ControllerSection {
    fn default() -> Self {
        ControllerSection {
            setpoint: 0.0,
            tolerance: default_tolerance(),
        }
    }
}

/// `[loop]` 段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopSection {
    /// 拉取间隔（毫秒）
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,

    /// 最大迭代次数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,

    /// 超时（毫秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// 使用 spin_sleep 低抖动延时
    #[serde(default)]
    pub spin: bool,
}

fn default_period_ms() -> u64 {
    20
}

impl Default for LoopSection {
    fn default() -> Self {
        LoopSection {
            period_ms: default_period_ms(),
            max_iterations: None,
            timeout_ms: None,
            spin: false,
        }
    }
}

impl LoopSection {
    pub fn to_loop_config(&self) -> LoopConfig {
        LoopConfig {
            period: Duration::from_millis(self.period_ms),
            max_iterations: self.max_iterations,
            timeout: self.timeout_ms.map(Duration::from_millis),
            spin: self.spin,
        }
    }
}

/// 完整配置文件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelConfig {
    pub gains: GainsConfig,

    #[serde(default)]
    pub controller: ControllerSection,

    #[serde(default, rename = "loop")]
    pub pacing: LoopSection,
}

impl Default for HotelConfig {
    fn default() -> Self {
        HotelConfig {
            gains: GainsConfig {
                kp: GainSpec::Value(1.0),
                ki: GainSpec::Value(0.0),
                kd: GainSpec::Value(0.01),
            },
            controller: ControllerSection::default(),
            pacing: LoopSection::default(),
        }
    }
}

impl HotelConfig {
    /// 从 TOML 字符串解析（同时校验增益）
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: HotelConfig = toml::from_str(content)?;
        config.gains.to_gains()?;
        Ok(config)
    }

    /// 从文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded controller config from {}", path.display());
        Ok(config)
    }

    /// 序列化为 TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// 保存到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

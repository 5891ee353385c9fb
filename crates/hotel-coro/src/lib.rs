//! # Hotel Coro - 拉取式生成器原语
//!
//! 把控制循环写成"计算 → 产出 → 重复"的直线代码，同时由调用方决定何时
//! 取下一个值（以及两次之间的节拍）。
//!
//! ## 包含模块
//!
//! - `step` - `Step` 标签结果和 `Producer` trait（显式状态机）
//! - `generator` - `Generator` 本体（挂起状态的唯一所有者）
//! - `error` - `GeneratorError`（生产者故障 + 误用故障）
//!
//! ## 使用示例
//!
//! ```rust
//! use hotel_coro::{Generator, Producer, Step};
//! use std::convert::Infallible;
//!
//! // python 风格的 range(start, end, step)
//! fn range(start: i32, end: i32, step: i32) -> Generator<impl Producer<Item = i32, Error = Infallible>> {
//!     let mut current = start;
//!     Generator::from_fn(move || -> Step<i32, Infallible> {
//!         if (step > 0 && current >= end) || (step < 0 && current <= end) {
//!             return Step::Completed;
//!         }
//!         let value = current;
//!         current += step;
//!         Step::Yielded(value)
//!     })
//! }
//!
//! let values: Vec<i32> = range(0, 10, 3).map(|v| v.unwrap()).collect();
//! assert_eq!(values, vec![0, 3, 6, 9]);
//! ```

pub mod error;
pub mod generator;
pub mod step;

// 重新导出常用类型
pub use error::GeneratorError;
pub use generator::Generator;
pub use step::{FromFn, Producer, Step, from_fn};

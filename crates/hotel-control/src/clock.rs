//! # 时钟协作者
//!
//! 控制器只需要"现在"以及两个时刻之间的时长。
//!
//! | 时钟 | 来源 | 用途 |
//! |------|------|------|
//! | `MonotonicClock` | `std::time::Instant` | 实际运行 |
//! | `ManualClock` | 调用方推进 | 测试、仿真（确定性 dT） |

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// 单调时钟
pub trait Clock {
    /// 不透明的时刻类型
    type Instant: Copy + fmt::Debug;

    /// 当前时刻
    fn now(&self) -> Self::Instant;

    /// `later - earlier`（时钟回退时为零）
    fn elapsed(&self, earlier: Self::Instant, later: Self::Instant) -> Duration;
}

/// 系统单调时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, earlier: Instant, later: Instant) -> Duration {
        later.saturating_duration_since(earlier)
    }
}

/// 手动推进的时钟
///
/// 克隆出的句柄共享同一个时间，因此可以把一个句柄交给控制器，
/// 用另一个句柄在两次拉取之间推进时间。只用于单线程。
///
/// ```rust
/// use hotel_control::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// let start = clock.now();
///
/// handle.advance(Duration::from_millis(20));
/// assert_eq!(clock.elapsed(start, clock.now()), Duration::from_millis(20));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// 创建时钟（从零开始）
    pub fn new() -> Self {
        Self::default()
    }

    /// 向前推进时间
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// 直接设置当前时间
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    /// 自创建以来的时间
    pub fn current(&self) -> Duration {
        self.now.get()
    }
}

impl Clock for ManualClock {
    type Instant = Duration;

    fn now(&self) -> Duration {
        self.now.get()
    }

    fn elapsed(&self, earlier: Duration, later: Duration) -> Duration {
        later.saturating_sub(earlier)
    }
}

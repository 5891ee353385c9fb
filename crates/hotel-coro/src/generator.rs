//! Generator - 单消费者、拉取式的惰性序列
//!
//! # 生命周期
//!
//! ```text
//!   new() ──► Start ──advance──► Running ◄──advance──┐
//!                │                  │ └──────────────┘
//!                └──────────────────┴──(Completed / Faulted)──► Done
//!
//!   detach() 之后原实例为 Empty；drop 在任何状态下都只是销毁保存的状态
//! ```
//!
//! - **惰性**: 构造时生产者停在第一条语句之前，没有任何副作用
//! - **故障只上报一次**: 生产者的故障在进入 `Done` 的那次拉取中返回
//! - **误用快速失败**: 对 `Done` / `Empty` 继续拉取返回明确的错误
//! - **取消即 drop**: 挂起中被 drop 不会再执行生产者的任何代码
//!
//! # 线程安全
//!
//! 所有推进操作都需要 `&mut self`，编译期保证同一时刻只有一个消费者。

use crate::error::GeneratorError;
use crate::step::{FromFn, Producer, Step};
use std::fmt;
use std::mem;

/// 生成器内部执行状态
enum State<P> {
    /// 已构造，生产者尚未运行
    Start(P),
    /// 停在某个 yield 之后
    Running(P),
    /// 已完成（正常结束或故障），生产者已被销毁
    Done,
    /// 状态已被 `detach()` 移走
    Empty,
}

impl<P> State<P> {
    fn name(&self) -> &'static str {
        match self {
            State::Start(_) => "Start",
            State::Running(_) => "Running",
            State::Done => "Done",
            State::Empty => "Empty",
        }
    }
}

/// 拉取式生成器
///
/// 生成器独占其生产者（挂起的执行状态），不可复制，只能移动。
///
/// # 示例
///
/// ```rust
/// use hotel_coro::{Generator, Step};
///
/// let mut countdown = 3;
/// let mut generator = Generator::from_fn(move || -> Step<u32, std::io::Error> {
///     if countdown == 0 {
///         return Step::Completed;
///     }
///     countdown -= 1;
///     Step::Yielded(countdown)
/// });
///
/// while generator.advance()? {
///     println!("t-{}", generator.current()?);
/// }
/// assert!(generator.is_finished());
/// # Ok::<(), hotel_coro::GeneratorError<std::io::Error>>(())
/// ```
pub struct Generator<P: Producer> {
    state: State<P>,
    current: Option<P::Item>,
}

impl<P: Producer> Generator<P> {
    /// 用生产者构造生成器（生产者不会被立即恢复）
    pub fn new(producer: P) -> Self {
        Generator {
            state: State::Start(producer),
            current: None,
        }
    }

    /// 恢复生产者一次，返回其原始结果
    ///
    /// 产出值直接移交给调用方，不写入 `current()` 槽位；
    /// 之前 `advance()` 留下的值随之失效。
    ///
    /// # 返回
    ///
    /// - `Ok(Step::Yielded(v))`: 产出一个值
    /// - `Ok(Step::Completed)`: 正常结束（进入 `Done`）
    /// - `Ok(Step::Faulted(e))`: 生产者故障（进入 `Done`，只会出现一次）
    /// - `Err(Exhausted)` / `Err(Empty)`: 误用
    pub fn pull(&mut self) -> Result<Step<P::Item, P::Error>, GeneratorError<P::Error>> {
        self.current = None;

        let step = match &mut self.state {
            State::Start(producer) | State::Running(producer) => producer.resume(),
            State::Done => return Err(GeneratorError::Exhausted),
            State::Empty => return Err(GeneratorError::Empty),
        };

        self.state = match (mem::replace(&mut self.state, State::Empty), &step) {
            (State::Start(producer), Step::Yielded(_)) => {
                tracing::trace!("generator started");
                State::Running(producer)
            },
            (running @ State::Running(_), Step::Yielded(_)) => running,
            (_, Step::Faulted(_)) => {
                tracing::debug!("generator producer faulted, sequence ended");
                State::Done
            },
            (_, _) => {
                tracing::trace!("generator completed");
                State::Done
            },
        };

        Ok(step)
    }

    /// 推进生成器
    ///
    /// # 返回
    ///
    /// - `Ok(true)`: 产出了新值，可通过 `current()` 读取
    /// - `Ok(false)`: 序列正常结束
    /// - `Err(Faulted(e))`: 生产者故障，序列随之结束
    /// - `Err(Exhausted)` / `Err(Empty)`: 误用
    pub fn advance(&mut self) -> Result<bool, GeneratorError<P::Error>> {
        match self.pull()? {
            Step::Yielded(value) => {
                self.current = Some(value);
                Ok(true)
            },
            Step::Completed => Ok(false),
            Step::Faulted(e) => Err(GeneratorError::Faulted(e)),
        }
    }

    /// 读取最近一次 `advance()` 产出的值
    ///
    /// 只在成功的 `advance()` 与下一次 `advance()` 之间有效。
    pub fn current(&self) -> Result<&P::Item, GeneratorError<P::Error>> {
        self.current.as_ref().ok_or(GeneratorError::NoValue)
    }

    /// 结束哨兵：执行状态已完成（或实例为空）时为 `true`
    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Done | State::Empty)
    }

    /// 生产者是否已被恢复过
    pub fn is_started(&self) -> bool {
        !matches!(self.state, State::Start(_))
    }

    /// 状态是否已被移走
    pub fn is_empty(&self) -> bool {
        matches!(self.state, State::Empty)
    }

    /// 移走执行状态，原实例变为空
    ///
    /// 等价于 `std::mem::take(&mut generator)`。
    pub fn detach(&mut self) -> Self {
        mem::take(self)
    }
}

impl<T, E, F> Generator<FromFn<F>>
where
    F: FnMut() -> Step<T, E>,
{
    /// 用闭包作为生成器体构造生成器
    pub fn from_fn(body: F) -> Self {
        Generator::new(crate::step::from_fn(body))
    }
}

impl<P: Producer> Default for Generator<P> {
    /// 空生成器（等价于被移走状态后的实例）
    fn default() -> Self {
        Generator {
            state: State::Empty,
            current: None,
        }
    }
}

/// 迭代协议
///
/// - `Some(Ok(v))`: 每个产出值
/// - `Some(Err(e))`: 生产者故障（只出现一次）
/// - `None`: 已结束（之后一直返回 `None`）
impl<P: Producer> Iterator for Generator<P> {
    type Item = Result<P::Item, P::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.pull() {
            Ok(Step::Yielded(value)) => Some(Ok(value)),
            Ok(Step::Faulted(e)) => Some(Err(e)),
            Ok(Step::Completed) | Err(_) => None,
        }
    }
}

impl<P: Producer> std::iter::FusedIterator for Generator<P> {}

impl<P: Producer> Drop for Generator<P> {
    fn drop(&mut self) {
        if let State::Running(_) = self.state {
            tracing::trace!("generator dropped while suspended, cancelling producer");
        }
    }
}

impl<P: Producer> fmt::Debug for Generator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("state", &self.state.name())
            .field("has_value", &self.current.is_some())
            .finish()
    }
}

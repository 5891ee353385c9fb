//! Step / Producer - 生成器的显式状态机接口
//!
//! 生成器体不依赖编译器生成的协程状态，而是一个实现了 [`Producer`] 的普通结构体：
//! 需要跨挂起点保存的局部变量就是结构体字段，每次 `resume()` 从上一个挂起点
//! 继续执行，直到产出一个值、正常结束或失败。

/// 一次恢复执行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T, E> {
    /// 产出一个值并挂起
    Yielded(T),
    /// 正常结束（不再产出任何值）
    Completed,
    /// 生产者失败（同样意味着结束）
    Faulted(E),
}

impl<T, E> Step<T, E> {
    /// 是否为终止状态（`Completed` 或 `Faulted`）
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Step::Yielded(_))
    }

    /// 对产出值做映射
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Step<U, E> {
        match self {
            Step::Yielded(v) => Step::Yielded(f(v)),
            Step::Completed => Step::Completed,
            Step::Faulted(e) => Step::Faulted(e),
        }
    }

    /// 转换为 `Result<Option<T>, E>`（`None` 表示正常结束）
    pub fn into_result(self) -> Result<Option<T>, E> {
        match self {
            Step::Yielded(v) => Ok(Some(v)),
            Step::Completed => Ok(None),
            Step::Faulted(e) => Err(e),
        }
    }
}

/// `Ok(None)` 视为正常结束，便于生成器体内部使用 `?`
impl<T, E> From<Result<Option<T>, E>> for Step<T, E> {
    fn from(result: Result<Option<T>, E>) -> Self {
        match result {
            Ok(Some(v)) => Step::Yielded(v),
            Ok(None) => Step::Completed,
            Err(e) => Step::Faulted(e),
        }
    }
}

/// 可挂起的生产者
///
/// # 约定
///
/// - `resume()` 只会在上一次返回 `Yielded` 之后（或首次）被调用
/// - 返回 `Completed` / `Faulted` 后，生产者不会再被恢复，随即被 drop
/// - drop 即取消：实现者不得依赖"一定会运行到结束"
pub trait Producer {
    /// 产出值类型
    type Item;

    /// 故障类型
    type Error;

    /// 从上一个挂起点继续执行，直到下一个挂起点
    fn resume(&mut self) -> Step<Self::Item, Self::Error>;
}

impl<P: Producer + ?Sized> Producer for Box<P> {
    type Item = P::Item;
    type Error = P::Error;

    fn resume(&mut self) -> Step<Self::Item, Self::Error> {
        (**self).resume()
    }
}

/// 由闭包构造的生产者，见 [`from_fn`]
pub struct FromFn<F> {
    body: F,
}

/// 用闭包作为生成器体
///
/// 闭包捕获的变量即为跨挂起点保存的局部状态。
pub fn from_fn<T, E, F>(body: F) -> FromFn<F>
where
    F: FnMut() -> Step<T, E>,
{
    FromFn { body }
}

impl<T, E, F> Producer for FromFn<F>
where
    F: FnMut() -> Step<T, E>,
{
    type Item = T;
    type Error = E;

    fn resume(&mut self) -> Step<T, E> {
        (self.body)()
    }
}

impl<F> std::fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_is_terminal() {
        assert!(!Step::<i32, ()>::Yielded(1).is_terminal());
        assert!(Step::<i32, ()>::Completed.is_terminal());
        assert!(Step::<i32, ()>::Faulted(()).is_terminal());
    }

    #[test]
    fn test_step_map_and_into_result() {
        let step: Step<i32, &str> = Step::Yielded(21);
        assert_eq!(step.map(|v| v * 2), Step::Yielded(42));

        assert_eq!(Step::<i32, &str>::Yielded(1).into_result(), Ok(Some(1)));
        assert_eq!(Step::<i32, &str>::Completed.into_result(), Ok(None));
        assert_eq!(Step::<i32, &str>::Faulted("bad").into_result(), Err("bad"));

        assert_eq!(Step::from(Ok::<_, &str>(Some(3))), Step::Yielded(3));
        assert_eq!(Step::<i32, &str>::from(Ok(None)), Step::Completed);
    }

    #[test]
    fn test_from_fn_keeps_locals_between_resumes() {
        let mut n = 0;
        let mut producer = from_fn(move || -> Step<i32, ()> {
            n += 1;
            if n > 2 { Step::Completed } else { Step::Yielded(n) }
        });

        assert_eq!(producer.resume(), Step::Yielded(1));
        assert_eq!(producer.resume(), Step::Yielded(2));
        assert_eq!(producer.resume(), Step::Completed);
    }
}

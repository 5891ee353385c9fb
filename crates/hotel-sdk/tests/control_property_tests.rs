//! PID 控制器与生成器的属性测试
//!
//! 使用 proptest 验证与增益、设定值无关的性质。

use hotel_sdk::prelude::*;
use hotel_sdk::coro::from_fn;
use proptest::prelude::*;
use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(10);

fn gain() -> impl Strategy<Value = f64> {
    -10.0..10.0f64
}

proptest! {
    /// 误差恒为零且零误差判定为收敛 → 不产出任何值
    #[test]
    fn zero_error_never_yields(
        kp in gain(),
        ki in gain(),
        kd in gain(),
        setpoint in -1000.0..1000.0f64,
    ) {
        let mut pid: PidController<f64, f64, _, _, _> = PidController::with_clock(
            Gains::new(kp, ki, kd).unwrap(),
            infallible(move || setpoint),
            |error: f64| error == 0.0,
            ManualClock::new(),
        )
        .with_setpoint(setpoint);

        let mut generator = pid.run();
        prop_assert!(!generator.advance().unwrap());
        prop_assert!(generator.is_finished());
    }

    /// 线性收敛的被控对象 → 有限且非空的输出序列
    #[test]
    fn linear_convergence_terminates(
        kp in 0.1..1.0f64,
        start in 1.0..1000.0f64,
        setpoint in -1000.0..1000.0f64,
    ) {
        prop_assume!((setpoint - start).abs() > 0.01);

        let clock = ManualClock::new();
        let position = Rc::new(Cell::new(start));
        let reading = position.clone();
        let ticker = clock.clone();
        let mut pid: PidController<f64, f64, _, _, _> = PidController::with_clock(
            Gains::new(kp, 0.0, 0.0).unwrap(),
            infallible(move || {
                ticker.advance(TICK);
                reading.get()
            }),
            |error: f64| error.abs() < 0.01,
            clock,
        )
        .with_setpoint(setpoint);

        let mut generator = pid.run();
        let mut outputs = 0;
        while outputs < 10_000 && generator.advance().unwrap() {
            position.set(position.get() + *generator.current().unwrap());
            outputs += 1;
        }

        prop_assert!(generator.is_finished());
        prop_assert!(outputs > 0);
        prop_assert!((position.get() - setpoint).abs() < 0.01);
    }

    /// target() 之后的第一个输出与全新控制器一致
    #[test]
    fn retarget_matches_fresh_controller(
        kp in gain(),
        ki in gain(),
        kd in gain(),
        first in -100.0..100.0f64,
        second in -100.0..100.0f64,
        measured in -100.0..100.0f64,
        warmup in 1usize..5,
    ) {
        let clock = ManualClock::new();
        let mut pid: PidController<f64, f64, _, _, _> = PidController::with_clock(
            Gains::new(kp, ki, kd).unwrap(),
            infallible(move || measured),
            |_: f64| false,
            clock.clone(),
        )
        .with_setpoint(first);

        {
            let mut generator = pid.run();
            for _ in 0..warmup {
                clock.advance(TICK);
                generator.next().unwrap().unwrap();
            }
        }

        pid.target(second);
        clock.advance(TICK);
        let retargeted = pid.run().next().unwrap().unwrap();

        let fresh_clock = ManualClock::new();
        let mut fresh: PidController<f64, f64, _, _, _> = PidController::with_clock(
            Gains::new(kp, ki, kd).unwrap(),
            infallible(move || measured),
            |_: f64| false,
            fresh_clock.clone(),
        )
        .with_setpoint(second);
        fresh_clock.advance(TICK);
        let expected = fresh.run().next().unwrap().unwrap();

        prop_assert_eq!(retargeted, expected);
    }

    /// 不推进时 current() 是幂等的
    #[test]
    fn current_is_idempotent(values in prop::collection::vec(any::<i64>(), 1..32)) {
        let mut items = values.clone().into_iter();
        let mut generator = Generator::from_fn(move || -> Step<i64, Infallible> {
            match items.next() {
                Some(value) => Step::Yielded(value),
                None => Step::Completed,
            }
        });

        for expected in &values {
            prop_assert!(generator.advance().unwrap());
            let a = *generator.current().unwrap();
            let b = *generator.current().unwrap();
            prop_assert_eq!(a, b);
            prop_assert_eq!(a, *expected);
        }
        prop_assert!(!generator.advance().unwrap());
    }

    /// drop 之后不再执行生成器体
    #[test]
    fn drop_stops_body(len in 1usize..64, pulled in 0usize..64) {
        let calls = Rc::new(Cell::new(0usize));
        let counter = calls.clone();
        let mut remaining = len;
        let producer = from_fn(move || -> Step<usize, Infallible> {
            counter.set(counter.get() + 1);
            if remaining == 0 {
                return Step::Completed;
            }
            remaining -= 1;
            Step::Yielded(remaining)
        });

        let mut generator = Generator::new(producer);
        let pulled = pulled.min(len);
        for _ in 0..pulled {
            generator.advance().unwrap();
        }
        drop(generator);

        prop_assert_eq!(calls.get(), pulled);
    }
}

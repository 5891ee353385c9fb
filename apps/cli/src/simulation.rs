//! 模拟执行器
//!
//! 一阶模型：每个命令单位在一个控制周期内移动 `response` 个位置单位。
//! 命令在施加前限幅到 ±[`COMMAND_LIMIT`]。

use std::cell::Cell;
use std::rc::Rc;

/// 电机命令限幅
pub const COMMAND_LIMIT: i32 = 127;

/// 模拟的一阶执行器
#[derive(Debug, Clone)]
pub struct SimulatedActuator {
    position: Rc<Cell<f64>>,
    response: f64,
}

impl SimulatedActuator {
    pub fn new(start: f64, response: f64) -> Self {
        SimulatedActuator {
            position: Rc::new(Cell::new(start)),
            response,
        }
    }

    /// 当前位置
    pub fn position(&self) -> f64 {
        self.position.get()
    }

    /// 编码器读数（反馈函数）
    ///
    /// 返回的闭包与执行器共享位置。
    pub fn encoder(&self) -> impl FnMut() -> f64 + use<> {
        let position = self.position.clone();
        move || position.get()
    }

    /// 施加命令，返回限幅后的实际命令
    pub fn apply(&self, command: i32) -> i32 {
        let clamped = command.clamp(-COMMAND_LIMIT, COMMAND_LIMIT);
        self.position.set(self.position.get() + clamped as f64 * self.response);
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_clamps_command() {
        let actuator = SimulatedActuator::new(0.0, 1.0);
        assert_eq!(actuator.apply(500), 127);
        assert_eq!(actuator.position(), 127.0);
        assert_eq!(actuator.apply(-1_000), -127);
        assert_eq!(actuator.position(), 0.0);
    }

    #[test]
    fn test_encoder_tracks_position() {
        let actuator = SimulatedActuator::new(10.0, 0.5);
        let mut encoder = actuator.encoder();
        assert_eq!(encoder(), 10.0);

        actuator.apply(4);
        assert_eq!(encoder(), 12.0);
    }
}

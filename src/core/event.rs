//! 事件模块
//!
//! 定义输入协作方交给模拟核心的离散事件：按键、鼠标按钮和退出请求。
//! 事件由外部平台层轮询产生，核心只消费，不负责窗口或设备本身。
//!
//! # 设计说明
//!
//! 使用枚举描述事件，而不是按事件种类拆分的 trait 对象；
//! 离散事件数量少且固定，模式匹配即可完成分发。

use std::fmt;

/// 事件类型枚举
///
/// 主要用于日志记录和调试。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// 窗口关闭事件
    ///
    /// 当用户点击关闭按钮时触发
    WindowClose,

    /// 鼠标按下事件
    MouseButtonDown,

    /// 鼠标释放事件
    MouseButtonUp,

    /// 键盘按下事件
    KeyDown,

    /// 键盘释放事件
    KeyUp,
}

impl EventType {
    /// 获取事件类型的名称
    pub fn name(&self) -> &'static str {
        match self {
            EventType::WindowClose => "WindowClose",
            EventType::MouseButtonDown => "MouseButtonDown",
            EventType::MouseButtonUp => "MouseButtonUp",
            EventType::KeyDown => "KeyDown",
            EventType::KeyUp => "KeyUp",
        }
    }
}

/// 鼠标按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// 左键
    Left,

    /// 右键
    Right,

    /// 中键（滚轮按下）
    Middle,

    /// 其他按钮
    Other(u16),
}

/// 键盘按键码
///
/// 只列出游戏实际绑定的按键，其余按键用 `Other` 表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// W 键，引擎加速
    W,

    /// A 键，逆时针旋转
    A,

    /// S 键，引擎减速
    S,

    /// D 键，顺时针旋转
    D,

    /// Q / E 键，沿 x 轴移动
    Q,
    E,

    /// R / F 键，沿 y 轴移动
    R,
    F,

    /// C 键，下降（z 轴）
    C,

    /// 空格键，上升（z 轴）
    Space,

    /// 左 Shift，向前推进
    LShift,

    /// 左 Ctrl，向后推进
    LCtrl,

    /// Enter 键（回车键），调试用复位
    Enter,

    /// Escape 键，退出
    Escape,

    /// 其他按键
    ///
    /// 参数为平台相关的虚拟键码
    Other(u32),
}

/// 输入事件
///
/// 外部平台层每帧产生的离散事件队列中的元素。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// 按键按下
    KeyDown(KeyCode),

    /// 按键释放
    KeyUp(KeyCode),

    /// 鼠标按钮按下
    MouseButtonDown(MouseButton),

    /// 鼠标按钮释放
    MouseButtonUp(MouseButton),

    /// 窗口关闭请求
    Quit,
}

impl InputEvent {
    /// 获取事件类型
    pub fn event_type(&self) -> EventType {
        match self {
            InputEvent::KeyDown(_) => EventType::KeyDown,
            InputEvent::KeyUp(_) => EventType::KeyUp,
            InputEvent::MouseButtonDown(_) => EventType::MouseButtonDown,
            InputEvent::MouseButtonUp(_) => EventType::MouseButtonUp,
            InputEvent::Quit => EventType::WindowClose,
        }
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEvent::KeyDown(key) | InputEvent::KeyUp(key) => {
                write!(f, "{}: {:?}", self.event_type().name(), key)
            }
            InputEvent::MouseButtonDown(button) | InputEvent::MouseButtonUp(button) => {
                write!(f, "{}: {:?}", self.event_type().name(), button)
            }
            InputEvent::Quit => write!(f, "{}", self.event_type().name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_types() {
        assert_eq!(InputEvent::KeyDown(KeyCode::W).event_type(), EventType::KeyDown);
        assert_eq!(InputEvent::Quit.event_type(), EventType::WindowClose);
        assert_eq!(EventType::MouseButtonDown.name(), "MouseButtonDown");
    }

    #[test]
    fn test_event_display() {
        assert_eq!(InputEvent::KeyDown(KeyCode::Escape).to_string(), "KeyDown: Escape");
        assert_eq!(
            InputEvent::MouseButtonDown(MouseButton::Left).to_string(),
            "MouseButtonDown: Left"
        );
        assert_eq!(InputEvent::Quit.to_string(), "WindowClose");
    }
}

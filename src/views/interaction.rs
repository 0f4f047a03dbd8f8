//! 与用户的阻塞式交互

/// 宿主环境提供的确认框和提示框
pub trait Interaction: Send + Sync {
    fn confirm(&self, question: &str) -> bool;

    fn alert(&self, message: &str);
}

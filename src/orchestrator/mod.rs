//! 编排层（Orchestration Layer）
//!
//! ```text
//! orchestrator::App (运行模式 / 导出 / 保存 / 统计)
//!     ↓
//! workflow::GenerationController (单个 / 全覆盖 / 合并覆盖)
//!     ↓
//! services (模板 / 合并 / 导出 / 行业上下文)
//!     ↓
//! clients + infrastructure (HTTP / 标识符生成)
//! ```

pub mod app;

pub use app::{App, RunReport};

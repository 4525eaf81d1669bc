//! # Golden Gen
//!
//! 为 LLM 评测生成 golden 对话数据集，并导出或保存到评测后端
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 可替换的标识符生成能力（随机 / 固定种子 / 递增）
//!
//! ### ② 客户端层（Clients）
//! - `DatasetClient` - `POST /datasets/save`，单个保存与批量保存（遇错即停）
//! - `SettingsClient` - `GET` / `POST /settings`
//!
//! ### ③ 业务能力层（Services）
//! - `template_engine` - 根据（领域, 难度, 结局）生成数据集 / golden 文档对
//! - `dataset_merger` - 合并多个数据集
//! - `ExportWriter` - 写出 `{dataset_id}.{dataset|golden}.json`
//! - `VerticalContext` - 当前行业与可选行业
//!
//! ### ④ 流程层（Workflow）
//! - `GenerationController` - 单个 / 全覆盖 / 合并覆盖三种生成模式
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator::App` - 按配置完成一次生成、导出与保存

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{DatasetClient, SaveReceipt, SettingsClient};
pub use config::{Config, RunMode};
pub use error::{AppError, AppResult, BatchSaveError};
pub use infrastructure::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use models::{DatasetDoc, DatasetPair, Difficulty, Domain, GoldenDoc, Outcome};
pub use orchestrator::{App, RunReport};
pub use services::{build_conversation, ExportWriter, VerticalContext};
pub use workflow::{GenerationController, GenerationResult};

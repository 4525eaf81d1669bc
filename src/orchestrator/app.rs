//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：日志文件、HTTP 客户端、生成控制器
//! 2. **行业同步**：按需读取 / 写回 `/settings`，失败只记录不中断
//! 3. **生成**：按运行模式调用生成控制器
//! 4. **发布**：导出 JSON 文件、保存到服务端
//! 5. **全局统计**：汇总本次运行的结果
//!
//! 单个动作失败只影响该动作本身，不会让整个程序退出。

use crate::clients::{DatasetClient, SettingsClient};
use crate::config::{Config, RunMode};
use crate::error::{AppError, ConfigError};
use crate::infrastructure::{IdGenerator, RandomIdGenerator};
use crate::models::{load_dataset_files, DatasetMetadata, DocumentKind, Difficulty};
use crate::services::dataset_merger::{merge_datasets, MergeTarget};
use crate::services::{ExportWriter, VerticalContext};
use crate::utils::logging;
use crate::workflow::{GenerationController, GenerationResult};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// 一次运行的汇总
#[derive(Debug, Default)]
pub struct RunReport {
    /// 生成（或合并）的文档对数量
    pub generated: usize,
    /// 写出的文件
    pub exported_files: Vec<PathBuf>,
    /// 成功保存到服务端的数量
    pub saved: usize,
    /// 保存失败时展示给用户的信息
    pub save_error: Option<String>,
}

/// 应用主结构
pub struct App {
    config: Config,
    controller: GenerationController,
    export_writer: ExportWriter,
    dataset_client: DatasetClient,
    settings_client: SettingsClient,
    vertical: VerticalContext,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file, &config.mode.to_string())
            .with_context(|| format!("无法写入日志文件: {}", config.output_log_file))?;

        logging::log_startup(
            &config.mode.to_string(),
            config.domain.as_str(),
            &config.api_base_url,
        );

        let ids: Box<dyn IdGenerator> = match config.id_seed {
            Some(seed) => Box::new(RandomIdGenerator::seeded(seed)),
            None => Box::new(RandomIdGenerator::new()),
        };

        Ok(Self {
            controller: GenerationController::with_id_generator(ids),
            export_writer: ExportWriter::new(&config.output_dir),
            dataset_client: DatasetClient::new(&config)?,
            settings_client: SettingsClient::new(&config)?,
            vertical: VerticalContext::new(),
            config,
        })
    }

    /// 替换标识符生成器
    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.controller = GenerationController::with_id_generator(ids);
        self
    }

    pub fn vertical(&self) -> &VerticalContext {
        &self.vertical
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self) -> Result<RunReport> {
        if self.config.sync_vertical {
            self.sync_vertical().await;
        }

        let report = match self.config.mode {
            RunMode::Merge => self.run_merge().await?,
            RunMode::Single | RunMode::Coverage | RunMode::Combined => {
                let result = self.generate();
                self.publish(&result).await?
            }
        };

        logging::print_final_stats(
            report.generated,
            report.exported_files.len(),
            report.saved,
            &self.config.output_log_file,
        );

        Ok(report)
    }

    /// 行业设置同步，失败只记录
    async fn sync_vertical(&mut self) {
        if self.vertical.load(&self.settings_client).await.is_ok() {
            info!("🏷️ 当前行业: {}", self.vertical.vertical());
        }

        if let Some(target) = self.config.industry_vertical.clone() {
            if self.vertical.supported().iter().all(|v| v != &target) {
                warn!("⚠️ 行业 {} 不在可选列表中: {:?}", target, self.vertical.supported());
            }
            if self
                .vertical
                .set_vertical(&self.settings_client, &target)
                .await
                .is_ok()
            {
                info!("🏷️ 行业已切换为: {}", target);
            }
        }
    }

    fn generate(&mut self) -> GenerationResult {
        let Config {
            mode,
            domain,
            difficulty,
            outcome,
            ..
        } = self.config;

        match mode {
            RunMode::Coverage => self.controller.generate_coverage(domain),
            RunMode::Combined => self.controller.generate_combined(domain),
            RunMode::Single | RunMode::Merge => {
                self.controller.generate_single(domain, difficulty, outcome)
            }
        }
        .clone()
    }

    /// 导出并保存生成结果
    async fn publish(&self, result: &GenerationResult) -> Result<RunReport> {
        let pairs = result.pairs();
        let mut report = RunReport {
            generated: pairs.len(),
            ..Default::default()
        };

        if self.config.export_files {
            report.exported_files = self
                .export_writer
                .export_all(&pairs)
                .await
                .context("导出文件失败")?;
            info!(
                "📁 已导出 {} 个文件到 {}",
                report.exported_files.len(),
                self.export_writer.output_dir().display()
            );
        }

        if self.config.save_to_server {
            self.save(result, &mut report).await;
        }

        Ok(report)
    }

    /// 保存到服务端，失败记录到报告里
    async fn save(&self, result: &GenerationResult, report: &mut RunReport) {
        let overwrite = self.config.overwrite;

        match result {
            GenerationResult::Coverage(pairs) => {
                match self.dataset_client.save_all(pairs.iter(), overwrite).await {
                    Ok(saved) => {
                        report.saved = saved;
                        self.log_line(&format!("Saved {} datasets to server", saved));
                    }
                    Err(e) => {
                        report.saved = e.saved;
                        error!(
                            "❌ 批量保存失败 ({}), 已保存 {} 个: {}",
                            e.dataset_id, e.saved, e
                        );
                        self.record_save_error(report, e.to_string());
                    }
                }
            }
            GenerationResult::Single(pair) | GenerationResult::Combined(pair) => {
                match self.dataset_client.save(pair, overwrite).await {
                    Ok(receipt) => {
                        report.saved = 1;
                        info!("✅ {}", receipt.message());
                        self.log_line(&receipt.message());
                    }
                    Err(e) => {
                        error!("❌ 保存失败 ({}): {}", pair.dataset_id(), e);
                        self.record_save_error(report, e.user_message());
                    }
                }
            }
        }
    }

    /// 合并磁盘上的数据集文件
    async fn run_merge(&self) -> Result<RunReport> {
        let source_dir = self
            .config
            .merge_source_dir
            .as_deref()
            .ok_or_else(|| {
                AppError::from(ConfigError::Missing {
                    key: "merge_source_dir".to_string(),
                })
            })?;

        info!("\n📁 正在扫描待合并的数据集: {}", source_dir);
        let docs = load_dataset_files(Path::new(source_dir), &self.config.merge_file_prefix).await?;

        if docs.is_empty() {
            warn!("⚠️ 没有找到可合并的数据集文件，程序结束");
            return Ok(RunReport::default());
        }

        let target = self.merge_target();
        let merged = merge_datasets(docs.iter(), &target);

        let path = self
            .export_writer
            .export_document(&merged, &merged.dataset_id, DocumentKind::Dataset)
            .await
            .context("写入合并数据集失败")?;

        let message = format!(
            "Created combined dataset with {} conversations",
            merged.conversations.len()
        );
        info!("✓ {} -> {}", message, path.display());
        self.log_line(&message);

        Ok(RunReport {
            generated: 1,
            exported_files: vec![path],
            ..Default::default()
        })
    }

    fn merge_target(&self) -> MergeTarget {
        let config = &self.config;
        let dataset_id = config.merge_dataset_id.clone().unwrap_or_else(|| {
            format!("coverage-{}-combined-{}", config.domain, config.merge_version)
        });

        MergeTarget {
            dataset_id,
            version: config.merge_version.clone(),
            metadata: DatasetMetadata {
                domain: config.domain,
                difficulty: Difficulty::Mixed,
                tags: config.merge_tags.clone(),
                task_type: config.merge_task_type.clone(),
                short_description: config.merge_description.clone(),
            },
        }
    }

    fn record_save_error(&self, report: &mut RunReport, message: String) {
        self.log_line(&format!("保存失败: {}", message));
        report.save_error = Some(message);
    }

    fn log_line(&self, line: &str) {
        if let Err(e) = logging::append_log_line(&self.config.output_log_file, line) {
            warn!("写入日志文件失败: {}", e);
        }
    }
}

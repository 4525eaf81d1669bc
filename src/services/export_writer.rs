//! 文档导出服务 - 业务能力层
//!
//! 只负责"把文档写成 JSON 文件"，不关心流程

use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult, FileError};
use crate::models::{DatasetPair, DocumentKind};

/// 导出服务
///
/// 文件名固定为 `{dataset_id}.{dataset|golden}.json`，内容为缩进格式的 JSON
pub struct ExportWriter {
    output_dir: PathBuf,
}

impl ExportWriter {
    /// 创建新的导出服务
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 导出单个文档
    ///
    /// # 参数
    /// - `document`: 待导出的文档
    /// - `dataset_id`: 文档所属的数据集 ID
    /// - `kind`: 文档类型
    ///
    /// # 返回
    /// 返回写入的文件路径
    pub async fn export_document<T: Serialize>(
        &self,
        document: &T,
        dataset_id: &str,
        kind: DocumentKind,
    ) -> AppResult<PathBuf> {
        let content = serde_json::to_string_pretty(document).map_err(|e| {
            AppError::File(FileError::SerializeFailed {
                path: kind.file_name(dataset_id),
                source: e,
            })
        })?;

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::file_write_failed(self.output_dir.display().to_string(), e))?;

        let path = self.output_dir.join(kind.file_name(dataset_id));
        fs::write(&path, content)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        debug!("已导出 {}: {}", kind, path.display());

        Ok(path)
    }

    /// 导出文档对（先校验）
    ///
    /// # 返回
    /// 返回 (dataset 路径, golden 路径)
    pub async fn export_pair(&self, pair: &DatasetPair) -> AppResult<(PathBuf, PathBuf)> {
        pair.validate().map_err(AppError::from)?;

        let dataset_path = self
            .export_document(&pair.dataset, &pair.dataset.dataset_id, DocumentKind::Dataset)
            .await?;
        let golden_path = self
            .export_document(&pair.golden, &pair.golden.dataset_id, DocumentKind::Golden)
            .await?;

        Ok((dataset_path, golden_path))
    }

    /// 批量导出
    pub async fn export_all(&self, pairs: &[&DatasetPair]) -> AppResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(pairs.len() * 2);
        for pair in pairs {
            let (dataset_path, golden_path) = self.export_pair(pair).await?;
            written.push(dataset_path);
            written.push(golden_path);
        }
        Ok(written)
    }
}

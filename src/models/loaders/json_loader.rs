use crate::error::{AppError, AppResult, FileError};
use crate::models::dataset::DatasetDoc;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 数据集文件的后缀
pub const DATASET_FILE_SUFFIX: &str = ".dataset.json";

/// 从 JSON 文件加载数据集文档
pub async fn load_dataset_file(path: &Path) -> AppResult<DatasetDoc> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let doc: DatasetDoc = serde_json::from_str(&content).map_err(|e| {
        AppError::File(FileError::JsonParseFailed {
            path: path.display().to_string(),
            source: e,
        })
    })?;

    Ok(doc)
}

/// 从文件夹中加载所有匹配前缀的数据集文件
///
/// 只处理 `*.dataset.json`，按文件名排序；单个文件加载失败时记录警告并跳过
pub async fn load_dataset_files(folder_path: &Path, prefix: &str) -> AppResult<Vec<DatasetDoc>> {
    if !folder_path.is_dir() {
        return Err(AppError::File(FileError::DirectoryNotFound {
            path: folder_path.display().to_string(),
        }));
    }

    let mut entries = fs::read_dir(folder_path)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path.display().to_string(), e))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path.display().to_string(), e))?
    {
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with(prefix) && n.ends_with(DATASET_FILE_SUFFIX))
            .unwrap_or(false);
        if matches {
            paths.push(path);
        }
    }
    paths.sort();

    let mut docs = Vec::with_capacity(paths.len());
    for path in paths {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_dataset_file(&path).await {
            Ok(doc) => {
                tracing::info!("成功加载 {} 个对话", doc.conversations.len());
                docs.push(doc);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(docs)
}

//! 数据集合并 - 业务能力层
//!
//! 把多份数据集（或数据集 / golden 文档对）的对话拼接到同一个文档里，
//! 顺序与输入一致。

use crate::models::{DatasetDoc, DatasetMetadata, DatasetPair, Difficulty, Domain, GoldenDoc};

/// 合并目标的文档头
#[derive(Debug, Clone)]
pub struct MergeTarget {
    pub dataset_id: String,
    pub version: String,
    pub metadata: DatasetMetadata,
}

impl MergeTarget {
    /// 全覆盖合并使用的文档头：`{domain}-combined-coverage`
    pub fn combined_coverage(domain: Domain, version: &str) -> Self {
        Self {
            dataset_id: format!("{}-combined-coverage", domain),
            version: version.to_string(),
            metadata: DatasetMetadata::new(domain, Difficulty::Mixed, &["coverage", "combined"]),
        }
    }
}

/// 合并数据集文档
pub fn merge_datasets<'a>(
    docs: impl IntoIterator<Item = &'a DatasetDoc>,
    target: &MergeTarget,
) -> DatasetDoc {
    DatasetDoc {
        dataset_id: target.dataset_id.clone(),
        version: target.version.clone(),
        metadata: target.metadata.clone(),
        conversations: docs
            .into_iter()
            .flat_map(|d| d.conversations.iter().cloned())
            .collect(),
    }
}

/// 合并 golden 文档
pub fn merge_goldens<'a>(
    docs: impl IntoIterator<Item = &'a GoldenDoc>,
    target: &MergeTarget,
) -> GoldenDoc {
    GoldenDoc {
        dataset_id: target.dataset_id.clone(),
        version: target.version.clone(),
        entries: docs
            .into_iter()
            .flat_map(|g| g.entries.iter().cloned())
            .collect(),
    }
}

/// 合并文档对
pub fn merge_pairs(pairs: &[DatasetPair], target: &MergeTarget) -> DatasetPair {
    DatasetPair {
        dataset: merge_datasets(pairs.iter().map(|p| &p.dataset), target),
        golden: merge_goldens(pairs.iter().map(|p| &p.golden), target),
    }
}

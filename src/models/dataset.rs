//! 数据集文档与 golden 文档
//!
//! 两份文档总是成对出现：`dataset_id` 与 `version` 必须一致，
//! golden 中引用的 `conversation_id` 必须都能在数据集中找到。

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::ValidationError;
use crate::models::options::{Difficulty, Domain, Outcome, Role};

/// 单轮对话
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_id: String,
    pub turns: Vec<Turn>,
}

/// 数据集元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub domain: Domain,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
}

impl DatasetMetadata {
    pub fn new(domain: Domain, difficulty: Difficulty, tags: &[&str]) -> Self {
        Self {
            domain,
            difficulty,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            task_type: None,
            short_description: None,
        }
    }
}

/// 数据集文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDoc {
    pub dataset_id: String,
    pub version: String,
    pub metadata: DatasetMetadata,
    pub conversations: Vec<Conversation>,
}

/// 期望的回复变体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expected {
    pub variants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedTurn {
    pub turn_index: usize,
    pub expected: Expected,
}

/// 对话的最终裁决
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalOutcome {
    pub decision: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_action: Option<String>,
    #[serde(default)]
    pub policy_flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenEntry {
    pub conversation_id: String,
    pub turns: Vec<ExpectedTurn>,
    pub final_outcome: FinalOutcome,
}

/// golden 文档（评分参考）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenDoc {
    pub dataset_id: String,
    pub version: String,
    pub entries: Vec<GoldenEntry>,
}

/// 文档类型，决定导出文件名后缀
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Dataset,
    Golden,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Dataset => "dataset",
            DocumentKind::Golden => "golden",
        }
    }

    /// `{dataset_id}.{dataset|golden}.json`
    pub fn file_name(&self, dataset_id: &str) -> String {
        format!("{}.{}.json", dataset_id, self.as_str())
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 数据集 + golden 文档对
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetPair {
    pub dataset: DatasetDoc,
    pub golden: GoldenDoc,
}

impl DatasetPair {
    pub fn dataset_id(&self) -> &str {
        &self.dataset.dataset_id
    }

    pub fn version(&self) -> &str {
        &self.dataset.version
    }

    /// 校验文档对的一致性
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.dataset.dataset_id != self.golden.dataset_id {
            return Err(ValidationError::IdMismatch {
                dataset_id: self.dataset.dataset_id.clone(),
                golden_id: self.golden.dataset_id.clone(),
            });
        }

        if self.dataset.version != self.golden.version {
            return Err(ValidationError::VersionMismatch {
                dataset_id: self.dataset.dataset_id.clone(),
                dataset_version: self.dataset.version.clone(),
                golden_version: self.golden.version.clone(),
            });
        }

        let known: HashSet<&str> = self
            .dataset
            .conversations
            .iter()
            .map(|c| c.conversation_id.as_str())
            .collect();

        if let Some(entry) = self
            .golden
            .entries
            .iter()
            .find(|e| !known.contains(e.conversation_id.as_str()))
        {
            return Err(ValidationError::UnknownConversation {
                dataset_id: self.dataset.dataset_id.clone(),
                conversation_id: entry.conversation_id.clone(),
            });
        }

        Ok(())
    }
}

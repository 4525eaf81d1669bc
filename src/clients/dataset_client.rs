/// 数据集保存 API 客户端
///
/// 封装 `POST /datasets/save` 的调用逻辑
use crate::clients::response::{extract_detail, join_url};
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, BatchSaveError};
use crate::models::{DatasetDoc, DatasetPair, GoldenDoc};
use crate::utils::logging::truncate_text;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

const SAVE_PATH: &str = "datasets/save";

/// 保存请求体
#[derive(Debug, Serialize)]
struct SaveRequest<'a> {
    dataset: &'a DatasetDoc,
    golden: &'a GoldenDoc,
    overwrite: bool,
    bump_version: bool,
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    #[serde(default)]
    dataset_id: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

/// 保存成功后的回执
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub dataset_id: String,
    pub version: String,
}

impl SaveReceipt {
    /// `Saved {id} v{version}`
    pub fn message(&self) -> String {
        format!("Saved {} v{}", self.dataset_id, self.version)
    }
}

/// 数据集保存客户端
#[derive(Debug, Clone)]
pub struct DatasetClient {
    client: reqwest::Client,
    base_url: String,
}

impl DatasetClient {
    /// 创建新的保存客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::api_request_failed(&config.api_base_url, e))?;

        Ok(Self::with_client(client, &config.api_base_url))
    }

    /// 使用已有的 reqwest 客户端创建
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// 保存单个文档对
    ///
    /// # 参数
    /// - `pair`: 数据集 / golden 文档对
    /// - `overwrite`: 是否覆盖已存在的同名数据集
    ///
    /// # 返回
    /// 成功返回后端确认的 ID 与版本；失败时错误信息取自后端的 detail。
    /// 文档对校验失败时直接返回校验错误
    pub async fn save(&self, pair: &DatasetPair, overwrite: bool) -> AppResult<SaveReceipt> {
        self.post_pair(pair, overwrite, || "Save failed".to_string())
            .await
    }

    /// 顺序保存多个文档对，遇到第一个失败立即停止
    ///
    /// 失败之后的文档对不会再发送，已保存的也不会回滚
    ///
    /// # 返回
    /// 成功返回保存数量；失败时错误中带有失败前已保存的数量
    pub async fn save_all<'a, I>(&self, pairs: I, overwrite: bool) -> Result<usize, BatchSaveError>
    where
        I: IntoIterator<Item = &'a DatasetPair>,
    {
        let mut saved = 0;

        for pair in pairs {
            let dataset_id = pair.dataset_id().to_string();
            let fallback_id = dataset_id.clone();

            match self
                .post_pair(pair, overwrite, move || format!("Save failed for {}", fallback_id))
                .await
            {
                Ok(receipt) => {
                    debug!("✓ 已保存 {}", receipt.message());
                    saved += 1;
                }
                Err(source) => {
                    warn!("批量保存在 {} 处中止，已保存 {} 个", dataset_id, saved);
                    return Err(BatchSaveError {
                        saved,
                        dataset_id,
                        source,
                    });
                }
            }
        }

        info!("✓ Saved {} datasets to server", saved);
        Ok(saved)
    }

    async fn post_pair<F>(
        &self,
        pair: &DatasetPair,
        overwrite: bool,
        fallback_message: F,
    ) -> AppResult<SaveReceipt>
    where
        F: FnOnce() -> String,
    {
        // 文档对不一致时不发送请求
        pair.validate()?;

        let endpoint = join_url(&self.base_url, SAVE_PATH);
        let body = SaveRequest {
            dataset: &pair.dataset,
            golden: &pair.golden,
            overwrite,
            bump_version: false,
        };

        debug!(
            "保存数据集 {} (overwrite={}), 对话数: {}",
            pair.dataset_id(),
            overwrite,
            pair.dataset.conversations.len()
        );

        let response = self
            .client
            .post(&endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        if !status.is_success() {
            let message = extract_detail(&text).unwrap_or_else(fallback_message);
            debug!("保存被拒绝 ({}): {}", status, truncate_text(&message, 200));
            return Err(ApiError::Rejected {
                endpoint,
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let parsed: SaveResponse = serde_json::from_str(&text).map_err(|e| {
            AppError::Api(ApiError::JsonParseFailed {
                endpoint: endpoint.clone(),
                source: e,
            })
        })?;

        Ok(SaveReceipt {
            dataset_id: parsed
                .dataset_id
                .unwrap_or_else(|| pair.dataset_id().to_string()),
            version: parsed.version.unwrap_or_else(|| pair.version().to_string()),
        })
    }
}

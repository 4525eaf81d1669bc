/// 设置 API 客户端
///
/// 封装 `GET /settings` 与 `POST /settings`
use crate::clients::response::{extract_detail, join_url};
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const SETTINGS_PATH: &str = "settings";

/// `GET /settings` 的响应
///
/// 各字段独立读取，类型不符的字段视为缺失，不影响其他字段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsResponse {
    pub industry_vertical: Option<String>,
    pub supported_verticals: Option<Vec<String>>,
}

impl SettingsResponse {
    pub fn from_value(value: &Value) -> Self {
        Self {
            industry_vertical: value
                .get("industry_vertical")
                .and_then(Value::as_str)
                .map(str::to_string),
            supported_verticals: value
                .get("supported_verticals")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                }),
        }
    }
}

#[derive(Debug, Serialize)]
struct UpdateSettingsRequest<'a> {
    industry_vertical: &'a str,
}

/// 设置客户端
#[derive(Debug, Clone)]
pub struct SettingsClient {
    client: reqwest::Client,
    base_url: String,
}

impl SettingsClient {
    /// 创建新的设置客户端
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

    /// 读取当前设置
    pub async fn fetch(&self) -> AppResult<SettingsResponse> {
        let endpoint = join_url(&self.base_url, SETTINGS_PATH);

        let response = self
            .client
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let text = Self::read_success_body(&endpoint, response).await?;

        let value: Value = serde_json::from_str(&text).map_err(|e| {
            AppError::Api(ApiError::JsonParseFailed {
                endpoint: endpoint.clone(),
                source: e,
            })
        })?;
        let settings = SettingsResponse::from_value(&value);

        debug!("读取设置: {:?}", settings);

        Ok(settings)
    }

    /// 更新行业设置，响应体不做解析
    pub async fn update(&self, industry_vertical: &str) -> AppResult<()> {
        let endpoint = join_url(&self.base_url, SETTINGS_PATH);

        let response = self
            .client
            .post(&endpoint)
            .json(&UpdateSettingsRequest { industry_vertical })
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        Self::read_success_body(&endpoint, response).await?;

        debug!("行业设置已更新为 {}", industry_vertical);

        Ok(())
    }

    async fn read_success_body(endpoint: &str, response: reqwest::Response) -> AppResult<String> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        if !status.is_success() {
            let message = extract_detail(&text)
                .unwrap_or_else(|| format!("Settings request failed ({})", status.as_u16()));
            return Err(ApiError::Rejected {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            }
            .into());
        }

        Ok(text)
    }
}

//! 行业选择上下文 - 业务能力层
//!
//! 持有当前行业与可选行业列表，并与 `/settings` 同步。
//! 同步结果总是返回给调用方，是否忽略由调用方决定。

use tracing::{debug, warn};

use crate::clients::SettingsClient;
use crate::error::AppResult;

/// 默认行业
pub const DEFAULT_VERTICAL: &str = "commerce";

/// 默认可选行业
pub const DEFAULT_SUPPORTED_VERTICALS: [&str; 4] = ["commerce", "banking", "finance", "healthcare"];

/// 行业选择状态
#[derive(Debug, Clone)]
pub struct VerticalContext {
    vertical: String,
    supported: Vec<String>,
    loading: bool,
}

impl VerticalContext {
    pub fn new() -> Self {
        Self {
            vertical: DEFAULT_VERTICAL.to_string(),
            supported: DEFAULT_SUPPORTED_VERTICALS
                .iter()
                .map(|v| v.to_string())
                .collect(),
            loading: true,
        }
    }

    pub fn vertical(&self) -> &str {
        &self.vertical
    }

    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 从后端加载设置
    ///
    /// 失败时保留当前值；无论成功与否 loading 都会结束
    pub async fn load(&mut self, client: &SettingsClient) -> AppResult<()> {
        let result = client.fetch().await;
        self.loading = false;

        let settings = match result {
            Ok(settings) => settings,
            Err(e) => {
                warn!("⚠️ 读取设置失败，保留默认值: {}", e);
                return Err(e);
            }
        };

        if let Some(supported) = settings.supported_verticals {
            self.supported = supported;
        }

        if let Some(vertical) = settings.industry_vertical.filter(|v| !v.is_empty()) {
            self.vertical = vertical;
        }

        debug!("当前行业: {}, 可选: {:?}", self.vertical, self.supported);

        Ok(())
    }

    /// 切换行业
    ///
    /// 空字符串直接忽略。本地状态先更新，再把网络结果返回给调用方
    pub async fn set_vertical(&mut self, client: &SettingsClient, vertical: &str) -> AppResult<()> {
        if vertical.is_empty() {
            return Ok(());
        }

        self.vertical = vertical.to_string();

        client.update(vertical).await.map_err(|e| {
            warn!("⚠️ 同步行业设置失败: {}", e);
            e
        })
    }
}

impl Default for VerticalContext {
    fn default() -> Self {
        Self::new()
    }
}

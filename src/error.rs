use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文档校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
}

impl AppError {
    /// 展示给用户的简短信息
    ///
    /// 后端返回的 detail 原样展示，传输层错误只给出通用提示
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(ApiError::Rejected { message, .. }) => message.clone(),
            AppError::Api(ApiError::RequestFailed { .. }) => "Save failed".to_string(),
            other => other.to_string(),
        }
    }

    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 后端返回非 2xx，message 取自 detail 字段
    #[error("{message}")]
    Rejected {
        endpoint: String,
        status: u16,
        message: String,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// 后端返回的 HTTP 状态码（如有）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::RequestFailed { source, .. } => source.status().map(|s| s.as_u16()),
            ApiError::JsonParseFailed { .. } => None,
        }
    }
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// JSON 序列化失败
    #[error("JSON序列化失败 ({path}): {source}")]
    SerializeFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置值无法解析
    #[error("配置项 {key} 的值 '{value}' 无效，可选: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
    /// 当前模式缺少必需的配置项
    #[error("缺少配置项: {key}")]
    Missing { key: String },
}

impl ConfigError {
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

/// 数据集 / golden 文档对校验错误
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("dataset_id 不一致: dataset={dataset_id}, golden={golden_id}")]
    IdMismatch {
        dataset_id: String,
        golden_id: String,
    },
    #[error("版本不一致 ({dataset_id}): dataset={dataset_version}, golden={golden_version}")]
    VersionMismatch {
        dataset_id: String,
        dataset_version: String,
        golden_version: String,
    },
    #[error("golden 引用了不存在的对话 ({dataset_id}): {conversation_id}")]
    UnknownConversation {
        dataset_id: String,
        conversation_id: String,
    },
}

/// 批量保存失败
///
/// `saved` 为失败前已成功保存的数量
#[derive(Debug, Error)]
#[error("{}", .source.user_message())]
pub struct BatchSaveError {
    pub saved: usize,
    pub dataset_id: String,
    #[source]
    pub source: AppError,
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_is_verbatim() {
        let err = AppError::from(ApiError::Rejected {
            endpoint: "/datasets/save".to_string(),
            status: 409,
            message: "dataset already exists".to_string(),
        });
        assert_eq!(err.user_message(), "dataset already exists");
        assert_eq!(err.to_string(), "API错误: dataset already exists");
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::invalid_value("mode", "all", "single | coverage");
        assert!(err.to_string().contains("'all'"));
    }
}

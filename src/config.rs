use crate::error::{AppError, AppResult, ConfigError, FileError};
use crate::models::{Difficulty, Domain, Outcome};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "GOLDEN_CONFIG";

/// 运行模式
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// 生成单个数据集
    Single,
    /// 生成 9 个覆盖数据集
    Coverage,
    /// 生成合并后的覆盖数据集
    Combined,
    /// 合并磁盘上已有的数据集文件
    Merge,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunMode::Single => "single",
            RunMode::Coverage => "coverage",
            RunMode::Combined => "combined",
            RunMode::Merge => "merge",
        })
    }
}

impl FromStr for RunMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(RunMode::Single),
            "coverage" => Ok(RunMode::Coverage),
            "combined" => Ok(RunMode::Combined),
            "merge" => Ok(RunMode::Merge),
            _ => Err(ConfigError::invalid_value(
                "mode",
                s,
                "single | coverage | combined | merge",
            )),
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- 后端 API 配置 ---
    /// 后端基础地址
    pub api_base_url: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    // --- 生成配置 ---
    pub mode: RunMode,
    pub domain: Domain,
    pub difficulty: Difficulty,
    pub outcome: Outcome,
    /// 固定随机种子，设置后生成的 ID 可复现
    pub id_seed: Option<u64>,
    // --- 输出配置 ---
    /// 是否导出 JSON 文件
    pub export_files: bool,
    /// 导出目录
    pub output_dir: String,
    /// 是否保存到服务端
    pub save_to_server: bool,
    /// 保存时是否覆盖同名数据集
    pub overwrite: bool,
    // --- 行业设置 ---
    /// 启动时是否与 /settings 同步
    pub sync_vertical: bool,
    /// 需要写回的行业
    pub industry_vertical: Option<String>,
    // --- 合并配置 ---
    pub merge_source_dir: Option<String>,
    /// 只合并以此前缀开头的文件
    pub merge_file_prefix: String,
    pub merge_dataset_id: Option<String>,
    pub merge_version: String,
    pub merge_tags: Vec<String>,
    pub merge_task_type: Option<String>,
    pub merge_description: Option<String>,
    // --- 日志配置 ---
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            mode: RunMode::Single,
            domain: Domain::Commerce,
            difficulty: Difficulty::Easy,
            outcome: Outcome::Allow,
            id_seed: None,
            export_files: true,
            output_dir: "golden_output".to_string(),
            save_to_server: false,
            overwrite: false,
            sync_vertical: false,
            industry_vertical: None,
            merge_source_dir: None,
            merge_file_prefix: String::new(),
            merge_dataset_id: None,
            merge_version: "1.0.0".to_string(),
            merge_tags: vec!["combined".to_string()],
            merge_task_type: None,
            merge_description: None,
            verbose_logging: false,
            output_log_file: "golden_gen.log".to_string(),
        }
    }
}

impl Config {
    /// 默认值 → 配置文件（`GOLDEN_CONFIG` 指定时）→ 环境变量
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(Path::new(&path))?,
            _ => Self::default(),
        };

        Ok(base.with_overrides(|key| std::env::var(key).ok())?)
    }

    /// 从 TOML 文件加载，缺省的字段使用默认值
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

        toml::from_str(&content).map_err(|e| {
            AppError::File(FileError::TomlParseFailed {
                path: path.display().to_string(),
                source: e,
            })
        })
    }

    /// 用外部键值覆盖当前配置
    ///
    /// 数值与布尔值解析失败时保留原值；枚举值解析失败时报错
    pub fn with_overrides<F>(self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Ok(Self {
            api_base_url: lookup("API_BASE_URL").unwrap_or(self.api_base_url),
            request_timeout_secs: parsed(&lookup, "REQUEST_TIMEOUT_SECS")
                .unwrap_or(self.request_timeout_secs),
            mode: match lookup("GOLDEN_MODE") {
                Some(v) => v.parse()?,
                None => self.mode,
            },
            domain: match lookup("GOLDEN_DOMAIN") {
                Some(v) => v.parse()?,
                None => self.domain,
            },
            difficulty: match lookup("GOLDEN_DIFFICULTY") {
                Some(v) => v.parse()?,
                None => self.difficulty,
            },
            outcome: match lookup("GOLDEN_OUTCOME") {
                Some(v) => v.parse()?,
                None => self.outcome,
            },
            id_seed: parsed(&lookup, "ID_SEED").or(self.id_seed),
            export_files: parsed(&lookup, "EXPORT_FILES").unwrap_or(self.export_files),
            output_dir: lookup("OUTPUT_DIR").unwrap_or(self.output_dir),
            save_to_server: parsed(&lookup, "SAVE_TO_SERVER").unwrap_or(self.save_to_server),
            overwrite: parsed(&lookup, "OVERWRITE").unwrap_or(self.overwrite),
            sync_vertical: parsed(&lookup, "SYNC_VERTICAL").unwrap_or(self.sync_vertical),
            industry_vertical: text("INDUSTRY_VERTICAL").or(self.industry_vertical),
            merge_source_dir: text("MERGE_SOURCE_DIR").or(self.merge_source_dir),
            merge_file_prefix: lookup("MERGE_FILE_PREFIX").unwrap_or(self.merge_file_prefix),
            merge_dataset_id: text("MERGE_DATASET_ID").or(self.merge_dataset_id),
            merge_version: text("MERGE_VERSION").unwrap_or(self.merge_version),
            merge_tags: lookup("MERGE_TAGS")
                .map(|v| {
                    v.split(',')
                        .map(|t| t.trim().to_string())
                        .filter(|t| !t.is_empty())
                        .collect()
                })
                .unwrap_or(self.merge_tags),
            merge_task_type: text("MERGE_TASK_TYPE").or(self.merge_task_type),
            merge_description: text("MERGE_DESCRIPTION").or(self.merge_description),
            verbose_logging: parsed(&lookup, "VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
            output_log_file: lookup("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
        })
    }
}

/// 解析数值 / 布尔类的配置值，失败时返回 None
fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

//! 生成选项：领域、难度、结局

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// 业务领域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Commerce,
    Banking,
}

impl Domain {
    pub const ALL: [Domain; 2] = [Domain::Commerce, Domain::Banking];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Commerce => "commerce",
            Domain::Banking => "banking",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commerce" => Ok(Domain::Commerce),
            "banking" => Ok(Domain::Banking),
            _ => Err(ConfigError::invalid_value("domain", s, "commerce | banking")),
        }
    }
}

/// 难度
///
/// `Mixed` 只出现在合并后的数据集元数据里
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Mixed,
}

impl Difficulty {
    /// 全覆盖生成使用的难度集合
    pub const COVERAGE: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "mixed" => Ok(Difficulty::Mixed),
            _ => Err(ConfigError::invalid_value(
                "difficulty",
                s,
                "easy | medium | hard | mixed",
            )),
        }
    }
}

/// 对话最终裁决
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Allow,
    Deny,
    Partial,
}

impl Outcome {
    /// 全覆盖生成使用的结局集合
    pub const COVERAGE: [Outcome; 3] = [Outcome::Allow, Outcome::Deny, Outcome::Partial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Allow => "ALLOW",
            Outcome::Deny => "DENY",
            Outcome::Partial => "PARTIAL",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALLOW" => Ok(Outcome::Allow),
            "DENY" => Ok(Outcome::Deny),
            "PARTIAL" => Ok(Outcome::Partial),
            _ => Err(ConfigError::invalid_value(
                "outcome",
                s,
                "ALLOW | DENY | PARTIAL",
            )),
        }
    }
}

/// 对话角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

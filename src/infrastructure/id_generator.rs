//! 标识符生成 - 基础设施层
//!
//! 生成形如 `{prefix}-{suffix}` 的标识符，后缀为 36 进制。
//! 不检测冲突。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 随机后缀的上界（不含）
const RANDOM_SUFFIX_RANGE: u64 = 1_000_000;

/// 标识符生成能力
pub trait IdGenerator: Send {
    /// 生成下一个带前缀的标识符
    fn next_id(&mut self, prefix: &str) -> String;
}

/// 随机标识符生成器
pub struct RandomIdGenerator {
    rng: StdRng,
}

impl RandomIdGenerator {
    /// 使用系统熵初始化
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// 使用固定种子初始化，生成序列可复现
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self, prefix: &str) -> String {
        let n = self.rng.gen_range(0..RANDOM_SUFFIX_RANGE);
        format!("{}-{}", prefix, to_base36(n))
    }
}

/// 递增计数器生成器，主要用于测试
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{}-{}", prefix, to_base36(self.counter));
        self.counter += 1;
        id
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8_lossy(&buf).into_owned()
}

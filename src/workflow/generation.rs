//! 生成流程 - 流程层
//!
//! 三种生成模式：
//! 1. 单个：一次模板生成
//! 2. 全覆盖：难度 × 结局 共 9 个独立文档对
//! 3. 合并覆盖：同样的 9 个文档对合并为一个
//!
//! 每次生成都会整体替换上一次的结果。

use tracing::info;

use crate::infrastructure::{IdGenerator, RandomIdGenerator};
use crate::models::{DatasetPair, Difficulty, Domain, Outcome};
use crate::services::dataset_merger::{merge_pairs, MergeTarget};
use crate::services::template_engine::{build_conversation, TEMPLATE_VERSION};

/// 一次生成的结果
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    /// 单个文档对
    Single(DatasetPair),
    /// 全覆盖的 9 个文档对
    Coverage(Vec<DatasetPair>),
    /// 合并后的文档对
    Combined(DatasetPair),
}

impl GenerationResult {
    /// 以统一的方式访问结果中的文档对
    pub fn pairs(&self) -> Vec<&DatasetPair> {
        match self {
            GenerationResult::Single(pair) | GenerationResult::Combined(pair) => vec![pair],
            GenerationResult::Coverage(pairs) => pairs.iter().collect(),
        }
    }

    /// 结果中的文档对数量
    pub fn pair_count(&self) -> usize {
        match self {
            GenerationResult::Single(_) | GenerationResult::Combined(_) => 1,
            GenerationResult::Coverage(pairs) => pairs.len(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GenerationResult::Single(_) => "single",
            GenerationResult::Coverage(_) => "coverage",
            GenerationResult::Combined(_) => "combined",
        }
    }
}

/// 生成 (难度 × 结局) 的全部组合，难度在外层循环
pub fn coverage_pairs(domain: Domain, ids: &mut dyn IdGenerator) -> Vec<DatasetPair> {
    let mut pairs = Vec::with_capacity(Difficulty::COVERAGE.len() * Outcome::COVERAGE.len());
    for difficulty in Difficulty::COVERAGE {
        for outcome in Outcome::COVERAGE {
            pairs.push(build_conversation(domain, difficulty, outcome, ids));
        }
    }
    pairs
}

/// 生成控制器
///
/// 持有标识符生成器与当前结果
pub struct GenerationController {
    ids: Box<dyn IdGenerator>,
    result: Option<GenerationResult>,
}

impl GenerationController {
    /// 使用随机标识符创建
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(RandomIdGenerator::new()))
    }

    /// 注入自定义标识符生成器
    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self { ids, result: None }
    }

    /// 当前结果
    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    /// 取走当前结果
    pub fn take_result(&mut self) -> Option<GenerationResult> {
        self.result.take()
    }

    /// 单个生成
    pub fn generate_single(
        &mut self,
        domain: Domain,
        difficulty: Difficulty,
        outcome: Outcome,
    ) -> &GenerationResult {
        let pair = build_conversation(domain, difficulty, outcome, self.ids.as_mut());
        info!("✓ 已生成 {}", pair.dataset_id());
        self.result.insert(GenerationResult::Single(pair))
    }

    /// 全覆盖生成
    pub fn generate_coverage(&mut self, domain: Domain) -> &GenerationResult {
        let pairs = coverage_pairs(domain, self.ids.as_mut());
        info!("✓ 已生成 {} 个覆盖数据集 (领域: {})", pairs.len(), domain);
        self.result.insert(GenerationResult::Coverage(pairs))
    }

    /// 合并覆盖生成
    pub fn generate_combined(&mut self, domain: Domain) -> &GenerationResult {
        let pairs = coverage_pairs(domain, self.ids.as_mut());
        let target = MergeTarget::combined_coverage(domain, TEMPLATE_VERSION);
        let combined = merge_pairs(&pairs, &target);
        info!(
            "✓ 已生成合并数据集 {}，共 {} 个对话",
            combined.dataset_id(),
            combined.dataset.conversations.len()
        );
        self.result.insert(GenerationResult::Combined(combined))
    }
}

impl Default for GenerationController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SequentialIdGenerator;
    use std::collections::HashSet;

    fn controller() -> GenerationController {
        GenerationController::with_id_generator(Box::new(SequentialIdGenerator::new()))
    }

    #[test]
    fn test_coverage_yields_full_cross_product() {
        for domain in Domain::ALL {
            let mut ctl = controller();
            let result = ctl.generate_coverage(domain);
            let pairs = result.pairs();
            assert_eq!(pairs.len(), 9);

            let combos: HashSet<(Difficulty, Outcome)> = pairs
                .iter()
                .map(|p| {
                    (
                        p.dataset.metadata.difficulty,
                        p.golden.entries[0].final_outcome.decision,
                    )
                })
                .collect();
            assert_eq!(combos.len(), 9);

            let ids: HashSet<&str> = pairs.iter().map(|p| p.dataset_id()).collect();
            assert_eq!(ids.len(), 9);
            assert!(pairs.iter().all(|p| p.dataset.metadata.domain == domain));
        }
    }

    #[test]
    fn test_coverage_order_difficulty_outer() {
        let mut ids = SequentialIdGenerator::new();
        let pairs = coverage_pairs(Domain::Commerce, &mut ids);
        assert_eq!(pairs[0].dataset.metadata.difficulty, Difficulty::Easy);
        assert_eq!(pairs[1].golden.entries[0].final_outcome.decision, Outcome::Deny);
        assert_eq!(pairs[3].dataset.metadata.difficulty, Difficulty::Medium);
        assert_eq!(pairs[8].dataset.metadata.difficulty, Difficulty::Hard);
        assert_eq!(pairs[8].golden.entries[0].final_outcome.decision, Outcome::Partial);
    }

    #[test]
    fn test_combined_counts_match_sum() {
        let mut ctl = controller();
        let result = ctl.generate_combined(Domain::Banking).clone();

        let mut ids = SequentialIdGenerator::new();
        let pairs = coverage_pairs(Domain::Banking, &mut ids);
        let conversations: usize = pairs.iter().map(|p| p.dataset.conversations.len()).sum();
        let entries: usize = pairs.iter().map(|p| p.golden.entries.len()).sum();

        match result {
            GenerationResult::Combined(pair) => {
                assert_eq!(pair.dataset.dataset_id, "banking-combined-coverage");
                assert_eq!(pair.dataset.version, "1.0.0");
                assert_eq!(pair.golden.version, "1.0.0");
                assert_eq!(pair.dataset.metadata.difficulty, Difficulty::Mixed);
                assert_eq!(pair.dataset.conversations.len(), conversations);
                assert_eq!(pair.golden.entries.len(), entries);
                assert!(pair.validate().is_ok());
            }
            other => panic!("unexpected result: {}", other.label()),
        }
    }

    #[test]
    fn test_modes_replace_previous_result() {
        let mut ctl = controller();
        assert!(ctl.result().is_none());

        ctl.generate_coverage(Domain::Commerce);
        assert!(matches!(ctl.result(), Some(GenerationResult::Coverage(_))));
        assert_eq!(ctl.result().unwrap().pair_count(), 9);

        ctl.generate_single(Domain::Commerce, Difficulty::Easy, Outcome::Allow);
        assert!(matches!(ctl.result(), Some(GenerationResult::Single(_))));
        assert_eq!(ctl.result().unwrap().pair_count(), 1);

        ctl.generate_combined(Domain::Commerce);
        assert!(matches!(ctl.result(), Some(GenerationResult::Combined(_))));

        assert!(ctl.take_result().is_some());
        assert!(ctl.result().is_none());
    }
}

//! 模板引擎 - 业务能力层
//!
//! 根据（领域, 难度, 结局）填充固定的六轮客服对话，
//! 并生成配套的 golden 文档。内容只由领域和结局决定，
//! 唯一的变化来自注入的标识符生成器。

use crate::infrastructure::IdGenerator;
use crate::models::{
    Conversation, DatasetDoc, DatasetMetadata, DatasetPair, Difficulty, Domain, Expected,
    ExpectedTurn, FinalOutcome, GoldenDoc, GoldenEntry, Outcome, Turn,
};

/// 模板生成的文档版本
pub const TEMPLATE_VERSION: &str = "1.0.0";

/// 需要用户补充证据时的策略标记
pub const NEEDS_EVIDENCE: &str = "NEEDS_EVIDENCE";

const USER_FOLLOW_UP: &str = "Thanks, what can you do for me now?";

/// golden 中需要打分的助手轮次
const EXPECTED_TURN_INDICES: [usize; 3] = [1, 3, 5];

/// 某个领域的固定台词
struct DomainScript {
    user_problem: &'static str,
    assistant_ask: &'static str,
    user_details: &'static str,
    assistant_policy: &'static str,
}

const COMMERCE_SCRIPT: DomainScript = DomainScript {
    user_problem: "My order arrived damaged. I want a refund.",
    assistant_ask: "I am sorry to hear that. Could you share your order ID and item details?",
    user_details: "Order #A123, item: headphones, price $79.",
    assistant_policy: "Based on the policy, we can process a refund if damage is confirmed.",
};

const BANKING_SCRIPT: DomainScript = DomainScript {
    user_problem: "I noticed a suspicious transaction. Can you help?",
    assistant_ask: "I can help. Could you share the transaction ID and amount?",
    user_details: "Transaction T-9876 for $250 yesterday.",
    assistant_policy: "According to policy, we can freeze the card and start a dispute.",
};

fn script(domain: Domain) -> &'static DomainScript {
    match domain {
        Domain::Commerce => &COMMERCE_SCRIPT,
        Domain::Banking => &BANKING_SCRIPT,
    }
}

fn resolution(domain: Domain, outcome: Outcome) -> &'static str {
    match (domain, outcome) {
        (Domain::Commerce, Outcome::Allow) => "I have approved a full refund of $79.",
        (Domain::Commerce, Outcome::Partial) => "I can offer a partial refund of $40.",
        (Domain::Commerce, Outcome::Deny) => {
            "We cannot refund without proof of damage. Please provide photos."
        }
        (Domain::Banking, Outcome::Allow) => {
            "I have blocked your card and started a dispute; you will be reimbursed $250 if validated."
        }
        (Domain::Banking, Outcome::Partial) => {
            "We can issue a temporary credit of $100 pending investigation."
        }
        (Domain::Banking, Outcome::Deny) => {
            "We cannot credit without verification. Please submit a dispute form."
        }
    }
}

/// 退款金额，仅电商领域有
fn refund_amount(domain: Domain, outcome: Outcome) -> Option<u32> {
    match domain {
        Domain::Commerce => Some(match outcome {
            Outcome::Allow => 79,
            Outcome::Partial => 40,
            Outcome::Deny => 0,
        }),
        Domain::Banking => None,
    }
}

/// 后续动作，仅银行领域有
fn next_action(domain: Domain, outcome: Outcome) -> Option<String> {
    match domain {
        Domain::Banking => Some(
            match outcome {
                Outcome::Allow => "dispute",
                Outcome::Deny | Outcome::Partial => "verify",
            }
            .to_string(),
        ),
        Domain::Commerce => None,
    }
}

fn policy_flags(outcome: Outcome) -> Vec<String> {
    match outcome {
        Outcome::Deny => vec![NEEDS_EVIDENCE.to_string()],
        Outcome::Allow | Outcome::Partial => Vec::new(),
    }
}

/// 生成一对数据集 / golden 文档
///
/// # 参数
/// - `domain`: 业务领域
/// - `difficulty`: 难度标签（只写入元数据和 id 前缀）
/// - `outcome`: 最终裁决
/// - `ids`: 标识符生成器
pub fn build_conversation(
    domain: Domain,
    difficulty: Difficulty,
    outcome: Outcome,
    ids: &mut dyn IdGenerator,
) -> DatasetPair {
    let dataset_id = ids.next_id(&format!("{}-{}-{}", domain, difficulty, outcome));
    let conversation_id = ids.next_id("conv");
    let lines = script(domain);
    let assistant_resolution = resolution(domain, outcome);

    let turns = vec![
        Turn::user(lines.user_problem),
        Turn::assistant(lines.assistant_ask),
        Turn::user(lines.user_details),
        Turn::assistant(lines.assistant_policy),
        Turn::user(USER_FOLLOW_UP),
        Turn::assistant(assistant_resolution),
    ];

    let expected_turns = EXPECTED_TURN_INDICES
        .iter()
        .map(|&turn_index| ExpectedTurn {
            turn_index,
            expected: Expected {
                variants: vec![turns[turn_index].text.clone()],
            },
        })
        .collect();

    let dataset = DatasetDoc {
        dataset_id: dataset_id.clone(),
        version: TEMPLATE_VERSION.to_string(),
        metadata: DatasetMetadata::new(domain, difficulty, &["template"]),
        conversations: vec![Conversation {
            conversation_id: conversation_id.clone(),
            turns,
        }],
    };

    let golden = GoldenDoc {
        dataset_id,
        version: TEMPLATE_VERSION.to_string(),
        entries: vec![GoldenEntry {
            conversation_id,
            turns: expected_turns,
            final_outcome: FinalOutcome {
                decision: outcome,
                refund_amount: refund_amount(domain, outcome),
                reason_code: None,
                next_action: next_action(domain, outcome),
                policy_flags: policy_flags(outcome),
            },
        }],
    };

    DatasetPair { dataset, golden }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SequentialIdGenerator;
    use crate::models::Role;

    fn all_triples() -> Vec<(Domain, Difficulty, Outcome)> {
        let mut triples = Vec::new();
        for domain in Domain::ALL {
            for difficulty in Difficulty::COVERAGE {
                for outcome in Outcome::COVERAGE {
                    triples.push((domain, difficulty, outcome));
                }
            }
        }
        triples
    }

    #[test]
    fn test_every_triple_yields_valid_pair() {
        let mut ids = SequentialIdGenerator::new();
        for (domain, difficulty, outcome) in all_triples() {
            let pair = build_conversation(domain, difficulty, outcome, &mut ids);
            assert!(pair.validate().is_ok(), "{} {} {}", domain, difficulty, outcome);
            assert_eq!(pair.dataset.dataset_id, pair.golden.dataset_id);
            assert_eq!(pair.dataset.version, pair.golden.version);
        }
    }

    #[test]
    fn test_domain_specific_fields() {
        let mut ids = SequentialIdGenerator::new();
        for (domain, difficulty, outcome) in all_triples() {
            let pair = build_conversation(domain, difficulty, outcome, &mut ids);
            let fo = &pair.golden.entries[0].final_outcome;
            assert_eq!(fo.refund_amount.is_some(), domain == Domain::Commerce);
            assert_eq!(fo.next_action.is_some(), domain == Domain::Banking);
            assert_eq!(
                fo.policy_flags == vec![NEEDS_EVIDENCE.to_string()],
                outcome == Outcome::Deny
            );
            if outcome != Outcome::Deny {
                assert!(fo.policy_flags.is_empty());
            }
            assert!(fo.reason_code.is_none());
        }
    }

    #[test]
    fn test_commerce_easy_allow() {
        let mut ids = SequentialIdGenerator::new();
        let pair = build_conversation(Domain::Commerce, Difficulty::Easy, Outcome::Allow, &mut ids);
        let fo = &pair.golden.entries[0].final_outcome;
        assert_eq!(fo.refund_amount, Some(79));
        assert!(fo.policy_flags.is_empty());
        assert_eq!(pair.dataset.dataset_id, "commerce-easy-ALLOW-0");
        assert_eq!(pair.dataset.conversations[0].conversation_id, "conv-1");
    }

    #[test]
    fn test_commerce_refund_amounts() {
        let mut ids = SequentialIdGenerator::new();
        let partial =
            build_conversation(Domain::Commerce, Difficulty::Medium, Outcome::Partial, &mut ids);
        let deny = build_conversation(Domain::Commerce, Difficulty::Hard, Outcome::Deny, &mut ids);
        assert_eq!(partial.golden.entries[0].final_outcome.refund_amount, Some(40));
        assert_eq!(deny.golden.entries[0].final_outcome.refund_amount, Some(0));
    }

    #[test]
    fn test_banking_hard_partial() {
        let mut ids = SequentialIdGenerator::new();
        let pair =
            build_conversation(Domain::Banking, Difficulty::Hard, Outcome::Partial, &mut ids);
        let fo = &pair.golden.entries[0].final_outcome;
        assert_eq!(fo.decision, Outcome::Partial);
        assert_eq!(fo.refund_amount, None);
        assert_eq!(fo.next_action.as_deref(), Some("verify"));
    }

    #[test]
    fn test_banking_allow_disputes() {
        let mut ids = SequentialIdGenerator::new();
        let pair = build_conversation(Domain::Banking, Difficulty::Easy, Outcome::Allow, &mut ids);
        assert_eq!(
            pair.golden.entries[0].final_outcome.next_action.as_deref(),
            Some("dispute")
        );
    }

    #[test]
    fn test_conversation_shape() {
        let mut ids = SequentialIdGenerator::new();
        let pair = build_conversation(Domain::Banking, Difficulty::Medium, Outcome::Deny, &mut ids);
        let turns = &pair.dataset.conversations[0].turns;
        assert_eq!(turns.len(), 6);
        for (i, turn) in turns.iter().enumerate() {
            let expected_role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            assert_eq!(turn.role, expected_role);
        }
        assert_eq!(turns[4].text, USER_FOLLOW_UP);

        let expected = &pair.golden.entries[0].turns;
        let indices: Vec<usize> = expected.iter().map(|t| t.turn_index).collect();
        assert_eq!(indices, vec![1, 3, 5]);
        assert_eq!(expected[2].expected.variants, vec![turns[5].text.clone()]);
        assert_eq!(pair.dataset.metadata.tags, vec!["template".to_string()]);
    }
}

use std::collections::{BTreeMap, HashMap};

use crate::domain::answers::AnswerItem;
use crate::domain::stats::{StatsReport, TopAnswer, TopAnswers};

pub const TOP_ANSWERS_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BucketEntry {
    answer_id: u64,
    comment_count: u32,
}

/// Running totals for one stats run, folded one page at a time.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    answers_per_question: HashMap<u64, u64>,
    score_buckets: BTreeMap<i64, Vec<BucketEntry>>,
    total_accepted_answers: u64,
    total_accepted_score: i64,
    total_answers_reported: u64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the item count declared by the first page.
    pub fn set_total_reported(&mut self, total: u64) {
        self.total_answers_reported = total;
    }

    pub fn apply_page(&mut self, items: &[AnswerItem]) {
        for item in items {
            *self
                .answers_per_question
                .entry(item.question_id)
                .or_insert(0) += 1;

            self.score_buckets
                .entry(item.score)
                .or_default()
                .push(BucketEntry {
                    answer_id: item.answer_id,
                    comment_count: item.comment_count,
                });

            if item.is_accepted {
                self.total_accepted_score += item.score;
                self.total_accepted_answers += 1;
            }
        }
    }

    pub fn distinct_questions(&self) -> usize {
        self.answers_per_question.len()
    }

    pub fn total_accepted_answers(&self) -> u64 {
        self.total_accepted_answers
    }

    pub fn total_accepted_score(&self) -> i64 {
        self.total_accepted_score
    }

    pub fn total_answers_reported(&self) -> u64 {
        self.total_answers_reported
    }

    pub fn accepted_average_score(&self) -> f64 {
        if self.total_accepted_answers == 0 {
            return 0.0;
        }
        self.total_accepted_score as f64 / self.total_accepted_answers as f64
    }

    pub fn average_answers_per_question(&self) -> f64 {
        let questions = self.distinct_questions();
        if questions == 0 {
            return 0.0;
        }
        self.total_answers_reported as f64 / questions as f64
    }

    /// Highest scores first; equal scores keep the order they were seen in.
    /// An answer id seen twice keeps its first slot and its latest comment count.
    pub fn top_answers(&self, limit: usize) -> TopAnswers {
        let mut ranked: Vec<TopAnswer> = Vec::with_capacity(limit);

        'buckets: for entries in self.score_buckets.values().rev() {
            for entry in entries {
                if ranked.len() == limit {
                    break 'buckets;
                }
                if let Some(existing) = ranked.iter_mut().find(|a| a.answer_id == entry.answer_id)
                {
                    existing.comment_count = entry.comment_count;
                    continue;
                }
                ranked.push(TopAnswer {
                    answer_id: entry.answer_id,
                    comment_count: entry.comment_count,
                });
            }
        }

        TopAnswers::new(ranked)
    }

    pub fn into_report(self) -> StatsReport {
        StatsReport {
            total_accepted_answers: self.total_accepted_answers,
            accepted_answers_average_score: self.accepted_average_score(),
            average_answers_per_question: self.average_answers_per_question(),
            top_answers_comments_count: self.top_answers(TOP_ANSWERS_LIMIT),
        }
    }
}

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Final statistics for one query window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub total_accepted_answers: u64,
    #[serde(serialize_with = "serialize_average")]
    pub accepted_answers_average_score: f64,
    #[serde(serialize_with = "serialize_average")]
    pub average_answers_per_question: f64,
    pub top_answers_comments_count: TopAnswers,
}

/// An average with nothing to divide prints as the integer `0`, not `0.0`.
#[allow(clippy::float_cmp, clippy::trivially_copy_pass_by_ref)]
fn serialize_average<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if *value == 0.0 {
        serializer.serialize_u64(0)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopAnswer {
    pub answer_id: u64,
    pub comment_count: u32,
}

/// Highest-scored answers in rank order, serialised as an
/// `{"<answer_id>": comment_count}` object that keeps that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopAnswers(Vec<TopAnswer>);

impl TopAnswers {
    pub fn new(answers: Vec<TopAnswer>) -> Self {
        Self(answers)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn answer_ids(&self) -> Vec<u64> {
        self.0.iter().map(|a| a.answer_id).collect()
    }

    pub fn into_inner(self) -> Vec<TopAnswer> {
        self.0
    }
}

impl Serialize for TopAnswers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for answer in &self.0 {
            map.serialize_entry(&answer.answer_id.to_string(), &answer.comment_count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TopAnswers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TopAnswersVisitor;

        impl<'de> Visitor<'de> for TopAnswersVisitor {
            type Value = TopAnswers;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of answer ids to comment counts")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut answers = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, comment_count)) = access.next_entry::<String, u32>()? {
                    let answer_id = key.parse::<u64>().map_err(|_| {
                        <A::Error as serde::de::Error>::custom(format!("invalid answer id: {key}"))
                    })?;
                    answers.push(TopAnswer {
                        answer_id,
                        comment_count,
                    });
                }
                Ok(TopAnswers(answers))
            }
        }

        deserializer.deserialize_map(TopAnswersVisitor)
    }
}

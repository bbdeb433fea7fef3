use std::collections::HashMap;

use crate::category::ContentCategory;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Free-form player feedback on one piece of generated content.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerFeedback {
    pub category: ContentCategory,
    /// Rating on the 1–5 scale; out-of-range values are clamped on record.
    pub rating: u8,
    pub comment: String,
}

/// Completion, abandonment, and satisfaction bookkeeping. The full rating
/// history is retained; per-category satisfaction is recomputed as the mean
/// over that history on every record.
#[derive(Debug, Default)]
pub struct EngagementTracker {
    completions: u64,
    abandonments: u64,
    feedback: Vec<PlayerFeedback>,
    satisfaction: HashMap<ContentCategory, f64>,
}

impl EngagementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_quest_completion(&mut self, completed: bool) {
        if completed {
            self.completions += 1;
        } else {
            self.abandonments += 1;
        }
    }

    pub fn record_feedback(&mut self, mut feedback: PlayerFeedback) {
        feedback.rating = feedback.rating.clamp(MIN_RATING, MAX_RATING);
        let category = feedback.category;
        self.feedback.push(feedback);

        let ratings: Vec<f64> = self
            .feedback
            .iter()
            .filter(|f| f.category == category)
            .map(|f| f.rating as f64)
            .collect();
        let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
        self.satisfaction.insert(category, mean);
    }

    /// Completed quests as a fraction of resolved quests. `None` until at
    /// least one quest has resolved.
    pub fn completion_rate(&self) -> Option<f64> {
        let resolved = self.completions + self.abandonments;
        if resolved == 0 {
            return None;
        }
        Some(self.completions as f64 / resolved as f64)
    }

    pub fn satisfaction(&self, category: ContentCategory) -> Option<f64> {
        self.satisfaction.get(&category).copied()
    }

    /// Mean rating over all retained feedback, on the 1–5 scale.
    pub fn average_satisfaction(&self) -> Option<f64> {
        if self.feedback.is_empty() {
            return None;
        }
        let sum: f64 = self.feedback.iter().map(|f| f.rating as f64).sum();
        Some(sum / self.feedback.len() as f64)
    }

    pub fn feedback(&self) -> &[PlayerFeedback] {
        &self.feedback
    }

    /// Component score in [0.0, 1.0]: mean of the completion rate and the
    /// normalized satisfaction. Missing signals score neutral (1.0) — a
    /// fresh session carries no evidence of disengagement.
    pub fn score(&self) -> f64 {
        let completion = self.completion_rate().unwrap_or(1.0);
        let satisfaction = self
            .average_satisfaction()
            .map(|s| (s - MIN_RATING as f64) / (MAX_RATING - MIN_RATING) as f64)
            .unwrap_or(1.0);
        (completion + satisfaction) / 2.0
    }
}

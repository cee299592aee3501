//! Completion counts per topic and the learner's reward ledger.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{ItemKind, Reward};

pub const XP_PER_LEVEL: u32 = 500;

/// Anything the client can tick off.
pub trait Completable {
  fn is_completed(&self) -> bool;
}

/// Derived counts for one topic. Recomputed from completion flags, never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicProgress {
  pub completed_lessons: usize,
  pub total_lessons: usize,
  pub completed_challenges: usize,
  pub total_challenges: usize,
  pub overall_progress: u32,
}

impl TopicProgress {
  pub fn from_flags<L, C>(lessons: L, challenges: C) -> Self
  where
    L: IntoIterator<Item = bool>,
    C: IntoIterator<Item = bool>,
  {
    let (completed_lessons, total_lessons) = tally(lessons);
    let (completed_challenges, total_challenges) = tally(challenges);
    Self {
      completed_lessons,
      total_lessons,
      completed_challenges,
      total_challenges,
      overall_progress: percent(completed_lessons + completed_challenges, total_lessons + total_challenges),
    }
  }
}

pub fn aggregate<L: Completable, C: Completable>(lessons: &[L], challenges: &[C]) -> TopicProgress {
  TopicProgress::from_flags(
    lessons.iter().map(Completable::is_completed),
    challenges.iter().map(Completable::is_completed),
  )
}

fn tally(flags: impl IntoIterator<Item = bool>) -> (usize, usize) {
  flags.into_iter().fold((0, 0), |(done, total), flag| (done + usize::from(flag), total + 1))
}

/// `round(100 * done / max(1, total))`, halves rounding up.
pub fn percent(done: usize, total: usize) -> u32 {
  let total = total.max(1);
  ((200 * done + total) / (2 * total)) as u32
}

/// Per-learner completion sets and reward totals.
#[derive(Clone, Debug, Default)]
pub struct LearnerProgress {
  pub completed_lessons: HashSet<String>,
  pub completed_challenges: HashSet<String>,
  pub diamonds: u32,
  pub experience: u32,
}

impl LearnerProgress {
  pub fn level(&self) -> u32 {
    1 + self.experience / XP_PER_LEVEL
  }

  pub fn has_completed(&self, kind: ItemKind, id: &str) -> bool {
    match kind {
      ItemKind::Lesson => self.completed_lessons.contains(id),
      ItemKind::Challenge => self.completed_challenges.contains(id),
    }
  }

  /// Record a completion and pay its reward. Returns false, changing nothing,
  /// when the item was already completed.
  pub fn claim(&mut self, kind: ItemKind, id: &str, reward: Reward) -> bool {
    let set = match kind {
      ItemKind::Lesson => &mut self.completed_lessons,
      ItemKind::Challenge => &mut self.completed_challenges,
    };
    if !set.insert(id.to_string()) {
      return false;
    }
    self.diamonds = self.diamonds.saturating_add(reward.diamonds);
    self.experience = self.experience.saturating_add(reward.experience);
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use rstest::rstest;

  struct Item(bool);
  impl Completable for Item {
    fn is_completed(&self) -> bool { self.0 }
  }

  #[test]
  fn aggregates_lessons_and_challenges() {
    let lessons = [Item(true), Item(false), Item(true)];
    let challenges = [Item(false)];
    assert_eq!(
      aggregate(&lessons, &challenges),
      TopicProgress {
        completed_lessons: 2,
        total_lessons: 3,
        completed_challenges: 0,
        total_challenges: 1,
        overall_progress: 50,
      }
    );
  }

  #[test]
  fn empty_topic_is_zero_percent() {
    let none: [Item; 0] = [];
    assert_eq!(aggregate(&none, &none).overall_progress, 0);
  }

  #[rstest]
  #[case(0, 3, 0)]
  #[case(1, 3, 33)]
  #[case(2, 3, 67)]
  #[case(1, 8, 13)]
  #[case(3, 3, 100)]
  #[case(0, 0, 0)]
  fn percent_rounds_like_math_round(#[case] done: usize, #[case] total: usize, #[case] expected: u32) {
    assert_eq!(percent(done, total), expected);
  }

  #[test]
  fn claim_pays_once() {
    let mut p = LearnerProgress::default();
    let reward = Reward { diamonds: 10, experience: 300 };
    assert!(p.claim(ItemKind::Lesson, "a", reward));
    assert!(!p.claim(ItemKind::Lesson, "a", reward));
    assert_eq!((p.diamonds, p.experience), (10, 300));
    assert!(p.has_completed(ItemKind::Lesson, "a"));
    assert!(!p.has_completed(ItemKind::Challenge, "a"));
  }

  #[test]
  fn lesson_and_challenge_ids_are_separate() {
    let mut p = LearnerProgress::default();
    let reward = Reward { diamonds: 1, experience: 1 };
    assert!(p.claim(ItemKind::Lesson, "x", reward));
    assert!(p.claim(ItemKind::Challenge, "x", reward));
    assert_eq!(p.diamonds, 2);
  }

  #[test]
  fn level_grows_every_500_xp() {
    let mut p = LearnerProgress::default();
    assert_eq!(p.level(), 1);
    p.experience = 499;
    assert_eq!(p.level(), 1);
    p.experience = 500;
    assert_eq!(p.level(), 2);
    p.experience = 1250;
    assert_eq!(p.level(), 3);
  }
}

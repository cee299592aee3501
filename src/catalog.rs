//! Immutable content catalog: topic registry, lessons and challenges.
//!
//! Built once at startup and shared read-only. Also owns the in-memory
//! browsing helpers (grouping by topic, search, difficulty filter, paging).

use std::collections::HashMap;

use crate::domain::{Challenge, Difficulty, Lesson, TopicMeta};

pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const MAX_PAGE_SIZE: usize = 50;

#[derive(Clone, Debug, Default)]
pub struct Catalog {
  topics: Vec<TopicMeta>,
  lessons: HashMap<String, Lesson>,
  challenges: HashMap<String, Challenge>,
}

/// Lesson browsing request. `page` is 1-based.
#[derive(Clone, Debug, Default)]
pub struct LessonQuery {
  pub topic: Option<String>,
  pub search: Option<String>,
  pub difficulty: Option<Difficulty>,
  pub page: Option<usize>,
  pub page_size: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub page: usize,
  pub page_size: usize,
  pub total_items: usize,
  pub total_pages: usize,
}

impl Catalog {
  /// Add a topic unless one with the same slug is registered. Returns whether it was added.
  pub fn register_topic(&mut self, topic: TopicMeta) -> bool {
    if self.topics.iter().any(|t| t.slug == topic.slug) {
      return false;
    }
    self.topics.push(topic);
    true
  }

  /// Insert unless the id is taken; earlier sources win.
  pub fn insert_lesson(&mut self, lesson: Lesson) -> bool {
    if self.lessons.contains_key(&lesson.id) {
      return false;
    }
    self.lessons.insert(lesson.id.clone(), lesson);
    true
  }

  pub fn insert_challenge(&mut self, challenge: Challenge) -> bool {
    if self.challenges.contains_key(&challenge.id) {
      return false;
    }
    self.challenges.insert(challenge.id.clone(), challenge);
    true
  }

  pub fn lesson(&self, id: &str) -> Option<&Lesson> {
    self.lessons.get(id)
  }

  pub fn challenge(&self, id: &str) -> Option<&Challenge> {
    self.challenges.get(id)
  }

  /// Registry topics in registration order, then topics that only exist
  /// through their content (fallback metadata, sorted by slug).
  pub fn topics(&self) -> Vec<TopicMeta> {
    let mut out = self.topics.clone();
    let mut orphans: Vec<&str> = self
      .lessons
      .values()
      .map(|l| l.topic.as_str())
      .chain(self.challenges.values().map(|c| c.topic.as_str()))
      .filter(|slug| !self.topics.iter().any(|t| t.slug == *slug))
      .collect();
    orphans.sort_unstable();
    orphans.dedup();
    out.extend(orphans.into_iter().map(TopicMeta::fallback));
    out
  }

  pub fn topic(&self, slug: &str) -> Option<TopicMeta> {
    self.topics().into_iter().find(|t| t.slug == slug)
  }

  pub fn lessons_for(&self, topic: &str) -> Vec<&Lesson> {
    let mut lessons: Vec<&Lesson> = self.lessons.values().filter(|l| l.topic == topic).collect();
    lessons.sort_by(|a, b| (a.order, &a.title, &a.id).cmp(&(b.order, &b.title, &b.id)));
    lessons
  }

  pub fn challenges_for(&self, topic: &str) -> Vec<&Challenge> {
    let mut challenges: Vec<&Challenge> = self.challenges.values().filter(|c| c.topic == topic).collect();
    challenges.sort_by(|a, b| (a.order, &a.title, &a.id).cmp(&(b.order, &b.title, &b.id)));
    challenges
  }

  /// Every lesson, grouped by topic in `topics()` order.
  pub fn all_lessons(&self) -> Vec<&Lesson> {
    self.topics().iter().flat_map(|t| self.lessons_for(&t.slug)).collect()
  }

  pub fn all_challenges(&self) -> Vec<&Challenge> {
    self.topics().iter().flat_map(|t| self.challenges_for(&t.slug)).collect()
  }

  pub fn lesson_count(&self) -> usize {
    self.lessons.len()
  }

  pub fn challenge_count(&self) -> usize {
    self.challenges.len()
  }

  /// Filter by topic, difficulty and a case-insensitive search over title and
  /// content, then cut out the requested page.
  pub fn search_lessons(&self, query: &LessonQuery) -> Page<&Lesson> {
    let needle = query
      .search
      .as_deref()
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .map(str::to_lowercase);

    let candidates = match &query.topic {
      Some(topic) => self.lessons_for(topic),
      None => self.all_lessons(),
    };
    let matches: Vec<&Lesson> = candidates
      .into_iter()
      .filter(|l| query.difficulty.map_or(true, |d| l.difficulty == d))
      .filter(|l| {
        needle.as_deref().map_or(true, |n| {
          l.title.to_lowercase().contains(n) || l.content.to_lowercase().contains(n)
        })
      })
      .collect();

    paginate(matches, query.page, query.page_size)
  }
}

pub fn paginate<T>(items: Vec<T>, page: Option<usize>, page_size: Option<usize>) -> Page<T> {
  let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
  let total_items = items.len();
  let total_pages = total_items.div_ceil(page_size).max(1);
  let page = page.unwrap_or(1).clamp(1, total_pages);
  let items = items.into_iter().skip((page - 1) * page_size).take(page_size).collect();
  Page { items, page, page_size, total_items, total_pages }
}

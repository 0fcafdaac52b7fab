use serde::{Deserialize, Serialize};

use crate::constants::syllabi::default_topics;
use crate::models::domain::tutoring::ExamContext;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SyllabusItem {
    pub topic: String,
    pub completed: bool,
}

impl SyllabusItem {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            completed: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SyllabusProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

/// Ordered checklist of topics. Duplicate topics are allowed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Syllabus {
    items: Vec<SyllabusItem>,
}

impl Syllabus {
    pub fn for_exam(exam: ExamContext) -> Self {
        Self {
            items: default_topics(exam)
                .iter()
                .map(|topic| SyllabusItem::new(*topic))
                .collect(),
        }
    }

    pub fn items(&self) -> &[SyllabusItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, topic: impl Into<String>) {
        self.items.push(SyllabusItem::new(topic));
    }

    pub fn remove(&mut self, index: usize) -> Option<SyllabusItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Flips the completion flag and returns the updated item.
    pub fn toggle(&mut self, index: usize) -> Option<&SyllabusItem> {
        let item = self.items.get_mut(index)?;
        item.completed = !item.completed;
        Some(item)
    }

    pub fn progress(&self) -> SyllabusProgress {
        let total = self.items.len();
        let completed = self.items.iter().filter(|item| item.completed).count();
        let percent = if total == 0 {
            0
        } else {
            (completed * 100 / total) as u8
        };

        SyllabusProgress {
            completed,
            total,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_syllabus_follows_exam() {
        let upsc = Syllabus::for_exam(ExamContext::Upsc);
        let school = Syllabus::for_exam(ExamContext::School);

        assert_eq!(upsc.len(), 3);
        assert_eq!(upsc.items()[0].topic, "Indian Polity (Articles)");
        assert_eq!(school.items()[1].topic, "Newton's Laws (Physics)");
        assert!(upsc.items().iter().all(|item| !item.completed));
    }

    #[test]
    fn add_appends_incomplete_item_and_allows_duplicates() {
        let mut syllabus = Syllabus::for_exam(ExamContext::General);

        syllabus.add("Blockchain");

        assert_eq!(syllabus.len(), 4);
        assert_eq!(syllabus.items()[3], SyllabusItem::new("Blockchain"));
    }

    #[test]
    fn remove_out_of_range_leaves_syllabus_untouched() {
        let mut syllabus = Syllabus::for_exam(ExamContext::Ssc);

        assert!(syllabus.remove(3).is_none());
        assert_eq!(syllabus.len(), 3);

        let removed = syllabus.remove(0).expect("index 0 exists");
        assert_eq!(removed.topic, "Number System");
        assert_eq!(syllabus.items()[0].topic, "Reasoning Analogies");
    }

    #[test]
    fn toggle_flips_completion() {
        let mut syllabus = Syllabus::for_exam(ExamContext::Upsc);

        assert!(syllabus.toggle(1).expect("index 1 exists").completed);
        assert!(!syllabus.toggle(1).expect("index 1 exists").completed);
        assert!(syllabus.toggle(7).is_none());
    }

    #[test]
    fn progress_floors_percentage() {
        let mut syllabus = Syllabus::for_exam(ExamContext::Upsc);
        assert_eq!(syllabus.progress().percent, 0);

        syllabus.toggle(0);
        let progress = syllabus.progress();
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.percent, 33);

        syllabus.toggle(1);
        syllabus.toggle(2);
        assert_eq!(syllabus.progress().percent, 100);
    }

    #[test]
    fn empty_syllabus_reports_zero_progress() {
        let syllabus = Syllabus::default();
        assert_eq!(
            syllabus.progress(),
            SyllabusProgress {
                completed: 0,
                total: 0,
                percent: 0
            }
        );
    }
}

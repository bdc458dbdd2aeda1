use std::cmp::Ordering;

use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::task::Task;

/// Ordered task slots. Indices are what the user types, so removal blanks
/// a slot in place instead of shifting the tail down.
#[derive(Debug, Default)]
pub struct Store {
    slots: Vec<Task>,
}

impl Store {
    pub fn from_slots(slots: Vec<Task>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[Task] {
        &self.slots
    }

    /// Place the task in the first free slot, or grow by one. Returns the
    /// index the task landed on.
    pub fn append(&mut self, task: Task) -> usize {
        match self.slots.iter().position(Task::is_empty) {
            Some(idx) => {
                self.slots[idx] = task;
                idx
            }
            None => {
                self.slots.push(task);
                self.slots.len() - 1
            }
        }
    }

    pub fn fetch(&self, idx: usize) -> Result<&Task> {
        match self.slots.get(idx) {
            Some(task) => Ok(task),
            None => bail!("index ({idx}) cannot be found"),
        }
    }

    /// Blank the slot and hand back what was in it.
    pub fn remove(&mut self, idx: usize) -> Result<Task> {
        self.fetch(idx)?;
        Ok(std::mem::take(&mut self.slots[idx]))
    }

    /// Move a slot into another store; this index becomes free, the task
    /// lands on whatever index the other store hands out.
    pub fn move_to(&mut self, idx: usize, other: &mut Store) -> Result<Task> {
        let task = self.remove(idx)?;
        other.append(task.clone());
        Ok(task)
    }

    /// Non-empty entries with their slot indices, in display order:
    /// due dates ascending (dateless tasks last), then a stable pass
    /// pulling prioritized tasks to the front. A filter date keeps only
    /// tasks due that day, plus every prioritized task.
    pub fn list_view(&self, filter: Option<NaiveDate>) -> Vec<(usize, &Task)> {
        let mut view: Vec<(usize, &Task)> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, task)| !task.is_empty())
            .filter(|(_, task)| match filter {
                Some(date) => task.due == Some(date) || task.prioritized,
                None => true,
            })
            .collect();
        view.sort_by(|(_, a), (_, b)| match (a.due, b.due) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        view.sort_by_key(|(_, task)| !task.prioritized);
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, m, d)
    }

    fn plain(text: &str) -> Task {
        Task::new(text, false, None)
    }

    #[test]
    fn append_grows_when_no_slot_is_free() {
        let mut store = Store::default();
        assert_eq!(store.append(plain("x")), 0);
        assert_eq!(store.append(plain("y")), 1);
    }

    #[test]
    fn append_reuses_the_first_free_slot() {
        let mut store = Store::default();
        store.append(plain("x"));
        store.append(plain("y"));
        store.remove(0).unwrap();
        assert_eq!(store.append(plain("z")), 0);
        assert_eq!(store.fetch(0).unwrap().text, "z");
    }

    #[test]
    fn remove_keeps_other_indices_stable() {
        let mut store = Store::default();
        store.append(plain("x"));
        store.append(plain("y"));
        store.append(plain("z"));
        let removed = store.remove(1).unwrap();
        assert_eq!(removed.text, "y");
        assert!(store.fetch(1).unwrap().is_empty());
        assert_eq!(store.fetch(0).unwrap().text, "x");
        assert_eq!(store.fetch(2).unwrap().text, "z");
    }

    #[test]
    fn fetch_out_of_range_is_an_error() {
        let store = Store::default();
        assert!(store.fetch(0).is_err());
    }

    #[test]
    fn move_to_frees_the_source_slot() {
        let mut todo = Store::default();
        let mut done = Store::default();
        todo.append(plain("a"));
        let moved = todo.move_to(0, &mut done).unwrap();
        assert_eq!(moved.text, "a");
        assert!(todo.fetch(0).unwrap().is_empty());
        assert_eq!(done.fetch(0).unwrap().text, "a");
    }

    #[test]
    fn list_view_sorts_dates_then_priority() {
        let mut store = Store::default();
        store.append(plain("late"));
        store.append(Task::new("soon", false, date(6, 11)));
        store.append(Task::new("urgent", true, None));
        store.append(Task::new("sooner", false, date(6, 10)));

        let texts: Vec<&str> = store
            .list_view(None)
            .iter()
            .map(|(_, task)| task.text.as_str())
            .collect();
        assert_eq!(texts, ["urgent", "sooner", "soon", "late"]);
    }

    #[test]
    fn list_view_skips_empty_slots_but_keeps_indices() {
        let mut store = Store::default();
        store.append(plain("x"));
        store.append(plain("y"));
        store.remove(0).unwrap();
        let view = store.list_view(None);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].0, 1);
    }

    #[test]
    fn filter_keeps_matching_dates_and_all_prioritized() {
        let mut store = Store::default();
        store.append(Task::new("A", false, date(6, 9)));
        store.append(Task::new("B", false, date(6, 10)));
        store.append(Task::new("C", true, None));
        store.append(plain("D"));

        let texts: Vec<&str> = store
            .list_view(date(6, 10))
            .iter()
            .map(|(_, task)| task.text.as_str())
            .collect();
        assert_eq!(texts, ["C", "B"]);
    }
}

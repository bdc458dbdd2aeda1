use std::{fs, path::Path};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::date::DateFormat;
use crate::store::Store;
use crate::task::Task;

/// A missing file is a store with no slots.
pub fn load(path: &Path, fmt: &DateFormat, today: NaiveDate) -> Result<Store> {
    if !path.exists() {
        return Ok(Store::default());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read file '{}'", path.display()))?;
    let slots = text
        .split('\n')
        .map(|line| Task::from_line(line, fmt, today))
        .collect::<Result<Vec<_>>>()?;
    Ok(Store::from_slots(slots))
}

/// Write every slot back, empty slots as empty lines, so indices survive
/// the round trip. The file is replaced via a temp file and rename.
pub fn save(path: &Path, store: &Store, fmt: &DateFormat) -> Result<()> {
    let text = store
        .slots()
        .iter()
        .map(|task| task.to_line(fmt))
        .collect::<Vec<_>>()
        .join("\n");
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("could not write file '{}'", path.display()))?;
    }
    let tmp = path.with_extension("txt.tmp");
    fs::write(&tmp, text)
        .with_context(|| format!("could not write file '{}'", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("could not write file '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt() -> DateFormat {
        DateFormat::default()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn missing_file_loads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = load(&dir.path().join("todo.txt"), &fmt(), today()).unwrap();
        assert!(store.slots().is_empty());
    }

    #[test]
    fn save_then_load_preserves_slots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo.txt");

        let mut store = Store::default();
        store.append(Task::new("x", false, None));
        store.append(Task::new("y", true, NaiveDate::from_ymd_opt(2024, 6, 15)));
        store.remove(0).unwrap();
        save(&path, &store, &fmt()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "\n* [15-06-2024] y");

        let loaded = load(&path, &fmt(), today()).unwrap();
        assert!(loaded.fetch(0).unwrap().is_empty());
        assert_eq!(loaded.fetch(1).unwrap().text, "y");
    }

    #[test]
    fn blank_lines_keep_their_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo.txt");
        fs::write(&path, "a\n\nb").unwrap();

        let store = load(&path, &fmt(), today()).unwrap();
        assert_eq!(store.slots().len(), 3);
        assert!(store.fetch(1).unwrap().is_empty());
        assert_eq!(store.fetch(2).unwrap().text, "b");
    }

    #[test]
    fn load_fails_on_malformed_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo.txt");
        fs::write(&path, "[not-a-date] x").unwrap();
        assert!(load(&path, &fmt(), today()).is_err());
    }
}

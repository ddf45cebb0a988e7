// Registry module: the in-memory "database" of widget names. It is a
// plain set wrapped in a small type so handlers receive it as an owned,
// injectable value instead of reaching for a global.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Widget names are alphanumeric, 1 to 64 characters.
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]{1,64}$").expect("valid name pattern"));

/// Error type for all registry operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid widget name")]
    Validation,

    #[error("Widget '{name}' already exists")]
    Conflict { name: String },

    #[error("Widget '{name}' not found")]
    NotFound { name: String },
}

pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Returns whether `name` matches the allowed widget name pattern.
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// The authoritative set of widget names. Starts empty at server start and
/// lives for the lifetime of the process; uniqueness is guaranteed by the
/// underlying `HashSet`.
#[derive(Debug, Default)]
pub struct Registry {
    names: HashSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every widget name currently registered. No ordering is
    /// guaranteed.
    pub fn list(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }

    /// Adds a new widget. Fails with `Validation` if the name is malformed
    /// and `Conflict` if it is already registered.
    pub fn create(&mut self, name: &str) -> RegistryResult<String> {
        if !is_valid_name(name) {
            return Err(RegistryError::Validation);
        }
        if self.names.contains(name) {
            return Err(RegistryError::Conflict {
                name: name.to_string(),
            });
        }
        self.names.insert(name.to_string());
        Ok(name.to_string())
    }

    /// Renames an existing widget. The new name is validated first, then
    /// the old name must exist and the new one must not. Both mutations
    /// happen inside this one call, so the set never holds an
    /// intermediate state visible to other handlers.
    pub fn rename(&mut self, old: &str, new: &str) -> RegistryResult<String> {
        if !is_valid_name(new) {
            return Err(RegistryError::Validation);
        }
        if !self.names.contains(old) {
            return Err(RegistryError::NotFound {
                name: old.to_string(),
            });
        }
        if self.names.contains(new) {
            return Err(RegistryError::Conflict {
                name: new.to_string(),
            });
        }
        self.names.remove(old);
        self.names.insert(new.to_string());
        Ok(new.to_string())
    }

    /// Removes one widget, or every widget when `name` is the sentinel
    /// `"all"`. A widget literally named `all` can only disappear via the
    /// full clear.
    pub fn delete(&mut self, name: &str) -> RegistryResult<()> {
        if name == "all" {
            self.names.clear();
            return Ok(());
        }
        if !self.names.remove(name) {
            return Err(RegistryError::NotFound {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_list_contains_name_once() {
        let mut reg = Registry::new();
        reg.create("Foo1").unwrap();
        let names = reg.list();
        assert_eq!(names.iter().filter(|n| *n == "Foo1").count(), 1);
    }

    #[test]
    fn create_duplicate_is_conflict_and_leaves_registry_unchanged() {
        let mut reg = Registry::new();
        reg.create("Foo1").unwrap();
        let err = reg.create("Foo1").unwrap_err();
        assert_eq!(
            err,
            RegistryError::Conflict {
                name: "Foo1".into()
            }
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn create_rejects_malformed_names() {
        let mut reg = Registry::new();
        assert_eq!(reg.create("").unwrap_err(), RegistryError::Validation);
        assert_eq!(reg.create("has space").unwrap_err(), RegistryError::Validation);
        assert_eq!(reg.create("semi;colon").unwrap_err(), RegistryError::Validation);
        assert_eq!(reg.create("über").unwrap_err(), RegistryError::Validation);
        let too_long = "a".repeat(65);
        assert_eq!(reg.create(&too_long).unwrap_err(), RegistryError::Validation);
        assert!(reg.is_empty());
    }

    #[test]
    fn create_accepts_boundary_lengths() {
        let mut reg = Registry::new();
        reg.create("a").unwrap();
        let max = "A".repeat(64);
        reg.create(&max).unwrap();
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn rename_absent_name_is_not_found() {
        let mut reg = Registry::new();
        let err = reg.rename("ghost", "Bar2").unwrap_err();
        assert_eq!(
            err,
            RegistryError::NotFound {
                name: "ghost".into()
            }
        );
    }

    #[test]
    fn rename_to_existing_name_is_conflict_and_keeps_old_name() {
        let mut reg = Registry::new();
        reg.create("Foo1").unwrap();
        reg.create("Bar2").unwrap();
        let err = reg.rename("Foo1", "Bar2").unwrap_err();
        assert_eq!(
            err,
            RegistryError::Conflict {
                name: "Bar2".into()
            }
        );
        assert!(reg.list().contains(&"Foo1".to_string()));
    }

    #[test]
    fn rename_validates_new_name_before_lookups() {
        let mut reg = Registry::new();
        // old name does not exist either, but validation wins
        assert_eq!(
            reg.rename("ghost", "bad name").unwrap_err(),
            RegistryError::Validation
        );
    }

    #[test]
    fn rename_swaps_names() {
        let mut reg = Registry::new();
        reg.create("Foo1").unwrap();
        assert_eq!(reg.rename("Foo1", "Bar2").unwrap(), "Bar2");
        let names = reg.list();
        assert!(!names.contains(&"Foo1".to_string()));
        assert!(names.contains(&"Bar2".to_string()));
    }

    #[test]
    fn delete_all_empties_registry() {
        let mut reg = Registry::new();
        for name in ["a", "b", "c"] {
            reg.create(name).unwrap();
        }
        reg.delete("all").unwrap();
        assert!(reg.is_empty());
        // clearing an already empty registry is still fine
        reg.delete("all").unwrap();
    }

    #[test]
    fn delete_absent_name_is_not_found() {
        let mut reg = Registry::new();
        let err = reg.delete("ghost").unwrap_err();
        assert_eq!(
            err,
            RegistryError::NotFound {
                name: "ghost".into()
            }
        );
    }

    #[test]
    fn delete_removes_single_name() {
        let mut reg = Registry::new();
        reg.create("Foo1").unwrap();
        reg.create("Bar2").unwrap();
        reg.delete("Foo1").unwrap();
        assert_eq!(reg.list(), vec!["Bar2".to_string()]);
    }

    #[test]
    fn widget_named_all_is_only_removed_by_clearing() {
        let mut reg = Registry::new();
        reg.create("all").unwrap();
        reg.create("other").unwrap();
        reg.delete("all").unwrap();
        assert!(reg.is_empty());
    }
}

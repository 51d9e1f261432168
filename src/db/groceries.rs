//! Per-user grocery storage and the sharing propagation routine.
//!
//! Each user owns one `<username>_groceries.json` file in the data
//! directory holding a JSON array of their items. Every operation is a
//! whole-file read-modify-write. Sharing copies items between files:
//! a shared item becomes an independent copy in each recipient's file with
//! no link back to the original.
//!
//! There is no locking and no multi-file atomicity. Concurrent requests
//! touching the same file are last-writer-wins, and a failure after the
//! owner's file is written but before a recipient's file is written leaves
//! the two views inconsistent: propagation aborts fail-fast and
//! already-written files stay written.

use crate::types::{AppError, GroceryItem, Result};
use std::fs;
use std::path::{Path, PathBuf};

const FILE_SUFFIX: &str = "_groceries.json";

/// File-backed store of per-user grocery lists.
#[derive(Debug, Clone)]
pub struct GroceryStore {
    /// Directory holding `users.json` and the per-user grocery files.
    data_dir: PathBuf,
}

impl GroceryStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }

    fn user_file(&self, username: &str) -> PathBuf {
        self.data_dir.join(format!("{}{}", username, FILE_SUFFIX))
    }

    /// Adds an item to the owner's list and propagates copies to recipients.
    ///
    /// The owner's own name is stripped from `shared_with` before anything
    /// is written. Item names are unique per owner, compared
    /// case-insensitively. Each recipient gets a copy unless an item of the
    /// same name already exists in their file; a missing recipient file is
    /// created with just this item. Returns the normalized item.
    pub fn add(&self, mut item: GroceryItem) -> Result<GroceryItem> {
        let owner = item.owner.clone();
        item.shared_with
            .retain(|u| !u.eq_ignore_ascii_case(&owner));

        let path = self.user_file(&owner);
        let mut items = self.read_list(&path, &owner, "add")?.unwrap_or_default();

        if items.iter().any(|g| g.name.eq_ignore_ascii_case(&item.name)) {
            return Err(AppError::Conflict(
                "Item already exists in the grocery list".to_string(),
            ));
        }

        items.push(item.clone());
        self.write_list(&path, &items, &owner, "add")?;

        for recipient in &item.shared_with {
            let recipient_path = self.user_file(recipient);
            let mut recipient_items = self
                .read_list(&recipient_path, recipient, "add")?
                .unwrap_or_default();

            if !recipient_items
                .iter()
                .any(|g| g.name.eq_ignore_ascii_case(&item.name))
            {
                recipient_items.push(item.clone());
                self.write_list(&recipient_path, &recipient_items, recipient, "add")?;
            }
        }

        Ok(item)
    }

    /// Deletes the owner's item matching `name` (case-insensitive) and
    /// removes any same-named item from each recipient file it was shared
    /// with.
    ///
    /// Recipient cleanup is best-effort: missing recipient files are
    /// skipped, and a copy that was independently renamed is orphaned.
    /// Returns the removed item.
    pub fn delete(&self, owner: &str, name: &str) -> Result<GroceryItem> {
        let path = self.user_file(owner);
        let mut items = self.read_list(&path, owner, "delete")?.ok_or_else(|| {
            AppError::NotFound("User groceries file not found".to_string())
        })?;

        let position = items
            .iter()
            .position(|g| g.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                AppError::NotFound(format!("Grocery item '{}' not found", name))
            })?;

        let removed = items.remove(position);
        self.write_list(&path, &items, owner, "delete")?;

        for recipient in &removed.shared_with {
            let recipient_path = self.user_file(recipient);
            let Some(mut recipient_items) =
                self.read_list(&recipient_path, recipient, "delete")?
            else {
                continue;
            };

            let before = recipient_items.len();
            recipient_items.retain(|g| !g.name.eq_ignore_ascii_case(name));
            if recipient_items.len() != before {
                self.write_list(&recipient_path, &recipient_items, recipient, "delete")?;
            }
        }

        Ok(removed)
    }

    /// Returns the owner's items plus every item in other users' files
    /// whose `shared_with` names the owner (case-insensitive).
    ///
    /// An empty result is a legitimate empty list, not an error.
    pub fn list(&self, owner: &str) -> Result<Vec<GroceryItem>> {
        let mut all = self
            .read_list(&self.user_file(owner), owner, "list")?
            .unwrap_or_default();

        let entries = fs::read_dir(&self.data_dir).map_err(|e| {
            tracing::error!(error = %e, user = owner, op = "list", "failed to scan data directory");
            AppError::Storage(format!("Failed to read groceries: {}", e))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                tracing::error!(error = %e, user = owner, op = "list", "failed to scan data directory");
                AppError::Storage(format!("Failed to read groceries: {}", e))
            })?;

            let file_name = entry.file_name();
            let Some(other) = file_name
                .to_str()
                .and_then(|n| n.strip_suffix(FILE_SUFFIX))
            else {
                continue;
            };
            if other == owner {
                continue;
            }

            if let Some(items) = self.read_list(&entry.path(), other, "list")? {
                all.extend(items.into_iter().filter(|g| {
                    g.shared_with.iter().any(|u| u.eq_ignore_ascii_case(owner))
                }));
            }
        }

        Ok(all)
    }

    /// Shares the owner's entire current list with the given users.
    ///
    /// Every item in the owner's file gains each target in `shared_with`
    /// unless the target is already listed or is the item's owner (both
    /// compared case-insensitively). Re-running the same call is a no-op.
    pub fn share(&self, owner: &str, targets: &[String]) -> Result<()> {
        let path = self.user_file(owner);
        let mut items = self.read_list(&path, owner, "share")?.ok_or_else(|| {
            AppError::NotFound("Grocery list not found for user".to_string())
        })?;

        for item in &mut items {
            for target in targets {
                if !item
                    .shared_with
                    .iter()
                    .any(|u| u.eq_ignore_ascii_case(target))
                    && !item.owner.eq_ignore_ascii_case(target)
                {
                    item.shared_with.push(target.clone());
                }
            }
        }

        self.write_list(&path, &items, owner, "share")
    }

    /// Loads one grocery file. `Ok(None)` means the file does not exist.
    fn read_list(&self, path: &Path, username: &str, op: &str) -> Result<Option<Vec<GroceryItem>>> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                tracing::error!(error = %e, user = username, op, "failed to read grocery file");
                return Err(AppError::Storage(format!("Failed to read groceries: {}", e)));
            }
        };

        serde_json::from_str(&data).map(Some).map_err(|e| {
            tracing::error!(error = %e, user = username, op, "failed to parse grocery file");
            AppError::Storage(format!("Failed to parse groceries: {}", e))
        })
    }

    fn write_list(&self, path: &Path, items: &[GroceryItem], username: &str, op: &str) -> Result<()> {
        let data = serde_json::to_string_pretty(items).map_err(|e| {
            tracing::error!(error = %e, user = username, op, "failed to serialize grocery file");
            AppError::Storage(format!("Failed to serialize groceries: {}", e))
        })?;

        fs::write(path, data).map_err(|e| {
            tracing::error!(error = %e, user = username, op, "failed to write grocery file");
            AppError::Storage(format!("Failed to write groceries: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn item(name: &str, owner: &str, shared_with: &[&str]) -> GroceryItem {
        GroceryItem {
            name: name.to_string(),
            price: 2.49,
            supermarket: "Jumbo".to_string(),
            owner: owner.to_string(),
            shared_with: shared_with.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_add_creates_owner_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = GroceryStore::new(temp_dir.path());

        let added = store.add(item("Milk", "alice", &[])).unwrap();
        assert_eq!(added.name, "Milk");

        let listed = store.list("alice").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].owner, "alice");
        assert_eq!(listed[0].supermarket, "Jumbo");
    }

    #[test]
    fn test_add_strips_self_share() {
        let temp_dir = TempDir::new().unwrap();
        let store = GroceryStore::new(temp_dir.path());

        // "ALICE" is the owner in a different casing, must be dropped too.
        let added = store.add(item("Milk", "alice", &["bob", "ALICE"])).unwrap();

        assert_eq!(added.shared_with, vec!["bob".to_string()]);

        let bobs = store.list("bob").unwrap();
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].owner, "alice");
        assert_eq!(bobs[0].shared_with, vec!["bob".to_string()]);
    }

    #[test]
    fn test_add_duplicate_name_is_case_insensitive_conflict() {
        let temp_dir = TempDir::new().unwrap();
        let store = GroceryStore::new(temp_dir.path());

        store.add(item("Milk", "alice", &[])).unwrap();
        let err = store.add(item("milk", "alice", &[])).unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.list("alice").unwrap().len(), 1);
    }

    #[test]
    fn test_add_propagation_is_idempotent_merge() {
        let temp_dir = TempDir::new().unwrap();
        let store = GroceryStore::new(temp_dir.path());

        // Bob already owns an item named "Milk".
        store.add(item("Milk", "bob", &[])).unwrap();
        store.add(item("MILK", "alice", &["bob"])).unwrap();

        // Bob keeps his own entry; the copy is not merged on top of it.
        let bobs_own: Vec<_> = store
            .list("bob")
            .unwrap()
            .into_iter()
            .filter(|g| g.owner == "bob")
            .collect();
        assert_eq!(bobs_own.len(), 1);

        let raw =
            std::fs::read_to_string(temp_dir.path().join("bob_groceries.json")).unwrap();
        let in_file: Vec<GroceryItem> = serde_json::from_str(&raw).unwrap();
        assert_eq!(in_file.len(), 1, "no duplicate copy in bob's file");
    }

    #[test]
    fn test_delete_removes_from_owner_and_recipients() {
        let temp_dir = TempDir::new().unwrap();
        let store = GroceryStore::new(temp_dir.path());

        store.add(item("Milk", "alice", &["bob", "carol"])).unwrap();
        store.add(item("Eggs", "alice", &["bob"])).unwrap();

        let removed = store.delete("alice", "milk").unwrap();
        assert_eq!(removed.name, "Milk");

        assert!(store.list("alice").unwrap().iter().all(|g| g.name != "Milk"));
        assert!(store.list("bob").unwrap().iter().all(|g| g.name != "Milk"));
        assert!(store.list("carol").unwrap().iter().all(|g| g.name != "Milk"));

        // The unrelated item is untouched.
        assert!(store.list("bob").unwrap().iter().any(|g| g.name == "Eggs"));
    }

    #[test]
    fn test_delete_skips_missing_recipient_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = GroceryStore::new(temp_dir.path());

        store.add(item("Milk", "alice", &["bob"])).unwrap();
        std::fs::remove_file(temp_dir.path().join("bob_groceries.json")).unwrap();

        // Best-effort propagation: the missing file is not an error.
        store.delete("alice", "Milk").unwrap();
        assert!(store.list("alice").unwrap().is_empty());
    }

    #[test]
    fn test_delete_unknown_item_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = GroceryStore::new(temp_dir.path());

        let err = store.delete("alice", "Milk").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        store.add(item("Eggs", "alice", &[])).unwrap();
        let err = store.delete("alice", "Milk").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_list_includes_items_shared_by_others() {
        let temp_dir = TempDir::new().unwrap();
        let store = GroceryStore::new(temp_dir.path());

        store.add(item("Milk", "alice", &[])).unwrap();
        store.add(item("Bread", "bob", &["Alice"])).unwrap();
        store.add(item("Beer", "bob", &[])).unwrap();

        // "Alice" in bob's sharedWith matches the caller case-insensitively.
        let listed = store.list("alice").unwrap();
        let names: Vec<_> = listed.iter().map(|g| g.name.as_str()).collect();
        assert!(names.contains(&"Milk"));
        assert!(names.contains(&"Bread"));
        assert!(!names.contains(&"Beer"));
    }

    #[test]
    fn test_list_with_nothing_is_empty_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = GroceryStore::new(temp_dir.path());

        assert!(store.list("alice").unwrap().is_empty());
    }

    #[test]
    fn test_share_adds_targets_to_every_item() {
        let temp_dir = TempDir::new().unwrap();
        let store = GroceryStore::new(temp_dir.path());

        store.add(item("Milk", "alice", &[])).unwrap();
        store.add(item("Eggs", "alice", &["carol"])).unwrap();

        store.share("alice", &["carol".to_string(), "dave".to_string()]).unwrap();

        for g in store.list("alice").unwrap() {
            assert!(g.shared_with.iter().any(|u| u == "carol"));
            assert!(g.shared_with.iter().any(|u| u == "dave"));
            // carol was already on Eggs and must not be listed twice
            assert_eq!(
                g.shared_with.iter().filter(|u| u.as_str() == "carol").count(),
                1
            );
        }
    }

    #[test]
    fn test_share_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = GroceryStore::new(temp_dir.path());

        store.add(item("Milk", "alice", &[])).unwrap();

        store.share("alice", &["carol".to_string()]).unwrap();
        let first = std::fs::read_to_string(temp_dir.path().join("alice_groceries.json")).unwrap();

        store.share("alice", &["carol".to_string()]).unwrap();
        let second = std::fs::read_to_string(temp_dir.path().join("alice_groceries.json")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_share_never_targets_the_owner() {
        let temp_dir = TempDir::new().unwrap();
        let store = GroceryStore::new(temp_dir.path());

        store.add(item("Milk", "alice", &[])).unwrap();
        store.share("alice", &["ALICE".to_string(), "bob".to_string()]).unwrap();

        let listed = store.list("alice").unwrap();
        assert_eq!(listed[0].shared_with, vec!["bob".to_string()]);
    }

    #[test]
    fn test_share_without_a_list_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = GroceryStore::new(temp_dir.path());

        let err = store.share("alice", &["bob".to_string()]).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

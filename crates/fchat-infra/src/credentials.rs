//! Flat-file credential store.
//!
//! Usernames and passwords live in two parallel text files under the data
//! directory: line N of `user.txt` pairs with line N of `password.txt`. The
//! files are append-only. An in-memory username -> password index is built
//! from them at startup and stays authoritative for the life of the process;
//! a single write lock spans the duplicate check, both file appends, and the
//! index insert, so concurrent registrations can neither claim the same
//! username twice nor interleave their lines.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use fchat_core::auth::store::CredentialStore;
use fchat_types::error::CredentialError;

const USERNAME_FILE: &str = "user.txt";
const PASSWORD_FILE: &str = "password.txt";

/// Credential store backed by `user.txt` and `password.txt`.
pub struct FlatFileCredentialStore {
    username_path: PathBuf,
    password_path: PathBuf,
    index: RwLock<HashMap<String, String>>,
}

impl FlatFileCredentialStore {
    /// Open a store rooted at `dir`, creating the directory if needed and
    /// loading any existing records.
    ///
    /// The credential files themselves are only created by the first
    /// registration; until then `verify` reports the store as missing.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, CredentialError> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await.map_err(fs_error)?;

        let username_path = dir.join(USERNAME_FILE);
        let password_path = dir.join(PASSWORD_FILE);
        let index = load_index(&username_path, &password_path).await?;
        tracing::debug!(
            records = index.len(),
            dir = %dir.display(),
            "credential store opened"
        );

        Ok(Self {
            username_path,
            password_path,
            index: RwLock::new(index),
        })
    }
}

impl CredentialStore for FlatFileCredentialStore {
    async fn insert(&self, username: &str, password: &str) -> Result<(), CredentialError> {
        let mut index = self.index.write().await;
        if index.contains_key(username) {
            return Err(CredentialError::DuplicateUsername);
        }

        append_line(&self.username_path, username).await?;
        append_line(&self.password_path, password).await?;
        index.insert(username.to_string(), password.to_string());
        Ok(())
    }

    async fn verify(&self, username: &str, password: &str) -> Result<bool, CredentialError> {
        let present = tokio::fs::try_exists(&self.username_path)
            .await
            .map_err(fs_error)?
            && tokio::fs::try_exists(&self.password_path)
                .await
                .map_err(fs_error)?;
        if !present {
            return Err(CredentialError::StoreMissing);
        }

        let index = self.index.read().await;
        Ok(index.get(username).is_some_and(|stored| stored == password))
    }
}

/// Pair the two files line by line. A trailing username with no matching
/// password line (or the reverse) is not a record and is ignored.
async fn load_index(
    username_path: &Path,
    password_path: &Path,
) -> Result<HashMap<String, String>, CredentialError> {
    let present = tokio::fs::try_exists(username_path).await.map_err(fs_error)?
        && tokio::fs::try_exists(password_path).await.map_err(fs_error)?;
    if !present {
        return Ok(HashMap::new());
    }

    let usernames = tokio::fs::read_to_string(username_path)
        .await
        .map_err(fs_error)?;
    let passwords = tokio::fs::read_to_string(password_path)
        .await
        .map_err(fs_error)?;

    Ok(usernames
        .lines()
        .zip(passwords.lines())
        .map(|(username, password)| (username.trim().to_string(), password.trim().to_string()))
        .collect())
}

async fn append_line(path: &Path, line: &str) -> Result<(), CredentialError> {
    let mut file = tokio::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .await
        .map_err(fs_error)?;
    file.write_all(format!("{line}\n").as_bytes())
        .await
        .map_err(fs_error)?;
    file.flush().await.map_err(fs_error)?;
    Ok(())
}

fn fs_error(err: std::io::Error) -> CredentialError {
    CredentialError::FileSystem(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn store_in(tmp: &TempDir) -> FlatFileCredentialStore {
        FlatFileCredentialStore::open(tmp.path().join("userdata"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_verify_before_any_registration_is_store_missing() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp).await;

        let err = store.verify("a@b.com", "Abcdef1!").await.unwrap_err();
        assert!(matches!(err, CredentialError::StoreMissing));
    }

    #[tokio::test]
    async fn test_insert_then_verify() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp).await;

        store.insert("a@b.com", "Abcdef1!").await.unwrap();
        assert!(store.verify("a@b.com", "Abcdef1!").await.unwrap());
        assert!(!store.verify("a@b.com", "Wrong1!aa").await.unwrap());
        assert!(!store.verify("other@b.com", "Abcdef1!").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_appends_one_line_per_file() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp).await;

        store.insert("a@b.com", "Abcdef1!").await.unwrap();
        store.insert("c@d.com", "Zyxwvu9$").await.unwrap();

        let dir = tmp.path().join("userdata");
        let usernames = tokio::fs::read_to_string(dir.join("user.txt")).await.unwrap();
        let passwords = tokio::fs::read_to_string(dir.join("password.txt")).await.unwrap();
        assert_eq!(usernames, "a@b.com\nc@d.com\n");
        assert_eq!(passwords, "Abcdef1!\nZyxwvu9$\n");
    }

    #[tokio::test]
    async fn test_insert_duplicate_username_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp).await;

        store.insert("a@b.com", "Abcdef1!").await.unwrap();
        let err = store.insert("a@b.com", "Other9$aa").await.unwrap_err();
        assert!(matches!(err, CredentialError::DuplicateUsername));

        // No partial line was written by the rejected insert.
        let usernames = tokio::fs::read_to_string(tmp.path().join("userdata/user.txt"))
            .await
            .unwrap();
        assert_eq!(usernames, "a@b.com\n");
    }

    #[tokio::test]
    async fn test_index_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        {
            let store = store_in(&tmp).await;
            store.insert("a@b.com", "Abcdef1!").await.unwrap();
        }

        let reopened = store_in(&tmp).await;
        assert!(reopened.verify("a@b.com", "Abcdef1!").await.unwrap());
        let err = reopened.insert("a@b.com", "Other9$aa").await.unwrap_err();
        assert!(matches!(err, CredentialError::DuplicateUsername));
    }

    #[tokio::test]
    async fn test_unpaired_trailing_username_is_not_a_record() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("userdata");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("user.txt"), "a@b.com\norphan@b.com\n")
            .await
            .unwrap();
        tokio::fs::write(dir.join("password.txt"), "Abcdef1!\n")
            .await
            .unwrap();

        let store = store_in(&tmp).await;
        assert!(store.verify("a@b.com", "Abcdef1!").await.unwrap());
        assert!(!store.verify("orphan@b.com", "Abcdef1!").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_after_files_removed_is_store_missing() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp).await;
        store.insert("a@b.com", "Abcdef1!").await.unwrap();

        let dir = tmp.path().join("userdata");
        tokio::fs::remove_file(dir.join("user.txt")).await.unwrap();
        tokio::fs::remove_file(dir.join("password.txt")).await.unwrap();

        let err = store.verify("a@b.com", "Abcdef1!").await.unwrap_err();
        assert!(matches!(err, CredentialError::StoreMissing));
    }

    #[tokio::test]
    async fn test_verify_with_one_file_absent_is_store_missing() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp).await;
        store.insert("a@b.com", "Abcdef1!").await.unwrap();

        tokio::fs::remove_file(tmp.path().join("userdata/password.txt"))
            .await
            .unwrap();

        let err = store.verify("a@b.com", "Abcdef1!").await.unwrap_err();
        assert!(matches!(err, CredentialError::StoreMissing));
    }
}

//! Contact book: append-only CSV persistence
//!
//! Contacts live in `<data-folder>/contacts.csv` with a `Name,Phone,Email`
//! header row. Saves serialize behind a mutex; each save opens the file
//! in append mode, writes the header iff the file is empty, appends one
//! row, and flushes. Listing tolerates a missing file.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

/// One saved contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Contact store errors
#[derive(Debug, Error)]
pub enum ContactError {
    /// Save rejected: the contact has no name
    #[error("Please enter a contact name")]
    MissingName,

    /// Save rejected: neither phone nor email given
    #[error("Please enter at least one contact detail (phone or email)")]
    MissingDetail,

    /// Underlying file I/O failure
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding/decoding failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Append-only contact book backed by a CSV file
#[derive(Debug)]
pub struct ContactStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ContactStore {
    /// Store over `<data_folder>/contacts.csv`; the file is created on
    /// first save
    pub fn new(data_folder: &Path) -> Self {
        ContactStore {
            path: data_folder.join("contacts.csv"),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate and append one contact.
    ///
    /// A contact needs a non-empty name and at least one of phone or
    /// email; the unused detail is stored as an empty string.
    pub async fn save(&self, contact: &Contact) -> Result<(), ContactError> {
        if contact.name.is_empty() {
            return Err(ContactError::MissingName);
        }
        if contact.phone.is_empty() && contact.email.is_empty() {
            return Err(ContactError::MissingDetail);
        }

        let _guard = self.write_lock.lock().await;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let write_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if write_header {
            writer.write_record(["Name", "Phone", "Email"])?;
        }
        writer.write_record([&contact.name, &contact.phone, &contact.email])?;
        writer.flush()?;

        info!("Saved contact: {}", contact.name);
        Ok(())
    }

    /// All saved contacts in save order; a missing file is an empty book
    pub async fn list(&self) -> Result<Vec<Contact>, ContactError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;
        let mut contacts = Vec::new();
        for record in reader.records() {
            let record = record?;
            contacts.push(Contact {
                name: record.get(0).unwrap_or_default().to_string(),
                phone: record.get(1).unwrap_or_default().to_string(),
                email: record.get(2).unwrap_or_default().to_string(),
            });
        }
        Ok(contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ContactStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ContactStore::new(dir.path());
        (dir, store)
    }

    fn contact(name: &str, phone: &str, email: &str) -> Contact {
        Contact {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn missing_file_lists_as_empty() {
        let (_dir, store) = store();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn saves_append_in_order_with_a_single_header() {
        let (_dir, store) = store();
        store
            .save(&contact("Dr. Rao", "", "rao@example.com"))
            .await
            .unwrap();
        store
            .save(&contact("Asha Pillai", "+91 44 1234 5678", ""))
            .await
            .unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("Name,Phone,Email\n"));
        assert_eq!(text.matches("Name,Phone,Email").count(), 1);

        let contacts = store.list().await.unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].name, "Dr. Rao");
        assert_eq!(contacts[0].phone, "");
        assert_eq!(contacts[0].email, "rao@example.com");
        assert_eq!(contacts[1].name, "Asha Pillai");
    }

    #[tokio::test]
    async fn rejects_contact_without_name() {
        let (_dir, store) = store();
        let err = store
            .save(&contact("", "555-0100", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ContactError::MissingName));
    }

    #[tokio::test]
    async fn rejects_contact_without_any_detail() {
        let (_dir, store) = store();
        let err = store.save(&contact("Dr. Rao", "", "")).await.unwrap_err();
        assert!(matches!(err, ContactError::MissingDetail));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fields_with_commas_survive_the_round_trip() {
        let (_dir, store) = store();
        store
            .save(&contact("Rao, Sr.", "044-2866", ""))
            .await
            .unwrap();
        let contacts = store.list().await.unwrap();
        assert_eq!(contacts[0].name, "Rao, Sr.");
    }
}

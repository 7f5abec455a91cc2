#![allow(dead_code)]

use async_trait::async_trait;
use prunedb::CollectionStore;
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Shared, ordered record of what the pruner wrote and what the store did.
pub type Journal = Arc<Mutex<Vec<String>>>;

#[derive(Error, Debug)]
pub enum MemoryStoreError {
    #[error("connection refused")]
    Unavailable,
    #[error("not authorized to drop {0}")]
    Unauthorized(String),
    #[error("collection already exists: {0}")]
    AlreadyExists(String),
    #[error("not authorized to read {0}")]
    ReadDenied(String),
}

pub struct MemoryStore {
    name: String,
    collections: Mutex<Vec<String>>,
    failing: HashSet<String>,
    unreadable: HashSet<String>,
    unavailable: bool,
    journal: Journal,
}

impl MemoryStore {
    pub fn with_collections(names: &[&str]) -> Self {
        Self {
            name: "stocksDB".to_string(),
            collections: Mutex::new(names.iter().map(|n| n.to_string()).collect()),
            failing: HashSet::new(),
            unreadable: HashSet::new(),
            unavailable: false,
            journal: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_on(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn unreadable(mut self, name: &str) -> Self {
        self.unreadable.insert(name.to_string());
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn names(&self) -> Vec<String> {
        self.collections.lock().unwrap().clone()
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    type Error = MemoryStoreError;

    fn database_name(&self) -> &str {
        &self.name
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, Self::Error> {
        if self.unavailable {
            return Err(MemoryStoreError::Unavailable);
        }
        Ok(self.names())
    }

    async fn drop_collection(&self, name: &str) -> Result<(), Self::Error> {
        if self.unavailable {
            return Err(MemoryStoreError::Unavailable);
        }
        if self.failing.contains(name) {
            return Err(MemoryStoreError::Unauthorized(name.to_string()));
        }
        self.journal.lock().unwrap().push(format!("drop {}", name));
        self.collections.lock().unwrap().retain(|n| n != name);
        Ok(())
    }

    async fn create_collection(&self, name: &str) -> Result<(), Self::Error> {
        let mut collections = self.collections.lock().unwrap();
        if collections.iter().any(|n| n == name) {
            return Err(MemoryStoreError::AlreadyExists(name.to_string()));
        }
        collections.push(name.to_string());
        Ok(())
    }

    async fn check_access(&self, name: &str) -> Result<(), Self::Error> {
        if self.unreadable.contains(name) {
            return Err(MemoryStoreError::ReadDenied(name.to_string()));
        }
        Ok(())
    }
}

/// Writer that appends each complete output line to a [`Journal`].
pub struct JournalWriter {
    journal: Journal,
    pending: Vec<u8>,
}

impl JournalWriter {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            pending: Vec::new(),
        }
    }
}

impl Write for JournalWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]).into_owned();
            self.journal.lock().unwrap().push(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Output lines only, without the store's own journal entries.
pub fn output_lines(output: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(output)
        .lines()
        .map(String::from)
        .collect()
}

pub fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

/// Writer that accepts lines until `fail_on` (1-based), then reports a closed pipe.
pub struct ClosingWriter {
    fail_on: usize,
    completed: usize,
    pending: Vec<u8>,
    pub accepted: Vec<u8>,
}

impl ClosingWriter {
    pub fn failing_on_line(fail_on: usize) -> Self {
        Self {
            fail_on,
            completed: 0,
            pending: Vec::new(),
            accepted: Vec::new(),
        }
    }
}

impl Write for ClosingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let newlines = buf.iter().filter(|b| **b == b'\n').count();
        if self.completed + newlines >= self.fail_on {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        }
        self.completed += newlines;
        self.pending.extend_from_slice(buf);
        if let Some(pos) = self.pending.iter().rposition(|b| *b == b'\n') {
            self.accepted.extend(self.pending.drain(..=pos));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

//! Open set + active document.
//!
//! The active document is held by key, so the open copy is the only copy: edits to an open
//! document are visible through [`WorkspaceState::active`] without a second write.

use super::document::Document;

#[derive(Debug, Clone, Default)]
pub struct WorkspaceState {
    open: Vec<Document>,
    active: Option<String>,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_documents(&self) -> &[Document] {
        &self.open
    }

    pub fn active(&self) -> Option<&Document> {
        let name = self.active.as_deref()?;
        self.get(name)
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_index(&self) -> Option<usize> {
        let name = self.active.as_deref()?;
        self.position(name)
    }

    pub fn get(&self, name: &str) -> Option<&Document> {
        self.open.iter().find(|d| d.name == name)
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.open.iter().position(|d| d.name == name)
    }

    /// Appends `doc` unless a document with the same name is already open, then makes it active.
    ///
    /// Re-opening keeps the existing copy (and any edits made to it).
    pub fn open(&mut self, doc: Document) -> bool {
        let name = doc.name.clone();
        let mut changed = false;
        if !self.is_open(&name) {
            self.open.push(doc);
            changed = true;
        }
        changed |= self.active.as_deref() != Some(name.as_str());
        self.active = Some(name);
        changed
    }

    /// Removes `name`. Closing the active document activates the last survivor, if any.
    pub fn close(&mut self, name: &str) -> bool {
        let Some(idx) = self.position(name) else {
            return false;
        };
        self.open.remove(idx);
        if self.active.as_deref() == Some(name) {
            self.active = self.open.last().map(|d| d.name.clone());
        }
        true
    }

    pub fn set_active(&mut self, name: &str) -> bool {
        if !self.is_open(name) || self.active.as_deref() == Some(name) {
            return false;
        }
        self.active = Some(name.to_string());
        true
    }

    pub fn update_content(&mut self, name: &str, content: String) -> bool {
        let Some(doc) = self.open.iter_mut().find(|d| d.name == name) else {
            return false;
        };
        if doc.content == content {
            return false;
        }
        doc.content = content;
        true
    }

    /// Activates the neighbour of the active tab, wrapping around.
    pub fn cycle_active(&mut self, delta: isize) -> bool {
        if self.open.len() < 2 {
            return false;
        }
        let len = self.open.len() as isize;
        let current = self.active_index().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        let name = self.open[next].name.clone();
        self.set_active(&name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/workspace.rs"]
mod tests;

//! Host adapter: the key/value surface a data node lives on.
//!
//! A host is whatever application owns the rig (a DCC scene, a test
//! fixture). The store only needs named entities carrying scalar
//! attributes, plus a read-only flag for entities brought in by reference.

use crate::error::{Result, StoreError};
use picker_core::ControlResolver;
use std::collections::BTreeMap;

/// Scalar attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Bool(bool),
    Str(String),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            AttrValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            AttrValue::Str(_) => None,
        }
    }
}

/// Entity and attribute access on the host.
pub trait HostAdapter {
    fn exists(&self, entity: &str) -> bool;

    /// Create an empty entity called `name`.
    fn create_entity(&mut self, name: &str) -> Result<()>;

    /// Declare `attr` on `entity` with an initial value.
    fn add_attr(&mut self, entity: &str, attr: &str, value: AttrValue) -> Result<()>;

    fn has_attr(&self, entity: &str, attr: &str) -> bool;

    fn get_attr(&self, entity: &str, attr: &str) -> Option<AttrValue>;

    /// # Errors
    /// Fails with `ReferenceLocked` on referenced entities.
    fn set_attr(&mut self, entity: &str, attr: &str, value: AttrValue) -> Result<()>;

    /// Whether the entity comes from a referenced (read-only) file.
    fn is_referenced(&self, entity: &str) -> bool;

    /// Names of every entity carrying `attr`, in no particular order.
    fn entities_with_attr(&self, attr: &str) -> Vec<String>;
}

// ─── In-memory host ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct Entity {
    attrs: BTreeMap<String, AttrValue>,
    referenced: bool,
}

/// Host kept entirely in memory. Backs tests and headless tools.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    entities: BTreeMap<String, Entity>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain entity (e.g. a rig control).
    pub fn add_object(&mut self, name: impl Into<String>) {
        self.entities.entry(name.into()).or_default();
    }

    /// Mark an entity as coming from a reference. Unknown names are ignored.
    pub fn set_referenced(&mut self, entity: &str, referenced: bool) {
        if let Some(e) = self.entities.get_mut(entity) {
            e.referenced = referenced;
        }
    }

    fn entity_mut(&mut self, name: &str) -> Result<&mut Entity> {
        self.entities
            .get_mut(name)
            .ok_or_else(|| StoreError::NodeNotFound(name.to_string()))
    }
}

impl HostAdapter for MemoryHost {
    fn exists(&self, entity: &str) -> bool {
        self.entities.contains_key(entity)
    }

    fn create_entity(&mut self, name: &str) -> Result<()> {
        self.add_object(name);
        Ok(())
    }

    fn add_attr(&mut self, entity: &str, attr: &str, value: AttrValue) -> Result<()> {
        self.entity_mut(entity)?
            .attrs
            .entry(attr.to_string())
            .or_insert(value);
        Ok(())
    }

    fn has_attr(&self, entity: &str, attr: &str) -> bool {
        self.entities
            .get(entity)
            .is_some_and(|e| e.attrs.contains_key(attr))
    }

    fn get_attr(&self, entity: &str, attr: &str) -> Option<AttrValue> {
        self.entities.get(entity)?.attrs.get(attr).cloned()
    }

    fn set_attr(&mut self, entity: &str, attr: &str, value: AttrValue) -> Result<()> {
        let e = self.entity_mut(entity)?;
        if e.referenced {
            return Err(StoreError::ReferenceLocked(entity.to_string()));
        }
        e.attrs.insert(attr.to_string(), value);
        Ok(())
    }

    fn is_referenced(&self, entity: &str) -> bool {
        self.entities.get(entity).is_some_and(|e| e.referenced)
    }

    fn entities_with_attr(&self, attr: &str) -> Vec<String> {
        self.entities
            .iter()
            .filter(|(_, e)| e.attrs.contains_key(attr))
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl ControlResolver for MemoryHost {
    fn exists(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn attrs_roundtrip() {
        let mut host = MemoryHost::new();
        host.create_entity("node").unwrap();
        host.add_attr("node", "flag", AttrValue::Bool(true)).unwrap();
        host.add_attr("node", "text", AttrValue::Str(String::new()))
            .unwrap();
        host.set_attr("node", "text", AttrValue::Str("hello".into()))
            .unwrap();

        assert!(host.has_attr("node", "flag"));
        assert_eq!(
            host.get_attr("node", "text"),
            Some(AttrValue::Str("hello".into()))
        );
        assert_eq!(host.entities_with_attr("flag"), vec!["node".to_string()]);
    }

    #[test]
    fn add_attr_keeps_existing_value() {
        let mut host = MemoryHost::new();
        host.create_entity("node").unwrap();
        host.add_attr("node", "text", AttrValue::Str("a".into()))
            .unwrap();
        host.add_attr("node", "text", AttrValue::Str("b".into()))
            .unwrap();
        assert_eq!(
            host.get_attr("node", "text").and_then(|v| v.as_str().map(String::from)),
            Some("a".to_string())
        );
    }

    #[test]
    fn referenced_entities_are_read_only() {
        let mut host = MemoryHost::new();
        host.create_entity("node").unwrap();
        host.add_attr("node", "text", AttrValue::Str("a".into()))
            .unwrap();
        host.set_referenced("node", true);

        let err = host
            .set_attr("node", "text", AttrValue::Str("b".into()))
            .unwrap_err();
        assert!(matches!(err, StoreError::ReferenceLocked(_)));
        assert_eq!(host.get_attr("node", "text"), Some(AttrValue::Str("a".into())));
    }

    #[test]
    fn missing_entity_is_not_found() {
        let mut host = MemoryHost::new();
        let err = host
            .set_attr("ghost", "text", AttrValue::Bool(false))
            .unwrap_err();
        assert!(matches!(err, StoreError::NodeNotFound(_)));
    }
}

// Dotted-path access into stored JSON documents.
// "a.b.c" reads or rewrites field b.c of the document stored under key "a".

use serde_json::{Map, Value as Json};
use tracing::warn;

use super::backend::{KeyValueStore, Result};
use super::codec::Value;
use super::store::Storage;

/// Result of a path write or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOutcome {
    /// The document was rewritten (or the plain key was written/removed).
    Applied,
    /// The path ran into a non-container value, or the stored document is
    /// not valid JSON. Nothing was written.
    Conflict,
}

impl PathOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PathOutcome::Applied)
    }
}

/// A dotted path split into its top-level key, intermediate segments and leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeyPath<'a> {
    key: &'a str,
    parents: &'a str,
    leaf: &'a str,
}

impl<'a> KeyPath<'a> {
    /// `None` when `path` has a single segment.
    fn parse(path: &'a str) -> Option<Self> {
        let (key, rest) = path.split_once('.')?;
        let (parents, leaf) = rest.rsplit_once('.').unwrap_or(("", rest));
        Some(Self { key, parents, leaf })
    }

    fn parents(&self) -> impl Iterator<Item = &'a str> {
        let parents = self.parents;
        parents.split('.').filter(move |_| !parents.is_empty())
    }
}

impl<S: KeyValueStore> Storage<S> {
    /// Read the value at `path`.
    ///
    /// A single-segment path is a plain [`Storage::get`] and yields a JSON
    /// string. Otherwise the document under the first segment is walked
    /// without modification; a missing or non-container segment yields `None`.
    pub async fn path_get(&self, path: &str) -> Result<Option<Json>> {
        let Some(key_path) = KeyPath::parse(path) else {
            return Ok(self.get(path).await?.map(Json::String));
        };

        let Some(doc) = self.load_document(key_path.key).await? else {
            return Ok(None);
        };

        let mut node = &doc;
        for part in key_path.parents() {
            match child(node, part) {
                Some(next) if is_container(next) => node = next,
                _ => return Ok(None),
            }
        }
        Ok(child(node, key_path.leaf).cloned())
    }

    /// Write `value` at `path`, creating missing intermediate objects.
    ///
    /// The whole top-level document is rewritten. With `token` the top-level
    /// key's expiry is replaced, otherwise the existing token is kept.
    /// Concurrent path writes to the same top-level key race; the last
    /// rewrite wins.
    pub async fn path_set(
        &self,
        path: &str,
        value: impl Into<Value>,
        token: Option<&str>,
    ) -> Result<PathOutcome> {
        let Some(key_path) = KeyPath::parse(path) else {
            match token {
                Some(token) => self.setex(path, value, token).await?,
                None => self.set(path, value).await?,
            }
            return Ok(PathOutcome::Applied);
        };

        let Some(mut doc) = self.load_document(key_path.key).await? else {
            return Ok(PathOutcome::Conflict);
        };

        let Some(parent) = descend(&mut doc, key_path.parents()) else {
            return Ok(PathOutcome::Conflict);
        };
        let value: Value = value.into();
        if !assign(parent, key_path.leaf, value.into_json()) {
            return Ok(PathOutcome::Conflict);
        }

        match token {
            Some(token) => self.setex(key_path.key, doc, token).await?,
            None => self.set(key_path.key, doc).await?,
        }
        Ok(PathOutcome::Applied)
    }

    /// Remove the field at `path`, keeping the top-level key's expiry token.
    ///
    /// Walks the document the same way as [`Storage::path_set`], so missing
    /// intermediate objects are created. An array element is replaced by
    /// `null` rather than shifting its neighbours.
    pub async fn path_del(&self, path: &str) -> Result<PathOutcome> {
        let Some(key_path) = KeyPath::parse(path) else {
            self.del(path).await?;
            return Ok(PathOutcome::Applied);
        };

        let Some(mut doc) = self.load_document(key_path.key).await? else {
            return Ok(PathOutcome::Conflict);
        };

        let Some(parent) = descend(&mut doc, key_path.parents()) else {
            return Ok(PathOutcome::Conflict);
        };
        if !remove(parent, key_path.leaf) {
            return Ok(PathOutcome::Conflict);
        }

        match self.get_expire(key_path.key)? {
            Some(token) => self.setex(key_path.key, doc, &token).await?,
            None => self.set(key_path.key, doc).await?,
        }
        Ok(PathOutcome::Applied)
    }

    /// Parse the document stored under `key`; absent or empty means `{}`.
    /// `None` when the stored text is not JSON.
    async fn load_document(&self, key: &str) -> Result<Option<Json>> {
        let raw = match self.get(key).await? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(Some(Json::Object(Map::new()))),
        };

        match serde_json::from_str(&raw) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                warn!(key, error = %e, "stored value is not a JSON document");
                Ok(None)
            }
        }
    }
}

fn is_container(node: &Json) -> bool {
    matches!(node, Json::Object(_) | Json::Array(_))
}

/// Values replaced by an empty object when a write walks through them.
fn is_empty_slot(node: &Json) -> bool {
    match node {
        Json::Null | Json::Bool(false) => true,
        Json::Number(n) => n.as_f64() == Some(0.0),
        Json::String(s) => s.is_empty(),
        _ => false,
    }
}

fn array_index(part: &str) -> Option<usize> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn child<'a>(node: &'a Json, part: &str) -> Option<&'a Json> {
    match node {
        Json::Object(map) => map.get(part),
        Json::Array(items) => items.get(array_index(part)?),
        _ => None,
    }
}

/// Mutable slot for `part`, created as `null` when missing.
/// Arrays only grow by appending at their current length.
fn slot_mut<'a>(node: &'a mut Json, part: &str) -> Option<&'a mut Json> {
    match node {
        Json::Object(map) => Some(map.entry(part).or_insert(Json::Null)),
        Json::Array(items) => {
            let index = array_index(part)?;
            if index == items.len() {
                items.push(Json::Null);
            }
            items.get_mut(index)
        }
        _ => None,
    }
}

/// Walk `parts` from `doc`, turning empty slots into objects.
/// Returns the container that should hold the leaf.
fn descend<'a, 'p>(
    doc: &'a mut Json,
    parts: impl Iterator<Item = &'p str>,
) -> Option<&'a mut Json> {
    let mut node = doc;
    for part in parts {
        let next = slot_mut(node, part)?;
        if is_empty_slot(next) {
            *next = Json::Object(Map::new());
        }
        if !is_container(next) {
            return None;
        }
        node = next;
    }
    is_container(node).then_some(node)
}

fn assign(parent: &mut Json, leaf: &str, value: Json) -> bool {
    match slot_mut(parent, leaf) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => false,
    }
}

fn remove(parent: &mut Json, leaf: &str) -> bool {
    match parent {
        Json::Object(map) => {
            map.shift_remove(leaf);
            true
        }
        Json::Array(items) => match array_index(leaf) {
            Some(index) => {
                if let Some(item) = items.get_mut(index) {
                    *item = Json::Null;
                }
                true
            }
            None => false,
        },
        _ => false,
    }
}

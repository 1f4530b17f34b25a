//! Item transforms: mirror, scale, duplicate, and control renaming.
//!
//! Every transform here is a plain in-place mutation of one `PickerItem`
//! (or a copy of it). Scene bookkeeping lives in `scene.rs`.

use crate::model::{PickerItem, qualify_control};
use kurbo::Point;
use regex_lite::Regex;
use thiserror::Error;

/// Looks up whether a control name exists on the host.
pub trait ControlResolver {
    fn exists(&self, name: &str) -> bool;
}

/// Resolver that accepts every name (no host attached).
pub struct AnyControl;

impl ControlResolver for AnyControl {
    fn exists(&self, _name: &str) -> bool {
        true
    }
}

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex_lite::Error),
}

// ─── Control rename ───────────────────────────────────────────────────────

/// Regex search & replace applied to each control name of an item
/// (e.g. `_L$` → `_R` when mirroring a left-side control to the right).
///
/// Replacements use backslash group references (`\1`, `\g<side>`) as
/// saved in existing pickers; `$` is literal.
#[derive(Debug, Clone)]
pub struct ControlRename {
    search: Regex,
    replace: String,
}

impl ControlRename {
    /// # Errors
    /// Returns `InvalidPattern` if `search` is not a valid regex.
    pub fn new(search: &str, replace: impl AsRef<str>) -> Result<Self, RenameError> {
        Ok(Self {
            search: Regex::new(search)?,
            replace: expand_backrefs(replace.as_ref()),
        })
    }

    pub fn apply(&self, name: &str) -> String {
        self.search
            .replace_all(name, self.replace.as_str())
            .into_owned()
    }
}

/// Rewrite `\N`, `\g<N>` and `\g<name>` group references into the
/// `${N}` form the regex engine expands. Other escapes and `$` come out
/// literal.
fn expand_backrefs(replace: &str) -> String {
    let mut out = String::with_capacity(replace.len());
    let mut chars = replace.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' => out.push_str("$$"),
            '\\' => match chars.peek().copied() {
                Some(d) if d.is_ascii_digit() => {
                    let mut group = String::new();
                    while let Some(d) = chars.next_if(char::is_ascii_digit) {
                        group.push(d);
                    }
                    out.push_str(&format!("${{{group}}}"));
                }
                Some('g') => {
                    chars.next();
                    if chars.next_if_eq(&'<').is_some() {
                        let group: String = chars.by_ref().take_while(|&c| c != '>').collect();
                        out.push_str(&format!("${{{group}}}"));
                    } else {
                        out.push_str("\\g");
                    }
                }
                Some('\\') => {
                    chars.next();
                    out.push('\\');
                }
                _ => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
    out
}

/// Outcome of a control rename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameReport {
    /// Namespace-expanded names that did not resolve on the host after
    /// substitution. The substitution is committed regardless.
    pub unresolved: Vec<String>,
}

impl RenameReport {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }
}

// ─── Transforms ───────────────────────────────────────────────────────────

impl PickerItem {
    /// Mirror across the vertical axis: handle x, position x, and the
    /// red/blue channels of both colors. Applying it twice is a no-op.
    pub fn mirror(&mut self) {
        self.geometry.mirror_x();
        self.position.x = -self.position.x;
        self.color = self.color.mirrored();
        self.text_color = self.text_color.mirrored();
    }

    /// Scale the handles about the item origin. With `world` the item
    /// position is scaled about the scene origin as well.
    pub fn scale(&mut self, x_factor: f64, y_factor: f64, world: bool) {
        self.geometry.scale(x_factor, y_factor);
        if world {
            self.position = Point::new(self.position.x * x_factor, self.position.y * y_factor);
        }
    }

    /// Independent copy of the item. Handles start hidden on the copy.
    pub fn duplicate(&self) -> PickerItem {
        let mut copy = self.clone();
        copy.edit_status = false;
        copy
    }

    /// Run `rename` over every stored control name.
    ///
    /// Resolution is checked on the namespace-expanded name; unresolved
    /// names are reported and logged but still committed.
    pub fn rename_controls(
        &mut self,
        rename: &ControlRename,
        namespace: Option<&str>,
        resolver: &dyn ControlResolver,
    ) -> RenameReport {
        let mut report = RenameReport::default();
        for ctrl in &mut self.controls {
            *ctrl = rename.apply(ctrl);
            let resolved = qualify_control(ctrl, namespace);
            if !resolver.exists(&resolved) {
                report.unresolved.push(resolved);
            }
        }
        if !report.is_clean() {
            log::warn!(
                "some target controls do not exist: {}",
                report.unresolved.join(", ")
            );
        }
        report
    }

    /// Duplicate, mirror the copy, then rename its controls when it has
    /// any and a rename was supplied.
    pub fn duplicate_and_mirror(
        &self,
        rename: Option<&ControlRename>,
        namespace: Option<&str>,
        resolver: &dyn ControlResolver,
    ) -> (PickerItem, RenameReport) {
        let mut copy = self.duplicate();
        copy.mirror();
        let report = match rename {
            Some(rename) if !copy.controls.is_empty() => {
                copy.rename_controls(rename, namespace, resolver)
            }
            _ => RenameReport::default(),
        };
        (copy, report)
    }
}

//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s.
//! The shortcut map lives in Rust so it's shared across WASM and native.

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Edit ──
    AddChild,
    Delete,
    Rename,
    ToggleCollapse,
    Undo,
    Redo,

    // ── View ──
    ResetView,
}

impl ShortcutAction {
    /// Name reported to JavaScript.
    pub fn name(self) -> &'static str {
        match self {
            ShortcutAction::AddChild => "addChild",
            ShortcutAction::Delete => "delete",
            ShortcutAction::Rename => "rename",
            ShortcutAction::ToggleCollapse => "toggleCollapse",
            ShortcutAction::Undo => "undo",
            ShortcutAction::Redo => "redo",
            ShortcutAction::ResetView => "resetView",
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let cmd = modifiers.command();

        // ── Modifier combos first (most specific) ──
        if cmd && modifiers.shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "0" => Some(ShortcutAction::ResetView),
                _ => None,
            };
        }

        // ── Single keys ──
        match key {
            "Enter" => Some(ShortcutAction::AddChild),
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "F2" => Some(ShortcutAction::Rename),
            " " => Some(ShortcutAction::ToggleCollapse),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mods(ctrl: bool, shift: bool, meta: bool) -> Modifiers {
        Modifiers {
            shift,
            ctrl,
            alt: false,
            meta,
        }
    }

    #[test]
    fn resolve_edit_keys() {
        assert_eq!(
            ShortcutMap::resolve("Enter", Modifiers::NONE),
            Some(ShortcutAction::AddChild)
        );
        assert_eq!(
            ShortcutMap::resolve("Delete", Modifiers::NONE),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("Backspace", Modifiers::NONE),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("F2", Modifiers::NONE),
            Some(ShortcutAction::Rename)
        );
    }

    #[test]
    fn resolve_undo_redo() {
        // Cmd+Z → Undo
        assert_eq!(
            ShortcutMap::resolve("z", mods(false, false, true)),
            Some(ShortcutAction::Undo)
        );
        // Ctrl+Z → Undo
        assert_eq!(
            ShortcutMap::resolve("z", mods(true, false, false)),
            Some(ShortcutAction::Undo)
        );
        // Cmd+Shift+Z → Redo (browsers report the key as "Z")
        assert_eq!(
            ShortcutMap::resolve("Z", mods(false, true, true)),
            Some(ShortcutAction::Redo)
        );
        // Ctrl+Y → Redo
        assert_eq!(
            ShortcutMap::resolve("y", mods(true, false, false)),
            Some(ShortcutAction::Redo)
        );
    }

    #[test]
    fn resolve_collapse_and_view_keys() {
        assert_eq!(
            ShortcutMap::resolve(" ", Modifiers::NONE),
            Some(ShortcutAction::ToggleCollapse)
        );
        assert_eq!(
            ShortcutMap::resolve("0", mods(true, false, false)),
            Some(ShortcutAction::ResetView)
        );
        assert_eq!(ShortcutMap::resolve("0", Modifiers::NONE), None);
    }

    #[test]
    fn unbound_keys() {
        assert_eq!(ShortcutMap::resolve("q", Modifiers::NONE), None);
        assert_eq!(ShortcutMap::resolve("Enter", mods(true, false, false)), None);
        // Plain z is not undo.
        assert_eq!(ShortcutMap::resolve("z", Modifiers::NONE), None);
    }
}

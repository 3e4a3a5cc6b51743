// nativecli - core/menu.rs
//
// Native menu code generation: built-in menu templates and the PHP
// fragments (fluent menu builder, event listener, route, listener
// registration) that `make:menu` writes into a project.
//
// Every string embedded in generated code is escaped for backslash and
// single quote only, matching PHP single-quoted string rules.

use std::fmt;
use std::str::FromStr;

// =============================================================================
// Menu model
// =============================================================================

/// One entry of a menu: a separator or a clickable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Separator,
    Item {
        label: String,
        /// Action identifier; omitted from the generated call when empty.
        action: String,
        shortcut: Option<String>,
    },
}

impl MenuItem {
    /// Item with no keyboard shortcut.
    pub fn item(label: &str, action: &str) -> Self {
        Self::Item {
            label: label.to_string(),
            action: action.to_string(),
            shortcut: None,
        }
    }

    /// Item bound to a keyboard shortcut.
    pub fn with_shortcut(label: &str, action: &str, shortcut: &str) -> Self {
        Self::Item {
            label: label.to_string(),
            action: action.to_string(),
            shortcut: Some(shortcut.to_string()),
        }
    }
}

/// Built-in menu templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuType {
    App,
    File,
    Edit,
    View,
    Window,
    Custom,
}

impl MenuType {
    /// Returns all variants in display order.
    pub fn all() -> &'static [MenuType] {
        &[
            MenuType::App,
            MenuType::File,
            MenuType::Edit,
            MenuType::View,
            MenuType::Window,
            MenuType::Custom,
        ]
    }

    /// Tag used on the command line.
    pub fn tag(&self) -> &'static str {
        match self {
            MenuType::App => "app",
            MenuType::File => "file",
            MenuType::Edit => "edit",
            MenuType::View => "view",
            MenuType::Window => "window",
            MenuType::Custom => "custom",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MenuType::App => "Standard app menu (About, Preferences, Quit)",
            MenuType::File => "File operations (New, Open, Save, Close)",
            MenuType::Edit => "Edit operations (Undo, Redo, Cut, Copy, Paste)",
            MenuType::View => "View controls (Zoom, Fullscreen, Dev Tools)",
            MenuType::Window => "Window management (Minimize, Close, Bring All to Front)",
            MenuType::Custom => "Empty menu with interactive item builder",
        }
    }

    /// The fixed item template for this menu type. Empty for `Custom`.
    pub fn template(&self) -> Vec<MenuItem> {
        use MenuItem::Separator;
        let sc = MenuItem::with_shortcut;

        match self {
            MenuType::App => vec![
                MenuItem::item("About {APP_NAME}", "about"),
                Separator,
                sc("Preferences", "preferences", "CmdOrCtrl+,"),
                Separator,
                sc("Quit {APP_NAME}", "quit", "CmdOrCtrl+Q"),
            ],
            MenuType::File => vec![
                sc("New", "file.new", "CmdOrCtrl+N"),
                sc("Open", "file.open", "CmdOrCtrl+O"),
                Separator,
                sc("Save", "file.save", "CmdOrCtrl+S"),
                sc("Save As...", "file.save-as", "CmdOrCtrl+Shift+S"),
                Separator,
                sc("Close", "file.close", "CmdOrCtrl+W"),
            ],
            MenuType::Edit => vec![
                sc("Undo", "edit.undo", "CmdOrCtrl+Z"),
                sc("Redo", "edit.redo", "CmdOrCtrl+Shift+Z"),
                Separator,
                sc("Cut", "edit.cut", "CmdOrCtrl+X"),
                sc("Copy", "edit.copy", "CmdOrCtrl+C"),
                sc("Paste", "edit.paste", "CmdOrCtrl+V"),
                Separator,
                sc("Select All", "edit.select-all", "CmdOrCtrl+A"),
            ],
            MenuType::View => vec![
                sc("Reload", "view.reload", "CmdOrCtrl+R"),
                sc("Force Reload", "view.force-reload", "CmdOrCtrl+Shift+R"),
                Separator,
                sc("Actual Size", "view.reset-zoom", "CmdOrCtrl+0"),
                sc("Zoom In", "view.zoom-in", "CmdOrCtrl+Plus"),
                sc("Zoom Out", "view.zoom-out", "CmdOrCtrl+-"),
                Separator,
                sc("Toggle Fullscreen", "view.fullscreen", "F11"),
                Separator,
                sc("Toggle Developer Tools", "view.dev-tools", "CmdOrCtrl+Shift+I"),
            ],
            MenuType::Window => vec![
                sc("Minimize", "window.minimize", "CmdOrCtrl+M"),
                sc("Close", "window.close", "CmdOrCtrl+W"),
                Separator,
                MenuItem::item("Bring All to Front", "window.bring-all-to-front"),
            ],
            MenuType::Custom => Vec::new(),
        }
    }
}

impl fmt::Display for MenuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for MenuType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MenuType::all()
            .iter()
            .copied()
            .find(|t| t.tag() == s)
            .ok_or_else(|| format!("Invalid menu type: {s}"))
    }
}

// =============================================================================
// Code generation
// =============================================================================

const MENU_INDENT: &str = "        ";
const MENU_BAR_INDENT: &str = "            ";

const LISTENER_TEMPLATE: &str = r#"<?php

namespace App\Listeners;

use Native\Laravel\Events\Menu\MenuItemClicked;

class {CLASS_NAME}
{
    public function handle(MenuItemClicked $event): void
    {
        if ($event->id === '{ACTION}') {
            // Handle {ACTION} action
            // Add your implementation here
        }
    }
}"#;

/// Generate the fluent builder call for a menu.
///
/// `items` wins when non-empty; otherwise the menu type's template is used.
/// The fragment starts with a newline and every line carries the same
/// indentation: 8 spaces, or 12 when `is_menu_bar` is set.
pub fn generate_menu_code(
    label: &str,
    menu_type: MenuType,
    items: &[MenuItem],
    is_menu_bar: bool,
) -> String {
    let template;
    let items = if items.is_empty() {
        template = menu_type.template();
        &template[..]
    } else {
        items
    };

    let indent = if is_menu_bar { MENU_BAR_INDENT } else { MENU_INDENT };
    let mut code = format!("\n{indent}Menu::new()\n");
    code.push_str(&format!("{indent}    {}\n", label_call(label)));

    for item in items {
        match item {
            MenuItem::Separator => code.push_str(&format!("{indent}    ->separator()\n")),
            MenuItem::Item {
                label,
                action,
                shortcut,
            } => {
                code.push_str(&format!("{indent}    ->item({}", quote(label)));
                if !action.is_empty() {
                    code.push_str(&format!(", {}", quote(action)));
                }
                if let Some(shortcut) = shortcut.as_deref().filter(|s| !s.is_empty()) {
                    code.push_str(&format!(", {}", quote(shortcut)));
                }
                code.push_str(")\n");
            }
        }
    }

    code.push_str(&format!("{indent}    ->register();"));
    code
}

/// The `->label(...)` call emitted for `label`, quoted as in generated code.
pub fn label_call(label: &str) -> String {
    format!("->label({})", quote(label))
}

/// Source of a listener class reacting to `MenuItemClicked` for `action`.
pub fn event_listener_code(action: &str, class_name: &str) -> String {
    LISTENER_TEMPLATE
        .replace("{CLASS_NAME}", class_name)
        .replace("{ACTION}", action)
}

/// Route registration for a menu action, e.g. `file.open` →
/// `Route::get('/file-open', [MenuController::class, 'fileOpen'])->name('file.open');`
pub fn route_code(action: &str) -> String {
    let route_name = action.replace('.', "-");
    let method = action_to_method_name(action);
    format!("Route::get('/{route_name}', [MenuController::class, '{method}'])->name('{action}');")
}

/// Listener class name for a menu: `"My Custom-menu"` → `MyCustomMenuMenuListener`.
pub fn listener_class_name(menu_name: &str) -> String {
    let mut name = String::with_capacity(menu_name.len());
    let mut at_word_start = true;
    for c in menu_name.chars() {
        if c == ' ' || c == '-' {
            at_word_start = true;
            continue;
        }
        if at_word_start {
            name.extend(c.to_uppercase());
        } else {
            name.push(c);
        }
        at_word_start = false;
    }
    format!("{name}MenuListener")
}

/// Snippet registering `class_name` for `MenuItemClicked` in an event map.
pub fn listener_registration(class_name: &str) -> String {
    format!("MenuItemClicked::class => [\n            {class_name}::class,\n        ],")
}

/// `file.save-as` → `fileSaveas`: dot-separated parts are capitalised and
/// joined after dropping hyphens, then the first letter is lowered.
fn action_to_method_name(action: &str) -> String {
    let joined: String = action
        .split('.')
        .map(|part| capitalise_first(&part.replace('-', "")))
        .collect();

    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalise_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Wrap `s` in single quotes, escaping backslashes and single quotes.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

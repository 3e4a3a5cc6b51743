// nativecli - core/source_patch.rs
//
// Structural text edits on PHP class files without a parser.
// Core layer: pure functions over `&str`, no I/O.
//
// Method bodies are located by matching the declaration signature
//   public function <name>(<params>) <anything but '{'> {
// and then counting brace depth from the opening brace until it returns to
// zero. Nested blocks, array literals and closures balance naturally.
//
// Known limitation: a `{` or `}` inside a string literal or comment within
// the method body shifts the detected boundary. The target files are
// generated service providers, which do not contain such braces.

use regex::Regex;
use std::sync::OnceLock;

// =============================================================================
// Method location
// =============================================================================

/// Byte offsets of a located method body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodBody {
    /// Offset just past the opening `{`.
    pub start: usize,
    /// Offset of the matching closing `}`.
    pub end: usize,
}

/// Why a method body could not be located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateError {
    /// No matching `public function` declaration.
    NotFound,
    /// The declaration was found but its braces never balance.
    Unbalanced,
}

/// Strategy for finding a method body inside a source buffer.
///
/// `CodeModifier` only depends on this trait, so a real parser can replace
/// brace counting without touching callers.
pub trait MethodLocator {
    /// Locate the body of the public method `name`.
    fn locate_method_body(&self, content: &str, name: &str) -> Result<MethodBody, LocateError>;

    /// Whether a public method `name` is declared.
    fn has_method(&self, content: &str, name: &str) -> bool {
        !matches!(
            self.locate_method_body(content, name),
            Err(LocateError::NotFound)
        )
    }
}

/// Default locator: signature regex plus brace-depth scanning.
#[derive(Debug, Clone, Copy, Default)]
pub struct BraceDepthLocator;

impl BraceDepthLocator {
    fn declaration(name: &str) -> Regex {
        let pattern = format!(
            r"public\s+function\s+{}\s*\([^)]*\)[^{{]*\{{",
            regex::escape(name)
        );
        Regex::new(&pattern).expect("method declaration regex")
    }
}

impl MethodLocator for BraceDepthLocator {
    fn locate_method_body(&self, content: &str, name: &str) -> Result<MethodBody, LocateError> {
        let decl = Self::declaration(name)
            .find(content)
            .ok_or(LocateError::NotFound)?;

        let start = decl.end();
        let mut depth = 1usize;
        // Braces are ASCII, so byte scanning never lands inside a UTF-8
        // sequence and the offsets stay valid char boundaries.
        for (offset, byte) in content.as_bytes()[start..].iter().enumerate() {
            match byte {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(MethodBody {
                            start,
                            end: start + offset,
                        });
                    }
                }
                _ => {}
            }
        }

        Err(LocateError::Unbalanced)
    }
}

// =============================================================================
// Use statements
// =============================================================================

/// A top-level `use X;` line found in a source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseStatement {
    /// Fully-qualified name between `use` and `;`, trimmed.
    pub name: String,
    /// Byte offset of the `u` of `use`.
    pub start: usize,
    /// Byte offset just past the `;`.
    pub end: usize,
}

/// Where a new use statement should be spliced into the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub offset: usize,
    pub text: String,
}

/// Last segment of a fully-qualified name: `Native\Laravel\Facades\Menu` → `Menu`.
pub fn short_name(fqn: &str) -> &str {
    fqn.rsplit('\\').next().unwrap_or(fqn)
}

/// True when `fqn` is imported exactly, or another import ends in the same
/// short name (importing it again would clash).
pub fn has_use_statement(content: &str, fqn: &str) -> bool {
    let exact = format!(r"use\s+{}\s*;", regex::escape(fqn));
    let same_short = format!(r"use\s+[^;]+\\{}\s*;", regex::escape(short_name(fqn)));

    [exact, same_short].iter().any(|pattern| {
        Regex::new(pattern)
            .map(|re| re.is_match(content))
            .unwrap_or(false)
    })
}

fn use_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?m)^use\s+([^;]+);").expect("use_pattern: invalid regex"))
}

fn namespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"namespace\s+[^;]+;").expect("namespace_pattern: invalid regex"))
}

/// All top-level imports: lines starting with `use` at column zero.
///
/// Indented `use` (trait imports inside a class body) is not included.
pub fn use_statements(content: &str) -> Vec<UseStatement> {
    use_pattern()
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(UseStatement {
                name: caps.get(1)?.as_str().trim().to_string(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Compute where `use <fqn>;` goes so imports stay in case-insensitive
/// lexicographic order.
///
/// Returns `None` when the buffer has neither imports nor a namespace
/// declaration to anchor the first import. Callers check
/// [`has_use_statement`] first; this function does not.
pub fn plan_use_insertion(content: &str, fqn: &str) -> Option<Insertion> {
    let existing = use_statements(content);

    if existing.is_empty() {
        let decl = namespace_pattern().find(content)?;
        return Some(Insertion {
            offset: decl.end(),
            text: format!("\n\nuse {fqn};"),
        });
    }

    let wanted = fqn.to_lowercase();
    let after = existing
        .iter()
        .take_while(|stmt| wanted > stmt.name.to_lowercase())
        .last();

    Some(match after {
        Some(stmt) => Insertion {
            offset: stmt.end,
            text: format!("\nuse {fqn};"),
        },
        None => Insertion {
            offset: existing[0].start,
            text: format!("use {fqn};\n"),
        },
    })
}

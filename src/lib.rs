//! # inipatch
//!
//! An INI configuration reader/writer that saves changes back to disk without
//! disturbing anything else in the file.
//!
//! When a configuration is saved over an existing file, only values that were
//! explicitly [`set`](Config::set) are rewritten. Comments, blank lines,
//! spacing, key order and the file's line-ending convention are preserved byte
//! for byte.
//!
//! ## Features
//!
//! - **In-place patching**: a changed value is rewritten on its own line, keeping
//!   the key, the `=` and any trailing comment exactly as they were
//! - **Appending**: new keys go at the end of their section, new sections at the
//!   end of the file
//! - **Line endings**: `\n`, `\r\n` and `\r` files are all kept in their own style
//! - **Dirty tracking**: values loaded from a file never overwrite values the
//!   caller already set
//! - **Typed getters**: integers (decimal or hex), floats, booleans, or anything
//!   implementing [`FromStr`](std::str::FromStr)
//!
//! ## File format
//!
//! ```ini
//! ; comments start with ';' or '#', on their own line or after a value
//! top = values before the first header live in the "" section
//!
//! [section]
//! key = value   # trailing comment
//! ```
//!
//! There is no quoting, escaping or line continuation.
//!
//! ## Example
//!
//! ```rust
//! use inipatch::Config;
//!
//! let original = b"[server]\nport = 80   ; public\n\n[log]\nlevel = info\n";
//!
//! let mut config = Config::new();
//! config.parse(original);
//! assert_eq!(config.get_int("server", "port"), 80);
//!
//! config.set("server", "port", 8080);
//! config.set("server", "host", "0.0.0.0");
//!
//! let patched = config.render(original);
//! assert_eq!(
//!     String::from_utf8(patched).unwrap(),
//!     "[server]\nport = 8080   ; public\nhost = 0.0.0.0\n\n[log]\nlevel = info\n"
//! );
//! ```
//!
//! ## Files
//!
//! ```rust,no_run
//! use inipatch::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::load("settings.ini")?;
//! config.set("window", "width", 1280);
//! config.save("settings.ini")?;
//! # Ok(())
//! # }
//! ```

// Module declarations
mod config;
mod error;
mod parser;
mod reconcile;
mod scanner;
mod types;

// Public API exports
pub use config::{Config, ConfigOptions};
pub use error::{ConfigError, ParseResult};
pub use types::{LineEnding, Section, Value};

// Re-export submodules for advanced usage
pub use parser::{IniParser, LineKind};
pub use scanner::{Lines, ScannedLine, scan_line};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_parsing() {
        let mut config = Config::new();
        config.parse(b"[test]\nvalue = 123\n");
        assert_eq!(config.get_int("test", "value"), 123);
    }

    #[test]
    fn test_comments_are_not_values() {
        let mut config = Config::new();
        config.parse(b"[test]\nvalue = 1 # one\n; value = 2\n");
        assert_eq!(config.get_string("test", "value"), "1");
    }

    #[test]
    fn test_set_then_render() {
        let mut config = Config::new();
        config.parse(b"[a]\nx = 1\n");
        config.set("a", "x", 2);
        assert_eq!(config.render(b"[a]\nx = 1\n"), b"[a]\nx = 2\n");
    }
}

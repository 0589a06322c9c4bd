// ABOUTME: Version, banner, and default-filename constants

pub const VERSION: &str = "0.1.0";
pub const WELCOME_MESSAGE: &str = "Glam Interpreter v0.1";
pub const WELCOME_SUBTITLE: &str = "A tree-walking interpreter for the Glam scripting language";

/// A convenience default for hosts that prefer a default file over a
/// REPL when no script path is given on the command line. This binary
/// starts the REPL instead (§6.1), but keeps the constant available.
#[allow(dead_code)]
pub const DEFAULT_SCRIPT_FILENAME: &str = "program.gl";

/// REPL command history file, written in the current directory.
pub const HISTORY_FILE: &str = ".glam_history";

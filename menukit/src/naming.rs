//! Identifier normalization
//!
//! Two canonical forms are derived from human-readable labels: machine names
//! (`add_monitor`) for flat tool identifiers and flag names (`add-monitor`)
//! for command-line subcommands and flags.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid separator regex"));

fn normalize(s: &str, separator: &str) -> String {
    let lower = s.to_lowercase();
    let replaced = NON_ALNUM.replace_all(&lower, separator);
    replaced.trim_matches(|c| separator.contains(c)).to_string()
}

/// Underscore-separated lowercase name: `"Add & Monitor"` becomes `add_monitor`
pub fn to_machine_name(s: &str) -> String {
    normalize(s, "_")
}

/// Hyphen-separated lowercase name: `"Add & Monitor"` becomes `add-monitor`
pub fn to_flag_name(s: &str) -> String {
    normalize(s, "-")
}

/// Flat tool identifier: `prefix_` joined verbatim with the machine name
pub fn tool_name(prefix: Option<&str>, name: &str) -> String {
    let name = to_machine_name(name);
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}_{name}"),
        _ => name,
    }
}

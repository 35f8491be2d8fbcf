//! Package definition parser
//!
//! ```text
//! # comments run to the end of the line
//! package foo/1.2.3
//!
//! config default
//!   include bar/4.5.6
//!   include baz/7.8.9:runtime
//! end
//! ```

use std::collections::HashSet;

use fig_pm::{Config, Include, Package, DEFAULT_CONFIG};

use crate::descriptor::{is_valid_name, parse_descriptor};
use crate::error::FormatError;

/// Config block being read
struct OpenConfig {
    name: String,
    line: usize,
    includes: Vec<Include>,
}

/// Parse a package definition
///
/// `file` names the input in error messages.
pub fn parse_package(file: &str, content: &str) -> Result<Package, FormatError> {
    let mut header: Option<(String, String)> = None;
    let mut configs: Vec<Config> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut open: Option<OpenConfig> = None;
    let mut last_line = 0;

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        last_line = line;

        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = text.split_whitespace().collect();
        let keyword = tokens[0];
        let args = &tokens[1..];

        match keyword {
            "package" => {
                if open.is_some() {
                    return Err(FormatError::syntax(file, line, "package declaration inside config"));
                }
                if header.is_some() {
                    return Err(FormatError::syntax(file, line, "duplicate package declaration"));
                }
                if !configs.is_empty() {
                    return Err(FormatError::syntax(file, line, "package declaration must come before configs"));
                }
                let [reference] = args else {
                    return Err(FormatError::syntax(file, line, "expected `package <name>/<version>`"));
                };
                let desc = parse_descriptor(reference)
                    .map_err(|e| FormatError::syntax(file, line, e.to_string()))?;
                let version = desc
                    .require_version()
                    .map_err(|e| FormatError::syntax(file, line, e.to_string()))?
                    .to_string();
                if desc.config.is_some() {
                    return Err(FormatError::syntax(file, line, "package declaration cannot name a config"));
                }
                header = Some((desc.package, version));
            }
            "config" => {
                if header.is_none() {
                    return Err(FormatError::syntax(file, line, "config before package declaration"));
                }
                if let Some(current) = &open {
                    return Err(FormatError::syntax(
                        file,
                        line,
                        format!("config \"{}\" is not closed with `end`", current.name),
                    ));
                }
                let [name] = args else {
                    return Err(FormatError::syntax(file, line, "expected `config <name>`"));
                };
                if !is_valid_name(name) {
                    return Err(FormatError::syntax(file, line, format!("invalid config name \"{}\"", name)));
                }
                if !seen.insert(name.to_string()) {
                    return Err(FormatError::syntax(file, line, format!("duplicate config \"{}\"", name)));
                }
                open = Some(OpenConfig {
                    name: name.to_string(),
                    line,
                    includes: Vec::new(),
                });
            }
            "include" => {
                let Some(current) = open.as_mut() else {
                    return Err(FormatError::syntax(file, line, "include outside of config"));
                };
                let [reference] = args else {
                    return Err(FormatError::syntax(file, line, "expected `include <name>/<version>[:<config>]`"));
                };
                let desc = parse_descriptor(reference)
                    .and_then(|d| d.into_descriptor(DEFAULT_CONFIG))
                    .map_err(|e| FormatError::syntax(file, line, e.to_string()))?;
                current
                    .includes
                    .push(Include::new(desc.package, desc.version, desc.config));
            }
            "end" => {
                if !args.is_empty() {
                    return Err(FormatError::syntax(file, line, "unexpected arguments after `end`"));
                }
                let Some(current) = open.take() else {
                    return Err(FormatError::syntax(file, line, "`end` without config"));
                };
                configs.push(Config::new(current.name, current.includes));
            }
            other => {
                return Err(FormatError::syntax(file, line, format!("unknown keyword \"{}\"", other)));
            }
        }
    }

    if let Some(current) = open {
        return Err(FormatError::syntax(
            file,
            current.line,
            format!("config \"{}\" is not closed with `end`", current.name),
        ));
    }

    let Some((name, version)) = header else {
        return Err(FormatError::syntax(file, last_line.max(1), "missing package declaration"));
    };

    Ok(Package::new(name, version, configs))
}

//! package.json parser for npm projects
//!
//! Handles, in this order:
//! - dependencies
//! - devDependencies
//! - optionalDependencies

use crate::domain::{ManifestKind, RawDependency};
use crate::error::ManifestError;
use crate::manifest::ManifestParser;
use serde_json::{Map, Value};
use std::path::Path;

/// Dependency sections searched by both extraction and probing
const SECTIONS: [&str; 3] = ["dependencies", "devDependencies", "optionalDependencies"];

/// Parser for package.json files
pub struct PackageJsonParser;

impl ManifestParser for PackageJsonParser {
    fn extract(&self, content: &str, path: &Path) -> Result<Vec<RawDependency>, ManifestError> {
        let json = parse_object(content, path)?;

        let mut dependencies = Vec::new();
        for section in SECTIONS {
            if let Some(deps) = json.get(section).and_then(|v| v.as_object()) {
                parse_dependency_object(deps, &mut dependencies);
            }
        }

        Ok(dependencies)
    }

    fn probe(&self, content: &str, path: &Path, package: &str) -> Result<String, ManifestError> {
        let json = parse_object(content, path)?;

        SECTIONS
            .iter()
            .filter_map(|section| json.get(*section).and_then(|v| v.as_object()))
            .find_map(|deps| deps.get(package).and_then(|v| v.as_str()))
            .map(str::to_string)
            .ok_or_else(|| ManifestError::package_not_found(package, path))
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::Npm
    }
}

fn parse_object(content: &str, path: &Path) -> Result<Map<String, Value>, ManifestError> {
    let json: Value = serde_json::from_str(content)
        .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))?;

    match json {
        Value::Object(map) => Ok(map),
        _ => Err(ManifestError::json_parse_error(
            path,
            "expected a JSON object at the top level",
        )),
    }
}

fn parse_dependency_object(deps: &Map<String, Value>, output: &mut Vec<RawDependency>) {
    for (name, version_value) in deps {
        // Non-string entries are not installable version ranges
        if let Some(version) = version_value.as_str() {
            output.push(RawDependency::new(name.clone(), version));
        }
    }
}

//! *.csproj parser for NuGet projects
//!
//! Reads `<PackageReference Include="..." Version="..." />` elements that are
//! direct children of a top-level `<ItemGroup>`:
//!
//! ```xml
//! <Project Sdk="Microsoft.NET.Sdk">
//!   <ItemGroup>
//!     <PackageReference Include="Newtonsoft.Json" Version="13.0.1" />
//!   </ItemGroup>
//! </Project>
//! ```
//!
//! Item groups without package references contribute nothing. A
//! `<Version>` child element is accepted when the attribute is missing.

use crate::domain::{ManifestKind, RawDependency};
use crate::error::ManifestError;
use crate::manifest::ManifestParser;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

const PROJECT: &str = "Project";
const ITEM_GROUP: &str = "ItemGroup";
const PACKAGE_REFERENCE: &str = "PackageReference";
const VERSION: &str = "Version";
const INCLUDE: &str = "Include";

/// Parser for *.csproj files
pub struct CsprojParser;

impl ManifestParser for CsprojParser {
    fn extract(&self, content: &str, path: &Path) -> Result<Vec<RawDependency>, ManifestError> {
        let references = parse_package_references(content, path)?;
        Ok(references
            .into_iter()
            .filter_map(PackageReference::into_dependency)
            .collect())
    }

    fn probe(&self, content: &str, path: &Path, package: &str) -> Result<String, ManifestError> {
        parse_package_references(content, path)?
            .into_iter()
            .filter_map(PackageReference::into_dependency)
            .find(|dep| dep.name == package)
            .map(|dep| dep.declared_version)
            .ok_or_else(|| ManifestError::package_not_found(package, path))
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::NuGet
    }
}

/// A `<PackageReference>` as found in the document, before validation
#[derive(Debug, Default)]
struct PackageReference {
    name: Option<String>,
    version: Option<String>,
}

impl PackageReference {
    fn from_element(element: &BytesStart<'_>, path: &Path) -> Result<Self, ManifestError> {
        let mut reference = PackageReference::default();
        for attr in element.attributes() {
            let attr = attr.map_err(|e| ManifestError::xml_parse_error(path, e.to_string()))?;
            let value = attr
                .unescape_value()
                .map_err(|e| ManifestError::xml_parse_error(path, e.to_string()))?
                .into_owned();
            let key = attr.key.local_name();
            if key.as_ref() == INCLUDE.as_bytes() {
                reference.name = Some(value);
            } else if key.as_ref() == VERSION.as_bytes() {
                reference.version = Some(value);
            }
        }
        Ok(reference)
    }

    /// References without a name or a version (centrally managed) are not
    /// updatable and are dropped
    fn into_dependency(self) -> Option<RawDependency> {
        match (self.name, self.version) {
            (Some(name), Some(version)) if !name.is_empty() => {
                Some(RawDependency::new(name, version))
            }
            _ => None,
        }
    }
}

fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.name().local_name().as_ref()).into_owned()
}

/// Whether an element named `tag`, opened below `stack`, is a package
/// reference of a top-level item group
fn is_package_reference(stack: &[String], tag: &str) -> bool {
    tag == PACKAGE_REFERENCE && stack.len() == 2 && stack[0] == PROJECT && stack[1] == ITEM_GROUP
}

fn check_root(tag: &str, path: &Path) -> Result<(), ManifestError> {
    if tag == PROJECT {
        Ok(())
    } else {
        Err(ManifestError::xml_parse_error(
            path,
            format!("expected <{}> root element, found <{}>", PROJECT, tag),
        ))
    }
}

fn parse_package_references(
    content: &str,
    path: &Path,
) -> Result<Vec<PackageReference>, ManifestError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut references = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut current: Option<PackageReference> = None;
    let mut in_version = false;
    let mut saw_root = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag = local_name(e);
                if stack.is_empty() {
                    check_root(&tag, path)?;
                    saw_root = true;
                }
                if is_package_reference(&stack, &tag) {
                    current = Some(PackageReference::from_element(e, path)?);
                } else if current.is_some() && stack.len() == 3 && tag == VERSION {
                    in_version = true;
                }
                stack.push(tag);
            }
            Ok(Event::Empty(ref e)) => {
                let tag = local_name(e);
                if stack.is_empty() {
                    check_root(&tag, path)?;
                    saw_root = true;
                }
                if is_package_reference(&stack, &tag) {
                    references.push(PackageReference::from_element(e, path)?);
                }
            }
            Ok(Event::Text(ref t)) => {
                if in_version {
                    let text = t
                        .unescape()
                        .map_err(|e| ManifestError::xml_parse_error(path, e.to_string()))?;
                    if let Some(reference) = current.as_mut() {
                        reference
                            .version
                            .get_or_insert_with(|| text.trim().to_string());
                    }
                }
            }
            Ok(Event::End(_)) => {
                let tag = stack.pop().unwrap_or_default();
                if in_version && tag == VERSION {
                    in_version = false;
                } else if tag == PACKAGE_REFERENCE && stack.len() == 2 {
                    if let Some(reference) = current.take() {
                        references.push(reference);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ManifestError::xml_parse_error(
                    path,
                    format!("at position {}: {}", reader.buffer_position(), e),
                ))
            }
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ManifestError::xml_parse_error(
            path,
            format!("unexpected end of document inside <{}>", stack.join("/")),
        ));
    }
    if !saw_root {
        return Err(ManifestError::xml_parse_error(
            path,
            format!("missing <{}> root element", PROJECT),
        ));
    }

    Ok(references)
}

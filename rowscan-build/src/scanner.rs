//! Source file scanner for struct declarations.

use log::debug;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use syn::ext::IdentExt;
use syn::{Fields, Item, ItemStruct};

use crate::error::ScanError;
use crate::model::{FieldInfo, FieldType, StructInfo};

/// Scan a single Rust file for named-field structs.
///
/// An empty `whitelist` keeps every struct; otherwise only structs whose name
/// is in the set are returned. Order follows the file.
pub fn extract(path: &Path, whitelist: &HashSet<String>) -> Result<Vec<StructInfo>, ScanError> {
    let content = fs::read_to_string(path).map_err(|source| ScanError::io(path, source))?;

    let structs = extract_source(&content, whitelist).map_err(|source| ScanError::parse(path, source))?;
    debug!("{}: {} struct(s)", path.display(), structs.len());

    Ok(structs)
}

/// Same as [`extract`] over in-memory source text.
pub fn extract_source(source: &str, whitelist: &HashSet<String>) -> syn::Result<Vec<StructInfo>> {
    let syntax = syn::parse_file(source)?;

    let mut structs = Vec::new();
    collect_items(&syntax.items, whitelist, &mut structs);
    Ok(structs)
}

/// Walk items in order, descending into inline `mod` blocks in place.
fn collect_items(items: &[Item], whitelist: &HashSet<String>, out: &mut Vec<StructInfo>) {
    for item in items {
        match item {
            Item::Struct(item_struct) => {
                if !whitelist.is_empty() && !whitelist.contains(&item_struct.ident.unraw().to_string()) {
                    continue;
                }
                if let Some(info) = parse_struct(item_struct) {
                    out.push(info);
                }
            }
            Item::Mod(item_mod) => {
                if let Some((_, content)) = &item_mod.content {
                    collect_items(content, whitelist, out);
                }
            }
            _ => {}
        }
    }
}

/// Tuple and unit structs have no named fields and yield nothing.
///
/// Names are stored without the `r#` prefix of raw identifiers.
fn parse_struct(item: &ItemStruct) -> Option<StructInfo> {
    let Fields::Named(named) = &item.fields else {
        return None;
    };

    let mut info = StructInfo::new(item.ident.unraw().to_string());
    for field in &named.named {
        let Some(ident) = &field.ident else {
            continue;
        };

        match FieldType::from_type(&field.ty) {
            Some(field_type) => info.fields.push(FieldInfo::new(ident.unraw().to_string(), field_type.to_string())),
            None => debug!("skipping field {}.{ident}: unsupported type shape", info.name),
        }
    }

    Some(info)
}

//! Descriptor types produced by the scanner and consumed by the templates.

use serde::{Deserialize, Serialize};
use std::fmt;
use syn::{AngleBracketedGenericArguments, GenericArgument, PathArguments, Type, TypePath};

/// Name of the identity field that switches the generator to keyed collections.
pub const ID_FIELD: &str = "Id";

/// A named-field struct discovered in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructInfo {
    /// The struct name as declared (e.g., "Post")
    pub name: String,
    /// Fields with a supported type shape, in declaration order
    pub fields: Vec<FieldInfo>,
}

impl StructInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style helper used mostly by tests.
    pub fn with_field(mut self, name: impl Into<String>, field_type: impl Into<String>) -> Self {
        self.fields.push(FieldInfo::new(name, field_type));
        self
    }

    /// Whether the struct carries an `Id` field.
    pub fn has_id(&self) -> bool {
        self.fields.iter().any(FieldInfo::is_id)
    }
}

/// A single struct field and the normalized text of its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: String,

    /// Normalized type text (e.g., "i64", "chrono::NaiveDate", "Box<Vec<u8>>")
    #[serde(rename = "type")]
    pub field_type: String,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }

    pub fn is_id(&self) -> bool {
        self.name == ID_FIELD
    }
}

/// Shape of a field type the generator knows how to handle.
///
/// Anything that does not fit one of these variants (maps, tuples, arrays,
/// references, function pointers, trait objects, arbitrary generics) is not
/// representable, and [`FieldType::from_type`] returns `None` for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Single identifier such as `i64` or `String`.
    Bare(String),
    /// Multi-segment path without generic arguments, e.g. `chrono::NaiveDate`.
    Qualified { leading_colon: bool, segments: Vec<String> },
    /// `Box<T>`
    Pointer(Box<FieldType>),
    /// `Vec<T>`
    Slice(Box<FieldType>),
    /// `Option<T>`
    Optional(Box<FieldType>),
}

impl FieldType {
    /// Classify a parsed type, recursing through the wrapper shapes.
    pub fn from_type(ty: &Type) -> Option<Self> {
        match ty {
            Type::Path(type_path) => Self::from_path(type_path),
            Type::Paren(paren) => Self::from_type(&paren.elem),
            Type::Group(group) => Self::from_type(&group.elem),
            _ => None,
        }
    }

    /// Parse type text and classify it.
    pub fn parse(text: &str) -> Option<Self> {
        let ty: Type = syn::parse_str(text).ok()?;
        Self::from_type(&ty)
    }

    fn from_path(type_path: &TypePath) -> Option<Self> {
        if type_path.qself.is_some() {
            return None;
        }

        let path = &type_path.path;
        if path.leading_colon.is_none() && path.segments.len() == 1 {
            let segment = &path.segments[0];
            let ident = segment.ident.to_string();
            return match &segment.arguments {
                PathArguments::None => Some(FieldType::Bare(ident)),
                PathArguments::AngleBracketed(args) => {
                    let wrap: fn(Box<FieldType>) -> FieldType = match ident.as_str() {
                        "Box" => FieldType::Pointer,
                        "Vec" => FieldType::Slice,
                        "Option" => FieldType::Optional,
                        _ => return None,
                    };
                    let inner = Self::from_type(single_type_argument(args)?)?;
                    Some(wrap(Box::new(inner)))
                }
                PathArguments::Parenthesized(_) => None,
            };
        }

        // A generic argument anywhere in a longer path means the qualifier is
        // not a plain module reference.
        let mut segments = Vec::with_capacity(path.segments.len());
        for segment in &path.segments {
            if !segment.arguments.is_none() {
                return None;
            }
            segments.push(segment.ident.to_string());
        }

        Some(FieldType::Qualified {
            leading_colon: path.leading_colon.is_some(),
            segments,
        })
    }
}

fn single_type_argument(args: &AngleBracketedGenericArguments) -> Option<&Type> {
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Bare(ident) => f.write_str(ident),
            FieldType::Qualified { leading_colon, segments } => {
                if *leading_colon {
                    f.write_str("::")?;
                }
                f.write_str(&segments.join("::"))
            }
            FieldType::Pointer(inner) => write!(f, "Box<{inner}>"),
            FieldType::Slice(inner) => write!(f, "Vec<{inner}>"),
            FieldType::Optional(inner) => write!(f, "Option<{inner}>"),
        }
    }
}

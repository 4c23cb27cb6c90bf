//! Helper functions available to generator templates.
//!
//! Every helper is registered both as a function (`title(token.name)`) and as
//! a filter (`token.name|title`).

use minijinja::value::Value;
use minijinja::{Environment, Error, ErrorKind};
use syn::Type;

use crate::model::{FieldType, ID_FIELD};

pub(crate) fn register(env: &mut Environment<'_>) {
    env.add_function("title", title);
    env.add_filter("title", title);
    env.add_function("snake", snake);
    env.add_filter("snake", snake);
    env.add_function("ident", ident);
    env.add_filter("ident", ident);
    env.add_function("hasid", hasid);
    env.add_filter("hasid", hasid);
    env.add_function("noid", noid);
    env.add_filter("noid", noid);
    env.add_function("inc", inc);
    env.add_filter("inc", inc);
    env.add_function("rand", rand);
    env.add_filter("rand", rand);
}

/// Uppercase the first character and keep the rest as written.
pub fn title(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert an identifier to lower_snake_case.
///
/// Acronyms stay together: `SemURL` becomes `sem_url`, `HTTPServer` becomes
/// `http_server`.
pub fn snake(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
                if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                    result.push('_');
                }
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }

    result
}

/// Spell a name as a Rust identifier, adding `r#` when it is a keyword.
///
/// `self`, `Self`, `super` and `crate` cannot be raw and are returned as is.
pub fn ident(name: &str) -> String {
    if syn::parse_str::<syn::Ident>(name).is_ok() || matches!(name, "self" | "Self" | "super" | "crate" | "_") {
        name.to_string()
    } else {
        format!("r#{name}")
    }
}

/// True when one of the fields is named exactly `Id`.
pub fn hasid(fields: Value) -> Result<bool, Error> {
    for field in fields.try_iter()? {
        if is_id_field(&field)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// The fields without the `Id` field.
pub fn noid(fields: Value) -> Result<Value, Error> {
    let mut kept = Vec::new();
    for field in fields.try_iter()? {
        if !is_id_field(&field)? {
            kept.push(field);
        }
    }
    Ok(Value::from(kept))
}

pub fn inc(n: i64) -> Result<i64, Error> {
    n.checked_add(1)
        .ok_or_else(|| Error::new(ErrorKind::InvalidOperation, "inc: integer overflow"))
}

/// Rust expression producing a value of the given type, for test fixtures.
pub fn rand(type_text: &str) -> Result<String, Error> {
    let ty: Type = syn::parse_str(type_text).map_err(|err| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("rand: `{type_text}` is not a type: {err}"),
        )
    })?;

    Ok(match FieldType::from_type(&ty) {
        Some(field_type) => random_expr(&field_type),
        None => "Default::default()".to_string(),
    })
}

fn is_id_field(field: &Value) -> Result<bool, Error> {
    let name = field.get_attr("name")?;
    Ok(name.as_str() == Some(ID_FIELD))
}

fn random_expr(field_type: &FieldType) -> String {
    match field_type {
        FieldType::Pointer(inner) => format!("Box::new({})", random_expr(inner)),
        FieldType::Slice(_) => "Vec::new()".to_string(),
        FieldType::Optional(_) => "None".to_string(),
        FieldType::Qualified { segments, .. } => known_type_expr(&segments.join("::")),
        FieldType::Bare(ident) => primitive_expr(ident),
    }
}

fn known_type_expr(path: &str) -> String {
    let expr = match path {
        "chrono::NaiveDateTime" => "chrono::Utc::now().naive_utc()",
        "chrono::NaiveDate" => "chrono::Utc::now().date_naive()",
        "std::time::SystemTime" => "std::time::SystemTime::now()",
        "uuid::Uuid" => "uuid::Uuid::new_v4()",
        "rust_decimal::Decimal" => "rust_decimal::Decimal::new(rand::random::<i32>() as i64, 2)",
        "serde_json::Value" => "serde_json::Value::Null",
        _ => "Default::default()",
    };
    expr.to_string()
}

fn primitive_expr(ident: &str) -> String {
    match ident {
        "String" => "rand::random::<u64>().to_string()".to_string(),
        "bool" | "char" | "f32" | "f64" | "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32"
        | "u64" | "u128" | "usize" => format!("rand::random::<{ident}>()"),
        _ => "Default::default()".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldInfo;

    fn fields(names: &[&str]) -> Value {
        let fields: Vec<_> = names.iter().map(|n| FieldInfo::new(*n, "i64")).collect();
        Value::from_serialize(&fields)
    }

    #[test]
    fn test_title() {
        assert_eq!(title("unexported"), "Unexported");
        assert_eq!(title("Exported"), "Exported");
        assert_eq!(title("unAndEx"), "UnAndEx");
        assert_eq!(title("t0"), "T0");
        assert_eq!(title(""), "");
    }

    #[test]
    fn test_snake() {
        assert_eq!(snake("Post"), "post");
        assert_eq!(snake("ExAndUn"), "ex_and_un");
        assert_eq!(snake("SemURL"), "sem_url");
        assert_eq!(snake("HTTPServer"), "http_server");
        assert_eq!(snake("ID"), "id");
        assert_eq!(snake("Id"), "id");
        assert_eq!(snake("already_snake"), "already_snake");
        assert_eq!(snake("page2Count"), "page2_count");
    }

    #[test]
    fn test_ident() {
        assert_eq!(ident("Post"), "Post");
        assert_eq!(ident("type"), "r#type");
        assert_eq!(ident("match"), "r#match");
        assert_eq!(ident("as"), "r#as");
        assert_eq!(ident("async"), "r#async");
        assert_eq!(ident("self"), "self");
    }

    #[test]
    fn test_hasid_and_noid() {
        assert!(hasid(fields(&["Id", "Title"])).unwrap());
        assert!(!hasid(fields(&["ID", "id", "Title"])).unwrap());
        assert!(!hasid(fields(&[])).unwrap());

        let kept = noid(fields(&["Id", "Title", "Body"])).unwrap();
        let names: Vec<_> = kept
            .try_iter()
            .unwrap()
            .map(|f| f.get_attr("name").unwrap().to_string())
            .collect();
        assert_eq!(names, ["Title", "Body"]);
    }

    #[test]
    fn test_hasid_rejects_non_sequence() {
        assert!(hasid(Value::from(42)).is_err());
    }

    #[test]
    fn test_inc() {
        assert_eq!(inc(0).unwrap(), 1);
        assert_eq!(inc(inc(0).unwrap()).unwrap(), 2);
        assert!(inc(i64::MAX).is_err());
    }

    #[test]
    fn test_rand_special_cases() {
        assert_eq!(rand("i64").unwrap(), "rand::random::<i64>()");
        assert_eq!(rand("bool").unwrap(), "rand::random::<bool>()");
        assert_eq!(rand("String").unwrap(), "rand::random::<u64>().to_string()");
        assert_eq!(rand("Vec<u8>").unwrap(), "Vec::new()");
        assert_eq!(rand("Option<String>").unwrap(), "None");
        assert_eq!(rand("Box<bool>").unwrap(), "Box::new(rand::random::<bool>())");
        assert_eq!(rand("Box<Vec<u8>>").unwrap(), "Box::new(Vec::new())");
        assert_eq!(rand("chrono::NaiveDateTime").unwrap(), "chrono::Utc::now().naive_utc()");
        assert_eq!(rand("::uuid::Uuid").unwrap(), "uuid::Uuid::new_v4()");
        assert_eq!(rand("Account").unwrap(), "Default::default()");
        assert_eq!(rand("HashMap<String, i64>").unwrap(), "Default::default()");
    }

    #[test]
    fn test_rand_rejects_garbage() {
        assert!(rand("not a type !").is_err());
    }
}

use std::collections::HashMap;

struct boolean {
    a: bool,
}

struct numerics {
    a: u8,
    b: u16,
    c: u32,
    d: u64,
    e: i8,
    f: i16,
    g: i32,
    h: i64,
    i: f32,
    j: f64,
    k: u128,
    l: i128,
    m: char,
    n: usize,
    o: isize,
}

struct str {
    a: String,
}

struct structs {
    a: serde_json::Value,
}

struct slices {
    a: Vec<bool>,
    b: Vec<chrono::NaiveDateTime>,
    c: Vec<Box<u8>>,
    d: Vec<Box<serde_json::Value>>,
}

struct pointers {
    a: Box<bool>,
    b: Box<chrono::NaiveDateTime>,
    c: Box<Vec<u8>>,
    d: Box<Vec<serde_json::Value>>,
}

struct optionals {
    a: Option<i64>,
    b: Option<Box<String>>,
}

struct unsupported {
    a: HashMap<String, i64>,
    keep: i64,
    b: (i32, i32),
    c: fn(i32) -> i32,
    d: [u8; 4],
    e: &'static str,
    f: chrono::DateTime<chrono::Utc>,
    g: Box<dyn std::error::Error>,
    inline: Vec<HashMap<String, String>>,
}

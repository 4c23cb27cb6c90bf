pub struct Exported {
    pub A: i64,
    pub B: i64,
}

struct unexported {
    a: i64,
    b: i64,
}

pub struct ExAndUn {
    a: i64,
    b: i64,
}

struct unAndEx {
    pub A: i64,
    pub B: i64,
}

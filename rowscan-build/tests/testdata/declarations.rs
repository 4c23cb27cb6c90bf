struct t0 {
    a: i64,
    b: bool,
}

mod grouped {
    struct t1 {
        a: i64,
        b: bool,
    }

    struct t2 {
        a: String,
        b: u8,
    }
}

struct t3 {
    a: i64, b: i64, c: i64,
    d: bool, e: bool, f: bool,
}

type alias = t0;

enum notAStruct {
    A,
    B,
}

struct tuple(i64, bool);

struct unit;

mod nested {
    mod deeper {
        pub(crate) struct t4 {
            pub a: i64,
            pub(super) b: bool,
        }
    }
}

mod elsewhere;

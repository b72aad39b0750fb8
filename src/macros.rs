#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a `Category` set from bare flag names: `cats!(NOUN | VERB)`.
#[macro_export]
macro_rules! cats {
    ($($flag:ident)|+) => {
        $crate::Category::empty() $(.union($crate::Category::$flag))+
    };
}

/// Build a `Features` set from bare flag names: `feats!(PLURAL | UNIT)`.
#[macro_export]
macro_rules! feats {
    () => {
        $crate::Features::empty()
    };
    ($($flag:ident)|+) => {
        $crate::Features::empty() $(.union($crate::Features::$flag))+
    };
}

//! Static types tracked by the type checker.

use std::fmt;

use serde::Serialize;

/// Primitive types a variable, field or parameter can be declared with.
///
/// Expressions are typed with the same set: number literals are `Int` or
/// `Float`, comparisons produce `Bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Type {
    Int,
    Float,
    String,
    Bool,
    Char,
    Byte,
    Decimal,
    Double,
    Long,
    Short,
}

impl Type {
    pub fn name(self) -> &'static str {
        match self {
            Type::Int => "INT",
            Type::Float => "FLOAT",
            Type::String => "STRING",
            Type::Bool => "BOOL",
            Type::Char => "CHAR",
            Type::Byte => "BYTE",
            Type::Decimal => "DECIMAL",
            Type::Double => "DOUBLE",
            Type::Long => "LONG",
            Type::Short => "SHORT",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

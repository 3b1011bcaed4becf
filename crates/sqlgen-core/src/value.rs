// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dynamically typed SQL values and conversions.
//!
//! Generated code binds arguments through [`ToSqlValue`] and decodes scalar
//! results through [`FromSqlValue`]. Decoding widens where it is lossless
//! (`Int` → `f64`, `Int` → `bool`) and fails with [`SqlError::Decode`]
//! otherwise.

use std::{
    collections::{BTreeSet, HashSet, VecDeque},
    fmt
};

use crate::SqlError;

/// A single SQL value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SqlValue {
    /// `NULL`.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Any integer.
    Int(i64),
    /// Any floating point number.
    Float(f64),
    /// Text.
    Text(String),
    /// Exact decimal, kept as text.
    Decimal(String),
    /// A collection argument, for `IN (?)` style bindings.
    List(Vec<SqlValue>)
}

impl SqlValue {
    /// Short name of the variant, used in decode errors.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Decimal(_) => "decimal",
            Self::List(_) => "list"
        }
    }

    /// `true` for [`SqlValue::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn mismatch<T>(self, expected: &'static str) -> Result<T, SqlError> {
        Err(SqlError::Decode {
            expected,
            found: self.type_name()
        })
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "'{v}'"),
            Self::Decimal(v) => f.write_str(v),
            Self::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Convert a Rust value into a bindable [`SqlValue`].
pub trait ToSqlValue {
    /// Produce the bound value.
    fn to_sql_value(&self) -> SqlValue;
}

/// Decode a [`SqlValue`] into a Rust value.
pub trait FromSqlValue: Sized {
    /// Decode `value`.
    ///
    /// # Errors
    ///
    /// [`SqlError::Decode`] when the value cannot represent `Self`.
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError>;
}

impl<T: ToSqlValue + ?Sized> ToSqlValue for &T {
    fn to_sql_value(&self) -> SqlValue {
        (**self).to_sql_value()
    }
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(&self) -> SqlValue {
        self.clone()
    }
}

impl FromSqlValue for SqlValue {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        Ok(value)
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Bool(*self)
    }
}

impl FromSqlValue for bool {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        match value {
            SqlValue::Bool(v) => Ok(v),
            SqlValue::Int(v) => Ok(v != 0),
            other => other.mismatch("bool")
        }
    }
}

macro_rules! integer {
    ($($ty:ty),*) => {$(
        impl ToSqlValue for $ty {
            fn to_sql_value(&self) -> SqlValue {
                SqlValue::Int(i64::from(*self))
            }
        }

        impl FromSqlValue for $ty {
            fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
                match value {
                    SqlValue::Int(v) => <$ty>::try_from(v).map_err(|_| SqlError::Decode {
                        expected: stringify!($ty),
                        found:    "out of range int"
                    }),
                    SqlValue::Bool(v) => Ok(<$ty>::from(v)),
                    other => other.mismatch(stringify!($ty))
                }
            }
        }
    )*};
}

integer!(i8, i16, i32, i64, u8, u16, u32);

impl ToSqlValue for u64 {
    fn to_sql_value(&self) -> SqlValue {
        match i64::try_from(*self) {
            Ok(v) => SqlValue::Int(v),
            Err(_) => SqlValue::Decimal(self.to_string())
        }
    }
}

impl FromSqlValue for u64 {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        match value {
            SqlValue::Int(v) => u64::try_from(v).map_err(|_| SqlError::Decode {
                expected: "u64",
                found:    "negative int"
            }),
            SqlValue::Decimal(ref text) => match text.parse() {
                Ok(v) => Ok(v),
                Err(_) => value.mismatch("u64")
            },
            other => other.mismatch("u64")
        }
    }
}

impl ToSqlValue for usize {
    fn to_sql_value(&self) -> SqlValue {
        (*self as u64).to_sql_value()
    }
}

impl FromSqlValue for usize {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        usize::try_from(u64::from_sql_value(value)?).map_err(|_| SqlError::Decode {
            expected: "usize",
            found:    "out of range int"
        })
    }
}

impl ToSqlValue for isize {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Int(*self as i64)
    }
}

impl FromSqlValue for isize {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        isize::try_from(i64::from_sql_value(value)?).map_err(|_| SqlError::Decode {
            expected: "isize",
            found:    "out of range int"
        })
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Float(*self)
    }
}

impl FromSqlValue for f64 {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        match value {
            SqlValue::Float(v) => Ok(v),
            SqlValue::Int(v) => Ok(v as f64),
            SqlValue::Decimal(ref text) => match text.parse() {
                Ok(v) => Ok(v),
                Err(_) => value.mismatch("f64")
            },
            other => other.mismatch("f64")
        }
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Float(f64::from(*self))
    }
}

impl FromSqlValue for f32 {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        f64::from_sql_value(value).map(|v| v as f32)
    }
}

impl ToSqlValue for str {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Text(self.to_string())
    }
}

impl ToSqlValue for String {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Text(self.clone())
    }
}

impl FromSqlValue for String {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        match value {
            SqlValue::Text(v) | SqlValue::Decimal(v) => Ok(v),
            other => other.mismatch("String")
        }
    }
}

impl ToSqlValue for char {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Text(self.to_string())
    }
}

/// Exactly one character of text.
impl FromSqlValue for char {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        let text = match value {
            SqlValue::Text(text) => text,
            other => return other.mismatch("char")
        };
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(SqlError::Decode {
                expected: "char",
                found:    "text of another length"
            })
        }
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(&self) -> SqlValue {
        self.as_ref().map_or(SqlValue::Null, ToSqlValue::to_sql_value)
    }
}

impl<T: FromSqlValue> FromSqlValue for Option<T> {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        match value {
            SqlValue::Null => Ok(None),
            other => T::from_sql_value(other).map(Some)
        }
    }
}

fn list<'a, T: ToSqlValue + 'a>(items: impl IntoIterator<Item = &'a T>) -> SqlValue {
    SqlValue::List(items.into_iter().map(ToSqlValue::to_sql_value).collect())
}

impl<T: ToSqlValue> ToSqlValue for [T] {
    fn to_sql_value(&self) -> SqlValue {
        list(self)
    }
}

impl<T: ToSqlValue, const N: usize> ToSqlValue for [T; N] {
    fn to_sql_value(&self) -> SqlValue {
        list(self)
    }
}

impl<T: ToSqlValue> ToSqlValue for Vec<T> {
    fn to_sql_value(&self) -> SqlValue {
        list(self)
    }
}

impl<T: ToSqlValue> ToSqlValue for VecDeque<T> {
    fn to_sql_value(&self) -> SqlValue {
        list(self)
    }
}

impl<T: ToSqlValue, S> ToSqlValue for HashSet<T, S> {
    fn to_sql_value(&self) -> SqlValue {
        list(self)
    }
}

impl<T: ToSqlValue> ToSqlValue for BTreeSet<T> {
    fn to_sql_value(&self) -> SqlValue {
        list(self)
    }
}

impl<T: FromSqlValue> FromSqlValue for Vec<T> {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        match value {
            SqlValue::List(items) => items.into_iter().map(T::from_sql_value).collect(),
            other => other.mismatch("list")
        }
    }
}

#[cfg(feature = "decimal")]
impl ToSqlValue for rust_decimal::Decimal {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Decimal(self.to_string())
    }
}

#[cfg(feature = "decimal")]
impl FromSqlValue for rust_decimal::Decimal {
    fn from_sql_value(value: SqlValue) -> Result<Self, SqlError> {
        match value {
            SqlValue::Decimal(ref text) | SqlValue::Text(ref text) => match text.parse() {
                Ok(v) => Ok(v),
                Err(_) => value.mismatch("Decimal")
            },
            SqlValue::Int(v) => Ok(Self::from(v)),
            SqlValue::Float(v) => Self::try_from(v).map_err(|_| SqlError::Decode {
                expected: "Decimal",
                found:    "non-finite float"
            }),
            other => other.mismatch("Decimal")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_to_sql() {
        assert_eq!(true.to_sql_value(), SqlValue::Bool(true));
        assert_eq!(42_i32.to_sql_value(), SqlValue::Int(42));
        assert_eq!("x".to_sql_value(), SqlValue::Text("x".into()));
        assert_eq!(String::from("y").to_sql_value(), SqlValue::Text("y".into()));
        assert_eq!(1.5_f64.to_sql_value(), SqlValue::Float(1.5));
        assert_eq!(None::<i64>.to_sql_value(), SqlValue::Null);
        assert_eq!(u64::MAX.to_sql_value(), SqlValue::Decimal(u64::MAX.to_string()));
    }

    #[test]
    fn references_bind_like_values() {
        let name = String::from("ann");
        let by_ref: &String = &name;
        assert_eq!(by_ref.to_sql_value(), SqlValue::Text("ann".into()));
        assert_eq!((&&7_i64).to_sql_value(), SqlValue::Int(7));
    }

    #[test]
    fn collections_bind_as_lists() {
        assert_eq!(
            vec![1_i64, 2].to_sql_value(),
            SqlValue::List(vec![SqlValue::Int(1), SqlValue::Int(2)])
        );
        assert_eq!(
            ["a", "b"][..].to_sql_value(),
            SqlValue::List(vec![SqlValue::Text("a".into()), SqlValue::Text("b".into())])
        );
        assert_eq!(
            BTreeSet::from([3_i32]).to_sql_value(),
            SqlValue::List(vec![SqlValue::Int(3)])
        );
    }

    #[test]
    fn widening_decodes() {
        assert_eq!(f64::from_sql_value(SqlValue::Int(3)), Ok(3.0));
        assert_eq!(bool::from_sql_value(SqlValue::Int(1)), Ok(true));
        assert_eq!(bool::from_sql_value(SqlValue::Int(0)), Ok(false));
        assert_eq!(i64::from_sql_value(SqlValue::Bool(true)), Ok(1));
        assert_eq!(
            String::from_sql_value(SqlValue::Decimal("1.10".into())),
            Ok("1.10".to_string())
        );
    }

    #[test]
    fn narrowing_checks_range() {
        assert_eq!(i32::from_sql_value(SqlValue::Int(7)), Ok(7));
        assert!(i32::from_sql_value(SqlValue::Int(i64::MAX)).is_err());
        assert!(u64::from_sql_value(SqlValue::Int(-1)).is_err());
    }

    #[test]
    fn char_and_isize() {
        assert_eq!('x'.to_sql_value(), SqlValue::Text("x".into()));
        assert_eq!(char::from_sql_value(SqlValue::Text("y".into())), Ok('y'));
        assert!(char::from_sql_value(SqlValue::Text("yz".into())).is_err());
        assert!(char::from_sql_value(SqlValue::Text(String::new())).is_err());
        assert!(char::from_sql_value(SqlValue::Int(1)).is_err());

        assert_eq!((-3_isize).to_sql_value(), SqlValue::Int(-3));
        assert_eq!(isize::from_sql_value(SqlValue::Int(-3)), Ok(-3));
        assert_eq!(Option::<isize>::from_sql_value(SqlValue::Null), Ok(None));
    }

    #[test]
    fn mismatches_name_both_sides() {
        let err = i64::from_sql_value(SqlValue::Text("x".into())).unwrap_err();
        assert_eq!(
            err,
            SqlError::Decode {
                expected: "i64",
                found:    "text"
            }
        );
    }

    #[test]
    fn null_decodes_to_none() {
        assert_eq!(Option::<i64>::from_sql_value(SqlValue::Null), Ok(None));
        assert_eq!(Option::<i64>::from_sql_value(SqlValue::Int(2)), Ok(Some(2)));
        assert!(i64::from_sql_value(SqlValue::Null).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(
            SqlValue::List(vec![SqlValue::Int(1), SqlValue::Text("a".into())]).to_string(),
            "(1, 'a')"
        );
        assert_eq!(SqlValue::Null.to_string(), "NULL");
    }
}

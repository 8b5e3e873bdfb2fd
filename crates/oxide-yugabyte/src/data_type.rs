//! Abstract column types and their YugabyteDB spelling.
//!
//! The host ORM describes columns with MySQL-flavoured types (lengths,
//! `UNSIGNED`, `ZEROFILL`, sized blobs). YugabyteDB follows PostgreSQL, so
//! most of those modifiers are dropped while rendering.

use crate::error::{DdlError, Result};
use crate::quote::escape_string;

/// Size class of `TEXT` and `BLOB` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    /// `TINY*`.
    Tiny,
    /// `MEDIUM*`.
    Medium,
    /// `LONG*`.
    Long,
}

/// Modifiers of integer types. None of them survive in YugabyteDB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntegerOptions {
    /// Display width.
    pub length: Option<u32>,
    /// `UNSIGNED`.
    pub unsigned: bool,
    /// `ZEROFILL`.
    pub zerofill: bool,
}

/// Modifiers of floating point types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FloatOptions {
    /// Total digits (or binary precision for `FLOAT`).
    pub length: Option<u32>,
    /// Digits after the decimal point.
    pub decimals: Option<u32>,
    /// `UNSIGNED`.
    pub unsigned: bool,
    /// `ZEROFILL`.
    pub zerofill: bool,
}

/// Column data types understood by the dialect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Variable-length string, 255 characters unless specified.
    String {
        /// Maximum length.
        length: Option<u32>,
        /// Binary string.
        binary: bool,
    },
    /// Unbounded text.
    Text(Option<SizeClass>),
    /// Case-insensitive text.
    Citext,
    /// Full-text search document.
    Tsvector,
    /// Fixed-length string, 255 characters unless specified.
    Char {
        /// Length.
        length: Option<u32>,
        /// Binary string.
        binary: bool,
    },
    /// Boolean.
    Boolean,
    /// Date and time with time zone. The precision is not rendered.
    Date(Option<u8>),
    /// Date without time.
    DateOnly,
    /// Time of day.
    Time,
    /// UUID.
    Uuid,
    /// 8-bit integer.
    TinyInt(IntegerOptions),
    /// 16-bit integer.
    SmallInt(IntegerOptions),
    /// 24-bit integer. Not available in YugabyteDB.
    MediumInt(IntegerOptions),
    /// 32-bit integer.
    Integer(IntegerOptions),
    /// 64-bit integer.
    BigInt(IntegerOptions),
    /// Single precision float.
    Real(FloatOptions),
    /// Double precision float.
    Double(FloatOptions),
    /// Float with optional binary precision.
    Float(FloatOptions),
    /// Exact numeric.
    Decimal {
        /// Total digits.
        precision: Option<u32>,
        /// Digits after the decimal point.
        scale: Option<u32>,
    },
    /// Enumerated type with the given labels.
    Enum(Vec<String>),
    /// Binary data.
    Blob(Option<SizeClass>),
    /// JSON document.
    Json,
    /// Binary JSON document.
    Jsonb,
    /// Array of another type.
    Array(Box<DataType>),
    /// PostGIS geometry.
    Geometry {
        /// Geometry kind such as `POINT`.
        kind: Option<String>,
        /// Spatial reference id.
        srid: Option<u32>,
    },
    /// PostGIS geography.
    Geography {
        /// Geography kind such as `POINT`.
        kind: Option<String>,
        /// Spatial reference id.
        srid: Option<u32>,
    },
    /// Key/value store.
    Hstore,
}

impl DataType {
    /// `STRING` with the default length.
    #[must_use]
    pub const fn string() -> Self {
        Self::String {
            length: None,
            binary: false,
        }
    }

    /// `STRING(length)`.
    #[must_use]
    pub const fn string_with_length(length: u32) -> Self {
        Self::String {
            length: Some(length),
            binary: false,
        }
    }

    /// `INTEGER` without modifiers.
    #[must_use]
    pub fn integer() -> Self {
        Self::Integer(IntegerOptions::default())
    }

    /// `BIGINT` without modifiers.
    #[must_use]
    pub fn bigint() -> Self {
        Self::BigInt(IntegerOptions::default())
    }

    /// `DECIMAL(precision, scale)`.
    #[must_use]
    pub const fn decimal(precision: u32, scale: u32) -> Self {
        Self::Decimal {
            precision: Some(precision),
            scale: Some(scale),
        }
    }

    /// `ENUM(values...)`.
    #[must_use]
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(values.into_iter().map(Into::into).collect())
    }

    /// `ARRAY(element)`.
    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    /// Returns the type key used by the ORM, for diagnostics.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::String { .. } => "STRING",
            Self::Text(_) => "TEXT",
            Self::Citext => "CITEXT",
            Self::Tsvector => "TSVECTOR",
            Self::Char { .. } => "CHAR",
            Self::Boolean => "BOOLEAN",
            Self::Date(_) => "DATE",
            Self::DateOnly => "DATEONLY",
            Self::Time => "TIME",
            Self::Uuid => "UUID",
            Self::TinyInt(_) => "TINYINT",
            Self::SmallInt(_) => "SMALLINT",
            Self::MediumInt(_) => "MEDIUMINT",
            Self::Integer(_) => "INTEGER",
            Self::BigInt(_) => "BIGINT",
            Self::Real(_) => "REAL",
            Self::Double(_) => "DOUBLE PRECISION",
            Self::Float(_) => "FLOAT",
            Self::Decimal { .. } => "DECIMAL",
            Self::Enum(_) => "ENUM",
            Self::Blob(_) => "BLOB",
            Self::Json => "JSON",
            Self::Jsonb => "JSONB",
            Self::Array(_) => "ARRAY",
            Self::Geometry { .. } => "GEOMETRY",
            Self::Geography { .. } => "GEOGRAPHY",
            Self::Hstore => "HSTORE",
        }
    }

    /// Renders the type as YugabyteDB SQL.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnsupportedDataType`] for `MEDIUMINT`.
    pub fn to_sql(&self) -> Result<String> {
        let sql = match self {
            Self::String { binary: true, .. } | Self::Char { binary: true, .. } | Self::Blob(_) => {
                "BYTEA".to_string()
            }
            Self::String { length, .. } => format!("VARCHAR({})", length.unwrap_or(255)),
            Self::Char { length, .. } => format!("CHAR({})", length.unwrap_or(255)),
            Self::Text(_) => "TEXT".to_string(),
            Self::Date(_) => "TIMESTAMP WITH TIME ZONE".to_string(),
            Self::DateOnly => "DATE".to_string(),
            Self::MediumInt(_) => {
                return Err(DdlError::UnsupportedDataType(self.key().to_string()));
            }
            Self::Float(FloatOptions {
                length: Some(length),
                decimals: None,
                ..
            }) => format!("FLOAT({length})"),
            Self::Decimal { precision, scale } => match (precision, scale) {
                (Some(p), Some(s)) => format!("DECIMAL({p},{s})"),
                (Some(p), None) => format!("DECIMAL({p})"),
                _ => "DECIMAL".to_string(),
            },
            Self::Enum(values) => {
                let labels: Vec<String> = values.iter().map(|v| escape_string(v)).collect();
                format!("ENUM({})", labels.join(", "))
            }
            Self::Array(element) => format!("{}[]", element.to_sql()?),
            Self::Geometry { kind, srid } | Self::Geography { kind, srid } => {
                match (kind, srid) {
                    (Some(kind), Some(srid)) => format!("{}({kind},{srid})", self.key()),
                    (Some(kind), None) => format!("{}({kind})", self.key()),
                    _ => self.key().to_string(),
                }
            }
            _ => self.key().to_string(),
        };
        Ok(sql)
    }
}

use std::{fmt, str::FromStr};

/// Schema document formats accepted by the schema adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    /// Avro record schema (`avro`)
    Avro,
    /// BigQuery table schema JSON array (`bigquery`)
    BigQuery,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Avro => "avro",
            Self::BigQuery => "bigquery",
        }
    }
}

impl FromStr for SchemaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "avro" => Ok(Self::Avro),
            "bigquery" => Ok(Self::BigQuery),
            other => Err(format!("unsupported schema type: {other}")),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

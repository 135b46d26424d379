use std::{fmt, str::FromStr};

/// Input record formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// Avro object container file (`avro`)
    Avro,
    /// Comma-separated values without header (`csv`)
    Csv,
    /// One JSON object per line (`jsonl`)
    Jsonl,
    /// Labeled tab-separated values (`ltsv`)
    Ltsv,
    /// A stream of MessagePack maps (`msgpack`)
    MsgPack,
    /// Tab-separated values without header (`tsv`)
    Tsv,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Avro => "avro",
            Self::Csv => "csv",
            Self::Jsonl => "jsonl",
            Self::Ltsv => "ltsv",
            Self::MsgPack => "msgpack",
            Self::Tsv => "tsv",
        }
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "avro" => Ok(Self::Avro),
            "csv" => Ok(Self::Csv),
            "jsonl" => Ok(Self::Jsonl),
            "ltsv" => Ok(Self::Ltsv),
            "msgpack" => Ok(Self::MsgPack),
            "tsv" => Ok(Self::Tsv),
            other => Err(format!("unsupported record type: {other}")),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

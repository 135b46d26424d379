pub mod convert;
pub mod schema;

use columnify::{RecordType, SchemaType};

pub(crate) fn parse_schema_type(raw: &str) -> Result<SchemaType, String> {
    raw.parse()
}

pub(crate) fn parse_record_type(raw: &str) -> Result<RecordType, String> {
    raw.parse()
}

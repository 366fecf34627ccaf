pub mod load_types;

pub use load_types::{
    decode_csu_record, ingest_types, load_types, load_types_from_path, load_types_with_cache,
    read_records,
};

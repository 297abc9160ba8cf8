//! Data models for stored objects.

pub mod record;

pub use record::FileRecord;

pub(crate) use record::ListingEntry;

pub mod error;
pub mod fingerprint;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod search;
pub mod supervisor;
pub mod vocabulary;

pub use error::{IngestError, Result};
pub use fingerprint::{collect_fingerprints, needs_reload, FingerprintSet};
pub use ingest::{
    discover_json_files, ingest_directory, load_directories, LoadReport, SkippedDirectory,
    SkippedFile, JSON_FILE_SUFFIX,
};
pub use models::{
    selector, AccountData, AugmentSlot, Bank, CharacterData, Clicky, Effect, Item, ItemFilter,
    Page, ResultPage, Tab, DEFAULT_MAX_LEVEL, DEFAULT_MIN_LEVEL, FILTER_ALL, ITEMS_PER_PAGE,
};
pub use normalize::{
    decode_document, normalize_bytes, normalize_file, SourceDocument, ACCOUNT_CRAFTING_BANK_OWNER,
    ACCOUNT_SHARED_BANK_OWNER,
};
pub use search::{filter_items, paginate};
pub use supervisor::{ReloadOutcome, ReloadSupervisor, Snapshot};
pub use vocabulary::Vocabularies;

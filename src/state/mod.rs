mod persistence;

pub use persistence::{
    FileStore,
    MemoryStore,
    PersistenceError,
    PersistenceResult,
    SAVE_FORMAT_VERSION,
    SaveDebouncer,
    SaveSnapshot,
    SaveStore,
    StatePersistence,
};

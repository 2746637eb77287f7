/// Qdrant default server port.
pub const QDRANT_DEFAULT_PORT: u16 = 6333;

/// Qdrant distance metric used for the canonical-dimension embedding space.
pub const QDRANT_DISTANCE_METRIC: &str = "Cosine";

/// Qdrant upsert batch size.
pub const QDRANT_UPSERT_BATCH_SIZE: usize = 100;

/// Stats JSON field: collection name.
pub const STATS_FIELD_COLLECTION: &str = "collection";

/// Stats JSON field: vector count.
pub const STATS_FIELD_VECTORS_COUNT: &str = "vectors_count";

pub mod cadence;
pub mod category_aliases;
pub mod category_predictor;
pub mod emoji_picker;
pub mod error;
pub mod fruit;
mod matching;

pub use cadence::{
    next_correction_factor, snooze, CadenceStore, MemoryCadenceStore, ProductCadence,
    ProductSnooze, SnoozeOutcome,
};
pub use category_aliases::{
    normalize_category_name, resolve_category_id, resolve_category_with_fallback,
};
pub use category_predictor::{
    default_classifier, predict_category_emoji, CategoryConcept, Classifier, Prediction,
    FALLBACK_CATEGORY, FALLBACK_EMOJI,
};
pub use emoji_picker::{EmojiEntry, EmojiPicker};
pub use error::{CatalogError, SnoozeError, StoreError};
pub use fruit::is_fruit;

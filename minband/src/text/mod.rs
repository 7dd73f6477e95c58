mod shingles;
mod stop_words;

pub use self::shingles::{
    is_punctuation_mark, k_shingle, remove_punctuation_marks, shingle, shingle_with, ShingleMode,
    STOP_WORD_SHINGLE_LEN,
};
pub use self::stop_words::{EnglishStopWords, StopWords};

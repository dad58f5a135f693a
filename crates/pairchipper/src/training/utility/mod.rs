//! # Trainer Implementation Utilities

mod pair_span_index;
#[doc(inline)]
pub use pair_span_index::{PairCountMap, PairIndexMap, PairSpanIndex};

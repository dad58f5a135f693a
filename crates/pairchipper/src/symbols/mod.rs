//! # Symbol Model
//!
//! * [`Symbol`] - an immutable unit of the alphabet, compared by content.
//! * [`SymbolSpan`] - the symbol sequence of one pre-token.
//! * [`FrequencyTable`] - ``{SymbolSpan -> count}``.
//! * [`SymbolAlphabet`] - how pre-tokens are decomposed into initial symbols.

mod alphabet;
mod frequency_table;
mod symbol;
mod symbol_span;

#[doc(inline)]
pub use alphabet::SymbolAlphabet;
#[doc(inline)]
pub use frequency_table::FrequencyTable;
#[doc(inline)]
pub use symbol::{Symbol, SymbolPair};
#[doc(inline)]
pub use symbol_span::SymbolSpan;

//! # Merge Records

use core::fmt::{Display, Formatter};

use crate::{
    symbols::{Symbol, SymbolPair},
    types::CountType,
};

/// One learned merge: the pair, the merged symbol, and the pair's
/// frequency when it was selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeRecord<C: CountType = u64> {
    pair: SymbolPair,
    merged: Symbol,
    frequency: C,
}

impl<C: CountType> MergeRecord<C> {
    /// Record a merge of `pair`.
    pub fn new(
        pair: SymbolPair,
        frequency: C,
    ) -> Self {
        let merged = pair.0.concat(&pair.1);
        Self {
            pair,
            merged,
            frequency,
        }
    }

    /// The merged pair.
    pub fn pair(&self) -> &SymbolPair {
        &self.pair
    }

    /// The left symbol.
    pub fn left(&self) -> &Symbol {
        &self.pair.0
    }

    /// The right symbol.
    pub fn right(&self) -> &Symbol {
        &self.pair.1
    }

    /// The merged symbol; ``left ++ right``.
    pub fn merged(&self) -> &Symbol {
        &self.merged
    }

    /// The aggregate pair frequency at selection time.
    pub fn frequency(&self) -> C {
        self.frequency
    }
}

impl<C: CountType> Display for MergeRecord<C> {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> core::fmt::Result {
        write!(f, "{} {}", self.left(), self.right())
    }
}

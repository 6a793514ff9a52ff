//! Prefetcher statistics collection and reporting.
//!
//! This module tracks the behaviour of a Markov prefetcher. It provides:
//! 1. **Training:** Misses observed, repeated misses filtered, and table updates
//!    split into promotions, insertions and evictions.
//! 2. **Issue:** Candidates emitted and candidates suppressed for crossing a page.
//! 3. **Reporting:** A plain-text report and a JSON rendering.

use std::fmt;

use serde::Serialize;

/// Counters maintained by a Markov prefetcher.
///
/// Counters only ever increase. None of them is consulted by the prediction
/// algorithm itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PrefetchStats {
    /// Miss notifications that passed the repeated-miss filter.
    pub misses: u64,
    /// Miss notifications dropped because they repeated the previous miss.
    pub duplicate_misses: u64,
    /// Successor lists updated with a newly observed transition.
    pub table_updates: u64,
    /// Updates that moved an already-known successor to the front.
    pub promotions: u64,
    /// Updates that inserted a successor not yet in the list.
    pub insertions: u64,
    /// Insertions that pushed a populated slot off the end of the list.
    pub evictions: u64,
    /// Prefetch candidates returned to the caller.
    pub candidates_issued: u64,
    /// Candidates suppressed because they lie on a different page.
    pub span_page: u64,
}

impl PrefetchStats {
    /// Fraction of stored successors that were dropped for crossing a page.
    pub fn span_page_ratio(&self) -> f64 {
        let considered = self.candidates_issued + self.span_page;
        if considered == 0 {
            0.0
        } else {
            self.span_page as f64 / considered as f64
        }
    }

    /// Renders the counters as a JSON object.
    ///
    /// # Errors
    ///
    /// Propagates any serializer failure.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for PrefetchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MARKOV PREFETCHER")?;
        writeln!(f, "  pf.misses                {}", self.misses)?;
        writeln!(f, "  pf.duplicate_misses      {}", self.duplicate_misses)?;
        writeln!(f, "  pf.table_updates         {}", self.table_updates)?;
        writeln!(f, "    promotions             {}", self.promotions)?;
        writeln!(f, "    insertions             {}", self.insertions)?;
        writeln!(f, "    evictions              {}", self.evictions)?;
        writeln!(f, "  pf.candidates_issued     {}", self.candidates_issued)?;
        write!(
            f,
            "  pf.span_page             {} ({:.2}%)",
            self.span_page,
            self.span_page_ratio() * 100.0
        )
    }
}

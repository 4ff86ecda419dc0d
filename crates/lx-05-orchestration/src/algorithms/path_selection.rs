//! Best path selection.

use crate::domain::{BestPathPolicy, PathQuote};

/// Best strict-send path: most delivered under `CompareAll`.
pub fn select_strict_send(quotes: &[PathQuote], policy: BestPathPolicy) -> Option<&PathQuote> {
    match policy {
        BestPathPolicy::FirstAsBest => quotes.first(),
        BestPathPolicy::CompareAll => quotes.iter().fold(None, |best: Option<&PathQuote>, q| match best {
            Some(b) if b.destination_amount >= q.destination_amount => Some(b),
            _ => Some(q),
        }),
    }
}

/// Best strict-receive path: least spent under `CompareAll`.
pub fn select_strict_receive(quotes: &[PathQuote], policy: BestPathPolicy) -> Option<&PathQuote> {
    match policy {
        BestPathPolicy::FirstAsBest => quotes.first(),
        BestPathPolicy::CompareAll => quotes.iter().fold(None, |best: Option<&PathQuote>, q| match best {
            Some(b) if b.source_amount <= q.source_amount => Some(b),
            _ => Some(q),
        }),
    }
}

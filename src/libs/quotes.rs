//! Morale-boosting quotes attached to welcome-back and inactivity events.

/// Supplies an optional quote each time an event wants one.
pub trait QuoteSource: Send {
    fn next_quote(&mut self) -> Option<String>;
}

impl<F> QuoteSource for F
where
    F: FnMut() -> Option<String> + Send,
{
    fn next_quote(&mut self) -> Option<String> {
        self()
    }
}

const QUOTES: &[&str] = &[
    "The secret of getting ahead is getting started.",
    "Focus on being productive instead of busy.",
    "Done is better than perfect.",
    "Small steps every day add up.",
    "You don't have to see the whole staircase, just take the first step.",
    "Rest when you're weary. Refresh and renew yourself.",
    "Well begun is half done.",
    "Action is the foundational key to all success.",
];

/// Built-in quote list, handed out in rotation.
#[derive(Debug, Default, Clone)]
pub struct Quotes {
    next: usize,
}

impl Quotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the rotation at an arbitrary position so consecutive runs
    /// don't always open with the same line.
    pub fn seeded(seed: usize) -> Self {
        Self { next: seed % QUOTES.len() }
    }
}

impl QuoteSource for Quotes {
    fn next_quote(&mut self) -> Option<String> {
        let quote = QUOTES[self.next % QUOTES.len()];
        self.next = (self.next + 1) % QUOTES.len();
        Some(quote.to_string())
    }
}

//! Stochastic content generators for test variations
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

/// How a generated tag ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closing {
    /// `<tag ...>body</tag>`
    Explicit,
    /// `<tag .../>`
    SelfClose,
    /// `<tag ...>` followed directly by another tag
    NextTag,
    /// `<img ...>`, a void element with no close tag
    Void,
}

/// A tag to render with random quoting, spacing and attribute order
#[derive(Debug, Clone)]
pub struct TagSpec {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub body: Option<String>,
    pub closing: Closing,
}

impl TagSpec {
    pub fn new(name: &str, closing: Closing) -> Self {
        Self {
            name: name.to_owned(),
            attributes: Vec::new(),
            body: None,
            closing,
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = Some(body.to_owned());
        self
    }
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from environment or random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("ASSETSCAN_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| rand::random());
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    /// Returns 0, 1, 2, ... with decreasing probability
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Pick one element of a non-empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.gen_range(0..items.len())]
    }

    /// Random lowercase identifier
    pub fn identifier(&mut self) -> String {
        let len = 1 + self.geometric(0.7);
        let chars = b"abcdefghijklmnopqrstuvwxyz0123456789-_";
        let mut name = String::with_capacity(len);
        name.push(self.rng.gen_range(b'a'..=b'z') as char);
        for _ in 1..len {
            name.push(chars[self.rng.gen_range(0..chars.len())] as char);
        }
        name
    }

    /// Random value safe to write unquoted (no spaces, quotes, '/' or '>')
    pub fn bare_value(&mut self) -> String {
        let len = 1 + self.geometric(0.8);
        let chars = b"abcdefghijklmnopqrstuvwxyz0123456789-_.";
        (0..len)
            .map(|_| chars[self.rng.gen_range(0..chars.len())] as char)
            .collect()
    }

    /// Whitespace separating attributes (at least one byte)
    pub fn whitespace(&mut self) -> String {
        let mut out = String::from(*self.pick(&[" ", "\t", "\n"]));
        for _ in 0..self.geometric(0.3) {
            out.push_str(*self.pick(&[" ", "\t", "\n", "\r\n"]));
        }
        out
    }

    /// Optional whitespace (often empty)
    pub fn maybe_whitespace(&mut self) -> String {
        if self.chance(0.3) {
            self.whitespace()
        } else {
            String::new()
        }
    }

    /// Quote `value` with a random style it can survive
    pub fn quote(&mut self, value: &str) -> String {
        let bare_ok = !value.is_empty()
            && !value
                .bytes()
                .any(|b| b.is_ascii_whitespace() || matches!(b, b'"' | b'\'' | b'/' | b'>' | b'='));
        let style = self.rng.gen_range(0..3);
        if style == 0 && bare_ok {
            value.to_owned()
        } else if style == 1 && !value.contains('\'') {
            format!("'{}'", value)
        } else {
            format!("\"{}\"", value)
        }
    }

    /// Balanced markup that references no asset
    pub fn filler(&mut self) -> String {
        let mut out = String::new();
        for _ in 0..1 + self.geometric(0.5) {
            let tag = *self.pick(&["div", "p", "span", "section"]);
            out.push('<');
            out.push_str(tag);
            if self.chance(0.5) {
                out.push_str(" class=");
                let value = self.bare_value();
                out.push_str(&self.quote(&value));
            }
            out.push('>');
            if self.chance(0.3) {
                out.push_str("<br>");
            }
            out.push_str("some text");
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
            out.push_str(*self.pick(&["\n", "\r\n", " ", ""]));
        }
        out
    }

    /// Render `spec` with random formatting.
    ///
    /// The result is exactly the text an asset span over this tag covers.
    pub fn render(&mut self, spec: &TagSpec) -> String {
        let mut attributes = spec.attributes.clone();
        for i in (1..attributes.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            attributes.swap(i, j);
        }

        let mut out = format!("<{}", spec.name);
        for (name, value) in &attributes {
            out.push_str(&self.whitespace());
            out.push_str(name);
            out.push_str(&self.maybe_whitespace());
            out.push('=');
            out.push_str(&self.maybe_whitespace());
            out.push_str(&self.quote(value));
        }

        match spec.closing {
            Closing::SelfClose => {
                out.push_str(&self.maybe_whitespace());
                out.push_str("/>");
            }
            Closing::Explicit => {
                out.push_str(&self.maybe_whitespace());
                out.push('>');
                out.push_str(spec.body.as_deref().unwrap_or(""));
                out.push_str("</");
                out.push_str(&spec.name);
                out.push_str(&self.maybe_whitespace());
                out.push('>');
            }
            Closing::NextTag | Closing::Void => {
                out.push_str(&self.maybe_whitespace());
                out.push('>');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducibility() {
        let mut g1 = Gen::new(42);
        let mut g2 = Gen::new(42);

        for _ in 0..10 {
            assert_eq!(g1.identifier(), g2.identifier());
            assert_eq!(g1.filler(), g2.filler());
        }
    }

    #[test]
    fn test_geometric_distribution() {
        let mut gen = Gen::new(12345);
        let samples: Vec<usize> = (0..1000).map(|_| gen.geometric(0.9)).collect();

        // With α=0.9, we expect mean ≈ 9 (geometric mean = α/(1-α))
        let mean: f64 = samples.iter().sum::<usize>() as f64 / samples.len() as f64;
        assert!(mean > 5.0 && mean < 15.0, "Mean {} out of expected range", mean);
    }

    #[test]
    fn test_quote_keeps_unsafe_values_quoted() {
        let mut gen = Gen::new(7);
        for _ in 0..50 {
            let quoted = gen.quote("a b");
            assert!(quoted == "'a b'" || quoted == "\"a b\"", "{}", quoted);
        }
    }
}

//! Decorative intro line and author attribution for posted replacements.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use cleanlinks_core::types::Author;

pub const INTROS: &[&str] = &[
    "🪲 Użyłem sprayu na wścibskie pluskwy",
    "🦠 Odkaziłem tę wiadomość z brudu marketingowego",
    "🧼 Zeskrobałem tracking jak starą farbę z okna",
    "🫧 Przepuściłem link przez pralkę na 90°C",
    "🐛 Wyczesałem wszy z tego URL-a",
    "🧹 Usunąłem cyfrowe glutki, proszę bardzo",
    "🥛 Wyprałem ten link w sodzie oczyszczonej",
    "🪱 Pozbawiłem ten link pasożytów śledzących",
    "🫧 Odrdzewiłem i wypolerowałem go na błysk",
    "🗑️  Wyrzuciłem śledzące robaczki do kosza",
];

/// Attribution used when the author has neither handle nor name.
pub const ANONYMOUS: &str = "anon";

/// Picks an intro phrase at random.
pub struct IntroPicker {
    rng: Mutex<StdRng>,
}

impl IntroPicker {
    /// Seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic sequence, for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn pick(&self) -> &'static str {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        INTROS.choose(&mut *rng).copied().unwrap_or(INTROS[0])
    }
}

impl Default for IntroPicker {
    fn default() -> Self {
        Self::new()
    }
}

/// `@handle`, else display name, else [`ANONYMOUS`].
pub fn attribution(author: Option<&Author>) -> String {
    let Some(author) = author else {
        return ANONYMOUS.to_string();
    };
    match author.username.as_deref() {
        Some(handle) if !handle.is_empty() => format!("@{handle}"),
        _ if !author.full_name.trim().is_empty() => author.full_name.trim().to_string(),
        _ => ANONYMOUS.to_string(),
    }
}

/// Final outbound text: intro, attribution line, then the cleaned message.
pub fn compose(intro: &str, author: &str, body: &str) -> String {
    format!("{intro}\nOd {author}:\n{body}")
}

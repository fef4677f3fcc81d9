//! Example: building a message filter around an Automaton.
//!
//! This shows how to wrap the automaton in a small domain type: a filter built
//! once from a banned-word list, then shared by every check.
//!
//! Run with: cargo run --example banned_words

use libacmatch::automaton::Automaton;

/// Rejects messages containing any banned word.
struct MessageFilter {
    banned: Automaton<char>,
}

impl MessageFilter {
    fn new(words: &[&str]) -> Self {
        MessageFilter {
            banned: Automaton::new(words),
        }
    }

    /// Returns true if the message contains no banned word.
    fn allows(&self, message: &str) -> bool {
        !self.banned.is_match(message)
    }

    /// Returns the banned words found in the message.
    fn offending_words(&self, message: &str) -> Vec<String> {
        self.banned.matched_patterns(message)
    }

    /// Replaces every banned occurrence with asterisks.
    fn redact(&self, message: &str) -> String {
        let mut chars: Vec<char> = message.chars().collect();
        for m in self.banned.find_iter_str(message) {
            chars[m.start()..m.end()].fill('*');
        }
        chars.into_iter().collect()
    }
}

fn main() {
    let filter = MessageFilter::new(&["spam", "scam", "free money", "免费"]);

    let messages = [
        "Lunch at noon?",
        "Totally not a scam: free money inside",
        "spamspamspam",
        "点击领取免费礼品",
    ];

    println!("Message check:");
    for message in messages {
        println!(
            "  {message:?}: {}",
            if filter.allows(message) { "allowed" } else { "rejected" }
        );
    }

    println!("\nOffending words:");
    for message in messages {
        println!("  {message:?}: {:?}", filter.offending_words(message));
    }

    println!("\nRedacted:");
    for message in messages {
        println!("  {}", filter.redact(message));
    }
}

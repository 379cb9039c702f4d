//! Secret-code easter egg.
//!
//! Keystrokes typed anywhere are kept in a small ring buffer. After each
//! keystroke the buffer is scanned for registered codes; the first code that
//! is still locked and appears in the buffer latches its reward.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Number of keystrokes remembered by the matcher.
pub const KEY_BUFFER_CAPACITY: usize = 10;

/// Reward granted by a secret code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reward {
    Fireworks,
    Star,
    Letter,
}

impl Reward {
    pub fn name(&self) -> &'static str {
        match self {
            Reward::Fireworks => "fireworks",
            Reward::Star => "star",
            Reward::Letter => "letter",
        }
    }
}

impl fmt::Display for Reward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A registered code and its one-way unlock latch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretCode {
    pub code: String,
    pub unlocked: bool,
    pub reward: Reward,
}

impl SecretCode {
    pub fn new(code: impl Into<String>, reward: Reward) -> Self {
        Self {
            code: code.into().to_lowercase(),
            unlocked: false,
            reward,
        }
    }
}

/// Outcome of a successful match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretUnlock {
    pub code: String,
    pub reward: Reward,
}

impl From<&SecretCode> for SecretUnlock {
    fn from(secret: &SecretCode) -> Self {
        Self {
            code: secret.code.clone(),
            reward: secret.reward,
        }
    }
}

/// Fixed-capacity ring buffer of the most recent keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBuffer {
    slots: [char; KEY_BUFFER_CAPACITY],
    /// Index of the oldest character.
    head: usize,
    len: usize,
}

impl Default for KeyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBuffer {
    pub fn new() -> Self {
        Self {
            slots: ['\0'; KEY_BUFFER_CAPACITY],
            head: 0,
            len: 0,
        }
    }

    /// Append a character, evicting the oldest one when full.
    pub fn push(&mut self, ch: char) {
        if self.len < KEY_BUFFER_CAPACITY {
            self.slots[(self.head + self.len) % KEY_BUFFER_CAPACITY] = ch;
            self.len += 1;
        } else {
            self.slots[self.head] = ch;
            self.head = (self.head + 1) % KEY_BUFFER_CAPACITY;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Characters from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        (0..self.len).map(move |i| self.slots[(self.head + i) % KEY_BUFFER_CAPACITY])
    }

    pub fn as_string(&self) -> String {
        self.iter().collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        !needle.is_empty() && self.as_string().contains(needle)
    }
}

/// Matches keystrokes against the registered secret codes.
#[derive(Debug, Clone, PartialEq)]
pub struct SecretMatcher {
    codes: Vec<SecretCode>,
    buffer: KeyBuffer,
}

impl SecretMatcher {
    pub fn new(codes: Vec<SecretCode>) -> Self {
        Self {
            codes,
            buffer: KeyBuffer::new(),
        }
    }

    pub fn codes(&self) -> &[SecretCode] {
        &self.codes
    }

    pub fn buffer(&self) -> &KeyBuffer {
        &self.buffer
    }

    pub fn is_unlocked(&self, reward: Reward) -> bool {
        self.codes.iter().any(|c| c.reward == reward && c.unlocked)
    }

    /// The code that would unlock if `key` were typed next, without typing it.
    ///
    /// Returns the first still-locked code in registration order, so at most
    /// one code unlocks per keystroke.
    pub fn match_key(&self, key: char) -> Option<SecretUnlock> {
        if !key.is_ascii_alphabetic() {
            return None;
        }
        let mut buffer = self.buffer;
        buffer.push(key.to_ascii_lowercase());
        let typed = buffer.as_string();
        self.codes
            .iter()
            .find(|c| !c.unlocked && !c.code.is_empty() && typed.contains(&c.code))
            .map(SecretUnlock::from)
    }

    /// The still-locked code exactly matching `input`, without latching it.
    pub fn match_code(&self, input: &str) -> Option<SecretUnlock> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return None;
        }
        let found = self
            .codes
            .iter()
            .find(|c| !c.unlocked && c.code == input)
            .map(SecretUnlock::from);
        if found.is_none() {
            debug!(input = %input, "secret code rejected");
        }
        found
    }

    /// Append a keystroke to the buffer. Non-alphabetic keys are ignored.
    pub fn record_key(&mut self, key: char) {
        if key.is_ascii_alphabetic() {
            self.buffer.push(key.to_ascii_lowercase());
        }
    }

    /// Latch a code by name. Returns false if it was unknown or already unlocked.
    pub fn latch_code(&mut self, code: &str) -> bool {
        match self.codes.iter().position(|c| c.code == code && !c.unlocked) {
            Some(index) => {
                self.latch(index);
                true
            }
            None => false,
        }
    }

    /// Record a keystroke and latch the first locked code now in the buffer.
    ///
    /// Non-alphabetic keys are ignored. At most one code unlocks per call.
    pub fn push_key(&mut self, key: char) -> Option<SecretUnlock> {
        let unlock = self.match_key(key);
        self.record_key(key);
        if let Some(unlock) = &unlock {
            self.latch_code(&unlock.code);
        }
        unlock
    }

    /// Unlock a code typed in full, e.g. into a text field.
    pub fn try_code(&mut self, input: &str) -> Option<SecretUnlock> {
        let unlock = self.match_code(input)?;
        self.latch_code(&unlock.code);
        Some(unlock)
    }

    fn latch(&mut self, index: usize) {
        let secret = &mut self.codes[index];
        secret.unlocked = true;
        info!(code = %secret.code, reward = %secret.reward, "secret code unlocked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::secret_codes;

    fn type_str(matcher: &mut SecretMatcher, text: &str) -> Vec<SecretUnlock> {
        text.chars().filter_map(|c| matcher.push_key(c)).collect()
    }

    #[test]
    fn test_buffer_keeps_last_ten() {
        let mut buffer = KeyBuffer::new();
        for c in "abcdefghijklm".chars() {
            buffer.push(c);
        }
        assert_eq!(buffer.len(), KEY_BUFFER_CAPACITY);
        assert_eq!(buffer.as_string(), "defghijklm");
    }

    #[test]
    fn test_buffer_partial_fill() {
        let mut buffer = KeyBuffer::new();
        assert!(buffer.is_empty());
        buffer.push('x');
        buffer.push('y');
        assert_eq!(buffer.as_string(), "xy");
        assert!(buffer.contains("xy"));
        assert!(!buffer.contains(""));
        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_forever_unlocks_fireworks_once() {
        let mut matcher = SecretMatcher::new(secret_codes());
        let unlocks = type_str(&mut matcher, "forever");
        assert_eq!(
            unlocks,
            vec![SecretUnlock {
                code: "forever".to_string(),
                reward: Reward::Fireworks,
            }]
        );
        assert!(type_str(&mut matcher, "forever").is_empty());
        assert!(matcher.is_unlocked(Reward::Fireworks));
    }

    #[test]
    fn test_code_found_after_noise() {
        let mut matcher = SecretMatcher::new(secret_codes());
        let unlocks = type_str(&mut matcher, "qqqqqqqqqqqqlove");
        assert_eq!(unlocks.len(), 1);
        assert_eq!(unlocks[0].reward, Reward::Star);
    }

    #[test]
    fn test_code_split_beyond_window_does_not_match() {
        let mut matcher = SecretMatcher::new(secret_codes());
        // Eleven letters between "l" and "ove" push the "l" out of the window.
        assert!(type_str(&mut matcher, "lzzzzzzzzzzzove").is_empty());
    }

    #[test]
    fn test_non_letters_ignored_and_case_folded() {
        let mut matcher = SecretMatcher::new(secret_codes());
        assert!(matcher.push_key('1').is_none());
        assert!(matcher.push_key(' ').is_none());
        assert!(matcher.buffer().is_empty());
        let unlocks = type_str(&mut matcher, "LoVe");
        assert_eq!(unlocks[0].reward, Reward::Star);
    }

    #[test]
    fn test_short_code_inside_buffer() {
        let mut matcher = SecretMatcher::new(secret_codes());
        let unlocks = type_str(&mut matcher, "trust");
        assert_eq!(unlocks.len(), 1);
        assert_eq!(unlocks[0].reward, Reward::Letter);
    }

    #[test]
    fn test_one_unlock_per_keystroke_in_registration_order() {
        let mut matcher = SecretMatcher::new(vec![
            SecretCode::new("ab", Reward::Fireworks),
            SecretCode::new("b", Reward::Letter),
        ]);
        assert!(matcher.push_key('a').is_none());

        // "b" completes both codes; only the first registered one latches
        let first = matcher.push_key('b').unwrap();
        assert_eq!(first.reward, Reward::Fireworks);
        assert!(!matcher.is_unlocked(Reward::Letter));

        // The other is still in the buffer and latches on the next letter
        assert!(matcher.push_key('7').is_none());
        let second = matcher.push_key('z').unwrap();
        assert_eq!(second.reward, Reward::Letter);
        assert!(matcher.push_key('b').is_none());
    }

    #[test]
    fn test_matching_does_not_record() {
        let mut matcher = SecretMatcher::new(secret_codes());
        for c in "lov".chars() {
            matcher.record_key(c);
        }
        let unlock = matcher.match_key('e').unwrap();
        assert_eq!(unlock.reward, Reward::Star);
        assert_eq!(matcher.buffer().as_string(), "lov");
        assert!(!matcher.is_unlocked(Reward::Star));

        assert!(matcher.latch_code(&unlock.code));
        assert!(!matcher.latch_code(&unlock.code));
        assert!(matcher.match_key('e').is_none());
    }

    #[test]
    fn test_try_code_exact_only() {
        let mut matcher = SecretMatcher::new(secret_codes());
        assert!(matcher.try_code("lovely").is_none());
        assert!(matcher.try_code("   ").is_none());
        let unlock = matcher.try_code("  LOVE ").unwrap();
        assert_eq!(unlock.reward, Reward::Star);
        assert!(matcher.try_code("love").is_none());
    }
}

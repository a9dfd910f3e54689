
use super::source::SourceOffset;

use regex::Regex;
use once_cell::sync::Lazy;

static LEADING_SPACE_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^\s*").unwrap());

/// Cursor over a serialized expression. Tracks the absolute position
/// of the unread suffix so errors can report where they happened.
#[derive(Debug, Clone)]
pub struct TokenizerState<'a> {
  input: &'a str,
  position: SourceOffset,
}

impl<'a> TokenizerState<'a> {
  pub fn new(input: &'a str) -> Self {
    Self {
      input,
      position: SourceOffset(0),
    }
  }

  pub fn remaining_len(&self) -> usize {
    self.input.len()
  }

  pub fn is_eof(&self) -> bool {
    self.input.is_empty()
  }

  pub fn peek(&self) -> Option<char> {
    self.input.chars().next()
  }

  pub fn current_pos(&self) -> SourceOffset {
    self.position
  }

  /// Advances the position of `self` by `amount` bytes and returns the
  /// skipped portion. Never advances beyond the end of the input.
  pub fn advance(&mut self, mut amount: usize) -> &'a str {
    amount = amount.min(self.input.len());
    let (prefix, suffix) = self.input.split_at(amount);
    self.position += amount;
    self.input = suffix;
    prefix
  }

  pub fn read_literal(&mut self, literal: &str) -> Option<&'a str> {
    self.input.starts_with(literal).then(|| {
      self.advance(literal.len())
    })
  }

  /// Consumes the match of `regex` at the cursor and returns
  /// it. Leaves the cursor untouched when nothing matches here.
  ///
  /// Patterns are expected to start with `^`; a match found further
  /// into the input is a caller bug and panics.
  pub fn read_regex(&mut self, regex: &Regex) -> Option<&'a str> {
    let m = regex.find(self.input)?;
    assert_eq!(m.start(), 0, "Regex must be anchored at the start of the input");
    Some(self.advance(m.len()))
  }

  pub fn consume_spaces(&mut self) {
    // `\s*` matches the empty string, so this never fails.
    self.read_regex(&LEADING_SPACE_RE);
  }
}

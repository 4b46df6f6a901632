//! Fixed-width code entry buffer for one-time codes.

/// Ordered sequence of fixed-width character slots holding the user's
/// in-progress code entry.
///
/// Each slot holds exactly one ASCII digit or is empty. The buffer is
/// complete iff every slot is filled, at which point the concatenation of
/// the slots is the candidate code. The buffer also tracks which slot has
/// focus so a host can mirror it onto its input controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBuffer {
    slots: Vec<Option<char>>,
    focus: usize,
}

impl CodeBuffer {
    /// Creates an empty buffer of `width` slots with focus on the first slot.
    pub fn new(width: usize) -> Self {
        debug_assert!(width > 0, "code buffer width must be non-zero");
        Self {
            slots: vec![None; width],
            focus: 0,
        }
    }

    /// Number of slots in the buffer.
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    /// Index of the currently focused slot.
    pub fn focused_slot(&self) -> usize {
        self.focus
    }

    /// Current slot contents, in order.
    pub fn slots(&self) -> &[Option<char>] {
        &self.slots
    }

    /// `true` iff every slot holds a digit.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// The candidate code, if the buffer is complete.
    pub fn code(&self) -> Option<String> {
        if self.is_complete() {
            Some(self.slots.iter().map(|s| s.unwrap()).collect())
        } else {
            None
        }
    }

    /// Empties every slot and returns focus to the first one.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.focus = 0;
    }

    /// Handles a keystroke on the focused slot.
    ///
    /// Only a single ASCII digit is accepted; anything else is rejected and
    /// the buffer is left untouched. On accept, the digit fills the focused
    /// slot and focus advances to the next slot (staying on the last slot
    /// once reached).
    ///
    /// Returns `true` if the keystroke was accepted.
    pub fn press_digit(&mut self, ch: char) -> bool {
        if !ch.is_ascii_digit() {
            return false;
        }
        self.slots[self.focus] = Some(ch);
        if self.focus + 1 < self.slots.len() {
            self.focus += 1;
        }
        true
    }

    /// Handles a backspace keystroke on the focused slot.
    ///
    /// A backspace on a filled slot empties it; a backspace on an empty
    /// slot retreats focus to the previous slot instead.
    pub fn press_backspace(&mut self) {
        if self.slots[self.focus].is_some() {
            self.slots[self.focus] = None;
        } else if self.focus > 0 {
            self.focus -= 1;
        }
    }

    /// Handles a paste of arbitrary text.
    ///
    /// Non-digit characters are stripped and the rest truncated to the
    /// buffer width, then distributed left-to-right across the slots.
    /// Focus lands on the last filled slot (the final slot when the pasted
    /// text meets or exceeds the buffer width). A paste with no digits is
    /// a no-op.
    pub fn paste(&mut self, text: &str) {
        let digits: Vec<char> = text
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(self.slots.len())
            .collect();
        if digits.is_empty() {
            return;
        }

        self.slots.iter_mut().for_each(|s| *s = None);
        for (i, ch) in digits.iter().enumerate() {
            self.slots[i] = Some(*ch);
        }
        self.focus = digits.len() - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_empty_and_focused_on_first_slot() {
        let buffer = CodeBuffer::new(6);

        assert_eq!(buffer.width(), 6);
        assert_eq!(buffer.focused_slot(), 0);
        assert!(!buffer.is_complete());
        assert_eq!(buffer.code(), None);
    }

    #[test]
    fn test_digit_fills_slot_and_advances_focus() {
        let mut buffer = CodeBuffer::new(4);

        assert!(buffer.press_digit('1'));
        assert_eq!(buffer.slots()[0], Some('1'));
        assert_eq!(buffer.focused_slot(), 1);
    }

    #[test]
    fn test_non_digit_is_rejected() {
        let mut buffer = CodeBuffer::new(4);

        assert!(!buffer.press_digit('a'));
        assert!(!buffer.press_digit(' '));
        assert!(!buffer.press_digit('!'));
        assert_eq!(buffer.slots()[0], None);
        assert_eq!(buffer.focused_slot(), 0);
    }

    #[test]
    fn test_complete_iff_every_slot_filled() {
        let mut buffer = CodeBuffer::new(4);
        for ch in ['1', '2', '3'] {
            buffer.press_digit(ch);
        }
        assert!(!buffer.is_complete());

        buffer.press_digit('4');
        assert!(buffer.is_complete());
        assert_eq!(buffer.code(), Some("1234".to_string()));
    }

    #[test]
    fn test_focus_stays_on_last_slot() {
        let mut buffer = CodeBuffer::new(4);
        for ch in ['1', '2', '3', '4'] {
            buffer.press_digit(ch);
        }
        assert_eq!(buffer.focused_slot(), 3);

        // Typing into the full last slot replaces its digit
        buffer.press_digit('9');
        assert_eq!(buffer.code(), Some("1239".to_string()));
    }

    #[test]
    fn test_backspace_on_filled_slot_empties_it() {
        let mut buffer = CodeBuffer::new(4);
        for ch in ['1', '2', '3', '4'] {
            buffer.press_digit(ch);
        }

        buffer.press_backspace();
        assert_eq!(buffer.slots()[3], None);
        assert_eq!(buffer.focused_slot(), 3);
    }

    #[test]
    fn test_backspace_on_empty_slot_retreats_focus() {
        let mut buffer = CodeBuffer::new(4);
        buffer.press_digit('1');
        assert_eq!(buffer.focused_slot(), 1);

        buffer.press_backspace();
        assert_eq!(buffer.focused_slot(), 0);
        assert_eq!(buffer.slots()[0], Some('1'));

        buffer.press_backspace();
        assert_eq!(buffer.slots()[0], None);
        assert_eq!(buffer.focused_slot(), 0);
    }

    #[test]
    fn test_paste_full_width_fills_all_slots_and_focuses_last() {
        let mut buffer = CodeBuffer::new(6);
        buffer.paste("123456");

        assert!(buffer.is_complete());
        assert_eq!(buffer.code(), Some("123456".to_string()));
        assert_eq!(buffer.focused_slot(), 5);
    }

    #[test]
    fn test_paste_strips_non_digits_and_truncates() {
        let mut buffer = CodeBuffer::new(6);
        buffer.paste("code: 12-34-56-78");

        assert_eq!(buffer.code(), Some("123456".to_string()));
        assert_eq!(buffer.focused_slot(), 5);
    }

    #[test]
    fn test_paste_shorter_than_width_focuses_last_filled_slot() {
        let mut buffer = CodeBuffer::new(6);
        buffer.paste("123");

        assert!(!buffer.is_complete());
        assert_eq!(buffer.slots()[2], Some('3'));
        assert_eq!(buffer.slots()[3], None);
        assert_eq!(buffer.focused_slot(), 2);
    }

    #[test]
    fn test_paste_replaces_previous_digits() {
        let mut buffer = CodeBuffer::new(4);
        buffer.press_digit('9');
        buffer.press_digit('9');

        buffer.paste("12");
        assert_eq!(buffer.slots()[0], Some('1'));
        assert_eq!(buffer.slots()[1], Some('2'));
        assert_eq!(buffer.slots()[2], None);
    }

    #[test]
    fn test_paste_without_digits_is_a_noop() {
        let mut buffer = CodeBuffer::new(4);
        buffer.press_digit('7');

        buffer.paste("no digits here");
        assert_eq!(buffer.slots()[0], Some('7'));
        assert_eq!(buffer.focused_slot(), 1);
    }

    #[test]
    fn test_clear_resets_slots_and_focus() {
        let mut buffer = CodeBuffer::new(4);
        buffer.paste("1234");

        buffer.clear();
        assert!(buffer.slots().iter().all(Option::is_none));
        assert_eq!(buffer.focused_slot(), 0);
    }
}

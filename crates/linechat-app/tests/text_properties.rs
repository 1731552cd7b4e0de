//! Property-based tests for the text structures.

use linechat_app::{EditBuffer, RingLog};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Edit {
    Insert(char),
    Backspace,
    Left,
    Right,
    MoveTo(usize),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        4 => any::<char>().prop_map(Edit::Insert),
        1 => Just(Edit::Backspace),
        1 => Just(Edit::Left),
        1 => Just(Edit::Right),
        1 => (0usize..64).prop_map(Edit::MoveTo),
    ]
}

proptest! {
    #[test]
    fn ring_log_matches_model(capacity in 1usize..12, lines in prop::collection::vec("[a-z]{0,6}", 0..40)) {
        let mut log = RingLog::new(capacity);
        for line in &lines {
            log.append(line.as_str());
        }

        for n in 0..capacity + 2 {
            let expected = if n < capacity && n < lines.len() {
                lines[lines.len() - 1 - n].as_str()
            } else {
                ""
            };
            prop_assert_eq!(log.get(n), expected);
        }
        prop_assert_eq!(log.len(), lines.len().min(capacity));
    }

    #[test]
    fn edit_offsets_stay_consistent(edits in prop::collection::vec(edit_strategy(), 0..60)) {
        let mut buffer = EditBuffer::new();
        for edit in edits {
            match edit {
                Edit::Insert(c) => buffer.insert_char(c),
                Edit::Backspace => buffer.delete_char_backward(),
                Edit::Left => buffer.move_cursor_backward(),
                Edit::Right => buffer.move_cursor_forward(),
                Edit::MoveTo(offset) => buffer.move_cursor_to(offset),
            }

            let offset = buffer.byte_offset();
            prop_assert!(buffer.text().is_char_boundary(offset));
            prop_assert_eq!(buffer.codepoint_offset(), buffer.text()[..offset].chars().count());
            prop_assert!(buffer.visual_offset() >= buffer.codepoint_offset());
        }
    }

    #[test]
    fn typed_text_round_trips(text in "\\PC{0,40}") {
        let mut buffer = EditBuffer::new();
        for c in text.chars() {
            buffer.insert_char(c);
        }

        prop_assert_eq!(buffer.codepoint_offset(), text.chars().count());
        prop_assert_eq!(buffer.take_and_clear(), text);
        prop_assert!(buffer.is_empty());
        prop_assert_eq!(buffer.visual_offset(), 0);
    }

    #[test]
    fn backspacing_everything_restores_empty(text in "\\PC{0,40}") {
        let mut buffer = EditBuffer::new();
        for c in text.chars() {
            buffer.insert_char(c);
        }
        for _ in text.chars() {
            buffer.delete_char_backward();
        }

        prop_assert!(buffer.is_empty());
        prop_assert_eq!(buffer.byte_offset(), 0);
        prop_assert_eq!(buffer.codepoint_offset(), 0);
        prop_assert_eq!(buffer.visual_offset(), 0);
    }
}

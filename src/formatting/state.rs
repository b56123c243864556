// src/formatting/state.rs
//! Immutable rendering state threaded through sibling blocks.

use crate::constants::INDENT_SPACES;

/// Where the renderer currently is inside an exercise.
///
/// All transitions return new instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderState {
    /// Exercise being rendered, used in error reports.
    pub exercise: usize,
    /// Nesting depth below the exercise's top-level tasks.
    pub depth: usize,
    /// Number of the previous sibling when it was a numbered list item.
    pub list_number: Option<usize>,
}

impl RenderState {
    pub fn for_exercise(exercise: usize) -> Self {
        Self {
            exercise,
            ..Self::default()
        }
    }

    /// State for the children of the current block.
    pub fn enter_children(self) -> Self {
        Self {
            depth: self.depth + 1,
            list_number: None,
            ..self
        }
    }

    /// Advances the numbered-list counter and returns the number to print.
    pub fn next_number(self) -> (usize, Self) {
        let number = self.list_number.map_or(1, |n| n + 1);
        (
            number,
            Self {
                list_number: Some(number),
                ..self
            },
        )
    }

    /// Any non-numbered sibling ends the running list.
    pub fn end_list(self) -> Self {
        Self {
            list_number: None,
            ..self
        }
    }

    pub fn indent(&self) -> String {
        " ".repeat(self.depth * INDENT_SPACES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering_restarts_after_end_list() {
        let state = RenderState::for_exercise(0);
        let (first, state) = state.next_number();
        let (second, state) = state.next_number();
        let (restarted, _) = state.end_list().next_number();
        assert_eq!((first, second, restarted), (1, 2, 1));
    }

    #[test]
    fn test_children_are_indented() {
        let state = RenderState::for_exercise(3).enter_children().enter_children();
        assert_eq!(state.indent(), "    ");
        assert_eq!(state.exercise, 3);
    }
}

// src/exercises.rs
//! Splits a page's top-level blocks into exercises at divider blocks.

use crate::model::Block;

/// A contiguous run of blocks between two dividers, or a page boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exercise<'a> {
    /// Zero-based position of this exercise on the page.
    pub index: usize,
    /// Position of the first task in the source block list.
    pub offset: usize,
    /// The blocks of this exercise, dividers excluded.
    pub tasks: &'a [Block],
    /// The divider that closed this run; `None` for the last exercise.
    pub divider: Option<&'a Block>,
}

impl<'a> Exercise<'a> {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The source blocks this exercise covers, closing divider included.
    pub fn source_blocks(&self) -> impl Iterator<Item = &'a Block> {
        self.tasks.iter().chain(self.divider)
    }
}

/// Lazy iterator over the exercises of a block list.
///
/// A clone continues independently from the same position; calling
/// [`split_exercises`] again starts over from the first exercise.
#[derive(Debug, Clone)]
pub struct ExerciseSplit<'a> {
    blocks: &'a [Block],
    position: usize,
    index: usize,
    finished: bool,
}

/// Splits `blocks` at every top-level divider.
///
/// Always yields `dividers + 1` exercises. Consecutive dividers, or a
/// divider at either end, produce empty exercises rather than being skipped.
pub fn split_exercises(blocks: &[Block]) -> ExerciseSplit<'_> {
    ExerciseSplit {
        blocks,
        position: 0,
        index: 0,
        finished: false,
    }
}

impl<'a> Iterator for ExerciseSplit<'a> {
    type Item = Exercise<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let remaining = &self.blocks[self.position..];
        let offset = self.position;
        let index = self.index;
        self.index += 1;

        match remaining.iter().position(Block::is_divider) {
            Some(at) => {
                self.position += at + 1;
                Some(Exercise {
                    index,
                    offset,
                    tasks: &remaining[..at],
                    divider: Some(&remaining[at]),
                })
            }
            None => {
                self.finished = true;
                self.position = self.blocks.len();
                Some(Exercise {
                    index,
                    offset,
                    tasks: remaining,
                    divider: None,
                })
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let dividers = self.blocks[self.position..]
            .iter()
            .filter(|block| block.is_divider())
            .count();
        (dividers + 1, Some(dividers + 1))
    }
}

impl ExactSizeIterator for ExerciseSplit<'_> {}

impl std::iter::FusedIterator for ExerciseSplit<'_> {}

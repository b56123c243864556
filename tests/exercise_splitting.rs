// tests/exercise_splitting.rs
//! Divider splitting over whole pages.

use notion_exercises::{split_exercises, Block, BlockKind, Exercise, RichTextItem};
use pretty_assertions::assert_eq;

fn page(layout: &str) -> Vec<Block> {
    layout
        .split_whitespace()
        .map(|token| match token {
            "|" => Block::divider(),
            text => Block::paragraph(text),
        })
        .collect()
}

fn texts(exercise: &Exercise<'_>) -> Vec<String> {
    exercise.tasks.iter().map(Block::plain_text).collect()
}

fn shape(blocks: &[Block]) -> Vec<Vec<String>> {
    split_exercises(blocks).map(|e| texts(&e)).collect()
}

#[test]
fn test_page_without_dividers_is_one_exercise() {
    assert_eq!(shape(&page("A B")), vec![vec!["A", "B"]]);
}

#[test]
fn test_dividers_separate_exercises() {
    assert_eq!(
        shape(&page("A | B C | D")),
        vec![vec!["A"], vec!["B", "C"], vec!["D"]]
    );
}

#[test]
fn test_empty_runs_are_kept() {
    let empty: Vec<String> = Vec::new();
    assert_eq!(
        shape(&page("| A | | B |")),
        vec![
            empty.clone(),
            vec!["A".to_string()],
            empty.clone(),
            vec!["B".to_string()],
            empty,
        ]
    );
}

#[test]
fn test_empty_page_yields_one_empty_exercise() {
    let exercises: Vec<_> = split_exercises(&[]).collect();
    assert_eq!(exercises.len(), 1);
    assert!(exercises[0].is_empty());
    assert_eq!(exercises[0].divider, None);
}

#[test]
fn test_count_is_dividers_plus_one() {
    for layout in ["", "A", "|", "| |", "A | B", "A | | B | C |", "| | | |"] {
        let blocks = page(layout);
        let dividers = blocks.iter().filter(|b| b.is_divider()).count();
        assert_eq!(
            split_exercises(&blocks).count(),
            dividers + 1,
            "layout {layout:?}"
        );
    }
}

#[test]
fn test_exercises_reassemble_the_page() {
    for layout in ["A | B C | D", "| A | | B |", "", "A B C"] {
        let blocks = page(layout);
        let rebuilt: Vec<&Block> = split_exercises(&blocks)
            .flat_map(|e| e.source_blocks().collect::<Vec<_>>())
            .collect();
        let original: Vec<&Block> = blocks.iter().collect();
        assert_eq!(rebuilt, original, "layout {layout:?}");
    }
}

#[test]
fn test_only_top_level_dividers_split() {
    let blocks = vec![
        Block::new(BlockKind::Toggle {
            text: vec![RichTextItem::plain_text("Hint")],
        })
        .with_children(vec![
            Block::paragraph("first"),
            Block::divider(),
            Block::paragraph("second"),
        ]),
        Block::paragraph("after"),
    ];

    let exercises: Vec<_> = split_exercises(&blocks).collect();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0].tasks.len(), 2);
}

#[test]
fn test_offsets_and_indices_track_source_positions() {
    let blocks = page("A | B C | D");
    let positions: Vec<(usize, usize)> = split_exercises(&blocks)
        .map(|e| (e.index, e.offset))
        .collect();
    assert_eq!(positions, vec![(0, 0), (1, 2), (2, 5)]);
}

#[test]
fn test_splitting_restarts_from_the_beginning() {
    let blocks = page("A | B");
    let mut first = split_exercises(&blocks);
    first.next();

    let fresh: Vec<_> = split_exercises(&blocks).collect();
    assert_eq!(fresh.len(), 2);
    assert_eq!(texts(&fresh[0]), vec!["A"]);
    assert_eq!(first.len(), 1);
}

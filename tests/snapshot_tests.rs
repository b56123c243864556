// tests/snapshot_tests.rs
//! Snapshot tests for exercise formatting and the output document.
//!
//! Uses inline `insta` snapshots; review changes with `cargo insta review`.

use insta::assert_snapshot;
use notion_exercises::{
    format_exercises, render_document, AppError, Block, BlockKind, FormatOptions, FormatStyle,
    OutputFormat, RenderedExercise, RichTextItem,
};
use pretty_assertions::assert_eq;

fn text(s: &str) -> Vec<RichTextItem> {
    vec![RichTextItem::plain_text(s)]
}

fn heading(s: &str) -> Block {
    Block::new(BlockKind::Heading {
        level: 2,
        text: text(s),
    })
}

fn code(s: &str, language: &str) -> Block {
    Block::new(BlockKind::Code {
        text: text(s),
        language: Some(language.to_string()),
    })
}

fn numbered(s: &str) -> Block {
    Block::new(BlockKind::NumberedListItem { text: text(s) })
}

fn worksheet() -> Vec<Block> {
    vec![
        heading("Warm-up"),
        Block::paragraph("Print a greeting."),
        code("println!(\"hi\");", "rust"),
        Block::divider(),
        heading("Loops"),
        numbered("Count to ten"),
        numbered("Count back down"),
        Block::new(BlockKind::ToDo {
            text: text("Use a for loop"),
            checked: true,
        })
        .with_children(vec![Block::new(BlockKind::BulletedListItem {
            text: text("ranges help"),
        })]),
        Block::paragraph(""),
        Block::divider(),
    ]
}

fn plain() -> FormatOptions {
    FormatOptions::default()
}

fn html() -> FormatOptions {
    FormatOptions {
        style: FormatStyle::Html,
        strict: false,
    }
}

#[test]
fn snapshot_plain_exercises() {
    let exercises = format_exercises(&worksheet(), &plain()).unwrap();
    assert_eq!(exercises.len(), 3);

    assert_snapshot!(exercises[0].as_str(), @r#"
    ## Warm-up
    Print a greeting.
    ```rust
    println!("hi");
    ```
    "#);
    assert_snapshot!(exercises[1].as_str(), @r"
    ## Loops
    1. Count to ten
    2. Count back down
    [x] Use a for loop
      - ranges help
    ");
    assert!(exercises[2].is_empty());
}

#[test]
fn snapshot_html_exercises() {
    let exercises = format_exercises(&worksheet(), &html()).unwrap();

    assert_snapshot!(
        exercises[0].as_str(),
        @r#"<h3>Warm-up</h3>Print a greeting.<br><pre class="ql-syntax">println!(&quot;hi&quot;);</pre>"#
    );
    assert_snapshot!(
        exercises[1].as_str(),
        @"<h3>Loops</h3>Count to ten<br>Count back down<br>Use a for loop<br>ranges help<br>"
    );
}

#[test]
fn snapshot_sections_document() {
    let blocks = vec![
        Block::paragraph("A"),
        Block::divider(),
        Block::paragraph("B"),
        Block::paragraph("C"),
    ];
    let exercises = format_exercises(&blocks, &plain()).unwrap();
    let document = render_document(&exercises, OutputFormat::Sections).unwrap();

    assert_snapshot!(document.trim_end(), @r"
    == Block 1 ==
    A
    == End of block ==

    == Block 2 ==
    B
    C
    == End of block ==
    ");
}

#[test]
fn test_json_document_keeps_empty_exercises() {
    let exercises = vec![
        RenderedExercise::new("A".to_string()),
        RenderedExercise::new(String::new()),
    ];
    let document = render_document(&exercises, OutputFormat::Json).unwrap();
    let parsed: Vec<String> = serde_json::from_str(&document).unwrap();
    assert_eq!(parsed, vec!["A".to_string(), String::new()]);
}

#[test]
fn test_unsupported_block_falls_back_to_its_text() {
    let blocks = vec![
        Block::new(BlockKind::Unsupported {
            block_type: "equation".to_string(),
            text: text("E = mc^2"),
        }),
        Block::new(BlockKind::Unsupported {
            block_type: "image".to_string(),
            text: vec![],
        }),
    ];
    let exercises = format_exercises(&blocks, &plain()).unwrap();
    assert_eq!(exercises[0].as_str(), "E = mc^2\n[image]");
}

#[test]
fn test_strict_mode_names_the_block_and_exercise() {
    let blocks = vec![
        Block::paragraph("fine"),
        Block::divider(),
        Block::new(BlockKind::Unsupported {
            block_type: "image".to_string(),
            text: vec![],
        }),
    ];
    let options = FormatOptions {
        style: FormatStyle::Plain,
        strict: true,
    };

    let err = format_exercises(&blocks, &options).unwrap_err();
    assert!(matches!(
        &err,
        AppError::UnexpectedBlock { block_type, exercise } if block_type == "image" && *exercise == 2
    ));
    assert_eq!(
        err.to_string(),
        "Unexpected block of type 'image' in exercise 2"
    );
}

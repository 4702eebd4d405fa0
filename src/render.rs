//! Markdown-to-ANSI rendering for transcript entries.
//!
//! Responses are parsed as GFM (the analysis arrives as markdown tables) and
//! rendered with a small fixed style set. The publish affordance marker is
//! stripped from display and replaced by a command hint. Minimal mode skips
//! styling entirely.

use completion_api::strip_publish_affordance;
use markdown::mdast::Node;
use markdown::{to_mdast, ParseOptions};
use unicode_width::UnicodeWidthStr;

use crate::transcript::{Entry, Sender};

const BOLD: &str = "\u{1b}[1m";
const DIM: &str = "\u{1b}[2m";
const ITALIC: &str = "\u{1b}[3m";
const UNDERLINE: &str = "\u{1b}[4m";
const STRIKE: &str = "\u{1b}[9m";
const CYAN: &str = "\u{1b}[36m";
const RESET: &str = "\u{1b}[0m";

/// Renders one transcript entry, including the sender label and, for
/// publishable responses, the `/publish` hint line.
pub fn render_entry(entry: &Entry, rich: bool) -> String {
    let (body, can_publish) = strip_publish_affordance(&entry.text);
    let label = match entry.sender {
        Sender::User => "you",
        Sender::Bot => "docdesk",
    };

    let rendered = if rich {
        render_markdown(body)
    } else {
        body.to_string()
    };

    let mut out = format!("{BOLD}{label}{RESET}\n{rendered}");
    if can_publish {
        out.push_str(&format!(
            "\n{DIM}[table detected; publish with /publish {}]{RESET}",
            entry.id
        ));
    }
    out
}

/// Renders a markdown document to ANSI-styled text.
///
/// Unparseable input falls back to the raw text.
pub fn render_markdown(text: &str) -> String {
    let root = match to_mdast(text, &ParseOptions::gfm()) {
        Ok(root) => root,
        Err(_) => return text.to_string(),
    };

    let mut blocks = Vec::new();
    if let Node::Root(root) = root {
        for child in &root.children {
            if let Some(block) = render_block(child) {
                blocks.push(block);
            }
        }
    }
    blocks.join("\n\n")
}

fn render_block(node: &Node) -> Option<String> {
    match node {
        Node::Heading(heading) => Some(format!(
            "{BOLD}{UNDERLINE}{}{RESET}",
            render_inline(&heading.children)
        )),
        Node::Paragraph(paragraph) => Some(render_inline(&paragraph.children)),
        Node::Code(code) => {
            let block = code
                .value
                .lines()
                .map(|line| format!("  {DIM}{line}{RESET}"))
                .collect::<Vec<_>>()
                .join("\n");
            Some(block)
        }
        Node::List(list) => {
            let mut lines = Vec::new();
            let start = list.start.unwrap_or(1);
            for (index, item) in list.children.iter().enumerate() {
                let bullet = if list.ordered {
                    format!("{}.", start as usize + index)
                } else {
                    "-".to_string()
                };
                lines.push(format!("{bullet} {}", render_inline_deep(item)));
            }
            Some(lines.join("\n"))
        }
        Node::Table(table) => Some(render_table(&table.children)),
        Node::Blockquote(quote) => {
            let inner = quote
                .children
                .iter()
                .filter_map(render_block)
                .collect::<Vec<_>>()
                .join("\n");
            Some(
                inner
                    .lines()
                    .map(|line| format!("{DIM}> {line}{RESET}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        }
        Node::ThematicBreak(_) => Some(format!("{DIM}----{RESET}")),
        // Inline HTML (including any stray markers) carries no terminal
        // rendering.
        Node::Html(_) => None,
        _ => Some(render_inline_deep(node)),
    }
}

fn render_table(rows: &[Node]) -> String {
    let mut cells: Vec<Vec<String>> = Vec::new();
    for row in rows {
        if let Node::TableRow(row) = row {
            cells.push(row.children.iter().map(plain_text).collect());
        }
    }

    let columns = cells.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in &cells {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let mut lines = Vec::new();
    for (row_index, row) in cells.iter().enumerate() {
        let mut line = String::from("|");
        for (index, width) in widths.iter().enumerate() {
            let cell = row.get(index).map(String::as_str).unwrap_or("");
            let padding = width - UnicodeWidthStr::width(cell);
            line.push_str(&format!(" {cell}{} |", " ".repeat(padding)));
        }
        lines.push(line);

        if row_index == 0 {
            let mut divider = String::from("|");
            for width in &widths {
                divider.push_str(&format!(" {} |", "-".repeat(*width)));
            }
            lines.push(divider);
        }
    }
    lines.join("\n")
}

fn render_inline(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&text.value),
            Node::Strong(strong) => {
                out.push_str(&format!("{BOLD}{}{RESET}", render_inline(&strong.children)));
            }
            Node::Emphasis(emphasis) => {
                out.push_str(&format!(
                    "{ITALIC}{}{RESET}",
                    render_inline(&emphasis.children)
                ));
            }
            Node::Delete(delete) => {
                out.push_str(&format!("{STRIKE}{}{RESET}", render_inline(&delete.children)));
            }
            Node::InlineCode(code) => {
                out.push_str(&format!("{CYAN}{}{RESET}", code.value));
            }
            Node::Link(link) => {
                out.push_str(&format!(
                    "{UNDERLINE}{}{RESET} ({})",
                    render_inline(&link.children),
                    link.url
                ));
            }
            Node::Break(_) => out.push('\n'),
            Node::Html(_) => {}
            other => out.push_str(&render_inline_deep(other)),
        }
    }
    out
}

fn render_inline_deep(node: &Node) -> String {
    match node.children() {
        Some(children) => render_inline(children),
        None => plain_text(node),
    }
}

/// Unstyled text content, used where ANSI sequences would break width math.
fn plain_text(node: &Node) -> String {
    match node {
        Node::Text(text) => text.value.clone(),
        Node::InlineCode(code) => code.value.clone(),
        Node::Html(_) => String::new(),
        other => match other.children() {
            Some(children) => children.iter().map(plain_text).collect(),
            None => String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use completion_api::PUBLISH_AFFORDANCE_MARKER;

    use super::{render_entry, render_markdown};
    use crate::transcript::Transcript;

    #[test]
    fn headings_are_styled_and_keep_their_text() {
        let rendered = render_markdown("### Imports");
        assert!(rendered.contains("Imports"));
        assert!(rendered.contains("\u{1b}[1m"));
    }

    #[test]
    fn table_columns_are_aligned_by_display_width() {
        let rendered = render_markdown("| name | purpose |\n| - | - |\n| x | loop counter |");
        let lines: Vec<&str> = rendered.lines().collect();

        // Header, divider, one data row; the markdown delimiter row is not data.
        assert_eq!(lines.len(), 3);
        let widths: Vec<usize> = lines.iter().map(|line| line.chars().count()).collect();
        assert!(widths.windows(2).all(|pair| pair[0] == pair[1]));
        assert!(lines[0].contains("name"));
        assert!(lines[2].contains("loop counter"));
    }

    #[test]
    fn publishable_entries_gain_a_command_hint() {
        let mut transcript = Transcript::new();
        let id = transcript.append_bot(format!(
            "### Imports\n\n{PUBLISH_AFFORDANCE_MARKER}"
        ));
        let entry = transcript.get(id).expect("entry");

        let rendered = render_entry(entry, true);
        assert!(rendered.contains(&format!("/publish {id}")));
        assert!(!rendered.contains(PUBLISH_AFFORDANCE_MARKER));
    }

    #[test]
    fn user_code_fences_are_styled_like_bot_code_blocks() {
        let mut transcript = Transcript::new();
        let id = transcript.append_user("```javascript\nconst x = 1;\n```");
        let entry = transcript.get(id).expect("entry");

        let rendered = render_entry(entry, true);
        assert!(!rendered.contains("```"));
        assert!(rendered.contains("const x = 1;"));
    }

    #[test]
    fn minimal_mode_passes_text_through_unstyled() {
        let mut transcript = Transcript::new();
        let id = transcript.append_bot("plain words");
        let entry = transcript.get(id).expect("entry");

        let rendered = render_entry(entry, false);
        assert!(rendered.ends_with("plain words"));
    }
}

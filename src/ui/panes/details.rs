//! Details pane: algorithm-specific state of the current step

use crate::step::{
    GraphDetail, GraphStep, SearchDetail, SearchStep, SortDetail, SortStep, Step,
};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

fn field(name: &str, value: impl ToString) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<14}", name), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(value.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

fn optional(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Key/value lines describing `step`
pub fn detail_lines(step: &Step) -> Vec<Line<'static>> {
    let kind = step.kind();
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{:<14}", "step"), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            kind.label().to_string(),
            Style::default()
                .fg(DEFAULT_THEME.kind_color(kind))
                .add_modifier(Modifier::BOLD),
        ),
    ])];

    match step {
        Step::Sort(SortStep { detail, .. }) => match detail {
            SortDetail::Bubble { pass } => lines.push(field("pass", pass + 1)),
            SortDetail::Selection {
                current_min,
                sorted_boundary,
            } => {
                lines.push(field("current min", optional(*current_min)));
                lines.push(field("sorted prefix", sorted_boundary));
            }
            SortDetail::Insertion {
                current_element,
                sorted_boundary,
            } => {
                lines.push(field("hole", optional(*current_element)));
                lines.push(field("sorted prefix", sorted_boundary));
            }
            SortDetail::Merge { recursion_level } => {
                lines.push(field("level", recursion_level));
            }
            SortDetail::Quick { pivot } => lines.push(field("pivot index", optional(*pivot))),
            SortDetail::Heap { heap_size } => lines.push(field("heap size", heap_size)),
            SortDetail::Radix {
                digit_position,
                max_digits,
                buckets,
                current_bucket,
            } => {
                lines.push(field("digit", format!("{} of {}", digit_position, max_digits)));
                lines.push(field("bucket", optional(*current_bucket)));
                for (digit, bucket) in buckets.iter().enumerate() {
                    let values = bucket
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(" ");
                    lines.push(field(&format!("  [{}]", digit), values));
                }
            }
        },
        Step::Search(SearchStep { target, detail, .. }) => {
            lines.push(field("target", target));
            match detail {
                SearchDetail::Linear { current } => {
                    lines.push(field("index", optional(*current)));
                }
                SearchDetail::Binary {
                    left,
                    right,
                    mid,
                    comparison,
                    action,
                } => {
                    lines.push(field("range", format!("[{}..{}]", left, right)));
                    lines.push(field("mid", optional(*mid)));
                    lines.push(field(
                        "comparison",
                        optional(comparison.map(|c| format!("{:?}", c).to_lowercase())),
                    ));
                    lines.push(field(
                        "action",
                        optional(action.map(|a| format!("{:?}", a).to_lowercase())),
                    ));
                }
            }
        }
        Step::Tree(tree) => {
            lines.push(field("operand", optional(tree.operand)));
            lines.push(field("current", optional(tree.current)));
            let (nodes, height) = tree
                .tree
                .as_ref()
                .map_or((0, 0), |t| (t.values().len(), t.height()));
            lines.push(field("nodes", nodes));
            lines.push(field("height", height));
        }
        Step::Graph(GraphStep { detail, .. }) => match detail {
            GraphDetail::Bfs { levels } => {
                for (node, level) in levels {
                    lines.push(field(&format!("level {}", node), level));
                }
            }
            GraphDetail::Dfs => {}
            GraphDetail::Dijkstra {
                distances,
                previous,
            } => {
                for (node, distance) in distances {
                    let via = previous
                        .get(node)
                        .map(|p| format!(" via {}", p))
                        .unwrap_or_default();
                    let distance = distance.map_or_else(|| "∞".to_string(), |d| d.to_string());
                    lines.push(field(&format!("dist {}", node), format!("{}{}", distance, via)));
                }
            }
        },
        Step::Container(container) => {
            lines.push(field("container", container.container));
            lines.push(field("size", container.items.len()));
            lines.push(field("capacity", container.capacity));
            lines.push(field("value", optional(container.value)));
        }
        Step::Table(table) => {
            lines.push(field("n", table.n));
            lines.push(field("current", optional(table.current)));
            lines.push(field("result", optional(table.result)));
        }
    }
    lines
}

pub fn render_details_pane(
    frame: &mut Frame,
    area: Rect,
    step: &Step,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 0, 0, 0));

    let lines = detail_lines(step);
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = (*scroll_offset).min(lines.len().saturating_sub(visible_height));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}

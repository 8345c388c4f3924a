//! Main visualization pane: bars, tree, graph, container or table

use crate::step::{
    ContainerStep, GraphStep, Roles, SearchStep, SortStep, Step, TableStep, TreeShape, TreeStep,
};
use crate::structures::containers::ContainerKind;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Render the pane for the step at the cursor
pub fn render_visual_pane(frame: &mut Frame, area: Rect, step: &Step, title: &str, is_focused: bool) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 1, 0, 0));

    match step {
        Step::Sort(SortStep { array, roles, .. }) => {
            render_bars(frame, area, block, array, roles, None)
        }
        Step::Search(SearchStep {
            array,
            roles,
            target,
            ..
        }) => render_bars(frame, area, block, array, roles, Some(*target)),
        Step::Tree(tree) => {
            frame.render_widget(Paragraph::new(tree_lines(tree)).block(block), area);
        }
        Step::Graph(graph) => {
            frame.render_widget(
                Paragraph::new(graph_lines(graph))
                    .block(block)
                    .wrap(Wrap { trim: false }),
                area,
            );
        }
        Step::Container(container) => {
            frame.render_widget(Paragraph::new(container_lines(container)).block(block), area);
        }
        Step::Table(table) => {
            frame.render_widget(Paragraph::new(table_lines(table)).block(block), area);
        }
    }
}

/// Color of the bar at `index`; the most specific role wins
fn bar_color(roles: &Roles, index: usize) -> Color {
    if roles.swapping.contains(&index) {
        DEFAULT_THEME.swapping
    } else if roles.comparing.contains(&index) {
        DEFAULT_THEME.comparing
    } else if roles.highlighted.contains(&index) {
        DEFAULT_THEME.secondary
    } else if roles.sorted.contains(&index) {
        DEFAULT_THEME.success
    } else if roles.eliminated.contains(&index) {
        DEFAULT_THEME.eliminated
    } else if roles.left.contains(&index) {
        DEFAULT_THEME.left
    } else if roles.right.contains(&index) {
        DEFAULT_THEME.right
    } else if roles.active.contains(&index) {
        DEFAULT_THEME.active
    } else {
        DEFAULT_THEME.primary
    }
}

fn render_bars(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    array: &[i64],
    roles: &Roles,
    target: Option<i64>,
) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let legend = match target {
        Some(target) => Line::from(vec![
            Span::styled("target ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                target.to_string(),
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(vec![
            Span::styled("■ compare ", Style::default().fg(DEFAULT_THEME.comparing)),
            Span::styled("■ swap ", Style::default().fg(DEFAULT_THEME.swapping)),
            Span::styled("■ sorted", Style::default().fg(DEFAULT_THEME.success)),
        ]),
    };
    frame.render_widget(Paragraph::new(legend), rows[0]);

    // Bars need non-negative heights; shift so the smallest value is 1
    let min = array.iter().copied().min().unwrap_or(0);
    let bars: Vec<Bar> = array
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let color = bar_color(roles, i);
            Bar::default()
                .value(value.abs_diff(min) + 1)
                .text_value(value.to_string())
                .label(Line::from(i.to_string()))
                .style(Style::default().fg(color))
                .value_style(Style::default().bg(color).fg(Color::Black))
        })
        .collect();

    let count = array.len().max(1) as u16;
    let bar_width = (rows[1].width / count).saturating_sub(1).clamp(1, 9);
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);
    frame.render_widget(chart, rows[1]);
}

fn tree_lines(step: &TreeStep) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(operand) = step.operand {
        lines.push(Line::from(Span::styled(
            format!("operand {}", operand),
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    }
    match &step.tree {
        None => lines.push(Line::from(Span::styled(
            "(empty tree)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))),
        Some(shape) => push_tree(shape, 0, step, &mut lines),
    }
    if !step.visited.is_empty() {
        let visited = step
            .visited
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" → ");
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("visited ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(visited, Style::default().fg(DEFAULT_THEME.success)),
        ]));
    }
    lines
}

/// Sideways layout: right subtree above, left subtree below
fn push_tree(shape: &TreeShape, depth: usize, step: &TreeStep, lines: &mut Vec<Line<'static>>) {
    if let Some(right) = &shape.right {
        push_tree(right, depth + 1, step, lines);
    }
    let style = if step.current == Some(shape.value) {
        Style::default()
            .fg(DEFAULT_THEME.comparing)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else if step.path.contains(&shape.value) {
        Style::default().fg(DEFAULT_THEME.secondary)
    } else if step.visited.contains(&shape.value) {
        Style::default().fg(DEFAULT_THEME.success)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };
    let connector = if depth == 0 { "" } else { "└─ " };
    lines.push(Line::from(vec![
        Span::raw("      ".repeat(depth.saturating_sub(1))),
        Span::styled(connector, Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(shape.value.to_string(), style),
    ]));
    if let Some(left) = &shape.left {
        push_tree(left, depth + 1, step, lines);
    }
}

fn labeled(label: &str, values: &[String], color: Color) -> Line<'static> {
    let text = if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    };
    Line::from(vec![
        Span::styled(format!("{:<9}", label), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(text, Style::default().fg(color)),
    ])
}

fn graph_lines(step: &GraphStep) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(current) = &step.current {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<9}", "current"), Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                current.clone(),
                Style::default()
                    .fg(DEFAULT_THEME.comparing)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    if let Some((from, to)) = &step.edge {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<9}", "edge"), Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(format!("{} ─ {}", from, to), Style::default().fg(DEFAULT_THEME.swapping)),
        ]));
    }
    lines.push(labeled("frontier", &step.frontier, DEFAULT_THEME.secondary));
    lines.push(labeled("visited", &step.visited, DEFAULT_THEME.primary));
    lines.push(labeled("finished", &step.finished, DEFAULT_THEME.success));
    lines
}

fn container_lines(step: &ContainerStep) -> Vec<Line<'static>> {
    let cell = |value: &i64| format!("[{:^5}]", value);
    let accent = Style::default()
        .fg(DEFAULT_THEME.secondary)
        .add_modifier(Modifier::BOLD);
    let normal = Style::default().fg(DEFAULT_THEME.primary);
    let mut lines = vec![Line::from(Span::styled(
        format!("{} / {} used", step.items.len(), step.capacity),
        Style::default().fg(DEFAULT_THEME.comment),
    ))];

    if step.items.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("(empty {})", step.container),
            Style::default().fg(DEFAULT_THEME.comment),
        )));
        return lines;
    }

    match step.container {
        ContainerKind::Stack => {
            let top = step.items.len() - 1;
            for (i, value) in step.items.iter().enumerate().rev() {
                let mut spans = vec![Span::styled(cell(value), if i == top { accent } else { normal })];
                if i == top {
                    spans.push(Span::styled(" ← top", Style::default().fg(DEFAULT_THEME.comment)));
                }
                lines.push(Line::from(spans));
            }
        }
        ContainerKind::Queue => {
            let last = step.items.len() - 1;
            let spans: Vec<Span> = step
                .items
                .iter()
                .enumerate()
                .map(|(i, value)| Span::styled(cell(value), if i == 0 || i == last { accent } else { normal }))
                .collect();
            lines.push(Line::from(spans));
            lines.push(Line::from(Span::styled(
                "front ↑ ... ↑ rear",
                Style::default().fg(DEFAULT_THEME.comment),
            )));
        }
    }
    lines
}

fn table_lines(step: &TableStep) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("F({}) bottom-up", step.n),
        Style::default().fg(DEFAULT_THEME.comment),
    ))];
    for (i, value) in &step.table {
        let style = if step.current == Some(*i) {
            Style::default()
                .fg(DEFAULT_THEME.comparing)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        lines.push(Line::from(Span::styled(format!("F({:>2}) = {}", i, value), style)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_beats_sorted() {
        let roles = Roles::new().with_swapping([1]).with_sorted([1, 2]);
        assert_eq!(bar_color(&roles, 1), DEFAULT_THEME.swapping);
        assert_eq!(bar_color(&roles, 2), DEFAULT_THEME.success);
        assert_eq!(bar_color(&roles, 0), DEFAULT_THEME.primary);
    }

    #[test]
    fn tree_is_drawn_sideways() {
        let step = TreeStep {
            kind: crate::step::StepKind::Initial,
            tree: Some(TreeShape {
                value: 5,
                left: Some(Box::new(TreeShape::leaf(2))),
                right: Some(Box::new(TreeShape::leaf(9))),
            }),
            current: None,
            operand: None,
            path: vec![],
            visited: vec![],
            description: String::new(),
        };
        let text: Vec<String> = tree_lines(&step).iter().map(|l| l.to_string()).collect();
        assert_eq!(text.len(), 3);
        assert!(text[0].ends_with("9"));
        assert_eq!(text[1], "5");
        assert!(text[2].ends_with("2"));
    }
}

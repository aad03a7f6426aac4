//! Draws note lines by applying a decoration set to their text.

use livenote_engine::{Decoration, DecorationKind, DecorationSet, Document, Span as ByteSpan, Widget};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Terminal style for a space-separated class list.
pub fn class_style(classes: &str) -> Style {
    classes
        .split_whitespace()
        .fold(Style::default(), |style, class| match class {
            c if c.starts_with("cm-heading") => style.fg(Color::Cyan).add_modifier(Modifier::BOLD),
            "cm-bold" => style.add_modifier(Modifier::BOLD),
            "cm-italic" => style.add_modifier(Modifier::ITALIC),
            "cm-strikethrough" => style.add_modifier(Modifier::CROSSED_OUT),
            "cm-inline-code" => style.fg(Color::Yellow),
            "cm-code-block" => style.fg(Color::Green),
            "cm-code-fence" => style.add_modifier(Modifier::DIM),
            "cm-blockquote" => style.fg(Color::Gray).add_modifier(Modifier::ITALIC),
            "cm-task-done" => style.fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT),
            "cm-math-source" => style.fg(Color::Magenta),
            _ => style,
        })
}

fn widget_style(widget: &Widget) -> Style {
    match widget {
        Widget::Math { .. } => Style::default().fg(Color::Magenta),
        Widget::Checkbox(_) => Style::default().fg(Color::Green),
        Widget::Bullet { .. } | Widget::Ordinal { .. } => Style::default().fg(Color::Blue),
    }
}

/// Renders document line `number`, or `None` when an earlier line's
/// replacement swallows it whole.
pub fn render_line(doc: &Document, set: &DecorationSet, number: usize) -> Option<Line<'static>> {
    let line = doc.line(number)?;
    let span = line.span;

    // a replacement that began on an earlier line
    let carried = set
        .iter()
        .filter(|d| matches!(d.kind, DecorationKind::Replace { .. }))
        .find(|d| d.from < span.start && d.to > span.start);
    if let Some(d) = carried
        && d.to >= span.end
    {
        return None;
    }

    let on_line: Vec<&Decoration> = set.starting_in(span).collect();
    let base = on_line
        .iter()
        .filter_map(|d| match &d.kind {
            DecorationKind::LineAttribute { class } if d.from == span.start => Some(class.as_str()),
            _ => None,
        })
        .fold(Style::default(), |style, class| style.patch(class_style(class)));

    let mut cuts = vec![span.start, span.end];
    if let Some(d) = carried {
        cuts.push(d.to);
    }
    for d in &on_line {
        cuts.push(d.from);
        cuts.push(d.to.min(span.end));
    }
    cuts.sort_unstable();
    cuts.dedup();

    let mut out = vec![];
    for pair in cuts.windows(2) {
        let piece = ByteSpan::new(pair[0], pair[1]);
        if carried.is_some_and(|d| d.span().contains_span(piece)) {
            continue;
        }
        let replace = on_line.iter().find(|d| {
            matches!(d.kind, DecorationKind::Replace { .. }) && d.span().contains_span(piece)
        });
        match replace {
            Some(d) if d.from == piece.start => {
                if let Some(widget) = d.widget_ref() {
                    out.push(Span::styled(widget.label(), base.patch(widget_style(widget))));
                }
            }
            Some(_) => {}
            None => {
                let style = on_line
                    .iter()
                    .filter_map(|d| match &d.kind {
                        DecorationKind::Mark { class } if d.span().contains_span(piece) => {
                            Some(class.as_str())
                        }
                        _ => None,
                    })
                    .fold(base, |style, class| style.patch(class_style(class)));
                let text = &line.text[piece.start - span.start..piece.end - span.start];
                out.push(Span::styled(text.to_string(), style));
            }
        }
    }
    Some(Line::from(out))
}

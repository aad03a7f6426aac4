use crate::editing::{Document, EditorHost, TextEdit};
use crate::math::{MathMode, render_math};
use crate::parsing::blocks::kinds::{Checkbox, ListItem};
use crate::parsing::rope::{LineRef, Span};

/// A rendered element standing in for replaced source text.
///
/// Widgets are plain values; two widgets are equal when they would render the
/// same, so hosts can reuse unchanged DOM nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Widget {
    Math { expression: String, display: bool },
    Checkbox(CheckboxWidget),
    Bullet { depth: usize, glyph: String },
    /// Ordered list number, `label` is e.g. `3.`.
    Ordinal { label: String },
}

impl Widget {
    /// HTML for DOM hosts.
    pub fn to_html(&self) -> String {
        match self {
            Widget::Math {
                expression,
                display,
            } => {
                let mode = MathMode::new(*display);
                mode.wrap("cm-math-widget", render_math(expression, mode).html())
            }
            Widget::Checkbox(cb) => format!(
                r#"<input type="checkbox" class="cm-checkbox" data-from="{}" data-to="{}"{}>"#,
                cb.from,
                cb.to,
                if cb.checked { " checked" } else { "" }
            ),
            Widget::Bullet { depth, glyph } => format!(
                r#"<span class="cm-bullet {}">{}</span> "#,
                ListItem::class(*depth),
                html_escape::encode_text(glyph)
            ),
            Widget::Ordinal { label } => format!(
                r#"<span class="cm-ordinal">{}</span> "#,
                html_escape::encode_text(label)
            ),
        }
    }

    /// Plain-text rendition for character-cell hosts.
    pub fn label(&self) -> String {
        match self {
            Widget::Math { expression, .. } => expression.clone(),
            Widget::Checkbox(cb) if cb.checked => "☑ ".to_string(),
            Widget::Checkbox(_) => "☐ ".to_string(),
            Widget::Bullet { glyph, .. } => format!("{glyph} "),
            Widget::Ordinal { label } => format!("{label} "),
        }
    }

    /// Short tag used in decoration dumps.
    pub fn name(&self) -> &'static str {
        match self {
            Widget::Math { display, .. } => MathMode::new(*display).class(),
            Widget::Checkbox(_) => "checkbox",
            Widget::Bullet { .. } => "bullet",
            Widget::Ordinal { .. } => "ordinal",
        }
    }
}

/// A checkbox bound to the `[ ]`/`[x]` token at `[from, to)`.
///
/// Holds no state of its own: `checked` is what the text said at build time
/// and [`CheckboxWidget::toggle`] re-reads the live text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckboxWidget {
    pub checked: bool,
    pub from: usize,
    pub to: usize,
}

impl CheckboxWidget {
    /// The checkbox of a line, if it is a checkbox item.
    pub fn on_line(line: &LineRef) -> Option<Self> {
        let cb = ListItem::checkbox(&line.text)?;
        let token = cb.token.shift(line.span.start);
        Some(Self {
            checked: cb.checked,
            from: token.start,
            to: token.end,
        })
    }

    pub fn span(&self) -> Span {
        Span::new(self.from, self.to)
    }

    /// Asks `host` to flip the token. Returns `false` without dispatching when
    /// the offsets no longer hold a checkbox token in `doc`.
    pub fn toggle(&self, doc: &Document, host: &mut impl EditorHost) -> bool {
        if self.from > self.to || !doc.is_boundary(self.from) || !doc.is_boundary(self.to) {
            log::debug!("checkbox at {}..{} is out of range", self.from, self.to);
            return false;
        }
        let token = doc.slice(self.span());
        if !Checkbox::is_token(&token) {
            log::debug!("checkbox at {}..{} is stale: {token:?}", self.from, self.to);
            return false;
        }
        host.dispatch(TextEdit::replace(
            self.from,
            self.to,
            Checkbox::toggled(&token),
        ));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::PendingEdits;

    fn checkbox(from: usize, to: usize) -> CheckboxWidget {
        CheckboxWidget {
            checked: false,
            from,
            to,
        }
    }

    #[test]
    fn toggle_dispatches_one_edit() {
        let doc = Document::new("- [ ] task");
        let mut host = PendingEdits::default();
        assert!(checkbox(2, 5).toggle(&doc, &mut host));
        assert_eq!(host.edits(), &[TextEdit::replace(2, 5, "[x]")]);
    }

    #[test]
    fn toggle_twice_restores_text() {
        let doc = Document::new("- [x] done\n");
        let mut host = PendingEdits::default();
        checkbox(2, 5).toggle(&doc, &mut host);
        let once = host.apply_to(&doc).unwrap();
        assert_eq!(once.text(), "- [ ] done\n");

        let mut host = PendingEdits::default();
        checkbox(2, 5).toggle(&once, &mut host);
        let twice = host.apply_to(&once).unwrap();
        assert_eq!(twice.text(), doc.text());
    }

    #[test]
    fn stale_offsets_are_a_no_op() {
        let doc = Document::new("no checkbox");
        let mut host = PendingEdits::default();
        assert!(!checkbox(2, 5).toggle(&doc, &mut host));
        assert!(!checkbox(20, 23).toggle(&doc, &mut host));
        assert!(!checkbox(5, 2).toggle(&doc, &mut host));
        assert!(host.is_empty());
    }

    #[test]
    fn checkbox_on_line() {
        let doc = Document::new("text\n  - [X] item");
        let line = doc.line(2).unwrap();
        assert_eq!(
            CheckboxWidget::on_line(&line),
            Some(CheckboxWidget {
                checked: true,
                from: 9,
                to: 12
            })
        );
        assert_eq!(CheckboxWidget::on_line(&doc.line(1).unwrap()), None);
    }

    #[test]
    fn labels_for_text_hosts() {
        let bullet = Widget::Bullet {
            depth: 1,
            glyph: "◦".into(),
        };
        assert_eq!(bullet.label(), "◦ ");
        assert_eq!(
            Widget::Ordinal {
                label: "3.".into()
            }
            .label(),
            "3. "
        );
        assert_eq!(Widget::Checkbox(checkbox(0, 3)).label(), "☐ ");
    }

    #[test]
    fn math_widget_html() {
        let w = Widget::Math {
            expression: "x^2".into(),
            display: true,
        };
        let html = w.to_html();
        assert!(html.starts_with(r#"<div class="cm-math-widget math-display">"#));
        assert!(html.contains("<math"));
    }
}

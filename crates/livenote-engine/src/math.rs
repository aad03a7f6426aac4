//! LaTeX to MathML for math widgets and export.
//!
//! [`render_math`] produces only the inner markup. Callers pick the wrapper
//! through [`MathMode::wrap`], so widgets and exported HTML share one element
//! shape per mode.

use pulldown_latex::{
    Parser, Storage,
    config::{DisplayMode, RenderConfig},
    mathml::push_mathml,
};

/// Inline `$..$` or display `$$..$$` math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathMode {
    Inline,
    Display,
}

impl MathMode {
    pub fn new(display: bool) -> Self {
        if display {
            MathMode::Display
        } else {
            MathMode::Inline
        }
    }

    pub fn is_display(self) -> bool {
        self == MathMode::Display
    }

    /// `math-inline` or `math-display`.
    pub fn class(self) -> &'static str {
        match self {
            MathMode::Inline => "math-inline",
            MathMode::Display => "math-display",
        }
    }

    fn tag(self) -> &'static str {
        match self {
            MathMode::Inline => "span",
            MathMode::Display => "div",
        }
    }

    fn render_config(self) -> RenderConfig<'static> {
        RenderConfig {
            display_mode: match self {
                MathMode::Inline => DisplayMode::Inline,
                MathMode::Display => DisplayMode::Block,
            },
            ..Default::default()
        }
    }

    /// Wraps rendered `body` in a `span` or `div` carrying `class` and the
    /// mode class.
    pub fn wrap(self, class: &str, body: &str) -> String {
        let tag = self.tag();
        format!(r#"<{tag} class="{class} {}">{body}</{tag}>"#, self.class())
    }
}

/// Outcome of rendering one expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathResult {
    /// MathML markup
    Rendered(String),
    /// The expression did not parse; `html` shows the escaped source instead.
    Fallback { html: String, message: String },
}

impl MathResult {
    /// Markup to insert, whichever way rendering went.
    pub fn html(&self) -> &str {
        match self {
            MathResult::Rendered(mathml) => mathml,
            MathResult::Fallback { html, .. } => html,
        }
    }

    pub fn into_html(self) -> String {
        match self {
            MathResult::Rendered(mathml) => mathml,
            MathResult::Fallback { html, .. } => html,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, MathResult::Fallback { .. })
    }
}

/// Renders `latex` (without delimiters) as MathML.
///
/// Never fails: malformed input yields [`MathResult::Fallback`] holding the
/// escaped source, reporting the first parse error.
pub fn render_math(latex: &str, mode: MathMode) -> MathResult {
    let storage = Storage::new();
    let events: Vec<_> = Parser::new(latex, &storage).collect();
    if let Some(Err(e)) = events.iter().find(|e| e.is_err()) {
        return fallback(latex, e.to_string());
    }

    let mut mathml = String::new();
    match push_mathml(&mut mathml, events.into_iter(), mode.render_config()) {
        Ok(()) => MathResult::Rendered(mathml),
        Err(e) => fallback(latex, e.to_string()),
    }
}

fn fallback(latex: &str, message: String) -> MathResult {
    log::trace!("math fallback for {latex:?}: {message}");
    let html = format!(
        r#"<code class="math-error" title="{}">{}</code>"#,
        html_escape::encode_double_quoted_attribute(&message),
        html_escape::encode_text(latex),
    );
    MathResult::Fallback { html, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_inline_math() {
        let result = render_math("x^2", MathMode::Inline);
        assert!(!result.is_fallback());
        assert!(result.html().starts_with("<math"));
        assert!(result.html().contains("</math>"));
    }

    #[test]
    fn renders_display_fraction() {
        let result = render_math(r"\frac{a}{b}", MathMode::Display);
        assert!(result.html().contains("<mfrac"));
    }

    #[test]
    fn malformed_latex_falls_back_to_source() {
        match render_math(r"\frac{a<", MathMode::Inline) {
            MathResult::Fallback { html, message } => {
                assert!(html.starts_with(r#"<code class="math-error""#));
                assert!(html.contains(r"\frac{a&lt;"));
                assert!(!message.is_empty());
            }
            MathResult::Rendered(_) => panic!("expected fallback"),
        }
    }

    #[test]
    fn wrapper_follows_mode() {
        assert_eq!(
            MathMode::Inline.wrap("math", "m"),
            r#"<span class="math math-inline">m</span>"#
        );
        assert_eq!(
            MathMode::new(true).wrap("cm-math-widget", "m"),
            r#"<div class="cm-math-widget math-display">m</div>"#
        );
    }
}

use crate::lexer::Span;
use ariadne::{Color, Label, Report, ReportKind, Source};
use std::path::Path;

const ARIADNE_MSG: &str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &str = "Write into buffer should not fail.";

/// Source text and the name it is reported under.
#[derive(Debug, Clone, Copy)]
pub struct ReportSource<'src> {
    pub text: &'src str,
    pub path: &'src Path,
}

impl<'src> ReportSource<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self { text, path }
    }

    /// Renders a single-label error report into a string.
    pub fn render(&self, code: &str, message: &str, span: Span, label: &str) -> String {
        let path = self.path.to_string_lossy();
        let path: &str = &path;
        let range = clamp(span, self.text.len());
        let mut output = std::io::Cursor::new(Vec::new());
        Report::build(ReportKind::Error, (path, range.clone()))
            .with_code(code)
            .with_message(message)
            .with_label(
                Label::new((path, range))
                    .with_message(label)
                    .with_color(Color::BrightRed),
            )
            .finish()
            .write((path, Source::from(self.text)), &mut output)
            .expect(ARIADNE_WRITE_MSG);
        String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
    }
}

// End of input spans sit one past the text.
fn clamp(span: Span, len: usize) -> std::ops::Range<usize> {
    let range = span.range();
    let start = range.start.min(len);
    let end = range.end.clamp(start, len);
    start..end
}

//! Rendering an [`IgnoreFile`] back to text.

use ignorefile_core::IgnoreFile;

/// Output formatting knobs for [`render`].
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Append a final newline to the output.
    pub trailing_newline: bool,
    /// Prepend `# <comment>` followed by a blank line.
    pub header_comment: Option<String>,
}

/// Render the rules one per line, in container order.
pub fn render(file: &IgnoreFile, options: &RenderOptions) -> String {
    let mut lines = Vec::with_capacity(file.len() + 2);

    if let Some(header) = options.header_comment.as_deref() {
        if !header.is_empty() {
            lines.push(format!("# {header}"));
            lines.push(String::new());
        }
    }

    for rule in file.rules() {
        lines.push(rule.render());
    }

    let mut output = lines.join("\n");
    if options.trailing_newline {
        output.push('\n');
    }

    output
}

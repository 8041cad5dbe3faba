//! Terminal frontend: shows the original text and its summary side by side.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::dispatcher::{SummarizationDispatcher, SummarizationResult, SummaryMethod};

pub const ORIGINAL_LABEL: &str = "Original Text";
pub const SUMMARY_LABEL: &str = "Summarized Text";

/// Line that ends text entry in an interactive session
pub const END_OF_TEXT: &str = ".";
pub const QUIT_COMMAND: &str = ":quit";

const COLUMN_GAP: &str = " | ";

/// Lay out both strings of a result as two wrapped columns
///
/// Widths are terminal columns, so wide characters count double. A pane is
/// never narrower than the longer label.
pub fn render_side_by_side(result: &SummarizationResult, total_width: usize) -> String {
    let min_pane = ORIGINAL_LABEL.width().max(SUMMARY_LABEL.width());
    let pane = (total_width.saturating_sub(COLUMN_GAP.len()) / 2).max(min_pane);
    let left = wrap_text(&result.original_text, pane);
    let right = wrap_text(&result.summary_text, pane);

    let mut out = String::new();
    push_row(&mut out, ORIGINAL_LABEL, SUMMARY_LABEL, pane);
    push_row(&mut out, &"-".repeat(pane), &"-".repeat(pane), pane);
    for row in 0..left.len().max(right.len()) {
        let l = left.get(row).map(String::as_str).unwrap_or("");
        let r = right.get(row).map(String::as_str).unwrap_or("");
        push_row(&mut out, l, r, pane);
    }
    out
}

fn push_row(out: &mut String, left: &str, right: &str, pane: usize) {
    let padding = pane.saturating_sub(left.width());
    out.push_str(left);
    out.push_str(&" ".repeat(padding));
    out.push_str(COLUMN_GAP);
    out.push_str(right);
    let trimmed_len = out.trim_end_matches(' ').len();
    out.truncate(trimmed_len);
    out.push('\n');
}

/// Greedy word wrap to `width` columns; words wider than a line are split,
/// blank lines kept
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(2);
    let mut lines = Vec::new();

    for source_line in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;

        for word in source_line.split_whitespace() {
            let mut word_width = word.width();

            if word_width > width {
                if current_width > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                for ch in word.chars() {
                    let ch_width = ch.width().unwrap_or(0);
                    if current_width + ch_width > width {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(ch);
                    current_width += ch_width;
                }
                continue;
            }

            if current_width > 0 && current_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                word_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Run the dispatcher, with a spinner on stderr while it works
pub fn summarize_with_progress(
    dispatcher: &SummarizationDispatcher,
    text: &str,
    method: Option<&str>,
    show_progress: bool,
) -> SummarizationResult {
    if let Some(tag) = method {
        if !SummaryMethod::is_known_tag(tag) {
            warn!(tag, "Unrecognized summarization method, using Abstractive");
        }
    }

    if !show_progress {
        return dispatcher.summarize(text, method);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("Summarizing ({})", SummaryMethod::from_tag(method).tag()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = dispatcher.summarize(text, method);
    spinner.finish_and_clear();
    result
}

/// Prompt-driven session: choose a method, enter text, read both panes
pub struct InteractiveSession<'a, R, W> {
    dispatcher: &'a SummarizationDispatcher,
    input: R,
    output: W,
    default_method: String,
    width: usize,
    show_progress: bool,
}

impl<'a, R: BufRead, W: Write> InteractiveSession<'a, R, W> {
    pub fn new(dispatcher: &'a SummarizationDispatcher, input: R, output: W) -> Self {
        Self {
            dispatcher,
            input,
            output,
            default_method: SummaryMethod::EXTRACTIVE_TAG.to_string(),
            width: 100,
            show_progress: false,
        }
    }

    pub fn with_default_method(mut self, method: impl Into<String>) -> Self {
        self.default_method = method.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Run until `:quit` or end of input; returns the number of summaries shown
    pub fn run(&mut self) -> Result<usize> {
        writeln!(self.output, "Text Summarization Tool")?;
        writeln!(
            self.output,
            "Choose between Extractive (LSA) or Abstractive (generative model) summarization. Type {QUIT_COMMAND} to exit."
        )?;

        let mut shown = 0;
        loop {
            write!(
                self.output,
                "\nSummarization Method [{}/{}] (default {}): ",
                SummaryMethod::EXTRACTIVE_TAG,
                SummaryMethod::ABSTRACTIVE_TAG,
                self.default_method
            )?;
            self.output.flush()?;

            let Some(choice) = self.read_line()? else { break };
            let choice = choice.trim();
            if choice == QUIT_COMMAND {
                break;
            }
            let method = if choice.is_empty() {
                self.default_method.clone()
            } else {
                choice.to_string()
            };

            writeln!(
                self.output,
                "Enter Text Here (finish with a line containing only '{END_OF_TEXT}'):"
            )?;
            self.output.flush()?;

            let (text, reached_eof) = self.read_text()?;
            if text.trim().is_empty() && reached_eof {
                break;
            }

            let result = summarize_with_progress(self.dispatcher, &text, Some(&method), self.show_progress);
            writeln!(self.output)?;
            write!(self.output, "{}", render_side_by_side(&result, self.width))?;
            shown += 1;

            if reached_eof {
                break;
            }
        }

        writeln!(self.output, "Goodbye.")?;
        Ok(shown)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Lines up to the terminator; the flag reports end of input
    fn read_text(&mut self) -> Result<(String, bool)> {
        let mut lines = Vec::new();
        loop {
            match self.read_line()? {
                Some(line) if line.trim() == END_OF_TEXT => return Ok((lines.join("\n"), false)),
                Some(line) => lines.push(line),
                None => return Ok((lines.join("\n"), true)),
            }
        }
    }
}

// File: src/cli/progress_bar.rs
// Purpose: Single-line progress bar for long running commands

use std::io;

use super::Output;

/// Text progress bar
///
/// Renders as `\r[prefix ]07/10 ==============------  70% ` and moves to a
/// new line once every item is done.
///
/// # Examples
///
/// ```no_run
/// use kiln::cli::{ProgressBar, StdoutOutput};
///
/// let mut bar = ProgressBar::new(StdoutOutput::new(), 3, None).with_prefix("Compiling:");
/// bar.draw()?;
/// for _ in 0..3 {
///     bar.advance()?;
/// }
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct ProgressBar<O: Output> {
    output: O,
    items: usize,
    progress: usize,
    redraw_rate: usize,
    width: usize,
    empty_template: String,
    filled_template: String,
    prefix: Option<String>,
}

impl<O: Output> ProgressBar<O> {
    /// Creates a bar for `items` steps
    ///
    /// Without an explicit `redraw_rate` the bar redraws about a hundred
    /// times over its lifetime.
    pub fn new(output: O, items: usize, redraw_rate: Option<usize>) -> Self {
        let redraw_rate = match redraw_rate {
            Some(rate) => rate.max(1),
            None if items > 100 => items.div_ceil(100),
            None => 1,
        };

        Self {
            output,
            items,
            progress: 0,
            redraw_rate,
            width: 20,
            empty_template: "-".to_string(),
            filled_template: "=".to_string(),
            prefix: None,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_empty_template(mut self, template: impl Into<String>) -> Self {
        self.empty_template = template.into();
        self
    }

    pub fn with_filled_template(mut self, template: impl Into<String>) -> Self {
        self.filled_template = template.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.items
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    fn render(&self) -> String {
        let digits = self.items.to_string().len();
        let filled = self.width * self.progress / self.items;
        let percent = self.progress * 100 / self.items;

        let mut line = String::from("\r");
        if let Some(prefix) = &self.prefix {
            line.push_str(prefix);
            line.push(' ');
        }
        line.push_str(&format!("{:0digits$}/{} ", self.progress, self.items));
        line.push_str(&self.filled_template.repeat(filled));
        line.push_str(&self.empty_template.repeat(self.width.saturating_sub(filled)));
        line.push_str(&format!(" {percent:>3}% "));
        line
    }

    /// Draws the bar at its current progress
    pub fn draw(&mut self) -> io::Result<()> {
        if self.items == 0 {
            return Ok(());
        }

        let line = self.render();
        self.output.write(&line)?;

        if self.progress == self.items {
            self.output.write("\n")?;
        }

        Ok(())
    }

    /// Moves one step forward, redrawing on the redraw rate and on completion
    pub fn advance(&mut self) -> io::Result<()> {
        if self.progress >= self.items {
            return Ok(());
        }

        self.progress += 1;

        if self.progress == self.items || self.progress % self.redraw_rate == 0 {
            self.draw()?;
        }

        Ok(())
    }

    /// Erases the bar from the terminal
    pub fn remove(&mut self) -> io::Result<()> {
        if self.items == 0 {
            return Ok(());
        }

        let lines = if self.is_complete() { 2 } else { 1 };
        self.output.clear_lines(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[derive(Debug, Default)]
    struct RecordingOutput {
        writes: Vec<String>,
        cleared: Vec<usize>,
    }

    impl Output for RecordingOutput {
        fn write(&mut self, text: &str) -> io::Result<()> {
            self.writes.push(text.to_string());
            Ok(())
        }

        fn clear_lines(&mut self, lines: usize) -> io::Result<()> {
            self.cleared.push(lines);
            Ok(())
        }
    }

    fn run(mut bar: ProgressBar<RecordingOutput>) -> RecordingOutput {
        bar.draw().unwrap();
        for _ in 0..bar.items {
            bar.advance().unwrap();
        }
        bar.into_output()
    }

    #[test]
    fn test_zero_items_draw_nothing() {
        let mut bar = ProgressBar::new(RecordingOutput::default(), 0, None);
        bar.draw().unwrap();

        assert!(bar.output().writes.is_empty());
    }

    #[test]
    fn test_basic_progress() {
        let output = run(ProgressBar::new(RecordingOutput::default(), 10, None));

        assert_eq!(
            output.writes,
            vec![
                "\r00/10 --------------------   0% ",
                "\r01/10 ==------------------  10% ",
                "\r02/10 ====----------------  20% ",
                "\r03/10 ======--------------  30% ",
                "\r04/10 ========------------  40% ",
                "\r05/10 ==========----------  50% ",
                "\r06/10 ============--------  60% ",
                "\r07/10 ==============------  70% ",
                "\r08/10 ================----  80% ",
                "\r09/10 ==================--  90% ",
                "\r10/10 ==================== 100% ",
                "\n",
            ]
        );
    }

    #[test]
    fn test_custom_width() {
        let output = run(ProgressBar::new(RecordingOutput::default(), 10, None).with_width(40));

        assert_eq!(output.writes[0], "\r00/10 ----------------------------------------   0% ");
        assert_eq!(output.writes[3], "\r03/10 ============----------------------------  30% ");
        assert_eq!(output.writes[10], "\r10/10 ======================================== 100% ");
    }

    #[test]
    fn test_custom_templates() {
        let output = run(
            ProgressBar::new(RecordingOutput::default(), 10, None)
                .with_empty_template("_")
                .with_filled_template("+"),
        );

        assert_eq!(output.writes[0], "\r00/10 ____________________   0% ");
        assert_eq!(output.writes[9], "\r09/10 ++++++++++++++++++__  90% ");
        assert_eq!(output.writes[10], "\r10/10 ++++++++++++++++++++ 100% ");
    }

    #[test]
    fn test_prefix() {
        let output = run(
            ProgressBar::new(RecordingOutput::default(), 10, None).with_prefix("Processing files:"),
        );

        assert_eq!(output.writes[0], "\rProcessing files: 00/10 --------------------   0% ");
        assert_eq!(output.writes[5], "\rProcessing files: 05/10 ==========----------  50% ");
        assert_eq!(output.writes.len(), 12);
    }

    #[rstest]
    #[case(100, None, 102)]
    #[case(1000, None, 102)]
    #[case(1000, Some(1), 1002)]
    fn test_redraw_rate(#[case] items: usize, #[case] rate: Option<usize>, #[case] writes: usize) {
        let output = run(ProgressBar::new(RecordingOutput::default(), items, rate));

        assert_eq!(output.writes.len(), writes);
        assert_eq!(output.writes.last().map(String::as_str), Some("\n"));
    }

    #[test]
    fn test_remove_incomplete() {
        let mut bar = ProgressBar::new(RecordingOutput::default(), 10, None);
        bar.draw().unwrap();
        bar.remove().unwrap();

        let output = bar.into_output();
        assert_eq!(output.writes, vec!["\r00/10 --------------------   0% "]);
        assert_eq!(output.cleared, vec![1]);
    }

    #[test]
    fn test_remove_complete() {
        let mut bar = ProgressBar::new(RecordingOutput::default(), 10, None);
        bar.draw().unwrap();
        for _ in 0..10 {
            bar.advance().unwrap();
        }
        bar.remove().unwrap();

        let output = bar.into_output();
        assert_eq!(output.writes.len(), 12);
        assert_eq!(output.cleared, vec![2]);
    }

    #[test]
    fn test_advance_stops_at_items() {
        let mut bar = ProgressBar::new(RecordingOutput::default(), 2, None);
        for _ in 0..5 {
            bar.advance().unwrap();
        }

        assert_eq!(bar.progress(), 2);
        assert_eq!(bar.output().writes.len(), 3);
    }
}

//! Terminal display sink: status line, progress bar and window title

use std::io::{self, Write};

use crate::timer::{DisplayFrame, Mode, Variant};

const BAR_CELLS: usize = 30;

/// Render `frame` as a bar whose filled part is the remaining share
pub fn progress_bar(frame: &DisplayFrame, cells: usize) -> String {
    let filled = ((frame.bar_width_percent() / 100.0) * cells as f64).round() as usize;
    let filled = filled.min(cells);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(cells - filled))
}

pub fn status_line(frame: &DisplayFrame, mode: Mode, variant: Variant) -> String {
    format!(
        "{} {:<11} {} {} {:>3.0}%",
        variant.emoji(),
        mode.label(),
        progress_bar(frame, BAR_CELLS),
        frame.clock(),
        frame.progress_percent()
    )
}

/// Writes the status line in place and sets the terminal window title
pub struct TerminalDisplay<W: Write> {
    out: W,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn render(&mut self, frame: &DisplayFrame, mode: Mode, variant: Variant) -> io::Result<()> {
        // Clear the line, then redraw from column zero
        write!(self.out, "\r\x1b[2K{}", status_line(frame, mode, variant))?;
        self.out.flush()
    }

    pub fn set_window_title(&mut self, title: &str) -> io::Result<()> {
        write!(self.out, "\x1b]0;{}\x07", title)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::project;

    #[test]
    fn bar_shrinks_as_time_elapses() {
        assert_eq!(progress_bar(&project(300, 300), 4), "[####]");
        assert_eq!(progress_bar(&project(150, 300), 4), "[##--]");
        assert_eq!(progress_bar(&project(0, 300), 4), "[----]");
    }

    #[test]
    fn status_line_shows_mode_clock_and_progress() {
        let line = status_line(&project(1440, 1500), Mode::Pomodoro, Variant::Work);
        assert!(line.contains("Pomodoro"));
        assert!(line.contains("24:00"));
        assert!(line.ends_with("  4%"));
    }

    #[test]
    fn window_title_uses_osc_sequence() {
        let mut display = TerminalDisplay::new(Vec::new());
        display.set_window_title("(05:00) Pomodoro Timer").unwrap();
        let written = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(written, "\x1b]0;(05:00) Pomodoro Timer\x07");
    }
}

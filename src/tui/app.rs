use std::path::PathBuf;
use std::sync::mpsc::Sender;

use crate::intake;
use crate::models::AnalysisEvent;
use crate::session::{Session, ANALYSIS_DELAY};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Main,
    About,
}

pub struct App {
    /// Audio files offered by the chooser, sorted by filename.
    pub files: Vec<PathBuf>,
    pub names: Vec<String>,
    pub selected: usize,
    pub scroll_offset: usize,
    /// Visible height of the file list (updated each frame by the renderer)
    pub visible_rows: usize,
    pub session: Session,
    pub view: View,
    /// Blocking rejection message, the alert shown for an invalid file.
    pub notice: Option<String>,
    pub should_quit: bool,
    pub path: PathBuf,
}

impl App {
    pub fn new(files: Vec<PathBuf>, path: PathBuf) -> Self {
        let names = files
            .iter()
            .map(|p| {
                p.file_name()
                    .and_then(|f| f.to_str())
                    .unwrap_or("unknown")
                    .to_string()
            })
            .collect();
        Self {
            files,
            names,
            selected: 0,
            scroll_offset: 0,
            visible_rows: 20,
            session: Session::new(),
            view: View::Main,
            notice: None,
            should_quit: false,
            path,
        }
    }

    /// Run intake on the highlighted file. A valid file becomes the
    /// session's current selection (cancelling any pending analysis);
    /// a rejection raises the blocking notice.
    pub fn choose_selected(&mut self) {
        let Some(path) = self.files.get(self.selected) else {
            return;
        };
        match intake::submit(path) {
            Ok(metadata) => self.session.select(metadata),
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    /// Schedule the delayed analysis of the chosen file, if allowed.
    pub fn request_analysis(&mut self, sender: &Sender<AnalysisEvent>) {
        if !self.session.can_analyze() {
            return;
        }
        if let Err(e) = self.session.begin_analysis(sender, ANALYSIS_DELAY) {
            self.notice = Some(e.to_string());
        }
    }

    pub fn select_next(&mut self) {
        if !self.files.is_empty() {
            self.selected = (self.selected + 1).min(self.files.len() - 1);
            self.ensure_visible();
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.ensure_visible();
    }

    /// Adjust scroll_offset so that self.selected is within the visible window.
    fn ensure_visible(&mut self) {
        if self.visible_rows == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = self.selected - self.visible_rows + 1;
        }
    }
}

//! Toolkit-independent state and actions of the GIF generator form.
//!
//! The form never talks to a windowing system directly. Native pickers and
//! message boxes come in through [`Dialogs`], which keeps everything here
//! testable without a display.

use log::{error, info};
use std::path::{Path, PathBuf};

use crate::assembler::{assemble_gif, GifSummary, GIF_EXTENSION};
use crate::error::{AssembleError, FormError};

/// Per-frame duration used by the form's Generate action.
pub const FORM_FRAME_DURATION_MS: u32 = 700;

/// Blocking dialogs the form relies on.
pub trait Dialogs {
    /// Multi-select picker restricted to raster images. `None` when cancelled.
    fn pick_images(&mut self) -> Option<Vec<PathBuf>>;

    /// Single directory picker. `None` when cancelled.
    fn pick_directory(&mut self) -> Option<PathBuf>;

    /// Shows a modal message and returns once it is dismissed.
    fn notify(&mut self, notification: &Notification);
}

/// Outcome of a Generate action, shown to the user as a modal message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success { path: PathBuf },
    Error { message: String },
}

impl Notification {
    pub fn title(&self) -> &'static str {
        match self {
            Notification::Success { .. } => "Success",
            Notification::Error { .. } => "Error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notification::Success { path } => format!("GIF saved as {}", path.display()),
            Notification::Error { message } => message.clone(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GifForm {
    images: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    filename: String,
}

impl GifForm {
    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    /// Appends to the current selection. Order is kept and duplicates are
    /// not removed.
    pub fn add_images<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.images.extend(paths);
    }

    /// Selected images joined for display in a single-line field.
    pub fn images_label(&self) -> String {
        self.images
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn set_output_dir(&mut self, dir: PathBuf) {
        self.output_dir = Some(dir);
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn filename_mut(&mut self) -> &mut String {
        &mut self.filename
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }

    pub fn browse_images(&mut self, dialogs: &mut impl Dialogs) {
        if let Some(paths) = dialogs.pick_images() {
            if !paths.is_empty() {
                info!("Added {} image(s) to the selection", paths.len());
                self.add_images(paths);
            }
        }
    }

    pub fn browse_output_dir(&mut self, dialogs: &mut impl Dialogs) {
        if let Some(dir) = dialogs.pick_directory() {
            self.set_output_dir(dir);
        }
    }

    /// `<output_dir>/<filename>.gif`, or the first missing field.
    pub fn output_path(&self) -> Result<PathBuf, FormError> {
        if self.images.is_empty() {
            return Err(FormError::MissingImages);
        }
        let dir = match &self.output_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => return Err(FormError::MissingOutputDirectory),
        };
        if self.filename.trim().is_empty() {
            return Err(FormError::MissingFilename);
        }
        Ok(dir.join(format!("{}.{}", self.filename, GIF_EXTENSION)))
    }

    /// Validates the fields, runs the assembler at [`FORM_FRAME_DURATION_MS`]
    /// and reports the outcome through `dialogs`.
    pub fn generate(&self, dialogs: &mut impl Dialogs) -> Notification {
        self.generate_with(dialogs, assemble_gif)
    }

    /// Same as [`GifForm::generate`] with the assembler supplied by the caller.
    /// The assembler is not called when a field is missing.
    pub fn generate_with<F>(&self, dialogs: &mut impl Dialogs, assemble: F) -> Notification
    where
        F: FnOnce(&[PathBuf], &Path, u32) -> Result<GifSummary, AssembleError>,
    {
        let notification = match self.output_path() {
            Err(err) => Notification::Error {
                message: err.to_string(),
            },
            Ok(output) => match assemble(&self.images, &output, FORM_FRAME_DURATION_MS) {
                Ok(summary) => Notification::Success { path: summary.path },
                Err(err) => {
                    error!("GIF generation failed: {}", err);
                    Notification::Error {
                        message: err.to_string(),
                    }
                }
            },
        };
        dialogs.notify(&notification);
        notification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct ScriptedDialogs {
        image_picks: VecDeque<Option<Vec<PathBuf>>>,
        directory_picks: VecDeque<Option<PathBuf>>,
        shown: Vec<Notification>,
    }

    impl Dialogs for ScriptedDialogs {
        fn pick_images(&mut self) -> Option<Vec<PathBuf>> {
            self.image_picks.pop_front().flatten()
        }

        fn pick_directory(&mut self) -> Option<PathBuf> {
            self.directory_picks.pop_front().flatten()
        }

        fn notify(&mut self, notification: &Notification) {
            self.shown.push(notification.clone());
        }
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn filled_form() -> GifForm {
        let mut form = GifForm::default();
        form.add_images(paths(&["a.png", "b.jpg"]));
        form.set_output_dir(PathBuf::from("/tmp/out"));
        form.set_filename("anim");
        form
    }

    #[test]
    fn test_browse_images_appends() {
        let mut dialogs = ScriptedDialogs::default();
        dialogs.image_picks.push_back(Some(paths(&["a.png", "b.png"])));
        dialogs.image_picks.push_back(Some(paths(&["c.png", "a.png"])));

        let mut form = GifForm::default();
        form.browse_images(&mut dialogs);
        form.browse_images(&mut dialogs);

        assert_eq!(form.images(), paths(&["a.png", "b.png", "c.png", "a.png"]).as_slice());
        assert_eq!(form.images_label(), "a.png; b.png; c.png; a.png");
    }

    #[test]
    fn test_cancelled_pickers_keep_state() {
        let mut dialogs = ScriptedDialogs::default();
        dialogs.image_picks.push_back(None);
        dialogs.directory_picks.push_back(None);

        let mut form = filled_form();
        let before = form.clone();
        form.browse_images(&mut dialogs);
        form.browse_output_dir(&mut dialogs);
        assert_eq!(form, before);
    }

    #[test]
    fn test_browse_output_dir_replaces() {
        let mut dialogs = ScriptedDialogs::default();
        dialogs.directory_picks.push_back(Some(PathBuf::from("/first")));
        dialogs.directory_picks.push_back(Some(PathBuf::from("/second")));

        let mut form = GifForm::default();
        form.browse_output_dir(&mut dialogs);
        form.browse_output_dir(&mut dialogs);
        assert_eq!(form.output_dir(), Some(Path::new("/second")));
    }

    #[test]
    fn test_output_path_appends_extension() {
        let form = filled_form();
        assert_eq!(form.output_path(), Ok(PathBuf::from("/tmp/out/anim.gif")));
    }

    #[test]
    fn test_output_path_reports_missing_fields() {
        assert_eq!(GifForm::default().output_path(), Err(FormError::MissingImages));

        let mut form = filled_form();
        form.output_dir = None;
        assert_eq!(form.output_path(), Err(FormError::MissingOutputDirectory));

        let mut form = filled_form();
        form.set_filename("   ");
        assert_eq!(form.output_path(), Err(FormError::MissingFilename));
    }

    #[test]
    fn test_generate_with_blank_filename_skips_assembler() {
        let mut dialogs = ScriptedDialogs::default();
        let mut form = filled_form();
        form.set_filename("");
        let before = form.clone();

        let notification = form.generate_with(&mut dialogs, |_, _, _| {
            panic!("assembler must not run when a field is missing")
        });

        assert!(notification.is_error());
        assert_eq!(notification.title(), "Error");
        assert!(notification.message().starts_with("Please fill in all fields"));
        assert_eq!(dialogs.shown, vec![notification]);
        assert_eq!(form, before);
    }

    #[test]
    fn test_generate_passes_fields_to_assembler() {
        let mut dialogs = ScriptedDialogs::default();
        let form = filled_form();

        let notification = form.generate_with(&mut dialogs, |frames, output, duration| {
            assert_eq!(frames, paths(&["a.png", "b.jpg"]).as_slice());
            assert_eq!(output, Path::new("/tmp/out/anim.gif"));
            assert_eq!(duration, FORM_FRAME_DURATION_MS);
            Ok(GifSummary {
                path: output.to_path_buf(),
                frame_count: frames.len(),
                frame_duration_ms: duration,
                bytes_written: 42,
            })
        });

        assert_eq!(
            notification,
            Notification::Success {
                path: PathBuf::from("/tmp/out/anim.gif")
            }
        );
        assert_eq!(notification.message(), "GIF saved as /tmp/out/anim.gif");
        assert_eq!(dialogs.shown.len(), 1);
    }

    #[test]
    fn test_generate_reports_assembler_error() {
        let mut dialogs = ScriptedDialogs::default();
        let form = filled_form();
        let before = form.clone();

        let notification = form.generate_with(&mut dialogs, |_, _, _| {
            Err(AssembleError::InvalidInput("no frames supplied".to_string()))
        });

        assert_eq!(
            notification,
            Notification::Error {
                message: "invalid input: no frames supplied".to_string()
            }
        );
        assert_eq!(dialogs.shown, vec![notification]);
        assert_eq!(form, before);
    }
}

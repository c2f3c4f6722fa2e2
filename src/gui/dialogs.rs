use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;

use gifmaker::{Dialogs, Notification, IMAGE_EXTENSIONS};

/// Native pickers and message boxes backed by `rfd`. Every call blocks the
/// UI thread until the user answers.
pub struct NativeDialogs {
    start_dir: Option<PathBuf>,
}

impl Default for NativeDialogs {
    fn default() -> Self {
        Self {
            start_dir: dirs::picture_dir().or_else(dirs::home_dir),
        }
    }
}

impl NativeDialogs {
    fn file_dialog(&self, title: &str) -> FileDialog {
        let dialog = FileDialog::new().set_title(title);
        match &self.start_dir {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }
}

impl Dialogs for NativeDialogs {
    fn pick_images(&mut self) -> Option<Vec<PathBuf>> {
        let files = self
            .file_dialog("Select Images for GIF")
            .add_filter("Image Files", IMAGE_EXTENSIONS)
            .pick_files()?;
        // Reopen where the last batch came from
        if let Some(parent) = files.first().and_then(|f| f.parent()) {
            self.start_dir = Some(parent.to_path_buf());
        }
        Some(files)
    }

    fn pick_directory(&mut self) -> Option<PathBuf> {
        self.file_dialog("Select Output Directory").pick_folder()
    }

    fn notify(&mut self, notification: &Notification) {
        let level = if notification.is_error() {
            MessageLevel::Error
        } else {
            MessageLevel::Info
        };
        MessageDialog::new()
            .set_level(level)
            .set_title(notification.title())
            .set_description(notification.message())
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

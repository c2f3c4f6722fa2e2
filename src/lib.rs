// Frame assembly and form logic shared with the GUI binary
pub mod assembler;
pub mod error;
pub mod form;

pub use assembler::{
    assemble_gif, decode_frame, is_image_file, normalize_frame, FrameAssembler, GifSummary,
    DEFAULT_FRAME_DURATION_MS, GIF_DELAY_RESOLUTION_MS, GIF_EXTENSION, IMAGE_EXTENSIONS,
};
pub use error::{AssembleError, FormError};
pub use form::{Dialogs, GifForm, Notification, FORM_FRAME_DURATION_MS};

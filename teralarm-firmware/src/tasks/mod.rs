//! Embassy tasks

mod ui;

pub use ui::ui_task;

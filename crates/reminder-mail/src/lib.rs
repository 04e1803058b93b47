//! Reminder Mail - delivers reminder reports over SMTP.

pub mod config;
pub mod smtp;
pub mod template;

pub use config::SmtpConfig;
pub use smtp::{build_message, SmtpNotifier};
pub use template::render_page;

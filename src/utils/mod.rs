pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::{default_contacts_path, get_chat_db_path};
pub use paths::{format_path_with_tilde, validate_file_size};
pub use terminal::{strip_control_sequences, to_display_line};

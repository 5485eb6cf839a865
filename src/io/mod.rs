pub mod config;
pub mod input;
pub mod output;

pub use config::load_word_list;
pub use input::{
    extract_two_speaker_dialogs, parse_tagged_file, read_transcript_lines, DialogLine,
};
pub use output::{save_dialog, save_tags, write_measures_csv};

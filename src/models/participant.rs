use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// Filename convention: status_idParticipant-interviewNumber.ext
static FILE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.*)_([0-9]+)-([0-9a-z]+)").unwrap());

/// Participant metadata carried by a transcript's filename, e.g.
/// `AD_101-2.cha` → status "AD", participant "101", interview "2".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParticipantInfo {
    pub status: String,
    pub id_participant: String,
    pub interview_number: String,
}

impl ParticipantInfo {
    /// Parse the filename convention; `None` when it doesn't match
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let captures = FILE_NAME_RE.captures(file_name)?;
        Some(Self {
            status: captures[1].to_string(),
            id_participant: captures[2].to_string(),
            interview_number: captures[3].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_name() {
        let info = ParticipantInfo::from_file_name("AD_101-2.cha").unwrap();
        assert_eq!(info.status, "AD");
        assert_eq!(info.id_participant, "101");
        assert_eq!(info.interview_number, "2");
    }

    #[test]
    fn test_malformed_file_name() {
        assert_eq!(ParticipantInfo::from_file_name("notes.txt"), None);
    }
}

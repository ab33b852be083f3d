//! Charter-specific helpers shared by storage, mail and the charter handlers.

use crate::domain::document::Revision;
use crate::domain::foundation::DocName;

/// Days the community gets to comment on a charter in external review.
pub const EXTERNAL_REVIEW_DAYS: i64 = 10;

/// File name of a charter text revision, e.g. `charter-ietf-foo-01-02.txt`.
pub fn charter_text_filename(name: &DocName, rev: Revision) -> String {
    format!("{}-{}.txt", name, rev)
}

/// A charter revision is a recharter once some earlier revision was approved.
pub fn is_recharter(rev: Revision) -> bool {
    if rev.is_proposal() {
        rev.major() >= 1
    } else {
        rev.major() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rev(s: &str) -> Revision {
        Revision::parse(s).unwrap()
    }

    #[test]
    fn filename_includes_revision() {
        let name = DocName::new("charter-ietf-foo").unwrap();
        assert_eq!(charter_text_filename(&name, rev("01-02")), "charter-ietf-foo-01-02.txt");
    }

    #[test]
    fn recharter_detection() {
        assert!(!is_recharter(rev("00-00")));
        assert!(!is_recharter(rev("00-04")));
        assert!(!is_recharter(rev("01")));
        assert!(is_recharter(rev("01-00")));
        assert!(is_recharter(rev("02")));
    }
}

use crate::parser::label_offsets;
use tracing::{instrument, trace};

/// The longest run of trailing labels a name shares with a name already in
/// the message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuffixMatch {
    /// Bytes of the textual name covered by the match, counting the '.'
    /// in front of each matched label that is not the first of the name.
    pub len: usize,

    /// Message offset of the first matched label, i.e. the pointer target.
    pub offset: u16,
}

/// Compares the labels of `name` (split into `lens`) with those of the name
/// at message offset `candidate`, starting from the last label of each.
///
/// Label content is compared byte for byte, so "Example" and "example" do
/// not match. Returns `None` if the candidate cannot be walked or its last
/// label already differs.
#[instrument(skip(message, lens))]
pub fn match_suffix(
    message: &[u8],
    candidate: usize,
    name: &[u8],
    lens: &[u8],
) -> Option<SuffixMatch> {
    let offsets = match label_offsets(message, candidate) {
        Ok(offsets) => offsets,
        Err(e) => {
            trace!("Skipping candidate: {}", e);
            return None;
        }
    };

    let mut best = None;
    let mut matched = 0;
    let mut end = name.len();

    for ((i, &len), &offset) in lens.iter().enumerate().rev().zip(offsets.iter().rev()) {
        let len = len as usize;
        let start = end - len;
        let at = offset as usize;

        let same_len = message.get(at) == Some(&(len as u8));
        if !same_len || message.get(at + 1..at + 1 + len) != Some(&name[start..end]) {
            break;
        }

        matched += len;
        if i > 0 {
            // The '.' in front of this label is covered too.
            matched += 1;
        }
        best = Some(SuffixMatch {
            len: matched,
            offset,
        });
        end = start.saturating_sub(1);
    }

    trace!("Candidate at {} matched {:?}", candidate, best);

    best
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::labels::split_labels;
    use crate::test::setup;

    // b.example.com at 12, after a 12 byte header.
    fn message() -> Vec<u8> {
        let mut message = vec![0u8; 12];
        message.extend_from_slice(&[
            1, b'b', // 12
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', // 14
            3, b'c', b'o', b'm', // 22
            0,
        ]);
        message
    }

    fn find(name: &str, message: &[u8], candidate: usize) -> Option<SuffixMatch> {
        let lens = split_labels(name.as_bytes()).unwrap();
        match_suffix(message, candidate, name.as_bytes(), &lens)
    }

    #[test]
    fn test_longest_suffix() {
        setup();
        let found = find("a.example.com", &message(), 12);
        assert_eq!(
            found,
            Some(SuffixMatch {
                len: ".example.com".len(),
                offset: 14
            })
        );
    }

    #[test]
    fn test_full_match() {
        setup();
        let found = find("b.example.com", &message(), 12).unwrap();
        assert_eq!(found.len, "b.example.com".len());
        assert_eq!(found.offset, 12);

        // The candidate has more labels than the name.
        let found = find("example.com", &message(), 12).unwrap();
        assert_eq!(found.len, "example.com".len());
        assert_eq!(found.offset, 14);
    }

    #[test]
    fn test_candidate_shorter_than_name() {
        setup();
        let found = find("www.example.com", &message(), 22).unwrap();
        assert_eq!(found.len, ".com".len());
        assert_eq!(found.offset, 22);
    }

    #[test]
    fn test_no_match() {
        setup();
        assert_eq!(find("example.org", &message(), 12), None);
        // Same length, different content.
        assert_eq!(find("a.example.net", &message(), 12), None);
        // Labels must match in full, not as a prefix.
        assert_eq!(find("example.co", &message(), 12), None);
    }

    #[test]
    fn test_case_sensitive() {
        setup();
        let found = find("a.Example.com", &message(), 12).unwrap();
        assert_eq!(found.len, ".com".len());
        assert_eq!(found.offset, 22);
    }

    #[test]
    fn test_malformed_candidate() {
        setup();
        let mut message = message();
        message[22] = 0x80;
        assert_eq!(find("a.example.com", &message, 12), None);

        assert_eq!(find("a.example.com", &message, 400), None);
    }

    #[test]
    fn test_through_pointer() {
        setup();
        let mut message = message();
        // mail.<ptr 14> at 27
        message.extend_from_slice(&[4, b'm', b'a', b'i', b'l', 0xc0, 14]);
        let found = find("smtp.mail.example.com", &message, 27).unwrap();
        assert_eq!(found.len, ".mail.example.com".len());
        assert_eq!(found.offset, 27);
    }
}

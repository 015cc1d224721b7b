use std::path::Path;

use sha2::{Digest, Sha256};

use crate::message::Message;

const HASH_HEX_LEN: usize = 32;

/// Stable identity of a report, independent of the tool run that found it.
///
/// Only the file name (not its directory) takes part, so moving a checkout
/// does not change the hash.
pub fn report_hash(message: &Message) -> String {
    let file_name = Path::new(message.file_path())
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let line = message.line().to_string();
    let column = message.column().to_string();

    let mut hasher = Sha256::new();
    for part in [
        file_name.as_str(),
        message.checker_name().as_str(),
        message.message(),
        line.as_str(),
        column.as_str(),
    ] {
        hasher.update(part.as_bytes());
        hasher.update(b"|||");
    }
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(HASH_HEX_LEN);
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_ignores_directory_but_not_position() {
        let a = Message::new("/one/src/mod.py", 10, 4, "[E] x", "E").unwrap();
        let b = Message::new("/two/src/mod.py", 10, 4, "[E] x", "E").unwrap();
        let c = Message::new("/one/src/mod.py", 11, 4, "[E] x", "E").unwrap();

        assert_eq!(report_hash(&a), report_hash(&b));
        assert_ne!(report_hash(&a), report_hash(&c));
        assert_eq!(report_hash(&a).len(), HASH_HEX_LEN);
    }
}

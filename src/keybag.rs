use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::keypair::PrivateKey;
use crate::types::PublicKey;
use crate::{Error, Result};

const COMMENT_MARKERS: [&str; 3] = ["#", "//", ";"];

fn is_comment(token: &str) -> bool {
    COMMENT_MARKERS
        .iter()
        .any(|marker| token.starts_with(marker))
}

/// The private keys a client may sign with, indexed by public key.
#[derive(Clone, Debug, Default)]
pub struct KeyBag {
    keys: BTreeMap<PublicKey, PrivateKey>,
}

impl KeyBag {
    pub fn new() -> Self {
        KeyBag::default()
    }

    pub fn add(&mut self, key: PrivateKey) -> PublicKey {
        let public_key = key.public_key();
        self.keys.insert(public_key, key);
        public_key
    }

    pub fn add_wif(&mut self, wif: &str) -> Result<PublicKey> {
        Ok(self.add(PrivateKey::from_wif(wif)?))
    }

    /// Imports one WIF key per line.
    ///
    /// Blank lines and lines starting with `#`, `//` or `;` are skipped, and
    /// a comment may follow the key after whitespace. Anything else on the
    /// line is an error naming the (1-based) line number. Nothing is added
    /// unless every line parses.
    pub fn import_str(&mut self, content: &str) -> Result<usize> {
        let mut parsed = vec![];
        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || is_comment(line) {
                continue;
            }
            let parse_error = || Error::KeyFileParse {
                line: index + 1,
                content: line.to_string(),
            };

            let mut tokens = line.split_whitespace();
            let wif = tokens.next().ok_or_else(parse_error)?;
            if wif.contains(|c: char| c == '/' || c == '#' || c == ';') {
                return Err(parse_error());
            }
            if let Some(rest) = tokens.next() {
                if !is_comment(rest) {
                    return Err(parse_error());
                }
            }
            let key = PrivateKey::from_wif(wif).map_err(|e| {
                log::debug!("key file line {}: {}", index + 1, e);
                parse_error()
            })?;
            parsed.push(key);
        }

        let count = parsed.len();
        for key in parsed {
            self.add(key);
        }
        log::info!("imported {} keys", count);
        Ok(count)
    }

    pub fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let content = fs::read_to_string(path.as_ref())?;
        self.import_str(&content)
            .map_err(|e| e.context(format!("import {}", path.as_ref().display())))
    }

    pub fn public_keys(&self) -> Vec<PublicKey> {
        self.keys.keys().cloned().collect()
    }

    pub fn contains(&self, public_key: &PublicKey) -> bool {
        self.keys.contains_key(public_key)
    }

    pub fn get(&self, public_key: &PublicKey) -> Option<&PrivateKey> {
        self.keys.get(public_key)
    }

    /// The private keys for those of `public_keys` held in the bag, in the
    /// order given.
    pub fn privates_for(&self, public_keys: &[PublicKey]) -> Result<Vec<PrivateKey>> {
        let found: Vec<PrivateKey> = public_keys
            .iter()
            .filter_map(|key| self.keys.get(key).cloned())
            .collect();
        if found.is_empty() {
            return Err(Error::NoSigningKeyFound);
        }
        Ok(found)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const WIF_A: &str = "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ";

    #[test]
    fn import_with_comments_test() {
        let other = PrivateKey::generate();
        let content = format!(
            "# keys\n\n// more\n; and more\n  {}   # trailing\n{} ; note\n",
            WIF_A,
            other.to_wif()
        );
        let mut bag = KeyBag::new();
        assert_eq!(bag.import_str(&content).unwrap(), 2);
        assert_eq!(bag.len(), 2);
        assert!(bag.contains(&other.public_key()));
        assert!(bag.contains(&PrivateKey::from_wif(WIF_A).unwrap().public_key()));
    }

    #[test]
    fn import_rejects_malformed_lines_test() {
        let cases = [
            format!("{}#comment", WIF_A),
            format!("{} extra", WIF_A),
            format!("{}/x", WIF_A),
            String::from("notakey"),
        ];
        for case in cases.iter() {
            let mut bag = KeyBag::new();
            let content = format!("# header\n{}\n", case);
            match bag.import_str(&content) {
                Err(Error::KeyFileParse { line, .. }) => assert_eq!(line, 2),
                other => panic!("{:?} accepted: {:?}", case, other),
            }
            assert!(bag.is_empty());
        }
    }

    #[test]
    fn import_file_test() {
        let path = std::env::temp_dir().join(format!("graphene-keys-{}.txt", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", WIF_A).unwrap();
        drop(file);

        let mut bag = KeyBag::new();
        assert_eq!(bag.import_file(&path).unwrap(), 1);
        std::fs::remove_file(&path).unwrap();
        assert!(bag.import_file(&path).is_err());
    }

    #[test]
    fn privates_for_test() {
        let mut bag = KeyBag::new();
        let a = bag.add(PrivateKey::generate());
        let b = bag.add(PrivateKey::generate());
        let stranger = PrivateKey::generate().public_key();

        let selected = bag.privates_for(&[b, stranger, a]).unwrap();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].public_key(), b);
        assert_eq!(selected[1].public_key(), a);

        assert!(matches!(
            bag.privates_for(&[stranger]),
            Err(Error::NoSigningKeyFound)
        ));
    }
}

use sha2::{Digest, Sha512};

/// Hex SHA-512 of the UTF-8 password. Unsalted so digests stored by earlier
/// deployments keep matching.
pub fn hash_password(plain: &str) -> String {
    let digest = Sha512::digest(plain.as_bytes());
    format!("{:x}", digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET1_SHA512: &str = "1c3e9787e63aa086675efe17a9b2b1adbeaddd19283d8bfe364a8e044f0cc24b2cb804d1136685069f0d9bd929fd79f96b89762a2f10917e6a21495b5d080ee1";

    #[test]
    fn digest_is_lowercase_hex_sha512() {
        let hash = hash_password("secret1");
        assert_eq!(hash, SECRET1_SHA512);
        assert_eq!(hash.len(), 128);
    }

    #[test]
    fn empty_password_still_hashes() {
        assert!(hash_password("").starts_with("cf83e1357eefb8bd"));
    }

    #[test]
    fn different_passwords_give_different_digests() {
        assert_ne!(hash_password("secret1"), hash_password("secret2"));
    }
}

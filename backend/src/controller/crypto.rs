use blake2::{Blake2b512, Digest};

/// Salted password hashing
pub struct CryptoController {
    salt: Vec<u8>,
}

impl CryptoController {
    pub fn new(salt: &str) -> Self {
        Self {
            salt: salt.as_bytes().to_vec(),
        }
    }
    /// hash `src` and compare hash value with `hashed`
    pub fn hash_eq(&self, src: &str, hashed: &[u8]) -> bool {
        let src_hashed: Vec<u8> = self.hash(src);
        if src_hashed.len() != hashed.len() {
            return false;
        }
        let mut result = true;
        for (a, b) in src_hashed.iter().zip(hashed.iter()) {
            if *a != *b {
                result = false;
            }
        }
        result
    }
    /// get BLAKE2b-512 hashed bytes with salt
    pub fn hash(&self, src: &str) -> Vec<u8> {
        let mut hasher = Blake2b512::new();
        hasher.update([src.as_bytes(), self.salt.as_slice()].concat());

        let hashed = hasher.finalize();
        hashed.to_vec()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hash_roundtrip() {
        let crypto = CryptoController::new("salt");
        let hashed = crypto.hash("hunter2");
        assert_eq!(hashed.len(), 64);
        assert!(crypto.hash_eq("hunter2", &hashed));
        assert!(!crypto.hash_eq("hunter3", &hashed));
    }
    #[test]
    fn salt_matters() {
        let a = CryptoController::new("a").hash("pw");
        let b = CryptoController::new("b").hash("pw");
        assert_ne!(a, b);
    }
}

use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

/// Salted argon2id hashing for stored credentials.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    // Hash of a random value, made with the same parameters as real hashes.
    dummy_hash: String,
}

impl PasswordHasher {
    pub fn new(argon2: Argon2<'static>) -> Result<Self, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = argon2
            .hash_password(salt.as_str().as_bytes(), &salt)?
            .to_string();
        Ok(Self { argon2, dummy_hash })
    }

    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(self
            .argon2
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    /// Checks `password` against a stored PHC string. Parameters are read from
    /// the hash itself, so hashes made with other settings still verify.
    pub fn verify(
        &self,
        password: &str,
        stored: &str,
    ) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(stored)?;
        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Does the work of one verification against a hash no password matches,
    /// so a login for an unknown account costs the same as a wrong password.
    pub fn verify_dummy(&self, password: &str) -> bool {
        self.verify(password, &self.dummy_hash).unwrap_or(false)
    }
}

#[cfg(test)]
pub fn fast_hasher() -> PasswordHasher {
    let params = argon2::Params::new(8, 1, 1, None).unwrap();
    PasswordHasher::new(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
    .unwrap()
}

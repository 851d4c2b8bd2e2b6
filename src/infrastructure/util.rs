use crate::application::ports::util::{SecretGenerator, ShortCodeGenerator, SlugGenerator};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, RngCore, rngs::OsRng};
use slug::slugify;

/// Letters and digits without the look-alikes `0 O 1 l I`.
const SHORT_CODE_ALPHABET: &[u8] = b"23456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";
const SHORT_CODE_LEN: usize = 7;
const SECRET_BYTES: usize = 32;

#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input)
    }
}

#[derive(Default, Clone)]
pub struct RandomShortCodeGenerator;

impl ShortCodeGenerator for RandomShortCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..SHORT_CODE_LEN)
            .map(|_| SHORT_CODE_ALPHABET[rng.gen_range(0..SHORT_CODE_ALPHABET.len())] as char)
            .collect()
    }
}

#[derive(Default, Clone)]
pub struct RandomSecretGenerator;

impl SecretGenerator for RandomSecretGenerator {
    fn generate(&self) -> String {
        let mut bytes = [0u8; SECRET_BYTES];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

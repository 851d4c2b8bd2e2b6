// src/application/ports/util.rs
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}

pub trait ShortCodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Unguessable URL-safe strings for invite tokens and login state.
pub trait SecretGenerator: Send + Sync {
    fn generate(&self) -> String;
}

use std::{future::Future, pin::Pin};

use crate::{error_handler::AiLlmError, service_profiles::LlmServiceProfiles};

/// Boxed future returned by [`TextGenerator`].
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String, AiLlmError>> + Send + 'a>>;

/// Anything that can turn a prompt into text.
///
/// Handlers depend on this instead of the concrete service so quiz
/// generation can run against canned output in tests.
pub trait TextGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str, system: Option<&'a str>) -> GenerateFuture<'a>;
}

impl TextGenerator for LlmServiceProfiles {
    fn generate<'a>(&'a self, prompt: &'a str, system: Option<&'a str>) -> GenerateFuture<'a> {
        Box::pin(LlmServiceProfiles::generate(self, prompt, system))
    }
}

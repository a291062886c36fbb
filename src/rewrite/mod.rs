pub mod exec;
pub mod gemini;
pub mod prompt;

pub use exec::exec;
pub use gemini::GeminiRewriter;
pub use prompt::build_prompt;

use crate::error::Result;

pub trait MessageRewriter: Send + Sync {
    fn rewrite(&self, original: &str, diff: &str) -> Result<String>;
}

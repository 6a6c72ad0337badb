pub mod claude_client;
pub mod naming;
pub mod prompt;
pub mod reducer;
pub mod renamer;

pub use claude_client::ClaudeClient;
pub use reducer::reduce_reply_text;

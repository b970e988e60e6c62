//! PR Review Bot - a GitHub bot that reviews pull request diffs with an LLM.
//!
//! The bot accepts `pull_request` webhooks, fetches the PR's unified diff
//! from the GitHub API, asks a chat-completion endpoint for a review, and
//! posts the generated text back on the pull request as a comment. The
//! webhook response never waits for the pipeline; reviews run as
//! fire-and-forget background tasks.

pub mod config;
pub mod github;
pub mod llm;
pub mod review;
pub mod server;
pub mod types;
pub mod webhooks;

#[cfg(test)]
pub mod test_utils;

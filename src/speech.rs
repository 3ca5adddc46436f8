/*!
 * Speech output.
 *
 * Speaking is a one-way command: the text is handed to a text-to-speech
 * program and nothing waits for playback to finish.
 */

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use std::io::Write;
use std::process::{Command, Stdio};

use crate::app_config::SpeechConfig;

/// Placeholder replaced with the language tag in command arguments
pub const LANG_PLACEHOLDER: &str = "{lang}";

/// Anything that can speak text aloud
pub trait SpeechOutput: Send + Sync {
    /// Start speaking `text` in the language `language_tag`
    ///
    /// Returns once the request is handed over, not once speech ends.
    fn speak(&self, text: &str, language_tag: &str) -> Result<()>;
}

/// Speech through an external program reading text on stdin
#[derive(Debug, Clone)]
pub struct CommandSpeech {
    command: String,
    args: Vec<String>,
}

impl CommandSpeech {
    /// Create a speech output for a program and its argument template
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Create from configuration
    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }

    /// Arguments with the language placeholder filled in
    pub fn render_args(&self, language_tag: &str) -> Vec<String> {
        self.args.iter()
            .map(|arg| arg.replace(LANG_PLACEHOLDER, language_tag))
            .collect()
    }
}

impl SpeechOutput for CommandSpeech {
    fn speak(&self, text: &str, language_tag: &str) -> Result<()> {
        let args = self.render_args(language_tag);
        debug!("Speaking {} chars with {} {:?}", text.chars().count(), self.command, args);

        let mut child = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start speech command: {}", self.command))?;

        let mut stdin = child.stdin.take()
            .ok_or_else(|| anyhow!("Speech command has no stdin"))?;
        let text = text.to_string();

        // Feed and reap on a detached thread so the caller never blocks on playback
        std::thread::spawn(move || {
            if let Err(e) = stdin.write_all(text.as_bytes()) {
                warn!("Failed to send text to speech command: {}", e);
            }
            drop(stdin);
            let _ = child.wait();
        });

        Ok(())
    }
}

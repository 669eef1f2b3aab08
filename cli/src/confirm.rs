use taskdeck_core::{AssumeYes, Confirm};
use tracing::warn;

/// Interactive yes/no prompt on the terminal
pub struct Prompt;

impl Confirm for Prompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        cliclack::confirm(prompt)
            .initial_value(false)
            .interact()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Confirmation prompt failed");
                false
            })
    }
}

/// `--yes` skips the prompt
pub fn confirmer(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(Prompt)
    }
}

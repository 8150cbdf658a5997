//! Blocking user collaborators the session calls out to.

/// Yes/no confirmation and one-way alerts, supplied by the front end.
pub trait Prompter {
    /// Ask a yes/no question. `false` aborts the pending action.
    fn confirm(&mut self, question: &str) -> bool;

    /// Tell the user something went wrong.
    fn notify(&mut self, message: &str);
}

/// Answers every question the same way and records alerts.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    pub answer: bool,
    pub questions: Vec<String>,
    pub notices: Vec<String>,
}

impl ScriptedPrompter {
    pub fn accepting() -> Self {
        Self {
            answer: true,
            ..Self::default()
        }
    }

    pub fn declining() -> Self {
        Self::default()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.answer
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

use colored::Colorize;

pub fn error(msg: &str) -> String {
    msg.red().to_string()
}
pub fn warn(msg: &str) -> String {
    msg.yellow().to_string()
}
pub fn success(msg: &str) -> String {
    msg.green().to_string()
}
pub fn info(msg: &str) -> String {
    msg.blue().to_string()
}
pub fn header(msg: &str) -> String {
    msg.magenta().to_string()
}

/// yes/no decision point. interactive runs prompt on the terminal;
/// tests inject scripted answers so nothing in the core blocks on IO.
pub trait Approve {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// terminal-backed approver
pub struct Terminal;

impl Approve for Terminal {
    fn confirm(&mut self, prompt: &str) -> bool {
        dialoguer::Confirm::new()
            .with_prompt(warn(prompt))
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// fixed-answer approver
pub struct Always(pub bool);

impl Approve for Always {
    fn confirm(&mut self, _: &str) -> bool {
        self.0
    }
}

/// scripted approver, answering from a queue and refusing once drained
#[derive(Default)]
pub struct Scripted(pub std::collections::VecDeque<bool>);

impl Scripted {
    pub fn new(answers: &[bool]) -> Self {
        Self(answers.iter().copied().collect())
    }
}

impl Approve for Scripted {
    fn confirm(&mut self, _: &str) -> bool {
        self.0.pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_answers_in_order_then_refuses() {
        let mut approve = Scripted::new(&[true, false, true]);
        assert!(approve.confirm("a"));
        assert!(!approve.confirm("b"));
        assert!(approve.confirm("c"));
        assert!(!approve.confirm("d"));
    }
}

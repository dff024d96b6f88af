use std::io::{self, BufRead, Write};

/// One prompt, one line back.
///
/// Command flows take this instead of touching stdin directly, so scripted and
/// non-interactive invocations can substitute their own implementation.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Interactive reader: prints the prompt on stdout and reads one line from
/// stdin. Prompts stay plain text so the tool behaves the same under a pipe.
pub struct StdinReader;

impl LineReader for StdinReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }
}

/// Feeds canned responses to command flows under test.
#[cfg(test)]
pub struct ScriptedReader {
    responses: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
}

#[cfg(test)]
impl ScriptedReader {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: responses.iter().map(|r| (*r).to_owned()).collect(),
            prompts: Vec::new(),
        }
    }
}

#[cfg(test)]
impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_owned());
        Ok(self.responses.pop_front().unwrap_or_default())
    }
}

use reedline::{ValidationResult, Validator};

use crate::parser::is_complete;

/// Asks for another line while brackets are left open
///
/// Input that fails to parse for any other reason is submitted, so that the
/// parse error gets reported instead of waiting for more input.
///
pub struct ScriptValidator;

impl Validator for ScriptValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        if is_complete(line) || !has_open_brackets(line) {
            ValidationResult::Complete
        } else {
            ValidationResult::Incomplete
        }
    }
}

fn has_open_brackets(line: &str) -> bool {
    let mut depth = 0_i32;
    let mut quote: Option<char> = None;
    let mut comment = false;

    for c in line.chars() {
        match (quote, c) {
            _ if comment => comment = c != '\n',
            (Some(q), c) if c == q || c == '\n' => quote = None,
            (Some(_), _) => (),
            (None, '"' | '\'') => quote = Some(c),
            (None, '#') => comment = true,
            (None, '(' | '[') => depth += 1,
            (None, ')' | ']') => depth -= 1,
            _ => (),
        }
    }

    depth > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incomplete(line: &str) -> bool {
        matches!(ScriptValidator.validate(line), ValidationResult::Incomplete)
    }

    #[test]
    fn open_brackets_wait_for_more_input() {
        assert!(incomplete("x = cycle([1, 2"));
        assert!(incomplete("take(x,\n  [1"));
        assert!(!incomplete("x = cycle([1, 2])"));
    }

    #[test]
    fn other_errors_are_submitted() {
        assert!(!incomplete("x = ]"));
        assert!(!incomplete("x = '(' +"));
        assert!(!incomplete("x = 1 # ("));
    }
}

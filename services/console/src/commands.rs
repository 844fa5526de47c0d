use applicant_intake::forms::applicants::{ApplicantField, UnknownFieldError};

/// One line of the form command language. Positions are 1-based, as shown on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FormCommand {
    Add,
    Remove(usize),
    Set {
        position: usize,
        field: ApplicantField,
        value: String,
    },
    Primary(usize),
    Theme,
    Show,
    Submit,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum CommandError {
    #[error("unknown command '{0}' (type 'help' for the list)")]
    Unknown(String),
    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{0}' is not an applicant number (applicants are numbered from 1)")]
    InvalidPosition(String),
    #[error(transparent)]
    Field(#[from] UnknownFieldError),
}

pub(crate) const HELP: &str = "\
Commands:
  add                          add a blank applicant
  remove <n>                   remove applicant n
  set <n> <field> <value...>   set first-name, last-name, mobile, or email
  primary <n>                  make applicant n the primary applicant
  theme                        toggle light/dark
  show                         print the form
  submit                       validate and submit every applicant
  help                         show this list
  quit                         leave without submitting";

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub(crate) fn parse_line(line: &str) -> Result<Option<FormCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = split_word(line);
    let command = match keyword.to_ascii_lowercase().as_str() {
        "add" => FormCommand::Add,
        "remove" | "delete" | "rm" => FormCommand::Remove(position_arg("remove", rest)?),
        "primary" => FormCommand::Primary(position_arg("primary", rest)?),
        "set" => {
            let (position, rest) = split_word(rest);
            let position = parse_position("set", position)?;
            let (field, value) = split_word(rest);
            if field.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "set",
                    expected: "a field name",
                });
            }
            FormCommand::Set {
                position,
                field: field.parse()?,
                value: value.trim().to_string(),
            }
        }
        "theme" => FormCommand::Theme,
        "show" | "list" => FormCommand::Show,
        "submit" => FormCommand::Submit,
        "help" | "?" => FormCommand::Help,
        "quit" | "exit" => FormCommand::Quit,
        _ => return Err(CommandError::Unknown(keyword.to_string())),
    };

    Ok(Some(command))
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(index) => (&input[..index], &input[index..]),
        None => (input, ""),
    }
}

fn position_arg(command: &'static str, rest: &str) -> Result<usize, CommandError> {
    let (raw, _) = split_word(rest);
    parse_position(command, raw)
}

fn parse_position(command: &'static str, raw: &str) -> Result<usize, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            expected: "an applicant number",
        });
    }

    match raw.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(CommandError::InvalidPosition(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_blank_lines_and_comments() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# prefill lead applicant"), Ok(None));
    }

    #[test]
    fn parses_set_with_multi_word_value() {
        let command = parse_line("set 2 first-name Mary Ann ").expect("parses");

        assert_eq!(
            command,
            Some(FormCommand::Set {
                position: 2,
                field: ApplicantField::FirstName,
                value: "Mary Ann".to_string(),
            })
        );
    }

    #[test]
    fn set_without_value_clears_the_field() {
        let command = parse_line("set 1 email").expect("parses");

        assert_eq!(
            command,
            Some(FormCommand::Set {
                position: 1,
                field: ApplicantField::Email,
                value: String::new(),
            })
        );
    }

    #[test]
    fn accepts_camel_case_field_names() {
        let command = parse_line("set 1 lastName Doe").expect("parses");

        assert!(matches!(
            command,
            Some(FormCommand::Set {
                field: ApplicantField::LastName,
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_and_non_numeric_positions() {
        assert_eq!(
            parse_line("remove 0"),
            Err(CommandError::InvalidPosition("0".to_string()))
        );
        assert_eq!(
            parse_line("primary two"),
            Err(CommandError::InvalidPosition("two".to_string()))
        );
        assert!(matches!(
            parse_line("remove"),
            Err(CommandError::MissingArgument { command: "remove", .. })
        ));
    }

    #[test]
    fn reports_unknown_commands_and_fields() {
        assert_eq!(
            parse_line("approve 1"),
            Err(CommandError::Unknown("approve".to_string()))
        );
        assert!(matches!(
            parse_line("set 1 nickname JD"),
            Err(CommandError::Field(_))
        ));
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(parse_line("SUBMIT"), Ok(Some(FormCommand::Submit)));
        assert_eq!(parse_line("Theme"), Ok(Some(FormCommand::Theme)));
    }
}

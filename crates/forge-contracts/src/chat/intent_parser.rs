use std::collections::BTreeMap;

use serde_json::Value;

use super::command_registry::{
    CommandSpec, DIFF_COMMAND, NO_ARG_COMMANDS, RAW_ARG_COMMANDS, RECORD_COMMANDS, SET_COMMAND,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub action: String,
    pub raw: String,
    pub command_args: BTreeMap<String, Value>,
}

impl Intent {
    fn new(action: &str, raw: &str) -> Self {
        Self {
            action: action.to_string(),
            raw: raw.to_string(),
            command_args: BTreeMap::new(),
        }
    }

    fn with_arg(mut self, key: &str, value: impl Into<String>) -> Self {
        self.command_args
            .insert(key.to_string(), Value::String(value.into()));
        self
    }

    pub fn arg(&self, key: &str) -> Option<&str> {
        self.command_args.get(key).and_then(Value::as_str)
    }
}

fn find_action(command: &str, specs: &[CommandSpec]) -> Option<&'static str> {
    specs
        .iter()
        .find(|spec| spec.command == command)
        .map(|spec| spec.action)
}

fn split_args(arg: &str) -> Vec<String> {
    if arg.trim().is_empty() {
        return Vec::new();
    }
    match shell_words::split(arg) {
        Ok(parts) => parts
            .into_iter()
            .filter(|value| !value.is_empty())
            .collect(),
        Err(_) => arg.split_whitespace().map(str::to_string).collect(),
    }
}

/// Splits `field value...` or `field=value` into its two halves.
fn parse_assignment(arg: &str) -> Option<(String, String)> {
    let parts = split_args(arg);
    let (head, rest) = parts.split_first()?;
    if let Some((field, value)) = head.split_once('=') {
        let mut value = value.to_string();
        for part in rest {
            value.push(' ');
            value.push_str(part);
        }
        return Some((field.trim().to_string(), value));
    }
    Some((head.clone(), rest.join(" ")))
}

fn looks_like_assignment(text: &str) -> bool {
    text.split_once('=')
        .map(|(field, _)| {
            !field.is_empty()
                && field
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        })
        .unwrap_or(false)
}

pub fn parse_intent(text: &str) -> Intent {
    let raw_trimmed = text.trim();
    if raw_trimmed.is_empty() {
        return Intent::new("noop", text);
    }

    let Some(slash_tail) = raw_trimmed.strip_prefix('/') else {
        if looks_like_assignment(raw_trimmed) {
            if let Some((field, value)) = parse_assignment(raw_trimmed) {
                return Intent::new(SET_COMMAND.action, text)
                    .with_arg("field", field)
                    .with_arg("value", value);
            }
        }
        return Intent::new("unknown", text).with_arg("command", "");
    };

    let command_len = slash_tail
        .chars()
        .take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
        .count();
    let command = slash_tail[..command_len].to_ascii_lowercase();
    let arg = slash_tail[command_len..].trim();

    if let Some(raw) = RAW_ARG_COMMANDS
        .iter()
        .find(|raw| raw.spec.command == command)
    {
        return Intent::new(raw.spec.action, text).with_arg(raw.key, arg);
    }

    if command == SET_COMMAND.command {
        let intent = Intent::new(SET_COMMAND.action, text);
        return match parse_assignment(arg) {
            Some((field, value)) => intent.with_arg("field", field).with_arg("value", value),
            None => intent.with_arg("field", "").with_arg("value", ""),
        };
    }

    if let Some(action) = find_action(&command, RECORD_COMMANDS) {
        let id = split_args(arg).into_iter().next().unwrap_or_default();
        return Intent::new(action, text).with_arg("id", id);
    }

    if command == DIFF_COMMAND.command {
        let mut ids = split_args(arg).into_iter();
        let from = ids.next().unwrap_or_default();
        let to = ids.next().unwrap_or_default();
        return Intent::new(DIFF_COMMAND.action, text)
            .with_arg("from", from)
            .with_arg("to", to);
    }

    if let Some(action) = find_action(&command, NO_ARG_COMMANDS) {
        return Intent::new(action, text);
    }

    Intent::new("unknown", text)
        .with_arg("command", command)
        .with_arg("arg", arg)
}

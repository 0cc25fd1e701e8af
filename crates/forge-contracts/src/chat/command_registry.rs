#[derive(Clone, Copy, Debug)]
pub(crate) struct CommandSpec {
    pub command: &'static str,
    pub action: &'static str,
}

/// Commands whose whole remainder is one argument, stored under `key`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RawArgCommand {
    pub spec: CommandSpec,
    pub key: &'static str,
}

pub(crate) const RAW_ARG_COMMANDS: &[RawArgCommand] = &[
    RawArgCommand {
        spec: CommandSpec {
            command: "modality",
            action: "select_modality",
        },
        key: "modality",
    },
    RawArgCommand {
        spec: CommandSpec {
            command: "model",
            action: "select_model",
        },
        key: "model",
    },
    RawArgCommand {
        spec: CommandSpec {
            command: "template",
            action: "apply_template",
        },
        key: "template",
    },
    RawArgCommand {
        spec: CommandSpec {
            command: "unset",
            action: "clear_field",
        },
        key: "field",
    },
];

pub(crate) const SET_COMMAND: CommandSpec = CommandSpec {
    command: "set",
    action: "set_field",
};

pub(crate) const RECORD_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: "favorite",
        action: "toggle_favorite",
    },
    CommandSpec {
        command: "remove",
        action: "remove_record",
    },
    CommandSpec {
        command: "reuse",
        action: "reuse_record",
    },
];

pub(crate) const DIFF_COMMAND: CommandSpec = CommandSpec {
    command: "diff",
    action: "diff_records",
};

pub(crate) const NO_ARG_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: "show",
        action: "show_form",
    },
    CommandSpec {
        command: "fields",
        action: "list_fields",
    },
    CommandSpec {
        command: "models",
        action: "list_models",
    },
    CommandSpec {
        command: "templates",
        action: "list_templates",
    },
    CommandSpec {
        command: "validate",
        action: "validate",
    },
    CommandSpec {
        command: "generate",
        action: "generate",
    },
    CommandSpec {
        command: "save",
        action: "save",
    },
    CommandSpec {
        command: "history",
        action: "list_history",
    },
    CommandSpec {
        command: "clear_history",
        action: "clear_history",
    },
    CommandSpec {
        command: "reset",
        action: "reset_form",
    },
    CommandSpec {
        command: "help",
        action: "help",
    },
    CommandSpec {
        command: "quit",
        action: "quit",
    },
    CommandSpec {
        command: "exit",
        action: "quit",
    },
];

pub const CHAT_HELP_COMMANDS: &[&str] = &[
    "/modality <text|image|video|audio>",
    "/model <id>",
    "/template <key>",
    "/set <field> <value>",
    "/unset <field>",
    "/show",
    "/fields",
    "/models",
    "/templates",
    "/validate",
    "/generate",
    "/save",
    "/history",
    "/favorite <id>",
    "/remove <id>",
    "/reuse <id>",
    "/diff <id> <id>",
    "/clear_history",
    "/reset",
    "/help",
    "/quit",
];

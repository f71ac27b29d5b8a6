//! Embed and Discord action emitters.
//!
//! Every Discord sub-action runs inside its own try/catch: a failed API call
//! is logged and recorded under `{result}_error`, and the routine continues.

use super::interpolate::{interpolate, interpolate_value, js_string, var_ref};
use super::operations::{CHANNEL, GUILD, USER, record_error};
use super::stmt::Stmt;
use crate::limits::Limits;
use crate::parse::node_config::*;
use crate::parse::types::NodeBase;

/// Reserved variables written by `embed_response`.
pub const LAST_MESSAGE: &str = "_lastMessage";
pub const LAST_MESSAGE_ID: &str = "_lastMessageId";
pub const LAST_CHANNEL_ID: &str = "_lastChannelId";

const DEFAULT_POLL_MS: u64 = 60_000;
const DEFAULT_COLLECT_MS: u64 = 30_000;
const MAX_PURGE_DAYS: u64 = 7;

/// `#RRGGBB` (or `RRGGBB`) to an integer color.
pub fn parse_hex_color(color: &str) -> Option<u32> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

// =============================================================================
// EMBEDS
// =============================================================================

pub fn emit_embed_builder(node: &NodeBase<EmbedBuilderConfig>) -> Vec<Stmt> {
    let cfg = &node.data.config;
    let name = match cfg.variable_name.trim() {
        "" => format!("{}_embed", node.id.ident()),
        n => n.to_string(),
    };
    let target = var_ref(&name);
    let text = |v: &Option<String>| v.as_deref().filter(|s| !s.trim().is_empty()).map(interpolate);

    let mut props: Vec<(String, String)> = Vec::new();
    if let Some(title) = text(&cfg.title) {
        props.push(("title".into(), title));
    }
    if let Some(description) = text(&cfg.description) {
        props.push(("description".into(), description));
    }
    if let Some(color) = cfg.color.as_deref().and_then(parse_hex_color) {
        props.push(("color".into(), color.to_string()));
    }
    if let Some(url) = text(&cfg.url) {
        props.push(("url".into(), url));
    }
    if let Some(author) = text(&cfg.author_name) {
        let icon = text(&cfg.author_icon_url)
            .map(|i| format!(", icon_url: {}", i))
            .unwrap_or_default();
        props.push(("author".into(), format!("{{ name: {}{} }}", author, icon)));
    }
    if let Some(thumbnail) = text(&cfg.thumbnail) {
        props.push(("thumbnail".into(), format!("{{ url: {} }}", thumbnail)));
    }
    if let Some(image) = text(&cfg.image) {
        props.push(("image".into(), format!("{{ url: {} }}", image)));
    }
    if let Some(footer) = text(&cfg.footer_text) {
        let icon = text(&cfg.footer_icon_url)
            .map(|i| format!(", icon_url: {}", i))
            .unwrap_or_default();
        props.push(("footer".into(), format!("{{ text: {}{} }}", footer, icon)));
    }
    if !cfg.fields.is_empty() {
        let fields: Vec<String> = cfg
            .fields
            .iter()
            .map(|f| {
                format!(
                    "{{ name: {}, value: {}, inline: {} }}",
                    interpolate(&f.name),
                    interpolate(&f.value),
                    f.inline
                )
            })
            .collect();
        props.push(("fields".into(), format!("[{}]", fields.join(", "))));
    }
    if cfg.timestamp {
        props.push(("timestamp".into(), "new Date().toISOString()".into()));
    }

    let mut out = vec![Stmt::line(format!("{} = {{}};", target))];
    out.extend(
        props
            .into_iter()
            .map(|(key, value)| Stmt::line(format!("{}.{} = {};", target, key, value))),
    );
    out
}

pub fn emit_embed_response(node: &NodeBase<EmbedResponseConfig>) -> Vec<Stmt> {
    let cfg = &node.data.config;
    let mut payload = vec![format!("embeds: [{}]", var_ref(&cfg.embed_variable))];
    if let Some(content) = cfg.content.as_deref().filter(|c| !c.is_empty()) {
        payload.insert(0, format!("content: {}", interpolate(content)));
    }
    let reply = if cfg.ephemeral {
        format!("{}, ephemeral: true, fetchReply: true", payload.join(", "))
    } else {
        format!("{}, fetchReply: true", payload.join(", "))
    };

    vec![Stmt::block(
        "",
        vec![
            Stmt::line(format!(
                "const sent = interaction ? await interaction.reply({{ {} }}) : await message.channel.send({{ {} }});",
                reply,
                payload.join(", ")
            )),
            Stmt::line(format!("{} = sent;", var_ref(LAST_MESSAGE))),
            Stmt::line(format!("{} = sent?.id ?? null;", var_ref(LAST_MESSAGE_ID))),
            Stmt::line(format!(
                "{} = sent?.channelId ?? sent?.channel?.id ?? null;",
                var_ref(LAST_CHANNEL_ID)
            )),
        ],
    )]
}

// =============================================================================
// DISCORD ACTIONS
// =============================================================================

pub fn emit_discord_action(node: &NodeBase<DiscordActionConfig>, limits: &Limits) -> Vec<Stmt> {
    let cfg = &node.data.config;
    let result = cfg
        .result_variable()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}_result", node.id.ident()));
    let bind = |value: &str| -> Vec<Stmt> {
        match cfg.result_variable() {
            Some(name) => vec![Stmt::line(format!("{} = {};", var_ref(name), value))],
            None => Vec::new(),
        }
    };

    let body: Vec<Stmt> = match cfg {
        DiscordActionConfig::SendDm { user_id, message, .. } => {
            let mut body = vec![
                Stmt::line(format!(
                    "const user = await client.users.fetch({});",
                    user_or_invoker(Some(user_id.as_str()))
                )),
                Stmt::line(format!("const sent = await user.send({});", interpolate(message))),
            ];
            body.extend(bind("sent?.id ?? null"));
            body
        }
        DiscordActionConfig::AddReaction { message_id, emoji } => vec![
            target_message(message_id.as_deref()),
            Stmt::line(format!("await target.react({});", interpolate(emoji))),
        ],
        DiscordActionConfig::AddReactions { message_id, emojis } => vec![
            target_message(message_id.as_deref()),
            Stmt::block(
                format!("for (const emoji of {})", string_array(emojis)),
                vec![Stmt::line("await target.react(emoji);")],
            ),
        ],
        DiscordActionConfig::CreatePoll {
            question,
            options,
            duration_ms,
            ..
        } => {
            let duration = duration_ms.unwrap_or(DEFAULT_POLL_MS).min(limits.max_wait_ms);
            let mut body = poll(question, options, duration);
            body.extend(bind("{ question: poll.content, counts, winner: winner?.label ?? null }"));
            body
        }
        DiscordActionConfig::GetRole { role_id, .. } => {
            let mut body = vec![Stmt::line(format!(
                "const role = await {}?.roles?.fetch({});",
                GUILD,
                interpolate(role_id)
            ))];
            body.extend(bind("role ? { id: role.id, name: role.name, color: role.color } : null"));
            body
        }
        DiscordActionConfig::HasRole { user_id, role_id, .. } => {
            let mut body = vec![fetch_member(user_id.as_deref())];
            body.extend(bind(&format!(
                "member?.roles?.cache?.has({}) ?? false",
                interpolate(role_id)
            )));
            body
        }
        DiscordActionConfig::AddRole { user_id, role_id } => vec![
            fetch_member(user_id.as_deref()),
            Stmt::line(format!("await member.roles.add({});", interpolate(role_id))),
        ],
        DiscordActionConfig::RemoveRole { user_id, role_id } => vec![
            fetch_member(user_id.as_deref()),
            Stmt::line(format!("await member.roles.remove({});", interpolate(role_id))),
        ],
        DiscordActionConfig::GetChannel { channel_id, .. } => {
            let mut body = vec![Stmt::line(format!(
                "const channel = await client.channels.fetch({});",
                interpolate(channel_id)
            ))];
            body.extend(bind("channel ? { id: channel.id, name: channel.name, type: channel.type } : null"));
            body
        }
        DiscordActionConfig::Kick { user_id, reason } => vec![
            fetch_member(Some(user_id.as_str())),
            Stmt::line(format!("await member.kick({});", optional_text(reason))),
        ],
        DiscordActionConfig::Ban {
            user_id,
            reason,
            delete_message_days,
        } => {
            let seconds = delete_message_days.unwrap_or(0).min(MAX_PURGE_DAYS) * 86_400;
            vec![Stmt::line(format!(
                "await {}.members.ban({}, {{ reason: {}, deleteMessageSeconds: {} }});",
                GUILD,
                interpolate(user_id),
                optional_text(reason),
                seconds
            ))]
        }
        DiscordActionConfig::CreateChannel {
            name, channel_type, ..
        } => {
            let mut body = vec![Stmt::line(format!(
                "const created = await {}.channels.create({{ name: {}, type: {} }});",
                GUILD,
                interpolate(name),
                channel_type.api_value()
            ))];
            body.extend(bind("created?.id ?? null"));
            body
        }
        DiscordActionConfig::DeleteChannel { channel_id } => vec![
            Stmt::line(format!(
                "const channel = await client.channels.fetch({});",
                interpolate(channel_id)
            )),
            Stmt::line("await channel?.delete();"),
        ],
        DiscordActionConfig::CollectReactions {
            message_id,
            timeout_ms,
            ..
        } => {
            let timeout = timeout_ms.unwrap_or(DEFAULT_COLLECT_MS).min(limits.max_wait_ms);
            let mut body = vec![
                target_message(message_id.as_deref()),
                Stmt::line(format!(
                    "const collected = await target.awaitReactions({{ filter: (reaction, user) => !user.bot, time: {} }});",
                    timeout
                )),
            ];
            body.extend(bind(
                "collected.map((reaction) => ({ emoji: reaction.emoji.name, count: reaction.count }))",
            ));
            body
        }
    };

    vec![Stmt::try_catch(
        body,
        vec![
            Stmt::line(format!(
                "console.error({}, error);",
                js_string(&format!("[plugin] discord action '{}' failed:", cfg.name()))
            )),
            record_error(&result),
        ],
    )]
}

/// Interpolated user id, falling back to the invoking user.
fn user_or_invoker(user_id: Option<&str>) -> String {
    match user_id.map(str::trim).filter(|u| !u.is_empty()) {
        Some(id) => interpolate_value(id),
        None => format!("{}?.id", USER),
    }
}

fn fetch_member(user_id: Option<&str>) -> Stmt {
    Stmt::line(format!(
        "const member = await {}.members.fetch({});",
        GUILD,
        user_or_invoker(user_id)
    ))
}

/// `const target = ...` for a message id, or the last sent message.
fn target_message(message_id: Option<&str>) -> Stmt {
    match message_id.map(str::trim).filter(|m| !m.is_empty()) {
        Some(id) => Stmt::line(format!(
            "const target = await {}.messages.fetch({});",
            CHANNEL,
            interpolate_value(id)
        )),
        None => Stmt::line(format!("const target = {};", var_ref(LAST_MESSAGE))),
    }
}

fn optional_text(text: &Option<String>) -> String {
    match text.as_deref().filter(|t| !t.is_empty()) {
        Some(t) => interpolate(t),
        None => "undefined".to_string(),
    }
}

fn string_array(items: &[String]) -> String {
    let items: Vec<String> = items.iter().map(|i| interpolate(i)).collect();
    format!("[{}]", items.join(", "))
}

/// Timed single-choice vote: each voter's latest reaction counts once.
fn poll(question: &str, options: &[PollOption], duration_ms: u64) -> Vec<Stmt> {
    let choices: Vec<String> = options
        .iter()
        .map(|o| format!("{{ emoji: {}, label: {} }}", js_string(&o.emoji), interpolate(&o.label)))
        .collect();
    vec![
        Stmt::line(format!("const options = [{}];", choices.join(", "))),
        Stmt::line(format!(
            "const poll = await {}.send([{}, ...options.map((o) => `${{o.emoji}} ${{o.label}}`)].join(\"\\n\"));",
            CHANNEL,
            interpolate(question)
        )),
        Stmt::block(
            "for (const option of options)",
            vec![Stmt::line("await poll.react(option.emoji);")],
        ),
        Stmt::line("const votes = new Map();"),
        Stmt::line(format!(
            "const collector = poll.createReactionCollector({{ filter: (reaction, user) => !user.bot && options.some((o) => o.emoji === reaction.emoji.name), time: {} }});",
            duration_ms
        )),
        Stmt::line("collector.on(\"collect\", (reaction, user) => votes.set(user.id, reaction.emoji.name));"),
        Stmt::line("await new Promise((done) => collector.on(\"end\", done));"),
        Stmt::line("const counts = Object.fromEntries(options.map((o) => [o.label, [...votes.values()].filter((e) => e === o.emoji).length]));"),
        Stmt::line("const winner = options.reduce((best, o) => (best === null || counts[o.label] > counts[best.label] ? o : best), null);"),
    ]
}

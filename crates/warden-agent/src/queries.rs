// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message-history queries answered straight from the channel log,
//! without a model round-trip.

use warden_store::ChannelMessageLog;

/// Whether an input should be answered from the message history.
pub fn is_history_query(input: &str) -> bool {
    input.to_lowercase().contains("last message")
}

/// Answers a "last message" query, optionally filtered by author
/// (`from <user>`) and/or channel (`in <channel>`).
pub fn answer_history_query(input: &str, guild: &str, log: &ChannelMessageLog) -> String {
    let lowered = input.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    let mut target_user = None;
    let mut target_channel = None;
    for (i, word) in words.iter().enumerate() {
        match *word {
            "from" | "user" if i + 1 < words.len() => target_user = Some(clean(words[i + 1])),
            "in" | "channel" if i + 1 < words.len() => {
                target_channel = Some(clean(words[i + 1]))
            }
            _ => {}
        }
    }

    let Some(record) = log.latest_message(guild, target_channel, target_user) else {
        return match (target_user, target_channel) {
            (Some(user), _) => format!("No messages from {user} found."),
            (None, Some(channel)) => format!("No messages in channel {channel} found."),
            (None, None) => "No matching messages found.".to_string(),
        };
    };

    let mut out = String::from("**Latest message**\n");
    out.push_str(&format!("From: {}\n", record.author));
    out.push_str(&format!("Channel: #{}\n", record.channel_name));
    out.push_str(&format!("Time: {}\n", record.timestamp));
    out.push_str(&format!("Content: {}", record.content));
    if !record.attachments.is_empty() {
        out.push_str(&format!("\nAttachments: {}", record.attachments.join(", ")));
    }
    out
}

/// Strips quoting and trailing punctuation from a captured filter word.
fn clean(word: &str) -> &str {
    word.trim_matches(['"', '#', '?', '!', '.', ','])
}

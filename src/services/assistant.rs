//! Assistant reply strategy
//!
//! Replies come from an ordered list of [`ReplyRule`]s. The first rule whose
//! predicate matches the prompt produces the reply; otherwise a fallback
//! chosen by the ask-before-act preference is used. A real backend can be
//! plugged in as another rule without changing [`Assistant::reply`].

use tracing::debug;

/// Prompts offered as one-tap suggestions under the chat box
pub const SUGGESTED_PROMPTS: [&str; 5] = [
    "Plan my day",
    "Start 25‑min focus",
    "Summarise my morning",
    "Request a quiet workspace",
    "Draft a message to my manager",
];

const ASK_FIRST_REPLY: &str =
    "Got it. I’ll prepare a calm plan and ask before taking any steps.";
const AUTO_ACT_REPLY: &str =
    "Understood. I’ll proceed with a calm plan and auto‑act on low‑risk steps (you can undo).";

/// Inputs available to a rule when producing a reply
#[derive(Debug, Clone, Copy)]
pub struct ReplyContext<'a> {
    /// The trimmed prompt as typed
    pub prompt: &'a str,
    pub ask_before_act: bool,
}

/// A single intent: a predicate over the prompt and a reply generator
pub trait ReplyRule: Send + Sync {
    /// `prompt` is already lowercased
    fn matches(&self, prompt: &str) -> bool;

    fn reply(&self, ctx: &ReplyContext<'_>) -> String;
}

type ReplyFn = Box<dyn Fn(&ReplyContext<'_>) -> String + Send + Sync>;

/// Rule that fires when the prompt contains a keyword
pub struct KeywordRule {
    keyword: String,
    respond: ReplyFn,
}

impl KeywordRule {
    pub fn new<F>(keyword: &str, respond: F) -> Self
    where
        F: Fn(&ReplyContext<'_>) -> String + Send + Sync + 'static,
    {
        Self {
            keyword: keyword.to_lowercase(),
            respond: Box::new(respond),
        }
    }
}

impl ReplyRule for KeywordRule {
    fn matches(&self, prompt: &str) -> bool {
        prompt.contains(&self.keyword)
    }

    fn reply(&self, ctx: &ReplyContext<'_>) -> String {
        (self.respond)(ctx)
    }
}

/// Ordered set of reply rules with a preference-aware fallback
pub struct Assistant {
    rules: Vec<Box<dyn ReplyRule>>,
}

impl Assistant {
    /// An assistant with no rules; every prompt gets the fallback
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; earlier rules win
    pub fn with_rule<R: ReplyRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Produce a reply for an already-trimmed prompt
    pub fn reply(&self, prompt: &str, ask_before_act: bool) -> String {
        let lower = prompt.to_lowercase();
        let ctx = ReplyContext { prompt, ask_before_act };

        if let Some(rule) = self.rules.iter().find(|rule| rule.matches(&lower)) {
            debug!("Reply rule matched prompt: {:?}", prompt);
            return rule.reply(&ctx);
        }

        debug!("No reply rule matched, using fallback (ask_before_act={})", ask_before_act);
        if ask_before_act {
            ASK_FIRST_REPLY.to_string()
        } else {
            AUTO_ACT_REPLY.to_string()
        }
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::empty().with_rule(KeywordRule::new("plan my day", |_| draft_day_plan()))
    }
}

/// The balanced day plan offered for "plan my day"
pub fn draft_day_plan() -> String {
    [
        "Here’s a balanced plan for today:",
        "• 09:00 Settle in + quick scan of priorities",
        "• 09:10 Focus (25m) — DND on, tree grows; 5m reset",
        "• 10:00 Desk stretch + water",
        "• 10:30 Digest — bundle Slack/Email; urgent lane stays open",
        "• 11:00 Adjustment hub check (quiet pod confirmed)",
        "• 12:30 Lunch + short walk",
        "• 13:30 Focus (25m) x2 — with 5m breathing/grounding between",
        "• 15:00 Meeting — capture decisions→actions (auto‑recap)",
        "• 16:30 Digest — catch‑up + draft replies",
        "• 17:00 Wrap — rollover, set tomorrow’s top 3",
    ]
    .join("\n")
}

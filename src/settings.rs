// Settings model: the eleven Gmail setting categories, the values each
// write sends, and the user list a write is applied to. Nothing here
// talks to the network; `api` turns these into requests.

use std::collections::BTreeMap;
use std::fmt;

/// Name/value pairs of one settings entry, sorted by name.
pub type Properties = BTreeMap<String, String>;

/// One of the recognized Gmail setting categories. The declaration order
/// is the order used when matching a free-text setting name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Filter,
    SendAs,
    Label,
    Forwarding,
    Pop,
    Imap,
    Vacation,
    Signature,
    General,
    Language,
    WebClip,
}

/// Shape of the value a get returns for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetShape {
    /// Sequence of entries (aliases, labels).
    Feed,
    /// A single entry of name/value pairs.
    Entry,
    /// A single boolean read from the `enable` property.
    Flag,
    /// A single string read from the `signature` property.
    Text,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Filter,
        Category::SendAs,
        Category::Label,
        Category::Forwarding,
        Category::Pop,
        Category::Imap,
        Category::Vacation,
        Category::Signature,
        Category::General,
        Category::Language,
        Category::WebClip,
    ];

    /// Feed path segment, also the name users type on the command line.
    pub fn path(self) -> &'static str {
        match self {
            Category::Filter => "filter",
            Category::SendAs => "sendas",
            Category::Label => "label",
            Category::Forwarding => "forwarding",
            Category::Pop => "pop",
            Category::Imap => "imap",
            Category::Vacation => "vacation",
            Category::Signature => "signature",
            Category::General => "general",
            Category::Language => "language",
            Category::WebClip => "webclip",
        }
    }

    /// Select a category from a free-text setting name. The name is
    /// trimmed and lower-cased, then the first category it starts with
    /// wins, so `POP3` and ` Labels ` are both accepted.
    pub fn from_setting(name: &str) -> Option<Category> {
        let name = name.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| name.starts_with(c.path()))
    }

    /// How a get is rendered, or `None` when the API has no read for it.
    pub fn get_shape(self) -> Option<GetShape> {
        match self {
            Category::SendAs | Category::Label => Some(GetShape::Feed),
            Category::Forwarding | Category::Pop | Category::Vacation => Some(GetShape::Entry),
            Category::Imap => Some(GetShape::Flag),
            Category::Signature => Some(GetShape::Text),
            Category::Filter | Category::General | Category::Language | Category::WebClip => None,
        }
    }

    pub fn supports_get(self) -> bool {
        self.get_shape().is_some()
    }

    /// Filters, aliases and labels are created; everything else is an
    /// update of the single existing entry.
    pub fn creates(self) -> bool {
        matches!(self, Category::Filter | Category::SendAs | Category::Label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Non-empty ordered list of users a write is applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUsers(Vec<String>);

impl TargetUsers {
    pub fn one(user: impl Into<String>) -> Self {
        TargetUsers(vec![user.into()])
    }

    /// Returns `None` for an empty list.
    pub fn new(users: Vec<String>) -> Option<Self> {
        if users.is_empty() {
            None
        } else {
            Some(TargetUsers(users))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub has_the_word: String,
    pub does_not_have_the_word: String,
    pub has_attachment: bool,
    pub should_mark_as_read: bool,
    pub should_archive: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendAs {
    pub name: String,
    pub address: String,
    pub reply_to: String,
    pub make_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forwarding {
    pub enable: bool,
    pub forward_to: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pop {
    pub enable: bool,
    pub enable_for: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vacation {
    pub enable: bool,
    pub subject: String,
    pub message: String,
    pub contacts_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct General {
    pub page_size: u32,
    pub shortcuts: bool,
    pub arrows: bool,
    pub snippets: bool,
    pub unicode: bool,
}

/// Values written by one change operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Filter(Filter),
    SendAs(SendAs),
    Label(String),
    Forwarding(Forwarding),
    Pop(Pop),
    Imap(bool),
    Vacation(Vacation),
    Signature(String),
    General(General),
    Language(String),
    WebClip(bool),
}

impl Change {
    pub fn category(&self) -> Category {
        match self {
            Change::Filter(_) => Category::Filter,
            Change::SendAs(_) => Category::SendAs,
            Change::Label(_) => Category::Label,
            Change::Forwarding(_) => Category::Forwarding,
            Change::Pop(_) => Category::Pop,
            Change::Imap(_) => Category::Imap,
            Change::Vacation(_) => Category::Vacation,
            Change::Signature(_) => Category::Signature,
            Change::General(_) => Category::General,
            Change::Language(_) => Category::Language,
            Change::WebClip(_) => Category::WebClip,
        }
    }

    /// Wire property names and values, in the order they are sent.
    pub fn properties(&self) -> Vec<(&'static str, String)> {
        match self {
            Change::Filter(f) => vec![
                ("from", f.from.clone()),
                ("to", f.to.clone()),
                ("subject", f.subject.clone()),
                ("hasTheWord", f.has_the_word.clone()),
                ("doesNotHaveTheWord", f.does_not_have_the_word.clone()),
                ("hasAttachment", f.has_attachment.to_string()),
                ("shouldMarkAsRead", f.should_mark_as_read.to_string()),
                ("shouldArchive", f.should_archive.to_string()),
                ("label", f.label.clone()),
            ],
            Change::SendAs(s) => vec![
                ("name", s.name.clone()),
                ("address", s.address.clone()),
                ("replyTo", s.reply_to.clone()),
                ("makeDefault", s.make_default.to_string()),
            ],
            Change::Label(label) => vec![("label", label.clone())],
            Change::Forwarding(f) => vec![
                ("enable", f.enable.to_string()),
                ("forwardTo", f.forward_to.clone()),
                ("action", f.action.clone()),
            ],
            Change::Pop(p) => vec![
                ("enable", p.enable.to_string()),
                ("enableFor", p.enable_for.clone()),
                ("action", p.action.clone()),
            ],
            Change::Imap(enable) => vec![("enable", enable.to_string())],
            Change::Vacation(v) => vec![
                ("enable", v.enable.to_string()),
                ("subject", v.subject.clone()),
                ("message", v.message.clone()),
                ("contactsOnly", v.contacts_only.to_string()),
            ],
            Change::Signature(sig) => vec![("signature", sig.clone())],
            Change::General(g) => vec![
                ("pageSize", g.page_size.to_string()),
                ("shortcuts", g.shortcuts.to_string()),
                ("arrows", g.arrows.to_string()),
                ("snippets", g.snippets.to_string()),
                ("unicode", g.unicode.to_string()),
            ],
            Change::Language(lang) => vec![("language", lang.clone())],
            Change::WebClip(enable) => vec![("enable", enable.to_string())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_names_match_by_prefix_ignoring_case() {
        assert_eq!(Category::from_setting("pop"), Some(Category::Pop));
        assert_eq!(Category::from_setting("POP3"), Some(Category::Pop));
        assert_eq!(Category::from_setting("  SeNdAs "), Some(Category::SendAs));
        assert_eq!(Category::from_setting("labels"), Some(Category::Label));
        assert_eq!(Category::from_setting("webclips"), Some(Category::WebClip));
    }

    #[test]
    fn unknown_setting_names_do_not_match() {
        for name in ["", "   ", "po", "mail", "xfilter", "send-as"] {
            assert_eq!(Category::from_setting(name), None, "{name:?}");
        }
    }

    #[test]
    fn only_seven_categories_support_get() {
        let readable: Vec<_> = Category::ALL
            .into_iter()
            .filter(|c| c.supports_get())
            .map(Category::path)
            .collect();
        assert_eq!(
            readable,
            ["sendas", "label", "forwarding", "pop", "imap", "vacation", "signature"]
        );
    }

    #[test]
    fn change_category_round_trips_to_path() {
        let change = Change::Imap(false);
        assert_eq!(change.category(), Category::Imap);
        assert_eq!(change.properties(), vec![("enable", "false".to_string())]);
        assert!(!change.category().creates());
        assert!(Change::Label("x".into()).category().creates());
    }

    #[test]
    fn target_users_must_not_be_empty() {
        assert!(TargetUsers::new(vec![]).is_none());
        let users = TargetUsers::new(vec!["a".into(), "b".into()]).unwrap();
        assert_eq!(users.iter().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(TargetUsers::one("joe").iter().count(), 1);
    }
}

// Fixed sample values used by every write. The CLI only chooses which
// setting to change and whether it is enabled; everything else comes
// from here.

use crate::settings::{Category, Change, Filter, Forwarding, General, Pop, SendAs, Vacation};

pub const FILTER_FROM: &str = "alice@example.com";
pub const FILTER_TO: &str = "bob@example.com";
pub const FILTER_SUBJECT: &str = "Weekly status";
pub const FILTER_HAS_THE_WORD: &str = "project";
pub const FILTER_DOES_NOT_HAVE_THE_WORD: &str = "draft";
pub const FILTER_HAS_ATTACHMENT: bool = true;
pub const FILTER_SHOULD_MARK_AS_READ: bool = true;
pub const FILTER_SHOULD_ARCHIVE: bool = true;
pub const FILTER_LABEL: &str = "Status reports";

pub const SEND_AS_NAME: &str = "Sales";
/// Local part of the alias; the domain comes from `--domain`.
pub const SEND_AS_LOCAL_PART: &str = "sales";
pub const SEND_AS_REPLY_TO_LOCAL_PART: &str = "support";
pub const SEND_AS_MAKE_DEFAULT: bool = false;

pub const LABEL: &str = "Receipts";

pub const FORWARDING_FORWARD_TO: &str = "archive@example.com";
pub const FORWARDING_ACTION: &str = "KEEP";

pub const POP_ENABLE_FOR: &str = "MAIL_FROM_NOW_ON";
pub const POP_ACTION: &str = "ARCHIVE";

pub const VACATION_SUBJECT: &str = "Out of office";
pub const VACATION_MESSAGE: &str = "I am away from the office and will reply when I return.";
pub const VACATION_CONTACTS_ONLY: bool = true;

pub const SIGNATURE: &str = "Sent from the Gmail settings sample";

pub const GENERAL_PAGE_SIZE: u32 = 50;
pub const GENERAL_ENABLE_SHORTCUTS: bool = true;
pub const GENERAL_ENABLE_ARROWS: bool = true;
pub const GENERAL_ENABLE_SNIPPETS: bool = true;
pub const GENERAL_ENABLE_UNICODE: bool = true;

pub const LANGUAGE: &str = "en-US";

/// Build the change a write of `category` sends. `enable` drives the
/// on/off field of forwarding, pop, imap, vacation and webclip.
pub fn change_for(category: Category, domain: &str, enable: bool) -> Change {
    match category {
        Category::Filter => Change::Filter(Filter {
            from: FILTER_FROM.into(),
            to: FILTER_TO.into(),
            subject: FILTER_SUBJECT.into(),
            has_the_word: FILTER_HAS_THE_WORD.into(),
            does_not_have_the_word: FILTER_DOES_NOT_HAVE_THE_WORD.into(),
            has_attachment: FILTER_HAS_ATTACHMENT,
            should_mark_as_read: FILTER_SHOULD_MARK_AS_READ,
            should_archive: FILTER_SHOULD_ARCHIVE,
            label: FILTER_LABEL.into(),
        }),
        Category::SendAs => Change::SendAs(SendAs {
            name: SEND_AS_NAME.into(),
            address: format!("{}@{}", SEND_AS_LOCAL_PART, domain),
            reply_to: format!("{}@{}", SEND_AS_REPLY_TO_LOCAL_PART, domain),
            make_default: SEND_AS_MAKE_DEFAULT,
        }),
        Category::Label => Change::Label(LABEL.into()),
        Category::Forwarding => Change::Forwarding(Forwarding {
            enable,
            forward_to: FORWARDING_FORWARD_TO.into(),
            action: FORWARDING_ACTION.into(),
        }),
        Category::Pop => Change::Pop(Pop {
            enable,
            enable_for: POP_ENABLE_FOR.into(),
            action: POP_ACTION.into(),
        }),
        Category::Imap => Change::Imap(enable),
        Category::Vacation => Change::Vacation(Vacation {
            enable,
            subject: VACATION_SUBJECT.into(),
            message: VACATION_MESSAGE.into(),
            contacts_only: VACATION_CONTACTS_ONLY,
        }),
        Category::Signature => Change::Signature(SIGNATURE.into()),
        Category::General => Change::General(General {
            page_size: GENERAL_PAGE_SIZE,
            shortcuts: GENERAL_ENABLE_SHORTCUTS,
            arrows: GENERAL_ENABLE_ARROWS,
            snippets: GENERAL_ENABLE_SNIPPETS,
            unicode: GENERAL_ENABLE_UNICODE,
        }),
        Category::Language => Change::Language(LANGUAGE.into()),
        Category::WebClip => Change::WebClip(enable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_builds_a_change_of_its_own_kind() {
        for category in Category::ALL {
            assert_eq!(change_for(category, "example.com", true).category(), category);
        }
    }

    #[test]
    fn disable_flag_reaches_enable_fields() {
        match change_for(Category::Pop, "example.com", false) {
            Change::Pop(pop) => assert!(!pop.enable),
            other => panic!("unexpected change {other:?}"),
        }
        assert_eq!(change_for(Category::WebClip, "example.com", false), Change::WebClip(false));
        assert_eq!(change_for(Category::Imap, "example.com", true), Change::Imap(true));
    }

    #[test]
    fn send_as_addresses_use_the_domain() {
        match change_for(Category::SendAs, "corp.test", true) {
            Change::SendAs(alias) => {
                assert_eq!(alias.address, "sales@corp.test");
                assert_eq!(alias.reply_to, "support@corp.test");
            }
            other => panic!("unexpected change {other:?}"),
        }
    }
}
